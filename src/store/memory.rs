use dashmap::DashMap;
use uuid::Uuid;

/// A concurrent in-memory document collection keyed by string ids.
///
/// Values carry their own id field; the collection only enforces the id -> value
/// mapping. Identifiers are v4 UUIDs assigned via [`Collection::generate_id`].
pub struct Collection<V> {
    data: DashMap<String, V>,
}

impl<V: Clone> Collection<V> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn insert(&self, id: String, value: V) {
        self.data.insert(id, value);
    }

    pub fn get(&self, id: &str) -> Option<V> {
        self.data.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &str) -> Option<V> {
        self.data.remove(id).map(|(_, value)| value)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn all(&self) -> Vec<V> {
        self.data.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn find<F>(&self, pred: F) -> Option<V>
    where
        F: Fn(&V) -> bool,
    {
        self.data
            .iter()
            .find(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
    }

    pub fn filter<F>(&self, pred: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        self.data
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl<V: Clone> Default for Collection<V> {
    fn default() -> Self {
        Self::new()
    }
}
