use super::memory::Collection;
use crate::auth::types::User;

/// User accounts, with the lookups the uniqueness checks need.
pub struct UserStore {
    users: Collection<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: Collection::new(),
        }
    }

    pub fn insert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users.get(id)
    }

    pub fn put(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn remove(&self, id: &str) -> Option<User> {
        self.users.remove(id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.find(|user| user.email == email)
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.find(|user| user.username == username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
