use uuid::Uuid;

use super::identity::Identity;

/// User as returned by the user store.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub roles: Vec<String>,
}

impl UserRecord {
    pub fn to_identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone(), self.roles.iter().cloned())
    }
}
