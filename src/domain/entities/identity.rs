use std::collections::BTreeSet;

use uuid::Uuid;

/// Who a session is issued for.
///
/// Roles are deduplicated and kept in lexicographic order, so every token
/// minted from the same identity lists them identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: Uuid,
    username: String,
    roles: BTreeSet<String>,
}

impl Identity {
    pub fn new<I, S>(user_id: Uuid, username: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            username: username.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    /// One claim entry per role, in iteration order.
    pub fn role_claims(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }
}
