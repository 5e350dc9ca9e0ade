//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` wires a real `SessionIssuer` to the in-memory fakes,
//! so route tests exercise the whole login/renew path without a database.

use std::sync::Arc;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::{TokenConfig, TokenSigner},
        use_cases::{
            credentials::CredentialVerifier,
            renewal::{RenewalStore, RenewalTokenRepo},
            session::SessionIssuer,
        },
    },
    domain::entities::user::UserRecord,
    test_utils::{
        InMemoryRenewalTokenRepo, InMemoryUserRepo, PlainPasswordVerifier, test_token_config,
    },
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let alice = create_test_user("alice", "pw", |_| {});
/// let app_state = TestAppStateBuilder::new().with_user(alice).build();
/// ```
pub struct TestAppStateBuilder {
    users: Vec<UserRecord>,
    renewal_repo: Option<Arc<dyn RenewalTokenRepo>>,
    token_config: TokenConfig,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            users: vec![],
            renewal_repo: None,
            token_config: test_token_config(),
        }
    }

    /// Add a user to the in-memory user store.
    pub fn with_user(mut self, user: UserRecord) -> Self {
        self.users.push(user);
        self
    }

    /// Replace the in-memory renewal store (e.g. with a failing one).
    pub fn with_renewal_repo(mut self, repo: Arc<dyn RenewalTokenRepo>) -> Self {
        self.renewal_repo = Some(repo);
        self
    }

    pub fn with_token_config(mut self, config: TokenConfig) -> Self {
        self.token_config = config;
        self
    }

    /// Build with a fresh `InMemoryRenewalTokenRepo`, returned for assertions.
    pub fn build_with_renewal_mock(self) -> (AppState, Arc<InMemoryRenewalTokenRepo>) {
        let repo = Arc::new(InMemoryRenewalTokenRepo::new());
        let app_state = self.with_renewal_repo(repo.clone()).build();
        (app_state, repo)
    }

    pub fn build(self) -> AppState {
        let users = Arc::new(InMemoryUserRepo::with_users(self.users));
        let renewals = self
            .renewal_repo
            .unwrap_or_else(|| Arc::new(InMemoryRenewalTokenRepo::new()));

        let issuer = SessionIssuer::new(
            CredentialVerifier::new(users.clone(), Arc::new(PlainPasswordVerifier::default())),
            TokenSigner::new(Arc::new(self.token_config)),
            RenewalStore::new(renewals, users),
        );

        AppState {
            session_issuer: Arc::new(issuer),
        }
    }
}
