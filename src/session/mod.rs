use std::sync::{PoisonError, RwLock};

use crate::api::AuthHeaderProvider;

mod file;
mod token;

pub use file::SessionFile;
pub use token::{BearerToken, TokenClaims};

/// The token of the logged in user, shared between the API client, which
/// reads it on every request, and login/logout, which replace it.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<BearerToken>>,
}

impl Session {
    pub fn new(token: Option<BearerToken>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn set(&self, token: BearerToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn invalidate(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl AuthHeaderProvider for Session {
    fn authorization(&self) -> Option<String> {
        self.token().map(|token| token.header_value())
    }
}
