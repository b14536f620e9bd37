//! Session identity collaborator

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The signed-in user as reported by the session layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Source of the current identity. May suspend (e.g. a session lookup).
#[async_trait]
pub trait IdentityProvider: Send + Sync + fmt::Debug {
    async fn current_identity(&self) -> Option<Identity>;
}

/// Identity provider holding an identity set by the application
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    identity: RwLock<Option<Identity>>,
}

impl StaticIdentityProvider {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity: RwLock::new(identity),
        }
    }

    /// Provider with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self::new(Some(identity))
    }

    pub fn set(&self, identity: Identity) {
        *self.identity.write() = Some(identity);
    }

    /// Sign out
    pub fn clear(&self) {
        *self.identity.write() = None;
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_identity(&self) -> Option<Identity> {
        self.identity.read().clone()
    }
}
