use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::persist::Persisted;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    #[serde(default)]
    pub token: Option<String>,
}

/// Session token of the signed-in administrator.
#[derive(Clone, Copy)]
pub struct AuthStore {
    token: RwSignal<Option<String>>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self {
            token: RwSignal::new(None),
        }
    }

    /// Current token, without subscribing.
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked().filter(|t| !t.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.token.set(Some(token.into()));
    }

    pub fn clear(&self) {
        self.token.set(None);
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Persisted for AuthStore {
    const KEY: &'static str = "gvb_admin_auth";
    type Snapshot = AuthSnapshot;

    fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            token: self.token.get(),
        }
    }

    fn restore(&self, snapshot: AuthSnapshot) {
        self.token.set(snapshot.token);
    }
}
