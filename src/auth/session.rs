use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use uuid::Uuid;

/// The identity snapshot carried by an authenticated session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

/// Process-local session registry: opaque bearer token to authenticated user.
///
/// Nothing here is persisted — restarting the process signs every session
/// out. Each login gets its own token, so concurrent sessions for different
/// users (or the same user twice) never share mutable state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionUser>>>,
}

impl SessionStore {
    /// Record an authenticated identity and hand back its bearer token.
    pub fn start(&self, user: SessionUser) -> Uuid {
        let token = Uuid::new_v4();
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token, user);
        token
    }

    /// End a session. Ending an unknown or already-ended session is a no-op.
    pub fn end(&self, token: &Uuid) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token);
    }

    /// Resolve a token to its authenticated user, if the session is live.
    pub fn current(&self, token: &Uuid) -> Option<SessionUser> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .cloned()
    }
}
