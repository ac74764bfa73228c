// Support Widget: Session Cache
//
// Holds the server-issued session id. Empty until the first successful
// reply; once set it is sent with every request. A blank id counts as
// "no session" and is never cached.

use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct SessionCache {
    current: Mutex<Option<String>>,
}

fn usable(session_id: String) -> Option<String> {
    if session_id.trim().is_empty() {
        None
    } else {
        Some(session_id)
    }
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a session id issued earlier.
    pub fn resumed(session_id: impl Into<String>) -> Self {
        Self { current: Mutex::new(usable(session_id.into())) }
    }

    pub fn get(&self) -> Option<String> {
        self.current.lock().clone()
    }

    /// Replace the cached id with the one from the latest reply.
    /// Returns `true` when the id changed. A blank id leaves the cache as it is.
    pub fn set(&self, session_id: impl Into<String>) -> bool {
        let Some(session_id) = usable(session_id.into()) else {
            return false;
        };
        let mut current = self.current.lock();
        if current.as_deref() == Some(session_id.as_str()) {
            return false;
        }
        *current = Some(session_id);
        true
    }
}
