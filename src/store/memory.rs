use std::sync::Mutex;

use super::CredentialStore;

/// Process-local credential store for embedders and tests.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: Mutex<String>,
    saves: Mutex<usize>,
    clears: Mutex<usize>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.save(token);
        if let Ok(mut n) = store.saves.lock() {
            *n = 0;
        }
        store
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }

    pub fn clear_count(&self) -> usize {
        self.clears.lock().map(|n| *n).unwrap_or(0)
    }
}

impl CredentialStore for MemoryCredentials {
    fn is_available(&self) -> bool {
        true
    }

    fn save(&self, token: &str) {
        if let Ok(mut t) = self.token.lock() {
            *t = token.to_string();
        }
        if let Ok(mut n) = self.saves.lock() {
            *n += 1;
        }
    }

    fn read(&self) -> String {
        self.token.lock().map(|t| t.clone()).unwrap_or_default()
    }

    fn clear(&self) {
        if let Ok(mut t) = self.token.lock() {
            t.clear();
        }
        if let Ok(mut n) = self.clears.lock() {
            *n += 1;
        }
    }
}
