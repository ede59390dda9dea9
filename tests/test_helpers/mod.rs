//! Scoped environment variables for configuration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Restores the touched variables and releases the process-wide lock when
/// dropped.
pub struct EnvVarGuard {
    previous: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets each `(name, value)` pair for the guard lifetime.
    pub fn set(pairs: &[(&str, &str)]) -> Self {
        let mut guard = Self::locked();
        for (name, value) in pairs {
            guard.remember(name);
            // SAFETY: the global mutex serializes environment mutations in tests.
            unsafe { env::set_var(name, value) };
        }
        guard
    }

    /// Unsets each variable for the guard lifetime.
    pub fn clear(names: &[&str]) -> Self {
        let mut guard = Self::locked();
        for name in names {
            guard.remember(name);
            // SAFETY: the global mutex serializes environment mutations in tests.
            unsafe { env::remove_var(name) };
        }
        guard
    }

    fn locked() -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Self {
            previous: Vec::new(),
            _lock: lock,
        }
    }

    fn remember(&mut self, name: &str) {
        self.previous.push((name.to_owned(), env::var(name).ok()));
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, value) in self.previous.drain(..).rev() {
            // SAFETY: the lock is still held while the fields drop.
            unsafe {
                match value {
                    Some(previous) => env::set_var(&name, previous),
                    None => env::remove_var(&name),
                }
            }
        }
    }
}
