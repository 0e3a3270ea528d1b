//! Environment isolation for tests touching `A3LT_DATA_DIR` or `A3LT_CONFIG`.
//!
//! Hold [`ENV_LOCK`] for the whole test, then scope changes with
//! [`EnvVarGuard`].

use std::env;
use std::sync::Mutex;

pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Restores the variable's previous value when dropped.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    pub fn unset(key: &'static str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &'static str, value: Option<&str>) -> Self {
        let previous = env::var(key).ok();
        write_var(key, value);
        Self { key, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        write_var(self.key, self.previous.as_deref());
    }
}

// Callers serialise on ENV_LOCK.
#[allow(unsafe_code)]
fn write_var(key: &str, value: Option<&str>) {
    match value {
        Some(value) => unsafe { env::set_var(key, value) },
        None => unsafe { env::remove_var(key) },
    }
}
