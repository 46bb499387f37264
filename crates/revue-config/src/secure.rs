// ── Secure storage ──
//
// Pass-through wrapper over the platform keyring. Keys are opaque
// strings, values are strings; no format beyond that. The named slots
// the shell uses are pinned by `StorageKey` so callers cannot drift.

use std::collections::HashMap;
use std::sync::Mutex;

use secrecy::SecretString;

use crate::ConfigError;

/// Keyring service name under which all slots are stored.
const SERVICE: &str = "revue";

/// Named secure-storage slots. The identifiers are stable -- they are
/// lookup keys, not secrets themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    ServerUrl,
    AuthToken,
    LastRepoId,
}

impl StorageKey {
    pub const ALL: [Self; 3] = [Self::ServerUrl, Self::AuthToken, Self::LastRepoId];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServerUrl => "SERVER_URL",
            Self::AuthToken => "AUTH_TOKEN",
            Self::LastRepoId => "LAST_REPO_ID",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Backend {
    Keyring,
    Memory(Mutex<HashMap<&'static str, String>>),
}

/// Get/set/remove over the platform's secure storage.
///
/// Missing entries read as `Ok(None)`; removal of a missing entry is a
/// no-op. The in-memory backend exists for tests and headless CI where
/// no keyring service is available.
pub struct SecureStore {
    service: String,
    backend: Backend,
}

impl SecureStore {
    /// Store backed by the system keyring.
    pub fn system() -> Self {
        Self {
            service: SERVICE.to_owned(),
            backend: Backend::Keyring,
        }
    }

    /// Volatile store for tests and headless environments.
    pub fn in_memory() -> Self {
        Self {
            service: SERVICE.to_owned(),
            backend: Backend::Memory(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: StorageKey) -> Result<Option<String>, ConfigError> {
        match &self.backend {
            Backend::Keyring => {
                let entry = keyring::Entry::new(&self.service, key.as_str())?;
                match entry.get_password() {
                    Ok(value) => Ok(Some(value)),
                    Err(keyring::Error::NoEntry) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
            Backend::Memory(map) => Ok(map.lock().expect("memory store lock").get(key.as_str()).cloned()),
        }
    }

    /// Read a slot as a secret, for values that should not linger in
    /// plain `String`s (the auth token).
    pub fn get_secret(&self, key: StorageKey) -> Result<Option<SecretString>, ConfigError> {
        Ok(self.get(key)?.map(SecretString::from))
    }

    pub fn set(&self, key: StorageKey, value: &str) -> Result<(), ConfigError> {
        match &self.backend {
            Backend::Keyring => {
                let entry = keyring::Entry::new(&self.service, key.as_str())?;
                entry.set_password(value)?;
                Ok(())
            }
            Backend::Memory(map) => {
                map.lock()
                    .expect("memory store lock")
                    .insert(key.as_str(), value.to_owned());
                Ok(())
            }
        }
    }

    pub fn remove(&self, key: StorageKey) -> Result<(), ConfigError> {
        match &self.backend {
            Backend::Keyring => {
                let entry = keyring::Entry::new(&self.service, key.as_str())?;
                match entry.delete_credential() {
                    Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                    Err(e) => Err(e.into()),
                }
            }
            Backend::Memory(map) => {
                map.lock().expect("memory store lock").remove(key.as_str());
                Ok(())
            }
        }
    }
}
