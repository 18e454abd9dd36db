use keyring::Entry;

use crate::error::{Fatal, Result};

/// Account slot holding the username for a repository key.
const USERNAME_SLOT: &str = "git repository username";

/// Account slot holding the secret itself. This fixed tag is what marks a
/// vault entry as created by this tool.
const PASSWORD_SLOT: &str = "git repository password";

/// One stored credential pair. `password` stays `None` when the lookup did
/// not ask for the secret.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub username: String,
    pub password: Option<String>,
}

/// Lookup-or-create surface over the platform credential vault.
pub trait SecretStore {
    /// Find the credential stored under `key`. With `include_secret`
    /// false, the password blob is never read, let alone decrypted.
    /// Not-found is `Ok(None)`, a normal outcome; every other store status
    /// is fatal.
    fn find(&mut self, key: &str, include_secret: bool) -> Result<Option<Credential>>;

    /// Store a new credential pair under `key`. Only called after a
    /// confirmed miss; two racing invocations may both get here, and the
    /// outcome is whatever the underlying store does with duplicates.
    fn create(&mut self, key: &str, username: &str, password: &str) -> Result<()>;
}

/// The OS keychain, via the `keyring` crate.
///
/// One logical credential is two keyring entries under the service `key`:
/// a username slot and a password slot. Reading the username slot never
/// unlocks the password slot, so a lookup without `include_secret` leaves
/// the secret untouched. A pair with one slot missing reads as absent,
/// letting the create path rewrite both.
pub struct Keychain;

impl Keychain {
    fn slot(key: &str, account: &str) -> Result<Entry> {
        Entry::new(key, account).map_err(|err| Fatal::Store(err.to_string()))
    }
}

impl SecretStore for Keychain {
    fn find(&mut self, key: &str, include_secret: bool) -> Result<Option<Credential>> {
        let username = match Self::slot(key, USERNAME_SLOT)?.get_password() {
            Ok(username) => username,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(err) => return Err(Fatal::Store(err.to_string())),
        };

        if !include_secret {
            return Ok(Some(Credential {
                username,
                password: None,
            }));
        }

        match Self::slot(key, PASSWORD_SLOT)?.get_password() {
            Ok(password) => Ok(Some(Credential {
                username,
                password: Some(password),
            })),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(Fatal::Store(err.to_string())),
        }
    }

    fn create(&mut self, key: &str, username: &str, password: &str) -> Result<()> {
        Self::slot(key, USERNAME_SLOT)?
            .set_password(username)
            .map_err(|err| Fatal::Store(err.to_string()))?;
        Self::slot(key, PASSWORD_SLOT)?
            .set_password(password)
            .map_err(|err| Fatal::Store(err.to_string()))?;
        Ok(())
    }
}

/// In-memory store for tests. Counts secret reads so tests can assert that
/// username-only lookups never touch the password, and injects failures
/// for the fatal-store paths.
#[cfg(test)]
pub(crate) struct MemoryStore {
    entries: std::collections::HashMap<String, (String, String)>,
    pub(crate) secret_reads: usize,
    pub(crate) finds: usize,
    pub(crate) creates: usize,
    pub(crate) fail_with: Option<String>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            entries: std::collections::HashMap::new(),
            secret_reads: 0,
            finds: 0,
            creates: 0,
            fail_with: None,
        }
    }

    pub(crate) fn seeded(key: &str, username: &str, password: &str) -> Self {
        let mut store = Self::new();
        store
            .entries
            .insert(key.to_string(), (username.to_string(), password.to_string()));
        store
    }
}

#[cfg(test)]
impl SecretStore for MemoryStore {
    fn find(&mut self, key: &str, include_secret: bool) -> Result<Option<Credential>> {
        self.finds += 1;
        if let Some(message) = &self.fail_with {
            return Err(Fatal::Store(message.clone()));
        }

        let Some((username, password)) = self.entries.get(key).cloned() else {
            return Ok(None);
        };
        let password = if include_secret {
            self.secret_reads += 1;
            Some(password)
        } else {
            None
        };
        Ok(Some(Credential { username, password }))
    }

    fn create(&mut self, key: &str, username: &str, password: &str) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(Fatal::Store(message.clone()));
        }
        self.creates += 1;
        self.entries
            .insert(key.to_string(), (username.to_string(), password.to_string()));
        Ok(())
    }
}
