use crate::caller::{self, ProcessTable};
use crate::error::{Fatal, Result};
use crate::git::ConfigSource;
use crate::prompt::Prompt;
use crate::repo;
use crate::store::SecretStore;

const USERNAME_LABEL: &str = "Username";
const PASSWORD_LABEL: &str = "Password";

/// Resolve the username for the current repository. On a store miss both
/// fields are prompted for and stored together, so the follow-up password
/// request finds a complete entry.
pub fn get_username(
    table: &mut impl ProcessTable,
    config: &impl ConfigSource,
    store: &mut impl SecretStore,
    prompt: &mut impl Prompt,
) -> Result<String> {
    let key = repository_key(table, config)?;
    match store.find(&key, false)? {
        Some(credential) => Ok(credential.username),
        None => {
            let username = prompt.read_secret(USERNAME_LABEL)?;
            let password = prompt.read_secret(PASSWORD_LABEL)?;
            store.create(&key, &username, &password)?;
            Ok(username)
        }
    }
}

/// Resolve the password for the current repository. The miss path prompts
/// for the password alone and stores it under an empty username: git asks
/// for the username first in the normal flow, so that invocation has
/// already created the full entry and this one is only a fallback.
pub fn get_password(
    table: &mut impl ProcessTable,
    config: &impl ConfigSource,
    store: &mut impl SecretStore,
    prompt: &mut impl Prompt,
) -> Result<String> {
    let key = repository_key(table, config)?;
    match store.find(&key, true)? {
        Some(credential) => Ok(credential.password.unwrap_or_default()),
        None => {
            let password = prompt.read_secret(PASSWORD_LABEL)?;
            store.create(&key, "", &password)?;
            Ok(password)
        }
    }
}

/// Caller check, then config read, then normalization. The caller check
/// comes first: an untrusted chain reads nothing, prompts for nothing and
/// never touches the store.
fn repository_key(table: &mut impl ProcessTable, config: &impl ConfigSource) -> Result<String> {
    if !caller::is_git_ancestor(table)? {
        return Err(Fatal::Untrusted);
    }
    Ok(repo::normalize(&config.remote_origin_url()?))
}

#[cfg(test)]
mod tests;
