use anyhow::{Context, Result};
use directories::ProjectDirs;
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const KEYRING_TARGET: &str = "balachka-cli";

/// Persisted session state—the CLI's stand-in for the web client's
/// `localStorage`. The email and API URL live in a TOML file under the
/// platform config dir; the token itself only ever lives in the system
/// keyring, keyed by the email.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AuthState {
    #[serde(skip)]
    pub token: Option<String>,
    pub email: Option<String>,
    pub api_url: Option<String>,
}

impl AuthState {
    pub fn path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ua", "balachka", "balachka")
            .context("Could not determine config directory")?;
        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(config_dir.join("session.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        let mut state: AuthState = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Pull the token from the keyring if we know who was logged in.
        if let Some(raw_email) = &state.email {
            let email = raw_email.trim();
            if let Ok(entry) = Entry::new_with_target(KEYRING_TARGET, KEYRING_TARGET, email) {
                if let Ok(token) = entry.get_password() {
                    state.token = Some(token);
                }
            }
        }

        Ok(state)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        if let Some(raw_email) = &self.email {
            let email = raw_email.trim();
            if let Ok(entry) = Entry::new_with_target(KEYRING_TARGET, KEYRING_TARGET, email) {
                if let Some(token) = &self.token {
                    let _ = entry.set_password(token);
                } else {
                    let _ = entry.delete_credential();
                }
            }
        }

        Ok(())
    }

    /// Wipes everything: keyring entry first (we need the email from the file
    /// to find it), then the file itself. A no-op when nothing is stored.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            if let Ok(state) = toml::from_str::<AuthState>(&content) {
                if let Some(raw_email) = state.email {
                    let email = raw_email.trim();
                    if let Ok(entry) = Entry::new_with_target(KEYRING_TARGET, KEYRING_TARGET, email)
                    {
                        let _ = entry.delete_credential();
                    }
                }
            }
            fs::remove_file(path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_state_file_is_an_error_not_a_silent_default() {
        let path = std::env::temp_dir().join("balachka-test-corrupt-session.toml");
        fs::write(&path, "definitely not toml").unwrap();
        let result = AuthState::load_from(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn state_file_without_an_email_loads_and_skips_the_keyring() {
        let path = std::env::temp_dir().join("balachka-test-anon-session.toml");
        fs::write(&path, "api_url = \"http://localhost:9999/api\"\n").unwrap();
        let state = AuthState::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(state.api_url.as_deref(), Some("http://localhost:9999/api"));
        assert!(state.email.is_none());
        assert!(state.token.is_none());
    }

    #[test]
    fn missing_state_file_is_an_empty_default() {
        let path = std::env::temp_dir().join("balachka-test-no-such-session.toml");
        let state = AuthState::load_from(&path).unwrap();
        assert!(state.email.is_none());
        assert!(state.api_url.is_none());
    }
}
