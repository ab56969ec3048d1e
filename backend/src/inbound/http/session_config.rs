//! Session cookie key and flag resolution.
//!
//! The cookie session carries only the flash queue, but its key still signs
//! and encrypts every cookie, so release builds refuse to start with a
//! missing or short key file unless an ephemeral key is explicitly allowed.

use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use tracing::warn;
use zeroize::Zeroize;

use crate::config::AppSettings;

/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to a generated key with a warning.
    Debug,
    /// Release builds require a readable key file of sufficient length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registration::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings derived from configuration.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while resolving session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Resolve session settings from application configuration and build mode.
///
/// # Errors
/// [`SessionConfigError::KeyRead`] when the key file cannot be read and no
/// ephemeral key is permitted; [`SessionConfigError::KeyTooShort`] when a
/// release build reads a key shorter than [`SESSION_KEY_MIN_LEN`].
pub fn session_settings(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let allow_ephemeral = mode.is_debug() || settings.allow_ephemeral_session_key();
    let key = session_key(&settings.session_key_file(), mode, allow_ephemeral)?;
    let cookie_secure = settings.cookie_secure();
    if !cookie_secure {
        warn!("session cookies are not marked Secure");
    }
    Ok(SessionSettings { key, cookie_secure })
}

fn session_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            // Key::derive_from panics below 32 bytes, so short keys never reach it.
            if (mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN) || length < 32 {
                bytes.zeroize();
                if allow_ephemeral {
                    warn!(path = %path.display(), length, "session key too short; using temporary key");
                    return Ok(Key::generate());
                }
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => {
            if allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(SessionConfigError::KeyRead {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for session key resolution.

    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[derive(Debug)]
    struct TempKeyFile {
        path: PathBuf,
    }

    impl TempKeyFile {
        fn new(len: usize) -> std::io::Result<Self> {
            let path = std::env::temp_dir().join(format!("session-key-{}", Uuid::new_v4()));
            std::fs::write(&path, vec![b'a'; len])?;
            Ok(Self { path })
        }
    }

    impl Drop for TempKeyFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn settings(key_file: PathBuf, allow_ephemeral: bool) -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            db_pool_size: None,
            bcrypt_cost: None,
            session_key_file: Some(key_file),
            cookie_secure: None,
            allow_ephemeral_session_key: Some(allow_ephemeral),
            store_timeout_ms: None,
        }
    }

    fn missing_path() -> PathBuf {
        std::env::temp_dir().join(format!("missing-session-key-{}", Uuid::new_v4()))
    }

    #[rstest]
    fn release_reads_a_long_enough_key() {
        let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
        let resolved = session_settings(&settings(key_file.path.clone(), false), BuildMode::Release)
            .expect("settings");
        assert!(resolved.cookie_secure);
        assert_eq!(
            resolved.key.master(),
            Key::derive_from(&[b'a'; SESSION_KEY_MIN_LEN]).master()
        );
    }

    #[rstest]
    fn release_rejects_short_key() {
        let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1).expect("key file");
        let result = session_settings(&settings(key_file.path.clone(), false), BuildMode::Release);
        assert!(matches!(
            result,
            Err(SessionConfigError::KeyTooShort { length, .. }) if length == SESSION_KEY_MIN_LEN - 1
        ));
    }

    #[rstest]
    fn release_rejects_missing_key_without_ephemeral_allowance() {
        let result = session_settings(&settings(missing_path(), false), BuildMode::Release);
        assert!(matches!(result, Err(SessionConfigError::KeyRead { .. })));
    }

    #[rstest]
    #[case(BuildMode::Debug, false)]
    #[case(BuildMode::Release, true)]
    fn missing_key_falls_back_when_permitted(#[case] mode: BuildMode, #[case] allow: bool) {
        assert!(session_settings(&settings(missing_path(), allow), mode).is_ok());
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(true), true)]
    #[case(Some(false), false)]
    fn secure_flag_defaults_on(#[case] configured: Option<bool>, #[case] expected: bool) {
        let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
        let mut app_settings = settings(key_file.path.clone(), false);
        app_settings.cookie_secure = configured;

        let resolved = session_settings(&app_settings, BuildMode::Release).expect("settings");
        assert_eq!(resolved.cookie_secure, expected);
    }

    #[rstest]
    fn debug_accepts_keys_between_derivation_minimum_and_release_minimum() {
        let key_file = TempKeyFile::new(32).expect("key file");
        assert!(session_settings(&settings(key_file.path.clone(), false), BuildMode::Debug).is_ok());
    }
}
