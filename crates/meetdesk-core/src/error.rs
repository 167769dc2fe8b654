use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Keychain error on {key}: {source}")]
    Keyring {
        key: String,
        #[source]
        source: keyring::Error,
    },

    #[error("Could not find {0} directory")]
    MissingDirectory(&'static str),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("No route named {0:?}")]
    UnknownRoute(String),

    #[error("No route matches path {0:?}")]
    UnknownPath(String),

    #[error("Navigation to {target:?} exceeded {limit} redirects")]
    RedirectLoop { target: String, limit: usize },
}

/// Maximum length for keys echoed back in error messages
const MAX_KEY_LENGTH: usize = 64;

impl StorageError {
    fn truncate_key(key: &str) -> String {
        if key.len() <= MAX_KEY_LENGTH {
            key.to_string()
        } else {
            let truncated: String = key.chars().take(MAX_KEY_LENGTH).collect();
            format!("{}...", truncated)
        }
    }

    pub fn io(key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            key: Self::truncate_key(key),
            source,
        }
    }

    pub fn keyring(key: &str, source: keyring::Error) -> Self {
        StorageError::Keyring {
            key: Self::truncate_key(key),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_names_key() {
        let err = StorageError::io(
            "authStore",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error on authStore: denied");
    }

    #[test]
    fn test_long_keys_are_truncated() {
        let key = "k".repeat(200);
        let err = StorageError::io(&key, std::io::Error::other("boom"));
        match err {
            StorageError::Io { key, .. } => assert_eq!(key.len(), MAX_KEY_LENGTH + 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_redirect_loop_message() {
        let err = RouterError::RedirectLoop {
            target: "dashboard".to_string(),
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "Navigation to \"dashboard\" exceeded 10 redirects"
        );
    }
}
