//! Environment variable secret loading.
//!
//! The generation credential and the shared access code are read once at
//! startup and wrapped in [`SecretString`]. Empty values are treated as unset:
//! an empty `ACCESS_CODE` leaves the service open, an empty `OPENAI_API_KEY`
//! leaves generation unconfigured.

use secrecy::SecretString;

/// Environment variable holding the generation credential.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the shared access code.
pub const ACCESS_CODE_VAR: &str = "ACCESS_CODE";

/// Secrets consumed by the service.
///
/// `SecretString` redacts itself in `Debug` output, so deriving it here does
/// not leak values.
#[derive(Debug, Default)]
pub struct ServiceSecrets {
    pub openai_api_key: Option<SecretString>,
    pub access_code: Option<SecretString>,
}

impl ServiceSecrets {
    /// Read secrets from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read secrets through an arbitrary lookup (env vars, CLI flags, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map(SecretString::from)
        };

        Self {
            openai_api_key: read(OPENAI_API_KEY_VAR),
            access_code: read(ACCESS_CODE_VAR),
        }
    }
}
