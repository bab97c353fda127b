use secrecy::SecretString;
use serde::Deserialize;

/// Key material used to validate identity tokens.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    /// Accepted clock skew when checking `exp`, in seconds.
    pub leeway_seconds: u64,
}

impl JwtSettings {
    pub fn new(secret: String, leeway_seconds: u64) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            leeway_seconds,
        }
    }
}
