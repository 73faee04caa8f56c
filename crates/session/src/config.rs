//! Session configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Storage key for the bearer credential
    pub const TOKEN_KEY: &'static str = "crm_token";

    /// Storage key for the cached principal snapshot (display only)
    pub const PRINCIPAL_KEY: &'static str = "crm_user";

    /// File name of the durable store inside the data directory
    pub const STORAGE_FILE: &'static str = "session.json";
}
