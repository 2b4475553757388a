/// Default store address when no URI is configured.
pub const DEFAULT_CONNECTION_URI: &str = "mongodb://localhost:27017";
/// Default logical database name.
pub const DEFAULT_DATABASE_NAME: &str = "app_database";

/// Where the store lives and which logical database handles are scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub database_name: String,
}

impl StoreConfig {
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(super::env_lookup)
    }

    /// `CONNECTION_URI` wins over the legacy `MONGODB_URI` key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = lookup("CONNECTION_URI")
            .or_else(|| lookup("MONGODB_URI"))
            .unwrap_or_else(|| DEFAULT_CONNECTION_URI.to_string());
        let database_name =
            lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        Self { uri, database_name }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_URI, DEFAULT_DATABASE_NAME)
    }
}
