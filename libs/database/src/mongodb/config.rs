#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required_any};

/// Placeholder replaced by the contents of `MONGODB_PASSWORD_FILE`.
pub const PASSWORD_PLACEHOLDER: &str = "<password>";

const DEFAULT_DATABASE: &str = "youwont";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// MongoDB connection settings
///
/// Constructed manually or loaded from environment variables (with the `config`
/// feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "youwont");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string, `mongodb://` or `mongodb+srv://`
    pub url: String,

    /// Database holding the application collections
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Pool ceiling; `None` keeps the driver default
    pub max_pool_size: Option<u32>,

    /// Upper bound for connecting and pinging at startup, in seconds
    pub connect_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, DEFAULT_DATABASE)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Substitute `<password>` in the connection string.
    pub fn with_password(mut self, password: &str) -> Self {
        self.url = self.url.replace(PASSWORD_PLACEHOLDER, password);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connection string with any credentials masked, for logging.
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://").map(|i| i + 3) else {
            return self.url.clone();
        };
        let authority_end = self.url[scheme_end..]
            .find('/')
            .map_or(self.url.len(), |i| scheme_end + i);

        match self.url[scheme_end..authority_end].rfind('@') {
            Some(at) => format!(
                "{}***{}",
                &self.url[..scheme_end],
                &self.url[scheme_end + at..]
            ),
            None => self.url.clone(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URI` or `MONGO_URI` (required) - connection string
/// - `MONGODB_PASSWORD_FILE` (optional) - file whose trimmed contents replace
///   `<password>` in the connection string
/// - `MONGODB_DATABASE` (optional, default: `youwont`)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: driver default)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required_any(&["MONGODB_URI", "MONGO_URI"])?;
        let database = env_or_default("MONGODB_DATABASE", DEFAULT_DATABASE);

        let mut config = Self::with_database(url, database);
        config.app_name = std::env::var("MONGODB_APP_NAME").ok();
        config.max_pool_size = env_parse("MONGODB_MAX_POOL_SIZE")?;
        if let Some(secs) = env_parse("MONGODB_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout_secs = secs;
        }

        if let Ok(path) = std::env::var("MONGODB_PASSWORD_FILE") {
            let password = core_config::read_secret_file(path)?;
            config = config.with_password(&password);
        }

        Ok(config)
    }
}
