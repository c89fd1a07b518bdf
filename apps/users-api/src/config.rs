use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Process configuration, assembled from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URI", Some("mongodb://localhost:27017")),
                ("MONGO_URI", None),
                ("MONGODB_DATABASE", None),
                ("MONGODB_PASSWORD_FILE", None),
                ("MONGODB_CONNECT_TIMEOUT_SECS", None),
                ("HOST", None),
                ("PORT", Some("9090")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "users_api");
                assert_eq!(config.mongodb.database(), "youwont");
                assert_eq!(config.server.address(), "0.0.0.0:9090");
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_uri() {
        temp_env::with_vars_unset(["MONGODB_URI", "MONGO_URI"], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_URI"));
        });
    }
}
