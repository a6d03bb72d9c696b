use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_things::mongodb::THINGS_COLLECTION;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding things (`THINGS_COLLECTION`)
    pub collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?.with_app_name(app_info!().name);
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            collection: env_or_default("THINGS_COLLECTION", THINGS_COLLECTION),
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
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("shop")),
                ("THINGS_COLLECTION", None),
                ("PORT", Some("9090")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "shop");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("things_api"));
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.collection, "things");
                assert_eq!(config.app.name, "things_api");
            },
        );
    }

    #[test]
    fn test_config_collection_override() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("shop")),
                ("THINGS_COLLECTION", Some("stuff")),
            ],
            || {
                assert_eq!(Config::from_env().unwrap().collection, "stuff");
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", Some("shop")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
