pub mod config {
    use goals_core::service::DEFAULT_PLACEHOLDER_TITLE;
    use serde::Deserialize;
    use std::path::PathBuf;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        #[serde(default = "default_data_path")]
        pub data_path: PathBuf,
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default = "default_serialize_writes")]
        pub serialize_writes: bool,
        #[serde(default = "default_placeholder_title")]
        pub placeholder_title: String,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::Environment::default())
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                data_path: default_data_path(),
                port: default_port(),
                serialize_writes: default_serialize_writes(),
                placeholder_title: default_placeholder_title(),
            }
        }
    }

    fn default_data_path() -> PathBuf {
        PathBuf::from("data/db.json")
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_serialize_writes() -> bool {
        true
    }

    fn default_placeholder_title() -> String {
        DEFAULT_PLACEHOLDER_TITLE.to_string()
    }

}
pub mod goal;
pub mod statistics;
pub mod web;
