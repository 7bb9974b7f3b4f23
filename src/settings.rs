use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, Source};

use super::{ErrorKind, Result};

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub address: String,
    pub port: u16,
    /// Where the slash command endpoint is mounted, e.g. `/slack/command`.
    pub path: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            address: "127.0.0.1".to_owned(),
            port: 8000,
            path: "/".to_owned(),
        }
    }
}

impl Settings {
    /// Loads settings from the file named by the first argument, or from an
    /// optional `settings` file in the working directory, then from
    /// `SLACKBOT_*` environment variables.
    pub fn try_new() -> Result<Settings> {
        use std::env::args;
        use std::path::Path;
        let file = match args().nth(1) {
            Some(path) => File::from(Path::new(&path)),
            None => File::with_name("settings").required(false),
        };
        let config = Settings::builder()?
            .add_source(file)
            .add_source(Environment::with_prefix("SLACKBOT").try_parsing(true))
            .build()?;
        Settings::from_config(config)
    }

    /// Loads settings from `source` on top of the defaults. The environment
    /// is not consulted.
    pub fn from_source<S>(source: S) -> Result<Settings>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = Settings::builder()?.add_source(source).build()?;
        Settings::from_config(config)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Settings::default();
        Ok(Config::builder()
            .set_default("address", defaults.address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("path", defaults.path)?)
    }

    fn from_config(config: Config) -> Result<Settings> {
        config
            .try_deserialize::<Settings>()
            .map_err(|e| ErrorKind::Config(e).into())
    }
}
