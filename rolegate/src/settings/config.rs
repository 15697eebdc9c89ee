use config::{Config, ConfigError, Environment, File};
use rolegate_core::settings::api_server::{ApiServer, SeedUser};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
pub struct Settings {
    pub debug: bool,
    pub telemetry: Option<String>,
    pub api: ApiServer,
    /// Static assets served for every path the API does not handle
    #[serde(default)]
    pub frontend_directory: Option<String>,
    #[serde(default)]
    pub seed_users: Vec<SeedUser>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debug: false,
            telemetry: None,
            api: ApiServer::default(),
            frontend_directory: None,
            seed_users: Vec::new(),
        }
    }
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("ROLEGATE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("ROLEGATE_RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("debug", false)?
            .set_default("api.bind_address", "0.0.0.0:3000")?
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Self::get_environment());

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings.normalized())
    }

    /// Special strings let environment variables switch off values that the
    /// default config file sets.
    pub fn normalized(mut self) -> Self {
        self.telemetry = check_if_optional(&self.telemetry);
        self.frontend_directory = check_if_optional(&self.frontend_directory);
        self
    }

    pub fn json_logs(&self) -> bool {
        self.telemetry
            .as_deref()
            .map(|t| t.to_lowercase().split(',').any(|s| s.trim() == "json"))
            .unwrap_or(false)
    }
}

fn check_if_optional(s: &Option<String>) -> Option<String> {
    match s {
        None => None,
        Some(s) => match s.to_lowercase().as_str() {
            "" | "no" | "false" | "0" => None,
            _ => Some(s.to_string()),
        },
    }
}
