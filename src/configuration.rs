use std::time::Duration;

use serde_aux::field_attributes::deserialize_option_number_from_string;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub contact_form: ContactFormSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ContactFormSettings {
    pub base_url: String,
    pub endpoint_path: String,
    pub redirect_url: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub timeout_milliseconds: Option<u64>,
}

impl ContactFormSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine current directory: {e}")))?
        .join("configuration");

    let enviroment: Enviroment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_owned())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    config::Config::builder()
        .add_source(config::File::from(base_path.join("base")).required(true))
        .add_source(config::File::from(base_path.join(enviroment.as_str())).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .and_then(|x| x.try_deserialize())
}

#[derive(Debug)]
pub enum Enviroment {
    Local,
    Production,
}
impl Enviroment {
    pub fn as_str(&self) -> &str {
        match self {
            Enviroment::Local => "local",
            Enviroment::Production => "production",
        }
    }
}
impl TryFrom<String> for Enviroment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!("Expect local or production found {}", other)),
        }
    }
}
