use anyhow::Context;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use config::FileFormat;
use secrecy::Secret;
use serde::Deserialize;
use telemetry::TelemetrySettings;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub feature_flags: FeatureFlags,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub image_storage: ImageStorageSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub application_port: u16,
    pub host_name: String,
    /// Signs the session and flash message cookies. At least 64 bytes.
    pub hmac_secret: Secret<String>,
}

#[derive(Deserialize, Clone, Default)]
pub struct FeatureFlags {
    /// Store subscribers in DynamoDB instead of process memory.
    #[serde(default)]
    pub use_dynamo_db: bool,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub table_name: String,
    pub use_local: bool,
    /// Endpoint of DynamoDB Local, only used when `use_local` is set.
    pub local_endpoint: String,
}

#[derive(Deserialize, Clone, Default)]
pub struct ImageStorageSettings {
    /// Blob container holding the images. Empty means the app host serves them.
    #[serde(default)]
    pub container_url: String,
}

pub async fn get_configuration() -> Result<Settings, anyhow::Error> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)
        .context("Failed to parse APP_ENVIRONMENT")?;

    let builder = match environment {
        Environment::Local => {
            let base_path =
                std::env::current_dir().context("Failed to determine the current directory")?;
            let configuration_directory = base_path.join("configuration");
            let environment_filename = format!("{}.yaml", environment.as_str());

            config::Config::builder()
                .add_source(config::File::from(
                    configuration_directory.join("base.yaml"),
                ))
                .add_source(config::File::from(
                    configuration_directory.join(environment_filename),
                ))
        }
        Environment::Production => {
            let document = read_configuration_parameter().await?;

            config::Config::builder()
                .add_source(config::File::from_str(&document, FileFormat::Yaml))
        }
    };

    // Add in settings from environment variables (with a prefix of APP and '__' as separator)
    // E.g. `APP_FEATURE_FLAGS__USE_DYNAMO_DB=true` would set `Settings.feature_flags.use_dynamo_db`
    let settings = builder
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}

/// Production settings live in an SSM parameter holding a YAML document.
async fn read_configuration_parameter() -> Result<String, anyhow::Error> {
    let parameter_name = std::env::var("CONFIG_PARAMETER_NAME")
        .context("CONFIG_PARAMETER_NAME must be set in production")?;

    let region = RegionProviderChain::default_provider().or_else(Region::new("us-east-1"));
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;
    let ssm_client = aws_sdk_ssm::Client::new(&sdk_config);

    let output = ssm_client
        .get_parameter()
        .name(&parameter_name)
        .with_decryption(true)
        .send()
        .await
        .context(format!("Failed to read SSM parameter {}", parameter_name))?;

    output
        .parameter
        .and_then(|p| p.value)
        .with_context(|| format!("SSM parameter {} has no value", parameter_name))
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a support environment. Use either local or production",
                other
            )),
        }
    }
}
