use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Output style for the process-wide tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Implemented by service configuration structs so the bootstrap knows how
/// to set up logging before handing the config over.
pub trait AppConfig {
    fn log_format(&self) -> LogFormat;
}

pub trait ContextProvider<Config> {
    fn new(config: Config) -> impl Future<Output = Self>;
}

/// Where configuration is read from, in increasing order of precedence after
/// the compiled-in defaults.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSource<'a> {
    pub file: &'a str,
    pub env_prefix: &'a str,
}

/// Extract a configuration struct from its defaults, an optional TOML file
/// and prefixed environment variables.
///
/// A missing file is not an error; a present but malformed one is.
///
/// # Errors
/// If any provider yields a value that does not fit `Config`.
pub fn load_config<Config>(source: ConfigSource<'_>) -> Result<Config, figment::Error>
where
    Config: Serialize + DeserializeOwned + Default,
{
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(source.file))
        .merge(Env::prefixed(source.env_prefix))
        .extract()
}

/// Install the global tracing subscriber.
///
/// The log level comes from `RUST_LOG` and falls back to `info`.
/// Calling this more than once keeps the first subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            // span fields are already flattened into each event
            .with_current_span(false)
            .with_target(false)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Initialize the application context: load the configuration, set up
/// tracing according to it, then build the context.
///
/// # Errors
/// If the configuration cannot be extracted.
pub async fn create_app_context<A, Config>(
    source: ConfigSource<'_>,
) -> Result<A, figment::Error>
where
    A: ContextProvider<Config>,
    Config: AppConfig + Serialize + DeserializeOwned + Default,
{
    let config: Config = load_config(source)?;

    init_tracing(config.log_format());

    Ok(A::new(config).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestConfig {
        port: u16,
        name: String,
        log_format: LogFormat,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                port: 3001,
                name: "range".to_string(),
                log_format: LogFormat::Pretty,
            }
        }
    }

    const SOURCE: ConfigSource<'static> = ConfigSource {
        file: "Test.toml",
        env_prefix: "TEST_",
    };

    #[test]
    fn test_defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config: TestConfig = load_config(SOURCE)?;
            assert_eq!(config, TestConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "Test.toml",
                r#"
                port = 4000
                name = "from-file"
                "#,
            )?;
            jail.set_env("TEST_PORT", "5000");
            jail.set_env("TEST_LOG_FORMAT", "json");

            let config: TestConfig = load_config(SOURCE)?;
            assert_eq!(config.port, 5000);
            assert_eq!(config.name, "from-file");
            assert_eq!(config.log_format, LogFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("TEST_PORT", "not-a-port");

            assert!(load_config::<TestConfig>(SOURCE).is_err());
            Ok(())
        });
    }
}
