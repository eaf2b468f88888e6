use crate::prelude::*;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub mod aggregate;
pub mod collector;
pub mod events;
pub mod executor;
pub mod pacer;
pub mod selections;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use executor::BackoffExecutor;
pub use pacer::{Pacer, PacingPolicy};
pub use transport::{HttpTransport, Transport};

/// Build the retrying executor every command talks through
///
/// Ctrl-C cancels any pending backoff wait.
pub fn connect(
    global: &crate::Global,
    pacing: &PacingPolicy,
) -> Result<BackoffExecutor<HttpTransport>> {
    let config = StartggConfig::from_env(&global.token_file)?
        .with_overrides(Some(global.endpoint.clone()));
    let transport = HttpTransport::new(&config)?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling pending requests");
            on_signal.cancel();
        }
    });

    Ok(BackoffExecutor::new(transport)
        .with_policy(global.backoff_policy())
        .with_pacer(Pacer::new(pacing.request_interval))
        .with_cancellation(cancel))
}

/// start.gg configuration from the environment or a local key file
#[derive(Debug, Clone)]
pub struct StartggConfig {
    pub endpoint: String,
    pub api_token: String,
}

impl StartggConfig {
    /// Default start.gg GraphQL endpoint
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.start.gg/gql/alpha";

    /// Load configuration
    ///
    /// Uses STARTGG_API_TOKEN if set, otherwise the first line of `token_file`.
    pub fn from_env(token_file: &Path) -> Result<Self> {
        let api_token = resolve_token(std::env::var("STARTGG_API_TOKEN").ok(), token_file)?;

        Ok(Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            api_token,
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }
}

/// Pick the API key: a non-blank environment value wins over the key file
fn resolve_token(env_token: Option<String>, token_file: &Path) -> Result<String> {
    match env_token {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => read_token_file(token_file),
    }
}

/// Read an API key from the first line of a file
pub fn read_token_file(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).map_err(|_| {
        Error::Config(format!(
            "STARTGG_API_TOKEN is not set and {} could not be read. Put your start.gg API key in it.",
            path.display()
        ))
    })?;

    contents
        .lines()
        .next()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Config(format!("{} is empty", path.display())).into())
}

/// Create an authenticated HTTP client with Bearer auth headers
pub fn create_authenticated_client(config: &StartggConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_token_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.txt");
        std::fs::write(&path, "  abc123  \nignored\n").unwrap();

        assert_eq!(read_token_file(&path).unwrap(), "abc123");
    }

    #[test]
    fn test_read_token_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = read_token_file(&dir.path().join("auth.txt")).unwrap_err();

        assert!(err.to_string().contains("Put your start.gg API key"));
    }

    #[test]
    fn test_read_token_file_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.txt");
        std::fs::write(&path, "\n").unwrap();

        assert!(read_token_file(&path).is_err());
    }

    #[test]
    fn test_environment_token_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.txt");
        std::fs::write(&path, "from-file\n").unwrap();

        let token = resolve_token(Some("  from-env \n".to_string()), &path).unwrap();
        assert_eq!(token, "from-env");
    }

    #[test]
    fn test_blank_environment_token_falls_back_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.txt");
        std::fs::write(&path, "from-file\n").unwrap();

        assert_eq!(resolve_token(Some("   ".to_string()), &path).unwrap(), "from-file");
        assert_eq!(resolve_token(Some(String::new()), &path).unwrap(), "from-file");
        assert_eq!(resolve_token(None, &path).unwrap(), "from-file");
    }

    #[test]
    fn test_blank_environment_token_without_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = resolve_token(Some(" ".to_string()), &dir.path().join("auth.txt")).unwrap_err();

        assert!(err.to_string().contains("STARTGG_API_TOKEN is not set"));
    }

    #[test]
    fn test_with_overrides() {
        let config = StartggConfig {
            endpoint: StartggConfig::DEFAULT_ENDPOINT.to_string(),
            api_token: "t".to_string(),
        };

        let config = config.with_overrides(Some("http://localhost:4000/graphql".to_string()));
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
    }
}
