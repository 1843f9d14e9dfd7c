use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_body_bytes: usize,
    pub session_ttl: Duration,
    /// The single browser origin allowed to call the API with credentials.
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            upload_dir: PathBuf::from("./uploads"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            session_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads `KINDRED_BIND`, `PORT`, `UPLOAD_DIR`, `KINDRED_MAX_BODY_BYTES`,
    /// `KINDRED_SESSION_TTL_SECS` and `CORS_ORIGIN`, falling back to defaults for unset or
    /// unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind: env::var("KINDRED_BIND").unwrap_or(defaults.bind),
            port: env_parse("PORT", defaults.port),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_body_bytes: env_parse("KINDRED_MAX_BODY_BYTES", defaults.max_body_bytes),
            session_ttl: Duration::from_secs(env_parse(
                "KINDRED_SESSION_TTL_SECS",
                defaults.session_ttl.as_secs(),
            )),
            cors_origin: env::var("CORS_ORIGIN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.cors_origin),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
