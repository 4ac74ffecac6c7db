use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

/// Transport dependencies whose frame-level chatter would drown the
/// client's own diagnostics at debug level.
const QUIET_DIRECTIVES: [&str; 2] = ["tungstenite=warn", "tokio_tungstenite=warn"];

/// Initializes the global subscriber. `RUST_LOG` wins when set;
/// otherwise the configured level applies to this crate with the
/// transport internals capped at warnings.
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(AppError::LoggingInit)
}

fn default_directives(level: &str) -> String {
    let mut directives = vec![level.to_owned()];
    directives.extend(QUIET_DIRECTIVES.iter().map(|directive| (*directive).to_owned()));
    directives.join(",")
}
