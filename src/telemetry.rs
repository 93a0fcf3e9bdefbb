use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;
use crate::error::{Error, Result};

/// ログ出力を初期化する。`RUST_LOG` があれば設定値より優先する。
/// 出力先は標準エラー。
pub fn init(config: &TelemetryConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| Error::Config {
            message: format!("invalid log level/filter '{}': {source}", config.log_level),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| Error::Config {
            message: format!("telemetry error: {err}"),
        })
}
