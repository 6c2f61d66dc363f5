//! CLI command implementations

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_logging, LoggingConfig};

use super::args::{Cli, StartArgs};
use super::errors::{CliError, CliResult};

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    let args = Cli::parse_args().start_args();
    start(args)
}

/// Merge defaults, the optional config file and command line overrides
pub fn resolve_config(args: &StartArgs) -> CliResult<HttpServerConfig> {
    let mut config = match &args.config {
        Some(path) => HttpServerConfig::load(path).map_err(CliError::config_error)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.no_seed {
        config.seed = false;
    }

    Ok(config)
}

/// Boot the HTTP server and block until it stops.
///
/// Failing to bind the listening address is fatal.
pub fn start(args: StartArgs) -> CliResult<()> {
    init_logging(&LoggingConfig {
        json: args.log_json,
        ..Default::default()
    });

    let config = resolve_config(&args)?;
    tracing::info!(
        addr = %config.socket_addr(),
        seed = config.seed,
        "starting bookshelf"
    );

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(HttpServer::with_config(config).start())
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use std::io::Write;

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_config(&StartArgs::default()).unwrap();
        assert_eq!(config, HttpServerConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"host": "127.0.0.1", "port": 9000}}"#).unwrap();

        let args = StartArgs {
            config: Some(file.path().to_path_buf()),
            port: Some(9001),
            no_seed: true,
            ..Default::default()
        };
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9001);
        assert!(!config.seed);
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let args = StartArgs {
            config: Some("/nonexistent/bookshelf.json".into()),
            ..Default::default()
        };
        let err = resolve_config(&args).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_bind_failure_is_fatal() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let args = StartArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(port),
            ..Default::default()
        };
        let err = start(args).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
    }
}
