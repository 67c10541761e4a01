use crate::Environment;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with environment-aware configuration.
///
/// - **Production** (`APP_ENV=production`): JSON format for log aggregation,
///   default level `info`.
/// - **Development** (default): pretty-printed, default level `debug`.
///
/// `RUST_LOG` overrides the default filter. Safe to call more than once;
/// later calls are ignored (common in tests).
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("debug")
        }
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if is_production {
        builder.json().with_target(false).try_init()
    } else {
        builder.pretty().with_target(true).try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber was already initialized");
    }
}
