//! Logging setup.

use shared::AppEnv;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber for the given profile. `RUST_LOG` wins over
/// the profile's default level.
pub fn init_tracing(env: AppEnv) {
    let default_level = match env {
        AppEnv::Local | AppEnv::Dev => "debug",
        AppEnv::Prod => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match env {
        AppEnv::Local => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init(),
        AppEnv::Dev | AppEnv::Prod => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}
