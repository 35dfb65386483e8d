use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `level` is the default
/// directive when RUST_LOG is unset; repeat calls are harmless.
pub fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load environment variables from a `.env` file. With no explicit path,
/// the first file found in the conventional locations wins.
pub fn load_environment(env_file: Option<&Path>) {
    if let Some(path) = env_file {
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
        return;
    }

    for candidate in [".env", ".env.local", ".env.development"] {
        let path = Path::new(candidate);
        if path.exists() {
            let _ = dotenvy::from_path(path);
            break;
        }
    }
}
