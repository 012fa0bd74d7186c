use std::env;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter (e.g. `CLARA_LOG=info`)
const LOG_ENV: &str = "CLARA_LOG";

/// Install a stderr subscriber for library diagnostics.
///
/// The engine's own log stream is printed separately by `main`; tracing
/// output stays quiet unless `CLARA_LOG` asks for it.
pub fn init_logger() {
    let filter = env::var(LOG_ENV).unwrap_or_else(|_| "error".to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
