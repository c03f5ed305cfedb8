use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
/// `RUST_LOG` overrides the default level; `--verbose` raises ours to debug.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bluffscore={default_level}")));

    if verbose && let Ok(parsed) = "bluffscore=debug".parse::<Directive>() {
        env_filter = env_filter.add_directive(parsed);
    }

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = Registry::default()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
