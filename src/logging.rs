use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` directives are combined with
/// `level`, which defaults to `warn` in the binary.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Ignore a second initialisation (tests, embedding callers).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
