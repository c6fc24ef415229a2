use env_logger::{Builder, Env};

/// Install the logger. Defaults to warnings only,
/// `RUST_LOG` overrides the filter.
pub fn setup_logger() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
