//! Logging subscriber initialisation.

use std::io;

use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

use crate::cli::config::{Config, LogFormat};

pub(crate) fn init(config: &Config) -> Result<(), TryInitError> {
    match config.log_format {
        LogFormat::Compact => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

/// `--log-level` already falls back to `RUST_LOG`, so the flag wins when both
/// are set.
fn build_env_filter(config: &Config) -> EnvFilter {
    EnvFilter::new(&config.log_level)
}

fn init_with_layer<L>(config: &Config, fmt_layer: L) -> Result<(), TryInitError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(config))
        .try_init()
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn filter_uses_log_level_flag() {
        let harness = Harness::parse_from(["cashbacc", "--log-level", "debug"]);

        let filter = build_env_filter(&harness.config);

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn filter_accepts_directives() {
        let harness = Harness::parse_from(["cashbacc", "--log-level", "cashbacc=trace,warn"]);

        let filter = build_env_filter(&harness.config);

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
