//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; user-facing progress output is
//! printed separately by the commands. Logging is off unless `RUST_LOG` is set
//! or `-v` is passed.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// `verbosity` is the number of `-v` flags: 1 = info, 2 = debug, 3+ = trace.
/// `RUST_LOG` takes precedence when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "off",
            1 => "crudgen_cli_lib=info",
            2 => "crudgen_cli_lib=debug",
            _ => "trace",
        })
    });

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    #[cfg(debug_assertions)]
    {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt.pretty())
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt.compact())
            .try_init()?;
    }

    Ok(())
}
