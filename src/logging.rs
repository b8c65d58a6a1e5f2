//! Logging Module
//!
//! tracing subscriber with a reloadable filter so the `log.logLevel` setting
//! can change verbosity while the server runs. `RUST_LOG` takes precedence
//! at startup.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::Verbosity;

/// Maps a verbosity setting onto a tracing level.
pub fn level_filter(verbosity: Verbosity) -> LevelFilter {
    match verbosity {
        Verbosity::None => LevelFilter::OFF,
        Verbosity::Error => LevelFilter::ERROR,
        Verbosity::Warning => LevelFilter::WARN,
        Verbosity::Info => LevelFilter::INFO,
        Verbosity::Debug => LevelFilter::DEBUG,
    }
}

/// Filter directives for this crate and the HTTP trace layer.
pub fn filter_directives(verbosity: Verbosity) -> String {
    let level = level_filter(verbosity).to_string().to_lowercase();
    format!("file_switcher={level},tower_http={level}")
}

// == Log Handle ==
/// Changes the active log filter after initialization.
#[derive(Clone)]
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    pub fn set_verbosity(&self, verbosity: Verbosity) -> Result<(), reload::Error> {
        self.handle
            .reload(EnvFilter::new(filter_directives(verbosity)))
    }
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(verbosity: Verbosity) -> Result<LogHandle, tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbosity)));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(LogHandle { handle })
}
