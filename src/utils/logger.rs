use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How render progress is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One short line per event, for a terminal.
    #[default]
    Compact,
    /// JSON lines, for CI logs that get collected and searched.
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Filter used when `RUST_LOG` is unset. Verbose mode shows per-page and
/// per-container debug lines from this crate only.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "site_render=debug,info"
    } else {
        "site_render=info"
    }
}

fn site_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

pub fn init_logger(verbose: bool, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(site_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => registry.with(layer.with_target(false).compact()).init(),
        LogFormat::Json => registry.with(layer.with_target(true).json()).init(),
    }
}
