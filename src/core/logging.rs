use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::AppMode;

/// Install the global subscriber. Release mode logs JSON lines; debug mode
/// logs human-readable lines. `RUST_LOG` overrides the default filter.
pub fn init(mode: AppMode) {
    let default_filter = match mode {
        AppMode::Debug => "category_api=debug,tower_http=debug,info",
        AppMode::Release => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if mode.is_release() {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
