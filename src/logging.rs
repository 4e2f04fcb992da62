//! Tracing bootstrap for embedders.

use tracing_subscriber::{
    Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install a global tracing subscriber that writes formatted events to
/// stderr.
///
/// The filter comes from `RUST_LOG` when set and defaults to `info`
/// otherwise. Embedding applications that install their own subscriber can
/// skip this entirely; the library only ever emits through the `tracing`
/// macros. Calling it more than once (tests do) is harmless: later calls
/// leave the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .try_init();
}
