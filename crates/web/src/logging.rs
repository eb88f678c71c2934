//! Browser console logging

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_web::MakeWebConsoleWriter;

/// Route `tracing` output to the devtools console.
///
/// There is no wall clock on wasm32, so events carry no timestamp. Calling
/// this twice keeps the first subscriber.
pub fn init_logging(level: LevelFilter) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(level)
        .try_init();
}
