use std::sync::Once;

static INIT: Once = Once::new();

/// Initialise the global logger. An explicit filter wins over `RUST_LOG`, and with neither set
/// everything at info and above is logged. Only the first call has any effect.
pub fn init(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        }
        else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        }
        else {
            builder.filter_level(log::LevelFilter::Info);
        }

        // try_init so a logger installed by something else (e.g. a test harness) isn't fatal.
        if builder.try_init().is_ok() {
            log::debug!("Logging initialised");
        }
    });
}
