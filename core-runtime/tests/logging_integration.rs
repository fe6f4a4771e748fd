use core_runtime::logging::{self, init_logging, LogFormat, LogLevel, LoggingConfig};

// A single test owns the global subscriber: init is once-per-process, so
// splitting these assertions across #[test] fns would race.
#[test]
fn init_quiet_restore_lifecycle() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);

    init_logging(config.clone()).expect("first init should succeed");
    tracing::info!("logging initialized");

    // Second init must fail rather than silently replace the subscriber.
    assert!(init_logging(config).is_err());

    // Quiet/restore cycle must not panic and must keep the subscriber usable.
    logging::quiet();
    tracing::error!("errors still pass while quieted");
    logging::restore();
    tracing::debug!("debug passes again after restore");
}
