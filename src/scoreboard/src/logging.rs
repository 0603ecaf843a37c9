use anyhow::Context;
use slog::{o, Drain, Logger};

/// Routes `log` records to stderr through slog.
/// Filtering is controlled by `RUST_LOG`.
pub(crate) fn setup() -> anyhow::Result<()> {
    let drain =
        slog_term::CompactFormat::new(slog_term::TermDecorator::new().stderr().build()).build();

    let logger = slog_envlogger::new(drain);
    let logger = std::sync::Mutex::new(logger);
    let logger = Logger::root(logger.fuse(), o!()).into_erased();
    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log::Level::Trace).context("failed to install log adapter")?;
    std::mem::forget(guard);
    Ok(())
}
