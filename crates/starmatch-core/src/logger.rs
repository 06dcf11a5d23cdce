//! Pipeline diagnostics on stderr.
//!
//! `init_with_level` installs a `log` backend that only prints records from
//! the starmatch crates, tagged with the module that emitted them:
//!
//! ```text
//! [  0.004s DEBUG extract] extracted 41 stars from 1024x768 raster (3 clusters rejected)
//! [  0.019s  INFO matcher] matched segment 12 to 30 with 7 pairings (zoom 0.8123)
//! ```
//!
//! With the `tracing` feature, `init_tracing` installs a `tracing-subscriber`
//! formatter instead, so the `instrument` spans on the pipeline stages are
//! reported with their durations.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Crate names whose records reach the stderr logger.
const WORKSPACE_CRATES: [&str; 4] = [
    "starmatch",
    "starmatch_core",
    "star_graph",
    "starmatch_pattern",
];

fn is_workspace_target(target: &str) -> bool {
    let krate = target.split("::").next().unwrap_or(target);
    WORKSPACE_CRATES.contains(&krate)
}

/// Last path segment of a log target: `starmatch_pattern::matcher` → `matcher`.
fn stage(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

struct StageLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && is_workspace_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            stage(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the stderr logger at `level`.
///
/// Only the first call installs anything; later calls return `Ok` and keep
/// the original level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StageLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Output format of [`init_tracing`].
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human readable lines with uptime stamps.
    Text,
    /// One JSON object per event, span fields flattened.
    Json,
}

/// Install a `tracing` subscriber reporting span closings.
///
/// `RUST_LOG` overrides the default filter, which shows the starmatch crates
/// at `info` and everything else at `warn`.
#[cfg(feature = "tracing")]
pub fn init_tracing(format: TracingFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = std::iter::once("warn".to_string())
            .chain(WORKSPACE_CRATES.iter().map(|c| format!("{c}=info")))
            .collect();
        EnvFilter::new(directives.join(","))
    });
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let _ = match format {
        TracingFormat::Json => builder.json().flatten_event(true).finish().try_init(),
        TracingFormat::Text => builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_workspace_targets_are_printed() {
        assert!(is_workspace_target("star_graph::graph"));
        assert!(is_workspace_target("starmatch_pattern"));
        assert!(!is_workspace_target("starmatch_extra::x"));
        assert!(!is_workspace_target("image::codecs::png"));
        assert_eq!("matcher", stage("starmatch_pattern::matcher"));
        assert_eq!("starmatch", stage("starmatch"));
    }

    #[test]
    fn second_init_keeps_the_first_level() {
        assert!(init_with_level(LevelFilter::Warn).is_ok());
        assert!(init_with_level(LevelFilter::Trace).is_ok());
        assert_eq!(LevelFilter::Warn, log::max_level());
    }
}
