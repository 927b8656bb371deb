//! Diagnostics on stderr as workflow-command markers.
//!
//! Library code logs through `tracing`; the subscriber installed here turns
//! every event into a single `::<marker>::<message>` line so the CI runner
//! surfaces warnings and errors without failing the job.

use crate::workflow;
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Event formatter emitting `::debug::`, `::notice::`, `::warning::` and
/// `::error::` lines.
pub struct WorkflowFormat;

impl<S, N> FormatEvent<S, N> for WorkflowFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = workflow::Level::from_tracing(event.metadata().level());
        let mut message = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut message), event)?;
        writeln!(writer, "{}", workflow::marker(level, &message))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the debug flag.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(WorkflowFormat)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
    if let Err(e) = installed {
        let msg = format!("Failed to initialize logging: {}", e);
        eprintln!("{}", workflow::marker(workflow::Level::Warning, &msg));
        return;
    }

    tracing::debug!("Logging initialized at level: {}", level);
}
