//! Per-function timing of the search hot paths.
//!
//! Functions marked `#[cfg_attr(feature = "instrumentation", instrument(skip_all))]`
//! (node expansion, negamax, negascout, UCT simulation, puzzle solving)
//! open a tracing span on every call. The layer below accumulates call
//! counts and elapsed time per span name; `print_timing_statistics` reports
//! them once the command finishes. Build with `--features instrumentation`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use once_cell::sync::Lazy;
use thread_local::ThreadLocal;
use tracing::span;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

#[derive(Clone, Copy, Debug, Default)]
struct SpanTiming {
    calls: u64,
    nanos: u64,
}

// Search workers record into their own map; maps are merged when printing.
static THREAD_TIMINGS: Lazy<ThreadLocal<Mutex<HashMap<&'static str, SpanTiming>>>> =
    Lazy::new(ThreadLocal::new);

struct TimingLayer;

impl<S> Layer<S> for TimingLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let Some(start) = span.extensions_mut().remove::<Instant>() else {
            return;
        };

        let cell = THREAD_TIMINGS.get_or(|| Mutex::new(HashMap::new()));
        if let Ok(mut timings) = cell.lock() {
            let timing = timings.entry(span.name()).or_default();
            timing.calls += 1;
            timing.nanos += start.elapsed().as_nanos() as u64;
        }
    }
}

/// Installs the timing layer as the global subscriber.
///
/// With `RUST_LOG` unset or `off` every span is timed silently; any other
/// value also prints span events filtered by it.
pub fn init_tracing() -> Result<(), SetGlobalDefaultError> {
    use tracing_subscriber::EnvFilter;

    let env_filter = std::env::var("RUST_LOG").unwrap_or_default();
    if env_filter.is_empty() || env_filter == "off" {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("trace"))
            .with(TimingLayer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(false)
            .compact();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(TimingLayer)
            .with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    }
}

fn aggregate() -> Vec<(&'static str, SpanTiming)> {
    let mut totals: HashMap<&'static str, SpanTiming> = HashMap::new();
    for cell in THREAD_TIMINGS.iter() {
        let Ok(timings) = cell.lock() else {
            continue;
        };
        for (name, timing) in timings.iter() {
            let total = totals.entry(*name).or_default();
            total.calls += timing.calls;
            total.nanos += timing.nanos;
        }
    }

    let mut entries: Vec<_> = totals.into_iter().collect();
    entries.sort_by_key(|(_, timing)| std::cmp::Reverse(timing.nanos));
    entries
}

/// Prints call counts and time per instrumented function, slowest first.
pub fn print_timing_statistics() {
    let entries = aggregate();
    if entries.is_empty() {
        eprintln!("\ninstrumentation: no spans were recorded");
        return;
    }

    eprintln!("\n{:<32}{:>14}{:>14}{:>14}", "span", "calls", "total ms", "mean us");

    for (name, timing) in entries.iter().filter(|(_, timing)| timing.calls > 0) {
        eprintln!(
            "{:<32}{:>14}{:>14.3}{:>14.3}",
            name,
            timing.calls,
            timing.nanos as f64 / 1_000_000.0,
            timing.nanos as f64 / timing.calls as f64 / 1_000.0
        );
    }
}
