use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fastrace::collector::Config as FastraceConfig;
use fastrace::collector::{Reporter, SpanRecord};
use fastrace::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    pub name: String,
    pub duration_ns: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionStats {
    pub name: String,
    pub calls: u32,
    pub total_us: u64,
    pub max_us: u64,
}

pub struct CollectingReporter {
    spans: Arc<Mutex<Vec<RawSpan>>>,
}

impl CollectingReporter {
    pub fn new() -> (Self, SpanCollector) {
        let spans = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                spans: spans.clone(),
            },
            SpanCollector { spans },
        )
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, spans: Vec<SpanRecord>) {
        if let Ok(mut collected) = self.spans.lock() {
            collected.extend(spans.into_iter().map(|s| RawSpan {
                name: simplify_name(&s.name),
                duration_ns: s.duration_ns,
            }));
        }
    }
}

pub struct SpanCollector {
    spans: Arc<Mutex<Vec<RawSpan>>>,
}

impl SpanCollector {
    pub fn collect_and_aggregate(&self) -> Vec<FunctionStats> {
        let spans = match self.spans.lock() {
            Ok(mut spans) => std::mem::take(&mut *spans),
            Err(_) => return Vec::new(),
        };
        compute_function_stats(&spans)
    }
}

/// Runs `f` under a root span named `name` and returns its result together
/// with per-function timings of every traced call made inside it.
pub fn run_profiled<T>(name: &'static str, f: impl FnOnce() -> T) -> (T, Vec<FunctionStats>) {
    let (reporter, collector) = CollectingReporter::new();
    fastrace::set_reporter(reporter, FastraceConfig::default());

    let result = {
        let root = Span::root(name, SpanContext::random());
        let _guard = root.set_local_parent();
        f()
    };

    fastrace::flush();
    (result, collector.collect_and_aggregate())
}

fn simplify_name(name: &str) -> String {
    match name.rfind("::") {
        Some(pos) => name[pos + 2..].to_string(),
        None => name.to_string(),
    }
}

pub fn compute_function_stats(spans: &[RawSpan]) -> Vec<FunctionStats> {
    let mut by_name: HashMap<&str, Vec<u64>> = HashMap::new();
    for span in spans {
        by_name
            .entry(span.name.as_str())
            .or_default()
            .push(span.duration_ns / 1000);
    }

    let mut stats: Vec<FunctionStats> = by_name
        .into_iter()
        .map(|(name, durations)| FunctionStats {
            name: name.to_string(),
            calls: durations.len() as u32,
            total_us: durations.iter().sum(),
            max_us: durations.iter().copied().max().unwrap_or(0),
        })
        .collect();

    stats.sort_by(|a, b| b.total_us.cmp(&a.total_us).then_with(|| a.name.cmp(&b.name)));
    stats
}

pub fn format_profiling(stats: &[FunctionStats]) -> String {
    stats
        .iter()
        .map(|s| {
            format!(
                "[profile] {:>8.2}ms  {} ({} call{}, max {:.2}ms)",
                s.total_us as f64 / 1000.0,
                s.name,
                s.calls,
                if s.calls == 1 { "" } else { "s" },
                s.max_us as f64 / 1000.0
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
