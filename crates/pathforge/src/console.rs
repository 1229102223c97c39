//! Colorful console output for optimizer events.
//!
//! Provides a custom `tracing` layer that formats the events of the search
//! with colors. Initialized by [`plan`](crate::plan) when the `console`
//! feature is enabled.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "pathforge_solver=info";

/// Initializes the optimizer console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default filter; an already installed global subscriber
/// is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(OptimizerConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats optimizer events with colors.
pub struct OptimizerConsoleLayer;

impl<S: Subscriber> Layer<S> for OptimizerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("pathforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_optimizer_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    dataset: Option<String>,
    cluster: Option<String>,
    status: Option<String>,
    model: Option<String>,
    score: Option<String>,
    candidate_count: Option<u64>,
    cluster_count: Option<u64>,
    max_depth: Option<u64>,
    path_length: Option<u64>,
    constraints: Option<u64>,
    duration_ms: Option<u64>,
    found: Option<bool>,
}

impl EventVisitor {
    fn record_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "dataset" => self.dataset = Some(value),
            "cluster" => self.cluster = Some(value),
            "status" => self.status = Some(value),
            "model" => self.model = Some(value),
            "score" => self.score = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_text(field, s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "candidate_count" => self.candidate_count = Some(value),
            "cluster_count" => self.cluster_count = Some(value),
            "max_depth" => self.max_depth = Some(value),
            "path_length" => self.path_length = Some(value),
            "constraints" => self.constraints = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "found" {
            self.found = Some(value);
        }
    }
}

fn format_optimizer_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "attempt_start" => format_attempt_start(v),
        "attempt_end" => format_attempt_end(v),
        "solve_end" => format_solve_end(v),
        "no_feasible_path" => format_no_feasible_path(v),
        "workload_cluster_unknown" => format_warning(
            &format!(
                "workload cluster ({}) is not a candidate cluster; using the first one",
                v.cluster.as_deref().unwrap_or("?")
            ),
        ),
        "solver_status" => format_warning(
            &format!(
                "solver reported {} at path length {}",
                v.status.as_deref().unwrap_or("?"),
                v.path_length.unwrap_or(0)
            ),
        ),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Planning data set {}: candidates ({}), clusters ({}), max path length ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Optimizer]".bright_cyan(),
        v.dataset.as_deref().unwrap_or("?").white().bold(),
        v.candidate_count.unwrap_or(0).bright_yellow(),
        v.cluster_count.unwrap_or(0).bright_yellow(),
        v.max_depth.unwrap_or(0).bright_yellow()
    )
}

fn format_attempt_start(v: &EventVisitor) -> String {
    format!(
        "    {} Length {:>2} | {} constraints | {}",
        "->".bright_blue(),
        v.path_length.unwrap_or(0).white(),
        v.constraints.unwrap_or(0).yellow(),
        v.model.as_deref().unwrap_or("").bright_black()
    )
}

fn format_attempt_end(v: &EventVisitor) -> String {
    let verdict = if v.found.unwrap_or(false) {
        "path found".bright_green().to_string()
    } else {
        "no path".yellow().to_string()
    };
    format!(
        "    {} Length {:>2} | {}",
        "<-".bright_blue(),
        v.path_length.unwrap_or(0).white(),
        verdict
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().map(clean_score).unwrap_or("-");
    let path_length = v.path_length.unwrap_or(0);

    let mut output = format!(
        "{} {} {} Planning ended: path length ({}), score ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Optimizer]".bright_cyan(),
        path_length.bright_yellow(),
        score.bright_magenta(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    let status_text = "DATA PATH FOUND";
    let status_padding = 58 - status_text.len() - 4;
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        format!("  {}  ", status_text).bright_green().bold().to_string(),
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Path length:",
        path_length,
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Score:",
        score,
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_no_feasible_path(v: &EventVisitor) -> String {
    format!(
        "{} {} {} No feasible data path for {} up to length {}",
        timestamp().bright_black(),
        "ERROR".bright_red(),
        "[Optimizer]".bright_cyan(),
        v.dataset.as_deref().unwrap_or("?").white().bold(),
        v.max_depth.unwrap_or(0).bright_red()
    )
}

fn format_warning(message: &str) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".yellow(),
        "[Optimizer]".bright_cyan(),
        message
    )
}

/// `Some(250)` as recorded from an optional score becomes `250`.
fn clean_score(raw: &str) -> &str {
    match raw {
        "None" => "-",
        _ => raw
            .strip_prefix("Some(")
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(raw),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
