//! Colorful console output for hill-climbing runs.
//!
//! Provides a custom `tracing` layer that formats search events with colors,
//! and a plain renderer for problem [`Report`]s.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (problem/search/multi-start start and end)
//! - **DEBUG**: Improvements of the incumbent
//! - **TRACE**: Every iteration and every evaluated candidate

use climber_problems::Report;
use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crates whose events the console layer renders.
const TARGETS: [&str; 2] = ["climber_solver", "climber_problems"];

/// Initializes console output at INFO.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initializes console output, showing events up to `level` unless
/// `RUST_LOG` says otherwise.
pub fn init_with_level(level: Level) {
    INIT.get_or_init(|| {
        print_banner();

        let level = level.as_str().to_ascii_lowercase();
        let mut builder = EnvFilter::builder();
        if let Ok(directive) = format!("{}={}", TARGETS[0], level).parse::<Directive>() {
            builder = builder.with_default_directive(directive);
        }
        let mut filter = builder.from_env_lossy();
        if let Ok(directive) = format!("{}={}", TARGETS[1], level).parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} {}",
        "climber".bright_cyan().bold(),
        format!("v{} - hill-climbing local search", VERSION).bright_white()
    );
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !TARGETS.iter().any(|prefix| target.starts_with(prefix)) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    problem: Option<String>,
    objective: Option<String>,
    acceptance: Option<String>,
    termination: Option<String>,
    score: Option<String>,
    solution: Option<String>,
    params: Option<String>,
    seed: Option<u64>,
    run: Option<u64>,
    iteration: Option<u64>,
    iterations: Option<u64>,
    max_iterations: Option<u64>,
    evaluations: Option<u64>,
    improvements: Option<u64>,
    restarts: Option<u64>,
    best_run: Option<u64>,
    improved: Option<bool>,
    accepted: Option<bool>,
    parallel: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "problem" => self.problem = Some(s),
            "objective" => self.objective = Some(s),
            "acceptance" => self.acceptance = Some(s),
            "termination" => self.termination = Some(s),
            "score" => self.score = Some(s),
            "solution" => self.solution = Some(s),
            "params" => self.params = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "seed" => self.seed = Some(value),
            "run" => self.run = Some(value),
            "iteration" => self.iteration = Some(value),
            "iterations" => self.iterations = Some(value),
            "max_iterations" => self.max_iterations = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "improvements" => self.improvements = Some(value),
            "restarts" => self.restarts = Some(value),
            "best_run" => self.best_run = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "improved" => self.improved = Some(value),
            "accepted" => self.accepted = Some(value),
            "parallel" => self.parallel = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "problem" => self.problem = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "problem_start" => format_problem_start(v),
        "search_start" => format_search_start(v),
        "search_end" => format_search_end(v),
        "improvement" => format_improvement(v),
        "iteration" | "candidate" => format_iteration(v, level),
        "multistart_end" => format_multistart_end(v),
        "tuning_end" => format_tuning_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_problem_start(v: &EventVisitor) -> String {
    let problem = v.problem.as_deref().unwrap_or("unknown");
    let mode = if v.parallel.unwrap_or(false) {
        "parallel"
    } else {
        "sequential"
    };

    format!(
        "{} {} Problem {} │ seed {} │ {} restarts ({})",
        format_elapsed(),
        "◆".bright_magenta().bold(),
        problem.white().bold(),
        v.seed.unwrap_or(0).bright_yellow(),
        count(v.restarts).bright_yellow(),
        mode
    )
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let objective = v.objective.as_deref().unwrap_or("Unknown");
    let score = v.score.as_deref().unwrap_or("N/A");

    let mut output = format!(
        "{} {} Climbing │ {} │ {} iterations max │ start {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        objective.white().bold(),
        count(v.max_iterations).bright_yellow(),
        format_score(score)
    );

    if let Some(ref acceptance) = v.acceptance {
        output.push_str(&format!(" │ {}", acceptance.bright_black()));
    }

    output
}

fn format_search_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let termination = v.termination.as_deref().unwrap_or("Unknown");

    let status = if termination == "IterationLimit" {
        "LIMIT".yellow().bold().to_string()
    } else {
        "CONVERGED".bright_green().bold().to_string()
    };

    format!(
        "{} {} Search ended │ {} │ {} iterations │ {} evaluations │ {} improvements │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        termination.white(),
        count(v.iterations).white(),
        count(v.evaluations).bright_magenta(),
        count(v.improvements).bright_magenta(),
        format_score(score),
        status
    )
}

fn format_improvement(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Run {:>3} │ iteration {:>8} │ {}",
        format_elapsed(),
        "↑".bright_green(),
        v.run.unwrap_or(0),
        count(v.iteration).white(),
        format_score(score)
    )
}

fn format_iteration(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let score = v.score.as_deref().unwrap_or("N/A");
    let kept = v.improved.or(v.accepted).unwrap_or(false);

    let icon = if kept {
        "✓".bright_green().to_string()
    } else {
        "✗".bright_red().to_string()
    };

    format!(
        "{} {} Iteration {:>8} │ {}",
        format_elapsed(),
        icon,
        count(v.iteration).bright_black(),
        format_score(score).bright_black()
    )
}

fn format_multistart_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Restarts complete │ {} runs │ best run {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.restarts).white(),
        v.best_run.unwrap_or(0).bright_yellow(),
        format_score(score)
    )
}

fn format_tuning_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let params = v.params.as_deref().unwrap_or("[]");

    format!(
        "{} {} Tuned {} │ {}",
        format_elapsed(),
        "★".bright_yellow(),
        params.white().bold(),
        format_score(score)
    )
}

fn format_score(score: &str) -> String {
    if score == "infeasible" {
        return score.bright_red().bold().to_string();
    }
    if score.parse::<f64>().is_ok() {
        return score.bright_green().to_string();
    }
    score.white().to_string()
}

/// Renders a report as aligned plain text: title, summary lines, then the
/// table if it has one.
pub fn render_report(report: &Report) -> String {
    let mut output = String::new();
    output.push_str(&report.title);
    output.push('\n');
    output.push_str(&"=".repeat(report.title.chars().count()));
    output.push('\n');

    let key_width = report
        .summary
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);
    for (key, value) in &report.summary {
        output.push_str(&format!("{:<width$}  {}\n", key, value, width = key_width + 1));
    }

    if report.has_table() {
        let mut widths: Vec<usize> = report.headers.iter().map(|h| h.chars().count()).collect();
        for row in &report.rows {
            for (column, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(column) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        output.push('\n');
        push_row(&mut output, &report.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        push_row(&mut output, &rule, &widths);
        for row in &report.rows {
            push_row(&mut output, row, &widths);
        }
    }

    output
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(column, &width)| {
            let cell = cells.get(column).map(String::as_str).unwrap_or("");
            format!("{:<width$}", cell, width = width)
        })
        .collect();
    output.push_str(line.join("  ").trim_end());
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_unknown_event_is_silent() {
        assert!(format_event(&visitor("warmup"), Level::INFO).is_empty());
    }

    #[test]
    fn test_search_end_shows_counts() {
        let v = EventVisitor {
            iterations: Some(1200),
            evaluations: Some(1200),
            improvements: Some(7),
            termination: Some("LocalOptimum".to_string()),
            score: Some("42.5".to_string()),
            ..visitor("search_end")
        };
        let output = format_event(&v, Level::INFO);
        assert!(output.contains("1,200"));
        assert!(output.contains("LocalOptimum"));
        assert!(output.contains("42.5"));
        assert!(output.contains("CONVERGED"));
    }

    #[test]
    fn test_iterations_only_at_trace() {
        let v = EventVisitor {
            iteration: Some(3),
            improved: Some(true),
            ..visitor("iteration")
        };
        assert!(format_event(&v, Level::DEBUG).is_empty());
        assert!(format_event(&v, Level::TRACE).contains("Iteration"));
    }

    #[test]
    fn test_infeasible_score_is_highlighted() {
        let output = format_score("infeasible");
        assert!(output.contains("infeasible"));
        assert_ne!(output, "infeasible");
    }

    #[test]
    fn test_render_report_aligns_table() {
        let report = Report::new("Lab route")
            .with_summary("distance", "12.00")
            .with_summary("stops", 2)
            .with_table(
                ["Stop", "Lab"],
                vec![
                    vec!["1".to_string(), "Chemistry".to_string()],
                    vec!["2".to_string(), "Physics".to_string()],
                ],
            );

        let text = render_report(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Lab route");
        assert_eq!(lines[1], "=========");
        assert_eq!(lines[2], "distance   12.00");
        assert_eq!(lines[3], "stops      2");
        assert_eq!(lines[5], "Stop  Lab");
        assert_eq!(lines[6], "----  ---------");
        assert_eq!(lines[7], "1     Chemistry");
        assert_eq!(lines[8], "2     Physics");
    }

    #[test]
    fn test_render_report_without_table() {
        let report = Report::new("Tuning").with_summary("alpha", "0.5");
        assert_eq!(render_report(&report), "Tuning\n======\nalpha   0.5\n");
    }
}
