//! Colorful console output for solver runs.
//!
//! Provides a custom `tracing` layer that formats TourForge events with
//! colors. Call [`init`] once at program start.

use num_format::{Locale, ToFormattedString};
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

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the TourForge banner and sets up tracing. `RUST_LOG` directives
/// are honored; without them TourForge events are shown from INFO up.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        for directive in ["tourforge_core=info", "tourforge_solver=info"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TourConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _____                 _____
|_   _|__  _   _ _ __ |  ___|__  _ __ __ _  ___
  | |/ _ \| | | | '__|| |_ / _ \| '__/ _` |/ _ \
  | | (_) | |_| | |   |  _| (_) | | | (_| |  __/
  |_|\___/ \__,_|_|   |_|  \___/|_|  \__, |\___|
                                     |___/
"#;

    let version_line = format!(
        "              v{} - Traveling Salesman Solvers\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats TourForge events with colors.
pub struct TourConsoleLayer;

impl<S: Subscriber> Layer<S> for TourConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("tourforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    algorithm: Option<String>,
    start_city: Option<String>,
    path: Option<String>,
    city_count: Option<u64>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    speed: Option<u64>,
    count: Option<u64>,
    requested: Option<u64>,
    active: Option<u64>,
    distance: Option<f64>,
    remaining_secs: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        self.record_str(field, &s);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = Some(value.to_string());
        match field.name() {
            "event" => self.event = value,
            "algorithm" => self.algorithm = value,
            "start_city" => self.start_city = value,
            "path" => self.path = value,
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "city_count" => self.city_count = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "count" => self.count = Some(value),
            "requested" => self.requested = Some(value),
            "active" => self.active = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "distance" => self.distance = Some(value),
            "remaining_secs" => self.remaining_secs = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "cities_loaded" => format_cities_loaded(v),
        "random_activation" => format_random_activation(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "solve_cancelled" => format_solve_cancelled(v),
        "progress" => format_progress(v),
        _ => String::new(),
    }
}

fn format_cities_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} {} loaded ({}) cities from {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Map]".bright_cyan(),
        v.count.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.path.as_deref().unwrap_or("?").white()
    )
}

fn format_random_activation(v: &EventVisitor) -> String {
    format!(
        "{} {} {} activated ({}) random cities, active total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Map]".bright_cyan(),
        v.requested.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.active.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    let algorithm = display_name(v.algorithm.as_deref());
    format!(
        "{} {} {} {} started: city count ({}), start city ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", algorithm).bright_cyan(),
        algorithm.white().bold(),
        v.city_count.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.start_city.as_deref().unwrap_or("?").bright_yellow()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let algorithm = display_name(v.algorithm.as_deref());
    format!(
        "{} {} {} {} ended: time spent ({}), distance ({}), step total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", algorithm).bright_cyan(),
        algorithm.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format!("{:.2}", v.distance.unwrap_or(0.0)).bright_magenta().bold(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_solve_cancelled(v: &EventVisitor) -> String {
    let algorithm = display_name(v.algorithm.as_deref());
    format!(
        "{} {} {} {} cancelled after {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        format!("[{}]", algorithm).bright_cyan(),
        algorithm.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "    {} Step {:>11} | {}/sec | ~{} left",
        "->".bright_blue(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.speed.unwrap_or(0).to_formatted_string(&Locale::en).bright_magenta(),
        format_duration_ms((v.remaining_secs.unwrap_or(0.0) * 1000.0) as u64).yellow()
    )
}

fn display_name(algorithm: Option<&str>) -> &'static str {
    match algorithm {
        Some("nearest_neighbor") => "Nearest Neighbor",
        Some("brute_force") => "Brute Force",
        Some("genetic_algorithm") => "Genetic Algorithm",
        _ => "Solver",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Some("brute_force")), "Brute Force");
        assert_eq!(display_name(Some("genetic_algorithm")), "Genetic Algorithm");
        assert_eq!(display_name(None), "Solver");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("step".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
        assert!(format_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_solve_end_mentions_distance() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            algorithm: Some("nearest_neighbor".to_string()),
            distance: Some(20.0),
            steps: Some(1234),
            duration_ms: Some(5),
            ..EventVisitor::default()
        };
        let line = format_event(&visitor);
        assert!(line.contains("Nearest Neighbor"));
        assert!(line.contains("20.00"));
        assert!(line.contains("1,234"));
    }
}
