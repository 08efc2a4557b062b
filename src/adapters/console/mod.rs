//! Console reporter adapter - colored per-course output.

use std::time::Duration;

use console::{style, Term};

use crate::ports::StatusReporter;

/// `StatusReporter` writing colored lines to stdout, matching the shape the
/// tool has always printed: green checks for registered courses, red crosses
/// with a reason otherwise, and a single rewritten countdown line.
pub struct ConsoleReporter {
    term: Term,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter for ConsoleReporter {
    fn favorites_known(&self, favorites: &[String]) {
        let _ = self
            .term
            .write_line(&format!("Favorite courses: {}", favorites.join(", ")));
    }

    fn countdown_tick(&self, remaining: Duration) {
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!(
            "\rRegistration will start in {}",
            format_remaining(remaining)
        ));
    }

    fn attempt_rejected(&self, course_id: &str, reason: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {}. Reason: {}.", style("❌").red(), course_id, reason));
    }

    fn course_registered(&self, course_id: &str) {
        let _ = self.term.write_line(&format!(
            "{} {}. Successfully registered.",
            style("✅").green(),
            course_id
        ));
    }

    fn course_failed(&self, course_id: &str, reason: &str) {
        let _ = self.term.write_line(&format!(
            "{} {}. Failed to register. Reason: {}",
            style("❌").red(),
            course_id,
            reason
        ));
    }
}

/// `1d 02h 03m 04s` rendering of the time left until the window opens.
fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{}d {:02}h {:02}m {:02}s", days, hours, minutes, seconds)
}
