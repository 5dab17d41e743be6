//! Terminal output for courier: progress bar and coloured lines.
//!
//! Uses `indicatif` for the delivery progress bar and `console` for styling.
//! [`DeliveryProgress`] follows a package visually while it is being stepped.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::CourierError;
use crate::state_machine::{AuditRecord, ConsoleSink, Notice, NoticeSink, PackageState};

/// Progress bar over the five delivery states of one package.
///
/// Doubles as the [`NoticeSink`] of the context being tracked: each notice is
/// forwarded to the inner sink with the bar suspended, then the bar moves to
/// the state the handler hands off to. The bar draws on stderr, so notices
/// reach stdout whether or not it is visible.
pub struct DeliveryProgress<S: NoticeSink = ConsoleSink> {
    pb: ProgressBar,
    inner: S,
    cyan: Style,
    green: Style,
}

impl DeliveryProgress<ConsoleSink> {
    /// Start the bar on stderr for `subject`, positioned at `state`.
    pub fn start(subject: &str, state: PackageState) -> Self {
        Self::with_sink(
            ProgressBar::new(PackageState::ALL.len() as u64),
            subject,
            state,
            ConsoleSink,
        )
    }
}

impl<S: NoticeSink> DeliveryProgress<S> {
    pub fn with_sink(pb: ProgressBar, subject: &str, state: PackageState, inner: S) -> Self {
        pb.set_length(PackageState::ALL.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{prefix:.bold} [{bar:25.cyan/blue}] {msg}")
                .expect("invalid template")
                .progress_chars("=> "),
        );
        pb.set_prefix(subject.to_string());
        pb.set_position(position(state));
        pb.set_message(state.to_string());

        Self {
            pb,
            inner,
            cyan: Style::new().cyan(),
            green: Style::new().green().bold(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Clear the bar and print the run summary.
    pub fn finish(&self, record: &AuditRecord) {
        self.pb.finish_and_clear();
        if record.delivered {
            println!(
                "  {} {} delivered after {} step(s)",
                self.green.apply_to("✓"),
                record.subject_id,
                record.steps
            );
        } else {
            println!(
                "  {} {} is {} after {} step(s)",
                self.cyan.apply_to("→"),
                record.subject_id,
                record.final_state,
                record.steps
            );
        }
    }
}

impl<S: NoticeSink> NoticeSink for DeliveryProgress<S> {
    fn emit(&mut self, notice: &Notice) {
        let inner = &mut self.inner;
        self.pb.suspend(|| inner.emit(notice));

        let next = notice.state.successor();
        self.pb.set_position(position(next));
        self.pb.set_message(next.to_string());
    }
}

// Delivered fills the bar; otherwise the bar counts the handlers already run.
fn position(state: PackageState) -> u64 {
    if state.is_terminal() {
        PackageState::ALL.len() as u64
    } else {
        state.ordinal() as u64
    }
}

/// Print the audit record as pretty JSON.
pub fn print_audit_json(record: &AuditRecord) -> Result<(), CourierError> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Print the transition table.
pub fn print_states() {
    let bold = Style::new().bold();
    println!(
        "{}",
        bold.apply_to(format!("{:<18} {:<18} {}", "STATE", "NEXT", "NOTICE"))
    );
    for state in PackageState::ALL {
        let next = state.successor();
        let marker = if state.is_terminal() { " (terminal)" } else { "" };
        println!(
            "{:<18} {:<18} {}{marker}",
            state.to_string(),
            next.to_string(),
            Notice::new("", state)
        );
    }
}
