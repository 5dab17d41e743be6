use tracing::{debug, info};

use super::notice::{ConsoleSink, Notice, NoticeSink};
use super::state::PackageState;

/// The result of one call to [`DeliveryContext::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// State whose handler ran.
    pub from: PackageState,
    /// State installed after the handler returned.
    pub to: PackageState,
    /// Notice the handler emitted.
    pub notice: Notice,
}

impl Step {
    /// False when the step re-ran the terminal handler without moving.
    pub fn advanced(&self) -> bool {
        self.from != self.to
    }
}

/// Holds the current state of one package and drives it through the
/// transition table, one step at a time.
///
/// The current state is only ever changed by [`step`](Self::step), which
/// takes `&mut self`; callers sharing a context across threads must wrap it
/// in their own lock.
#[derive(Debug)]
pub struct DeliveryContext<S: NoticeSink = ConsoleSink> {
    current_state: PackageState,
    subject_id: String,
    history: Vec<PackageState>,
    sink: S,
}

impl DeliveryContext<ConsoleSink> {
    /// Create a context that prints its notices on stdout.
    /// Starts at `Acknowledged` when `initial` is `None`.
    pub fn new(initial: Option<PackageState>, subject_id: impl Into<String>) -> Self {
        Self::with_sink(initial, subject_id, ConsoleSink)
    }
}

impl<S: NoticeSink> DeliveryContext<S> {
    pub fn with_sink(
        initial: Option<PackageState>,
        subject_id: impl Into<String>,
        sink: S,
    ) -> Self {
        let ctx = Self {
            current_state: initial.unwrap_or_default(),
            subject_id: subject_id.into(),
            history: Vec::new(),
            sink,
        };
        debug!(subject = %ctx.subject_id, state = %ctx.current_state, "delivery context created");
        ctx
    }

    pub fn current_state(&self) -> PackageState {
        self.current_state
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// States whose handlers have run, oldest first.
    ///
    /// Repeated `Delivered` steps are recorded once, so polling a delivered
    /// package does not grow the history.
    pub fn history(&self) -> &[PackageState] {
        &self.history
    }

    pub fn is_delivered(&self) -> bool {
        self.current_state.is_terminal()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run the handler bound to the current state and install its successor.
    ///
    /// `Delivered` re-emits its notice and stays put.
    pub fn step(&mut self) -> Step {
        let from = self.current_state;
        let notice = self.handle(from);

        if !(from.is_terminal() && self.history.last() == Some(&from)) {
            self.history.push(from);
        }
        self.current_state = from.successor();

        info!(
            subject = %self.subject_id,
            from = %from,
            to = %self.current_state,
            "package state updated"
        );

        Step {
            from,
            to: self.current_state,
            notice,
        }
    }

    // Handler body shared by every state: announce, then hand back the notice.
    fn handle(&mut self, state: PackageState) -> Notice {
        let notice = Notice::new(self.subject_id.as_str(), state);
        self.sink.emit(&notice);
        notice
    }
}
