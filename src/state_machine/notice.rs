use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::PackageState;

/// The observable effect of one step: the handler of `state` announcing
/// its status for `subject_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub subject_id: String,
    pub state: PackageState,
}

impl Notice {
    pub fn new(subject_id: impl Into<String>, state: PackageState) -> Self {
        Self {
            subject_id: subject_id.into(),
            state,
        }
    }

    pub fn status(&self) -> &'static str {
        self.state.status()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Package is {} !!", self.status())
    }
}

/// Receives the notice emitted by each state handler.
pub trait NoticeSink {
    fn emit(&mut self, notice: &Notice);
}

impl<S: NoticeSink + ?Sized> NoticeSink for &mut S {
    fn emit(&mut self, notice: &Notice) {
        (**self).emit(notice);
    }
}

/// Prints every notice on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl NoticeSink for ConsoleSink {
    fn emit(&mut self, notice: &Notice) {
        println!("{notice}");
    }
}

/// Keeps every notice in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    notices: Vec<Notice>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Status phrases of the recorded notices.
    pub fn statuses(&self) -> Vec<&'static str> {
        self.notices.iter().map(Notice::status).collect()
    }

    pub fn into_notices(self) -> Vec<Notice> {
        self.notices
    }
}

impl NoticeSink for RecordingSink {
    fn emit(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
