use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::DeliveryContext;
use super::notice::{Notice, NoticeSink};
use super::state::PackageState;

/// Structured audit record produced when a tracking run finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub tracking_id: Uuid,
    pub subject_id: String,
    pub initial_state: PackageState,
    pub final_state: PackageState,
    pub state_transitions: Vec<PackageState>,
    pub notices: Vec<String>,
    pub steps: usize,
    pub delivered: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl AuditRecord {
    /// Build an audit record from a context after a run.
    ///
    /// `initial_state` is the state the run started from and `history_start`
    /// the length of the context's history at that moment; `notices` are the
    /// notices emitted during the run, in order.
    pub fn from_context<S: NoticeSink>(
        ctx: &DeliveryContext<S>,
        initial_state: PackageState,
        history_start: usize,
        notices: &[Notice],
        started_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        let mut transitions = ctx.history().get(history_start..).unwrap_or(&[]).to_vec();
        transitions.push(ctx.current_state());

        Self {
            tracking_id: Uuid::new_v4(),
            subject_id: ctx.subject_id().to_string(),
            initial_state,
            final_state: ctx.current_state(),
            state_transitions: transitions,
            notices: notices.iter().map(|n| n.status().to_string()).collect(),
            steps: notices.len(),
            delivered: ctx.is_delivered(),
            started_at,
            completed_at: now,
            duration_ms: (now - started_at).num_milliseconds(),
        }
    }
}
