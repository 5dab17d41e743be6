//! Drives a [`DeliveryContext`] through a run and produces an [`AuditRecord`].

use chrono::Utc;
use tracing::{debug, info};

use crate::state_machine::{AuditRecord, DeliveryContext, NoticeSink, PackageState, Step};

/// When a tracking run stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLength {
    /// Exactly this many calls to `step()`.
    Steps(usize),
    /// Until the `Delivered` handler has announced delivery once.
    UntilDelivered,
}

/// Steps a delivery context according to a [`RunLength`].
#[derive(Debug, Clone, Copy)]
pub struct DeliveryTracker {
    length: RunLength,
}

impl DeliveryTracker {
    pub fn steps(count: usize) -> Self {
        Self {
            length: RunLength::Steps(count),
        }
    }

    pub fn until_delivered() -> Self {
        Self {
            length: RunLength::UntilDelivered,
        }
    }

    /// Number of steps this tracker will perform starting from `state`.
    pub fn planned_steps(&self, state: PackageState) -> usize {
        match self.length {
            RunLength::Steps(count) => count,
            RunLength::UntilDelivered => {
                PackageState::Delivered.ordinal() - state.ordinal() + 1
            }
        }
    }

    pub fn run<S: NoticeSink>(&self, ctx: &mut DeliveryContext<S>) -> AuditRecord {
        self.run_with(ctx, |_| {})
    }

    /// Run the context, calling `on_step` after every step.
    pub fn run_with<S, F>(&self, ctx: &mut DeliveryContext<S>, mut on_step: F) -> AuditRecord
    where
        S: NoticeSink,
        F: FnMut(&Step),
    {
        let started_at = Utc::now();
        let initial_state = ctx.current_state();
        let history_start = ctx.history().len();
        let planned = self.planned_steps(initial_state);
        debug!(subject = %ctx.subject_id(), %initial_state, planned, "tracking run started");

        let mut notices = Vec::with_capacity(notice_capacity(planned));
        for _ in 0..planned {
            let step = ctx.step();
            on_step(&step);
            notices.push(step.notice);
        }

        let record = AuditRecord::from_context(ctx, initial_state, history_start, &notices, started_at);
        info!(
            subject = %record.subject_id,
            final_state = %record.final_state,
            steps = notices.len(),
            delivered = record.delivered,
            "tracking run finished"
        );
        record
    }
}

// `planned` comes straight from the command line or config file; only
// reserve what one walk through the table needs.
fn notice_capacity(planned: usize) -> usize {
    planned.min(PackageState::ALL.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::RecordingSink;

    fn recording(initial: Option<PackageState>) -> DeliveryContext<RecordingSink> {
        DeliveryContext::with_sink(initial, "Test Package", RecordingSink::new())
    }

    #[test]
    fn five_steps_from_default_announce_every_status() {
        let mut ctx = recording(None);
        let record = DeliveryTracker::steps(5).run(&mut ctx);

        assert_eq!(
            record.notices,
            vec![
                "acknowledged",
                "shipped",
                "in transit",
                "out for delivery",
                "delivered"
            ]
        );
        assert_eq!(record.final_state, PackageState::Delivered);
        assert!(record.delivered);
        assert_eq!(ctx.sink().notices().len(), 5);
    }

    #[test]
    fn zero_steps_leaves_context_untouched() {
        let mut ctx = recording(Some(PackageState::Shipped));
        let record = DeliveryTracker::steps(0).run(&mut ctx);

        assert_eq!(record.steps, 0);
        assert!(record.notices.is_empty());
        assert_eq!(ctx.current_state(), PackageState::Shipped);
    }

    #[test]
    fn until_delivered_stops_after_delivered_handler() {
        for state in PackageState::ALL {
            let mut ctx = recording(Some(state));
            let record = DeliveryTracker::until_delivered().run(&mut ctx);

            assert_eq!(record.initial_state, state);
            assert_eq!(record.notices.last().map(String::as_str), Some("delivered"));
            assert_eq!(record.notices.len(), 5 - state.ordinal());
            assert!(ctx.is_delivered());
        }
    }

    #[test]
    fn run_reports_only_notices_from_this_run() {
        let mut ctx = recording(None);
        ctx.step();

        let record = DeliveryTracker::steps(2).run(&mut ctx);
        assert_eq!(record.initial_state, PackageState::Shipped);
        assert_eq!(record.notices, vec!["shipped", "in transit"]);
        assert_eq!(
            record.state_transitions,
            vec![
                PackageState::Shipped,
                PackageState::InTransition,
                PackageState::OutForDelivery
            ]
        );
        assert_eq!(record.state_transitions[0], record.initial_state);
        assert_eq!(record.state_transitions.len(), record.steps + 1);
    }

    #[test]
    fn long_runs_do_not_preallocate_per_step() {
        let mut ctx = recording(None);
        let record = DeliveryTracker::steps(50_000).run(&mut ctx);

        assert_eq!(record.steps, 50_000);
        assert_eq!(record.final_state, PackageState::Delivered);
        assert_eq!(
            record.state_transitions,
            vec![
                PackageState::Acknowledged,
                PackageState::Shipped,
                PackageState::InTransition,
                PackageState::OutForDelivery,
                PackageState::Delivered,
                PackageState::Delivered
            ]
        );
    }

    #[test]
    fn huge_step_count_reserves_a_bounded_buffer() {
        let tracker = DeliveryTracker::steps(usize::MAX);
        assert_eq!(tracker.planned_steps(PackageState::Shipped), usize::MAX);
        assert_eq!(notice_capacity(usize::MAX), PackageState::ALL.len());
        assert_eq!(notice_capacity(2), 2);

        let notices: Vec<u8> = Vec::with_capacity(notice_capacity(usize::MAX));
        assert!(notices.capacity() >= PackageState::ALL.len());
    }

    #[test]
    fn on_step_sees_every_step() {
        let mut ctx = recording(Some(PackageState::OutForDelivery));
        let mut seen = Vec::new();
        DeliveryTracker::steps(3).run_with(&mut ctx, |step| seen.push((step.from, step.to)));

        assert_eq!(
            seen,
            vec![
                (PackageState::OutForDelivery, PackageState::Delivered),
                (PackageState::Delivered, PackageState::Delivered),
                (PackageState::Delivered, PackageState::Delivered),
            ]
        );
    }
}
