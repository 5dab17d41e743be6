//! Package delivery tracking on a closed finite-state machine.
//!
//! A [`DeliveryContext`](state_machine::DeliveryContext) holds the current
//! [`PackageState`](state_machine::PackageState) of one package. Each call to
//! `step()` runs the handler of the current state, which emits a
//! [`Notice`](state_machine::Notice) and installs the next state:
//!
//! ```
//! use courier::state_machine::{DeliveryContext, PackageState, RecordingSink};
//!
//! let mut ctx = DeliveryContext::with_sink(None, "PKG-1", RecordingSink::new());
//! ctx.step();
//! ctx.step();
//! assert_eq!(ctx.current_state(), PackageState::InTransition);
//! assert_eq!(ctx.sink().statuses(), vec!["acknowledged", "shipped"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod state_machine;
pub mod tracker;
pub mod ui;

pub use error::CourierError;
