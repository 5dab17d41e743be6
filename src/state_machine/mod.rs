mod audit;
mod context;
mod notice;
mod state;

pub use audit::AuditRecord;
pub use context::{DeliveryContext, Step};
pub use notice::{ConsoleSink, Notice, NoticeSink, RecordingSink};
pub use state::PackageState;
