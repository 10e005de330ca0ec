pub mod manager;
pub mod plan;
pub mod sender;

pub use manager::{Deliverer, DeliveryReport, SendOutcome};
pub use plan::{DeliveryPlan, VIDEO_LINK_PREFIX};
pub use sender::{MessageSender, OutboundItem, RecordingSender, SendError, WriterSender};
