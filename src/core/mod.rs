pub mod checker;
pub mod message;

pub use crate::domain::model::{Availability, Price, RunSummary, TrackedItem};
pub use crate::domain::ports::{AvailabilitySource, Notifier, PriceSource};
pub use crate::utils::error::Result;
