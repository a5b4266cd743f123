//! Polling primitives: a retry policy driven by an injectable clock

mod clock;
mod policy;


pub use clock::{Clock, ManualClock, SystemClock};
pub use policy::{PollOutcome, RetryPolicy};
