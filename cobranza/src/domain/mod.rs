mod error;
mod recurrence_rule;
mod schedule;

pub use error::*;
pub use recurrence_rule::*;
pub use schedule::*;
