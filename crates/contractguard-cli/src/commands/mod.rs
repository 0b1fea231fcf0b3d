//! Command implementations.

pub mod analyze;
pub mod community;
pub mod compare;
pub mod counter_proposal;

pub use self::analyze::execute_analyze;
pub use self::community::{execute_samples, execute_stats};
pub use self::compare::execute_compare;
pub use self::counter_proposal::execute_counter_proposal;
