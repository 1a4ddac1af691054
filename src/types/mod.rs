//! Shared data structures for field data entry and reporting
//!
//! - `records`: the four submitted record kinds (drilling, core sample,
//!   progress, maintenance)
//! - `report`: derived views (joined report rows, export fields, chart data)
//! - `preferences`: the persisted UI preference blob

mod records;
mod report;
mod preferences;

pub use records::*;
pub use report::*;
pub use preferences::*;
