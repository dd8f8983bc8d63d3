//! Streaming repeat-donor contribution analytics
//!
//! Classifies campaign contributions from repeat donors as they stream in
//! and keeps, per (recipient, ZIP prefix, year) group, a running
//! [nearest-rank
//! percentile](https://en.wikipedia.org/wiki/Percentile#The_nearest-rank_method),
//! total, and count of their amounts, emitting one pipe-delimited summary
//! line per qualifying contribution, in input order.
//!
//! Parsing, validation, and I/O stay with the caller: the engine consumes
//! already-validated [`Donation`] values and hands back formatted lines.
//!
//! ## Example
//!
//! ```rust
//! use donation_analytics::{AggregationEngine, Donation};
//!
//! let mut engine = AggregationEngine::new(30);
//!
//! let lines = engine.run([
//!     Donation::new("C00384516", "SABOURIN, JAMES02895", "02895", 2017, 230),
//!     Donation::new("C00384516", "SABOURIN, JAMES02895", "02895", 2018, 261),
//! ]);
//!
//! // Only the second contribution comes from a repeat donor.
//! assert_eq!(lines, vec!["C00384516|02895|2018|261|261|1".to_string()]);
//! ```

mod aggregator;
mod donation;
mod engine;
mod ledger;
mod multiset;

pub use aggregator::*;
pub use donation::*;
pub use engine::*;
pub use ledger::*;
pub use multiset::*;
