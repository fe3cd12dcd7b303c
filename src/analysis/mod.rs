//! Member statistics and selection.
//!
//! Everything in here is a pure function of the member slice it is given.

pub mod aggregator;
pub mod attention;
pub mod filter;

pub use aggregator::*;
pub use attention::*;
pub use filter::*;
