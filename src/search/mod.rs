//! Search support for the move selector
//!
//! Contains:
//! - Candidate generation around existing stones
//! - Open-three threat scanning

pub mod candidates;
pub mod threat;

pub use candidates::generate_candidates;
pub use threat::open_three_blocks;
