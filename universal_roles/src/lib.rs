//! Counting universal roles.
//!
//! A role is universal if it occurs exactly once in nearly every genome.
//! Such roles are good phylogenetic markers. This crate folds genomes into
//! per-role counts of single ("good") and multiple ("bad") occurrences,
//! selects the roles whose good fraction reaches a threshold, and saves the
//! counts so that a later run can be compared against them.
#[allow(unused_imports)]
#[macro_use]
extern crate log;
extern crate byteorder;
extern crate indexmap;
extern crate rayon;
extern crate seed_utils;
pub mod counter;
pub mod quality_count;
pub mod report;
pub mod snapshot;
pub use counter::UniversalRoleCounter;
pub use quality_count::{Quality, QualityCountMap};
pub use snapshot::Snapshot;

/// Default minimum fraction of genomes in which a universal role must occur singly.
pub const DEFAULT_THRESHOLD: f64 = 0.90;
