//! Utilities to read SEED-style annotation data: roles of interest,
//! genomes in GTO format, and directories of them.
#[allow(unused_imports)]
#[macro_use]
extern crate log;
extern crate indexmap;
extern crate rayon;
extern crate serde;
extern crate serde_json;
pub mod genome;
pub mod genome_dir;
pub mod role;
pub mod role_map;
pub use genome::{Feature, Genome};
pub use genome_dir::GenomeDirectory;
pub use role::Role;
pub use role_map::RoleMap;
