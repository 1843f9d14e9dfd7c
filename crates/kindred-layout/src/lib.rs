#![forbid(unsafe_code)]

//! Generational layout for family trees.
//!
//! The pipeline is four small stages, each in its own module:
//!
//! 1. [`index`]: parent/child adjacency over the member set (spouse edges excluded).
//! 2. [`generation`]: one row per generation, breadth-first from parentless members.
//! 3. [`position`]: each row centered on `x = 0` with fixed node pitch, rows stacked by
//!    generation ([`coordinate_system`] rotates the result for other rank directions).
//! 4. [`edges`]: relationship type to visual treatment.
//!
//! [`compute_layout`] runs all of them and never fails: a layout is produced for any snapshot.

pub use kindred_core as tree;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod coordinate_system;
pub mod edges;
pub mod generation;
pub mod index;
mod layout;
pub mod model;
pub mod position;

pub use layout::{compute_layout, compute_layout_snapshot};
pub use model::{
    Bounds, EdgeCurve, EdgeDescriptor, EdgeKind, GenerationPolicy, Layout, LayoutDiagnostics,
    LayoutOptions, NodePosition, RankDir,
};
