//! # pcbkernel-core
//!
//! Numeric types, geometry primitives and domain entities for a PCB/schematic
//! file-format kernel. This crate has no knowledge of the on-disk S-expression
//! format (see `pcbkernel-sexpr`) or of net-segment simplification (see
//! `pcbkernel-topology`) — it only models the values and invariants those
//! layers build on.
//!
//! ## Modules
//!
//! - [`units`] - exact numeric value types (`Length`, `Angle`, `Ratio`) and
//!   their range-constrained refinements
//! - [`geometry`] - points, vertices, paths and alignment
//! - [`entities`] - connectivity and library entities (junctions, traces,
//!   pads, vias, zones, text, ...)
//! - [`list`] - a generation-checked handle-based collection for entity lists
//! - [`signal`] - the intrusive-membership observer pattern shared by every
//!   mutable entity
//! - [`error`] - the error taxonomy shared by every layer of the kernel

pub mod entities;
pub mod error;
pub mod geometry;
pub mod list;
pub mod signal;
pub mod units;

pub use entities::*;
pub use error::{KernelError, KernelResult};
pub use geometry::*;
pub use list::{Handle, TypedList};
pub use signal::{Signal, SignalHandle};
pub use units::*;
