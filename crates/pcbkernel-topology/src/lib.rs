//! # pcbkernel-topology
//!
//! The net-segment simplifier: canonicalizes the junctions and lines of one
//! electrically connected segment into a redundancy-free form, independent of
//! the editing history that produced them.
//!
//! This crate only models the algorithm's own small vocabulary (anchors,
//! lines, layer intervals) — it does not depend on `pcbkernel-core`'s entity
//! types directly, so a caller maps `Junction`/`Trace`/`Via`/`Pad` into
//! [`simplifier::AnchorType`]/[`simplifier::Line`] and back.

pub mod simplifier;

pub use simplifier::{
    AnchorId, AnchorType, LayerId, Line, LineId, NetSegmentSimplifier, SimplifyResult,
};
