//! # pcbkernel-sexpr
//!
//! The Lisp-like S-expression format the kernel persists its data model to:
//! a tokenizer and tree (`token`, `tree`), the [`ToSExpr`]/[`FromSExpr`]
//! codec traits bridging tree nodes and kernel types (`codec`), and their
//! implementations for the numeric (`values`), geometric (`geometry`),
//! entity (`entities`) and list (`list`) types defined in `pcbkernel-core`.
//!
//! This crate owns the codec traits rather than `pcbkernel-core` so that
//! foreign-type impls (including the blanket-ish coverage of every entity
//! and of `TypedList<T>`) don't run into the orphan rule, while keeping
//! `pcbkernel-core` free of any dependency on a specific on-disk format.

pub mod codec;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod list;
pub mod token;
pub mod tree;
pub mod values;

pub use codec::{FromSExpr, ToSExpr};
pub use error::{Location, SExprError, SExprResult};
pub use list::{load_list, load_list_unique, save_list};
pub use tree::{format, parse, SExpr};
