//! Encode/decode traits bridging kernel types and [`SExpr`] trees.
//!
//! Defined here rather than in `pcbkernel-core` so they can be implemented
//! for foreign types (including the generic `TypedList<T>`) without running
//! into the orphan rule, while keeping `pcbkernel-core` free of any
//! dependency on this crate.

use crate::error::{Location, SExprResult};
use crate::tree::SExpr;

/// Types that can serialize themselves into an [`SExpr`] node.
pub trait ToSExpr {
    /// Builds the node representing `self`. Implementors for "value" types
    /// (numbers, strings) return a bare atom/string; implementors for
    /// entities return a tagged list built with [`SExpr::list`].
    fn to_sexpr(&self) -> SExpr;
}

/// Types that can be reconstructed from a parsed [`SExpr`] node.
pub trait FromSExpr: Sized {
    fn from_sexpr(expr: &SExpr) -> SExprResult<Self>;
}

/// Reads the sole value out of a `(name value)` field list, then decodes it
/// with `FromSExpr`. `value` may be a bare atom/string or a nested tagged
/// list (e.g. a `Point` or an enum-with-payload) — this reads whichever was
/// written, not just bare atoms.
pub fn decode_field<T: FromSExpr>(parent: &SExpr, name: &str) -> SExprResult<T> {
    let field = require_child(parent, name)?;
    let value = field.elements().next().ok_or_else(|| {
        crate::error::SExprError::missing_child(field.location(), name, "value")
    })?;
    T::from_sexpr(value)
}

/// Like [`decode_field`] but returns `None` when the field list is absent.
pub fn decode_optional_field<T: FromSExpr>(parent: &SExpr, name: &str) -> SExprResult<Option<T>> {
    match parent.child(name) {
        Some(field) => {
            let value = field.elements().next().ok_or_else(|| {
                crate::error::SExprError::missing_child(field.location(), name, "value")
            })?;
            Ok(Some(T::from_sexpr(value)?))
        }
        None => Ok(None),
    }
}

/// Collects every child tagged `name` and decodes each of them.
pub fn decode_all<T: FromSExpr>(parent: &SExpr, name: &str) -> SExprResult<Vec<T>> {
    parent.children_tagged(name).map(T::from_sexpr).collect()
}

pub fn require_child<'a>(parent: &'a SExpr, name: &str) -> SExprResult<&'a SExpr> {
    parent
        .child(name)
        .ok_or_else(|| crate::error::SExprError::missing_child(parent.location(), tag_name(parent), name))
}

fn tag_name(expr: &SExpr) -> String {
    expr.tag().unwrap_or("<root>").to_string()
}

/// Decodes the first child of `parent` after its tag, used for entities
/// whose primary value is a single bare atom or nested list rather than a
/// named sub-field, e.g. `(layer top_copper)` or `(junction (pin ...))`.
pub fn decode_positional<T: FromSExpr>(parent: &SExpr) -> SExprResult<T> {
    let value = parent.elements().next().ok_or_else(|| {
        crate::error::SExprError::missing_child(parent.location(), tag_name(parent), "<value>")
    })?;
    T::from_sexpr(value)
}

impl ToSExpr for bool {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(if *self { "true" } else { "false" })
    }
}

impl FromSExpr for bool {
    fn from_sexpr(expr: &SExpr) -> SExprResult<Self> {
        match expr.as_atom() {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            _ => Err(crate::error::SExprError::malformed(
                expr.location(),
                format!("expected 'true' or 'false', found {expr:?}"),
            )),
        }
    }
}

impl ToSExpr for String {
    fn to_sexpr(&self) -> SExpr {
        SExpr::string(self.clone())
    }
}

impl FromSExpr for String {
    fn from_sexpr(expr: &SExpr) -> SExprResult<Self> {
        expr.as_string()
            .or_else(|| expr.as_atom())
            .map(str::to_string)
            .ok_or_else(|| crate::error::SExprError::malformed(expr.location(), format!("expected a string, found {expr:?}")))
    }
}

impl ToSExpr for u32 {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(self.to_string())
    }
}

impl FromSExpr for u32 {
    fn from_sexpr(expr: &SExpr) -> SExprResult<Self> {
        let text = expr
            .as_atom()
            .ok_or_else(|| crate::error::SExprError::malformed(expr.location(), format!("expected an integer, found {expr:?}")))?;
        text.parse().map_err(|_| crate::error::SExprError::InvalidNumber {
            location: expr.location(),
            message: format!("'{text}' is not a valid unsigned integer"),
        })
    }
}

impl ToSExpr for usize {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(self.to_string())
    }
}

impl FromSExpr for usize {
    fn from_sexpr(expr: &SExpr) -> SExprResult<Self> {
        let text = expr
            .as_atom()
            .ok_or_else(|| crate::error::SExprError::malformed(expr.location(), format!("expected an integer, found {expr:?}")))?;
        text.parse().map_err(|_| crate::error::SExprError::InvalidNumber {
            location: expr.location(),
            message: format!("'{text}' is not a valid unsigned integer"),
        })
    }
}

impl ToSExpr for uuid::Uuid {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(self.to_string())
    }
}

impl FromSExpr for uuid::Uuid {
    fn from_sexpr(expr: &SExpr) -> SExprResult<Self> {
        let text = expr
            .as_atom()
            .ok_or_else(|| crate::error::SExprError::malformed(expr.location(), format!("expected a uuid, found {expr:?}")))?;
        uuid::Uuid::parse_str(text).map_err(|e| crate::error::SExprError::InvalidValue {
            location: expr.location(),
            message: format!("invalid uuid '{text}': {e}"),
        })
    }
}

impl<T: ToSExpr> ToSExpr for Option<T> {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Some(value) => value.to_sexpr(),
            None => SExpr::atom("none"),
        }
    }
}

/// Placeholder location used when no source position is available, e.g.
/// values built programmatically rather than parsed from text.
pub fn no_location() -> Location {
    Location::default()
}
