//! Codec support for [`TypedList<T>`], the L3 container every entity list
//! (junctions, traces, pads, ...) is stored in.
//!
//! A list has no s-expression shape of its own — callers wrap
//! [`save_list`]/[`load_list`] around whichever tag their containing entity
//! uses for the repeated children (e.g. a board's `junction` children, a
//! footprint's `pad` children). Order is significant and preserved: elements
//! are appended to the decoded list in the order their nodes appear.

use pcbkernel_core::list::{Identified, TypedList};

use crate::codec::{FromSExpr, ToSExpr};
use crate::error::{SExprError, SExprResult};
use crate::tree::SExpr;

/// Appends `to_sexpr()` of every element of `list`, in order, as a
/// line-broken child of `parent`.
pub fn save_list<T: ToSExpr>(parent: &mut SExpr, list: &TypedList<T>) {
    for item in list.iter() {
        parent.push_line(item.to_sexpr());
    }
}

/// Decodes every element-shaped child of `parent` tagged `tag` into a fresh
/// [`TypedList`], in document order.
pub fn load_list<T: FromSExpr>(parent: &SExpr, tag: &str) -> SExprResult<TypedList<T>> {
    let mut list = TypedList::new();
    for child in parent.children_tagged(tag) {
        list.append(T::from_sexpr(child)?);
    }
    Ok(list)
}

/// Like [`load_list`] but rejects a second element with a uuid already seen,
/// matching the file format's invariant that uuids are unique within a list.
pub fn load_list_unique<T: FromSExpr + Identified>(parent: &SExpr, tag: &str) -> SExprResult<TypedList<T>> {
    let list = load_list::<T>(parent, tag)?;
    let mut seen = std::collections::HashSet::new();
    for item in list.iter() {
        if !seen.insert(item.uuid()) {
            return Err(SExprError::DuplicateUuid {
                location: parent.location(),
                parent: parent.tag().unwrap_or("<root>").to_string(),
                uuid: item.uuid().to_string(),
            });
        }
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcbkernel_core::entities::Junction;
    use pcbkernel_core::geometry::Point;
    use uuid::Uuid;

    fn uuid(byte: u8) -> Uuid {
        Uuid::from_bytes([byte; 16])
    }

    #[test]
    fn list_round_trips_preserving_order() {
        let mut junctions: TypedList<Junction> = TypedList::new();
        junctions.append(Junction::new(uuid(3), Point::ORIGIN));
        junctions.append(Junction::new(uuid(1), Point::ORIGIN));
        junctions.append(Junction::new(uuid(2), Point::ORIGIN));

        let mut root = SExpr::list("board");
        save_list(&mut root, &junctions);

        let decoded: TypedList<Junction> = load_list(&root, "junction").unwrap();
        let order: Vec<Uuid> = decoded.iter().map(|j| j.uuid()).collect();
        assert_eq!(order, vec![uuid(3), uuid(1), uuid(2)]);
    }

    #[test]
    fn load_list_unique_rejects_duplicate_uuids() {
        let mut root = SExpr::list("board");
        let a = Junction::new(uuid(1), Point::ORIGIN);
        let b = Junction::new(uuid(1), Point::ORIGIN);
        root.push_line(a.to_sexpr());
        root.push_line(b.to_sexpr());

        let result: SExprResult<TypedList<Junction>> = load_list_unique(&root, "junction");
        assert!(result.is_err());
    }
}
