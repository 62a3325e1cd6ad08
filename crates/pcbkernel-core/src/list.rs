//! L3: a uniform, handle-addressed element list.
//!
//! The reference implementation gives every list element a stable identity by
//! boxing it behind a `shared_ptr`/raw-pointer pair that the list and its
//! children both hold; per §9's redesign note that pattern is replaced here by
//! an arena-plus-index: elements live in `slots`, at a position that insertion,
//! removal and reordering never change, while a separate `order` vector of
//! [`Handle`]s records the externally visible (and serialized) ordering.
//! Reordering, inserting or removing therefore only ever shuffles handles —
//! never moves, copies or destroys an element. A `Handle` embeds a generation
//! counter so a handle to a removed (and slot-recycled) element reads back as
//! [`KernelError::NotFound`] instead of silently resolving to its successor.

use std::cmp::Ordering;
use std::marker::PhantomData;

use uuid::Uuid;

use crate::error::{KernelError, KernelResult};
use crate::signal::Signal;

/// Implemented by list elements that carry a stable UUID identity, enabling
/// the list's `uuid`-keyed queries.
pub trait Identified {
    fn uuid(&self) -> Uuid;
}

/// A stable reference to one element of a [`TypedList<T>`].
///
/// Valid only against the list that produced it; using it against a
/// different list (or after the element has been removed and its slot
/// recycled) is detected via the generation check and reported as
/// [`KernelError::NotFound`], never as a dangling dereference.
pub struct Handle<T> {
    index: usize,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("index", &self.index)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

enum Slot<T> {
    Occupied { value: T, generation: u32 },
    Vacant { next_free: Option<usize>, generation: u32 },
}

/// A structural change to a [`TypedList`], in terms of its *current* order
/// (not the arena position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    ElementAdded { index: usize },
    ElementRemoved { index: usize },
    /// Fired once per [`TypedList::edit`] call, after the closure returns.
    ElementEdited { index: usize },
}

/// A uniform, UUID-addressable container for one kind of entity.
pub struct TypedList<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    order: Vec<Handle<T>>,
    pub on_edited: Signal<ListEvent>,
}

impl<T> Default for TypedList<T> {
    fn default() -> Self {
        TypedList::new()
    }
}

impl<T> TypedList<T> {
    pub fn new() -> Self {
        TypedList {
            slots: Vec::new(),
            free_head: None,
            order: Vec::new(),
            on_edited: Signal::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn live_slot(&self, handle: Handle<T>) -> KernelResult<&T> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied { value, generation }) if *generation == handle.generation => Ok(value),
            _ => Err(KernelError::not_found("stale or unknown list handle")),
        }
    }

    /// Dereferences a handle. `NotFound` if the handle is stale (its element
    /// was already removed) or foreign to this list.
    pub fn get(&self, handle: Handle<T>) -> KernelResult<&T> {
        self.live_slot(handle)
    }

    /// The handle currently at serialized position `index`, if any.
    pub fn handle_at(&self, index: usize) -> Option<Handle<T>> {
        self.order.get(index).copied()
    }

    pub fn value(&self, index: usize) -> Option<&T> {
        self.handle_at(index).map(|h| self.get(h).expect("order only holds live handles"))
    }

    pub fn first(&self) -> Option<&T> {
        self.value(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.value(i))
    }

    /// Handles in their current serialized order.
    pub fn handles(&self) -> &[Handle<T>] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().map(move |h| self.get(*h).expect("order only holds live handles"))
    }

    fn alloc(&mut self, value: T) -> Handle<T> {
        if let Some(free) = self.free_head {
            let generation = match &self.slots[free] {
                Slot::Vacant { generation, .. } => *generation,
                Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
            };
            self.free_head = match &self.slots[free] {
                Slot::Vacant { next_free, .. } => *next_free,
                Slot::Occupied { .. } => unreachable!(),
            };
            self.slots[free] = Slot::Occupied { value, generation };
            Handle { index: free, generation, _marker: PhantomData }
        } else {
            let index = self.slots.len();
            self.slots.push(Slot::Occupied { value, generation: 0 });
            Handle { index, generation: 0, _marker: PhantomData }
        }
    }

    fn free(&mut self, handle: Handle<T>) -> T {
        let next_generation = handle.generation.wrapping_add(1);
        let old = std::mem::replace(
            &mut self.slots[handle.index],
            Slot::Vacant { next_free: self.free_head, generation: next_generation },
        );
        self.free_head = Some(handle.index);
        match old {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!("handle pointed at an already-vacant slot"),
        }
    }

    pub fn append(&mut self, value: T) -> Handle<T> {
        let handle = self.alloc(value);
        self.order.push(handle);
        self.on_edited.notify(&ListEvent::ElementAdded { index: self.order.len() - 1 });
        handle
    }

    /// Inserts at serialized position `index`. `LogicError` if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> KernelResult<Handle<T>> {
        if index > self.order.len() {
            return Err(KernelError::logic_error("insert index out of bounds"));
        }
        let handle = self.alloc(value);
        self.order.insert(index, handle);
        self.on_edited.notify(&ListEvent::ElementAdded { index });
        Ok(handle)
    }

    /// Removes and returns the element at serialized position `index`.
    pub fn take(&mut self, index: usize) -> KernelResult<T> {
        if index >= self.order.len() {
            return Err(KernelError::logic_error("take index out of bounds"));
        }
        let handle = self.order.remove(index);
        let value = self.free(handle);
        self.on_edited.notify(&ListEvent::ElementRemoved { index });
        Ok(value)
    }

    /// Removes the element referenced by `handle`, wherever it currently sits.
    pub fn remove(&mut self, handle: Handle<T>) -> KernelResult<T> {
        let index = self
            .order
            .iter()
            .position(|h| *h == handle)
            .ok_or_else(|| KernelError::not_found("handle not present in this list"))?;
        self.take(index)
    }

    /// Swaps the elements at serialized positions `i` and `j`. Unlike the
    /// reference `SerializableObjectList::swap`, which computes a clamped
    /// index via `qBound()` and then discards it, out-of-bounds indices are a
    /// real error here rather than a silent no-op.
    pub fn swap(&mut self, i: usize, j: usize) -> KernelResult<()> {
        if i >= self.order.len() || j >= self.order.len() {
            return Err(KernelError::logic_error("swap index out of bounds"));
        }
        self.order.swap(i, j);
        Ok(())
    }

    /// Removes every element, in reverse order, emitting `ElementRemoved` for each.
    pub fn clear(&mut self) {
        while !self.order.is_empty() {
            let last = self.order.len() - 1;
            let _ = self.take(last);
        }
    }

    /// Mutates the element behind `handle` and fires `ElementEdited` with its
    /// *current* serialized position. The element's own `on_edited` signal
    /// (if any) still fires independently from within `f`.
    pub fn edit(&mut self, handle: Handle<T>, f: impl FnOnce(&mut T)) -> KernelResult<()> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied { value, generation }) if *generation == handle.generation => f(value),
            _ => return Err(KernelError::not_found("stale or unknown list handle")),
        }
        let index = self
            .order
            .iter()
            .position(|h| *h == handle)
            .expect("a live handle is always present in the order vector");
        self.on_edited.notify(&ListEvent::ElementEdited { index });
        Ok(())
    }

    /// The handles in a new order, without touching this list's own order or
    /// its arena — the Rust analogue of "a new list sharing the same handles".
    pub fn sorted_handles_by(&self, mut cmp: impl FnMut(&T, &T) -> Ordering) -> Vec<Handle<T>> {
        let mut handles = self.order.clone();
        handles.sort_by(|a, b| {
            let va = self.get(*a).expect("order only holds live handles");
            let vb = self.get(*b).expect("order only holds live handles");
            cmp(va, vb)
        });
        handles
    }
}

impl<T: Identified> TypedList<T> {
    pub fn index_of_uuid(&self, uuid: Uuid) -> Option<usize> {
        self.order
            .iter()
            .position(|h| self.get(*h).map(|v| v.uuid() == uuid).unwrap_or(false))
    }

    pub fn contains_uuid(&self, uuid: Uuid) -> bool {
        self.index_of_uuid(uuid).is_some()
    }

    /// `NotFound` if no element with this UUID is present.
    pub fn get_by_uuid(&self, uuid: Uuid) -> KernelResult<&T> {
        self.index_of_uuid(uuid)
            .and_then(|i| self.value(i))
            .ok_or_else(|| KernelError::not_found(format!("no element with uuid {uuid}")))
    }

    pub fn sorted_handles_by_uuid(&self) -> Vec<Handle<T>> {
        self.sorted_handles_by(|a, b| a.uuid().cmp(&b.uuid()))
    }
}

macro_rules! impl_identified {
    ($ty:ty) => {
        impl Identified for $ty {
            fn uuid(&self) -> Uuid {
                self.uuid()
            }
        }
    };
}

impl_identified!(crate::entities::Junction);
impl_identified!(crate::entities::NetLine);
impl_identified!(crate::entities::Trace);
impl_identified!(crate::entities::Pad);
impl_identified!(crate::entities::PadHole);
impl_identified!(crate::entities::Via);
impl_identified!(crate::entities::Zone);
impl_identified!(crate::entities::StrokeText);
impl_identified!(crate::entities::Polygon);
impl_identified!(crate::entities::Image);
impl_identified!(crate::entities::SymbolPin);
impl_identified!(crate::entities::Bus);
impl_identified!(crate::entities::NetSignal);
impl_identified!(crate::entities::AssemblyVariant);
impl_identified!(crate::entities::ComponentAssemblyOption);
impl_identified!(crate::entities::PackageModel);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_and_value_round_trip() {
        let mut list: TypedList<&'static str> = TypedList::new();
        let h1 = list.append("a");
        let h2 = list.append("b");
        assert_eq!(list.len(), 2);
        assert_eq!(list.value(0), Some(&"a"));
        assert_eq!(list.get(h1).unwrap(), &"a");
        assert_eq!(list.get(h2).unwrap(), &"b");
    }

    #[test]
    fn take_frees_the_slot_and_bumps_generation() {
        let mut list: TypedList<i32> = TypedList::new();
        let h1 = list.append(1);
        list.append(2);
        list.take(0).unwrap();
        assert!(list.get(h1).is_err());
        let h3 = list.append(3);
        // Reuses the freed slot but with a new generation, so the stale h1
        // handle must not alias the new element.
        assert_eq!(h3.index, h1.index);
        assert_ne!(h3.generation, h1.generation);
        assert!(list.get(h1).is_err());
        assert_eq!(list.get(h3).unwrap(), &3);
    }

    #[test]
    fn insert_and_remove_shuffle_order_only() {
        let mut list: TypedList<i32> = TypedList::new();
        list.append(1);
        list.append(3);
        list.insert(1, 2).unwrap();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn swap_rejects_out_of_bounds_indices() {
        let mut list: TypedList<i32> = TypedList::new();
        list.append(1);
        assert!(list.swap(0, 5).is_err());
    }

    #[test]
    fn swap_reorders_without_touching_storage() {
        let mut list: TypedList<i32> = TypedList::new();
        let h1 = list.append(1);
        let h2 = list.append(2);
        list.swap(0, 1).unwrap();
        assert_eq!(list.value(0), Some(&2));
        assert_eq!(list.value(1), Some(&1));
        assert_eq!(list.get(h1).unwrap(), &1);
        assert_eq!(list.get(h2).unwrap(), &2);
    }

    #[test]
    fn clear_removes_everything_in_reverse() {
        let mut list: TypedList<i32> = TypedList::new();
        let removed = std::cell::RefCell::new(Vec::new());
        let _handle = list.on_edited.subscribe(|e| {
            if let ListEvent::ElementRemoved { index } = e {
                removed.borrow_mut().push(*index);
            }
        });
        list.append(1);
        list.append(2);
        list.append(3);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(*removed.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn edit_fires_element_edited_with_current_index() {
        let mut list: TypedList<i32> = TypedList::new();
        list.append(1);
        let h2 = list.append(2);
        let events = std::cell::RefCell::new(Vec::new());
        let _handle = list.on_edited.subscribe(|e| events.borrow_mut().push(*e));
        list.edit(h2, |v| *v += 10).unwrap();
        assert_eq!(list.value(1), Some(&12));
        assert_eq!(*events.borrow(), vec![ListEvent::ElementEdited { index: 1 }]);
    }

    #[test]
    fn sorted_handles_by_uuid_does_not_reorder_the_list_itself() {
        use crate::entities::Junction;
        let mut list: TypedList<Junction> = TypedList::new();
        let big = Uuid::from_bytes([9; 16]);
        let small = Uuid::from_bytes([1; 16]);
        list.append(Junction::new(big, crate::geometry::Point::ORIGIN));
        list.append(Junction::new(small, crate::geometry::Point::ORIGIN));
        let sorted = list.sorted_handles_by_uuid();
        assert_eq!(list.get(sorted[0]).unwrap().uuid(), small);
        // Original order is untouched.
        assert_eq!(list.value(0).unwrap().uuid(), big);
    }
}
