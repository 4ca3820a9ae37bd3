//! Game-object model and the object table.
//!
//! Objects are passive data with behavior hooks; the engine owns them and
//! drives the hooks. They hold no reference back to the engine, which keeps
//! the table free to copy, clear, and iterate them without aliasing games.

use std::any::Any;
use std::time::Duration;

use crate::types::{Glyph, Position};

/// Downcast support for trait objects.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Object-safe deep copy.
pub trait ObjectClone {
    fn clone_object(&self) -> Box<dyn GameObject>;
}

impl<T: GameObject + Clone> ObjectClone for T {
    fn clone_object(&self) -> Box<dyn GameObject> {
        Box::new(self.clone())
    }
}

/// A live game entity: a grid position plus render/update/collision hooks.
///
/// Implementors derive `Clone`; the engine copies objects at the API boundary
/// (`set_player`, `new_object`) and on reset.
pub trait GameObject: ObjectClone + AsAny + 'static {
    fn position(&self) -> Position;

    /// Either a literal character or a glyph slot to draw this frame.
    fn render(&self) -> Glyph;

    /// Advance by the measured elapsed time since the previous frame start.
    fn update(&mut self, dt: Duration) {
        let _ = dt;
    }

    /// Called when another object occupies the same cell this frame. May fire
    /// several times per frame when overlapping several others.
    fn on_collision(&mut self, other: &dyn GameObject) {
        let _ = other;
    }
}

impl Clone for Box<dyn GameObject> {
    fn clone(&self) -> Self {
        (**self).clone_object()
    }
}

/// Identity handle returned by `new_object`, usable for later deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

/// Insertion-ordered table of live objects. The player is not stored here.
#[derive(Default)]
pub(crate) struct ObjectTable {
    entries: Vec<(ObjectId, Box<dyn GameObject>)>,
    next_id: u64,
}

impl ObjectTable {
    pub fn insert(&mut self, object: Box<dyn GameObject>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, object));
        id
    }

    /// Remove by identity; absent ids (already deleted, never inserted) are a
    /// no-op.
    pub fn remove(&mut self, id: ObjectId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn GameObject> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, obj)| obj.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Box<dyn GameObject>> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, obj)| obj)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn GameObject)> {
        self.entries.iter().map(|(id, obj)| (*id, obj.as_ref()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn GameObject>> {
        self.entries.iter_mut().map(|(_, obj)| obj)
    }

    /// All live objects of concrete type `T`, in insertion order.
    pub fn of_type<T: GameObject>(&self) -> Vec<(ObjectId, &T)> {
        self.entries
            .iter()
            // Deref past the Box so the blanket `AsAny` impl sees the
            // concrete object, not the Box.
            .filter_map(|(id, obj)| (**obj).as_any().downcast_ref::<T>().map(|t| (*id, t)))
            .collect()
    }

    /// Disjoint mutable borrows of two entries, for symmetric collision
    /// callbacks. `a` must be less than `b`.
    pub fn pair_mut(
        &mut self,
        a: usize,
        b: usize,
    ) -> (&mut Box<dyn GameObject>, &mut Box<dyn GameObject>) {
        debug_assert!(a < b);
        let (left, right) = self.entries.split_at_mut(b);
        (&mut left[a].1, &mut right[0].1)
    }
}
