//! # Id Arena
//!
//! Sparse, id-addressed buffer backed by a monotonically increasing counter.
//! Ids are never reused: removing an entry leaves a hole and the next push
//! still receives a fresh id.

use std::collections::HashMap;

/// Integer id shared by every buffer.
pub type Id = u32;

/// An append-only id space over a sparse buffer.
///
/// # Example
///
/// ```rust
/// use trellis_mesh::Arena;
///
/// let mut arena = Arena::new();
/// let a = arena.push("a");
/// let b = arena.push("b");
/// arena.remove(a);
/// let c = arena.push("c");
/// assert_eq!((a, b, c), (0, 1, 2));
/// assert!(!arena.contains(a));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Arena<T> {
    items: HashMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena whose first id is 0.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 0,
        }
    }

    /// Stores a value under the next id and returns that id.
    ///
    /// # Panics
    ///
    /// Panics if all `u32` ids have been handed out.
    pub fn push(&mut self, value: T) -> Id {
        assert!(self.next_id != Id::MAX, "arena id space exhausted");
        let id = self.next_id;
        self.items.insert(id, value);
        self.next_id += 1;
        id
    }

    /// Stores a value under an explicit id, replacing any previous entry.
    ///
    /// The counter advances past `id` so later pushes never collide with it.
    /// Inserting near `Id::MAX` leaves no room for later pushes.
    pub fn insert(&mut self, id: Id, value: T) -> Option<T> {
        if id >= self.next_id {
            self.next_id = id.saturating_add(1);
        }
        self.items.insert(id, value)
    }

    /// Returns true if an entry exists for `id`.
    #[inline]
    pub fn contains(&self, id: Id) -> bool {
        self.items.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: Id) -> Option<&T> {
        self.items.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    /// Removes an entry. Nothing that references `id` is touched.
    #[inline]
    pub fn remove(&mut self, id: Id) -> Option<T> {
        self.items.remove(&id)
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next push will return.
    #[inline]
    pub fn next_id(&self) -> Id {
        self.next_id
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = self.items.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterates live entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> + '_ {
        self.ids()
            .into_iter()
            .filter_map(move |id| self.items.get(&id).map(|value| (id, value)))
    }

    /// Mutable access to every live entry, in no particular order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.items.values_mut()
    }
}
