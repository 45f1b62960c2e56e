use std::{collections::HashMap, hash::Hash};

///
/// IdentifierIndex
///
/// Bidirectional map between external ids and dense internal indices.
/// Indices are assigned in first-seen order by the owning loader only;
/// every other component treats the index as a read-only lookup.
///

#[derive(Clone, Debug)]
pub struct IdentifierIndex<K> {
    ids: Vec<K>,
    slots: HashMap<K, usize>,
}

impl<K> IdentifierIndex<K>
where
    K: Copy + Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            slots: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Assign the next dense index to `id`.
    /// Returns the id back as the error if it already owns an index.
    pub(crate) fn assign(&mut self, id: K) -> Result<usize, K> {
        if self.slots.contains_key(&id) {
            return Err(id);
        }

        let index = self.ids.len();
        self.ids.push(id);
        self.slots.insert(id, index);

        Ok(index)
    }

    /// Resolve an external id; `None` for ids never assigned.
    #[must_use]
    pub fn lookup_index(&self, id: K) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    /// External id owning `index`.
    #[must_use]
    pub fn id(&self, index: usize) -> Option<K> {
        self.ids.get(index).copied()
    }

    /// External ids in index order.
    #[must_use]
    pub fn ids(&self) -> &[K] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<K> Default for IdentifierIndex<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
