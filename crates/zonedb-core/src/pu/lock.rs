use crate::types::ZoneId;

///
/// LockRegistry
///
/// Optional zone lock per planning unit plus the set of locked indices.
/// The locked set and the per-unit slots change together, so
/// `count() == locked_indices().len()` always holds.
///

#[derive(Clone, Debug, Default)]
pub struct LockRegistry {
    locks: Vec<Option<ZoneId>>,
    locked: Vec<usize>,
}

impl LockRegistry {
    #[must_use]
    pub fn new(puno: usize) -> Self {
        Self {
            locks: vec![None; puno],
            locked: Vec::new(),
        }
    }

    /// Pin `index` to `zone`. A later lock for the same unit replaces the
    /// earlier zone without adding a second locked entry.
    pub(crate) fn lock(&mut self, index: usize, zone: ZoneId) {
        let Some(slot) = self.locks.get_mut(index) else {
            return;
        };
        if slot.replace(zone).is_none() {
            self.locked.push(index);
        }
    }

    /// Zone the unit is locked to, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ZoneId> {
        self.locks.get(index).copied().flatten()
    }

    /// Locked unit indices in lock-file order.
    #[must_use]
    pub fn locked_indices(&self) -> &[usize] {
        &self.locked
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.locked.len()
    }
}
