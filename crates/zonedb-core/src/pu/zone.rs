use crate::types::ZoneId;

///
/// ZoneRegistry
///
/// Allowed zones per planning unit, in zone-file order. An empty list
/// means the unit may be placed in any zone.
///

#[derive(Clone, Debug, Default)]
pub struct ZoneRegistry {
    zones: Vec<Vec<ZoneId>>,
}

impl ZoneRegistry {
    #[must_use]
    pub fn new(puno: usize) -> Self {
        Self {
            zones: vec![Vec::new(); puno],
        }
    }

    pub(crate) fn push(&mut self, index: usize, zone: ZoneId) -> usize {
        match self.zones.get_mut(index) {
            Some(list) => {
                list.push(zone);
                list.len()
            }
            None => 0,
        }
    }

    #[must_use]
    pub fn zones(&self, index: usize) -> &[ZoneId] {
        self.zones.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Zone-file row count for the unit; `0` means unconstrained.
    #[must_use]
    pub fn num_zones(&self, index: usize) -> usize {
        self.zones(index).len()
    }
}
