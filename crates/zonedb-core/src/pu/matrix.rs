//! Sparse planning-unit by species amount matrix.
//!
//! Entries are kept in CSR layout: sorted by `(pu, species)` with a
//! `puno + 1` offset table, so one unit's row is a contiguous slice and a
//! point lookup is a binary search inside that row. Column aggregates are
//! computed when entries are added, never per query.

use serde::Serialize;

///
/// SparseAmountEntry
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SparseAmountEntry {
    pub pu: usize,
    pub species: usize,
    pub amount: f64,
}

///
/// SparseAmountMatrix
///

#[derive(Clone, Debug, Default)]
pub struct SparseAmountMatrix {
    entries: Vec<SparseAmountEntry>,
    offsets: Vec<usize>,
    richness: Vec<usize>,
    species_amounts: Vec<f64>,
    occurrences: Vec<usize>,
}

impl SparseAmountMatrix {
    #[must_use]
    pub fn new(puno: usize) -> Self {
        Self {
            entries: Vec::new(),
            offsets: vec![0; puno + 1],
            richness: vec![0; puno],
            species_amounts: Vec::new(),
            occurrences: Vec::new(),
        }
    }

    /// Merge resolved entries into the matrix and rebuild the row offsets
    /// and column aggregates. Every entry must have `pu < puno`.
    ///
    /// Entries are appended, not merged by pair: adding the same rows twice
    /// stores them twice.
    pub(crate) fn extend(&mut self, spno: usize, added: Vec<SparseAmountEntry>) {
        self.entries.extend(added);
        // stable: duplicated pairs keep file order within a row
        self.entries.sort_by_key(|e| (e.pu, e.species));
        self.rebuild(spno);
    }

    fn rebuild(&mut self, spno: usize) {
        let puno = self.richness.len();
        let width = spno.max(self.species_amounts.len());

        // Phase 1: row offsets from per-unit counts.
        self.offsets = vec![0; puno + 1];
        for entry in &self.entries {
            self.offsets[entry.pu + 1] += 1;
        }
        for pu in 0..puno {
            self.offsets[pu + 1] += self.offsets[pu];
        }

        // Phase 2: per-row richness and per-column aggregates.
        self.species_amounts = vec![0.0; width];
        self.occurrences = vec![0; width];
        for pu in 0..puno {
            let row = &self.entries[self.offsets[pu]..self.offsets[pu + 1]];
            let mut distinct = 0;

            for (position, entry) in row.iter().enumerate() {
                self.species_amounts[entry.species] += entry.amount;
                if position == 0 || row[position - 1].species != entry.species {
                    self.occurrences[entry.species] += 1;
                    distinct += 1;
                }
            }
            self.richness[pu] = distinct;
        }
    }

    /// Entries recorded for one unit, ordered by species index.
    #[must_use]
    pub fn row(&self, pu: usize) -> &[SparseAmountEntry] {
        match (self.offsets.get(pu), self.offsets.get(pu + 1)) {
            (Some(&start), Some(&end)) => &self.entries[start..end],
            _ => &[],
        }
    }

    /// Position of the `(pu, species)` entry in [`Self::entries`], or `None`
    /// when no amount is recorded for the pair.
    #[must_use]
    pub fn entry_index(&self, pu: usize, species: usize) -> Option<usize> {
        let start = *self.offsets.get(pu)?;
        let row = self.row(pu);
        let position = row.partition_point(|e| e.species < species);

        (row.get(position)?.species == species).then_some(start + position)
    }

    /// Recorded amount, `0.0` when absent.
    #[must_use]
    pub fn amount(&self, pu: usize, species: usize) -> f64 {
        self.entry_index(pu, species)
            .map_or(0.0, |index| self.entries[index].amount)
    }

    /// Dense amounts for one unit, indexed by species.
    #[must_use]
    pub fn amounts_at(&self, pu: usize, species_count: usize) -> Vec<f64> {
        let mut amounts = vec![0.0; species_count];

        // reverse so the first entry of a duplicated pair wins, as in `amount`
        for entry in self.row(pu).iter().rev() {
            if let Some(slot) = amounts.get_mut(entry.species) {
                *slot = entry.amount;
            }
        }

        amounts
    }

    /// Column sums: total amount of each species across all units.
    #[must_use]
    pub fn species_totals(&self, species_count: usize) -> Vec<f64> {
        (0..species_count)
            .map(|s| self.species_amounts.get(s).copied().unwrap_or(0.0))
            .collect()
    }

    /// Column entry counts: number of distinct units recording each species.
    #[must_use]
    pub fn occurrence_totals(&self, species_count: usize) -> Vec<usize> {
        (0..species_count)
            .map(|s| self.occurrences.get(s).copied().unwrap_or(0))
            .collect()
    }

    /// Distinct species recorded for one unit.
    #[must_use]
    pub fn richness(&self, pu: usize) -> usize {
        self.richness.get(pu).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn entries(&self) -> &[SparseAmountEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
