use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const MIN_TABLE: u32 = 1;
pub const MAX_TABLE: u32 = 10;

/// Tables the learner picked. An empty selection means every table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet {
    selected: BTreeSet<u32>,
}

impl TableSet {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: impl IntoIterator<Item = u32>) -> Self {
        let selected = tables
            .into_iter()
            .filter(|t| (MIN_TABLE..=MAX_TABLE).contains(t))
            .collect();
        Self { selected }
    }

    /// Flip one table in or out of the selection. Out-of-range values are ignored.
    pub fn toggle(&mut self, table: u32) {
        if !(MIN_TABLE..=MAX_TABLE).contains(&table) {
            return;
        }
        if !self.selected.remove(&table) {
            self.selected.insert(table);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, table: u32) -> bool {
        self.selected.contains(&table)
    }

    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of explicitly selected tables (0 when defaulting to all).
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Tables questions may be drawn from, with the empty selection expanded.
    pub fn effective(&self) -> Vec<u32> {
        if self.selected.is_empty() {
            (MIN_TABLE..=MAX_TABLE).collect()
        } else {
            self.selected.iter().copied().collect()
        }
    }

    /// Explicit selection as stored in a quiz result; empty means all tables.
    pub fn to_vec(&self) -> Vec<u32> {
        self.selected.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_expands_to_all_tables() {
        let tables = TableSet::all();
        assert!(tables.is_all());
        assert_eq!(tables.effective(), (1..=10).collect::<Vec<_>>());
        assert!(tables.to_vec().is_empty());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut tables = TableSet::all();
        tables.toggle(7);
        tables.toggle(3);
        assert_eq!(tables.effective(), vec![3, 7]);
        tables.toggle(7);
        assert_eq!(tables.effective(), vec![3]);
        tables.toggle(3);
        assert!(tables.is_all());
    }

    #[test]
    fn test_out_of_range_tables_ignored() {
        let mut tables = TableSet::from_tables([0, 4, 11, 12]);
        assert_eq!(tables.to_vec(), vec![4]);
        tables.toggle(0);
        tables.toggle(42);
        assert_eq!(tables.to_vec(), vec![4]);
    }
}
