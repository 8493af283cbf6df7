use crate::generator::tables::{MAX_TABLE, MIN_TABLE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub table: u32,
    pub multiplier: u32,
    pub product: u32,
}

/// Browsing state for the learning screen.
#[derive(Clone, Debug)]
pub struct LearnState {
    pub table: u32,
    pub show_pattern: bool,
}

impl Default for LearnState {
    fn default() -> Self {
        Self {
            table: MIN_TABLE,
            show_pattern: false,
        }
    }
}

impl LearnState {
    pub fn select(&mut self, table: u32) {
        if (MIN_TABLE..=MAX_TABLE).contains(&table) {
            self.table = table;
        }
    }

    pub fn next(&mut self) {
        self.table = if self.table >= MAX_TABLE { MIN_TABLE } else { self.table + 1 };
    }

    pub fn prev(&mut self) {
        self.table = if self.table <= MIN_TABLE { MAX_TABLE } else { self.table - 1 };
    }

    pub fn toggle_pattern(&mut self) {
        self.show_pattern = !self.show_pattern;
    }

    pub fn rows(&self) -> Vec<TableRow> {
        table_rows(self.table)
    }

    pub fn pattern_key(&self) -> String {
        format!("learn.pattern.t{}", self.table)
    }
}

pub fn table_rows(table: u32) -> Vec<TableRow> {
    (1..=10)
        .map(|multiplier| TableRow {
            table,
            multiplier,
            product: table * multiplier,
        })
        .collect()
}
