//! Minimal column-oriented table shared by the cleaners and fact loaders.
//! Cells are `Option<String>`; the CSV store maps empty cells to `None` on
//! read and back to empty strings on write.

use std::collections::HashSet;
use std::path::Path;

use crate::error::PipelineError;

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    /// Push a row, padding or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Add a column if absent; existing rows get `None` for it.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        self.columns.len() - 1
    }

    /// Rewrite every cell of a column through `f`. Missing columns are a
    /// no-op: sources that lack a field skip its normalization.
    pub fn map_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(Option<&str>) -> Option<String>,
    {
        let Some(idx) = self.column_index(name) else {
            return;
        };
        for row in &mut self.rows {
            row[idx] = f(row[idx].as_deref());
        }
    }

    /// Derive a new column from whole rows.
    pub fn derive_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&Table, usize) -> Option<String>,
    {
        let values: Vec<Option<String>> = (0..self.rows.len()).map(|i| f(self, i)).collect();
        let idx = self.ensure_column(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
    }

    /// Keep only rows for which the predicate holds.
    pub fn retain_rows<F>(&mut self, mut f: F)
    where
        F: FnMut(&Table, usize) -> bool,
    {
        let keep: Vec<bool> = (0..self.rows.len()).map(|i| f(self, i)).collect();
        let mut iter = keep.into_iter();
        self.rows.retain(|_| iter.next().unwrap_or(false));
    }

    /// Set a fixed value for every row of a column, creating it if needed.
    pub fn fill_column(&mut self, name: &str, value: &str) {
        let idx = self.ensure_column(name);
        for row in &mut self.rows {
            row[idx] = Some(value.to_string());
        }
    }

    /// Drop duplicate rows sharing the same values in `key_columns`,
    /// keeping the first occurrence in input order. Key columns absent
    /// from the table are ignored.
    pub fn dedup_by_key(&mut self, key_columns: &[&str]) {
        let indices: Vec<usize> = key_columns
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();
        if indices.is_empty() {
            return;
        }
        let mut seen = HashSet::new();
        let rows = std::mem::take(&mut self.rows);
        for row in rows {
            let key: Vec<Option<String>> = indices.iter().map(|&i| row[i].clone()).collect();
            if seen.insert(key) {
                self.rows.push(row);
            }
        }
    }

    /// Drop rows that are entirely empty, and exact duplicate rows
    /// (first occurrence kept).
    pub fn dedup_full_rows(&mut self) {
        let mut seen = HashSet::new();
        let rows = std::mem::take(&mut self.rows);
        for row in rows {
            if row.iter().all(|c| c.as_deref().unwrap_or("").is_empty()) {
                continue;
            }
            if seen.insert(row.clone()) {
                self.rows.push(row);
            }
        }
    }

    /// Append another table, unioning schemas; cells for columns the other
    /// table lacks become `None`.
    pub fn append(&mut self, other: Table) {
        if self.columns.is_empty() {
            *self = other;
            return;
        }
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|c| self.ensure_column(c))
            .collect();
        let width = self.columns.len();
        for row in other.rows {
            let mut new_row = vec![None; width];
            for (src_idx, &dst_idx) in mapping.iter().enumerate() {
                new_row[dst_idx] = row.get(src_idx).cloned().flatten();
            }
            self.rows.push(new_row);
        }
    }

    /// Read a UTF-8 CSV file with a header row.
    pub fn read_csv(path: &Path) -> Result<Table, PipelineError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut table = Table::new(columns);
        for record in reader.records() {
            let record = record?;
            let row: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            table.push_row(row);
        }
        Ok(table)
    }

    /// Write a UTF-8 CSV file with a header row; `None` cells become empty.
    pub fn write_csv(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }
}
