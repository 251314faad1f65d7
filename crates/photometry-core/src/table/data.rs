use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::units::Unit;

use super::columns::{Column, ColumnData, TimeColumn};

/// An ordered collection of equal-length, uniquely named columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking names and lengths.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self, SchemaError> {
        let mut table = Self::new();
        for col in columns {
            table.add_column(col)?;
        }
        Ok(table)
    }

    /// Builder-style [`Table::add_column`].
    pub fn with_column(mut self, column: Column) -> Result<Self, SchemaError> {
        self.add_column(column)?;
        Ok(self)
    }

    pub fn add_column(&mut self, column: Column) -> Result<(), SchemaError> {
        if self.contains(&column.name) {
            return Err(SchemaError::DuplicateColumn(column.name));
        }
        if let Some(first) = self.columns.first() {
            let actual = column.len();
            if first.len() != actual {
                return Err(SchemaError::LengthMismatch {
                    column: column.name,
                    expected: first.len(),
                    actual,
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(idx))
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), SchemaError> {
        if from != to && self.contains(to) {
            return Err(SchemaError::DuplicateColumn(to.to_string()));
        }
        let col = self
            .column_mut(from)
            .ok_or_else(|| SchemaError::MissingColumn(from.to_string()))?;
        col.name = to.to_string();
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Look up a column, failing with `MissingColumn`.
    pub fn require(&self, name: &str) -> Result<&Column, SchemaError> {
        self.column(name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
    }

    pub fn unit_of(&self, name: &str) -> Result<Option<&Unit>, SchemaError> {
        Ok(self.require(name)?.unit.as_ref())
    }

    pub fn float(&self, name: &str) -> Result<&[f64], SchemaError> {
        self.require(name)?
            .as_float()
            .ok_or_else(|| SchemaError::WrongColumnType {
                column: name.to_string(),
                expected: "float",
            })
    }

    pub fn int(&self, name: &str) -> Result<&[i64], SchemaError> {
        self.require(name)?
            .as_int()
            .ok_or_else(|| SchemaError::WrongColumnType {
                column: name.to_string(),
                expected: "integer",
            })
    }

    pub fn text(&self, name: &str) -> Result<&[String], SchemaError> {
        self.require(name)?
            .as_text()
            .ok_or_else(|| SchemaError::WrongColumnType {
                column: name.to_string(),
                expected: "text",
            })
    }

    pub fn time(&self, name: &str) -> Result<&TimeColumn, SchemaError> {
        self.require(name)?
            .as_time()
            .ok_or_else(|| SchemaError::NotATimeColumn(name.to_string()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite text values that appear as keys of `map`.
    pub(crate) fn map_text(
        &mut self,
        name: &str,
        map: &BTreeMap<String, String>,
    ) -> Result<(), SchemaError> {
        let col = self
            .column_mut(name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))?;
        match &mut col.data {
            ColumnData::Text(values) => {
                for v in values.iter_mut() {
                    if let Some(new) = map.get(v.as_str()) {
                        *v = new.clone();
                    }
                }
                Ok(())
            }
            _ => Err(SchemaError::WrongColumnType {
                column: name.to_string(),
                expected: "text",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_rejected() {
        let err = Table::new()
            .with_column(Column::float("a", None, vec![1.0, 2.0]))
            .unwrap()
            .with_column(Column::float("b", None, vec![1.0]))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::LengthMismatch {
                column: "b".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Table::from_columns([
            Column::float("a", None, vec![1.0]),
            Column::float("a", None, vec![2.0]),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_rename_missing_column() {
        let mut t = Table::from_columns([Column::float("a", None, vec![1.0])]).unwrap();
        assert_eq!(
            t.rename_column("b", "c").unwrap_err(),
            SchemaError::MissingColumn("b".into())
        );
        t.rename_column("a", "c").unwrap();
        assert!(t.contains("c"));
        assert!(!t.contains("a"));
    }
}
