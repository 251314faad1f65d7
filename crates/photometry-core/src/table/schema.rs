//! Column/unit schema validation.
//!
//! A [`TableDescription`] lists every required column together with the
//! unit it must carry (or `None` when any unit, or none, is acceptable).
//! Validation never converts units and never looks at row values.

use tracing::debug;

use crate::error::SchemaError;
use crate::units::Unit;

use super::data::Table;

/// Ordered mapping of required column name to required unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableDescription {
    entries: Vec<(String, Option<Unit>)>,
}

impl TableDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a required column.
    pub fn require(mut self, name: impl Into<String>, unit: Option<Unit>) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = unit,
            None => self.entries.push((name, unit)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Unit>)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u.as_ref()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Option<Unit>)> for TableDescription {
    fn from_iter<I: IntoIterator<Item = (S, Option<Unit>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |desc, (name, unit)| desc.require(name, unit))
    }
}

/// A table known to satisfy a [`TableDescription`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedTable {
    table: Table,
    description: TableDescription,
}

impl ValidatedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn description(&self) -> &TableDescription {
        &self.description
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }
}

/// Check `data` against `description` and return a validated copy.
///
/// Fails on the first described column that is missing or whose unit does
/// not equal the declared unit. Columns not in the description are carried
/// through unchanged.
pub fn validate(
    description: &TableDescription,
    data: &Table,
) -> Result<ValidatedTable, SchemaError> {
    check_columns(description, data)?;
    debug!(
        required = description.len(),
        columns = data.num_columns(),
        rows = data.len(),
        "Table validated"
    );
    Ok(ValidatedTable {
        table: data.clone(),
        description: description.clone(),
    })
}

fn check_columns(description: &TableDescription, data: &Table) -> Result<(), SchemaError> {
    for (name, required) in description.iter() {
        let column = data.require(name)?;
        if let Some(expected) = required {
            if column.unit.as_ref() != Some(expected) {
                return Err(SchemaError::UnitMismatch {
                    column: name.to_string(),
                    expected: expected.clone(),
                    actual: column.unit.clone(),
                });
            }
        }
    }
    Ok(())
}
