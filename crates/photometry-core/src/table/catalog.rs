use std::collections::BTreeMap;

use tracing::info;

use crate::error::SchemaError;
use crate::units::Unit;

use super::data::Table;
use super::schema::{validate, TableDescription};

/// Options controlling [`CatalogData::new`].
#[derive(Clone, Debug, Default)]
pub struct CatalogOptions {
    /// Old column name → new column name, applied before validation.
    pub colname_map: Option<BTreeMap<String, String>>,
    /// Catalog passband name → standard passband name, applied after.
    pub passband_map: Option<BTreeMap<String, String>>,
}

/// A validated astronomical catalog (`id`, `ra`, `dec`, `mag`, `passband`).
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogData {
    table: Table,
    name: String,
    data_source: String,
}

impl CatalogData {
    pub fn description() -> TableDescription {
        TableDescription::new()
            .require("id", None)
            .require("ra", Some(Unit::Degree))
            .require("dec", Some(Unit::Degree))
            .require("mag", None)
            .require("passband", None)
    }

    /// Rename, validate and normalize a catalog table. `data` is copied.
    pub fn new(
        data: &Table,
        name: impl Into<String>,
        data_source: impl Into<String>,
        options: &CatalogOptions,
    ) -> Result<Self, SchemaError> {
        let mut renamed = data.clone();
        if let Some(map) = &options.colname_map {
            for (from, to) in map {
                renamed.rename_column(from, to)?;
            }
        }

        let mut table = validate(&Self::description(), &renamed)?.into_table();
        if let Some(map) = &options.passband_map {
            table.map_text("passband", map)?;
        }

        let name = name.into();
        info!(catalog = %name, rows = table.len(), "Catalog table built");
        Ok(Self {
            table,
            name,
            data_source: data_source.into(),
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
