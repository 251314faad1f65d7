pub mod catalog;
pub mod columns;
pub mod computed;
pub mod config;
pub mod data;
pub mod photometry;
pub mod schema;

pub use catalog::{CatalogData, CatalogOptions};
pub use columns::{Column, ColumnData, TimeColumn, TimeScale};
pub use computed::ComputedColumn;
pub use config::PhotometryConfig;
pub use data::Table;
pub use photometry::{PhotometryData, PhotometryOptions};
pub use schema::{validate, TableDescription, ValidatedTable};
