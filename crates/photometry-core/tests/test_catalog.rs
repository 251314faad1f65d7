use std::collections::BTreeMap;

use photometry_core::error::SchemaError;
use photometry_core::table::{CatalogData, CatalogOptions, Column, Table};
use photometry_core::Unit;

/// APASS-style column names.
fn apass_table() -> Table {
    Table::from_columns([
        Column::text("recno", ["1", "2"]),
        Column::float("RAJ2000", Some(Unit::Degree), vec![250.1, 250.2]),
        Column::float("DEJ2000", Some(Unit::Degree), vec![36.4, 36.5]),
        Column::float("r_mag", None, vec![12.1, 13.4]),
        Column::text("filter", ["r'", "r'"]),
    ])
    .unwrap()
}

fn apass_renames() -> BTreeMap<String, String> {
    [
        ("recno", "id"),
        ("RAJ2000", "ra"),
        ("DEJ2000", "dec"),
        ("r_mag", "mag"),
        ("filter", "passband"),
    ]
    .into_iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

#[test]
fn test_columns_renamed_before_validation() {
    let options = CatalogOptions {
        colname_map: Some(apass_renames()),
        passband_map: None,
    };
    let catalog = CatalogData::new(&apass_table(), "APASS DR9", "Vizier", &options).unwrap();
    assert_eq!(catalog.name(), "APASS DR9");
    assert_eq!(catalog.data_source(), "Vizier");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.table().float("mag").unwrap(), [12.1, 13.4]);
    assert!(!catalog.table().contains("RAJ2000"));
}

#[test]
fn test_passband_map_applied_after_rename() {
    let mut passbands = BTreeMap::new();
    passbands.insert("r'".to_string(), "SR".to_string());
    let options = CatalogOptions {
        colname_map: Some(apass_renames()),
        passband_map: Some(passbands),
    };
    let catalog = CatalogData::new(&apass_table(), "APASS", "Vizier", &options).unwrap();
    assert_eq!(catalog.table().text("passband").unwrap(), ["SR", "SR"]);
}

#[test]
fn test_without_rename_required_columns_missing() {
    let err = CatalogData::new(&apass_table(), "APASS", "Vizier", &CatalogOptions::default())
        .unwrap_err();
    assert_eq!(err, SchemaError::MissingColumn("id".into()));
}

#[test]
fn test_rename_of_absent_column_fails() {
    let mut renames = apass_renames();
    renames.insert("Bmag".to_string(), "b_mag".to_string());
    let options = CatalogOptions {
        colname_map: Some(renames),
        passband_map: None,
    };
    let err = CatalogData::new(&apass_table(), "APASS", "Vizier", &options).unwrap_err();
    assert_eq!(err, SchemaError::MissingColumn("Bmag".into()));
}

#[test]
fn test_catalog_coordinates_must_be_degrees() {
    let mut table = apass_table();
    table.column_mut("RAJ2000").unwrap().unit = Some(Unit::Hour);
    let options = CatalogOptions {
        colname_map: Some(apass_renames()),
        passband_map: None,
    };
    let err = CatalogData::new(&table, "APASS", "Vizier", &options).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnitMismatch {
            column: "ra".into(),
            expected: Unit::Degree,
            actual: Some(Unit::Hour),
        }
    );
}

#[test]
fn test_input_catalog_not_modified() {
    let table = apass_table();
    let options = CatalogOptions {
        colname_map: Some(apass_renames()),
        passband_map: None,
    };
    CatalogData::new(&table, "APASS", "Vizier", &options).unwrap();
    assert!(table.contains("RAJ2000"));
    assert!(!table.contains("ra"));
}
