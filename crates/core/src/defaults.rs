//! Built-in rule sets and code libraries, used when no configuration
//! envelope is supplied.

use crate::config_export::ConfigSnapshot;
use crate::library::CodeLibrary;
use crate::row::{DEPTH, DEPTH_FROM, DEPTH_TO, END_DEPTH, SITE_ID};
use crate::rules::{ColumnConfig, ColumnType, TableConfig, TableType, INTERVAL_TABLES};

pub const LITH_LIBRARY: &str = "lith";
pub const OXIDATION_LIBRARY: &str = "oxidation";

/// The default snapshot: one rule set per table type plus the `lith` and
/// `oxidation` libraries.
pub fn default_snapshot() -> ConfigSnapshot {
    let mut configs = vec![collar_config(), survey_config()];
    configs.extend(INTERVAL_TABLES.iter().map(|&table| interval_config(table)));
    ConfigSnapshot::new(configs, default_libraries())
}

pub fn default_libraries() -> Vec<CodeLibrary> {
    vec![
        CodeLibrary::new(
            LITH_LIBRARY,
            "Lithology",
            &[
                ("QZ", "Quartz"),
                ("BAS", "Basalt"),
                ("GRN", "Granite"),
                ("SCH", "Schist"),
                ("SST", "Sandstone"),
                ("SLT", "Siltstone"),
                ("SHL", "Shale"),
                ("DOL", "Dolerite"),
            ],
        ),
        CodeLibrary::new(
            OXIDATION_LIBRARY,
            "Oxidation",
            &[
                ("OX", "Oxidised"),
                ("TR", "Transitional"),
                ("FR", "Fresh"),
                ("CO", "Completely oxidised"),
            ],
        ),
    ]
}

fn site_column() -> ColumnConfig {
    ColumnConfig::new(SITE_ID, "Site ID", ColumnType::String).required()
}

fn depth_column(name: &str, label: &str) -> ColumnConfig {
    ColumnConfig::new(name, label, ColumnType::Number)
        .required()
        .with_range(Some(0.0), None, true)
}

fn collar_config() -> TableConfig {
    TableConfig::new(
        TableType::Collar,
        vec![
            site_column(),
            depth_column(END_DEPTH, "End of hole depth"),
            ColumnConfig::new("EASTING", "Easting", ColumnType::Number),
            ColumnConfig::new("NORTHING", "Northing", ColumnType::Number),
            ColumnConfig::new("ELEVATION", "Elevation", ColumnType::Number),
        ],
    )
}

fn survey_config() -> TableConfig {
    TableConfig::new(
        TableType::Survey,
        vec![
            site_column(),
            depth_column(DEPTH, "Survey depth"),
            ColumnConfig::new("AZIMUTH", "Azimuth", ColumnType::Number).with_range(
                Some(0.0),
                Some(360.0),
                true,
            ),
            ColumnConfig::new("DIP", "Dip", ColumnType::Number).with_range(
                Some(-90.0),
                Some(90.0),
                true,
            ),
        ],
    )
}

fn interval_config(table: TableType) -> TableConfig {
    let mut columns = vec![
        site_column(),
        depth_column(DEPTH_FROM, "From"),
        depth_column(DEPTH_TO, "To"),
    ];
    columns.extend(attribute_column(table));
    TableConfig::new(table, columns)
}

/// The table-specific attribute column, if the table type has one.
fn attribute_column(table: TableType) -> Option<ColumnConfig> {
    let column = match table {
        TableType::Lithology => ColumnConfig::new("LITH_CODE", "Lithology", ColumnType::String)
            .with_lookup(LITH_LIBRARY, false),
        TableType::Oxidation => ColumnConfig::new("OX_CODE", "Oxidation", ColumnType::String)
            .with_lookup(OXIDATION_LIBRARY, false),
        TableType::Assay => ColumnConfig::new("AU_PPM", "Au (ppm)", ColumnType::Number)
            .with_range(Some(0.0), None, false),
        TableType::Rqd => ColumnConfig::new("RQD_PCT", "RQD (%)", ColumnType::Number)
            .with_range(Some(0.0), Some(100.0), true),
        TableType::Geotech => ColumnConfig::new("RECOVERY_PCT", "Recovery (%)", ColumnType::Number)
            .with_range(Some(0.0), Some(100.0), false),
        TableType::Density => ColumnConfig::new("DENSITY", "Density", ColumnType::Number)
            .with_range(Some(1.0), Some(6.0), false),
        TableType::Mineralization => {
            ColumnConfig::new("MIN_CODE", "Mineralization", ColumnType::String)
        }
        TableType::Vein => ColumnConfig::new("VEIN_TYPE", "Vein type", ColumnType::String),
        TableType::Alteration => ColumnConfig::new("ALT_CODE", "Alteration", ColumnType::String),
        TableType::Collar | TableType::Survey => return None,
    };
    Some(column)
}
