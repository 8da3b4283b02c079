//! HDB Resale Schema
//!
//! Field domains and column order of the resale price model's training
//! layout. Validation and encoding both derive from [`resale_schema`].

use crate::error::SchemaError;
use crate::field::Constraint;
use crate::input::RawInput;
use crate::schema::Schema;

/// Version tag shared with the trained model artifact
pub const SCHEMA_VERSION: &str = "hdb-resale-v1";

/// Floor area bounds (sqm)
pub const FLOOR_AREA_RANGE: (f64, f64) = (30.0, 200.0);

/// Remaining lease bounds (years)
pub const REMAINING_LEASE_RANGE: (f64, f64) = (30.0, 99.0);

pub const TOWNS: [&str; 26] = [
    "ANG MO KIO",
    "BEDOK",
    "BISHAN",
    "BUKIT BATOK",
    "BUKIT MERAH",
    "BUKIT PANJANG",
    "BUKIT TIMAH",
    "CENTRAL AREA",
    "CHOA CHU KANG",
    "CLEMENTI",
    "GEYLANG",
    "HOUGANG",
    "JURONG EAST",
    "JURONG WEST",
    "KALLANG/WHAMPOA",
    "MARINE PARADE",
    "PASIR RIS",
    "PUNGGOL",
    "QUEENSTOWN",
    "SEMBWANG",
    "SENGKANG",
    "SERANGOON",
    "TAMPINES",
    "TOA PAYOH",
    "WOODLANDS",
    "YISHUN",
];

pub const FLAT_TYPES: [&str; 7] = [
    "1 ROOM",
    "2 ROOM",
    "3 ROOM",
    "4 ROOM",
    "5 ROOM",
    "EXECUTIVE",
    "MULTI-GENERATION",
];

pub const STOREY_RANGES: [&str; 17] = [
    "01 TO 03",
    "04 TO 06",
    "07 TO 09",
    "10 TO 12",
    "13 TO 15",
    "16 TO 18",
    "19 TO 21",
    "22 TO 24",
    "25 TO 27",
    "28 TO 30",
    "31 TO 33",
    "34 TO 36",
    "37 TO 39",
    "40 TO 42",
    "43 TO 45",
    "46 TO 48",
    "49 TO 51",
];

pub const FLAT_MODELS: [&str; 21] = [
    "2-room",
    "3Gen",
    "Adjoined flat",
    "Apartment",
    "DBSS",
    "Improved",
    "Improved-Maisonette",
    "Maisonette",
    "Model A",
    "Model A-Maisonette",
    "Model A2",
    "Multi Generation",
    "New Generation",
    "Premium Apartment",
    "Premium Apartment Loft",
    "Premium Maisonette",
    "Simplified",
    "Standard",
    "Terrace",
    "Type S1",
    "Type S2",
];

/// Build the resale schema in training-time column order
pub fn resale_schema() -> Result<Schema, SchemaError> {
    let mut builder = Schema::builder(SCHEMA_VERSION);
    builder
        .define_labelled_field(
            "floor_area_sqm",
            "Floor Area (sqm)",
            Constraint::range(FLOOR_AREA_RANGE.0, FLOOR_AREA_RANGE.1),
        )?
        .define_labelled_field(
            "remaining_lease_year",
            "Remaining Lease (years)",
            Constraint::range(REMAINING_LEASE_RANGE.0, REMAINING_LEASE_RANGE.1),
        )?
        .define_labelled_field("town", "Town", Constraint::domain(TOWNS))?
        .define_labelled_field("flat_type", "Flat Type", Constraint::domain(FLAT_TYPES))?
        .define_labelled_field(
            "storey_range",
            "Storey Range",
            Constraint::domain(STOREY_RANGES),
        )?
        .define_labelled_field("flat_model", "Flat Model", Constraint::domain(FLAT_MODELS))?;
    builder.build()
}

/// Initial values offered by an input form
pub fn default_input() -> RawInput {
    RawInput::new()
        .with("floor_area_sqm", 80)
        .with("remaining_lease_year", 60)
        .with("town", TOWNS[0])
        .with("flat_type", FLAT_TYPES[0])
        .with("storey_range", STOREY_RANGES[0])
        .with("flat_model", FLAT_MODELS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resale_schema_layout() {
        let schema = resale_schema().unwrap();
        assert_eq!(schema.version(), SCHEMA_VERSION);
        assert_eq!(schema.fields().len(), 6);
        assert_eq!(schema.column_count(), 2 + 26 + 7 + 17 + 21);

        let columns = schema.expected_columns();
        assert_eq!(columns[0], "floor_area_sqm");
        assert_eq!(columns[1], "remaining_lease_year");
        assert_eq!(columns[2], "town_ANG MO KIO");
        assert_eq!(columns[27], "town_YISHUN");
        assert_eq!(columns[28], "flat_type_1 ROOM");
        assert_eq!(columns[35], "storey_range_01 TO 03");
        assert_eq!(columns[52], "flat_model_2-room");
        assert_eq!(columns[72], "flat_model_Type S2");
    }

    #[test]
    fn test_default_input_is_valid() {
        let schema = resale_schema().unwrap();
        assert!(schema.validate(&default_input()).is_ok());
    }

    #[test]
    fn test_lease_bounds_are_inclusive() {
        let schema = resale_schema().unwrap();
        for lease in [30, 99] {
            let input = default_input().with("remaining_lease_year", lease);
            assert!(schema.validate(&input).is_ok());
        }
        let input = default_input().with("remaining_lease_year", 100);
        assert!(schema.validate(&input).is_err());
    }
}
