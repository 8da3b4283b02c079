use feature_encoder::FeatureEncoder;
use proptest::prelude::*;
use schema_registry::hdb::{self, FLAT_MODELS, FLAT_TYPES, STOREY_RANGES, TOWNS};
use schema_registry::{indicator_column, Constraint, FieldValue, RawInput, ValidationReason};
use std::sync::Arc;

// Property-based tests for the one-hot encoding contract
// Layout must match the training-time column order exactly

fn resale_encoder() -> FeatureEncoder {
    FeatureEncoder::new(Arc::new(hdb::resale_schema().unwrap()))
}

fn arbitrary_valid_input() -> impl Strategy<Value = RawInput> {
    (
        30.0f64..=200.0,
        30.0f64..=99.0,
        prop::sample::select(TOWNS.to_vec()),
        prop::sample::select(FLAT_TYPES.to_vec()),
        prop::sample::select(STOREY_RANGES.to_vec()),
        prop::sample::select(FLAT_MODELS.to_vec()),
    )
        .prop_map(|(area, lease, town, flat_type, storey, model)| {
            RawInput::new()
                .with("floor_area_sqm", area)
                .with("remaining_lease_year", lease)
                .with("town", town)
                .with("flat_type", flat_type)
                .with("storey_range", storey)
                .with("flat_model", model)
        })
}

proptest! {
    #[test]
    fn columns_do_not_depend_on_input(input in arbitrary_valid_input()) {
        let encoder = resale_encoder();
        let expected = encoder.schema().expected_columns();
        let vector = encoder.encode(&input).unwrap();
        prop_assert_eq!(vector.columns(), &expected[..]);
        prop_assert_eq!(vector.len(), 73);
    }

    #[test]
    fn one_hot_exclusivity(input in arbitrary_valid_input()) {
        let encoder = resale_encoder();
        let vector = encoder.encode(&input).unwrap();

        for spec in encoder.schema().fields() {
            if let Constraint::Domain { domain } = &spec.constraint {
                let indicators: Vec<f64> = domain
                    .iter()
                    .map(|label| vector.get(&indicator_column(&spec.name, label)).unwrap())
                    .collect();
                prop_assert!(indicators.iter().all(|&v| v == 0.0 || v == 1.0));
                prop_assert_eq!(indicators.iter().sum::<f64>(), 1.0);

                let chosen = match input.get(&spec.name) {
                    Some(FieldValue::Label(label)) => label.clone(),
                    other => panic!("expected label, got {:?}", other),
                };
                prop_assert_eq!(vector.get(&indicator_column(&spec.name, &chosen)), Some(1.0));
            }
        }
    }

    #[test]
    fn numeric_passthrough(input in arbitrary_valid_input()) {
        let vector = resale_encoder().encode(&input).unwrap();
        for field in ["floor_area_sqm", "remaining_lease_year"] {
            let raw = match input.get(field) {
                Some(FieldValue::Number(n)) => *n,
                other => panic!("expected number, got {:?}", other),
            };
            prop_assert_eq!(vector.get(field).map(f64::to_bits), Some(raw.to_bits()));
        }
    }

    #[test]
    fn encoding_is_idempotent(input in arbitrary_valid_input()) {
        let encoder = resale_encoder();
        let first = encoder.encode(&input).unwrap();
        let second = encoder.encode(&input).unwrap();
        let first_bits: Vec<u64> = first.values().iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u64> = second.values().iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(first_bits, second_bits);
        prop_assert_eq!(first.columns(), second.columns());
    }

    #[test]
    fn display_preserves_every_field(input in arbitrary_valid_input()) {
        let rows = resale_encoder().decode_for_display(&input);
        prop_assert_eq!(rows.len(), input.len());
    }
}

#[test]
fn expected_columns_are_stable() {
    let schema = hdb::resale_schema().unwrap();
    let first = schema.expected_columns();
    let second = schema.expected_columns();
    assert_eq!(first, second);

    let rebuilt = hdb::resale_schema().unwrap();
    assert_eq!(rebuilt.expected_columns(), first);
}

#[test]
fn atlantis_produces_no_vector() {
    let input = hdb::default_input().with("town", "ATLANTIS");
    let err = resale_encoder().encode(&input).unwrap_err();
    assert_eq!(err.field, "town");
    assert!(matches!(err.reason, ValidationReason::UnknownCategory { .. }));
}

#[test]
fn floor_area_bounds_are_inclusive() {
    let encoder = resale_encoder();
    for area in [30, 200] {
        let vector = encoder
            .encode(&hdb::default_input().with("floor_area_sqm", area))
            .unwrap();
        assert_eq!(vector.get("floor_area_sqm"), Some(f64::from(area)));
    }
    for area in [29, 201] {
        let err = encoder
            .encode(&hdb::default_input().with("floor_area_sqm", area))
            .unwrap_err();
        assert_eq!(err.field, "floor_area_sqm");
    }
}

#[test]
fn bedok_four_room_example() {
    let input = RawInput::new()
        .with("floor_area_sqm", 80)
        .with("remaining_lease_year", 60)
        .with("town", "BEDOK")
        .with("flat_type", "4 ROOM")
        .with("storey_range", "04 TO 06")
        .with("flat_model", "Improved");
    let encoder = resale_encoder();
    let vector = encoder.encode(&input).unwrap();

    let hot = [
        "town_BEDOK",
        "flat_type_4 ROOM",
        "storey_range_04 TO 06",
        "flat_model_Improved",
    ];

    let expected_columns = encoder.schema().expected_columns();
    let encoded: Vec<(&str, f64)> = vector.iter().collect();
    assert_eq!(encoded.len(), expected_columns.len());

    for ((column, value), expected) in encoded.iter().zip(expected_columns.iter()) {
        assert_eq!(*column, expected.as_str());
        let want = match *column {
            "floor_area_sqm" => 80.0,
            "remaining_lease_year" => 60.0,
            c if hot.contains(&c) => 1.0,
            _ => 0.0,
        };
        assert_eq!(*value, want, "column {}", column);
    }

    assert_eq!(vector.values().iter().filter(|&&v| v == 1.0).count(), 4);
}
