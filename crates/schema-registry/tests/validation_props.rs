use proptest::prelude::*;
use schema_registry::hdb::{self, FLAT_MODELS, FLAT_TYPES, STOREY_RANGES, TOWNS};
use schema_registry::{RawInput, ValidationReason};

// Property-based tests for the HDB resale schema
// Domain membership and inclusive numeric bounds decide acceptance

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
    fn valid_inputs_are_accepted(input in arbitrary_valid_input()) {
        let schema = hdb::resale_schema().unwrap();
        prop_assert!(schema.validate(&input).is_ok());
    }

    #[test]
    fn out_of_range_area_is_rejected(
        input in arbitrary_valid_input(),
        area in prop_oneof![-1.0e6f64..29.999, 200.001f64..1.0e6],
    ) {
        let schema = hdb::resale_schema().unwrap();
        let err = schema
            .validate(&input.with("floor_area_sqm", area))
            .unwrap_err();
        prop_assert_eq!(err.field.as_str(), "floor_area_sqm");
        let is_out_of_range = matches!(err.reason, ValidationReason::OutOfRange { .. });
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn unlisted_towns_are_rejected(
        input in arbitrary_valid_input(),
        town in "[A-Z ]{1,20}",
    ) {
        prop_assume!(!TOWNS.contains(&town.as_str()));
        let schema = hdb::resale_schema().unwrap();
        let err = schema.validate(&input.with("town", town.clone())).unwrap_err();
        prop_assert_eq!(err.field.as_str(), "town");
        prop_assert_eq!(err.reason, ValidationReason::UnknownCategory { value: town });
    }

    #[test]
    fn validation_is_deterministic(input in arbitrary_valid_input(), lease in 0.0f64..150.0) {
        let schema = hdb::resale_schema().unwrap();
        let input = input.with("remaining_lease_year", lease);
        prop_assert_eq!(schema.validate(&input), schema.validate(&input));
    }
}

#[test]
fn floor_area_boundaries() {
    let schema = hdb::resale_schema().unwrap();
    for area in [30, 200] {
        assert!(schema
            .validate(&hdb::default_input().with("floor_area_sqm", area))
            .is_ok());
    }
    for area in [29, 201] {
        let err = schema
            .validate(&hdb::default_input().with("floor_area_sqm", area))
            .unwrap_err();
        assert_eq!(err.field, "floor_area_sqm");
    }
}

#[test]
fn atlantis_is_not_a_town() {
    let schema = hdb::resale_schema().unwrap();
    let err = schema
        .validate(&hdb::default_input().with("town", "ATLANTIS"))
        .unwrap_err();
    assert_eq!(err.field, "town");
    assert_eq!(
        err.reason,
        ValidationReason::UnknownCategory {
            value: "ATLANTIS".to_string()
        }
    );
}
