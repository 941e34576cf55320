#[cfg(test)]
mod tests {
    use pantry_planner::units::{
        best_display_unit, canonicalize_unit, convert_quantity, CanonicalUnit, MeasurementSystem,
        UnitKind,
    };
    use pantry_planner::{normalize_ingredient_name, parse_ingredient_list, parse_ingredient_string};
    use rust_decimal_macros::dec;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_canonicalize_is_idempotent_over_aliases() {
        init_logging();
        for alias in [
            "cups", "tablespoons", "tsp.", "ML", "litres", "Grams", "KG", "ounces", "lbs",
            "pieces", "doz", "pinches", "cloves", "cans", "jars", "sprigs", "bunches",
        ] {
            let once = canonicalize_unit(alias);
            let twice = canonicalize_unit(once.token());
            assert_eq!(once, twice, "alias {}", alias);
        }
    }

    #[test]
    fn test_identity_conversion_for_every_canonical_unit() {
        init_logging();
        let units = [
            CanonicalUnit::Cup,
            CanonicalUnit::Tbsp,
            CanonicalUnit::Tsp,
            CanonicalUnit::Ml,
            CanonicalUnit::L,
            CanonicalUnit::G,
            CanonicalUnit::Kg,
            CanonicalUnit::Oz,
            CanonicalUnit::Lb,
            CanonicalUnit::Piece,
            CanonicalUnit::Dozen,
            CanonicalUnit::Pinch,
            CanonicalUnit::Dash,
            CanonicalUnit::Bunch,
            CanonicalUnit::Clove,
            CanonicalUnit::Can,
            CanonicalUnit::Jar,
            CanonicalUnit::Sprig,
            CanonicalUnit::ToTaste,
        ];
        for unit in units {
            assert_eq!(convert_quantity(dec!(7), &unit, &unit), Some(dec!(7)));
        }
    }

    #[test]
    fn test_round_trip_conversions_within_tolerance() {
        init_logging();
        let pairs = [
            (CanonicalUnit::Cup, CanonicalUnit::Tbsp),
            (CanonicalUnit::Tsp, CanonicalUnit::L),
            (CanonicalUnit::Oz, CanonicalUnit::Kg),
            (CanonicalUnit::Lb, CanonicalUnit::G),
            (CanonicalUnit::Dozen, CanonicalUnit::Piece),
        ];
        for (a, b) in pairs {
            let q = dec!(2.5);
            let there = convert_quantity(q, &a, &b).unwrap();
            let back = convert_quantity(there, &b, &a).unwrap();
            assert!(
                (back - q).abs() < dec!(0.0000001),
                "{} -> {} round trip drifted: {}",
                a,
                b,
                back
            );
        }
    }

    #[test]
    fn test_incompatible_conversions_are_none() {
        init_logging();
        assert_eq!(
            convert_quantity(dec!(1), &CanonicalUnit::Cup, &CanonicalUnit::G),
            None
        );
        assert_eq!(
            convert_quantity(dec!(1), &CanonicalUnit::Piece, &CanonicalUnit::Ml),
            None
        );
    }

    #[test]
    fn test_common_line_shapes() {
        init_logging();
        let line = parse_ingredient_string("2 cups flour");
        assert_eq!(line.quantity, Some(dec!(2)));
        assert_eq!(line.unit, Some(CanonicalUnit::Cup));
        assert_eq!(line.name, "flour");

        let line = parse_ingredient_string("1 1/2 cups milk");
        assert_eq!(line.quantity, Some(dec!(1.5)));
        assert_eq!(line.unit, Some(CanonicalUnit::Cup));
        assert_eq!(line.name, "milk");

        let line = parse_ingredient_string("1½ cups flour");
        assert_eq!(line.quantity, Some(dec!(1.5)));
        assert_eq!(line.name, "flour");

        let line = parse_ingredient_string("2-3 cloves garlic");
        assert_eq!(line.quantity, Some(dec!(3)));
        assert_eq!(line.unit, Some(CanonicalUnit::Clove));
        assert_eq!(line.name, "garlic");

        let line = parse_ingredient_string("3 eggs");
        assert_eq!(line.quantity, Some(dec!(3)));
        assert_eq!(line.unit, Some(CanonicalUnit::Piece));
        assert_eq!(line.name, "eggs");

        let line = parse_ingredient_string("salt to taste");
        assert_eq!(line.quantity, None);
        assert_eq!(line.unit, Some(CanonicalUnit::ToTaste));
        assert_eq!(line.name, "salt");

        let line = parse_ingredient_string("1 cup flour (sifted)");
        assert_eq!(line.notes.as_deref(), Some("sifted"));
    }

    #[test]
    fn test_unknown_unit_token_passes_through() {
        init_logging();
        let unit = canonicalize_unit("handful");
        assert_eq!(unit, CanonicalUnit::Other("handful".to_string()));
        assert_eq!(unit.kind(), UnitKind::Other);
    }

    #[test]
    fn test_whole_block_parses_line_by_line() {
        init_logging();
        let block = "2 cups flour\n1 tsp baking soda\n3 eggs\nsalt to taste\n";
        let lines = parse_ingredient_list(block);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].unit, Some(CanonicalUnit::Tsp));
        assert_eq!(lines[3].unit, Some(CanonicalUnit::ToTaste));
    }

    #[test]
    fn test_normalizer_produces_stable_dedup_keys() {
        init_logging();
        let a = normalize_ingredient_name("2 cups chopped fresh basil");
        let b = normalize_ingredient_name("1 bunch basil");
        assert_eq!(a, "basil");
        assert_eq!(b, "basil");
        assert_eq!(normalize_ingredient_name(&a), a);
    }

    #[test]
    fn test_display_unit_selection_for_both_systems() {
        init_logging();
        // 473.176 ml reads as 2 cups in the US and 473.18 ml in metric.
        let (qty, unit) = best_display_unit(dec!(473.176), UnitKind::Volume, MeasurementSystem::Us);
        assert_eq!((qty, unit), (dec!(2), CanonicalUnit::Cup));

        let (qty, unit) =
            best_display_unit(dec!(473.176), UnitKind::Volume, MeasurementSystem::Metric);
        assert_eq!((qty, unit), (dec!(473.176), CanonicalUnit::Ml));

        let (qty, unit) = best_display_unit(dec!(907.184), UnitKind::Weight, MeasurementSystem::Us);
        assert_eq!(unit, CanonicalUnit::Lb);
        assert_eq!(qty, dec!(2));
    }
}
