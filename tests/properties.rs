use proptest::prelude::*;

use csv_demographics::{
    clean::{clean_data, normalize_gender_column},
    data::{Cell, MISSING_SENTINEL, is_null_token},
    frame::Table,
    transform::transform_data,
};

fn gender_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("M".to_string()),
        Just("m".to_string()),
        Just("F".to_string()),
        Just("f".to_string()),
        Just("Male".to_string()),
        Just("Female".to_string()),
        Just(String::new()),
        "[A-Za-z]{1,6}",
    ]
}

fn age_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100).prop_map(|age| age.to_string()),
        Just(String::new()),
        Just("unknown".to_string()),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        (gender_strategy(), age_strategy(), "[a-z]{0,4}")
            .prop_map(|(gender, age, occupation)| vec![gender, age, occupation]),
        0..40,
    )
}

fn build(rows: &[Vec<String>]) -> Table {
    Table::from_records(&["Gender", "Age", "Occupation"], rows.to_vec()).expect("table")
}

proptest! {
    #[test]
    fn row_count_survives_clean_and_transform(rows in rows_strategy()) {
        let mut table = build(&rows);
        clean_data(&mut table).unwrap();
        prop_assert_eq!(table.row_count(), rows.len());
        transform_data(&mut table).unwrap();
        prop_assert_eq!(table.row_count(), rows.len());
    }

    #[test]
    fn gender_normalization_is_idempotent(rows in rows_strategy()) {
        let mut table = build(&rows);
        clean_data(&mut table).unwrap();
        let snapshot = table.clone();
        prop_assert_eq!(normalize_gender_column(&mut table).unwrap(), 0);
        prop_assert_eq!(table, snapshot);
    }

    #[test]
    fn originally_missing_cells_hold_the_sentinel(rows in rows_strategy()) {
        let mut table = build(&rows);
        clean_data(&mut table).unwrap();
        for (row_idx, row) in rows.iter().enumerate() {
            for (column, raw) in ["Gender", "Age", "Occupation"].iter().zip(row) {
                if is_null_token(raw) {
                    prop_assert_eq!(
                        table.cell(row_idx, column),
                        Some(&Cell::Text(MISSING_SENTINEL.to_string()))
                    );
                }
            }
        }
    }

    #[test]
    fn transform_leaves_gaps_only_for_groups_without_ages(rows in rows_strategy()) {
        let mut table = build(&rows);
        clean_data(&mut table).unwrap();
        transform_data(&mut table).unwrap();

        let genders = &table.column("Gender").unwrap().cells;
        let ages = &table.column("Age").unwrap().cells;
        for (gender, age) in genders.iter().zip(ages) {
            if age.is_missing() {
                let group_has_age = genders
                    .iter()
                    .zip(ages)
                    .any(|(g, a)| g == gender && a.as_number().is_some());
                prop_assert!(!group_has_age);
            }
        }
    }
}
