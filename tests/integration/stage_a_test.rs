use arrow::array::{Array, Int64Array, StringArray};
use repair_insight::{Error, duplicate_row_count, read_csv, run_stage_a};

use crate::utils::{float_column, standard_fixtures, test_config, write_fixture, WORK_ORDER_CSV};

#[test]
fn test_stage_a_cleans_and_merges() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = standard_fixtures(dir.path());

    let outcome = run_stage_a(&config)?;

    assert_eq!(outcome.cleaning.rows_before, 6);
    assert_eq!(outcome.cleaning.rows_after, 5);
    assert_eq!(outcome.cleaning.duplicates_before, 1);
    assert_eq!(outcome.cleaning.duplicates_after, 0);

    assert_eq!(outcome.join.output_rows, 4);
    assert_eq!(outcome.join.left_unmatched, 1);
    assert_eq!(outcome.join.right_unmatched, 1);
    assert_eq!(outcome.merged.num_rows(), 4);

    let orders = outcome
        .merged
        .column_by_name("Order No")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(orders.values().to_vec(), vec![1001, 1002, 1003, 1004]);

    assert_eq!(
        float_column(&outcome.merged, "Revenue"),
        vec![Some(1200.0), Some(450.5), Some(99.99), Some(2000.0)]
    );

    // The empty complaint of order 1002 was forward-filled
    let complaints = outcome
        .merged
        .column_by_name("Complaint")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(complaints.value(1), "Engine noise");
    assert_eq!(complaints.null_count(), 0);

    Ok(())
}

#[test]
fn test_stage_a_writes_merged_file() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = standard_fixtures(dir.path());

    // A stale artifact is replaced
    write_fixture(dir.path(), "merged_data.csv", "stale\n1\n2\n3\n4\n5\n6\n7\n");

    let outcome = run_stage_a(&config)?;
    assert_eq!(outcome.merged_path, config.merged_data_path);

    let written = read_csv(&config.merged_data_path, 0, &[])?;
    assert_eq!(written.num_rows(), 4);
    assert_eq!(duplicate_row_count(&written)?, 0);

    let names: Vec<String> = written
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    assert_eq!(
        names,
        vec![
            "Order No",
            "Revenue",
            "Cost",
            "Complaint",
            "Failure Condition - Failure Component",
            "Fix Condition - Fix Component",
            "Invoice Date",
            "Actual Hours",
        ]
    );
    assert_eq!(
        float_column(&written, "Cost"),
        vec![Some(800.0), Some(300.25), Some(40.0), Some(1500.0)]
    );

    Ok(())
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_fixture(dir.path(), "Work Order Data.csv", WORK_ORDER_CSV);

    let err = run_stage_a(&config).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
    assert!(!config.merged_data_path.exists());
}

#[test]
fn test_malformed_currency_reports_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_fixture(
        dir.path(),
        "Repair Data.csv",
        "Order No,Revenue,Cost\n1,$100,$50\n2,\"$1,23a\",$10\n",
    );
    write_fixture(dir.path(), "Work Order Data.csv", "Order No\n1\n2\n");

    let err = run_stage_a(&config).unwrap_err();
    match err {
        Error::Parse { column, row, value, .. } => {
            assert_eq!(column, "Revenue");
            assert_eq!(row, 1);
            assert_eq!(value, "$1,23a");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.merged_data_path.exists());
}
