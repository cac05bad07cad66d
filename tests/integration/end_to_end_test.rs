use arrow::array::{Array, Int64Array};
use repair_insight::{clean_repair_data, inner_join, load_table, run, run_stage_a};

use crate::utils::{float_column, standard_fixtures, test_config, write_fixture};

#[test]
fn test_exact_duplicate_scenario() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_fixture(
        dir.path(),
        "Repair Data.csv",
        "Order No,Revenue,Cost\n1,$100,$50\n1,$100,$50\n",
    );
    write_fixture(dir.path(), "Work Order Data.csv", "Order No\n1\n");

    let repairs = load_table(&config.repair_data_path, &config)?;
    let (cleaned, _) = clean_repair_data(&repairs, &config)?;
    assert_eq!(cleaned.num_rows(), 1);

    let outcome = run_stage_a(&config)?;
    assert_eq!(outcome.merged.num_rows(), 1);
    assert_eq!(float_column(&outcome.merged, "Revenue"), vec![Some(100.0)]);
    assert_eq!(float_column(&outcome.merged, "Cost"), vec![Some(50.0)]);

    Ok(())
}

#[test]
fn test_merged_keys_exist_in_both_sources() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = standard_fixtures(dir.path());

    let repairs = load_table(&config.repair_data_path, &config)?;
    let work_orders = load_table(&config.work_order_data_path, &config)?;
    let (cleaned, _) = clean_repair_data(&repairs, &config)?;
    let (merged, report) = inner_join(&cleaned, &work_orders, &config.join_key)?;

    assert!(merged.num_rows() <= cleaned.num_rows().max(work_orders.num_rows()));
    assert_eq!(report.left_rows, cleaned.num_rows());

    let keys = |batch: &repair_insight::RecordBatch| -> Vec<i64> {
        batch
            .column_by_name("Order No")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap()
            .values()
            .to_vec()
    };
    let repair_keys = keys(&cleaned);
    let work_order_keys = keys(&work_orders);
    for key in keys(&merged) {
        assert!(repair_keys.contains(&key));
        assert!(work_order_keys.contains(&key));
    }

    Ok(())
}

#[test]
fn test_full_pipeline() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = standard_fixtures(dir.path());

    let (stage_a, stage_b) = run(&config)?;

    assert_eq!(stage_a.merged.num_rows(), 4);
    let revenue_total: f64 = stage_b.monthly_revenue.iter().map(|m| m.total).sum();
    assert!((revenue_total - (1200.0 + 450.5 + 99.99)).abs() < 1e-9);

    for pair in stage_b.failure_analysis.windows(2) {
        assert!(pair[0].mean_cost >= pair[1].mean_cost);
    }
    for pair in stage_b.fix_analysis.windows(2) {
        assert!(pair[0].mean_cost >= pair[1].mean_cost);
    }

    Ok(())
}
