//! The two pipeline stages.
//!
//! Stage A cleans the repair records, joins them with the work orders and
//! writes the merged CSV. Stage B reads that CSV back and reports on it. The
//! stages share nothing but the merged file.

use std::path::PathBuf;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use log::info;

use crate::analysis::summary::summaries_to_record_batch;
use crate::analysis::temporal::monthly_revenue_to_record_batch;
use crate::analysis::{
    ConditionPivot, ConditionSummary, MonthlyRevenue, condition_pivot, cost_vs_hours,
    failure_analysis, fix_analysis, monthly_revenue,
};
use crate::charts::render_all;
use crate::cleaning::{CleaningReport, clean_repair_data, missing_value_counts};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::merge::{JoinReport, inner_join};
use crate::reader::{load_table, read_csv, write_csv};
use crate::utils::arrow::trim_column_names;
use crate::utils::logging::{print_head, print_missing_values, print_record_batch, print_schema_info};

/// What stage A produced
#[derive(Debug, Clone)]
pub struct StageAOutcome {
    pub cleaning: CleaningReport,
    pub join: JoinReport,
    pub merged: RecordBatch,
    pub merged_path: PathBuf,
}

/// What stage B computed
#[derive(Debug, Clone)]
pub struct StageBOutcome {
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub pivot: ConditionPivot,
    pub failure_analysis: Vec<ConditionSummary>,
    pub fix_analysis: Vec<ConditionSummary>,
    pub charts: Vec<PathBuf>,
}

/// Stage A: load, clean, join and persist
pub fn run_stage_a(config: &PipelineConfig) -> Result<StageAOutcome> {
    let start = Instant::now();

    let repairs = load_table(&config.repair_data_path, config)?;
    let work_orders = load_table(&config.work_order_data_path, config)?;

    info!("Identified primary key: {}", config.join_key);

    print_schema_info("Repair data", &repairs);
    print_head(&repairs, config.preview_rows)?;
    print_missing_values("Missing Values Before Cleaning", &missing_value_counts(&repairs));

    let (cleaned, cleaning) = clean_repair_data(&repairs, config)?;
    print!("{}", cleaning.summary());

    let (merged, join) = inner_join(&cleaned, &work_orders, &config.join_key)?;

    print_schema_info("Merged data", &merged);
    print_head(&merged, config.preview_rows)?;

    write_csv(&config.merged_data_path, &merged)?;
    println!("Merged data saved to '{}'.", config.merged_data_path.display());

    info!("Stage A finished in {:?}", start.elapsed());
    Ok(StageAOutcome {
        cleaning,
        join,
        merged,
        merged_path: config.merged_data_path.clone(),
    })
}

/// Stage B: load the merged file, aggregate, chart and print
pub fn run_stage_b(config: &PipelineConfig) -> Result<StageBOutcome> {
    let start = Instant::now();

    let merged = read_csv(
        &config.merged_data_path,
        config.csv_infer_records,
        &config.text_columns(),
    )?;
    let merged = trim_column_names(&merged)?;

    let columns: Vec<String> = merged
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    println!("Column Names: {columns:?}");
    print_head(&merged, config.preview_rows)?;

    let monthly = monthly_revenue(&merged, config)?;
    let pivot = condition_pivot(&merged, config)?;
    let failures = failure_analysis(&merged, config)?;
    let fixes = fix_analysis(&merged, config)?;

    let charts = if config.render_charts {
        let points = cost_vs_hours(&merged, config)?;
        render_all(&config.chart_dir, &monthly, &points, &pivot)?
    } else {
        Vec::new()
    };

    println!("Monthly Revenue:");
    print_record_batch(&monthly_revenue_to_record_batch(&monthly)?)?;

    println!("Failure Condition Analysis:");
    print_record_batch(&summaries_to_record_batch(
        &config.columns.failure_condition,
        &failures,
    )?)?;

    println!("Fix Condition Analysis:");
    print_record_batch(&summaries_to_record_batch(&config.columns.fix_condition, &fixes)?)?;

    if !pivot.is_empty() {
        println!("Average Cost by Failure and Fix Condition:");
        print_record_batch(&pivot.to_record_batch(&config.columns.failure_condition)?)?;
    }

    info!("Stage B finished in {:?}", start.elapsed());
    Ok(StageBOutcome {
        monthly_revenue: monthly,
        pivot,
        failure_analysis: failures,
        fix_analysis: fixes,
        charts,
    })
}

/// Run stage A, then stage B
pub fn run(config: &PipelineConfig) -> Result<(StageAOutcome, StageBOutcome)> {
    let stage_a = run_stage_a(config)?;
    let stage_b = run_stage_b(config)?;
    Ok((stage_a, stage_b))
}
