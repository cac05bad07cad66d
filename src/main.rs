use std::path::Path;

use anyhow::Context;
use log::info;
use repair_insight::{PipelineConfig, run};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional JSON configuration file as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => PipelineConfig::default(),
    };

    info!(
        "Merging {} with {} into {}",
        config.repair_data_path.display(),
        config.work_order_data_path.display(),
        config.merged_data_path.display()
    );

    let (stage_a, stage_b) = run(&config)?;

    info!(
        "Pipeline complete: {} merged rows, {} months of revenue, {} charts",
        stage_a.merged.num_rows(),
        stage_b.monthly_revenue.len(),
        stage_b.charts.len()
    );
    Ok(())
}
