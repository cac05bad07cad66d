use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use repair_insight::reader::read_excel;
use repair_insight::{Error, MonthlyRevenue, PipelineConfig, RecordBatch, load_table, run};

use crate::utils::{Cell, test_config, write_workbook};

fn repair_rows() -> Vec<Vec<Cell<'static>>> {
    vec![
        vec![
            Cell::Text("Order No"),
            Cell::Text("Revenue"),
            Cell::Text("Cost"),
            Cell::Text("Failure Condition - Failure Component"),
            Cell::Text("Fix Condition - Fix Component"),
        ],
        vec![
            Cell::Number(1001.0),
            Cell::Text("$1,200"),
            Cell::Number(800.0),
            Cell::Text("Worn - Bearing"),
            Cell::Text("Replace - Bearing"),
        ],
        vec![
            Cell::Number(1002.0),
            Cell::Number(300.5),
            Cell::Number(100.0),
            Cell::Text("Leak - Hose"),
            Cell::Text("Replace - Hose"),
        ],
    ]
}

fn work_order_rows() -> Vec<Vec<Cell<'static>>> {
    vec![
        vec![
            Cell::Text("Order No"),
            Cell::Text("Invoice Date"),
            Cell::Text("Actual Hours"),
        ],
        vec![Cell::Number(1001.0), Cell::Date(2023, 1, 15), Cell::Number(6.5)],
        vec![Cell::Number(1002.0), Cell::Date(2023, 3, 2), Cell::Number(2.0)],
        vec![Cell::Number(2000.0), Cell::Date(2023, 2, 10), Cell::Number(3.0)],
    ]
}

fn xlsx_config(dir: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        repair_data_path: dir.join("Repair Data.xlsx"),
        work_order_data_path: dir.join("Work Order Data.xlsx"),
        ..test_config(dir)
    }
}

#[test]
fn test_pipeline_on_workbooks() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = xlsx_config(dir.path());
    write_workbook(&config.repair_data_path, &[("Repairs", repair_rows())]);
    write_workbook(&config.work_order_data_path, &[("Work Orders", work_order_rows())]);

    let (stage_a, stage_b) = run(&config)?;

    assert_eq!(stage_a.merged.num_rows(), 2);
    assert_eq!(stage_a.join.right_unmatched, 1);

    let month = |m| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
    assert_eq!(
        stage_b.monthly_revenue,
        vec![
            MonthlyRevenue { month: month(1), total: 1200.0 },
            MonthlyRevenue { month: month(2), total: 0.0 },
            MonthlyRevenue { month: month(3), total: 300.5 },
        ]
    );

    Ok(())
}

#[test]
fn test_workbook_column_types() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = xlsx_config(dir.path());
    write_workbook(&config.work_order_data_path, &[("Work Orders", work_order_rows())]);
    write_workbook(&config.repair_data_path, &[("Repairs", repair_rows())]);

    let work_orders = read_excel(&config.work_order_data_path, None)?;
    let schema = work_orders.schema();
    assert_eq!(schema.field(0).data_type(), &DataType::Int64);
    assert_eq!(schema.field(1).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(2).data_type(), &DataType::Float64);

    let dates = work_orders
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(dates.value(0), "2023-01-15");

    // Currency text mixed with numbers stays text for the cleaning step
    let repairs = read_excel(&config.repair_data_path, None)?;
    let revenue = repairs
        .column_by_name("Revenue")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(revenue.value(0), "$1,200");
    assert_eq!(revenue.value(1), "300.5");

    Ok(())
}

#[test]
fn test_sheet_selection() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Repair Data.xlsx");
    write_workbook(
        &path,
        &[
            (
                "Notes",
                vec![
                    vec![Cell::Text("Note"), Cell::Blank, Cell::Text("Note")],
                    vec![Cell::Text("exported"), Cell::Blank, Cell::Text("monthly")],
                ],
            ),
            ("Repairs", repair_rows()),
        ],
    );

    let first = read_excel(&path, None)?;
    let names: Vec<String> = first.schema().fields().iter().map(|f| f.name().clone()).collect();
    assert_eq!(names, vec!["Note", "Unnamed: 1", "Note.1"]);

    let repairs = read_excel(&path, Some("Repairs"))?;
    assert_eq!(repairs.num_rows(), 2);
    assert_eq!(repairs.schema().field(0).name(), "Order No");

    let config = PipelineConfig {
        sheet_name: Some("Repairs".to_string()),
        ..test_config(dir.path())
    };
    assert_eq!(load_table(&path, &config)?.num_columns(), 5);

    assert!(matches!(
        read_excel(&path, Some("Missing")),
        Err(Error::Spreadsheet(_))
    ));

    Ok(())
}

#[test]
fn test_empty_worksheet_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    write_workbook(&path, &[("Sheet1", Vec::new())]);

    let err = read_excel(&path, None).unwrap_err();
    assert!(matches!(err, Error::EmptyWorkbook { .. }));
}

#[test]
fn test_parquet_input() -> repair_insight::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work_orders.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Order No", DataType::Int64, true),
        Field::new("Actual Hours", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![1001, 1002])),
            Arc::new(Float64Array::from(vec![Some(6.5), None])),
        ],
    )
    .unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let loaded = load_table(&path, &test_config(dir.path()))?;
    assert_eq!(loaded.num_rows(), 2);
    assert_eq!(loaded.columns(), batch.columns());
    assert!(loaded.column(1).is_null(1));

    Ok(())
}
