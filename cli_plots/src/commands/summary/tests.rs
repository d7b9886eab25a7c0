use super::*;
use common::monthly::aggregate_monthly;
use common::table::OutputRecord;

fn stats() -> MonthlyStats {
    let rows = vec![
        OutputRecord {
            qh: 10.0,
            precip: 1.0,
            ..OutputRecord::default()
        },
        OutputRecord {
            qh: 20.0,
            precip: 2.0,
            ..OutputRecord::default()
        },
        OutputRecord {
            qh: 5.0,
            precip: 3.0,
            ..OutputRecord::default()
        },
    ];
    aggregate_monthly(&rows, &[3, 3, 5], MonthLayout::Observed).unwrap()
}

#[test]
fn test_month_summaries() {
    let rows = month_summaries(&stats());

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].month, 3);
    assert_eq!(rows[0].rows, 2);
    assert_eq!(rows[0].qh, 15.0);
    assert_eq!(rows[0].precip, 3.0);
    assert_eq!(rows[1].month, 4);
    assert_eq!(rows[1].rows, 0);
    assert!(rows[1].qh.is_nan());
    assert_eq!(rows[2].qh, 5.0);
}

#[test]
fn test_format_text_table() {
    let table = format_text_table(&month_summaries(&stats()));
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("month"));
    assert!(lines[0].contains("storage_change"));
    assert!(lines[1].trim_start().starts_with('3'));
    assert!(lines[1].contains("15.00"));
    // 行のない月の平均は "-"
    assert!(lines[2].contains(" -"));
}

#[test]
fn test_format_text_table_columns_are_aligned() {
    let table = format_text_table(&month_summaries(&stats()));

    // month(5) + rows(6) + 10 列 × 14 桁、区切りの空白込み
    let width = 5 + 1 + 6 + Quantity::ALL.len() * 15;
    for line in table.lines() {
        assert_eq!(line.len(), width, "misaligned line: {:?}", line);
    }
    assert!(table.ends_with('\n'));
}

#[test]
fn test_month_summary_json_uses_null_for_nan() {
    let json = serde_json::to_value(month_summaries(&stats())).unwrap();
    assert_eq!(json[0]["month"], 3);
    assert_eq!(json[0]["precip"], 3.0);
    assert!(json[1]["qh"].is_null());
}
