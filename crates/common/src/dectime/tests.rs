use super::*;
use crate::table::OutputRecord;

fn record(year: i32, dectime: f64) -> OutputRecord {
    OutputRecord {
        year,
        dectime,
        ..OutputRecord::default()
    }
}

// === jan1_date_number テスト ===

#[test]
fn test_jan1_date_number_epoch() {
    assert_eq!(jan1_date_number(1), Some(1.0));
    assert_eq!(jan1_date_number(2), Some(366.0));
}

#[test]
fn test_jan1_date_number_matches_known_ordinals() {
    // 0001-01-01 を 1 とする序数
    assert_eq!(jan1_date_number(1970), Some(719_163.0));
    assert_eq!(jan1_date_number(2000), Some(730_120.0));
    assert_eq!(jan1_date_number(2012), Some(734_503.0));
}

#[test]
fn test_jan1_date_number_spans_leap_years() {
    let y2012 = jan1_date_number(2012).unwrap();
    let y2013 = jan1_date_number(2013).unwrap();
    let y2014 = jan1_date_number(2014).unwrap();
    assert_eq!(y2013 - y2012, 366.0);
    assert_eq!(y2014 - y2013, 365.0);
}

#[test]
fn test_jan1_date_number_out_of_range() {
    assert_eq!(jan1_date_number(i32::MAX), None);
}

// === make_dectime テスト ===

#[test]
fn test_make_dectime_single_year_deltas() {
    let rows = vec![record(2011, 0.0), record(2011, 0.5), record(2011, 1.0)];
    let base = jan1_date_number(2011).unwrap();

    let dectime = make_dectime(&rows).unwrap();

    assert_eq!(dectime, vec![base, base + 0.5, base + 1.0]);
    assert_eq!(dectime[1] - dectime[0], 0.5);
    assert_eq!(dectime[2] - dectime[1], 0.5);
}

#[test]
fn test_make_dectime_is_continuous_across_years() {
    let rows = vec![record(2011, 364.5), record(2012, 0.25)];

    let dectime = make_dectime(&rows).unwrap();

    assert!(dectime[1] > dectime[0]);
    assert!((dectime[1] - dectime[0] - 0.75).abs() < 1e-9);
}

#[test]
fn test_make_dectime_does_not_apply_leap_correction() {
    // 閏年でもオフセットはそのまま加算される
    let rows = vec![record(2012, 60.0), record(2013, 60.0)];
    let dectime = make_dectime(&rows).unwrap();

    assert_eq!(dectime[0], jan1_date_number(2012).unwrap() + 60.0);
    assert_eq!(dectime[1], jan1_date_number(2013).unwrap() + 60.0);
}

#[test]
fn test_make_dectime_invalid_year() {
    let rows = vec![record(2011, 1.0), record(i32::MAX, 1.0)];
    let err = make_dectime(&rows).unwrap_err();
    assert!(matches!(err, TableError::InvalidYear { row: 1, .. }));
}

#[test]
fn test_make_dectime_empty() {
    assert!(make_dectime(&[]).unwrap().is_empty());
}

// === to_datetime / from_datetime テスト ===

#[test]
fn test_to_datetime_round_trip_reproduces_year_and_offset() {
    let row = record(2012, 100.25);
    let dectime = make_dectime(std::slice::from_ref(&row)).unwrap()[0];

    let datetime = to_datetime(dectime).unwrap();
    let stamp = CalendarStamp::from(datetime);

    assert_eq!(stamp.year, 2012);
    // 2012-01-01 + 100 日 = 2012-04-10 (閏年)
    assert_eq!((stamp.month, stamp.day, stamp.hour), (4, 10, 6));

    let offset = from_datetime(datetime) - jan1_date_number(stamp.year).unwrap();
    assert!((offset - row.dectime).abs() < 1e-6);
}

#[test]
fn test_to_datetime_fraction_carries_into_next_day() {
    let base = jan1_date_number(2015).unwrap();
    // 丸めで翌日 0 時になるケース
    let datetime = to_datetime(base + 0.999_999_999_99).unwrap();
    assert_eq!(datetime.date(), NaiveDate::from_ymd_opt(2015, 1, 2).unwrap());
    assert_eq!(datetime.hour(), 0);
}

#[test]
fn test_to_datetime_rejects_non_finite() {
    assert!(to_datetime(f64::NAN).is_none());
    assert!(to_datetime(f64::INFINITY).is_none());
    assert!(to_datetime(-1.0e12).is_none());
}

#[test]
fn test_from_datetime_half_day() {
    let datetime = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    assert_eq!(from_datetime(datetime), 730_120.5);
}

// === calendar_stamps テスト ===

#[test]
fn test_calendar_stamps_months() {
    let base = jan1_date_number(2011).unwrap();
    let stamps = calendar_stamps(&[base, base + 31.0, base + 59.5]).unwrap();

    let months: Vec<u32> = stamps.iter().map(|s| s.month).collect();
    assert_eq!(months, vec![1, 2, 3]);
    assert_eq!(stamps[2].hour, 12);
}

#[test]
fn test_calendar_stamps_invalid_value() {
    let err = calendar_stamps(&[730_120.0, f64::NAN]).unwrap_err();
    assert!(matches!(err, TableError::InvalidDecimalTime { row: 1, .. }));
}
