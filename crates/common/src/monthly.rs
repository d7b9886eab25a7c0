//! Monthly aggregation of model output.
//!
//! Flux-type quantities are averaged and flow-type quantities are summed
//! over every row whose month number matches. Rows from the same month of
//! different years are pooled.

use std::fmt;
use std::str::FromStr;

use logging::{DEFAULT, debug, o};
use serde::{Deserialize, Serialize};

use crate::dectime::{calendar_stamps, make_dectime};
use crate::error::TableError;
use crate::table::OutputRecord;

/// How aggregate vectors are indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthLayout {
    /// Minimum to maximum observed month; index 0 is the minimum month.
    #[default]
    Observed,
    /// Always twelve entries; index is month - 1.
    Calendar,
}

impl fmt::Display for MonthLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthLayout::Observed => write!(f, "observed"),
            MonthLayout::Calendar => write!(f, "calendar"),
        }
    }
}

impl FromStr for MonthLayout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "observed" => Ok(MonthLayout::Observed),
            "calendar" => Ok(MonthLayout::Calendar),
            other => Err(anyhow::anyhow!(
                "Unknown month layout: {}. Expected observed or calendar",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Mean,
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Qstar,
    Qh,
    Qe,
    Qs,
    Qf,
    Precip,
    WaterUse,
    StorageChange,
    Evap,
    Runoff,
}

impl Quantity {
    pub const ALL: [Quantity; 10] = [
        Quantity::Qstar,
        Quantity::Qh,
        Quantity::Qe,
        Quantity::Qs,
        Quantity::Qf,
        Quantity::Precip,
        Quantity::WaterUse,
        Quantity::StorageChange,
        Quantity::Evap,
        Quantity::Runoff,
    ];

    pub fn aggregation(self) -> Aggregation {
        match self {
            Quantity::Qstar | Quantity::Qh | Quantity::Qe | Quantity::Qs | Quantity::Qf => {
                Aggregation::Mean
            }
            Quantity::Precip
            | Quantity::WaterUse
            | Quantity::StorageChange
            | Quantity::Evap
            | Quantity::Runoff => Aggregation::Sum,
        }
    }

    pub fn value(self, record: &OutputRecord) -> f64 {
        match self {
            Quantity::Qstar => record.qstar,
            Quantity::Qh => record.qh,
            Quantity::Qe => record.qe,
            Quantity::Qs => record.qs,
            Quantity::Qf => record.qf,
            Quantity::Precip => record.precip,
            Quantity::WaterUse => record.water_use,
            Quantity::StorageChange => record.storage_change,
            Quantity::Evap => record.evap,
            Quantity::Runoff => record.runoff,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quantity::Qstar => "qstar",
            Quantity::Qh => "qh",
            Quantity::Qe => "qe",
            Quantity::Qs => "qs",
            Quantity::Qf => "qf",
            Quantity::Precip => "precip",
            Quantity::WaterUse => "water_use",
            Quantity::StorageChange => "storage_change",
            Quantity::Evap => "evap",
            Quantity::Runoff => "runoff",
        }
    }
}

/// Aggregate vectors, all indexed alike; `months[i]` names entry `i`.
///
/// A month inside the layout with no rows has a `NaN` mean and a zero sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub layout: MonthLayout,
    pub months: Vec<u32>,
    pub row_counts: Vec<usize>,
    pub qstar: Vec<f64>,
    pub qh: Vec<f64>,
    pub qe: Vec<f64>,
    pub qs: Vec<f64>,
    pub qf: Vec<f64>,
    pub precip: Vec<f64>,
    pub water_use: Vec<f64>,
    pub storage_change: Vec<f64>,
    pub evap: Vec<f64>,
    pub runoff: Vec<f64>,
}

impl MonthlyStats {
    fn with_months(layout: MonthLayout, months: Vec<u32>) -> Self {
        let n = months.len();
        Self {
            layout,
            months,
            row_counts: vec![0; n],
            qstar: vec![0.0; n],
            qh: vec![0.0; n],
            qe: vec![0.0; n],
            qs: vec![0.0; n],
            qf: vec![0.0; n],
            precip: vec![0.0; n],
            water_use: vec![0.0; n],
            storage_change: vec![0.0; n],
            evap: vec![0.0; n],
            runoff: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn series(&self, quantity: Quantity) -> &[f64] {
        match quantity {
            Quantity::Qstar => &self.qstar,
            Quantity::Qh => &self.qh,
            Quantity::Qe => &self.qe,
            Quantity::Qs => &self.qs,
            Quantity::Qf => &self.qf,
            Quantity::Precip => &self.precip,
            Quantity::WaterUse => &self.water_use,
            Quantity::StorageChange => &self.storage_change,
            Quantity::Evap => &self.evap,
            Quantity::Runoff => &self.runoff,
        }
    }

    fn series_mut(&mut self, quantity: Quantity) -> &mut Vec<f64> {
        match quantity {
            Quantity::Qstar => &mut self.qstar,
            Quantity::Qh => &mut self.qh,
            Quantity::Qe => &mut self.qe,
            Quantity::Qs => &mut self.qs,
            Quantity::Qf => &mut self.qf,
            Quantity::Precip => &mut self.precip,
            Quantity::WaterUse => &mut self.water_use,
            Quantity::StorageChange => &mut self.storage_change,
            Quantity::Evap => &mut self.evap,
            Quantity::Runoff => &mut self.runoff,
        }
    }

    /// Entry index of a month number, if the layout holds it.
    pub fn index_of(&self, month: u32) -> Option<usize> {
        self.months.iter().position(|&m| m == month)
    }
}

/// Aggregates `rows` by the month number given for each row.
pub fn aggregate_monthly(
    rows: &[OutputRecord],
    months: &[u32],
    layout: MonthLayout,
) -> Result<MonthlyStats, TableError> {
    if rows.is_empty() {
        return Err(TableError::EmptyTable);
    }
    if rows.len() != months.len() {
        return Err(TableError::MonthCountMismatch {
            rows: rows.len(),
            months: months.len(),
        });
    }

    let (min_month, max_month) = months
        .iter()
        .fold((u32::MAX, u32::MIN), |(lo, hi), &m| (lo.min(m), hi.max(m)));

    let month_numbers: Vec<u32> = match layout {
        MonthLayout::Observed => (min_month..=max_month).collect(),
        MonthLayout::Calendar => (1..=12).collect(),
    };
    let mut stats = MonthlyStats::with_months(layout, month_numbers);

    for (record, &month) in rows.iter().zip(months) {
        let Some(index) = stats.index_of(month) else {
            continue;
        };
        stats.row_counts[index] += 1;
        for quantity in Quantity::ALL {
            stats.series_mut(quantity)[index] += quantity.value(record);
        }
    }

    for index in 0..stats.len() {
        let count = stats.row_counts[index];
        for quantity in Quantity::ALL {
            if quantity.aggregation() == Aggregation::Mean {
                // 0 行の月は NaN（numpy の空配列 mean と同じ）
                stats.series_mut(quantity)[index] /= count as f64;
            }
        }
    }

    let log = DEFAULT.new(o!("function" => "aggregate_monthly"));
    debug!(log, "aggregated monthly statistics";
        "rows" => rows.len(),
        "layout" => %layout,
        "first_month" => stats.months.first().copied(),
        "last_month" => stats.months.last().copied()
    );

    Ok(stats)
}

/// Derives each row's month from its decimal time, then aggregates.
pub fn monthly_statistics(
    rows: &[OutputRecord],
    layout: MonthLayout,
) -> Result<MonthlyStats, TableError> {
    let dectime = make_dectime(rows)?;
    let months: Vec<u32> = calendar_stamps(&dectime)?
        .into_iter()
        .map(|stamp| stamp.month)
        .collect();
    aggregate_monthly(rows, &months, layout)
}
