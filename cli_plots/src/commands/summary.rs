use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use common::monthly::{MonthLayout, MonthlyStats, Quantity};

use super::LayoutArg;
use super::monthly::load_monthly_stats;
use crate::utils::config::PlotSettings;

#[cfg(test)]
mod tests;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// モデル出力ファイルパス
    pub output_file: PathBuf,

    /// 月別ベクトルの並べ方
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// 出力形式
    #[arg(long, value_enum, default_value = "text")]
    pub format: SummaryFormat,
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum SummaryFormat {
    Text,
    Json,
}

/// One month of aggregates, flattened for printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: u32,
    pub rows: usize,
    pub qstar: f64,
    pub qh: f64,
    pub qe: f64,
    pub qs: f64,
    pub qf: f64,
    pub precip: f64,
    pub water_use: f64,
    pub storage_change: f64,
    pub evap: f64,
    pub runoff: f64,
}

pub fn run_summary(args: SummaryArgs) -> Result<()> {
    let settings = PlotSettings::load()?;
    let layout = args.layout.map(MonthLayout::from).unwrap_or(settings.layout);

    let stats = load_monthly_stats(&args.output_file, None, layout)?;
    let rows = month_summaries(&stats);

    match args.format {
        SummaryFormat::Text => print!("{}", format_text_table(&rows)),
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

pub fn month_summaries(stats: &MonthlyStats) -> Vec<MonthSummary> {
    (0..stats.len())
        .map(|i| MonthSummary {
            month: stats.months[i],
            rows: stats.row_counts[i],
            qstar: stats.qstar[i],
            qh: stats.qh[i],
            qe: stats.qe[i],
            qs: stats.qs[i],
            qf: stats.qf[i],
            precip: stats.precip[i],
            water_use: stats.water_use[i],
            storage_change: stats.storage_change[i],
            evap: stats.evap[i],
            runoff: stats.runoff[i],
        })
        .collect()
}

pub fn format_text_table(rows: &[MonthSummary]) -> String {
    let mut out = format!("{:>5} {:>6}", "month", "rows");
    for quantity in Quantity::ALL {
        out.push_str(&format!(" {:>14}", quantity.name()));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:>5} {:>6}", row.month, row.rows));
        let values = [
            row.qstar,
            row.qh,
            row.qe,
            row.qs,
            row.qf,
            row.precip,
            row.water_use,
            row.storage_change,
            row.evap,
            row.runoff,
        ];
        for value in values {
            if value.is_nan() {
                out.push_str(&format!(" {:>14}", "-"));
            } else {
                out.push_str(&format!(" {:>14.2}", value));
            }
        }
        out.push('\n');
    }

    out
}
