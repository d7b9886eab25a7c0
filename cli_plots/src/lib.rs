pub mod commands;
pub mod plot;
pub mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[clap(name = "suews_plot")]
#[clap(about = "CLI tool for plotting SUEWS energy and water balance output")]
#[clap(version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 放射・熱フラックス・LAI/降水の時系列
    Basic(commands::basic::BasicArgs),
    /// 月別エネルギー収支・水収支
    Monthly(commands::monthly::MonthlyArgs),
    /// 月別集計値の表示
    Summary(commands::summary::SummaryArgs),
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Basic(args) => commands::basic::run_basic(args),
        Commands::Monthly(args) => commands::monthly::run_monthly(args),
        Commands::Summary(args) => commands::summary::run_summary(args),
    }
}
