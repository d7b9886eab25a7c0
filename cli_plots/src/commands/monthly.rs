use anyhow::{Context, Result};
use clap::Args;
use logging::{DEFAULT, info, o};
use std::path::{Path, PathBuf};

use common::monthly::{MonthLayout, MonthlyStats, monthly_statistics};
use common::table::{load_input_table, load_output_table};

use super::LayoutArg;
use crate::plot::monthly::MonthlyFigure;
use crate::plot::{PlotError, parse_size, render_to_file};
use crate::utils::config::PlotSettings;
use crate::utils::file::{check_overwrite, ensure_parent_exists, resolve_output_path};

#[derive(Debug, Args)]
pub struct MonthlyArgs {
    /// モデル出力ファイルパス
    pub output_file: PathBuf,

    /// 気象強制入力ファイルパス（指定時は行数の一致を検証）
    pub input_file: Option<PathBuf>,

    /// 出力画像パス（拡張子 .svg なら SVG）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 画像サイズ (WIDTHxHEIGHT)
    #[arg(long)]
    pub size: Option<String>,

    /// 月別ベクトルの並べ方
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// 既存ファイルを強制上書き
    #[arg(long)]
    pub force: bool,
}

pub fn run_monthly(args: MonthlyArgs) -> Result<()> {
    let log = DEFAULT.new(o!("function" => "run_monthly"));
    let settings = PlotSettings::load()?;

    let (width, height) = parse_size(args.size.as_deref().unwrap_or(&settings.size))?;
    let layout = args.layout.map(MonthLayout::from).unwrap_or(settings.layout);
    let output_path = resolve_output_path(
        args.output.as_deref(),
        &settings.output_dir,
        &args.output_file,
        "monthly",
    );
    check_overwrite(&output_path, args.force)?;

    let stats = load_monthly_stats(&args.output_file, args.input_file.as_deref(), layout)?;
    let figure = MonthlyFigure::new(&stats)?;
    info!(log, "rendering monthly plot";
        "months" => stats.len(),
        "layout" => %layout,
        "output" => %output_path.display()
    );

    ensure_parent_exists(&output_path)?;
    render_to_file(&figure, &output_path, (width, height))
        .with_context(|| format!("Failed to render {}", output_path.display()))?;

    println!("✅ Plot generated: {}", output_path.display());
    Ok(())
}

/// Loads the output table and aggregates it, checking row alignment with
/// the forcing table when one is given.
pub fn load_monthly_stats(
    output_file: &Path,
    input_file: Option<&Path>,
    layout: MonthLayout,
) -> Result<MonthlyStats> {
    let output = load_output_table(output_file)
        .with_context(|| format!("Failed to load output table: {}", output_file.display()))?;

    if let Some(input_file) = input_file {
        let input = load_input_table(input_file)
            .with_context(|| format!("Failed to load input table: {}", input_file.display()))?;
        if input.len() != output.len() {
            return Err(PlotError::RowCountMismatch {
                output: output.len(),
                input: input.len(),
            }
            .into());
        }
    }

    Ok(monthly_statistics(&output, layout)?)
}
