use anyhow::{Context, Result};
use clap::Args;
use logging::{DEFAULT, info, o};
use std::path::{Path, PathBuf};

use common::table::{load_input_table, load_output_table};

use crate::plot::basic::BasicFigure;
use crate::plot::{parse_size, render_to_file};
use crate::utils::config::PlotSettings;
use crate::utils::file::{check_overwrite, ensure_parent_exists, resolve_output_path};

#[derive(Debug, Args)]
pub struct BasicArgs {
    /// モデル出力ファイルパス
    pub output_file: PathBuf,

    /// 気象強制入力ファイルパス（出力ファイルと行が対応していること）
    pub input_file: PathBuf,

    /// 出力画像パス（拡張子 .svg なら SVG）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 画像サイズ (WIDTHxHEIGHT)
    #[arg(long)]
    pub size: Option<String>,

    /// 既存ファイルを強制上書き
    #[arg(long)]
    pub force: bool,
}

pub fn run_basic(args: BasicArgs) -> Result<()> {
    let log = DEFAULT.new(o!("function" => "run_basic"));
    let settings = PlotSettings::load()?;

    let (width, height) = parse_size(args.size.as_deref().unwrap_or(&settings.size))?;
    let output_path = resolve_output_path(
        args.output.as_deref(),
        &settings.output_dir,
        &args.output_file,
        "basic",
    );
    check_overwrite(&output_path, args.force)?;

    let figure = load_basic_figure(&args.output_file, &args.input_file)?;
    info!(log, "rendering basic plot";
        "rows" => figure.dectime.len(),
        "output" => %output_path.display()
    );

    ensure_parent_exists(&output_path)?;
    render_to_file(&figure, &output_path, (width, height))
        .with_context(|| format!("Failed to render {}", output_path.display()))?;

    println!("✅ Plot generated: {}", output_path.display());
    Ok(())
}

pub fn load_basic_figure(output_file: &Path, input_file: &Path) -> Result<BasicFigure> {
    let output = load_output_table(output_file)
        .with_context(|| format!("Failed to load output table: {}", output_file.display()))?;
    let input = load_input_table(input_file)
        .with_context(|| format!("Failed to load input table: {}", input_file.display()))?;

    Ok(BasicFigure::new(&output, &input)?)
}
