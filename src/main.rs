use cfu::driver::{self, Dataset};
use cfu::errors::{Result, invalid_argument};
use cfu::filter::FilterSpec;
use cfu::input::{Input, Year};
use cfu::workbook;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, info};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{fs, process};

/// Compute the coin-find map view: markers, popups, and facet options.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input workbook (.xlsx) or its JSON rendition (.json)
    infile: PathBuf,
    /// Output file (JSON); stdout if omitted
    #[arg(short, long)]
    outfile: Option<PathBuf>,
    /// Keep only this denomination (label; repeatable)
    #[arg(long = "denomination")]
    denominations: Vec<String>,
    /// Keep only this material (label; repeatable)
    #[arg(long = "material")]
    materials: Vec<String>,
    /// Keep only this mint (label; repeatable)
    #[arg(long = "mint")]
    mints: Vec<String>,
    /// Keep only groups dated strictly within the window: lower bound
    #[arg(long, allow_negative_numbers = true)]
    date_min: Option<Year>,
    /// Keep only groups dated strictly within the window: upper bound
    #[arg(long, allow_negative_numbers = true)]
    date_max: Option<Year>,
    /// Keep only groups with strictly more coins than this
    #[arg(long)]
    number_min: Option<i64>,
    /// Keep only groups with strictly fewer coins than this
    #[arg(long)]
    number_max: Option<i64>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn window<T>(min: Option<T>, max: Option<T>, what: &str) -> Result<Option<(T, T)>> {
    match (min, max) {
        (None, None) => Ok(None),
        (Some(min), Some(max)) => Ok(Some((min, max))),
        _ => Err(invalid_argument(format!(
            "{what} must be given together or not at all"
        ))),
    }
}

fn build_spec(args: &Args) -> Result<FilterSpec> {
    Ok(FilterSpec {
        denominations: args.denominations.clone(),
        materials: args.materials.clone(),
        mints: args.mints.clone(),
        dates: window(args.date_min, args.date_max, "--date-min and --date-max")?,
        counts: window(
            args.number_min,
            args.number_max,
            "--number-min and --number-max",
        )?,
    })
}

fn load_input(path: &Path) -> Result<Input> {
    match path.extension().and_then(OsStr::to_str) {
        Some("json") => {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        }
        _ => workbook::load(path),
    }
}

fn run(args: &Args) -> Result<()> {
    info!("read: {}", args.infile.display());
    let input = load_input(&args.infile)?;
    let dataset = Dataset::build(&input)?;
    let spec = build_spec(args)?;
    let view = driver::compute_view(&dataset, &spec);
    let json = serde_json::to_string_pretty(&view)?;
    match &args.outfile {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match run(&args) {
        Ok(()) => (),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}
