use clap::Parser;
use log::{error, info};
use lvseg_core::cli::{BatchArgs, Cli, Command, OutputFormat};
use lvseg_core::{
    parse_contour_file, parse_dicom_file, poly_to_mask, save_overlay, ContourSelection,
    DataLoader, InspectReport, LoadPolicy, LoaderConfig, Result, SampleLocator, SummaryReport,
};
use std::fmt::Display;
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let outcome = match &cli.command {
        Command::Summary { base_dir, outer } => run_summary(base_dir, *outer, &cli.format),
        Command::Inspect {
            dicom,
            contour,
            overlay,
        } => run_inspect(dicom, contour, overlay.as_deref(), &cli.format),
        Command::Batches(args) => run_batches(args),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn selection(outer: bool) -> ContourSelection {
    if outer {
        ContourSelection::InnerAndOuter
    } else {
        ContourSelection::InnerOnly
    }
}

fn run_summary(base_dir: &Path, outer: bool, format: &OutputFormat) -> Result<()> {
    info!("Processing directory: {}", base_dir.display());
    let locator = SampleLocator::new(base_dir);
    let links = locator.read_links()?;
    let samples = locator.locate(&links, selection(outer))?;
    let report = SummaryReport::new(base_dir, &links, &samples);
    emit(&report, format);
    Ok(())
}

fn run_inspect(
    dicom: &Path,
    contour: &Path,
    overlay: Option<&Path>,
    format: &OutputFormat,
) -> Result<()> {
    let image = parse_dicom_file(dicom)?;
    let polygon = parse_contour_file(contour)?;
    let mask = poly_to_mask(&polygon, image.columns, image.rows);

    if let Some(path) = overlay {
        save_overlay(&image.pixels, &mask, path)?;
    }

    let report = InspectReport::new(dicom, contour, &image, polygon.len(), &mask);
    emit(&report, format);
    Ok(())
}

fn run_batches(args: &BatchArgs) -> Result<()> {
    let mut config = LoaderConfig::new(args.batch_size)?
        .drop_last(!args.keep_last)
        .with_contours(selection(args.outer))
        .with_load_policy(if args.fail_fast {
            LoadPolicy::FailFast
        } else {
            LoadPolicy::SkipInvalid
        });
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut loader = DataLoader::from_base_dir(&args.base_dir, config)?;
    info!(
        "Dataset size {}, {} batches per epoch",
        loader.size(),
        loader.batches_per_epoch()
    );

    for epoch in 0..args.epochs {
        if epoch > 0 {
            loader.reset();
        }
        for (idx, batch) in loader.epoch().enumerate() {
            let batch = batch?;
            let (n, height, width) = batch.shape();
            let slices: Vec<String> = batch
                .paths
                .iter()
                .map(|p| format!("{}/{}", p.patient_id, p.slice))
                .collect();
            println!(
                "epoch {} batch {}: {}x{}x{} outer={} [{}]",
                epoch,
                idx,
                n,
                height,
                width,
                batch.outer_masks.is_some(),
                slices.join(", ")
            );
        }
    }
    Ok(())
}

#[cfg(feature = "json")]
fn emit<T: Display + serde::Serialize>(report: &T, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize to JSON: {}", e);
                eprintln!("Error: Failed to serialize to JSON: {}", e);
                process::exit(1);
            }
        },
    }
}

#[cfg(not(feature = "json"))]
fn emit<T: Display>(report: &T, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => {
            eprintln!("Error: JSON output requires the 'json' feature");
            eprintln!("Rebuild with: cargo build --features json");
            process::exit(1);
        }
    }
}
