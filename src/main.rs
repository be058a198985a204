//! Contact Points CLI Application

use anyhow::{bail, Context, Result};
use clap::Parser;
use contact_points::config::AnalysisConfig;
use contact_points::contact::{
    detect_with_options, find_contact_points, Connectivity, ContactSummary, DetectOptions,
};
use contact_points::io::{
    read_json_volume, write_contact_points_to_vtu, write_contacts_to_vtu, ContactReport,
    PairReport,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Detect {
            input,
            connectivity,
            coordinates,
            parallel,
            slabs,
            output,
            vtk,
        } => {
            let options =
                detect_options(connectivity, coordinates || vtk.is_some(), parallel, slabs)?;
            cmd_detect(&input, &options, output, vtk)
        }
        Commands::Pair {
            input,
            label1,
            label2,
            connectivity,
            output,
            vtk,
        } => cmd_pair(&input, label1, label2, connectivity, output, vtk),
        Commands::Analyze {
            jobs,
            config,
            output,
        } => cmd_analyze(jobs, config, output),
    }
}

/// Build detection options from `detect` flags; an explicit slab count implies a parallel scan
fn detect_options(
    connectivity: i64,
    coordinates: bool,
    parallel: bool,
    slabs: usize,
) -> Result<DetectOptions> {
    Ok(DetectOptions::new(Connectivity::try_from(connectivity)?)
        .with_coordinates(coordinates)
        .with_parallel(parallel || slabs > 0)
        .with_slabs(slabs))
}

fn cmd_info(input: &Path) -> Result<()> {
    println!("Reading volume file: {}", input.display());

    let volume = read_json_volume(input)
        .with_context(|| format!("failed to load volume {}", input.display()))?;
    let counts = volume.label_counts();
    let labeled: u64 = counts.values().sum();

    println!("\n{}", "=".repeat(60));
    println!("VOLUME INFORMATION");
    println!("{}", "=".repeat(60));
    println!();
    println!("  Shape:        {:?}", volume.shape());
    println!("  Voxels:       {}", volume.num_voxels());
    println!("  Labeled:      {}", labeled);
    println!("  Background:   {}", volume.num_voxels() as u64 - labeled);
    println!("  Labels:       {}", counts.len());
    println!();

    if !counts.is_empty() {
        println!("Labels:");
        for (label, count) in &counts {
            println!("  - {}: {} voxels", label, count);
        }
        println!();
    }

    println!("{}", "=".repeat(60));

    Ok(())
}

fn cmd_detect(
    input: &Path,
    options: &DetectOptions,
    output: Option<PathBuf>,
    vtk: Option<PathBuf>,
) -> Result<()> {
    let volume = read_json_volume(input)
        .with_context(|| format!("failed to load volume {}", input.display()))?;
    let table = detect_with_options(&volume, options)?;

    ContactSummary::compute(&table).print_summary();

    if let Some(path) = output {
        ContactReport::new(input.display().to_string(), volume.shape(), options, &table)
            .export(&path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    if let Some(path) = vtk {
        write_contacts_to_vtu(&table, &path, None)?;
        println!("Contact voxels written to {}", path.display());
    }

    Ok(())
}

fn cmd_pair(
    input: &Path,
    label1: u64,
    label2: u64,
    connectivity: i64,
    output: Option<PathBuf>,
    vtk: Option<PathBuf>,
) -> Result<()> {
    let volume = read_json_volume(input)
        .with_context(|| format!("failed to load volume {}", input.display()))?;
    let points = find_contact_points(&volume, label1, label2, connectivity)?;

    println!(
        "{} contact points between labels {} and {}",
        points.len(),
        label1,
        label2
    );

    if let Some(path) = vtk {
        write_contact_points_to_vtu(&points, &path, None)?;
        println!("Contact points written to {}", path.display());
    }

    match output {
        Some(path) => {
            PairReport::new(
                input.display().to_string(),
                label1,
                label2,
                connectivity,
                points,
            )
            .export(&path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => {
            for point in &points {
                println!("  {:?} <-> {:?}", point.first, point.second);
            }
        }
    }

    Ok(())
}

fn cmd_analyze(jobs: Option<String>, config: Option<PathBuf>, output: PathBuf) -> Result<()> {
    let mut config = match (config, jobs) {
        (Some(path), _) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, Some(jobs)) => AnalysisConfig::from_jobs_string(
            output.display().to_string(),
            &jobs,
            DetectOptions::default(),
        )?,
        (None, None) => bail!("either --jobs or --config is required"),
    };
    config.output_dir = output.display().to_string();

    let output_dir = PathBuf::from(&config.output_dir);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let progress = ProgressBar::new(config.jobs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?.progress_chars("=> "),
    );

    for job in &config.jobs {
        progress.set_message(job.input_file.clone());

        let options = job.effective_options(&config.default_options);
        let volume = read_json_volume(&job.input_file)
            .with_context(|| format!("failed to load volume {}", job.input_file))?;
        let table = detect_with_options(&volume, &options)?;

        let report_path = job.report_path(&output_dir);
        ContactReport::new(job.input_file.clone(), volume.shape(), &options, &table)
            .export(&report_path)?;

        if job.write_vtk {
            write_contacts_to_vtu(&table, &report_path.with_extension("vtu"), None)?;
        }

        log::info!(
            "{}: {} label pairs -> {}",
            job.input_file,
            table.len(),
            report_path.display()
        );
        progress.inc(1);
    }

    progress.finish_with_message("done");
    println!(
        "Analyzed {} volumes, results in {}",
        config.jobs.len(),
        output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_detect(args: &[&str]) -> DetectOptions {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Detect {
                connectivity,
                coordinates,
                parallel,
                slabs,
                ..
            } => detect_options(connectivity, coordinates, parallel, slabs).unwrap(),
            _ => panic!("expected detect command"),
        }
    }

    #[test]
    fn test_slabs_imply_parallel() {
        let options = parse_detect(&["contact-points", "detect", "seg.json", "--slabs", "4"]);
        assert!(options.parallel);
        assert_eq!(options.slabs, 4);

        let options = parse_detect(&["contact-points", "detect", "seg.json"]);
        assert!(!options.parallel);
        assert_eq!(options.slabs, 0);

        let options = parse_detect(&[
            "contact-points",
            "detect",
            "seg.json",
            "--parallel",
            "-c",
            "26",
        ]);
        assert!(options.parallel);
        assert_eq!(options.connectivity, Connectivity::TwentySix);
    }

    #[test]
    fn test_detect_options_reject_bad_connectivity() {
        assert!(detect_options(4, false, false, 0).is_err());
    }
}
