//! CLI commands and interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contact-points")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display information about a label volume
    Info {
        /// Path to the JSON volume
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Detect contacts between all touching labels
    Detect {
        /// Path to the JSON volume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Neighbor connectivity (6, 18 or 26)
        #[arg(short, long, default_value = "6")]
        connectivity: i64,

        /// Record the voxel coordinate of every contact
        #[arg(long)]
        coordinates: bool,

        /// Scan slabs on all cores
        #[arg(long)]
        parallel: bool,

        /// Number of slabs for parallel scans, implies --parallel (0 = one per thread)
        #[arg(long, default_value = "0")]
        slabs: usize,

        /// Output JSON report path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output VTU file of contact voxels (implies --coordinates)
        #[arg(long, value_name = "FILE")]
        vtk: Option<PathBuf>,
    },

    /// List contact points between two specific labels
    Pair {
        /// Path to the JSON volume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// First label
        #[arg(long)]
        label1: u64,

        /// Second label
        #[arg(long)]
        label2: u64,

        /// Neighbor connectivity (6, 18 or 26)
        #[arg(short, long, default_value = "6")]
        connectivity: i64,

        /// Output JSON report path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output VTU file with one line per contact point
        #[arg(long, value_name = "FILE")]
        vtk: Option<PathBuf>,
    },

    /// Batch analysis of several volumes
    Analyze {
        /// Volumes to analyze (format: "a.json,b.json:26")
        #[arg(long)]
        jobs: Option<String>,

        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
    },
}
