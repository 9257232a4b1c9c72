//! PPInet CLI — build a filtered, annotated PPI subgraph for visualization.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use ppinet_core::config::{parse_edge_schema, PipelineConfig};
use ppinet_core::output::write_output;
use ppinet_core::pipeline;

#[derive(Parser)]
#[command(
    name = "ppinet",
    about = "PPInet - Extract an annotated candidate subgraph from a PPI network"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the candidate subgraph and write a Cytoscape JSON file
    Build {
        /// Path to the network edge list
        #[arg(short, long)]
        network: PathBuf,

        /// Candidate gene list: file or directory of files
        #[arg(short, long)]
        candidate: PathBuf,

        /// Annotation gene lists: file or directory of files
        #[arg(short, long)]
        annotations: Option<PathBuf>,

        /// Output JSON file path
        #[arg(short, long, default_value = "network.json")]
        output: String,

        /// Comma-separated annotation labels to select (default: all)
        #[arg(long)]
        select: Option<String>,

        /// Remove edges supported by fewer databases than this
        #[arg(long)]
        min_edge_support: Option<u32>,

        /// Remove nodes with degree below this
        #[arg(long)]
        min_degree: Option<usize>,

        /// Remove nodes with degree above this
        #[arg(long)]
        max_degree: Option<usize>,

        /// Enable intermediate expansion; keep connectors with strictly
        /// more than this many edges into the selected set
        #[arg(long)]
        min_connections: Option<usize>,

        /// Collapse connectors with identical connection patterns
        #[arg(long)]
        dedup_intermediates: bool,

        /// Drop intermediates bridging fewer than two candidates
        #[arg(long)]
        clean_intermediates: bool,

        /// Field delimiter in the network file
        #[arg(long, default_value = "\t")]
        delimiter: char,

        /// Edge attribute schema, e.g. "consensus:bool,DBCount:int"
        #[arg(long)]
        edge_schema: Option<String>,

        /// Name of the database-support edge column
        #[arg(long, default_value = "DBCount")]
        support_attribute: String,

        /// Spring layout iterations
        #[arg(long, default_value = "50")]
        layout_iterations: usize,

        /// Show per-phase timing breakdown
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            network,
            candidate,
            annotations,
            output,
            select,
            min_edge_support,
            min_degree,
            max_degree,
            min_connections,
            dedup_intermediates,
            clean_intermediates,
            delimiter,
            edge_schema,
            support_attribute,
            layout_iterations,
            verbose,
            quiet,
        } => {
            let mut config = PipelineConfig {
                network_path: network.to_string_lossy().to_string(),
                candidate_path: candidate.to_string_lossy().to_string(),
                annotation_path: annotations.map(|p| p.to_string_lossy().to_string()),
                output_path: Some(output.clone()),
                annotation_select: select
                    .map(|s| s.split(',').map(|l| l.trim().to_string()).collect())
                    .unwrap_or_default(),
                min_edge_support,
                min_degree,
                max_degree,
                min_connections,
                dedup_intermediates,
                clean_intermediates,
                delimiter,
                support_attribute,
                layout_iterations,
                verbose,
                quiet,
                ..Default::default()
            };
            if let Some(schema) = edge_schema {
                match parse_edge_schema(&schema) {
                    Ok(specs) => config.edge_schema = specs,
                    Err(e) => {
                        eprintln!("Invalid --edge-schema: {e}");
                        std::process::exit(2);
                    }
                }
            }

            if quiet {
                run_quiet(&config, &output);
            } else {
                run_with_progress(&config, &output, verbose);
            }
        }
    }
}

fn run_quiet(config: &PipelineConfig, output_path: &str) {
    match pipeline::run_pipeline(config, None) {
        Ok(result) => {
            if let Err(e) = write_output(&result, output_path) {
                eprintln!("Error writing output: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Build failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run_with_progress(config: &PipelineConfig, output_path: &str, verbose: bool) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let result = match pipeline::run_pipeline(config, Some(progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Build failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    println!(
        "\n{}  PPInet subgraph: {}",
        style("✓").green().bold(),
        style(&result.data.name).bold()
    );
    for (key, label) in [
        ("nodes", "Nodes:"),
        ("edges", "Edges:"),
        ("candidates", "Candidates:"),
        ("annotations", "Annotations:"),
        ("intermediates", "Intermediates:"),
    ] {
        println!(
            "  {:<15} {}",
            label,
            result.stats.get(key).unwrap_or(&serde_json::json!(0))
        );
    }

    let duration = start.elapsed();
    println!(
        "  {:<15} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    for warning in &result.warnings {
        println!("  {} {}", style("warning:").yellow().bold(), warning);
    }

    if verbose {
        if let Some(serde_json::Value::Object(timings)) = result.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, ms) in timings {
                if let Some(val) = ms.as_f64() {
                    println!("    {:<12} {:.1}ms", phase, val * 1000.0);
                }
            }
        }
    }

    if let Err(e) = write_output(&result, output_path) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }

    println!(
        "\n  {} {}",
        style("Output written to:").green(),
        output_path
    );
}
