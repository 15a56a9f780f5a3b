mod handlers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pipeline_vis::engine::view::VisConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pipeline-vis", version, about = "What your pipeline tasks would show")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    /// Omit step-list tooltips from task nodes
    #[arg(long, global = true, env = "PIPELINE_VIS_NO_TOOLTIP")]
    no_tooltip: bool,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Resolve the status a task shows within its pipeline run
    Resolve {
        /// Status of the parent pipeline run
        #[arg(long, short = 'r')]
        run_status: Option<String>,
        /// JSON file with the task's recorded status
        #[arg(long, short = 't')]
        task_status: Option<PathBuf>,
    },
    /// Derive per-step statuses of a task definition
    Steps {
        /// JSON file with the Task or ClusterTask definition
        task: PathBuf,
        /// JSON file with the task's recorded status
        #[arg(long, short = 's')]
        status: Option<PathBuf>,
    },
    /// Show every task node of a pipeline or pipeline-run snapshot
    Show {
        /// JSON snapshot of the pipeline run
        run: PathBuf,
        /// Directory of task definition JSON files
        #[arg(long)]
        tasks: PathBuf,
        /// Override the snapshot namespace
        #[arg(long, short = 'n')]
        namespace: Option<String>,
    },
    /// List the add-task menu built from a directory of task definitions
    Menu {
        #[arg(long)]
        tasks: PathBuf,
        /// Offer a remove entry
        #[arg(long)]
        removable: bool,
        /// Select the entry at this position
        #[arg(long)]
        pick: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = VisConfig {
        disable_tooltip: cli.no_tooltip,
    };

    match cli.command {
        Commands::Resolve {
            run_status,
            task_status,
        } => handlers::resolve::handle(run_status.as_deref(), task_status.as_deref(), cli.json),
        Commands::Steps { task, status } => handlers::steps::handle(&task, status.as_deref(), cli.json),
        Commands::Show {
            run,
            tasks,
            namespace,
        } => handlers::show::handle(&run, &tasks, namespace.as_deref(), &config, cli.json),
        Commands::Menu {
            tasks,
            removable,
            pick,
        } => handlers::menu::handle(&tasks, removable, pick, cli.json),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pipeline_vis=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
