use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Drive the anoncreds library through the marshaling bridge.
#[derive(Parser)]
#[command(name = "anoncreds-bridge")]
#[command(about = "Call anoncreds operations with JSON argument bags")]
#[command(version)]
struct Cli {
    /// Path to the anoncreds shared library (default: platform library name).
    #[arg(long)]
    library: Option<PathBuf>,

    /// JSON bridge configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pass paired lists of unequal length through to the library.
    #[arg(long)]
    permissive_lists: bool,

    /// Install the library's own logger at startup.
    #[arg(long)]
    native_logger: bool,

    /// Log bridge activity at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one operation and print its result envelope.
    Call {
        /// Operation host name, e.g. `createSchema`.
        operation: String,

        /// Argument bag as inline JSON.
        #[arg(long, conflicts_with = "args_file")]
        args: Option<String>,

        /// Argument bag read from a JSON file.
        #[arg(long)]
        args_file: Option<PathBuf>,
    },

    /// Run a JSON-lines script in one process so handles carry over.
    Run {
        /// Script with one `{"op", "args", "bind"?}` object per line.
        script: PathBuf,
    },

    /// List every operation with its parameters.
    Ops,
}

pub struct AppContext {
    pub library: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub permissive_lists: bool,
    pub native_logger: bool,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            library: cli.library.clone(),
            config: cli.config.clone(),
            permissive_lists: cli.permissive_lists,
            native_logger: cli.native_logger,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let ctx = AppContext::from_cli(&cli);

    let result = match cli.command {
        Commands::Call {
            operation,
            args,
            args_file,
        } => commands::call(&ctx, &operation, args, args_file),
        Commands::Run { script } => commands::run_script(&ctx, &script),
        Commands::Ops => commands::list_operations(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
