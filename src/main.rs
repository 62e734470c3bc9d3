use anyhow::Result;
use clap::Parser;
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;
use wheel_catalog::{
    CatalogError,
    catalog::RenderMode,
    commands::{self, Config, GenerateOutcome, HistoryOutcome, HistorySource},
    runtime::RealRuntime,
};

/// Exit status when the History section yields no packages.
const EXIT_NOTHING_TO_DO: u8 = 2;

/// wheel-catalog - Flash-Attention wheel catalog maintenance
///
/// Keeps the Packages section of the README in sync with the release log in
/// its History section.
///
/// Examples:
///   wheel-catalog generate --update-readme
///   wheel-catalog notes assets.json
///   wheel-catalog history --tag v0.3.0 --assets assets.json
#[derive(Parser, Debug)]
#[command(author, version = env!("WHEEL_CATALOG_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// README to read and update (also via WHEEL_CATALOG_README)
    #[arg(
        long = "readme",
        env = "WHEEL_CATALOG_README",
        value_name = "PATH",
        global = true
    )]
    pub readme: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate the package catalog from the History section
    Generate(GenerateArgs),

    /// Print release notes for a release's wheel assets
    Notes(NotesArgs),

    /// Insert a release entry into the History section
    History(HistoryArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// README path (overrides --readme)
    #[arg(value_name = "README")]
    pub path: Option<PathBuf>,

    /// Rewrite the Packages section instead of printing to stdout
    #[arg(long)]
    pub update_readme: bool,

    /// Render a single flat table instead of per-OS sections
    #[arg(long)]
    pub flat: bool,
}

#[derive(clap::Args, Debug)]
pub struct NotesArgs {
    /// JSON file from `gh release view --json assets`
    #[arg(value_name = "ASSETS_JSON")]
    pub assets: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// Release tag name
    #[arg(long)]
    pub tag: String,

    /// Repository in owner/name format (defaults to GITHUB_REPOSITORY)
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// JSON file from `gh release view --json assets`
    #[arg(long, value_name = "PATH")]
    pub assets: Option<PathBuf>,

    /// Release notes markdown file, or '-' to read from stdin
    #[arg(long, value_name = "PATH")]
    pub notes: Option<String>,
}

fn run(cli: Cli) -> Result<()> {
    let runtime = RealRuntime;

    match cli.command {
        Commands::Generate(args) => {
            let mode = if args.flat {
                RenderMode::Flat
            } else {
                RenderMode::Hierarchical
            };
            let config = Config::new(runtime, args.path.or(cli.readme));
            match commands::generate(&config, mode, args.update_readme)? {
                GenerateOutcome::Rendered(text) => println!("{}", text),
                GenerateOutcome::Updated => {
                    println!("Updated Packages section in {}", config.readme.display())
                }
                GenerateOutcome::Unchanged => {
                    println!("No changes in {}", config.readme.display())
                }
            }
        }
        Commands::Notes(args) => {
            println!("{}", commands::notes(&runtime, &args.assets)?);
        }
        Commands::History(args) => {
            let source = HistorySource::from_args(args.assets, args.notes)?;
            let config = Config::new(runtime, cli.readme);
            match commands::history(&config, &args.tag, args.repo.as_deref(), &source)? {
                HistoryOutcome::Inserted => println!(
                    "Inserted history for {} into {}",
                    args.tag,
                    config.readme.display()
                ),
                HistoryOutcome::Unchanged => {
                    println!("No changes in {}", config.readme.display())
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<CatalogError>() == Some(&CatalogError::EmptyInput) => {
            eprintln!("{}", e);
            ExitCode::from(EXIT_NOTHING_TO_DO)
        }
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
