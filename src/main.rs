use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tree_inventory::{
    io,
    visualization::{print_summary_table, print_tree_table},
    AppConfig, Category, Forest, InventoryError, Shell,
};

#[derive(Parser)]
#[command(
    name = "tree-inventory",
    about = "Tree Inventory - coniferous and deciduous stand records",
    version,
    author
)]
struct Cli {
    /// Optional TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show count, area, density and average age per category
    Summary {
        /// Coniferous stand file
        #[arg(long)]
        coniferous: Option<PathBuf>,

        /// Deciduous stand file
        #[arg(long)]
        deciduous: Option<PathBuf>,
    },

    /// List the trees of a stand file
    List {
        /// Path to stand file (text or JSON export)
        #[arg(short, long)]
        input: PathBuf,

        /// Category the file belongs to
        #[arg(short, long, default_value = "coniferous")]
        category: Category,

        /// Sort criterion: height, diameter, species or age
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Find a tree by species (case-insensitive)
    Search {
        /// Path to stand file
        #[arg(short, long)]
        input: PathBuf,

        /// Species to look for
        #[arg(short, long)]
        species: String,

        /// Category the file belongs to
        #[arg(short, long, default_value = "coniferous")]
        category: Category,
    },

    /// Show the tallest and the thickest tree
    Extremes {
        /// Path to stand file
        #[arg(short, long)]
        input: PathBuf,

        /// Category the file belongs to
        #[arg(short, long, default_value = "coniferous")]
        category: Category,
    },

    /// Show average height and age
    Averages {
        /// Path to stand file
        #[arg(short, long)]
        input: PathBuf,

        /// Category the file belongs to
        #[arg(short, long, default_value = "coniferous")]
        category: Category,
    },

    /// Export a stand file as JSON, CSV or text
    Export {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (.json, .csv or .txt)
        #[arg(short, long)]
        output: PathBuf,

        /// Category recorded in the export
        #[arg(short, long, default_value = "coniferous")]
        category: Category,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Interactive session reading commands from stdin
    Shell {
        /// Coniferous stand file to preload
        #[arg(long)]
        coniferous: Option<PathBuf>,

        /// Deciduous stand file to preload
        #[arg(long)]
        deciduous: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::load(path)?),
        None => Ok(AppConfig::default()),
    }
}

fn load_one(config: AppConfig, category: Category, path: &Path) -> Result<Forest> {
    let mut forest = Forest::new(config);
    forest.load_file(category, path)?;
    forest.select_category(category);
    Ok(forest)
}

/// Absence of data is reported, not treated as a failure.
fn report(err: InventoryError) -> Result<()> {
    match err {
        InventoryError::NotFound(_) | InventoryError::EmptyInventory(_) | InventoryError::NoQuery => {
            println!("{}", err.to_string().yellow());
            Ok(())
        }
        other => Err(other.into()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    let precision = config.precision;

    match cli.command {
        Commands::Summary {
            coniferous,
            deciduous,
        } => {
            if coniferous.is_none() && deciduous.is_none() {
                anyhow::bail!("Give at least one of --coniferous or --deciduous");
            }
            let mut forest = Forest::new(config);
            let mut summaries = Vec::new();
            for (category, path) in [
                (Category::Coniferous, coniferous),
                (Category::Deciduous, deciduous),
            ] {
                if let Some(path) = path {
                    forest.load_file(category, &path)?;
                    summaries.push((category, forest.summary(category)));
                }
            }
            print_summary_table(&summaries, precision);
        }

        Commands::List {
            input,
            category,
            sort,
        } => {
            let mut forest = load_one(config, category, &input)?;
            if let Some(label) = sort {
                if forest.sort_by_label(category, &label).is_none() {
                    eprintln!(
                        "{}: unknown sort criterion '{label}', order unchanged",
                        "Warning".yellow()
                    );
                }
            }
            print_tree_table(forest.inventory(category), precision, None);
        }

        Commands::Search {
            input,
            species,
            category,
        } => {
            let mut forest = load_one(config, category, &input)?;
            match forest.search(category, &species) {
                Ok(_) => {
                    if let Some((_, _, tree)) = forest.selected() {
                        println!(
                            "{} {} ({} m, {} cm, {} years, {})",
                            "Found:".green().bold(),
                            tree.species,
                            tree.height,
                            tree.diameter,
                            tree.age,
                            tree.wood_type
                        );
                    }
                }
                Err(e) => report(e)?,
            }
        }

        Commands::Extremes { input, category } => {
            let forest = load_one(config, category, &input)?;
            match forest.tallest(category) {
                Ok((_, tree)) => println!("Tallest:  {}, {} m", tree.species, tree.height),
                Err(e) => report(e)?,
            }
            match forest.thickest(category) {
                Ok((_, tree)) => println!("Thickest: {}, {} cm", tree.species, tree.diameter),
                Err(e) => report(e)?,
            }
        }

        Commands::Averages { input, category } => {
            let forest = load_one(config, category, &input)?;
            match forest.averages(category) {
                Ok(averages) => println!("{averages}"),
                Err(e) => report(e)?,
            }
        }

        Commands::Export {
            input,
            output,
            category,
            pretty,
        } => {
            let forest = load_one(config, category, &input)?;
            io::writer_for(&output, pretty)?.write(forest.inventory(category), &output)?;
            println!(
                "{} Exported {} -> {}",
                "Success:".green().bold(),
                input.display(),
                output.display()
            );
        }

        Commands::Shell {
            coniferous,
            deciduous,
        } => {
            let mut forest = Forest::new(config);
            for (category, path) in [
                (Category::Coniferous, coniferous),
                (Category::Deciduous, deciduous),
            ] {
                if let Some(path) = path {
                    if let Err(e) = forest.load_file(category, &path) {
                        eprintln!("{}: {e}", "Warning".yellow());
                    }
                }
            }
            let mut shell = Shell::new(forest);
            let stdin = std::io::stdin();
            shell.run(stdin.lock(), std::io::stdout())?;
        }
    }

    Ok(())
}
