use clap::{Parser, Subcommand};
use estudio_casos::carousel::Carousel;
use estudio_casos::scan;
use estudio_casos::types::NodeId;
use estudio_casos::{config, output, views};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "estudio-casos")]
#[command(about = "Case-study content model: cases, questions and documents")]
#[command(long_about = "\
Case-study content model: cases, questions and documents

Your filesystem is the data source. Top-level directories become cases,
their subdirectories become questions, ordered by numeric prefix.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── 010-Mercado-Electrico/       # Case (NNN prefix = order)
  │   ├── ficha.md                 # Ficha text (or ficha.txt)
  │   ├── video.txt                # Video URL for the case modal
  │   ├── documents.toml           # [[document]] kind / name / file / link
  │   ├── 010-Demanda/             # Question
  │   │   ├── question.md          # Statement (or question.txt)
  │   │   └── embed.txt            # Interactive question reference
  │   └── 020-Oferta/
  └── borrador/                    # No prefix = sorted last

View commands (cases, ficha, docs, nav) read the content directory on
every run, so reordering or renaming a directory shows up immediately.
'scan' additionally exports the page tree as manifest.json.

Document URL resolution (first available wins):
  uploaded file → external link → placeholder (\"#\")

Run 'estudio-casos gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Directory the `scan` command writes manifest.json to
    #[arg(long, default_value = ".estudio-casos-temp", global = true)]
    temp_dir: PathBuf,

    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Validate the content directory without writing anything
    Check,
    /// List cases in carousel order
    Cases {
        /// Show only the carousel window starting at this card (0-based)
        #[arg(long)]
        at: Option<usize>,
    },
    /// Show a case page: ficha, video and documents
    Ficha {
        /// Case id
        #[arg(long)]
        case: u64,
    },
    /// Show the resolved document list of a case
    Docs {
        /// Case id
        #[arg(long)]
        case: u64,
    },
    /// Show a question with its position, previous/next and page strip
    Nav {
        /// Case id
        #[arg(long)]
        case: u64,
        /// Current question id
        #[arg(long)]
        question: u64,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            info!(path = %manifest_path.display(), "wrote manifest");

            let tree = manifest.tree()?;
            let cases = views::catalog(&tree, manifest.root)?;
            output::print_catalog(&tree, &cases);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (manifest, duplicates) = scan::scan_with_report(&cli.source)?;
            let tree = manifest.tree()?;
            let cases = views::catalog(&tree, manifest.root)?;
            output::print_catalog(&tree, &cases);
            for dup in &duplicates {
                println!(
                    "Warning: {} share order {} in {}/",
                    dup.titles.join(", "),
                    dup.sort_order,
                    dup.parent.display()
                );
            }
            println!("==> Content is valid");
        }
        Command::Cases { at } => {
            let (manifest, tree) = scan::scan_tree(&cli.source)?;
            let cases = views::catalog(&tree, manifest.root)?;
            match at {
                Some(at) => {
                    let carousel =
                        Carousel::starting_at(cases.len(), manifest.config.carousel.window, at);
                    let page = views::carousel_page(&cases, &carousel);
                    if cli.json {
                        print_json(&page)?;
                    } else {
                        output::print_carousel(&page);
                    }
                }
                None if cli.json => print_json(&cases)?,
                None => output::print_catalog(&tree, &cases),
            }
        }
        Command::Ficha { case } => {
            let (manifest, tree) = scan::scan_tree(&cli.source)?;
            let ficha = views::ficha(&tree, NodeId(case), &manifest.config)?;
            if cli.json {
                print_json(&ficha)?;
            } else {
                output::print_ficha(&ficha);
            }
        }
        Command::Docs { case } => {
            let (manifest, tree) = scan::scan_tree(&cli.source)?;
            let docs = views::documents(&tree, NodeId(case), &manifest.config)?;
            if cli.json {
                print_json(&docs)?;
            } else {
                output::print_documents(&docs);
            }
        }
        Command::Nav { case, question } => {
            let (_, tree) = scan::scan_tree(&cli.source)?;
            let view = views::question(&tree, NodeId(case), NodeId(question))?;
            if !view.navigation.is_found() {
                warn!(case, question, "question is not part of this case");
            }
            if cli.json {
                print_json(&view)?;
            } else {
                output::print_question(&view);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr; `-v` raises the level, `RUST_LOG` applies when no flag is given.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
