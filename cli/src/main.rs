//! recdoc CLI - assemble record documents into a document model

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use recdoc::{load_input, Document, DocumentStats, JsonFormat, Recdoc, TextOptions};

#[derive(Parser)]
#[command(name = "recdoc")]
#[command(version)]
#[command(about = "Assemble meeting minutes and justifications into a document model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble an input file into the document model (JSON)
    Build {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        assemble: AssembleArgs,
    },

    /// Assemble an input file and print a plain-text preview
    Text {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        #[command(flatten)]
        assemble: AssembleArgs,
    },

    /// Show input and document statistics
    Info {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        assemble: AssembleArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by every assembling command.
#[derive(Args)]
struct AssembleArgs {
    /// Per-image fetch timeout in seconds
    #[arg(long, env = "RECDOC_TIMEOUT", default_value = "10")]
    timeout: u64,

    /// Maximum concurrent image fetches
    #[arg(long, env = "RECDOC_CONCURRENCY", default_value = "8")]
    concurrency: usize,

    /// Do not fetch images (they are omitted)
    #[arg(long)]
    no_images: bool,

    /// Organisation listed first in the approver table
    #[arg(long, env = "RECDOC_HOME")]
    home: Option<String>,

    /// Base URL for relative image paths
    #[arg(long, env = "RECDOC_BASE_URL")]
    base_url: Option<String>,
}

impl AssembleArgs {
    fn builder(&self) -> Recdoc {
        let mut builder = Recdoc::new()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_concurrency(self.concurrency);
        if self.no_images {
            builder = builder.without_images();
        }
        if let Some(ref home) = self.home {
            builder = builder.with_home(home);
        }
        if let Some(ref base) = self.base_url {
            builder = builder.with_base_url(base);
        }
        builder
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            input,
            output,
            compact,
            assemble,
        }) => cmd_build(&input, output.as_deref(), compact, &assemble),
        Some(Commands::Text {
            input,
            output,
            frontmatter,
            assemble,
        }) => cmd_text(&input, output.as_deref(), frontmatter, &assemble),
        Some(Commands::Info { input, assemble }) => cmd_info(&input, &assemble),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: recdoc <COMMAND> <FILE>".yellow());
            println!("       recdoc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load and assemble `input` behind a spinner.
fn assemble(input: &Path, args: &AssembleArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading input...");
    let data = load_input(input)?;
    log::debug!(
        "{}: {} sections, {} approvers, {} attachment sections",
        input.display(),
        data.sections.len(),
        data.approvers.len(),
        data.attachments.len()
    );

    pb.set_message("Assembling document...");
    let builder = args.builder();
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(builder.build_async(&data));

    pb.finish_and_clear();
    Ok(result?.document)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_build(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &AssembleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = assemble(input, args)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = recdoc::render::to_json(&doc, format)?;
    write_output(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    args: &AssembleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = assemble(input, args)?;
    let options = TextOptions::new().with_frontmatter(frontmatter);
    let text = recdoc::render::to_text(&doc, &options)?;
    write_output(output, &text)
}

fn cmd_info(input: &Path, args: &AssembleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = assemble(input, args)?;
    let meta = &doc.metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Kind".bold(), meta.kind);
    println!("{}: {}", "Title".bold(), meta.title);
    if let Some(date) = meta.date {
        println!("{}: {}", "Date".bold(), date.format("%Y-%m-%d"));
    }
    println!("{}: {}", "Sections".bold(), meta.section_count);
    println!("{}: {}", "Approvers".bold(), meta.approver_count);
    println!(
        "{}: {} ({} missing)",
        "Images".bold(),
        meta.image_count,
        meta.missing_image_count
    );

    let stats = DocumentStats::collect(&doc);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), doc.block_count());
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Merged cells".bold(), stats.merged_cell_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "recdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Record document assembly tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_assemble_args() {
        let cli = Cli::parse_from([
            "recdoc",
            "build",
            "in.json",
            "--timeout",
            "3",
            "--no-images",
            "--home",
            "Acme",
        ]);
        match cli.command {
            Some(Commands::Build { assemble, .. }) => {
                assert_eq!(assemble.timeout, 3);
                assert_eq!(assemble.concurrency, 8);
                assert!(assemble.no_images);
                assert_eq!(assemble.home.as_deref(), Some("Acme"));
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_build_writes_json() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(
            input,
            r#"{{"kind": "meeting_minutes", "record": {{"title": "Sync"}}}}"#
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc.json");

        let cli = Cli::parse_from(["recdoc", "build", "--no-images", "x"]);
        let Some(Commands::Build { assemble, .. }) = cli.command else {
            panic!("expected build command");
        };
        cmd_build(input.path(), Some(&out), true, &assemble).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["metadata"]["title"], "Sync");
    }
}
