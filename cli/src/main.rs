//! relayout CLI - rebuild Markdown from positioned text tokens

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use relayout::render::{render_markdown, to_json};
use relayout::{
    ConversionStats, Document, JsonFormat, LayoutOptions, PageSource, Pipeline, Progress,
    TokenDump,
};

#[derive(Parser)]
#[command(name = "relayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild Markdown from positioned text token dumps", long_about = None)]
struct Cli {
    /// Input token dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone, Default)]
struct LayoutArgs {
    /// Layout options as JSON (missing fields use defaults)
    #[arg(long, value_name = "FILE", env = "RELAYOUT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Do not prepend a table of contents
    #[arg(long, global = true)]
    no_toc: bool,

    /// Disable the "Article" front-matter merge
    #[arg(long, global = true)]
    no_front_matter: bool,

    /// Process pages on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a token dump to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a token dump to the JSON block model
    Json {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics and outline
    Info {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let layout = cli.layout;

    let result = match cli.command {
        Some(Commands::Markdown { input, output }) => {
            cmd_markdown(&input, output.as_deref(), &layout)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &layout),
        Some(Commands::Info { input }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: Markdown if input is provided
            if let Some(input) = cli.input {
                cmd_markdown(&input, cli.output.as_deref(), &layout)
            } else {
                println!("{}", "Usage: relayout <FILE> [OUTPUT]".yellow());
                println!("       relayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Resolve layout options from the config file and flags.
fn load_options(args: &LayoutArgs) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            serde_json::from_str::<LayoutOptions>(&json)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?
        }
        None => LayoutOptions::default(),
    };

    if args.no_toc {
        options = options.with_table_of_contents(false);
    }
    if args.no_front_matter {
        options = options.with_front_matter_merge(false);
    }
    if args.sequential {
        options = options.sequential();
    }
    Ok(options)
}

/// Load the dump and run the pipeline, driving a progress bar from its events.
fn convert(input: &Path, args: &LayoutArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let options = load_options(args)?;
    let dump = TokenDump::open(input)?;
    log::info!("Loaded {} pages from {}", dump.page_count(), input.display());

    if args.quiet {
        return Ok(Pipeline::new(options).run(&dump)?);
    }

    let pb = ProgressBar::new(dump.page_count() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    let pipeline = Pipeline::new(options).with_progress(tx);

    let source = &dump;
    let joined = std::thread::scope(|scope| {
        let handle = scope.spawn(move || pipeline.run(source));
        // The pipeline owns the sender, so the loop ends when the thread does.
        track_progress(&rx, &pb);
        handle.join()
    });

    let doc = joined.map_err(|_| "conversion thread panicked")??;
    Ok(doc)
}

fn track_progress(rx: &crossbeam_channel::Receiver<Progress>, pb: &ProgressBar) {
    for event in rx.iter() {
        match event {
            Progress::PageExtracted { page, total } => {
                pb.set_message(format!("Extracted page {}/{}", page, total));
                pb.inc(1);
            }
            Progress::PageStructured { page, total } => {
                pb.set_message(format!("Structured page {}/{}", page, total));
                pb.inc(1);
            }
            Progress::Finished { blocks } => {
                pb.finish_with_message(format!("Done! {} blocks", blocks));
                break;
            }
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    args: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = convert(input, args)?;
    write_output(output, &render_markdown(&doc))
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = convert(input, args)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let mut json = to_json(&doc, format)?;
    json.push('\n');
    write_output(output, &json)
}

fn cmd_info(input: &Path, args: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = convert(input, args)?;
    let stats = ConversionStats::from_document(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), stats.page_count);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "References".bold(), stats.reference_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    if let Some(entries) = doc.table_of_contents() {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for entry in entries {
            let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
            println!("{}{} {}", indent, "•".dimmed(), entry.title);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "relayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document layout reconstruction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/relayout".dimmed()
    );
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_options_defaults() {
        let options = load_options(&LayoutArgs::default()).unwrap();
        assert_eq!(options, LayoutOptions::default());
    }

    #[test]
    fn test_load_options_from_file_and_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"headings": {{"h1": 30.0}}}}"#).unwrap();

        let args = LayoutArgs {
            config: Some(file.path().to_path_buf()),
            no_toc: true,
            sequential: true,
            ..LayoutArgs::default()
        };
        let options = load_options(&args).unwrap();
        assert_eq!(options.headings.h1, 30.0);
        assert_eq!(options.headings.h2, 19.0);
        assert!(!options.table_of_contents);
        assert!(!options.parallel);
        assert!(options.front_matter_merge);
    }

    #[test]
    fn test_convert_quiet() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[[{{"text": "Methods", "x": 72, "y": 700, "height": 22}},
                {{"text": "We measured it.", "x": 72, "y": 680, "height": 10}}]]"#
        )
        .unwrap();

        let args = LayoutArgs {
            quiet: true,
            no_toc: true,
            ..LayoutArgs::default()
        };
        let doc = convert(file.path(), &args).unwrap();
        assert_eq!(render_markdown(&doc), "## Methods\n\nWe measured it.\n");
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from(["relayout", "json", "in.json", "--compact", "--no-toc"])
            .unwrap();
        assert!(cli.layout.no_toc);
        assert!(matches!(
            cli.command,
            Some(Commands::Json { compact: true, .. })
        ));
    }
}
