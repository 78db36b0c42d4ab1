//! mdpress - Markdown to EPUB converter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mdpress::{Document, Error};

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(version, about = "Convert Markdown documents into styled EPUB books", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdpress notes.md                Write notes.epub next to the source
    mdpress notes.md -o book.epub   Choose the output path")]
struct Cli {
    /// Markdown source file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to the input path with an .epub extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Suppress the success report
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> mdpress::Result<()> {
    if !cli.input.exists() {
        return Err(Error::SourceNotFound(cli.input.clone()));
    }
    let source = std::fs::read_to_string(&cli.input)?;
    let source_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled.md".to_string());

    let bytes = mdpress::convert(&source, &source_name)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("epub"));
    std::fs::write(&output, &bytes).map_err(|source| Error::WriteFailure {
        path: output.clone(),
        source,
    })?;

    if !cli.quiet {
        let title = Document::from_source(&source, &source_name).title;
        println!("✓ Created: {}", output.display());
        println!("  Title: {title}");
        println!("  Size: {} bytes", bytes.len());
    }
    Ok(())
}
