use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use mdpress::{Result, Style, fetch_markdown, github, render_markdown, resolve_url};

/// Render GitHub Markdown documents to paginated PDF
#[derive(Parser, Debug)]
#[command(name = "mdpress")]
#[command(about = "Render GitHub Markdown documents to paginated PDF", long_about = None)]
struct Args {
    /// github.com blob URL, raw.githubusercontent.com URL, local file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output PDF path (defaults to a name derived from the input)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to a TOML style file overriding page geometry and colors
    #[arg(short, long, value_name = "STYLE")]
    style: Option<PathBuf>,

    /// Document title stamped into the PDF metadata (defaults to the file name)
    #[arg(short, long, value_name = "TITLE")]
    title: Option<String>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<clap_complete::Shell>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "mdpress", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(output) => {
            eprintln!("PDF saved to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<PathBuf> {
    let input = args
        .input
        .expect("INPUT is required unless --completions is set");

    // Load style overrides
    let style = match &args.style {
        Some(path) => Style::from_toml(&std::fs::read_to_string(path)?)?,
        None => Style::default(),
    };

    // Read markdown input
    let (markdown, file_name) = read_input(&input)?;

    let title = match &args.title {
        Some(title) => title.clone(),
        None => github::document_title(&file_name).to_string(),
    };
    let output = match args.output {
        Some(path) => path,
        None => PathBuf::from(github::pdf_file_name(&file_name)),
    };

    let pdf = render_markdown(&markdown, Some(&title), &style)?;
    std::fs::write(&output, pdf)?;
    Ok(output)
}

/// Reads the document from a URL, a local file, or stdin, together with the
/// Markdown file name that titles and output names derive from.
fn read_input(input: &str) -> Result<(String, String)> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
        return Ok((buffer, "document.md".to_string()));
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        let doc = resolve_url(input)?;
        let markdown = fetch_markdown(&doc.raw_url)?;
        return Ok((markdown, doc.file_name));
    }

    let markdown = std::fs::read_to_string(input)?;
    let file_name = std::path::Path::new(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.md".to_string());
    Ok((markdown, file_name))
}
