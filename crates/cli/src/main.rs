//! CLI for asking questions about slide decks and PDFs.

mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slideqa_client::{ask_all, ApiClient, AskRequest, ClientConfig, DEFAULT_SERVER};
use slideqa_core::{MatchMode, Ranker, Session, ViewRenderer};
use std::path::{Path, PathBuf};

/// Upload presentations and ask questions about them.
#[derive(Parser, Debug)]
#[command(name = "slideqa")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL
    #[arg(short, long, global = true, env = "SLIDEQA_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not print speaker notes under slides
    #[arg(long, global = true)]
    hide_notes: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload .pdf, .ppt or .pptx files and print their tables of contents
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Ask a question about one document
    Ask {
        question: String,

        /// Document name as reported by upload
        #[arg(short, long)]
        document: String,

        /// Restrict the question to one slide or page (1-based)
        #[arg(short = 'n', long)]
        slide: Option<usize>,

        /// Ask the backend to report formulas and images on the page
        #[arg(long, requires_all = ["slide", "file"])]
        visuals: bool,

        /// Uploaded filename (with extension) to fetch formulas and images from
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Ask every listed document and rank the answers
    AskAll {
        question: String,

        /// Document names (repeat for each document)
        #[arg(short, long = "document", required = true)]
        documents: Vec<String>,

        /// Only count keywords that appear as whole words
        #[arg(long)]
        whole_word: bool,

        /// Do not print relevance scores
        #[arg(long)]
        hide_scores: bool,
    },

    /// Show formulas and images found on a PDF page
    Visuals {
        /// Uploaded filename (with extension)
        file: String,
        page: usize,
    },

    /// Show the math detection report for a PDF
    Math {
        /// Uploaded filename (with extension)
        file: String,
    },

    /// Generate an image from a prompt
    Image {
        prompt: String,

        #[arg(short, long, default_value = "generated.png")]
        output: PathBuf,
    },

    /// Download the original uploaded file
    Download {
        /// Uploaded filename (with extension)
        file: String,

        /// Output path (default: the document's filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive viewer (default)
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = ClientConfig::new(&args.server).context("Invalid --server value")?;
    log::debug!("Using backend at {}", config.base_url());
    let client = ApiClient::new(config);
    let renderer = ViewRenderer::new().with_show_notes(!args.hide_notes);

    match args.command.unwrap_or(Command::Shell) {
        Command::Upload { files } => {
            let presentations = client.upload(&files).await.context("Upload failed")?;
            let mut session = Session::new();
            session.load(presentations)?;

            println!("{}", renderer.render_library(session.presentations(), None));
            for pres in session.presentations() {
                println!("\n{}", renderer.render_overview(pres));
            }
        }
        Command::Ask {
            question,
            document,
            slide,
            visuals,
            file,
        } => {
            let request = AskRequest::new(question, document.as_str())
                .with_slide(slide)
                .with_visual_elements(visuals);
            let (resp, elements) = match file.as_deref() {
                Some(file) => client.ask_with_visuals(&request, file).await,
                None => client.ask(&request).await.map(|resp| (resp, None)),
            }
            .with_context(|| format!("Failed to get an answer from {}", document))?;
            println!("{}", renderer.render_answer(&resp.answer));

            if let Some(elements) = elements {
                println!("\n{}", renderer.render_visual_elements(&elements));
            }
        }
        Command::AskAll {
            question,
            documents,
            whole_word,
            hide_scores,
        } => {
            let ranker = if whole_word {
                Ranker::new().with_match_mode(MatchMode::WholeWord)
            } else {
                Ranker::new()
            };
            let gathered = ask_all(&client, &ranker, &question, &documents).await;
            for (name, err) in &gathered.failed {
                eprintln!("Skipped {}: {}", name, err);
            }
            println!(
                "{}",
                renderer
                    .with_show_scores(!hide_scores)
                    .render_ranked(&question, &gathered.ranked)
            );
        }
        Command::Visuals { file, page } => {
            let elements = client
                .visual_elements(&file, page)
                .await
                .with_context(|| format!("Failed to load page {} of {}", page, file))?;
            println!("{}", renderer.render_visual_elements(&elements));
        }
        Command::Math { file } => {
            let analysis = client
                .analyze_math(&file)
                .await
                .with_context(|| format!("Math analysis failed for {}", file))?;
            println!("{}", renderer.render_math_analysis(&analysis));
        }
        Command::Image { prompt, output } => {
            let bytes = client
                .generate_image(&prompt)
                .await
                .context("Image generation failed")?;
            write_output(&output, &bytes)?;
            println!("Image written to {}", output.display());
        }
        Command::Download { file, output } => {
            let bytes = client
                .original_file(&file)
                .await
                .with_context(|| format!("Failed to download {}", file))?;
            let output = output.unwrap_or_else(|| PathBuf::from(&file));
            write_output(&output, &bytes)?;
            println!("Saved {} bytes to {}", bytes.len(), output.display());
        }
        Command::Shell => {
            shell::Shell::new(client, renderer).run().await?;
        }
    }

    Ok(())
}

/// Write bytes to a file, creating parent directories.
pub(crate) fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
