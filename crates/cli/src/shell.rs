//! Interactive viewer.
//!
//! Each input line is parsed into a `ShellCommand` carrying 1-based
//! document and slide numbers, then dispatched against the session.

use anyhow::{bail, Context, Result};
use slideqa_client::{ask_all, ApiClient, AskRequest};
use slideqa_core::pager::ZOOM_STEP;
use slideqa_core::{Ranker, Session, ViewRenderer};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  upload <file>...        upload .pdf/.ppt/.pptx files
  list                    list uploaded documents
  open <n>                show the table of contents of document n
  show                    redraw the current view
  slide <n>               show slide or page n of the open document
  next | prev             move one slide or page
  back                    return to the table of contents
  zoom in | zoom out      change PDF zoom
  ask <question>          ask about the open document (or shown slide)
  ask-all <question>      ask every uploaded document and rank answers
  visuals                 formulas and images on the shown PDF page
  math                    math detection report for the open PDF
  image <file> <prompt>   generate an image and save it
  download [file]         save the open document's original file
  help                    show this help
  quit                    leave";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Upload(Vec<PathBuf>),
    List,
    Open(usize),
    Show,
    Slide(usize),
    Next,
    Prev,
    Back,
    Zoom(f64),
    Ask(String),
    AskAll(String),
    Visuals,
    Math,
    Image { output: PathBuf, prompt: String },
    Download(Option<PathBuf>),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "upload" => {
                if rest.is_empty() {
                    bail!("usage: upload <file>...");
                }
                Self::Upload(rest.split_whitespace().map(PathBuf::from).collect())
            }
            "list" | "ls" => Self::List,
            "open" => Self::Open(parse_position(rest, "open <n>")?),
            "show" => Self::Show,
            "slide" | "page" | "goto" => Self::Slide(parse_number(rest, "slide <n>")?),
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "back" => Self::Back,
            "zoom" => match rest {
                "in" | "+" => Self::Zoom(ZOOM_STEP),
                "out" | "-" => Self::Zoom(-ZOOM_STEP),
                _ => bail!("usage: zoom in | zoom out"),
            },
            "ask" => Self::Ask(required(rest, "ask <question>")?),
            "ask-all" | "askall" => Self::AskAll(required(rest, "ask-all <question>")?),
            "visuals" => Self::Visuals,
            "math" => Self::Math,
            "image" => {
                let Some((output, prompt)) = rest.split_once(char::is_whitespace) else {
                    bail!("usage: image <file> <prompt>");
                };
                Self::Image {
                    output: PathBuf::from(output),
                    prompt: prompt.trim().to_string(),
                }
            }
            "download" => Self::Download((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("unknown command {:?}; type help", other),
        };

        Ok(Some(command))
    }
}

fn parse_number(text: &str, usage: &str) -> Result<usize> {
    text.parse()
        .with_context(|| format!("expected a number; usage: {}", usage))
}

/// A 1-based position; 0 is rejected.
fn parse_position(text: &str, usage: &str) -> Result<usize> {
    match parse_number(text, usage)? {
        0 => bail!("numbering starts at 1; usage: {}", usage),
        n => Ok(n),
    }
}

fn required(text: &str, usage: &str) -> Result<String> {
    if text.is_empty() {
        bail!("usage: {}", usage);
    }
    Ok(text.to_string())
}

/// Whether the shell keeps reading input.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive session against one backend.
pub struct Shell {
    client: ApiClient,
    session: Session,
    renderer: ViewRenderer,
    ranker: Ranker,
}

impl Shell {
    pub fn new(client: ApiClient, renderer: ViewRenderer) -> Self {
        Self {
            client,
            session: Session::new(),
            renderer,
            ranker: Ranker::new(),
        }
    }

    /// Read commands from stdin until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        println!("Connected to {}. Type help for commands.", self.client.config().base_url());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{}> ", self.renderer.title_line(&self.session));
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match ShellCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("{}", e);
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => eprintln!("Error: {:#}", e),
            }
        }

        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Upload(files) => {
                let uploaded = self.client.upload(&files).await.context("Upload failed")?;
                let count = uploaded.len();
                self.session.load(uploaded)?;
                println!("Uploaded {} document(s).\n", count);
                self.print_view();
            }
            ShellCommand::List => {
                println!(
                    "{}",
                    self.renderer
                        .render_library(self.session.presentations(), self.session.active_index())
                );
            }
            ShellCommand::Open(number) => {
                let index = number.checked_sub(1).ok_or(slideqa_core::Error::DocumentOutOfRange {
                    index: number,
                    count: self.session.presentations().len(),
                })?;
                self.session.select_document(index)?;
                self.print_view();
            }
            ShellCommand::Show => self.print_view(),
            ShellCommand::Slide(number) => {
                self.session.select_slide(number)?;
                self.print_view();
            }
            ShellCommand::Next => {
                if self.session.next()? {
                    self.print_view();
                } else {
                    println!("Already at the last one.");
                }
            }
            ShellCommand::Prev => {
                if self.session.prev()? {
                    self.print_view();
                } else {
                    println!("Already at the first one.");
                }
            }
            ShellCommand::Back => {
                self.session.back()?;
                self.print_view();
            }
            ShellCommand::Zoom(delta) => {
                let scale = self.session.zoom(delta)?;
                println!("Zoom: {}%", (scale * 100.0).round());
            }
            ShellCommand::Ask(question) => self.ask(question).await?,
            ShellCommand::AskAll(question) => {
                let documents = self.session.document_names();
                if documents.is_empty() {
                    bail!(slideqa_core::Error::NoPresentations);
                }
                let gathered = ask_all(&self.client, &self.ranker, &question, &documents).await;
                for (name, err) in &gathered.failed {
                    eprintln!("Skipped {}: {}", name, err);
                }
                println!("{}", self.renderer.render_ranked(&question, &gathered.ranked));
            }
            ShellCommand::Visuals => {
                let (filename, page) = self.shown_pdf_page()?;
                let elements = self.client.visual_elements(&filename, page).await?;
                println!("{}", self.renderer.render_visual_elements(&elements));
            }
            ShellCommand::Math => {
                let filename = self.active_pdf()?;
                let analysis = self.client.analyze_math(&filename).await?;
                println!("{}", self.renderer.render_math_analysis(&analysis));
            }
            ShellCommand::Image { output, prompt } => {
                let bytes = self
                    .client
                    .generate_image(&prompt)
                    .await
                    .context("Image generation failed")?;
                crate::write_output(&output, &bytes)?;
                println!("Image written to {}", output.display());
            }
            ShellCommand::Download(output) => {
                let filename = self
                    .session
                    .active_document()
                    .ok_or(slideqa_core::Error::NoDocumentSelected)?
                    .filename
                    .clone();
                let bytes = self.client.original_file(&filename).await?;
                let output = output.unwrap_or_else(|| PathBuf::from(&filename));
                crate::write_output(&output, &bytes)?;
                println!("Saved {} bytes to {}", bytes.len(), output.display());
            }
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Ask about the open document, narrowed to the shown slide or page.
    async fn ask(&self, question: String) -> Result<()> {
        let target = self.session.ask_target()?;
        let request = AskRequest::new(question, target.filename.as_str())
            .with_slide(target.slide_number)
            .with_visual_elements(target.include_visual_elements);

        let (resp, elements) = self
            .client
            .ask_with_visuals(&request, &target.source_file)
            .await
            .context("Failed to get an answer")?;
        println!("{}", self.renderer.render_answer(&resp.answer));

        if let Some(elements) = elements {
            println!("\n{}", self.renderer.render_visual_elements(&elements));
        }
        Ok(())
    }

    fn print_view(&self) {
        println!("{}", self.renderer.render_view(&self.session));
    }

    /// Filename of the open document, which must be a PDF.
    fn active_pdf(&self) -> Result<String> {
        let pres = self
            .session
            .active_document()
            .ok_or(slideqa_core::Error::NoDocumentSelected)?;
        if !pres.is_pdf() {
            bail!(slideqa_core::Error::NotAPdf(pres.display_name().to_string()));
        }
        Ok(pres.filename.clone())
    }

    /// Filename and page number of the PDF page on screen.
    fn shown_pdf_page(&self) -> Result<(String, usize)> {
        let filename = self.active_pdf()?;
        let page = self
            .session
            .current_slide_number()
            .ok_or(slideqa_core::Error::NoSlideShown)?;
        Ok((filename, page))
    }
}
