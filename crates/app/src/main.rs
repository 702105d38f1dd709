use anyhow::{anyhow, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use pdf_outline_core::{
    discover_pdf_files, prepare_batch, read_upload_file, render_headings, render_outline,
    render_persona_result, render_sections, upload_batch, upload_one, Action, AnalysisService,
    DocumentView, HttpAnalysisService, OutlineView, PersonaSession, Phase, ServiceConfig,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pdf-outline", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Analysis service base URL [default: $PDF_ANALYSIS_URL, then http://localhost:8000]
    #[arg(long)]
    service_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Upload one PDF, or a batch of 3 to 10 PDFs one after another.
    Upload {
        /// PDF files to upload.
        files: Vec<PathBuf>,
        /// Upload every PDF found under this folder.
        #[arg(long)]
        folder: Option<PathBuf>,
    },
    /// List documents available for persona analysis.
    Files,
    /// Print the nested heading outline of a document.
    Outline { pdf: String },
    /// Print detected headings with font diagnostics.
    Headings { pdf: String },
    /// List the sections of a document.
    Sections { pdf: String },
    /// Print the summary of one section.
    Summary { pdf: String, section_id: String },
    /// Outline, headings, and sections together.
    View { pdf: String },
    /// Rank sections across 3 to 10 documents for a persona and job.
    Persona {
        /// Who is reading, e.g. "PhD Researcher in Computational Biology".
        #[arg(long)]
        persona: String,
        /// What they need to get done.
        #[arg(long)]
        job: String,
        /// Document to include; repeat for each one.
        #[arg(long = "pdf")]
        pdfs: Vec<String>,
        /// Include every uploaded document.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match &cli.service_url {
        Some(url) => ServiceConfig::new(url)?,
        None => ServiceConfig::from_env()?,
    };
    let service = HttpAnalysisService::new(config);

    info!(
        version = app_version,
        service = %service.base_url(),
        started_at = %Utc::now().to_rfc3339(),
        "pdf-outline boot"
    );

    match cli.command {
        Command::Upload { files, folder } => {
            let mut paths = files;
            if let Some(folder) = folder {
                let found = discover_pdf_files(&folder);
                info!(folder = %folder.display(), count = found.len(), "discovered pdfs");
                paths.extend(found);
            }

            match paths.as_slice() {
                [] => bail!("no files to upload"),
                [single] => {
                    let file = read_upload_file(single).await?;
                    let document = upload_one(&service, &file).await?;
                    println!("uploaded {} as {}", document.file_name, document.outline_id);
                }
                _ => {
                    let files = prepare_batch(&paths).await?;
                    let report = upload_batch(&service, &files).await?;

                    for document in &report.uploaded {
                        println!(
                            "uploaded {} as {} sha256={}",
                            document.file_name, document.outline_id, document.checksum
                        );
                    }
                    if let Some(failure) = &report.failure {
                        for skipped in &report.skipped {
                            warn!(file = %skipped, "not attempted");
                        }
                        bail!(
                            "upload of {} failed: {}",
                            failure.file_name,
                            failure.error.user_message(&failure.error.to_string())
                        );
                    }
                    println!("{} files uploaded", report.uploaded.len());
                }
            }
        }
        Command::Files => {
            let listing = service.uploaded_files().await?;
            if listing.files.is_empty() {
                println!("No uploaded documents.");
            }
            for name in listing.files {
                println!("{name}");
            }
        }
        Command::Outline { pdf } => {
            let document = service.outline(&pdf).await?;
            print!("{}", render_outline(&OutlineView::from_document(document)));
        }
        Command::Headings { pdf } => {
            let headings = service.headings(&pdf).await.unwrap_or_else(|error| {
                warn!(pdf = %pdf, %error, "headings unavailable");
                Vec::new()
            });
            print!("{}", render_headings(&headings));
        }
        Command::Sections { pdf } => {
            let sections = service.sections(&pdf).await?;
            print!("{}", render_sections(&sections));
        }
        Command::Summary { pdf, section_id } => {
            let summary = service.summary(&pdf, &section_id).await?;
            println!("Summary\n{}", summary.summary_text);
        }
        Command::View { pdf } => {
            let view = DocumentView::load(&service, &pdf).await;
            match &view.outline {
                Ok(outline) => print!("{}", render_outline(outline)),
                Err(error) => println!("outline: {}", error.user_message(&error.to_string())),
            }
            println!();
            print!("{}", render_headings(&view.headings));
            println!();
            match &view.sections {
                Ok(sections) => print!("{}", render_sections(sections)),
                Err(error) => println!("sections: {}", error.user_message(&error.to_string())),
            }
        }
        Command::Persona {
            persona,
            job,
            pdfs,
            all,
        } => {
            let mut session = PersonaSession::new(service);
            session.load_corpus().await?;
            session.dispatch(Action::SetPersona(persona))?;
            session.dispatch(Action::SetJob(job))?;
            if all {
                session.dispatch(Action::SelectAll)?;
            }
            for name in pdfs {
                session.dispatch(Action::Select(name))?;
            }

            let selected = session.state().selection.len();
            info!(session = %session.id(), selected, "submitting persona query");
            let state = session.submit().await?;

            match (&state.phase, &state.result, &state.error) {
                (Phase::Succeeded, Some(result), _) => {
                    println!("{}", state.status);
                    print!("{}", render_persona_result(result));
                }
                (_, _, Some(message)) => return Err(anyhow!(message.clone())),
                _ => bail!("persona query finished without a result"),
            }
        }
    }

    Ok(())
}
