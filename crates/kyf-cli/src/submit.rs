//! `kyf submit` and `kyf ping`.
//!
//! Builds the form from arguments the way a fan would fill it in, runs the
//! orchestrator, and prints what the page would show.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use kyf_client::{FanApiClient, SubmissionOrchestrator};
use kyf_core::{
    AppConfig, BoardView, CoreError, Cpf, DisplayBoard, DocumentImage, FanForm, FormField,
    Interest,
};

#[derive(Debug, Args)]
pub(crate) struct SubmitArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// E-mail address
    #[arg(long)]
    pub email: String,

    /// CPF, formatted or not
    #[arg(long)]
    pub cpf: String,

    #[arg(long)]
    pub address: Option<String>,

    /// Activities, events, or purchases
    #[arg(long)]
    pub activities: Option<String>,

    /// Twitter/X handle, with or without the leading `@`
    #[arg(long)]
    pub twitter: Option<String>,

    /// Interest to select; repeat for several (cs-go, furia, eventos-presenciais)
    #[arg(long = "interest", value_parser = parse_interest)]
    pub interests: Vec<Interest>,

    /// Image of the identity document (RG/CPF)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

fn parse_interest(raw: &str) -> Result<Interest, String> {
    raw.parse::<Interest>().map_err(|e| e.to_string())
}

/// Fills a [`FanForm`] from the command-line arguments and the document file.
///
/// The whole `--cpf` value is checked before it reaches the form, whose
/// keystroke mask would drop digits past the eleventh.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCpf`] unless `--cpf` holds exactly 11 digits.
pub(crate) fn build_form(
    args: &SubmitArgs,
    document: Option<DocumentImage>,
) -> Result<FanForm, CoreError> {
    Cpf::parse(&args.cpf)?;

    let mut form = FanForm::new();
    form.update_field(FormField::Name, &args.name);
    form.update_field(FormField::Email, &args.email);
    form.update_field(FormField::Cpf, &args.cpf);
    let optional = [
        (FormField::Address, &args.address),
        (FormField::Activities, &args.activities),
        (FormField::Twitter, &args.twitter),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            form.update_field(field, value);
        }
    }
    for interest in &args.interests {
        // Repeating a flag selects; it never toggles back off.
        if !form.interests().is_set(*interest) {
            form.toggle_interest(*interest);
        }
    }
    if let Some(document) = document {
        form.accept_file(document);
    }
    Ok(form)
}

async fn read_document(path: &Path) -> anyhow::Result<DocumentImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_owned());
    tracing::debug!(file = %path.display(), bytes = bytes.len(), "document loaded");
    Ok(DocumentImage::from_file_name(file_name, bytes)?)
}

/// Validate, submit, and print the resulting board.
///
/// # Errors
///
/// Returns an error if the document cannot be read or is not an image, the
/// CPF is invalid, or the write request fails. Enrichment failures are
/// printed as placeholders and do not fail the command.
pub(crate) async fn run_submit(config: &AppConfig, args: &SubmitArgs) -> anyhow::Result<()> {
    let document = match &args.file {
        Some(path) => Some(read_document(path).await?),
        None => None,
    };
    let profile = build_form(args, document)
        .and_then(|form| form.submit())
        .context("Por favor, insira um CPF válido com 11 dígitos.")?;

    let board = Arc::new(DisplayBoard::new());
    let orchestrator = SubmissionOrchestrator::from_config(config, Arc::clone(&board))?;
    let outcome = orchestrator.submit(profile).await;

    print!("{}", render_view(&board.view()));
    outcome?;
    Ok(())
}

pub(crate) async fn run_ping(config: &AppConfig) -> anyhow::Result<()> {
    let client = FanApiClient::new(config)?;
    let status = client
        .health()
        .await
        .with_context(|| format!("backend at {} is not reachable", client.base_url()))?;
    println!(
        "{}: {}",
        client.base_url(),
        status.as_deref().unwrap_or("ok")
    );
    Ok(())
}

/// Renders the board the way the intake page lays it out.
pub(crate) fn render_view(view: &BoardView) -> String {
    let mut out = String::new();

    if let Some(banner) = &view.banner {
        out.push_str(banner.text());
        out.push('\n');
    }

    if let Some(social) = &view.social {
        let snap = social.value();
        if !snap.recent_posts.is_empty() {
            out.push_str(&format!(
                "\n{}\nSeguidores: {}\nÚltimos tweets:\n",
                snap.display_name, snap.follower_count
            ));
            push_posts(&mut out, &snap.recent_posts);
        }
    }

    if let Some(feed) = &view.feed {
        let posts = &feed.value().recent_posts;
        if !posts.is_empty() {
            out.push_str("\nEm destaque do #FURIA\n");
            push_posts(&mut out, posts);
        }
    }

    out
}

fn push_posts(out: &mut String, posts: &[String]) {
    for post in posts {
        out.push_str(&format!("  - {post}\n"));
    }
}
