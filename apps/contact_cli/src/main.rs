use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shared::{
    domain::{ContactDraft, SubmissionStatus},
    protocol::EmailJsSendRequest,
};
use site_core::{load_settings, load_settings_from, EmailJsClient, SubmissionMachine};
use tracing_subscriber::EnvFilter;

/// Send one message through the portfolio contact form.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
    /// Settings file; defaults to ./site.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Validate and print the EmailJS payload without sending it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };

    let mut machine = SubmissionMachine::from_settings(&settings);
    tracing::debug!(
        configured = machine.is_configured(),
        api_url = %settings.emailjs_api_url,
        "loaded contact settings"
    );
    if let Some(draft) = machine.edit() {
        *draft = ContactDraft::new(args.name, args.email, args.message);
    }

    if args.dry_run {
        let pending = match machine.begin() {
            Ok(pending) => pending,
            Err(_) => bail!(outcome_text(machine.status())),
        };
        let request = EmailJsSendRequest {
            service_id: pending.service_id,
            template_id: pending.template_id,
            user_id: pending.auth.public_key,
            template_params: pending.params,
        };
        println!(
            "Prepared EmailJS payload: {}",
            serde_json::to_string_pretty(&request)?
        );
        return Ok(());
    }

    let client = EmailJsClient::new(&settings.emailjs_api_url, settings.request_timeout())
        .context("failed to build EmailJS client")?;
    let status = machine.submit(&client).await;
    match status {
        SubmissionStatus::Success(_) => {
            println!("{}", outcome_text(&status));
            Ok(())
        }
        _ => bail!(outcome_text(&status)),
    }
}

fn outcome_text(status: &SubmissionStatus) -> String {
    status
        .message()
        .unwrap_or("Submission did not complete.")
        .to_string()
}
