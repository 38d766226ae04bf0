use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use site_core::{load_settings, load_settings_from};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{PortfolioApp, StartupConfig};

/// Desktop host for the portfolio page.
#[derive(Parser, Debug)]
struct Args {
    /// Address the page is opened at; any fragment is a deep link.
    #[arg(long, default_value = "app://portfolio/")]
    open: String,
    /// Settings file; defaults to ./site.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let location = Url::parse(&args.open)
        .with_context(|| format!("invalid --open address '{}'", args.open))?;
    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if settings.credentials().is_none() {
        tracing::warn!("EmailJS credentials missing; the contact form will refuse to send");
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let _worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Portfolio")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    let startup = StartupConfig { location, settings };
    eframe::run_native(
        "Portfolio",
        options,
        Box::new(move |_cc| Ok(Box::new(PortfolioApp::new(startup, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run portfolio window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_bare_page_address() {
        let args = Args::try_parse_from(["site_gui"]).expect("args");
        assert_eq!(args.open, "app://portfolio/");
        assert!(args.config.is_none());
    }

    #[test]
    fn accepts_a_deep_link() {
        let args =
            Args::try_parse_from(["site_gui", "--open", "app://portfolio/#about"]).expect("args");
        let url = Url::parse(&args.open).expect("url");
        assert_eq!(url.fragment(), Some("about"));
    }
}
