//! Portfolio page host: one scrolling column of sections, the floating dock,
//! and the contact form.

use std::time::Duration;

use chrono::Datelike;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use eframe::egui;
use shared::domain::{SectionId, SectionList, SubmissionStatus};
use site_core::{
    Document, ElementRect, ObserverOptions, ScrollBehavior, SiteSettings, SiteShell,
    SubmissionMachine, Viewport,
};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::page_document::PageDocument;

const OWNER_NAME: &str = "Jordan Reyes";
const TAGLINE: &str = "Software Engineer • Mobile Developer • TypeScript";
const ABOUT_TEXT: &str = "Full-stack developer with a front-end focus, delivering robust, \
accessible and performant apps. I turn product goals into clean component-driven interfaces, \
integrate reliable APIs, and ship features end to end.";
const CORE_SKILLS: &[&str] = &[
    "TypeScript",
    "React",
    "Node.js",
    "Rust",
    "PostgreSQL",
    "Cloud platforms",
];
const EXPERIENCE: &[(&str, &str, &str)] = &[
    (
        "Full Stack Developer",
        "2023 to present",
        "Building and improving enterprise menu management applications across the stack.",
    ),
    (
        "Software Engineer Intern",
        "2023",
        "User interface work and issue triage in a production codebase.",
    ),
];

const PAGE_SCROLL_ID: &str = "portfolio_page";
const DOCK_MARGIN: f32 = 16.0;
const FORM_MAX_WIDTH: f32 = 560.0;
const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);

pub struct StartupConfig {
    pub location: Url,
    pub settings: SiteSettings,
}

pub struct PortfolioApp {
    sections: SectionList,
    shell: SiteShell,
    document: PageDocument,
    machine: SubmissionMachine,
    fallback_contact: String,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    worker_alive: bool,
    shown_title: Option<String>,
}

impl PortfolioApp {
    pub fn new(
        startup: StartupConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let sections = SectionList::portfolio();
        Self {
            shell: SiteShell::new(sections.clone(), ObserverOptions::default()),
            sections,
            document: PageDocument::new(startup.location),
            machine: SubmissionMachine::from_settings(&startup.settings),
            fallback_contact: startup.settings.fallback_contact,
            cmd_tx,
            ui_rx,
            worker_alive: true,
            shown_title: None,
        }
    }

    fn process_ui_events(&mut self) {
        loop {
            match self.ui_rx.try_recv() {
                Ok(UiEvent::DeliveryFinished { attempt, outcome }) => {
                    self.machine.settle(attempt, outcome);
                }
                Ok(UiEvent::WorkerFailed(reason)) => {
                    tracing::error!(%reason, "backend worker failed");
                    self.worker_alive = false;
                    self.machine.abandon();
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.worker_alive {
                        tracing::warn!("backend worker disconnected");
                        self.worker_alive = false;
                    }
                    // Nothing can settle the attempt anymore.
                    self.machine.abandon();
                    break;
                }
            }
        }
    }

    fn submit_contact(&mut self) {
        let Ok(pending) = self.machine.begin() else {
            return;
        };
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Deliver(pending))
        {
            tracing::error!(error = %err, "could not hand delivery to the backend worker");
            self.machine.abandon();
        }
    }

    fn select_section(&mut self, section_id: &str) {
        if let Some(command) = self.shell.select(section_id, &mut self.document) {
            tracing::debug!(section = section_id, offset = command.offset, "dock navigation");
        }
    }

    fn mount_when_laid_out(&mut self) {
        if self.shell.is_mounted() || !self.document.is_laid_out(&self.sections) {
            return;
        }
        if let Some(view) = self.shell.mount(&mut self.document) {
            tracing::info!(
                offset = view.scroll.offset,
                location = %self.document.location(),
                "initial view resolved"
            );
        }
    }

    fn show_page(&mut self, ctx: &egui::Context) {
        let pending = self.document.take_pending_scroll();
        let sections = self.sections.clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut scroll_area = egui::ScrollArea::vertical()
                .id_salt(PAGE_SCROLL_ID)
                .auto_shrink([false, false]);
            let mut smooth_offset = None;
            match &pending {
                Some(command) if command.behavior == ScrollBehavior::Instant => {
                    scroll_area = scroll_area.vertical_scroll_offset(command.offset);
                }
                Some(command) => smooth_offset = Some(command.offset),
                None => {}
            }
            let section_height = ui.available_height();

            let output = scroll_area.show(ui, |ui| {
                let origin = ui.min_rect().top();
                for section in sections.iter() {
                    let rect = ui
                        .scope(|ui| {
                            ui.set_min_height(section_height);
                            ui.set_width(ui.available_width());
                            self.show_section(ui, &section.id);
                        })
                        .response
                        .rect;
                    self.document.record_section(
                        section.id.clone(),
                        ElementRect {
                            top: rect.top() - origin,
                            height: rect.height(),
                        },
                    );
                }
                show_footer(ui);

                if let Some(offset) = smooth_offset {
                    let target = egui::Rect::from_min_size(
                        egui::pos2(ui.min_rect().left(), origin + offset),
                        egui::vec2(1.0, section_height),
                    );
                    ui.scroll_to_rect(target, Some(egui::Align::TOP));
                }
            });

            self.document.set_viewport(Viewport {
                scroll_top: output.state.offset.y,
                height: output.inner_rect.height(),
            });
        });
    }

    fn show_section(&mut self, ui: &mut egui::Ui, id: &SectionId) {
        match id.as_str() {
            "home" => self.show_home(ui),
            "about" => show_about(ui),
            "contact" => self.show_contact(ui),
            other => {
                ui.heading(other);
            }
        }
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        ui.add_space(ui.available_height() * 0.3);
        ui.label(egui::RichText::new(OWNER_NAME).size(56.0).strong());
        ui.add_space(8.0);
        ui.label(egui::RichText::new(TAGLINE).size(18.0));
        ui.add_space(16.0);
        if ui.button("Get in touch").clicked() {
            self.select_section("contact");
        }
    }

    fn show_contact(&mut self, ui: &mut egui::Ui) {
        ui.add_space(48.0);
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new("Contact").size(32.0).strong());
            ui.label(format!("or reach me on {}", self.fallback_contact));
        });
        ui.label("Let's connect. Send me a message and I'll get back to you.");
        ui.add_space(12.0);
        show_status_banner(ui, self.machine.status());

        let sending = self.machine.is_sending();
        let width = ui.available_width().min(FORM_MAX_WIDTH);
        let mut draft = self.machine.draft().clone();

        ui.label("Name");
        ui.add_enabled(
            !sending,
            egui::TextEdit::singleline(&mut draft.name)
                .hint_text("Your name")
                .desired_width(width),
        );
        ui.label("Email");
        ui.add_enabled(
            !sending,
            egui::TextEdit::singleline(&mut draft.email)
                .hint_text("name@example.com")
                .desired_width(width),
        );
        ui.label("Message");
        ui.add_enabled(
            !sending,
            egui::TextEdit::multiline(&mut draft.message)
                .hint_text("How can I help?")
                .desired_rows(5)
                .desired_width(width),
        );

        if let Some(current) = self.machine.edit() {
            if *current != draft {
                *current = draft;
            }
        }

        ui.add_space(8.0);
        if sending {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Sending...");
            });
        } else if ui.button("Send message").clicked() {
            self.submit_contact();
        }
    }

    fn show_dock(&mut self, ctx: &egui::Context) {
        let items = self.shell.nav_items();
        let mut selected = None;

        egui::Area::new(egui::Id::new("portfolio_dock"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -DOCK_MARGIN))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for item in &items {
                            let button =
                                egui::Button::new(item.label.as_str()).selected(item.is_active);
                            if ui.add(button).clicked() {
                                selected = Some(item.id.clone());
                            }
                        }
                    });
                });
            });

        if let Some(id) = selected {
            self.select_section(id.as_str());
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = window_title(&self.document.location());
        if self.shown_title.as_deref() != Some(title.as_str()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.shown_title = Some(title);
        }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_page(ctx);
        self.mount_when_laid_out();
        self.shell.on_viewport_change(&self.document);
        self.show_dock(ctx);
        self.sync_title(ctx);

        if self.machine.is_sending() || self.document.has_pending_scroll() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn show_about(ui: &mut egui::Ui) {
    ui.add_space(48.0);
    ui.heading(egui::RichText::new("About").size(32.0).strong());
    ui.add_space(8.0);
    ui.label(ABOUT_TEXT);
    ui.add_space(16.0);

    ui.label(egui::RichText::new("Core skills").strong());
    ui.horizontal_wrapped(|ui| {
        for skill in CORE_SKILLS {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(*skill);
            });
        }
    });
    ui.add_space(16.0);

    ui.label(egui::RichText::new("Experience").strong());
    for (role, period, summary) in EXPERIENCE {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(*role).strong());
            ui.weak(*period);
        });
        ui.label(*summary);
    }
}

fn show_status_banner(ui: &mut egui::Ui, status: &SubmissionStatus) {
    let Some(message) = status.message() else {
        return;
    };
    let color = match status {
        SubmissionStatus::Success(_) => SUCCESS_COLOR,
        _ => ui.visuals().error_fg_color,
    };
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, color))
        .show(ui, |ui| {
            ui.colored_label(color, message);
        });
    ui.add_space(8.0);
}

fn show_footer(ui: &mut egui::Ui) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.weak(footer_text(chrono::Local::now().year()));
    });
    // Room for the dock so it never covers the footer.
    ui.add_space(72.0);
}

fn footer_text(year: i32) -> String {
    format!("© {year} {OWNER_NAME}. All rights reserved.")
}

fn window_title(location: &Url) -> String {
    match location.fragment() {
        Some(fragment) if !fragment.is_empty() => format!("{OWNER_NAME} | Portfolio #{fragment}"),
        _ => format!("{OWNER_NAME} | Portfolio"),
    }
}
