//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use site_core::{DeliveryService, EmailJsClient, SiteSettings};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: SiteSettings,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                return;
            }
        };

        let client =
            match EmailJsClient::new(&settings.emailjs_api_url, settings.request_timeout()) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!("failed to build EmailJS client: {err}");
                    let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                        "failed to build EmailJS client: {err}"
                    )));
                    return;
                }
            };

        runtime.block_on(serve(cmd_rx, ui_tx, &client));
        tracing::debug!("backend worker stopped");
    })
}

async fn serve(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    delivery: &dyn DeliveryService,
) {
    // The UI owns the sender; recv fails once the window closes.
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Deliver(pending) => {
                let outcome = pending.deliver(delivery).await;
                let event = UiEvent::DeliveryFinished {
                    attempt: pending.attempt,
                    outcome,
                };
                if ui_tx.send(event).is_err() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crossbeam_channel::bounded;
    use shared::{
        domain::ContactDraft,
        protocol::{DeliveryAuth, TemplateParams},
    };
    use site_core::{DeliveryCredentials, DeliveryError, StatusMessages, SubmissionMachine};

    struct Immediate;

    #[async_trait]
    impl DeliveryService for Immediate {
        async fn send(
            &self,
            _service_id: &str,
            _template_id: &str,
            _params: &TemplateParams,
            _auth: &DeliveryAuth,
        ) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    #[test]
    fn worker_reports_each_delivery() {
        let mut machine = SubmissionMachine::new(
            "owner@example.com",
            Some(DeliveryCredentials {
                service_id: "svc".to_string(),
                template_id: "tpl".to_string(),
                public_key: "pk".to_string(),
            }),
            StatusMessages::default(),
        );
        if let Some(draft) = machine.edit() {
            *draft = ContactDraft::new("Ada", "ada@example.com", "hi");
        }
        let pending = machine.begin().expect("valid draft");
        let attempt = pending.attempt;

        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        cmd_tx
            .send(BackendCommand::Deliver(pending))
            .expect("queue command");
        drop(cmd_tx);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        runtime.block_on(serve(cmd_rx, ui_tx, &Immediate));

        match ui_rx.try_recv().expect("delivery event") {
            UiEvent::DeliveryFinished {
                attempt: finished,
                outcome,
            } => {
                assert_eq!(finished, attempt);
                assert!(outcome.is_ok());
            }
            UiEvent::WorkerFailed(reason) => panic!("unexpected failure: {reason}"),
        }
        assert!(machine.settle(attempt, Ok(())));
    }
}
