//! Contact form lifecycle: `Idle -> Sending -> Success | Error`.
//!
//! Validation and the configuration check run synchronously inside
//! [`SubmissionMachine::begin`]; only the delivery itself is asynchronous.
//! Every attempt that enters `Sending` is settled exactly once, either by
//! [`SubmissionMachine::settle`] / [`SubmissionMachine::abandon`] or by the
//! scope guard inside [`SubmissionMachine::submit`].

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::LazyLock,
};

use futures::FutureExt;
use regex::Regex;
use shared::{
    domain::{AttemptId, ContactDraft, StatusErrorKind, SubmissionStatus},
    error::SubmitRejection,
    protocol::{DeliveryAuth, TemplateParams},
};
use tracing::{debug, error, info};

use crate::{
    delivery::{DeliveryError, DeliveryService},
    settings::{DeliveryCredentials, SiteSettings},
};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessages {
    pub missing_fields: String,
    pub invalid_email: String,
    pub not_configured: String,
    pub sent: String,
    pub delivery_failed: String,
}

impl StatusMessages {
    pub fn with_fallback_contact(fallback_contact: &str) -> Self {
        Self {
            missing_fields: "Please fill out your name, email, and message.".to_string(),
            invalid_email: "Please enter a valid email address.".to_string(),
            not_configured: "Email service is not configured. Please set the EmailJS credentials."
                .to_string(),
            sent: "Thanks! Your message was sent. I'll get back to you soon.".to_string(),
            delivery_failed: format!(
                "Something went wrong while sending. Please try again later or reach me on {fallback_contact}."
            ),
        }
    }

    fn for_rejection(&self, rejection: &SubmitRejection) -> Option<&str> {
        match rejection {
            SubmitRejection::InFlight => None,
            SubmitRejection::MissingFields => Some(&self.missing_fields),
            SubmitRejection::InvalidEmail => Some(&self.invalid_email),
            SubmitRejection::NotConfigured => Some(&self.not_configured),
        }
    }
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self::with_fallback_contact("LinkedIn")
    }
}

/// Everything a delivery worker needs for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelivery {
    pub attempt: AttemptId,
    pub service_id: String,
    pub template_id: String,
    pub params: TemplateParams,
    pub auth: DeliveryAuth,
}

impl PendingDelivery {
    /// Call the collaborator once. Panics, whether raised while building the
    /// future or while polling it, come back as [`DeliveryError::Panicked`].
    pub async fn deliver(&self, delivery: &dyn DeliveryService) -> Result<(), DeliveryError> {
        let send = panic::catch_unwind(AssertUnwindSafe(|| {
            delivery.send(&self.service_id, &self.template_id, &self.params, &self.auth)
        }));
        let outcome = match send {
            Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
            Err(payload) => Err(payload),
        };
        outcome.unwrap_or_else(|payload| Err(DeliveryError::Panicked(panic_message(&*payload))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

pub struct SubmissionMachine {
    draft: ContactDraft,
    status: SubmissionStatus,
    in_flight: Option<AttemptId>,
    recipient: String,
    credentials: Option<DeliveryCredentials>,
    messages: StatusMessages,
}

impl SubmissionMachine {
    pub fn new(
        recipient: impl Into<String>,
        credentials: Option<DeliveryCredentials>,
        messages: StatusMessages,
    ) -> Self {
        Self {
            draft: ContactDraft::default(),
            status: SubmissionStatus::Idle,
            in_flight: None,
            recipient: recipient.into(),
            credentials,
            messages,
        }
    }

    pub fn from_settings(settings: &SiteSettings) -> Self {
        Self::new(
            settings.contact_recipient.clone(),
            settings.credentials(),
            StatusMessages::with_fallback_contact(&settings.fallback_contact),
        )
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    /// The draft for editing; `None` while a delivery is in flight.
    pub fn edit(&mut self) -> Option<&mut ContactDraft> {
        if self.in_flight.is_some() {
            return None;
        }
        Some(&mut self.draft)
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<AttemptId> {
        self.in_flight
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Validate the draft and enter `Sending`. On rejection the status
    /// carries the user-facing message, except for `InFlight`, which leaves
    /// everything untouched.
    pub fn begin(&mut self) -> Result<PendingDelivery, SubmitRejection> {
        if let Some(attempt) = self.in_flight {
            debug!(%attempt, "submit ignored while a delivery is in flight");
            return Err(SubmitRejection::InFlight);
        }

        self.status = SubmissionStatus::Idle;

        if self.draft.has_blank_field() {
            return Err(self.reject(SubmitRejection::MissingFields));
        }
        if !is_valid_email(&self.draft.email) {
            return Err(self.reject(SubmitRejection::InvalidEmail));
        }
        let Some(credentials) = self.credentials.clone() else {
            return Err(self.reject(SubmitRejection::NotConfigured));
        };

        let attempt = AttemptId::new();
        self.in_flight = Some(attempt);
        self.status = SubmissionStatus::Sending;
        info!(%attempt, "contact submission sending");

        Ok(PendingDelivery {
            attempt,
            service_id: credentials.service_id,
            template_id: credentials.template_id,
            params: TemplateParams::from_draft(&self.draft, &self.recipient),
            auth: DeliveryAuth {
                public_key: credentials.public_key,
            },
        })
    }

    /// Leave `Sending` for `attempt`. Completions for any other attempt are
    /// ignored and return `false`.
    pub fn settle(&mut self, attempt: AttemptId, outcome: Result<(), DeliveryError>) -> bool {
        if self.in_flight != Some(attempt) {
            debug!(%attempt, "ignoring completion for a stale attempt");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(()) => {
                info!(%attempt, "contact message delivered");
                self.status = SubmissionStatus::Success(self.messages.sent.clone());
                self.draft.clear();
            }
            Err(err) => {
                error!(%attempt, error = %err, "contact delivery failed");
                self.status = SubmissionStatus::Error {
                    kind: StatusErrorKind::Delivery,
                    message: self.messages.delivery_failed.clone(),
                };
            }
        }
        true
    }

    /// Fail the in-flight attempt, if any, because its result will never
    /// arrive.
    pub fn abandon(&mut self) -> bool {
        match self.in_flight {
            Some(attempt) => self.settle(attempt, Err(DeliveryError::Abandoned)),
            None => false,
        }
    }

    /// Begin, deliver and settle in one go.
    pub async fn submit(&mut self, delivery: &dyn DeliveryService) -> SubmissionStatus {
        let pending = match self.begin() {
            Ok(pending) => pending,
            Err(_) => return self.status.clone(),
        };

        let scope = SendingScope::enter(self, pending.attempt);
        let outcome = pending.deliver(delivery).await;
        scope.finish(outcome);

        self.status.clone()
    }

    fn reject(&mut self, rejection: SubmitRejection) -> SubmitRejection {
        if let (Some(kind), Some(message)) =
            (rejection.kind(), self.messages.for_rejection(&rejection))
        {
            debug!(%rejection, "contact submission rejected");
            self.status = SubmissionStatus::Error {
                kind,
                message: message.to_string(),
            };
        }
        rejection
    }
}

/// Holds the machine while an attempt is in flight; dropping it without
/// [`SendingScope::finish`] settles the attempt as abandoned.
struct SendingScope<'a> {
    machine: Option<&'a mut SubmissionMachine>,
    attempt: AttemptId,
}

impl<'a> SendingScope<'a> {
    fn enter(machine: &'a mut SubmissionMachine, attempt: AttemptId) -> Self {
        Self {
            machine: Some(machine),
            attempt,
        }
    }

    fn finish(mut self, outcome: Result<(), DeliveryError>) {
        if let Some(machine) = self.machine.take() {
            machine.settle(self.attempt, outcome);
        }
    }
}

impl Drop for SendingScope<'_> {
    fn drop(&mut self) {
        if let Some(machine) = self.machine.take() {
            machine.settle(self.attempt, Err(DeliveryError::Abandoned));
        }
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
