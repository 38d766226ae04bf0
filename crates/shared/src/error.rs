use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::StatusErrorKind;

/// Why `submit()` refused to enter `Sending`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitRejection {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("name, email and message are required")]
    MissingFields,
    #[error("email address is malformed")]
    InvalidEmail,
    #[error("delivery service credentials are not configured")]
    NotConfigured,
}

impl SubmitRejection {
    /// Status category shown to the user. `InFlight` is silent.
    pub fn kind(&self) -> Option<StatusErrorKind> {
        match self {
            Self::InFlight => None,
            Self::MissingFields | Self::InvalidEmail => Some(StatusErrorKind::Validation),
            Self::NotConfigured => Some(StatusErrorKind::Configuration),
        }
    }
}

/// The host cannot report viewport intersections; highlighting is disabled
/// but manual navigation keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("viewport intersection is not supported by this host")]
pub struct ObserverUnavailable;
