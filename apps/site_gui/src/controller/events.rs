//! Events sent from the backend worker back to the UI thread.

use shared::domain::AttemptId;
use site_core::DeliveryError;

pub enum UiEvent {
    DeliveryFinished {
        attempt: AttemptId,
        outcome: Result<(), DeliveryError>,
    },
    WorkerFailed(String),
}
