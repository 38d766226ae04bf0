//! Backend commands queued from UI to backend worker.

use site_core::PendingDelivery;

pub enum BackendCommand {
    Deliver(PendingDelivery),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Deliver(_) => "deliver",
        }
    }
}
