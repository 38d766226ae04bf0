//! Interactive core of the portfolio page: section tracking, dock
//! navigation, the startup view correction, and the contact submission
//! lifecycle. Rendering hosts plug in through [`document::Document`] and
//! [`delivery::DeliveryService`].

pub mod delivery;
pub mod document;
pub mod initial_view;
pub mod intersection;
pub mod navigation;
pub mod observer;
pub mod settings;
mod shell;
pub mod submission;

pub use delivery::{DeliveryError, DeliveryService, EmailJsClient};
pub use document::{
    Document, ElementRect, MemoryDocument, ScrollBehavior, ScrollCommand, ScrollTarget, Viewport,
};
pub use initial_view::{InitialView, InitialViewResolver};
pub use intersection::{IntersectionEntry, IntersectionTracker, ObserverOptions};
pub use navigation::{NavItem, NavigationControl};
pub use observer::SectionObserver;
pub use settings::{load_settings, load_settings_from, DeliveryCredentials, SiteSettings};
pub use shell::SiteShell;
pub use submission::{is_valid_email, PendingDelivery, StatusMessages, SubmissionMachine};
