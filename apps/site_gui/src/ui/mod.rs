//! UI layer: the portfolio page, its dock, and the contact form.

pub mod app;
pub mod page_document;

pub use app::{PortfolioApp, StartupConfig};
