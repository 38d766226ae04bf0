//! Navigation control: the dock of section targets.

use shared::domain::{ActiveSection, SectionId, SectionList};
use tokio::sync::watch;
use tracing::debug;

use crate::document::{Document, ScrollBehavior, ScrollCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: SectionId,
    pub label: String,
    pub is_active: bool,
}

/// Reads the active section, never writes it.
pub struct NavigationControl {
    sections: SectionList,
    active: watch::Receiver<ActiveSection>,
}

impl NavigationControl {
    pub fn new(sections: SectionList, active: watch::Receiver<ActiveSection>) -> Self {
        Self { sections, active }
    }

    /// Items in navigation order with the highlight derived from the
    /// current active section.
    pub fn items(&self) -> Vec<NavItem> {
        let active = self.active.borrow();
        self.sections
            .iter()
            .map(|section| NavItem {
                id: section.id.clone(),
                label: section.label.clone(),
                is_active: active.is(&section.id),
            })
            .collect()
    }

    /// Smooth-scroll `section_id` to the top of the viewport. Unknown ids
    /// and absent elements are a silent no-op.
    pub fn select(&self, section_id: &str, document: &mut dyn Document) -> Option<ScrollCommand> {
        let Some(section) = self.sections.get(section_id) else {
            debug!(section = section_id, "navigation to unknown section ignored");
            return None;
        };
        let Some(rect) = document.element_rect(&section.id) else {
            debug!(section = section_id, "navigation target element missing");
            return None;
        };

        let command = ScrollCommand::to_section(section.id.clone(), rect, ScrollBehavior::Smooth);
        document.scroll_to(command.clone());
        Some(command)
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
