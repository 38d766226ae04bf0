//! [`Document`] backed by the egui page layout of the previous frame.

use std::collections::HashMap;

use shared::domain::{SectionId, SectionList};
use site_core::{Document, ElementRect, ScrollCommand, Viewport};
use url::Url;

pub struct PageDocument {
    sections: HashMap<SectionId, ElementRect>,
    viewport: Viewport,
    location: Url,
    history_len: usize,
    pending_scroll: Option<ScrollCommand>,
}

impl PageDocument {
    pub fn new(location: Url) -> Self {
        Self {
            sections: HashMap::new(),
            viewport: Viewport {
                scroll_top: 0.0,
                height: 0.0,
            },
            location,
            history_len: 1,
            pending_scroll: None,
        }
    }

    pub fn record_section(&mut self, id: SectionId, rect: ElementRect) {
        self.sections.insert(id, rect);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// True once every section has been laid out and the viewport measured.
    pub fn is_laid_out(&self, sections: &SectionList) -> bool {
        self.viewport.height > 0.0 && sections.iter().all(|s| self.sections.contains_key(&s.id))
    }

    pub fn take_pending_scroll(&mut self) -> Option<ScrollCommand> {
        self.pending_scroll.take()
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll.is_some()
    }
}

impl Document for PageDocument {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_rect(&self, id: &SectionId) -> Option<ElementRect> {
        self.sections.get(id).copied()
    }

    fn supports_intersection(&self) -> bool {
        true
    }

    fn scroll_to(&mut self, command: ScrollCommand) {
        tracing::trace!(offset = command.offset, behavior = ?command.behavior, "queued page scroll");
        self.pending_scroll = Some(command);
    }

    fn location(&self) -> Url {
        self.location.clone()
    }

    fn replace_location(&mut self, location: Url) {
        self.location = location;
    }

    fn history_len(&self) -> usize {
        self.history_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_core::{ScrollBehavior, ScrollTarget};

    fn document() -> PageDocument {
        PageDocument::new(Url::parse("app://portfolio/#about").expect("url"))
    }

    #[test]
    fn waits_for_every_section_and_a_viewport() {
        let sections = SectionList::portfolio();
        let mut doc = document();
        for (index, section) in sections.iter().enumerate() {
            assert!(!doc.is_laid_out(&sections));
            doc.record_section(
                section.id.clone(),
                ElementRect {
                    top: index as f32 * 700.0,
                    height: 700.0,
                },
            );
        }
        assert!(!doc.is_laid_out(&sections));

        doc.set_viewport(Viewport {
            scroll_top: 0.0,
            height: 700.0,
        });
        assert!(doc.is_laid_out(&sections));
    }

    #[test]
    fn scroll_requests_wait_for_the_next_frame() {
        let mut doc = document();
        doc.scroll_to(ScrollCommand::to_top(ScrollBehavior::Instant));
        assert!(doc.has_pending_scroll());

        let command = doc.take_pending_scroll().expect("pending scroll");
        assert_eq!(command.target, ScrollTarget::DocumentTop);
        assert!(doc.take_pending_scroll().is_none());
    }

    #[test]
    fn replacing_location_keeps_history() {
        let mut doc = document();
        doc.replace_location(Url::parse("app://portfolio/#home").expect("url"));
        assert_eq!(doc.location().fragment(), Some("home"));
        assert_eq!(doc.history_len(), 1);
    }
}
