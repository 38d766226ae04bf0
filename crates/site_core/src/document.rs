//! Host seam: the parts of a rendered page the shell reads and drives.

use std::collections::BTreeMap;

use shared::domain::{SectionId, SectionList};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
}

/// Element geometry in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f32,
    pub height: f32,
}

impl ElementRect {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Section(SectionId),
    DocumentTop,
}

/// Align `target`'s top edge with the viewport's top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollCommand {
    pub target: ScrollTarget,
    pub offset: f32,
    pub behavior: ScrollBehavior,
}

impl ScrollCommand {
    pub fn to_section(id: SectionId, rect: ElementRect, behavior: ScrollBehavior) -> Self {
        Self {
            target: ScrollTarget::Section(id),
            offset: rect.top,
            behavior,
        }
    }

    pub fn to_top(behavior: ScrollBehavior) -> Self {
        Self {
            target: ScrollTarget::DocumentTop,
            offset: 0.0,
            behavior,
        }
    }
}

pub trait Document {
    fn viewport(&self) -> Viewport;
    fn element_rect(&self, id: &SectionId) -> Option<ElementRect>;
    fn supports_intersection(&self) -> bool;
    fn scroll_to(&mut self, command: ScrollCommand);
    fn location(&self) -> Url;
    /// Swap the current address without adding a history entry.
    fn replace_location(&mut self, location: Url);
    fn history_len(&self) -> usize;
}

/// Headless page: sections laid out by hand, scrolling applied immediately.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: BTreeMap<SectionId, ElementRect>,
    viewport: Viewport,
    document_height: f32,
    location: Url,
    history_len: usize,
    scroll_log: Vec<ScrollCommand>,
    intersection: bool,
}

impl MemoryDocument {
    pub fn new(location: Url, viewport_height: f32) -> Self {
        Self {
            elements: BTreeMap::new(),
            viewport: Viewport {
                scroll_top: 0.0,
                height: viewport_height,
            },
            document_height: viewport_height,
            location,
            history_len: 1,
            scroll_log: Vec::new(),
            intersection: true,
        }
    }

    /// One element per section, each `section_height` tall, stacked in order.
    pub fn stacked(
        sections: &SectionList,
        section_height: f32,
        viewport_height: f32,
        location: Url,
    ) -> Self {
        let mut document = Self::new(location, viewport_height);
        for (index, section) in sections.iter().enumerate() {
            document = document.with_element(
                section.id.clone(),
                ElementRect {
                    top: index as f32 * section_height,
                    height: section_height,
                },
            );
        }
        document
    }

    pub fn with_element(mut self, id: SectionId, rect: ElementRect) -> Self {
        self.elements.insert(id, rect);
        self.document_height = self.document_height.max(rect.bottom());
        self
    }

    pub fn without_element(mut self, id: &SectionId) -> Self {
        self.elements.remove(id);
        self
    }

    pub fn without_intersection(mut self) -> Self {
        self.intersection = false;
        self
    }

    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.viewport.scroll_top = scroll_top.clamp(0.0, self.max_scroll());
    }

    /// Regular navigation: adds a history entry.
    pub fn push_location(&mut self, location: Url) {
        self.location = location;
        self.history_len += 1;
    }

    pub fn scroll_log(&self) -> &[ScrollCommand] {
        &self.scroll_log
    }

    fn max_scroll(&self) -> f32 {
        (self.document_height - self.viewport.height).max(0.0)
    }
}

impl Document for MemoryDocument {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_rect(&self, id: &SectionId) -> Option<ElementRect> {
        self.elements.get(id).copied()
    }

    fn supports_intersection(&self) -> bool {
        self.intersection
    }

    fn scroll_to(&mut self, command: ScrollCommand) {
        self.set_scroll_top(command.offset);
        self.scroll_log.push(command);
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
