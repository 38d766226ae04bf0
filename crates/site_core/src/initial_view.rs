//! One-shot startup correction: land on the canonical section regardless of
//! any inbound deep link.

use shared::domain::SectionId;
use tracing::{debug, info};

use crate::document::{Document, ScrollBehavior, ScrollCommand};

#[derive(Debug, Clone, PartialEq)]
pub struct InitialView {
    pub scroll: ScrollCommand,
    /// The fragment that was replaced, when it differed from the canonical one.
    pub replaced_fragment: Option<Option<String>>,
}

#[derive(Debug)]
pub struct InitialViewResolver {
    canonical: SectionId,
    resolved: bool,
}

impl InitialViewResolver {
    pub fn new(canonical: SectionId) -> Self {
        Self {
            canonical,
            resolved: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Jump (no animation) to the canonical section, or to the document top
    /// when it is absent, then rewrite the address fragment in place. Only
    /// the first call does anything.
    pub fn resolve(&mut self, document: &mut dyn Document) -> Option<InitialView> {
        if self.resolved {
            return None;
        }
        self.resolved = true;

        let scroll = match document.element_rect(&self.canonical) {
            Some(rect) => {
                ScrollCommand::to_section(self.canonical.clone(), rect, ScrollBehavior::Instant)
            }
            None => {
                debug!(section = %self.canonical, "canonical section missing; jumping to top");
                ScrollCommand::to_top(ScrollBehavior::Instant)
            }
        };
        document.scroll_to(scroll.clone());

        let mut location = document.location();
        let replaced_fragment = if location.fragment() != Some(self.canonical.as_str()) {
            let previous = location.fragment().map(str::to_string);
            location.set_fragment(Some(self.canonical.as_str()));
            document.replace_location(location);
            info!(
                previous = previous.as_deref().unwrap_or(""),
                section = %self.canonical,
                "normalized address fragment"
            );
            Some(previous)
        } else {
            None
        };

        Some(InitialView {
            scroll,
            replaced_fragment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, ScrollTarget};
    use shared::domain::SectionList;
    use url::Url;

    fn page(location: &str) -> MemoryDocument {
        MemoryDocument::stacked(
            &SectionList::portfolio(),
            700.0,
            700.0,
            Url::parse(location).expect("url"),
        )
    }

    #[test]
    fn deep_link_is_overridden_with_home() {
        let mut document = page("app://portfolio/#contact");
        document.set_scroll_top(1400.0);
        let mut resolver = InitialViewResolver::new(SectionId::from("home"));

        let view = resolver.resolve(&mut document).expect("first run");

        assert_eq!(view.scroll.target, ScrollTarget::Section(SectionId::from("home")));
        assert_eq!(view.scroll.behavior, ScrollBehavior::Instant);
        assert_eq!(document.viewport().scroll_top, 0.0);
        assert_eq!(document.location().fragment(), Some("home"));
        assert_eq!(document.history_len(), 1);
        assert_eq!(view.replaced_fragment, Some(Some("contact".to_string())));
    }

    #[test]
    fn adds_fragment_when_address_has_none() {
        let mut document = page("app://portfolio/");
        let mut resolver = InitialViewResolver::new(SectionId::from("home"));

        let view = resolver.resolve(&mut document).expect("first run");

        assert_eq!(document.location().as_str(), "app://portfolio/#home");
        assert_eq!(view.replaced_fragment, Some(None));
        assert_eq!(document.history_len(), 1);
    }

    #[test]
    fn leaves_matching_fragment_alone() {
        let mut document = page("app://portfolio/#home");
        let mut resolver = InitialViewResolver::new(SectionId::from("home"));

        let view = resolver.resolve(&mut document).expect("first run");
        assert_eq!(view.replaced_fragment, None);
    }

    #[test]
    fn falls_back_to_document_top_without_canonical_element() {
        let mut document = page("app://portfolio/#about").without_element(&SectionId::from("home"));
        document.set_scroll_top(900.0);
        let mut resolver = InitialViewResolver::new(SectionId::from("home"));

        let view = resolver.resolve(&mut document).expect("first run");

        assert_eq!(view.scroll.target, ScrollTarget::DocumentTop);
        assert_eq!(document.viewport().scroll_top, 0.0);
        assert_eq!(document.location().fragment(), Some("home"));
    }

    #[test]
    fn runs_only_once() {
        let mut document = page("app://portfolio/#about");
        let mut resolver = InitialViewResolver::new(SectionId::from("home"));

        assert!(resolver.resolve(&mut document).is_some());
        document.set_scroll_top(700.0);
        assert!(resolver.resolve(&mut document).is_none());
        assert!(resolver.is_resolved());
        assert_eq!(document.scroll_log().len(), 1);
        assert_eq!(document.viewport().scroll_top, 700.0);
    }
}
