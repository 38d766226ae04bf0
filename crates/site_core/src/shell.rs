use shared::domain::{ActiveSection, SectionList};

use crate::{
    document::{Document, ScrollCommand},
    initial_view::{InitialView, InitialViewResolver},
    intersection::ObserverOptions,
    navigation::{NavItem, NavigationControl},
    observer::SectionObserver,
};

/// Observer, dock and startup correction wired to one section list.
pub struct SiteShell {
    observer: SectionObserver,
    navigation: NavigationControl,
    initial_view: InitialViewResolver,
    options: ObserverOptions,
}

impl SiteShell {
    pub fn new(sections: SectionList, options: ObserverOptions) -> Self {
        let (observer, active) = SectionObserver::new(sections.clone());
        let canonical = sections.first().id.clone();
        Self {
            observer,
            navigation: NavigationControl::new(sections, active),
            initial_view: InitialViewResolver::new(canonical),
            options,
        }
    }

    /// Call once the document has its section elements. The startup jump
    /// happens before registration so the first observation already sees
    /// the canonical section.
    pub fn mount(&mut self, document: &mut dyn Document) -> Option<InitialView> {
        let view = self.initial_view.resolve(document);
        if let Err(err) = self.observer.mount(self.options, &*document) {
            tracing::debug!("{err}; dock stays manual");
        }
        view
    }

    pub fn unmount(&mut self) {
        self.observer.disconnect();
    }

    pub fn is_mounted(&self) -> bool {
        self.initial_view.is_resolved()
    }

    pub fn on_viewport_change(&mut self, document: &dyn Document) {
        self.observer.on_viewport_change(document);
    }

    pub fn select(&self, section_id: &str, document: &mut dyn Document) -> Option<ScrollCommand> {
        self.navigation.select(section_id, document)
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        self.navigation.items()
    }

    pub fn active(&self) -> ActiveSection {
        self.observer.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use shared::domain::SectionId;
    use url::Url;

    fn page(location: &str) -> MemoryDocument {
        MemoryDocument::stacked(
            &SectionList::portfolio(),
            1000.0,
            1000.0,
            Url::parse(location).expect("url"),
        )
    }

    #[test]
    fn mount_resolves_home_then_tracks_navigation() {
        let mut document = page("app://portfolio/#contact");
        document.set_scroll_top(2000.0);
        let mut shell = SiteShell::new(SectionList::portfolio(), ObserverOptions::default());

        let view = shell.mount(&mut document).expect("first mount");
        assert_eq!(view.scroll.offset, 0.0);
        assert_eq!(document.location().fragment(), Some("home"));
        assert!(shell.active().is(&SectionId::from("home")));
        assert!(shell.is_mounted());

        shell.select("contact", &mut document).expect("scroll");
        shell.on_viewport_change(&document);
        let active: Vec<_> = shell
            .nav_items()
            .into_iter()
            .filter(|item| item.is_active)
            .map(|item| item.id)
            .collect();
        assert_eq!(active, vec![SectionId::from("contact")]);
    }

    #[test]
    fn navigation_still_works_without_intersection() {
        let mut document = page("app://portfolio/").without_intersection();
        let mut shell = SiteShell::new(SectionList::portfolio(), ObserverOptions::default());
        shell.mount(&mut document);

        assert!(shell.select("about", &mut document).is_some());
        shell.on_viewport_change(&document);
        assert!(shell.active().is(&SectionId::from("home")));
        assert_eq!(document.viewport().scroll_top, 1000.0);
    }

    #[test]
    fn second_mount_does_not_jump_again() {
        let mut document = page("app://portfolio/");
        let mut shell = SiteShell::new(SectionList::portfolio(), ObserverOptions::default());
        assert!(shell.mount(&mut document).is_some());

        document.set_scroll_top(1000.0);
        shell.unmount();
        assert!(shell.mount(&mut document).is_none());
        assert_eq!(document.viewport().scroll_top, 1000.0);
        assert!(shell.active().is(&SectionId::from("about")));
    }
}
