use super::*;
use crate::{
    document::{MemoryDocument, ScrollTarget},
    intersection::ObserverOptions,
    observer::SectionObserver,
};
use url::Url;

fn page() -> MemoryDocument {
    MemoryDocument::stacked(
        &SectionList::portfolio(),
        900.0,
        900.0,
        Url::parse("app://portfolio/#home").expect("url"),
    )
}

#[test]
fn lists_sections_in_order_with_highlight() {
    let (_observer, rx) = SectionObserver::new(SectionList::portfolio());
    let nav = NavigationControl::new(SectionList::portfolio(), rx);

    let items = nav.items();
    let labels: Vec<_> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["Home", "About", "Contact"]);
    let active: Vec<_> = items.iter().filter(|item| item.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id.as_str(), "home");
}

#[test]
fn select_issues_one_smooth_scroll_to_section_top() {
    let (_observer, rx) = SectionObserver::new(SectionList::portfolio());
    let nav = NavigationControl::new(SectionList::portfolio(), rx);
    let mut document = page();

    let command = nav.select("contact", &mut document).expect("scroll command");

    assert_eq!(document.scroll_log().len(), 1);
    assert_eq!(document.scroll_log()[0], command);
    assert_eq!(
        command.target,
        ScrollTarget::Section(SectionId::from("contact"))
    );
    assert_eq!(command.offset, 1800.0);
    assert_eq!(command.behavior, ScrollBehavior::Smooth);
}

#[test]
fn select_unknown_section_is_a_no_op() {
    let (_observer, rx) = SectionObserver::new(SectionList::portfolio());
    let nav = NavigationControl::new(SectionList::portfolio(), rx);
    let mut document = page();

    assert!(nav.select("missing-id", &mut document).is_none());
    assert!(document.scroll_log().is_empty());
}

#[test]
fn select_with_absent_element_is_a_no_op() {
    let (_observer, rx) = SectionObserver::new(SectionList::portfolio());
    let nav = NavigationControl::new(SectionList::portfolio(), rx);
    let mut document = page().without_element(&SectionId::from("about"));

    assert!(nav.select("about", &mut document).is_none());
    assert!(document.scroll_log().is_empty());
}

#[test]
fn highlight_follows_observer_after_navigation() {
    let mut document = page();
    let (mut observer, rx) = SectionObserver::new(SectionList::portfolio());
    observer
        .mount(ObserverOptions::default(), &document)
        .expect("mount");
    let nav = NavigationControl::new(SectionList::portfolio(), rx);

    nav.select("about", &mut document);
    // selection alone does not move the highlight
    assert!(nav.items()[0].is_active);

    observer.on_viewport_change(&document);
    let items = nav.items();
    assert!(!items[0].is_active);
    assert!(items[1].is_active);
}
