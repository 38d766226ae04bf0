use super::*;
use crate::document::{ElementRect, MemoryDocument};
use shared::domain::{Section, SectionId};
use url::Url;

const VIEWPORT: f32 = 1000.0;

fn page() -> MemoryDocument {
    MemoryDocument::stacked(
        &SectionList::portfolio(),
        VIEWPORT,
        VIEWPORT,
        Url::parse("app://portfolio/#home").expect("url"),
    )
}

fn entry(id: &str, is_intersecting: bool) -> IntersectionEntry {
    IntersectionEntry {
        id: SectionId::from(id),
        ratio: if is_intersecting { 0.5 } else { 0.0 },
        is_intersecting,
    }
}

fn mounted(document: &MemoryDocument) -> (SectionObserver, watch::Receiver<ActiveSection>) {
    let (mut observer, rx) = SectionObserver::new(SectionList::portfolio());
    let registered = observer
        .mount(ObserverOptions::default(), document)
        .expect("intersection supported");
    assert_eq!(registered, 3);
    (observer, rx)
}

#[test]
fn starts_on_first_section() {
    let (_observer, rx) = SectionObserver::new(SectionList::portfolio());
    assert!(rx.borrow().is(&SectionId::from("home")));
}

#[test]
fn about_becomes_active_when_its_top_reaches_twenty_percent() {
    let mut document = page();
    let (mut observer, rx) = mounted(&document);

    // about's top edge sits at 20% of the viewport height
    document.set_scroll_top(VIEWPORT - VIEWPORT * 0.2);
    observer.on_viewport_change(&document);

    assert!(rx.borrow().is(&SectionId::from("about")));
}

#[test]
fn follows_scrolling_through_every_section() {
    let mut document = page();
    let (mut observer, rx) = mounted(&document);

    document.set_scroll_top(1100.0);
    observer.on_viewport_change(&document);
    assert!(rx.borrow().is(&SectionId::from("about")));

    document.set_scroll_top(2000.0);
    observer.on_viewport_change(&document);
    assert!(rx.borrow().is(&SectionId::from("contact")));

    document.set_scroll_top(0.0);
    observer.on_viewport_change(&document);
    assert!(rx.borrow().is(&SectionId::from("home")));
}

#[test]
fn simultaneous_entries_resolve_in_section_order() {
    let document = page();
    let (mut observer, rx) = mounted(&document);

    observer.handle_entries(vec![entry("contact", true), entry("about", true)]);
    assert!(rx.borrow().is(&SectionId::from("contact")));

    observer.handle_entries(vec![entry("about", true), entry("home", true)]);
    assert!(rx.borrow().is(&SectionId::from("about")));
}

#[test]
fn leaving_entries_do_not_deactivate() {
    let document = page();
    let (mut observer, rx) = mounted(&document);

    observer.handle_entries(vec![entry("about", true)]);
    observer.handle_entries(vec![entry("about", false)]);
    assert!(rx.borrow().is(&SectionId::from("about")));
}

#[test]
fn unknown_sections_are_ignored() {
    let document = page();
    let (mut observer, rx) = mounted(&document);

    observer.handle_entries(vec![entry("blog", true)]);
    assert!(rx.borrow().is(&SectionId::from("home")));
}

#[test]
fn degrades_without_intersection_support() {
    let mut document = page().without_intersection();
    let (mut observer, rx) = SectionObserver::new(SectionList::portfolio());

    assert_eq!(
        observer.mount(ObserverOptions::default(), &document),
        Err(ObserverUnavailable)
    );
    assert!(!observer.is_observing());

    document.set_scroll_top(2000.0);
    observer.on_viewport_change(&document);
    observer.handle_entries(vec![entry("contact", true)]);
    assert!(rx.borrow().is(&SectionId::from("home")));
}

#[test]
fn missing_elements_are_skipped() {
    let document = page().without_element(&SectionId::from("about"));
    let (mut observer, _rx) = SectionObserver::new(SectionList::portfolio());

    let registered = observer
        .mount(ObserverOptions::default(), &document)
        .expect("intersection supported");
    assert_eq!(registered, 2);
}

#[test]
fn disconnect_stops_updates() {
    let mut document = page();
    let (mut observer, rx) = mounted(&document);

    observer.disconnect();
    assert_eq!(observer.observed_count(), 0);

    document.set_scroll_top(2000.0);
    observer.on_viewport_change(&document);
    assert!(rx.borrow().is(&SectionId::from("home")));
}

#[test]
fn notifies_subscribers_only_on_change() {
    let mut document = page();
    let (mut observer, _rx) = mounted(&document);
    let mut reader = observer.subscribe();
    reader.mark_unchanged();

    document.set_scroll_top(20.0);
    observer.on_viewport_change(&document);
    assert!(!reader.has_changed().expect("sender alive"));

    document.set_scroll_top(1100.0);
    observer.on_viewport_change(&document);
    assert!(reader.has_changed().expect("sender alive"));
    assert_eq!(observer.active(), ActiveSection::of(SectionId::from("about")));
}

#[test]
fn short_sections_register_with_custom_layout() {
    let sections = SectionList::new(vec![
        Section::new("intro", "Intro", 0),
        Section::new("work", "Work", 1),
    ])
    .expect("sections");
    let mut document = MemoryDocument::new(Url::parse("app://site/").expect("url"), 1000.0)
        .with_element(
            SectionId::from("intro"),
            ElementRect {
                top: 0.0,
                height: 300.0,
            },
        )
        .with_element(
            SectionId::from("work"),
            ElementRect {
                top: 300.0,
                height: 2000.0,
            },
        );
    let (mut observer, rx) = SectionObserver::new(sections);
    observer
        .mount(ObserverOptions::default(), &document)
        .expect("mount");
    assert!(rx.borrow().is(&SectionId::from("intro")));

    document.set_scroll_top(500.0);
    observer.on_viewport_change(&document);
    assert!(rx.borrow().is(&SectionId::from("work")));
}
