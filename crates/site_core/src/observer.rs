//! Section observer: keeps [`ActiveSection`] in sync with the viewport.

use shared::{
    domain::{ActiveSection, SectionList},
    error::ObserverUnavailable,
};
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::{
    document::Document,
    intersection::{IntersectionEntry, IntersectionTracker, ObserverOptions},
};

/// Sole writer of the active-section cell. Readers hold a
/// [`watch::Receiver`] obtained from [`SectionObserver::new`] or
/// [`SectionObserver::subscribe`].
pub struct SectionObserver {
    sections: SectionList,
    tracker: Option<IntersectionTracker>,
    active: watch::Sender<ActiveSection>,
}

impl SectionObserver {
    /// The cell starts on the canonical first section.
    pub fn new(sections: SectionList) -> (Self, watch::Receiver<ActiveSection>) {
        let initial = ActiveSection::of(sections.first().id.clone());
        let (active, rx) = watch::channel(initial);
        (
            Self {
                sections,
                tracker: None,
                active,
            },
            rx,
        )
    }

    /// Register every section element present in `document`. Returns how
    /// many were registered. Remounting drops the previous registrations.
    pub fn mount(
        &mut self,
        options: ObserverOptions,
        document: &dyn Document,
    ) -> Result<usize, ObserverUnavailable> {
        self.disconnect();
        if !document.supports_intersection() {
            debug!("viewport intersection unavailable; section highlighting disabled");
            return Err(ObserverUnavailable);
        }

        let mut tracker = IntersectionTracker::new(options);
        let mut initial = Vec::with_capacity(self.sections.len());
        for section in self.sections.iter() {
            match tracker.observe(section.id.clone(), document) {
                Some(entry) => initial.push(entry),
                None => warn!(section = %section.id, "section element missing; not observed"),
            }
        }

        let registered = tracker.observed().len();
        self.tracker = Some(tracker);
        self.handle_entries(initial);
        Ok(registered)
    }

    /// Re-sample geometry after the viewport scrolled or resized.
    pub fn on_viewport_change(&mut self, document: &dyn Document) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        let entries = tracker.sample(document);
        if !entries.is_empty() {
            self.handle_entries(entries);
        }
    }

    /// Apply one batch of intersection notifications. Within a batch the
    /// last intersecting section in navigation order wins.
    pub fn handle_entries(&mut self, entries: Vec<IntersectionEntry>) {
        if self.tracker.is_none() {
            return;
        }

        let mut ordered: Vec<(u32, IntersectionEntry)> = entries
            .into_iter()
            .filter_map(|entry| match self.sections.order_of(&entry.id) {
                Some(order) => Some((order, entry)),
                None => {
                    trace!(section = %entry.id, "ignoring entry for unknown section");
                    None
                }
            })
            .collect();
        ordered.sort_by_key(|(order, _)| *order);

        let Some((_, winner)) = ordered.iter().rev().find(|(_, entry)| entry.is_intersecting)
        else {
            return;
        };
        let changed = self.active.send_if_modified(|active| {
            if active.is(&winner.id) {
                return false;
            }
            *active = ActiveSection::of(winner.id.clone());
            true
        });
        if changed {
            debug!(section = %winner.id, ratio = winner.ratio, "active section changed");
        }
    }

    /// Drop all registrations; the active cell keeps its last value.
    pub fn disconnect(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.disconnect();
        }
    }

    pub fn is_observing(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn observed_count(&self) -> usize {
        self.tracker
            .as_ref()
            .map(|tracker| tracker.observed().len())
            .unwrap_or(0)
    }

    pub fn subscribe(&self) -> watch::Receiver<ActiveSection> {
        self.active.subscribe()
    }

    pub fn active(&self) -> ActiveSection {
        self.active.borrow().clone()
    }
}

#[cfg(test)]
#[path = "tests/observer_tests.rs"]
mod tests;
