//! Viewport-intersection primitive for hosts that have no native observer.

use std::collections::HashMap;

use shared::domain::SectionId;

use crate::document::{Document, ElementRect, Viewport};

/// Ratios this close below the threshold still count as crossing it.
const RATIO_EPSILON: f32 = 1e-4;

/// Detection band and threshold. The band is the viewport with
/// `bottom_margin` (a fraction of its height) cut off the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub bottom_margin: f32,
    pub threshold: f32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            bottom_margin: 0.6,
            threshold: 0.2,
        }
    }
}

impl ObserverOptions {
    /// `(top, bottom)` of the detection band in document coordinates.
    pub fn band(&self, viewport: Viewport) -> (f32, f32) {
        let visible = (1.0 - self.bottom_margin).clamp(0.0, 1.0);
        (
            viewport.scroll_top,
            viewport.scroll_top + viewport.height * visible,
        )
    }

    /// Share of `rect` that lies inside the detection band.
    pub fn intersection_ratio(&self, viewport: Viewport, rect: ElementRect) -> f32 {
        let (band_top, band_bottom) = self.band(viewport);
        if rect.height <= 0.0 {
            let inside = rect.top >= band_top && rect.top <= band_bottom;
            return if inside { 1.0 } else { 0.0 };
        }
        let overlap = rect.bottom().min(band_bottom) - rect.top.max(band_top);
        (overlap.max(0.0) / rect.height).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub id: SectionId,
    pub ratio: f32,
    pub is_intersecting: bool,
}

/// Tracks which observed sections are past the threshold and reports
/// only the ones that changed since the last sample.
#[derive(Debug, Clone)]
pub struct IntersectionTracker {
    options: ObserverOptions,
    observed: Vec<SectionId>,
    intersecting: HashMap<SectionId, bool>,
}

impl IntersectionTracker {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
            intersecting: HashMap::new(),
        }
    }

    /// Start watching `id`; yields the initial entry for it.
    pub fn observe(&mut self, id: SectionId, document: &dyn Document) -> Option<IntersectionEntry> {
        if self.observed.contains(&id) {
            return None;
        }
        let rect = document.element_rect(&id)?;
        let entry = self.entry_for(id.clone(), document.viewport(), rect);
        self.intersecting.insert(id.clone(), entry.is_intersecting);
        self.observed.push(id);
        Some(entry)
    }

    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.intersecting.clear();
    }

    pub fn observed(&self) -> &[SectionId] {
        &self.observed
    }

    /// Entries for every observed section whose state flipped.
    pub fn sample(&mut self, document: &dyn Document) -> Vec<IntersectionEntry> {
        let viewport = document.viewport();
        let mut changed = Vec::new();
        for id in &self.observed {
            let Some(rect) = document.element_rect(id) else {
                continue;
            };
            let entry = self.entry_for(id.clone(), viewport, rect);
            let previous = self.intersecting.insert(id.clone(), entry.is_intersecting);
            if previous != Some(entry.is_intersecting) {
                changed.push(entry);
            }
        }
        changed
    }

    fn entry_for(&self, id: SectionId, viewport: Viewport, rect: ElementRect) -> IntersectionEntry {
        let ratio = self.options.intersection_ratio(viewport, rect);
        IntersectionEntry {
            id,
            ratio,
            is_intersecting: ratio + RATIO_EPSILON >= self.options.threshold,
        }
    }
}
