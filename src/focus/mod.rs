//! Keeps keyboard focus on the same person's rating input across content
//! replacement.
//!
//! The flow for one replacement cycle:
//! - `before_replace` snapshots a person key (focused input, else the last
//!   relevant one),
//! - the host destroys and recreates the subtree,
//! - `take_restore` hands the key back exactly once, and the DOM layer
//!   refocuses the matching fresh input on the next frame.

mod dom;

pub(crate) use dom::{
    classify_target, focused_rating_key, replacement_touches_region, schedule_restore,
};

/// Where a focus or pointer event landed, relative to the ratings region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FocusTarget {
    /// A score input carrying this person key. Such inputs can also sit
    /// outside the region.
    RatingInput { key: String, in_region: bool },
    InsideRegion,
    OutsideRegion,
    /// Not an element (document, window); leaves state alone.
    Unknown,
}

impl FocusTarget {
    fn outside_region(&self) -> bool {
        matches!(
            self,
            FocusTarget::OutsideRegion | FocusTarget::RatingInput { in_region: false, .. }
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FocusTracker {
    last_relevant: Option<String>,
}

impl FocusTracker {
    pub fn last_relevant(&self) -> Option<&str> {
        self.last_relevant.as_deref()
    }

    pub fn focus_in(&mut self, target: FocusTarget) {
        match target {
            FocusTarget::RatingInput { key, .. } => self.last_relevant = Some(key),
            FocusTarget::OutsideRegion => self.last_relevant = None,
            FocusTarget::InsideRegion | FocusTarget::Unknown => {}
        }
    }

    /// Any press outside the region clears, whatever element it hit.
    pub fn pointer_down(&mut self, target: FocusTarget) {
        if target.outside_region() {
            self.last_relevant = None;
        }
    }
}

/// Single pending slot: written at pre-replace, taken at the next
/// post-replace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SwapCoordinator {
    pending_restore: Option<String>,
}

impl SwapCoordinator {
    #[cfg(test)]
    pub fn pending(&self) -> Option<&str> {
        self.pending_restore.as_deref()
    }

    pub fn before_replace(&mut self, focused: Option<String>, tracker: &FocusTracker) {
        self.pending_restore = focused.or_else(|| tracker.last_relevant().map(str::to_string));
    }

    pub fn take_restore(&mut self) -> Option<String> {
        self.pending_restore.take()
    }
}

/// Tracker and coordinator for one page.
#[derive(Clone, Debug, Default)]
pub(crate) struct RatingFocus {
    pub tracker: FocusTracker,
    pub swap: SwapCoordinator,
}

impl RatingFocus {
    pub fn before_replace(&mut self, focused: Option<String>) {
        self.swap.before_replace(focused, &self.tracker);
    }

    pub fn take_restore(&mut self) -> Option<String> {
        self.swap.take_restore()
    }
}
