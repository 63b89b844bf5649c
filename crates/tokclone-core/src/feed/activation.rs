//! The single active-video store.

use super::tracker::IntersectionEntry;
use crate::config::ActivationPolicy;

/// Change of the active video produced by one observation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationChange {
    pub previous: String,
    pub current: String,
}

/// Holds exactly one active video id.
///
/// Only [`ActivationState::apply`] moves the active id, and only to ids that
/// were reported as intersecting by the tracker.
#[derive(Debug, Clone)]
pub struct ActivationState {
    active: String,
    policy: ActivationPolicy,
}

impl ActivationState {
    pub fn new(initial: impl Into<String>, policy: ActivationPolicy) -> Self {
        Self {
            active: initial.into(),
            policy,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, video_id: &str) -> bool {
        self.active == video_id
    }

    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    /// Applies one batch of crossings, returning the change if the active id moved.
    pub fn apply(&mut self, entries: &[IntersectionEntry]) -> Option<ActivationChange> {
        let winner = match self.policy {
            ActivationPolicy::LastReported => entries.iter().rev().find(|e| e.is_intersecting),
            ActivationPolicy::MostVisible => entries
                .iter()
                .filter(|e| e.is_intersecting)
                .fold(None, |best: Option<&IntersectionEntry>, entry| match best {
                    Some(b) if b.ratio > entry.ratio => Some(b),
                    _ => Some(entry),
                }),
        }?;

        if winner.video_id == self.active {
            return None;
        }

        let previous = std::mem::replace(&mut self.active, winner.video_id.clone());
        Some(ActivationChange {
            previous,
            current: self.active.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, ratio: f64, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            video_id: id.to_string(),
            ratio,
            is_intersecting,
        }
    }

    #[test]
    fn test_defaults_to_initial() {
        let state = ActivationState::new("v1", ActivationPolicy::LastReported);
        assert_eq!(state.active(), "v1");
        assert!(state.is_active("v1"));
    }

    #[test]
    fn test_non_intersecting_entries_are_ignored() {
        let mut state = ActivationState::new("v1", ActivationPolicy::LastReported);
        assert!(state.apply(&[entry("v1", 0.4, false)]).is_none());
        assert_eq!(state.active(), "v1");
    }

    #[test]
    fn test_last_reported_wins() {
        let mut state = ActivationState::new("v1", ActivationPolicy::LastReported);
        let change = state
            .apply(&[entry("v2", 0.9, true), entry("v3", 0.5, true), entry("v4", 0.2, false)])
            .unwrap();
        assert_eq!(change.previous, "v1");
        assert_eq!(change.current, "v3");
    }

    #[test]
    fn test_most_visible_wins() {
        let mut state = ActivationState::new("v1", ActivationPolicy::MostVisible);
        let change = state
            .apply(&[entry("v2", 0.9, true), entry("v3", 0.5, true)])
            .unwrap();
        assert_eq!(change.current, "v2");

        // Tie goes to the later entry
        let change = state
            .apply(&[entry("v3", 0.5, true), entry("v4", 0.5, true)])
            .unwrap();
        assert_eq!(change.current, "v4");
    }

    #[test]
    fn test_reactivating_current_is_not_a_change() {
        let mut state = ActivationState::new("v1", ActivationPolicy::LastReported);
        assert!(state.apply(&[entry("v1", 1.0, true)]).is_none());
    }
}
