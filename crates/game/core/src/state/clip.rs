//! Ammunition clip with per-round imbue marks.
//!
//! Rounds are fired from the front (index 0). Imbue slots are positional: slot
//! `i` is the `i`-th loaded round counted from the front at the moment the
//! slot is read.

use arrayvec::ArrayVec;

use crate::action::Element;
use crate::config::OverloadConfig;

/// A single loaded round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    pub imbue: Option<Element>,
}

impl Round {
    pub const PLAIN: Self = Self { imbue: None };

    pub fn is_imbued(&self) -> bool {
        self.imbue.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clip {
    capacity: usize,
    rounds: ArrayVec<Round, { OverloadConfig::MAX_CLIP_SIZE }>,
}

impl Clip {
    /// Creates a fully loaded clip. Capacity is capped at [`OverloadConfig::MAX_CLIP_SIZE`].
    pub fn loaded(capacity: usize) -> Self {
        let mut clip = Self::empty(capacity);
        clip.reload();
        clip
    }

    pub fn empty(capacity: usize) -> Self {
        Self {
            capacity: capacity.min(OverloadConfig::MAX_CLIP_SIZE),
            rounds: ArrayVec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rounds currently loaded.
    pub fn loaded_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn round(&self, slot: usize) -> Option<&Round> {
        self.rounds.get(slot)
    }

    pub fn rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter()
    }

    /// Imbuements already committed to loaded rounds.
    pub fn committed_imbues(&self) -> usize {
        self.rounds.iter().filter(|round| round.is_imbued()).count()
    }

    /// Removes and returns the front round.
    pub fn fire(&mut self) -> Option<Round> {
        if self.rounds.is_empty() {
            None
        } else {
            Some(self.rounds.remove(0))
        }
    }

    /// Marks the round at `slot` with `element`.
    ///
    /// Returns false when the slot is not loaded or already imbued.
    pub fn imbue(&mut self, slot: usize, element: Element) -> bool {
        match self.rounds.get_mut(slot) {
            Some(round) if !round.is_imbued() => {
                round.imbue = Some(element);
                true
            }
            _ => false,
        }
    }

    /// Tops the clip up to capacity with plain rounds. Existing rounds keep their imbues.
    /// Returns how many rounds were added.
    pub fn reload(&mut self) -> usize {
        let missing = self.capacity.saturating_sub(self.rounds.len());
        for _ in 0..missing {
            self.rounds.push(Round::PLAIN);
        }
        missing
    }
}

impl Default for Clip {
    fn default() -> Self {
        Self::loaded(6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_takes_from_front() {
        let mut clip = Clip::loaded(3);
        assert!(clip.imbue(0, Element::Fire));

        let fired = clip.fire().unwrap();
        assert_eq!(fired.imbue, Some(Element::Fire));
        assert_eq!(clip.loaded_rounds(), 2);
        assert_eq!(clip.committed_imbues(), 0);
    }

    #[test]
    fn imbue_rejects_marked_or_missing_slots() {
        let mut clip = Clip::loaded(2);
        assert!(clip.imbue(1, Element::Frost));
        assert!(!clip.imbue(1, Element::Shock));
        assert!(!clip.imbue(2, Element::Shock));
        assert_eq!(clip.committed_imbues(), 1);
    }

    #[test]
    fn reload_tops_up_and_keeps_imbues() {
        let mut clip = Clip::loaded(4);
        clip.imbue(3, Element::Void);
        clip.fire();
        clip.fire();

        assert_eq!(clip.reload(), 2);
        assert_eq!(clip.loaded_rounds(), 4);
        assert_eq!(clip.round(1).and_then(|r| r.imbue), Some(Element::Void));
    }

    #[test]
    fn capacity_is_capped() {
        let mut clip = Clip::loaded(100);
        assert_eq!(clip.capacity(), OverloadConfig::MAX_CLIP_SIZE);
        assert_eq!(clip.loaded_rounds(), OverloadConfig::MAX_CLIP_SIZE);
        assert!(clip.fire().is_some());
    }
}
