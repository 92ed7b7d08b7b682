//! Turning snap events into at most one discard.

use crate::physics::AnchorId;

/// Which way a card left the deck. `Center` is never reported as a discard;
/// it exists so a direction can be read off any anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscardDirection {
    Left,
    Right,
    Center,
}

impl From<AnchorId> for DiscardDirection {
    fn from(id: AnchorId) -> Self {
        match id {
            AnchorId::Left => DiscardDirection::Left,
            AnchorId::Center => DiscardDirection::Center,
            AnchorId::Right => DiscardDirection::Right,
        }
    }
}

/// Emitted every time a card is sent toward an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapEvent {
    pub id: AnchorId,
}

/// Reports the first edge snap and nothing after it.
#[derive(Debug, Clone, Default)]
pub struct DiscardLatch {
    consumed: Option<DiscardDirection>,
}

impl DiscardLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, event: SnapEvent) -> Option<DiscardDirection> {
        if self.consumed.is_some() || !event.id.is_edge() {
            return None;
        }
        let direction = DiscardDirection::from(event.id);
        self.consumed = Some(direction);
        Some(direction)
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.is_some()
    }

    pub fn direction(&self) -> Option<DiscardDirection> {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(id: AnchorId) -> SnapEvent {
        SnapEvent { id }
    }

    #[test]
    fn center_is_not_a_discard() {
        let mut latch = DiscardLatch::new();
        assert_eq!(latch.resolve(snap(AnchorId::Center)), None);
        assert!(!latch.is_consumed());
    }

    #[test]
    fn first_edge_wins_and_latches() {
        let mut latch = DiscardLatch::new();
        assert_eq!(latch.resolve(snap(AnchorId::Center)), None);
        assert_eq!(
            latch.resolve(snap(AnchorId::Left)),
            Some(DiscardDirection::Left)
        );
        assert_eq!(latch.resolve(snap(AnchorId::Right)), None);
        assert_eq!(latch.resolve(snap(AnchorId::Left)), None);
        assert_eq!(latch.direction(), Some(DiscardDirection::Left));
    }
}
