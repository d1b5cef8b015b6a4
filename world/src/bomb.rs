use std::time::Duration;

use tile_bomber_core::{BombId, Position, EXPLOSION_PHASE};

/// Lifecycle stage of a bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombState {
    /// Counting down through phases 0 to 4.
    Armed,
    /// Reached the explosion phase and awaits detonation.
    Exploding,
    /// Blast applied; removed at the end of the tick.
    Exploded,
}

/// Bomb placed by the player in a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BombObject {
    id: BombId,
    position: Position,
    range: u32,
    placed_at: Duration,
    phase: u8,
    state: BombState,
}

impl BombObject {
    pub(crate) const fn new(id: BombId, position: Position, range: u32, placed_at: Duration) -> Self {
        Self {
            id,
            position,
            range,
            placed_at,
            phase: 0,
            state: BombState::Armed,
        }
    }

    /// Identifier of the bomb.
    #[must_use]
    pub const fn id(&self) -> BombId {
        self.id
    }

    /// Cell holding the bomb.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Cells covered along each arm of the blast.
    #[must_use]
    pub const fn range(&self) -> u32 {
        self.range
    }

    /// Current phase in `0..=5`.
    #[must_use]
    pub const fn phase(&self) -> u8 {
        self.phase
    }

    /// Current lifecycle stage.
    #[must_use]
    pub const fn state(&self) -> BombState {
        self.state
    }

    /// Recomputes the phase from the elapsed time.
    ///
    /// Returns the new phase when it changed. The bomb moves to
    /// [`BombState::Exploding`] exactly once, on reaching the explosion phase.
    pub(crate) fn advance(&mut self, now: Duration, phase_length: Duration) -> Option<u8> {
        if self.state != BombState::Armed {
            return None;
        }
        let phase = phase_at(now.saturating_sub(self.placed_at), phase_length);
        if phase <= self.phase {
            return None;
        }
        self.phase = phase;
        if phase == EXPLOSION_PHASE {
            self.state = BombState::Exploding;
        }
        Some(phase)
    }

    pub(crate) fn mark_exploded(&mut self) {
        self.state = BombState::Exploded;
    }
}

fn phase_at(elapsed: Duration, phase_length: Duration) -> u8 {
    if phase_length.is_zero() {
        return EXPLOSION_PHASE;
    }
    let steps = elapsed.as_nanos() / phase_length.as_nanos();
    u8::try_from(steps.min(u128::from(EXPLOSION_PHASE))).unwrap_or(EXPLOSION_PHASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASE: Duration = Duration::from_secs(1);

    fn bomb() -> BombObject {
        BombObject::new(BombId::new(0), Position::new(2, 2), 1, Duration::from_millis(500))
    }

    #[test]
    fn phase_follows_elapsed_time() {
        let mut bomb = bomb();
        assert_eq!(bomb.advance(Duration::from_millis(1_400), PHASE), None);
        assert_eq!(bomb.advance(Duration::from_millis(1_500), PHASE), Some(1));
        assert_eq!(bomb.advance(Duration::from_millis(3_600), PHASE), Some(3));
        assert_eq!(bomb.state(), BombState::Armed);
    }

    #[test]
    fn explosion_phase_is_reached_once() {
        let mut bomb = bomb();
        assert_eq!(bomb.advance(Duration::from_secs(60), PHASE), Some(EXPLOSION_PHASE));
        assert_eq!(bomb.state(), BombState::Exploding);
        assert_eq!(bomb.advance(Duration::from_secs(61), PHASE), None);
    }

    #[test]
    fn phase_never_decreases() {
        let mut bomb = bomb();
        assert_eq!(bomb.advance(Duration::from_millis(3_500), PHASE), Some(3));
        assert_eq!(bomb.advance(Duration::from_millis(1_000), PHASE), None);
        assert_eq!(bomb.phase(), 3);
    }
}
