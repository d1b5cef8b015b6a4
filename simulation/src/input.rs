use tile_bomber_core::Direction;

/// Input snapshot gathered by adapters before updating the simulation.
///
/// The snapshot is consumed by a single update; adapters start every frame
/// from [`FrameInput::default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Direction the player wants to move in, if any.
    pub movement: Option<Direction>,
    /// Whether the player wants to drop a bomb on its cell.
    pub place_bomb: bool,
    /// Whether the player wants to unlock the door it faces.
    pub use_key: bool,
    /// Whether the player wants to leave the session.
    pub quit: bool,
}

impl FrameInput {
    /// Input that only moves the player.
    #[must_use]
    pub const fn moving(direction: Direction) -> Self {
        Self {
            movement: Some(direction),
            place_bomb: false,
            use_key: false,
            quit: false,
        }
    }

    /// Whether the snapshot carries no intent at all.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.movement.is_none() && !self.place_bomb && !self.use_key && !self.quit
    }
}
