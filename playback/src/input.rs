use crate::types::PlayerInput;

/// Combined two-player input for one simulation tick.
///
/// Built fresh from each decoded record pair and handed straight to the
/// fight engine; the session never retains one. Exists so the wire layout
/// can change without touching the simulation-facing shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub players: [PlayerInput; 2],
}

impl InputFrame {
    /// Wraps a decoded record pair, player 0 first.
    pub fn from_pair(pair: [PlayerInput; 2]) -> Self {
        Self { players: pair }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_player_order() {
        let p0 = PlayerInput {
            a: true,
            ..Default::default()
        };
        let p1 = PlayerInput {
            up: true,
            ..Default::default()
        };

        let frame = InputFrame::from_pair([p0, p1]);
        assert_eq!(frame.players[0], p0);
        assert_eq!(frame.players[1], p1);
    }
}
