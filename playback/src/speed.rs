use crate::frontend::Direction;

/// Selects how many simulation ticks run per outer update.
///
/// Holds an index into a fixed multiplier list. The index starts at the
/// second entry (normal speed, with the first entry conventionally the
/// pause) and wraps in both directions, so holding a direction cycles
/// through every setting. Speed changes never touch the log stream.
#[derive(Debug, Clone)]
pub struct PlaySpeed {
    multipliers: Vec<u32>,
    index: usize,
}

impl PlaySpeed {
    pub fn new(mut multipliers: Vec<u32>) -> Self {
        if multipliers.is_empty() {
            multipliers.push(1);
        }
        let index = 1.min(multipliers.len() - 1);
        Self { multipliers, index }
    }

    /// Ticks to run this outer update. Zero means paused.
    pub fn multiplier(&self) -> u32 {
        self.multipliers[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn increase(&mut self) {
        self.index = (self.index + 1) % self.multipliers.len();
    }

    pub fn decrease(&mut self) {
        self.index = (self.index + self.multipliers.len() - 1) % self.multipliers.len();
    }

    /// Applies one directional event sampled from the live-input side.
    pub fn apply(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.increase(),
            Direction::Down => self.decrease(),
            Direction::Neutral => {}
        }
    }
}
