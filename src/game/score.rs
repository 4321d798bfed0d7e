//=========================================================================
// Score & Run State
//=========================================================================

//=== Internal Dependencies ===============================================

use super::entities::CharacterId;

//=== ScoreTracker ========================================================

/// Score accumulator with a one-way level-complete flag.
///
/// Only gameplay rules mutate it; everything else reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    level_complete: bool,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    pub(crate) fn award(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Sets the flag. Returns `true` only on the call that flipped it.
    pub(crate) fn complete_level(&mut self) -> bool {
        !std::mem::replace(&mut self.level_complete, true)
    }
}

//=== RunState ============================================================

/// Per-run mutable state outside the world: score and who has control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub score: ScoreTracker,
    pub active_character: CharacterId,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            score: ScoreTracker::new(),
            active_character: CharacterId::Primary,
        }
    }

    /// Hands control to the other character and returns it.
    pub fn toggle_active(&mut self) -> CharacterId {
        self.active_character = self.active_character.other();
        self.active_character
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
