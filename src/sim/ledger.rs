//! Impulse and score bookkeeping
//!
//! Fields are private: the only writers are the tap handler (consume) and the
//! collision policy (collect, strip).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    impulse_count: u32,
    score: u64,
}

impl Ledger {
    pub fn new(starting_impulses: u32) -> Self {
        Self {
            impulse_count: starting_impulses,
            score: 0,
        }
    }

    #[inline]
    pub fn impulse_count(&self) -> u32 {
        self.impulse_count
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Spend one impulse. Returns false (and changes nothing) when none remain.
    pub fn try_consume_impulse(&mut self) -> bool {
        if self.impulse_count == 0 {
            return false;
        }
        self.impulse_count -= 1;
        true
    }

    /// Orb collected: +1 impulse, +1 score
    pub fn collect_pickup(&mut self) {
        self.impulse_count = self.impulse_count.saturating_add(1);
        self.score = self.score.saturating_add(1);
    }

    /// Black hole struck: no more altitude can be gained
    pub fn strip_impulses(&mut self) {
        self.impulse_count = 0;
    }

    pub fn score_label(&self) -> String {
        format!("SCORE : {}", self.score)
    }

    pub fn impulse_label(&self) -> String {
        format!("IMPULSES : {}", self.impulse_count)
    }
}
