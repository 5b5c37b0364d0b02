use rand::Rng;

use crate::stage::{ProgressionSpeed, Stage, resolve_stage};

const COMPLETION_RULE: &str =
    "Complete your sentence and thought - do not cut off mid-sentence or mid-thought.";

/// Per-turn reply length target drawn from the active stage's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthTarget {
    pub words: u32,
    /// True when the stage bounds collapse to a single value.
    pub exact: bool,
}

impl LengthTarget {
    /// Draw a target uniformly from `[reply_words_min, reply_words_max]`.
    pub fn pick<R: Rng + ?Sized>(stage: &Stage, rng: &mut R) -> Self {
        let (min, max) = (stage.reply_words_min, stage.reply_words_max);
        if min >= max {
            return Self {
                words: min,
                exact: true,
            };
        }
        Self {
            words: rng.gen_range(min..=max),
            exact: false,
        }
    }

    pub fn instruction(&self) -> String {
        if self.exact {
            format!("Reply in exactly {} words. {COMPLETION_RULE}", self.words)
        } else {
            format!(
                "Reply in approximately {} words. {COMPLETION_RULE}",
                self.words
            )
        }
    }
}

/// Length instruction for the stage active at `turn_count`.
pub fn length_instruction(turn_count: u32, speed: ProgressionSpeed) -> String {
    let stage = resolve_stage(turn_count, speed);
    LengthTarget::pick(stage, &mut rand::thread_rng()).instruction()
}
