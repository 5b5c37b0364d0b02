use tracing::info;
use uuid::Uuid;

use crate::memory::MemoryManager;
use crate::models::ModelInfo;
use crate::prompt::{PromptCache, active_personality};
use crate::stage::{Personality, ProgressionSpeed, Stage, resolve_stage};
use crate::theme::ColorTheme;
use crate::types::LastRequest;

/// Mutable record threaded through every turn of the single session.
///
/// The turn count only moves forward, by one per completed exchange, and only
/// through `complete_turn`.
#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    turn_count: u32,
    speed: ProgressionSpeed,
    mood_override: Option<Personality>,
    model: &'static ModelInfo,
    color: ColorTheme,
    facts: String,
    memory: MemoryManager,
    last_request: Option<LastRequest>,
    prompt: PromptCache,
}

impl SessionState {
    pub fn new(speed: ProgressionSpeed, model: &'static ModelInfo, facts: String) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, speed = %speed, model = model.id, "session started");
        Self {
            id,
            turn_count: 0,
            speed,
            mood_override: None,
            model,
            color: ColorTheme::default(),
            facts,
            memory: MemoryManager::new(),
            last_request: None,
            prompt: PromptCache::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn speed(&self) -> ProgressionSpeed {
        self.speed
    }

    /// Switch profiles. The turn count is kept.
    pub fn set_speed(&mut self, speed: ProgressionSpeed) {
        if speed != self.speed {
            info!(session = %self.id, from = %self.speed, to = %speed, "speed changed");
            self.speed = speed;
        }
    }

    pub fn mood_override(&self) -> Option<Personality> {
        self.mood_override
    }

    pub fn set_mood_override(&mut self, mood: Personality) {
        info!(session = %self.id, mood = %mood, "mood override set");
        self.mood_override = Some(mood);
    }

    pub fn clear_mood_override(&mut self) {
        self.mood_override = None;
    }

    pub fn model(&self) -> &'static ModelInfo {
        self.model
    }

    pub fn set_model(&mut self, model: &'static ModelInfo) {
        self.model = model;
    }

    pub fn color(&self) -> ColorTheme {
        self.color
    }

    pub fn set_color(&mut self, color: ColorTheme) {
        self.color = color;
    }

    pub fn facts(&self) -> &str {
        &self.facts
    }

    /// Replace the background facts; the next prompt is reassembled.
    pub fn refresh_facts(&mut self, facts: String) {
        self.facts = facts;
        self.prompt.invalidate();
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub fn last_request(&self) -> Option<&LastRequest> {
        self.last_request.as_ref()
    }

    pub fn set_last_request(&mut self, request: LastRequest) {
        self.last_request = Some(request);
    }

    /// Stage reached at the current turn count under the current profile.
    pub fn active_stage(&self) -> &'static Stage {
        resolve_stage(self.turn_count, self.speed)
    }

    pub fn active_personality(&self) -> Personality {
        active_personality(self.turn_count, self.speed, self.mood_override)
    }

    /// System prompt for the next call, reassembled only when needed.
    pub fn system_prompt(&mut self) -> String {
        self.prompt
            .get(&self.facts, self.turn_count, self.speed, self.mood_override)
            .to_string()
    }

    pub fn prompt_rebuilds(&self) -> u32 {
        self.prompt.rebuilds()
    }

    /// Apply a successful exchange: store the summary and advance one turn.
    pub fn complete_turn(&mut self, summary: String) {
        let before = self.active_stage().id;
        self.turn_count += 1;
        self.memory.record(self.turn_count, summary);

        let after = self.active_stage().id;
        if before != after {
            info!(
                session = %self.id,
                turn = self.turn_count,
                from = before,
                to = after,
                overridden = self.mood_override.is_some(),
                "stage transition"
            );
        }
    }
}
