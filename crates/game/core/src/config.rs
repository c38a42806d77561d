/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Floor applied to defense-reduced damage so combat always progresses.
    pub minimum_damage: u32,

    /// Repeat limit used by quest definitions that do not declare one.
    pub default_repeat_limit: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;
    pub const DEFAULT_REPEAT_LIMIT: u32 = 1;

    pub fn new() -> Self {
        Self {
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            default_repeat_limit: Self::DEFAULT_REPEAT_LIMIT,
        }
    }

    pub fn with_minimum_damage(mut self, minimum_damage: u32) -> Self {
        self.minimum_damage = minimum_damage;
        self
    }

    pub fn with_default_repeat_limit(mut self, limit: u32) -> Self {
        self.default_repeat_limit = limit;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
