//! Difficulty tiers and their balance tables

/// Difficulty tier - governs speeds, spawn cadence, equations and time limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum DifficultyTier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
        }
    }

    /// Fall speed of a number spawned at level 0 (pixels per tick)
    pub fn base_fall_speed(&self) -> f32 {
        match self {
            DifficultyTier::Easy => 1.5,
            DifficultyTier::Medium => 2.0,
            DifficultyTier::Hard => 3.0,
        }
    }

    /// Ticks between spawns before level scaling
    pub fn base_spawn_rate(&self) -> u32 {
        match self {
            DifficultyTier::Easy => 40,
            DifficultyTier::Medium => 30,
            DifficultyTier::Hard => 20,
        }
    }

    /// Session length in seconds when the run starts on this tier
    pub fn time_limit_secs(&self) -> u32 {
        match self {
            DifficultyTier::Easy => 120,
            DifficultyTier::Medium => 90,
            DifficultyTier::Hard => 60,
        }
    }

    /// Correct answers needed to leave this tier
    pub fn advancement_threshold(&self) -> u32 {
        match self {
            DifficultyTier::Easy => 20,
            DifficultyTier::Medium => 30,
            DifficultyTier::Hard => 40,
        }
    }

    /// The tier reached after meeting this tier's quota (None = run complete)
    pub fn next(&self) -> Option<Self> {
        match self {
            DifficultyTier::Easy => Some(DifficultyTier::Medium),
            DifficultyTier::Medium => Some(DifficultyTier::Hard),
            DifficultyTier::Hard => None,
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
