//! Game state and core simulation types
//!
//! Everything a session mutates lives here. Randomness comes from a seeded
//! RNG so that two sessions built from the same seed and fed the same inputs
//! stay identical.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::equation::{self, Equation};
use super::tier::DifficultyTier;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Paused by the player
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Countdown reached zero
    TimeUp,
    /// Too many wrong catches
    OutOfLives,
    /// Hard tier quota met
    Completed,
}

/// Something that happened during a tick, for audio and HUD consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Any number touched the player
    Caught { value: i32 },
    CorrectAnswer { value: i32, points: u64 },
    WrongAnswer { value: i32, lives_remaining: u32 },
    LevelUp { level: u32 },
    TierAdvanced { tier: DifficultyTier },
    /// A number fell past the bottom edge
    Missed { value: i32 },
    TimerWarning,
    GameOver { reason: GameOverReason },
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYFIELD_WIDTH,
            height: DEFAULT_PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The catcher at the bottom of the playfield
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner; only x changes during play
    pub pos: Vec2,
    pub vel_x: f32,
    pub left: bool,
    pub right: bool,
}

impl Player {
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            pos: Vec2::new(
                playfield.width / 2.0,
                playfield.height - PLAYER_BOTTOM_OFFSET,
            ),
            vel_x: 0.0,
            left: false,
            right: false,
        }
    }

    pub fn set_input(&mut self, left: bool, right: bool) {
        self.left = left;
        self.right = right;
    }

    /// Integrate one tick of horizontal movement
    pub fn update(&mut self, playfield_width: f32) {
        if self.left {
            self.vel_x -= PLAYER_ACCELERATION;
        }
        if self.right {
            self.vel_x += PLAYER_ACCELERATION;
        }
        if !self.left && !self.right {
            self.vel_x *= PLAYER_FRICTION;
        }
        self.vel_x = self.vel_x.clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);

        self.pos.x += self.vel_x;

        let max_x = (playfield_width - PLAYER_WIDTH).max(0.0);
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel_x = 0.0;
        }
        if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel_x = 0.0;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// A number falling toward the player
#[derive(Debug, Clone)]
pub struct FallingNumber {
    pub id: u32,
    /// Top-left corner; x is fixed at spawn
    pub pos: Vec2,
    pub value: i32,
    /// Pixels per tick, fixed at spawn
    pub fall_speed: f32,
    pub caught: bool,
}

impl FallingNumber {
    pub fn new(id: u32, x: f32, value: i32, tier: DifficultyTier, level: u32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, 0.0),
            value,
            fall_speed: tier.base_fall_speed() + level as f32 * SPEED_PER_LEVEL,
            caught: false,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.fall_speed;
    }

    pub fn is_off_screen(&self, playfield_height: f32) -> bool {
        self.pos.y > playfield_height
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(NUMBER_SIZE))
    }
}

/// One play-through from start to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) playfield: Playfield,
    pub(crate) phase: GamePhase,
    pub(crate) game_over_reason: Option<GameOverReason>,
    /// Tier the player picked; leaderboard entries are filed under it
    pub(crate) starting_tier: DifficultyTier,
    pub(crate) tier: DifficultyTier,
    pub(crate) score: u64,
    pub(crate) level: u32,
    /// Correct catches on the current tier (reset on tier advance)
    pub(crate) correct_answers: u32,
    /// Wrong catches over the whole run (never reset)
    pub(crate) wrong_answers: u32,
    pub(crate) time_remaining: u32,
    pub(crate) frame_counter: u32,
    pub(crate) spawn_counter: u32,
    pub(crate) time_ticks: u64,
    pub(crate) equation: Equation,
    /// Live numbers in spawn order
    pub(crate) numbers: Vec<FallingNumber>,
    pub(crate) player: Player,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Start a run on the given tier
    pub fn new(tier: DifficultyTier, playfield: Playfield, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let equation = equation::generate(tier, 1, &mut rng);
        log::info!(
            "New {} session (seed {}, playfield {}x{})",
            tier,
            seed,
            playfield.width,
            playfield.height
        );

        Self {
            seed,
            rng,
            playfield,
            phase: GamePhase::Running,
            game_over_reason: None,
            starting_tier: tier,
            tier,
            score: 0,
            level: 1,
            correct_answers: 0,
            wrong_answers: 0,
            time_remaining: tier.time_limit_secs(),
            frame_counter: 0,
            spawn_counter: 0,
            time_ticks: 0,
            equation,
            numbers: Vec::new(),
            player: Player::new(&playfield),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Flip between Running and Paused. Ignored once the run is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => return,
        };
        log::debug!("Session {:?}", self.phase);
    }

    /// Ticks between spawns at the current tier and level
    pub fn spawn_rate(&self) -> u32 {
        self.tier
            .base_spawn_rate()
            .saturating_sub(self.level.saturating_mul(SPAWN_RATE_PER_LEVEL))
            .max(MIN_SPAWN_RATE)
    }

    /// Spawn one number at the top edge. 40% carry the answer; the rest are
    /// decoys in [1, 50] nudged off the answer if they land on it.
    pub fn spawn_number(&mut self) {
        let max_x = (self.playfield.width - NUMBER_SIZE).max(0.0);
        let x = self.rng.random_range(0.0..=max_x);

        let answer = self.equation.answer();
        let value = if self.rng.random_bool(ANSWER_SPAWN_CHANCE) {
            answer
        } else {
            let decoy = self.rng.random_range(1..=MAX_DECOY_VALUE);
            if decoy == answer {
                decoy + self.rng.random_range(1..=10)
            } else {
                decoy
            }
        };

        let id = self.next_entity_id();
        self.numbers
            .push(FallingNumber::new(id, x, value, self.tier, self.level));
    }

    /// Enter the terminal phase
    pub(crate) fn end(&mut self, reason: GameOverReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
        log::info!(
            "Game over ({:?}): score {}, level {}, tier {}",
            reason,
            self.score,
            self.level,
            self.tier
        );
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn starting_tier(&self) -> DifficultyTier {
        self.starting_tier
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    pub fn lives_remaining(&self) -> u32 {
        MAX_WRONG_ANSWERS.saturating_sub(self.wrong_answers)
    }

    /// Seconds left on the countdown
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Ticks simulated while running
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    /// "7 + 5 = ?"
    pub fn equation_text(&self) -> String {
        self.equation.to_string()
    }

    pub fn falling_numbers(&self) -> &[FallingNumber] {
        &self.numbers
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }
}
