//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by one frame. Counters (countdown,
//! spawn cadence) are measured in ticks, so the shell must call this at the
//! fixed `SIM_DT` rate.

use std::cmp::Ordering;

use super::equation;
use super::state::{GameEvent, GameOverReason, GamePhase, GameSession};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow / A held
    pub left: bool,
    /// Right arrow / D held
    pub right: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Demo mode - the session steers the player itself
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep.
///
/// `_dt` is accepted for shells that track real time; all session timers
/// count ticks.
pub fn tick(session: &mut GameSession, input: &TickInput, _dt: f32) {
    if input.pause {
        session.toggle_pause();
    }

    // Don't tick if paused or game over
    if session.phase != GamePhase::Running {
        return;
    }

    let (left, right) = if input.autopilot {
        autopilot_steer(session)
    } else {
        (input.left, input.right)
    };
    session.player.set_input(left, right);
    session.player.update(session.playfield.width);

    session.time_ticks += 1;

    if advance_countdown(session) {
        return;
    }

    session.spawn_counter += 1;
    if session.spawn_counter >= session.spawn_rate() {
        session.spawn_counter = 0;
        session.spawn_number();
    }

    advance_numbers(session);
}

impl GameSession {
    /// Run one tick. See [`tick`].
    pub fn advance(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }
}

/// Count down one second every `TICKS_PER_SECOND` ticks. Returns true when
/// time ran out and the session ended.
fn advance_countdown(session: &mut GameSession) -> bool {
    session.frame_counter += 1;
    if session.frame_counter < TICKS_PER_SECOND {
        return false;
    }
    session.frame_counter = 0;
    session.time_remaining = session.time_remaining.saturating_sub(1);

    if session.time_remaining == TIMER_WARNING_SECONDS {
        session.events.push(GameEvent::TimerWarning);
    }
    if session.time_remaining == 0 {
        session.end(GameOverReason::TimeUp);
        return true;
    }
    false
}

/// Move every number down, then resolve catches and misses in spawn order
fn advance_numbers(session: &mut GameSession) {
    for number in &mut session.numbers {
        number.update();
    }

    let player_box = session.player.bounds();
    let height = session.playfield.height;
    let mut i = 0;
    while i < session.numbers.len() {
        if session.phase == GamePhase::GameOver {
            break;
        }

        let number = &mut session.numbers[i];
        if !number.caught && number.bounds().intersects(&player_box) {
            number.caught = true;
            let value = number.value;
            session.numbers.remove(i);
            session.events.push(GameEvent::Caught { value });
            handle_catch(session, value);
            continue;
        }

        if number.is_off_screen(height) {
            let value = number.value;
            session.numbers.remove(i);
            session.events.push(GameEvent::Missed { value });
            continue;
        }

        i += 1;
    }
}

/// Score a caught number against the current equation
fn handle_catch(session: &mut GameSession, value: i32) {
    if !session.equation.is_correct(value) {
        session.wrong_answers += 1;
        let lives_remaining = session.lives_remaining();
        log::debug!("Wrong catch {} ({} lives left)", value, lives_remaining);
        session.events.push(GameEvent::WrongAnswer {
            value,
            lives_remaining,
        });
        if session.wrong_answers >= MAX_WRONG_ANSWERS {
            session.end(GameOverReason::OutOfLives);
        }
        return;
    }

    let points = u64::from(POINTS_PER_CATCH) * u64::from(session.level);
    session.score += points;
    session.correct_answers += 1;
    log::debug!("Correct catch {} (+{})", value, points);
    session
        .events
        .push(GameEvent::CorrectAnswer { value, points });

    let new_level =
        u32::try_from(session.score / u64::from(POINTS_PER_LEVEL) + 1).unwrap_or(u32::MAX);
    if new_level > session.level {
        session.level = new_level;
        session.events.push(GameEvent::LevelUp { level: new_level });
    }

    if session.correct_answers >= session.tier.advancement_threshold() {
        match session.tier.next() {
            Some(next) => {
                log::info!("Tier {} cleared, advancing to {}", session.tier, next);
                session.tier = next;
                session.correct_answers = 0;
                session.events.push(GameEvent::TierAdvanced { tier: next });
            }
            None => {
                session.end(GameOverReason::Completed);
                return;
            }
        }
    }

    session.equation = equation::generate(session.tier, session.level, &mut session.rng);
}

/// Demo-mode steering: chase the lowest falling copy of the answer, drift
/// back to the middle when there is none.
fn autopilot_steer(session: &GameSession) -> (bool, bool) {
    const DEADZONE: f32 = 6.0;

    let answer = session.equation.answer();
    let player_bottom = session.player.pos.y + PLAYER_HEIGHT;
    let target_x = session
        .numbers
        .iter()
        .filter(|n| n.value == answer && n.pos.y < player_bottom)
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
        .map(|n| n.pos.x + NUMBER_SIZE / 2.0)
        .unwrap_or(session.playfield.width / 2.0);

    let player_center = session.player.pos.x + PLAYER_WIDTH / 2.0;
    let dx = target_x - player_center;
    if dx < -DEADZONE {
        (true, false)
    } else if dx > DEADZONE {
        (false, true)
    } else {
        (false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::equation::{Equation, Operation};
    use crate::sim::state::{FallingNumber, Playfield};
    use crate::sim::tier::DifficultyTier;

    fn new_session(tier: DifficultyTier) -> GameSession {
        GameSession::new(tier, Playfield::default(), 12345)
    }

    /// Place a number so it overlaps the player after its next fall step
    fn drop_on_player(session: &mut GameSession, value: i32) {
        let id = session.next_entity_id();
        let mut number =
            FallingNumber::new(id, session.player.pos.x, value, session.tier, session.level);
        number.pos.y = session.player.pos.y + 10.0 - number.fall_speed;
        session.numbers.push(number);
    }

    /// Catch exactly one number: clear the field and hold off the spawner
    fn catch_value(session: &mut GameSession, value: i32) {
        session.numbers.clear();
        session.spawn_counter = 0;
        drop_on_player(session, value);
        tick(session, &TickInput::default(), SIM_DT);
    }

    fn catch_correct(session: &mut GameSession) {
        let answer = session.equation.answer();
        catch_value(session, answer);
    }

    fn catch_wrong(session: &mut GameSession) {
        let wrong = session.equation.answer() + 1;
        catch_value(session, wrong);
    }

    #[derive(Debug, PartialEq)]
    struct Snapshot {
        phase: GamePhase,
        score: u64,
        level: u32,
        tier: DifficultyTier,
        correct: u32,
        wrong: u32,
        time_remaining: u32,
        frame_counter: u32,
        spawn_counter: u32,
        time_ticks: u64,
        equation: String,
        numbers: Vec<(u32, f32, f32)>,
        player: (f32, f32),
    }

    fn snapshot(s: &GameSession) -> Snapshot {
        Snapshot {
            phase: s.phase,
            score: s.score,
            level: s.level,
            tier: s.tier,
            correct: s.correct_answers,
            wrong: s.wrong_answers,
            time_remaining: s.time_remaining,
            frame_counter: s.frame_counter,
            spawn_counter: s.spawn_counter,
            time_ticks: s.time_ticks,
            equation: s.equation_text(),
            numbers: s.numbers.iter().map(|n| (n.id, n.pos.x, n.pos.y)).collect(),
            player: (s.player.pos.x, s.player.vel_x),
        }
    }

    #[test]
    fn test_correct_catch_scores_ten_at_level_one() {
        let mut session = new_session(DifficultyTier::Easy);
        catch_correct(&mut session);

        assert_eq!(session.score(), 10);
        assert_eq!(session.correct_answers(), 1);
        assert_eq!(session.lives_remaining(), 3);
        let events = session.take_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Caught { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::CorrectAnswer { points: 10, .. })));
    }

    #[test]
    fn test_level_up_every_fifty_points() {
        let mut session = new_session(DifficultyTier::Easy);
        for _ in 0..5 {
            catch_correct(&mut session);
        }
        assert_eq!(session.score(), 50);
        assert_eq!(session.level(), 2);
        assert!(
            session
                .take_events()
                .contains(&GameEvent::LevelUp { level: 2 })
        );

        // Next catch is worth 10 × level
        catch_correct(&mut session);
        assert_eq!(session.score(), 70);
    }

    #[test]
    fn test_three_wrong_catches_end_the_run() {
        let mut session = new_session(DifficultyTier::Easy);
        catch_wrong(&mut session);
        catch_wrong(&mut session);
        assert_eq!(session.lives_remaining(), 1);
        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);

        catch_wrong(&mut session);
        assert!(session.is_game_over());
        assert_eq!(session.game_over_reason(), Some(GameOverReason::OutOfLives));
        assert_eq!(session.lives_remaining(), 0);

        let before = snapshot(&session);
        tick(&mut session, &TickInput::default(), SIM_DT);
        tick(
            &mut session,
            &TickInput {
                right: true,
                pause: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(snapshot(&session), before);
    }

    #[test]
    fn test_easy_quota_advances_to_medium() {
        let mut session = new_session(DifficultyTier::Easy);
        catch_wrong(&mut session);

        for _ in 0..19 {
            catch_correct(&mut session);
        }
        assert_eq!(session.tier(), DifficultyTier::Easy);
        assert_eq!(session.correct_answers(), 19);

        catch_correct(&mut session);
        assert_eq!(session.tier(), DifficultyTier::Medium);
        assert_eq!(session.correct_answers(), 0);
        assert_eq!(session.wrong_answers(), 1);
        assert_eq!(session.starting_tier(), DifficultyTier::Easy);
        assert!(
            session
                .take_events()
                .contains(&GameEvent::TierAdvanced {
                    tier: DifficultyTier::Medium
                })
        );
    }

    #[test]
    fn test_medium_quota_advances_to_hard() {
        let mut session = new_session(DifficultyTier::Medium);
        for _ in 0..30 {
            catch_correct(&mut session);
        }
        assert_eq!(session.tier(), DifficultyTier::Hard);
        assert_eq!(session.correct_answers(), 0);
        assert!(!session.is_game_over());
    }

    /// True when no Medium equation could have these operands
    fn outside_medium_ranges(eq: &Equation) -> bool {
        if eq.is_complex() {
            return true;
        }
        let (a, b) = (eq.operands()[0], eq.operands()[1]);
        match eq.operations()[0] {
            Operation::Add => a > 20 || b > 20,
            Operation::Sub => a > 29,
            Operation::Mul => a > 12 || b > 12,
            Operation::Div => b > 13 || eq.answer() > 13,
        }
    }

    #[test]
    fn test_equation_after_tier_advance_uses_new_tier() {
        let mut hard_shaped = 0;
        for seed in 1..=10 {
            let mut session = GameSession::new(DifficultyTier::Medium, Playfield::default(), seed);
            for _ in 0..30 {
                catch_correct(&mut session);
            }
            assert_eq!(session.tier(), DifficultyTier::Hard);
            if outside_medium_ranges(session.equation()) {
                hard_shaped += 1;
            }
        }
        // Roughly nine in ten Hard equations fall outside every Medium range
        assert!(hard_shaped >= 5, "only {hard_shaped} of 10 looked like Hard");
    }

    #[test]
    fn test_hard_quota_completes_the_run() {
        let mut session = new_session(DifficultyTier::Hard);
        for _ in 0..39 {
            catch_correct(&mut session);
        }
        assert!(!session.is_game_over());

        let last_equation = session.equation().clone();
        catch_correct(&mut session);
        assert!(session.is_game_over());
        assert_eq!(session.game_over_reason(), Some(GameOverReason::Completed));
        assert_eq!(session.equation(), &last_equation);
        assert_eq!(session.tier(), DifficultyTier::Hard);
    }

    #[test]
    fn test_countdown_once_per_sixty_ticks() {
        let mut session = new_session(DifficultyTier::Easy);
        let input = TickInput::default();

        for _ in 0..59 {
            tick(&mut session, &input, SIM_DT);
            session.numbers.clear();
        }
        assert_eq!(session.time_remaining(), 120);
        tick(&mut session, &input, SIM_DT);
        assert_eq!(session.time_remaining(), 119);

        for _ in 0..120 {
            tick(&mut session, &input, SIM_DT);
            session.numbers.clear();
        }
        assert_eq!(session.time_remaining(), 117);
    }

    #[test]
    fn test_paused_session_does_not_count_down() {
        let mut session = new_session(DifficultyTier::Medium);
        tick(
            &mut session,
            &TickInput {
                pause: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(session.is_paused());

        let before = snapshot(&session);
        for _ in 0..600 {
            tick(&mut session, &TickInput::default(), SIM_DT);
        }
        assert_eq!(session.time_remaining(), 90);
        assert_eq!(snapshot(&session), before);

        tick(
            &mut session,
            &TickInput {
                pause: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(!session.is_paused());
        assert_eq!(session.time_ticks(), 1);
    }

    #[test]
    fn test_timer_warning_and_expiry() {
        let mut session = new_session(DifficultyTier::Hard);
        session.time_remaining = 11;
        session.frame_counter = TICKS_PER_SECOND - 1;
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.time_remaining(), 10);
        assert!(session.take_events().contains(&GameEvent::TimerWarning));

        session.time_remaining = 1;
        session.frame_counter = TICKS_PER_SECOND - 1;
        let spawn_counter = session.spawn_counter;
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.time_remaining(), 0);
        assert!(session.is_game_over());
        assert_eq!(session.game_over_reason(), Some(GameOverReason::TimeUp));
        // No further simulation on the tick that ended the run
        assert_eq!(session.spawn_counter, spawn_counter);
    }

    #[test]
    fn test_number_falls_at_fixed_speed_then_leaves() {
        let mut session = new_session(DifficultyTier::Easy);
        let id = session.next_entity_id();
        let number = FallingNumber::new(id, 0.0, 7, session.tier, session.level);
        let speed = number.fall_speed;
        session.numbers.push(number);

        let input = TickInput::default();
        for n in 1..=300u32 {
            tick(&mut session, &input, SIM_DT);
            session.numbers.retain(|num| num.id == id);
            let y = session.numbers[0].pos.y;
            assert!((y - speed * n as f32).abs() < 1e-3, "tick {n}: y = {y}");
        }

        // 2.0 px/tick reaches exactly 600 at tick 300; one more tick leaves
        tick(&mut session, &input, SIM_DT);
        assert!(session.numbers.iter().all(|num| num.id != id));
        assert!(session.take_events().contains(&GameEvent::Missed { value: 7 }));
        assert_eq!(session.score(), 0);
        assert_eq!(session.wrong_answers(), 0);
    }

    #[test]
    fn test_spawns_on_schedule() {
        let mut session = new_session(DifficultyTier::Hard);
        let rate = session.spawn_rate();
        for _ in 0..rate - 1 {
            tick(&mut session, &TickInput::default(), SIM_DT);
        }
        assert!(session.falling_numbers().is_empty());
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.falling_numbers().len(), 1);
        assert_eq!(session.spawn_counter, 0);
    }

    #[test]
    fn test_game_over_stops_processing_remaining_numbers() {
        let mut session = new_session(DifficultyTier::Easy);
        session.wrong_answers = 2;
        let wrong = session.equation.answer() + 1;
        drop_on_player(&mut session, wrong);
        drop_on_player(&mut session, wrong);
        tick(&mut session, &TickInput::default(), SIM_DT);

        assert!(session.is_game_over());
        assert_eq!(session.wrong_answers(), 3);
        assert_eq!(session.falling_numbers().len(), 1);
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut session = new_session(DifficultyTier::Easy);
        let start = session.player().pos.x;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut session, &input, SIM_DT);
        }
        assert!(session.player().pos.x < start);
        assert_eq!(session.player().vel_x, -PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_autopilot_steers_toward_answer() {
        let mut session = new_session(DifficultyTier::Easy);
        let id = session.next_entity_id();
        let answer = session.equation.answer();
        session
            .numbers
            .push(FallingNumber::new(id, 50.0, answer, session.tier, session.level));

        let start = session.player().pos.x;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut session, &input, SIM_DT);
        assert!(session.player().pos.x < start);
        assert!(session.player().left);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(DifficultyTier::Medium, Playfield::default(), 99999);
        let mut b = GameSession::new(DifficultyTier::Medium, Playfield::default(), 99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                autopilot: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for step in 0..2_000 {
            let input = &inputs[(step / 50) % inputs.len()];
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }

        assert_eq!(snapshot(&a), snapshot(&b));
        assert_eq!(a.take_events(), b.take_events());
    }
}
