//! Engine operations
//!
//! Two independent cadences advance the same state: `advance_fast` once per
//! rendered frame (bullets, collisions, wave progression) and `advance_slow`
//! on a fixed interval (enemy descent, loss check). Every mutating call is a
//! silent no-op unless a run is live.

use serde::{Deserialize, Serialize};

use super::collision::bullet_hits_enemy;
use super::state::{Bullet, GameEvent, GameState, HitPolicy, Player, RunPhase};
use super::wave::{generate_wave, tier_for_level};
use crate::consts::*;

/// Player movement request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveIntent {
    Left,
    Right,
    /// Pointer tracking: center the paddle under this x coordinate
    PointerX(f32),
}

/// Input gathered between two ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub movement: Option<MoveIntent>,
    pub fire: bool,
}

/// Reset everything and begin a new run at level 1
pub fn start_run(state: &mut GameState) {
    state.score = 0;
    state.level = 1;
    state.bullets.clear();
    state.player = Player::new(state.arena.player_spawn());
    state.enemies = generate_wave(tier_for_level(state.level));
    state.fast_ticks = 0;
    state.slow_ticks = 0;
    state.phase = RunPhase::Running;
    state.events.push(GameEvent::RunStarted);

    log::info!("Run started with {} enemies", state.enemies.len());
}

/// Move the paddle. Positions are not clamped to the arena.
pub fn apply_move(state: &mut GameState, intent: MoveIntent) {
    if !state.is_running() {
        return;
    }

    let player = &mut state.player;
    match intent {
        MoveIntent::Left => player.pos.x -= PLAYER_STEP,
        MoveIntent::Right => player.pos.x += PLAYER_STEP,
        MoveIntent::PointerX(px) => player.pos.x = px - PLAYER_WIDTH / 2.0,
    }
}

/// Shoot from the paddle's center; no limit on live bullets
pub fn fire(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    state.bullets.push(Bullet::from_player(&state.player));
}

/// Apply a batch of input in order: movement first, then fire
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    if let Some(intent) = input.movement {
        apply_move(state, intent);
    }
    if input.fire {
        fire(state);
    }
}

/// Render-rate tick: bullets travel, hits resolve, cleared waves advance
pub fn advance_fast(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    state.fast_ticks += 1;

    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_STEP;
    }
    state.bullets.retain(|b| b.pos.y > TOP_BOUND);

    resolve_hits(state);

    if state.enemies.iter().all(|e| !e.alive) {
        state.level += 1;
        state.enemies = generate_wave(tier_for_level(state.level));
        state.events.push(GameEvent::WaveCleared { level: state.level });
        log::info!(
            "Wave cleared, level {} with {} enemies",
            state.level,
            state.enemies.len()
        );
    }
}

/// Test every bullet against every live enemy.
///
/// A hit kills the enemy, scores, and parks the bullet above the top bound.
/// Parked bullets can no longer hit anything because every enemy sits below
/// the top bound.
fn resolve_hits(state: &mut GameState) {
    let mut hits = 0u64;

    for bullet in &mut state.bullets {
        for enemy in &mut state.enemies {
            if bullet_hits_enemy(bullet, enemy) {
                enemy.alive = false;
                bullet.pos.y = SPENT_BULLET_Y;
                hits += 1;
            }
        }
    }

    if hits == 0 {
        return;
    }

    for _ in 0..hits {
        state.score += HIT_POINTS;
        state.events.push(GameEvent::EnemyDestroyed { points: HIT_POINTS });
    }

    if state.hit_policy == HitPolicy::Consume {
        state.bullets.retain(|b| b.pos.y > TOP_BOUND);
    }
}

/// Fixed-interval tick: live enemies descend, crossing the player's row ends the run
pub fn advance_slow(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    state.slow_ticks += 1;

    let step = descent_step(state.level);
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.pos.y += step;
    }

    let player_y = state.player.pos.y;
    if state
        .enemies
        .iter()
        .any(|e| e.alive && e.bottom() > player_y)
    {
        end_run(state);
    }
}

/// Per-slow-tick enemy descent at `level`
pub fn descent_step(level: u32) -> f32 {
    ENEMY_BASE_DESCENT + level as f32 * ENEMY_LEVEL_DESCENT
}

fn end_run(state: &mut GameState) {
    state.phase = RunPhase::Ended;
    state.events.push(GameEvent::RunEnded {
        score: state.score,
        level: state.level,
    });
    log::info!(
        "Run ended at level {} with score {}",
        state.level,
        state.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, Enemy, Hue};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::default();
        start_run(&mut state);
        state.drain_events();
        state
    }

    /// A bullet whose next fast-tick position sits inside `enemy`
    fn bullet_below(enemy: &Enemy) -> Bullet {
        Bullet {
            pos: Vec2::new(enemy.pos.x + 5.0, enemy.pos.y + 5.0 + BULLET_STEP),
        }
    }

    #[test]
    fn test_start_run_resets() {
        let mut state = running_state();
        state.score = 120;
        state.level = 4;
        state.bullets.push(Bullet {
            pos: Vec2::new(1.0, 1.0),
        });
        state.player.pos.x = -300.0;
        state.phase = RunPhase::Ended;

        start_run(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.pos, state.arena.player_spawn());
        assert_eq!(state.enemies.len(), 24);
        assert!(state.enemies.iter().all(|e| e.alive));
        assert!(state.is_running());
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_idle_state_ignores_everything() {
        let mut state = GameState::default();
        let before = state.snapshot();

        apply_move(&mut state, MoveIntent::Left);
        apply_move(&mut state, MoveIntent::PointerX(10.0));
        fire(&mut state);
        advance_fast(&mut state);
        advance_slow(&mut state);

        assert_eq!(state.snapshot(), before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_move_intents() {
        let mut state = running_state();
        let x = state.player.pos.x;

        apply_move(&mut state, MoveIntent::Left);
        assert_eq!(state.player.pos.x, x - 10.0);
        apply_move(&mut state, MoveIntent::Right);
        apply_move(&mut state, MoveIntent::Right);
        assert_eq!(state.player.pos.x, x + 10.0);

        apply_move(&mut state, MoveIntent::PointerX(300.0));
        assert_eq!(state.player.pos.x, 280.0);
    }

    #[test]
    fn test_moves_are_not_clamped() {
        let mut state = running_state();
        apply_move(&mut state, MoveIntent::PointerX(-50.0));
        for _ in 0..5 {
            apply_move(&mut state, MoveIntent::Left);
        }
        assert_eq!(state.player.pos.x, -120.0);
    }

    #[test]
    fn test_fire_then_fast_tick() {
        let mut state = running_state();
        state.player.pos.x = 100.0;
        let player_y = state.player.pos.y;

        fire(&mut state);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(
            state.bullets[0].pos,
            Vec2::new(100.0 + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0, player_y)
        );

        advance_fast(&mut state);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.y, player_y - BULLET_STEP);
    }

    #[test]
    fn test_unlimited_bullets() {
        let mut state = running_state();
        for _ in 0..50 {
            fire(&mut state);
        }
        assert_eq!(state.bullets.len(), 50);
    }

    #[test]
    fn test_bullets_leave_at_top_bound() {
        let mut state = running_state();
        state.bullets.push(Bullet {
            pos: Vec2::new(5.0, 4.0),
        });
        state.bullets.push(Bullet {
            pos: Vec2::new(5.0, 4.5),
        });
        advance_fast(&mut state);
        // y=0 is not above the bound, y=0.5 is
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.y, 0.5);
    }

    #[test]
    fn test_hit_kills_enemy_and_scores() {
        let mut state = running_state();
        let target = state.enemies[3].clone();
        state.bullets.push(bullet_below(&target));

        advance_fast(&mut state);
        assert!(!state.enemies[3].alive);
        assert_eq!(state.score, 10);
        assert!(state.bullets.is_empty());
        assert_eq!(state.live_enemies(), 23);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::EnemyDestroyed { points: 10 }]
        );
    }

    #[test]
    fn test_independent_hits_in_one_tick() {
        let mut state = running_state();
        for i in [0, 5, 9] {
            let b = bullet_below(&state.enemies[i]);
            state.bullets.push(b);
        }

        advance_fast(&mut state);
        assert_eq!(state.score, 30);
        assert_eq!(state.live_enemies(), 21);
    }

    #[test]
    fn test_parity_policy_keeps_spent_bullet_one_tick() {
        let mut state = GameState::new(Arena::default(), HitPolicy::Parity);
        start_run(&mut state);
        let b = bullet_below(&state.enemies[0]);
        state.bullets.push(b);

        advance_fast(&mut state);
        assert_eq!(state.score, 10);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.y, SPENT_BULLET_Y);

        advance_fast(&mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_clearing_wave_advances_level() {
        let mut state = running_state();
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies.len(), 24);
        for enemy in &mut state.enemies {
            enemy.alive = false;
        }

        advance_fast(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 32);
        assert!(state.enemies.iter().all(|e| e.alive));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::WaveCleared { level: 2 }]
        );
    }

    #[test]
    fn test_last_hit_triggers_new_wave_same_tick() {
        let mut state = running_state();
        for enemy in state.enemies.iter_mut().skip(1) {
            enemy.alive = false;
        }
        let b = bullet_below(&state.enemies[0]);
        state.bullets.push(b);

        advance_fast(&mut state);
        assert_eq!(state.score, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.live_enemies(), 32);
    }

    #[test]
    fn test_slow_tick_descends_live_enemies_only() {
        let mut state = running_state();
        state.enemies[1].alive = false;
        let y0 = state.enemies[0].pos.y;
        let y1 = state.enemies[1].pos.y;

        advance_slow(&mut state);
        assert!((state.enemies[0].pos.y - (y0 + 0.25)).abs() < 1e-5);
        assert_eq!(state.enemies[1].pos.y, y1);
    }

    #[test]
    fn test_descent_grows_with_level() {
        assert!((descent_step(1) - 0.25).abs() < 1e-6);
        assert!((descent_step(4) - 0.4).abs() < 1e-6);
        assert!(descent_step(5) > descent_step(4));
    }

    #[test]
    fn test_enemy_crossing_player_row_ends_run_once() {
        let mut state = running_state();
        state.score = 70;
        let player_y = state.player.pos.y;
        // Enemy 0 only touches the player's row; enemy 1 is past it
        state.enemies[0].pos.y = player_y - ENEMY_SIZE - descent_step(1);
        state.enemies[1].pos.y = player_y;

        advance_slow(&mut state);
        assert_eq!(state.phase, RunPhase::Ended);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::RunEnded {
                score: 70,
                level: 1
            }]
        );

        advance_slow(&mut state);
        advance_fast(&mut state);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_dead_enemy_below_player_does_not_end_run() {
        let mut state = running_state();
        state.enemies[0].pos.y = state.player.pos.y + 100.0;
        state.enemies[0].alive = false;

        advance_slow(&mut state);
        assert!(state.is_running());
    }

    #[test]
    fn test_touching_player_row_is_not_a_loss() {
        let mut state = running_state();
        let player_y = state.player.pos.y;
        state.enemies[0].pos.y = player_y - ENEMY_SIZE - descent_step(1) - 1.0;

        advance_slow(&mut state);
        assert!(state.is_running());
    }

    #[test]
    fn test_input_after_loss_is_ignored() {
        let mut state = running_state();
        state.enemies[0].pos.y = state.player.pos.y;
        advance_slow(&mut state);
        assert!(!state.is_running());

        let before = state.snapshot();
        apply_input(
            &mut state,
            &TickInput {
                movement: Some(MoveIntent::Right),
                fire: true,
            },
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_independent_states_do_not_interfere() {
        let mut a = running_state();
        let b = running_state();
        fire(&mut a);
        advance_fast(&mut a);
        assert_eq!(a.bullets.len(), 1);
        assert!(b.bullets.is_empty());
        assert_eq!(b.fast_ticks, 0);
    }

    #[test]
    fn test_hue_stays_on_enemy() {
        let state = running_state();
        assert_eq!(state.enemies[0].hue, Hue(0));
        assert_eq!(state.enemies[8].hue, Hue(20));
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        let movement = prop_oneof![
            Just(None),
            Just(Some(MoveIntent::Left)),
            Just(Some(MoveIntent::Right)),
            (-100.0f32..600.0).prop_map(|x| Some(MoveIntent::PointerX(x))),
        ];
        (movement, any::<bool>()).prop_map(|(movement, fire)| TickInput { movement, fire })
    }

    #[derive(Debug, Clone)]
    enum Step {
        Input(TickInput),
        Fast,
        Slow,
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            3 => arb_input().prop_map(Step::Input),
            4 => Just(Step::Fast),
            1 => Just(Step::Slow),
        ]
    }

    /// Bullets keep their order, so every bullet left after a fast tick must
    /// match a distinct earlier bullet that either moved one step up or was
    /// parked after a hit.
    fn each_bullet_descended(before: &[f32], after: &[f32]) -> bool {
        let mut earlier = before.iter();
        after
            .iter()
            .all(|&y| earlier.any(|&b| y == b - BULLET_STEP || y == SPENT_BULLET_Y))
    }

    proptest! {
        #[test]
        fn bullets_stay_below_top_bound_and_score_never_drops(
            policy in prop_oneof![Just(HitPolicy::Consume), Just(HitPolicy::Parity)],
            steps in proptest::collection::vec(arb_step(), 1..400)
        ) {
            let mut state = GameState::new(Arena::default(), policy);
            start_run(&mut state);
            let mut last_score = 0;

            for step in steps {
                match step {
                    Step::Input(input) => apply_input(&mut state, &input),
                    Step::Fast => {
                        let before: Vec<f32> = state.bullets.iter().map(|b| b.pos.y).collect();
                        advance_fast(&mut state);
                        if state.is_running() {
                            let after: Vec<f32> = state.bullets.iter().map(|b| b.pos.y).collect();
                            prop_assert!(each_bullet_descended(&before, &after));
                            prop_assert!(after.len() <= before.len());
                            match policy {
                                HitPolicy::Consume => {
                                    prop_assert!(after.iter().all(|&y| y > TOP_BOUND));
                                }
                                HitPolicy::Parity => {
                                    prop_assert!(
                                        after.iter().all(|&y| y > TOP_BOUND || y == SPENT_BULLET_Y)
                                    );
                                }
                            }
                        }
                    }
                    Step::Slow => advance_slow(&mut state),
                }
                prop_assert!(state.score >= last_score);
                prop_assert_eq!(state.score % HIT_POINTS, 0);
                last_score = state.score;
            }
        }

        #[test]
        fn score_matches_dead_enemy_count_within_a_wave(
            inputs in proptest::collection::vec(arb_input(), 1..200)
        ) {
            let mut state = running_state();
            for input in &inputs {
                apply_input(&mut state, input);
                advance_fast(&mut state);
                if state.level > 1 {
                    break;
                }
                let dead = state.enemies.iter().filter(|e| !e.alive).count() as u64;
                prop_assert_eq!(state.score, dead * HIT_POINTS);
            }
        }
    }
}
