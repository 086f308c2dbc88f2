//! Event-driven simulation tick
//!
//! The game advances on two kinds of events: a pointer sample and an
//! animation frame. Each returns a [`TickOutcome`] for the caller to act on.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{hits_wall, reaches_item, self_collision};
use super::geometry::distance;
use super::state::{GameOverReason, GamePhase, GameState, TickOutcome};
use crate::Point;
use crate::settings::SpeedPolicy;

/// Leave the title screen; returns false when not on it
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Title {
        return false;
    }
    log::info!("Waiting for pointer in the start area");
    state.phase = GamePhase::Ready;
    true
}

/// Handle one pointer sample (play-area coordinates, timestamp in ms)
pub fn pointer_sample(state: &mut GameState, point: Point, timestamp: f64) -> TickOutcome {
    match state.phase {
        GamePhase::Ready => {
            if distance(point, state.bounds.center()) < state.settings.ready_radius {
                log::info!("Countdown started");
                state.phase = GamePhase::Countdown {
                    started_at: timestamp,
                };
            }
            TickOutcome::Continue
        }
        GamePhase::Countdown { .. } => {
            record(state, point, timestamp);
            state.snake.follow(&mut state.trail);
            TickOutcome::Continue
        }
        GamePhase::Playing { .. } => {
            record(state, point, timestamp);
            state.sampled_since_frame = true;
            let check_speed = state.settings.speed_policy == SpeedPolicy::OnSample;
            tick(state, check_speed)
        }
        GamePhase::Title | GamePhase::GameOver(_) => TickOutcome::Continue,
    }
}

/// Handle the pointer leaving the play area
pub fn pointer_left(state: &mut GameState) -> TickOutcome {
    match state.phase {
        GamePhase::Countdown { .. } => {
            log::info!("Pointer left during countdown, back to ready");
            state.reset_round();
            state.phase = GamePhase::Ready;
            TickOutcome::Continue
        }
        GamePhase::Playing { .. } => game_over(state, GameOverReason::HitWall),
        _ => TickOutcome::Continue,
    }
}

/// Handle an animation frame at `now` (ms, same clock as pointer timestamps)
pub fn frame(state: &mut GameState, now: f64) -> TickOutcome {
    match state.phase {
        GamePhase::Countdown { started_at } => {
            if now - started_at > state.settings.countdown_secs * 1000.0 {
                state.place_item();
                state.phase = GamePhase::Playing { started_at: now };
                state.sampled_since_frame = false;
                log::info!("Round started");
            }
            TickOutcome::Continue
        }
        GamePhase::Playing { .. } => match state.settings.speed_policy {
            SpeedPolicy::OnSample => TickOutcome::Continue,
            SpeedPolicy::EveryFrame { idle_grace_ms } => {
                let idle = !state.sampled_since_frame
                    && state
                        .trail
                        .last_time()
                        .is_none_or(|last| now - last >= idle_grace_ms);
                if idle {
                    let timestamp = state.trail.last_time().map_or(now, |last| now.max(last));
                    state.trail.record_idle(timestamp);
                    state.speed.update(&state.trail);
                }
                state.sampled_since_frame = false;
                tick(state, true)
            }
        },
        _ => TickOutcome::Continue,
    }
}

/// Start a fresh round from any phase, keeping settings and bounds
pub fn restart(state: &mut GameState, seed: u64) {
    state.seed = seed;
    state.rng = Pcg32::seed_from_u64(seed);
    state.reset_round();
    state.phase = GamePhase::Ready;
    log::info!("Restarted with seed {}", seed);
}

/// Whole seconds left on the countdown, if one is running
pub fn countdown_remaining(state: &GameState, now: f64) -> Option<u32> {
    match state.phase {
        GamePhase::Countdown { started_at } => {
            let elapsed_secs = ((now - started_at) / 1000.0).max(0.0).floor();
            Some((state.settings.countdown_secs - elapsed_secs).max(0.0) as u32)
        }
        _ => None,
    }
}

/// Rebuild the body and run the round checks
///
/// Wall, self and speed are checked in that order; a pellet is only eaten
/// when nothing fatal fired.
pub fn tick(state: &mut GameState, check_speed: bool) -> TickOutcome {
    state.snake.follow(&mut state.trail);

    let Some(head) = state.snake.head() else {
        return TickOutcome::Continue;
    };
    if hits_wall(head, &state.bounds) {
        return game_over(state, GameOverReason::HitWall);
    }
    if let Some(link) = self_collision(state.snake.body()) {
        log::debug!("Head link crossed link {}", link);
        return game_over(state, GameOverReason::HitSelf);
    }
    if check_speed && state.speed.too_slow() {
        return game_over(state, GameOverReason::TooSlow);
    }

    let eaten = match (state.item, state.trail.head_segment()) {
        (Some(item), Some(movement)) => reaches_item(movement, &item, state.snake.width),
        _ => false,
    };
    if eaten {
        return eat(state);
    }
    TickOutcome::Continue
}

/// Store a sample and measure speed; the body is rebuilt by the caller
fn record(state: &mut GameState, point: Point, timestamp: f64) {
    state.trail.record(point, timestamp);
    state.speed.update(&state.trail);
}

fn eat(state: &mut GameState) -> TickOutcome {
    state.score += 1;
    state
        .speed
        .raise_limit(state.settings.speed_increment, state.settings.max_speed);
    state.snake.grow();
    state.place_item();
    log::debug!(
        "Pellet eaten: score {}, speed limit {:.2}",
        state.score,
        state.speed.speed_limit
    );
    TickOutcome::Scored { score: state.score }
}

fn game_over(state: &mut GameState, reason: GameOverReason) -> TickOutcome {
    log::info!("Game over ({:?}) with score {}", reason, state.score);
    state.phase = GamePhase::GameOver(reason);
    TickOutcome::GameOver(reason)
}
