//! Simulation step
//!
//! One call advances the active block, resolves a drop request, runs the
//! pulse animations and ages the falling pieces.

use glam::Vec3;

use super::block::{Block, FallingPiece};
use super::command::Command;
use super::cut::{CutOutcome, resolve};
use super::pulse::{Pulse, PulseStep};
use super::state::{GamePhase, TowerState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop the active block (click/tap/space). Restarts when game over.
    pub drop: bool,
    /// Start a new run (only honoured when game over)
    pub restart: bool,
    /// Let `TowerState::autopilot` add drops and restarts to this input
    pub autoplay: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(state: &mut TowerState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    if state.phase == GamePhase::GameOver {
        let auto_restart = input.autoplay && state.autopilot.restart_on_game_over;
        if input.restart || input.drop || auto_restart {
            restart(state);
        }
        return;
    }

    state.time_ticks += 1;

    // Judged before the move, the autopilot predicts this tick's step
    let mut drop_requested = input.drop;
    if input.autoplay && !drop_requested {
        if let Some(approach) = state.approach(dt) {
            drop_requested = state.autopilot.wants_drop(approach, &state.config);
        }
    }

    move_active(state, dt);

    if drop_requested {
        drop_active(state);
    }

    update_pulses(state, dt);
    age_falling(state, dt);
}

/// Replace the session with a fresh one using the same config
pub fn restart(state: &mut TowerState) {
    log::info!(
        "Restarting (previous height {}, {} ticks)",
        state.score,
        state.time_ticks
    );
    let mut fresh = TowerState::new(state.config.clone());
    fresh.autopilot = std::mem::take(&mut state.autopilot);
    fresh.autopilot.reset_aim();
    let mut commands = vec![Command::ResetScene];
    commands.append(&mut fresh.commands);
    fresh.commands = commands;
    *state = fresh;
}

fn move_active(state: &mut TowerState, dt: f32) {
    let axis = state.axis;
    let bounds = state.config.bounds;
    let step = state.speed * state.direction * dt;

    let Some(active) = state.active.as_mut() else {
        return;
    };
    if step == 0.0 {
        return;
    }

    active.position += axis.unit() * step;
    let along = axis.get(active.position);
    if along > bounds || along < -bounds {
        state.direction = -state.direction;
    }

    state.commands.push(Command::MoveBlock {
        id: active.id,
        position: active.position,
    });
}

fn drop_active(state: &mut TowerState) {
    let Some(mut active) = state.active.take() else {
        return;
    };
    let axis = state.axis;
    let last = state.last_block();
    let outcome = resolve(
        active.axis_position(axis),
        last.axis_position(axis),
        last.axis_extent(axis),
        state.config.tolerance,
    );

    match outcome {
        CutOutcome::Perfect { center } => {
            active.position = axis.with(active.position, center);
            state.combo += 1;
            state.best_combo = state.best_combo.max(state.combo);

            if state.combo > state.config.grow_combo_threshold {
                let max = state.config.max_extent;
                let grow = state.config.grow_amount;
                active.scale.x = (active.scale.x + grow).clamp(0.0, max);
                active.scale.z = (active.scale.z + grow).clamp(0.0, max);
                log::debug!("Combo {} grew block to {:?}", state.combo, active.scale);
            }

            state.commands.push(Command::SetBlockTransform {
                id: active.id,
                position: active.position,
                scale: active.scale,
            });
            let pitch = state.config.drop_pitch(state.combo);
            play_drop_sound(state, pitch);
            state.pulses.push(Pulse::new(
                active.id,
                active.scale,
                state.config.pulse_grow,
                state.config.pulse_duration,
            ));
            log::debug!("Perfect drop, combo {}", state.combo);
            successful_drop(state, active);
        }

        CutOutcome::Miss => {
            log::info!(
                "Missed the tower at height {} after {} ticks",
                state.score,
                state.time_ticks
            );
            state.phase = GamePhase::GameOver;
            state.commands.push(Command::AttachPhysics { id: active.id });
            state.commands.push(Command::ShowGameOver);
            state.lost_block = Some(active);
        }

        CutOutcome::Partial {
            kept_center,
            kept_extent,
            falling_center,
            falling_extent,
        } => {
            state.combo = 0;
            play_drop_sound(state, 1.0);

            active.position = axis.with(active.position, kept_center);
            active.scale = axis.with(active.scale, kept_extent);
            state.commands.push(Command::SetBlockTransform {
                id: active.id,
                position: active.position,
                scale: active.scale,
            });

            let piece = Block {
                id: state.next_block_id(),
                position: axis.with(active.position, falling_center),
                scale: axis.with(active.scale, falling_extent),
                color: state.color_for(state.stack.len()),
            };
            spawn_falling(state, piece);
            log::debug!("Cut {:.3} off, kept {:.3}", falling_extent, kept_extent);
            successful_drop(state, active);
        }
    }
}

fn spawn_falling(state: &mut TowerState, piece: Block) {
    let lifetime = state.config.falling_lifetime;
    state.emit_spawn(&piece);
    state.commands.push(Command::AttachPhysics { id: piece.id });
    state.commands.push(Command::DestroyAfter {
        id: piece.id,
        seconds: lifetime,
    });
    state.falling.push(FallingPiece {
        block: piece,
        ttl: lifetime,
    });
}

fn successful_drop(state: &mut TowerState, placed: Block) {
    state.score += 1;
    state.commands.push(Command::UpdateScore {
        text: state.score.to_string(),
    });
    state.speed += state.config.speed_increment;

    state.stack.push(placed);

    let delta = Vec3::Y * state.config.block_height;
    state.camera_offset += delta;
    state.commands.push(Command::ShiftCamera { delta });

    state.spawn_next();
}

fn play_drop_sound(state: &mut TowerState, pitch: f32) {
    if let Some(clip) = &state.config.drop_sound {
        state.commands.push(Command::PlaySound {
            clip: clip.clone(),
            pitch,
        });
    }
}

fn update_pulses(state: &mut TowerState, dt: f32) {
    let stack = &state.stack;
    let commands = &mut state.commands;
    state.pulses.retain_mut(|pulse| {
        let alive = stack.iter().any(|b| b.id == pulse.target);
        match pulse.advance(dt, alive) {
            PulseStep::Scale(scale) => {
                commands.push(Command::SetBlockScale {
                    id: pulse.target,
                    scale,
                });
                true
            }
            PulseStep::Done(scale) => {
                commands.push(Command::SetBlockScale {
                    id: pulse.target,
                    scale,
                });
                false
            }
            PulseStep::Cancelled => false,
        }
    });
}

fn age_falling(state: &mut TowerState, dt: f32) {
    for piece in &mut state.falling {
        piece.ttl -= dt;
    }
    state.falling.retain(|p| p.ttl > 0.0);
}
