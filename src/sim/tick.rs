//! Spin lifecycle: request, frame advance, settle
//!
//! The embedding layer calls `advance` once per frame with the elapsed
//! milliseconds; everything else is driven by the state machine.

use rand::Rng;

use super::easing::{ease_out, lerp};
use super::layout::{forward_target, target_residue};
use super::select::select_winner;
use super::state::{ActiveSpin, SpinPhase, SpinResult, WheelEvent, WheelState};
use crate::consts::MAX_FRAME_DT_MS;
use crate::error::WheelError;

/// Start a spin: draw the winner, latch the animation parameters, enter
/// `Spinning`.
///
/// Returns `Ok(false)` and leaves the in-flight spin untouched when the
/// wheel is already busy. Validation failures surface before any state
/// change.
pub fn request_spin<R: Rng + ?Sized>(
    state: &mut WheelState,
    rng: &mut R,
) -> Result<bool, WheelError> {
    if state.is_spinning() {
        log::warn!("spin requested while {}; ignored", state.phase.as_str());
        return Ok(false);
    }

    let winning_index = select_winner(&state.items, &state.config, rng)?;
    let winning_item = state.items[winning_index].clone();

    let residue = target_residue(&state.items, state.config.weighted_mode, winning_index);
    let target = forward_target(
        state.rotation,
        residue,
        state.config.effective_extra_turns(),
    );
    log::debug!(
        "spin start: winner {} '{}', target {:.4} rad from {:.4}",
        winning_index,
        winning_item.label,
        target,
        state.rotation
    );

    state.spin = Some(ActiveSpin {
        start_rotation: state.rotation,
        target_rotation: target,
        duration_ms: state.config.effective_spin_duration_ms(),
        ease_exponent: state.config.effective_ease_exponent(),
        settle_delay_ms: state.config.effective_settle_delay_ms(),
        elapsed_ms: 0.0,
        settle_elapsed_ms: 0.0,
        result: SpinResult {
            winning_index,
            winning_item,
        },
    });
    state.phase = SpinPhase::Spinning;
    state
        .events
        .push(WheelEvent::PhaseChanged(SpinPhase::Spinning));
    Ok(true)
}

/// Advance the wheel by one frame of `dt_ms` milliseconds.
///
/// Emits one `Rotation` event per animated frame, including the final frame,
/// which snaps to the target exactly. Idle advances are no-ops. `dt_ms` is
/// clamped to [0, `MAX_FRAME_DT_MS`] so a stalled tab cannot skip the
/// deceleration.
pub fn advance(state: &mut WheelState, dt_ms: f64) {
    let dt = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);

    match state.phase {
        SpinPhase::Idle => {}
        SpinPhase::Spinning => {
            let Some(spin) = state.spin.as_mut() else {
                return;
            };
            spin.elapsed_ms += dt;
            let progress = if spin.duration_ms > 0.0 {
                (spin.elapsed_ms / spin.duration_ms).min(1.0)
            } else {
                1.0
            };

            if progress >= 1.0 {
                // Final frame lands on the target with no float residue
                state.rotation = spin.target_rotation;
                state.events.push(WheelEvent::Rotation(state.rotation));
                state.phase = SpinPhase::Settling;
                state
                    .events
                    .push(WheelEvent::PhaseChanged(SpinPhase::Settling));
            } else {
                let eased = ease_out(progress, spin.ease_exponent);
                state.rotation = lerp(spin.start_rotation, spin.target_rotation, eased);
                state.events.push(WheelEvent::Rotation(state.rotation));
            }
        }
        SpinPhase::Settling => {
            let settled = match state.spin.as_mut() {
                Some(spin) => {
                    spin.settle_elapsed_ms += dt;
                    spin.settle_elapsed_ms >= spin.settle_delay_ms
                }
                None => false,
            };
            if settled {
                if let Some(spin) = state.spin.take() {
                    log::info!(
                        "spin complete: {} '{}'",
                        spin.result.winning_index,
                        spin.result.winning_item.label
                    );
                    state.events.push(WheelEvent::SpinCompleted(spin.result));
                    state.phase = SpinPhase::Idle;
                    state.events.push(WheelEvent::PhaseChanged(SpinPhase::Idle));
                }
            }
        }
    }
}
