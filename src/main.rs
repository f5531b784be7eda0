//! Prize Wheel entry point
//!
//! Native builds run a seeded demo spin and print the event stream. The web
//! widget is constructed from JS via `prize_wheel::widget::WheelWidget`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use prize_wheel::consts::FALLBACK_FRAME_DT_MS;
    use prize_wheel::sim::{WheelEvent, WheelState, tick};
    use prize_wheel::{Roster, WheelConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Prize Wheel (native) starting...");

    let roster = Roster::default();
    let mut state = WheelState::new(roster.items, WheelConfig::default());
    let mut rng = Pcg32::seed_from_u64(42);

    match tick::request_spin(&mut state, &mut rng) {
        Ok(true) => {}
        Ok(false) => {
            log::warn!("Wheel was busy");
            return;
        }
        Err(e) => {
            log::error!("Spin rejected: {}", e);
            return;
        }
    }

    let mut frames = 0u32;
    loop {
        tick::advance(&mut state, FALLBACK_FRAME_DT_MS);
        frames += 1;
        for event in state.drain_events() {
            match event {
                WheelEvent::PhaseChanged(phase) => {
                    println!("[{frames:4}] phase: {}", phase.as_str());
                }
                WheelEvent::SpinCompleted(result) => {
                    println!(
                        "[{frames:4}] winner: #{} '{}'",
                        result.winning_index, result.winning_item.label
                    );
                }
                WheelEvent::Rotation(_) => {}
            }
        }
        if !state.is_spinning() || frames > 10_000 {
            break;
        }
    }

    println!(
        "final rotation: {:.4} rad after {} frames",
        state.rotation(),
        frames
    );
    println!("✓ Demo spin complete!");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web entry point is the WheelWidget constructor; nothing to run here
}
