//! Timed state transitions
//!
//! The single entry point the driver calls once per animation frame. All
//! schedules are deadlines inside the scene; firing them here keeps the
//! callback model cooperative: nothing runs between the sub-steps of one
//! tick, and dropping the driver's one callback cancels everything.

use chrono::NaiveDateTime;

use super::state::{FlyoverEffect, Scene, SceneEvent, ScheduledEffect};
use crate::consts::*;
use crate::epoch_ms;

/// Advance every due schedule to `now`. Returns events the driver must act
/// on (the scene itself cannot touch the audio element).
pub fn tick(scene: &mut Scene, now: NaiveDateTime) -> Vec<SceneEvent> {
    let now_ms = epoch_ms(now);
    let mut events = Vec::new();

    // Flyover cycle: re-trigger on schedule. After a long stall only the
    // first missed cycle is replayed; its one-shots land below in order, so
    // the flags settle exactly as last-write-wins requires.
    if now_ms >= scene.next_flyover_at {
        let cycle_start = scene.next_flyover_at;
        scene.trigger_flyover(cycle_start);
        while scene.next_flyover_at <= now_ms {
            scene.next_flyover_at += FLYOVER_PERIOD_MS;
        }
    }

    // Drain due one-shots in (due, seq) order
    scene
        .pending_effects
        .sort_by_key(|effect| (effect.due, effect.seq));
    let split = scene
        .pending_effects
        .iter()
        .position(|effect| effect.due > now_ms)
        .unwrap_or(scene.pending_effects.len());
    let due: Vec<ScheduledEffect> = scene.pending_effects.drain(..split).collect();
    for scheduled in due {
        match scheduled.effect {
            FlyoverEffect::ShowGreeting => scene.greeting_visible = true,
            FlyoverEffect::HideGreeting => scene.greeting_visible = false,
            FlyoverEffect::EndFlyover => scene.flyover_active = false,
        }
    }

    // Mascot auto-hide (debounce-by-restart: show_mascot replaces the deadline)
    if let Some(hide_at) = scene.mascot_hide_at {
        if now_ms >= hide_at {
            scene.mascot_visible = false;
            scene.mascot_hide_at = None;
        }
    }

    // Countdown refresh: the recompute is wholesale, so missed periods
    // collapse into one update
    if now_ms >= scene.next_countdown_at {
        scene.countdown.update(now);
        while scene.next_countdown_at <= now_ms {
            scene.next_countdown_at += COUNTDOWN_PERIOD_MS;
        }
    }

    // Game tick + session end
    scene.game.tick_due(now_ms, &mut scene.rng);

    // Delayed joke re-roll
    scene.jokes.tick_due(now_ms, &mut scene.rng);

    // One-time autoplay attempt
    if let Some(due) = scene.autoplay_at {
        if now_ms >= due {
            scene.autoplay_at = None;
            events.push(SceneEvent::TryAutoplay);
        }
    }

    events
}
