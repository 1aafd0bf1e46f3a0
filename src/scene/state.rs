//! Root scene state
//!
//! Everything the render surface may read and every action it may invoke.
//! One `Scene` per mounted view, owned by the driver; there is no global.
//! All randomness flows through the scene's seeded RNG so a fixed seed
//! reproduces the whole session.

use chrono::{Datelike, NaiveDateTime};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::countdown::Countdown;
use super::decor::DecorField;
use super::game::CookieGame;
use super::jokes::JokeRotator;
use crate::consts::*;
use crate::epoch_ms;

/// The card's title, rendered one letter at a time
pub const GREETING_TITLE: &str = "Merry Christmas!";

/// Messages shown while the reindeer's nose glows
pub const GLOW_MESSAGES: [&str; 5] = [
    "Wow, so bright! I can lead Santa's sleigh now!",
    "Ho ho ho! Rudolph is ready for Christmas Eve!",
    "Even Comet and Cupid are jealous of this glow!",
    "Santa says I'm the brightest reindeer in the North Pole!",
    "Red nose power activated! Let's go!",
];

/// Delayed sub-effects of one flyover cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyoverEffect {
    ShowGreeting,
    HideGreeting,
    EndFlyover,
}

/// A pending one-shot, keyed to its cycle start. Never cancelled by a
/// re-trigger: effects are idempotent flag writes, fired in (due, seq)
/// order, so overlapping cycles settle last-write-wins.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEffect {
    pub due: i64,
    pub seq: u64,
    pub effect: FlyoverEffect,
}

/// What the driver should do with the music element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
}

/// Events surfaced by `tick` for the driver to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The post-init autoplay delay elapsed; attempt playback now
    TryAutoplay,
}

/// Complete card state
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    /// Session seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,

    pub decor: DecorField,
    pub countdown: Countdown,
    pub game: CookieGame,
    pub jokes: JokeRotator,

    // Session flags, each independent
    pub lights_on: bool,
    pub mascot_visible: bool,
    pub flyover_active: bool,
    pub greeting_visible: bool,
    pub card_flipped: bool,
    pub glow_active: bool,
    pub glow_message: &'static str,
    pub music_playing: bool,

    pub current_year: i32,

    // Schedule (epoch ms deadlines)
    #[serde(skip)]
    pub(crate) next_countdown_at: i64,
    #[serde(skip)]
    pub(crate) next_flyover_at: i64,
    #[serde(skip)]
    pub(crate) pending_effects: Vec<ScheduledEffect>,
    #[serde(skip)]
    pub(crate) mascot_hide_at: Option<i64>,
    #[serde(skip)]
    pub(crate) autoplay_at: Option<i64>,
    #[serde(skip)]
    next_effect_seq: u64,
}

impl Scene {
    /// Build a fresh scene: generate the decorative field, compute the
    /// initial countdown, run the first flyover cycle, and arm every
    /// schedule.
    pub fn new(seed: u64, now: NaiveDateTime) -> Self {
        let now_ms = epoch_ms(now);
        let mut rng = Pcg32::seed_from_u64(seed);
        let decor = DecorField::generate(&mut rng);
        let jokes = JokeRotator::new(&mut rng);

        let mut scene = Self {
            seed,
            rng,
            decor,
            countdown: Countdown::new(now),
            game: CookieGame::new(),
            jokes,
            lights_on: true,
            mascot_visible: false,
            flyover_active: false,
            greeting_visible: false,
            card_flipped: false,
            glow_active: false,
            glow_message: "",
            music_playing: true,
            current_year: now.year(),
            next_countdown_at: now_ms + COUNTDOWN_PERIOD_MS,
            next_flyover_at: now_ms + FLYOVER_PERIOD_MS,
            pending_effects: Vec::new(),
            mascot_hide_at: None,
            autoplay_at: Some(now_ms + AUTOPLAY_DELAY_MS),
            next_effect_seq: 0,
        };
        scene.trigger_flyover(now_ms);
        scene
    }

    /// Start one flyover cycle: active now, greeting shown and hidden and
    /// the cycle ended by one-shots relative to `cycle_start_ms`.
    pub fn trigger_flyover(&mut self, cycle_start_ms: i64) {
        self.flyover_active = true;
        for (offset, effect) in [
            (FLYOVER_GREETING_SHOW_MS, FlyoverEffect::ShowGreeting),
            (FLYOVER_GREETING_HIDE_MS, FlyoverEffect::HideGreeting),
            (FLYOVER_END_MS, FlyoverEffect::EndFlyover),
        ] {
            let seq = self.next_effect_seq;
            self.next_effect_seq += 1;
            self.pending_effects.push(ScheduledEffect {
                due: cycle_start_ms + offset,
                seq,
                effect,
            });
        }
    }

    // === User actions (render surface entry points) ===

    /// Flip the ambient tree lights
    pub fn toggle_lights(&mut self) {
        self.lights_on = !self.lights_on;
    }

    /// Show the mascot cameo; a repeat visit restarts the hide deadline
    pub fn show_mascot(&mut self, now_ms: i64) {
        self.mascot_visible = true;
        self.mascot_hide_at = Some(now_ms + MASCOT_HIDE_MS);
    }

    /// The tree click: toggles the lights and triggers the mascot cameo
    pub fn tree_clicked(&mut self, now_ms: i64) {
        self.toggle_lights();
        self.show_mascot(now_ms);
    }

    pub fn flip_card(&mut self) {
        self.card_flipped = !self.card_flipped;
    }

    /// Reveal the punchline, or hide it and queue the next joke
    pub fn tell_joke(&mut self, now_ms: i64) {
        self.jokes.toggle(now_ms);
    }

    /// Toggle the reindeer glow; turning it on picks a fresh message
    pub fn toggle_glow(&mut self) {
        self.glow_active = !self.glow_active;
        if self.glow_active {
            self.glow_message = GLOW_MESSAGES[self.rng.random_range(0..GLOW_MESSAGES.len())];
        }
    }

    /// Start a cookie game session (no-op while one is running)
    pub fn start_game(&mut self, now_ms: i64) -> bool {
        let started = self.game.start(now_ms);
        if started {
            log::info!("cookie game started");
        }
        started
    }

    /// Catch a cookie; stale ids are silently ignored
    pub fn catch_cookie(&mut self, id: u32) -> bool {
        self.game.catch(id)
    }

    /// Flip the music flag; the returned command tells the driver what to
    /// do with the audio element.
    pub fn toggle_music(&mut self) -> MusicCommand {
        self.music_playing = !self.music_playing;
        if self.music_playing {
            MusicCommand::Play
        } else {
            MusicCommand::Pause
        }
    }

    /// Playback was refused by the host (autoplay policy); reflect reality
    pub fn music_refused(&mut self) {
        self.music_playing = false;
        log::warn!("music playback refused; waiting for a user gesture");
    }

    /// Read-only JSON snapshot of the whole scene for the render surface
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
