//! Yule Card - an animated Christmas greeting card
//!
//! Core modules:
//! - `scene`: Deterministic card state (decor, countdown, mini-game, jokes)
//! - `audio`: Background music collaborator (browser `<audio>` element)
//!
//! The scene is advanced by a single `tick` driven from the browser's
//! animation-frame loop; all timed behavior is expressed as deadlines inside
//! the scene, so teardown only has to cancel the one driving callback.

pub mod audio;
pub mod scene;

pub use scene::{Scene, SceneEvent, tick};

use chrono::NaiveDateTime;

/// Fixed counts, periods, and offsets for the card
pub mod consts {
    /// Decorative field family sizes
    pub const SNOWFLAKE_COUNT: usize = 50;
    pub const STAR_COUNT: usize = 30;
    pub const TREE_LIGHT_COUNT: usize = 20;
    pub const FLOATING_EMOJI_COUNT: usize = 15;

    /// Sleigh flyover repeats on this schedule
    pub const FLYOVER_PERIOD_MS: i64 = 15_000;
    /// Offsets within one flyover cycle
    pub const FLYOVER_GREETING_SHOW_MS: i64 = 2_000;
    pub const FLYOVER_GREETING_HIDE_MS: i64 = 4_000;
    pub const FLYOVER_END_MS: i64 = 8_000;

    /// Mascot cameo auto-hides after this long (restarted on re-click)
    pub const MASCOT_HIDE_MS: i64 = 3_000;

    /// Countdown refresh period
    pub const COUNTDOWN_PERIOD_MS: i64 = 1_000;

    /// Cookie game tick period
    pub const GAME_TICK_MS: i64 = 100;
    /// One game session lasts this long
    pub const GAME_SESSION_MS: i64 = 20_000;
    /// Live cookie cap
    pub const MAX_LIVE_COOKIES: usize = 10;
    /// Vertical units a cookie falls per tick
    pub const COOKIE_FALL_STEP: f32 = 2.0;
    /// Cookies despawn at/below this vertical position
    pub const FIELD_BOTTOM: f32 = 100.0;
    /// Points per caught cookie
    pub const CATCH_REWARD: u32 = 10;

    /// Punchline hide transition before the next joke is rolled
    pub const JOKE_SWAP_DELAY_MS: i64 = 300;

    /// Music autoplay is attempted this long after init
    pub const AUTOPLAY_DELAY_MS: i64 = 500;

    /// Maximum repetitions of a periodic deadline fired per tick call
    /// (prevents spiral of death after a long frame stall)
    pub const MAX_CATCHUP: u32 = 8;
}

/// Milliseconds since the Unix epoch for a (timezone-less) local instant
#[inline]
pub fn epoch_ms(t: NaiveDateTime) -> i64 {
    t.and_utc().timestamp_millis()
}
