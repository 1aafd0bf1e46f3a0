//! Deterministic card scene
//!
//! All card state and state transitions live here. This module must be pure
//! and deterministic:
//! - Time is passed in explicitly (no clock reads)
//! - Seeded RNG only
//! - All timed behavior is a deadline inside the state, fired by `tick`
//! - No rendering or platform dependencies

pub mod countdown;
pub mod decor;
pub mod game;
pub mod jokes;
pub mod state;
pub mod tick;

pub use countdown::{Countdown, CountdownPhase};
pub use decor::{DecorField, FloatingEmoji, Snowflake, Star, TreeLight};
pub use game::{Cookie, CookieGame};
pub use jokes::{JOKES, Joke, JokeRotator};
pub use state::{MusicCommand, Scene, SceneEvent};
pub use tick::tick;
