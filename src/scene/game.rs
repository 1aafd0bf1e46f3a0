//! Catch-the-cookie mini-game
//!
//! One bounded session at a time: idle -> active -> idle. While active, a
//! 100 ms tick spawns, advances, and despawns falling cookies; the session
//! ends on a single 20 s deadline. Score survives until the next start.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;

/// A falling cookie
#[derive(Debug, Clone, Serialize)]
pub struct Cookie {
    pub id: u32,
    /// Horizontal position, percent of field width (fixed at spawn)
    pub left: f32,
    /// Vertical position, 0 at the top of the field
    pub top: f32,
}

/// Mini-game session state
#[derive(Debug, Clone, Serialize)]
pub struct CookieGame {
    pub active: bool,
    pub score: u32,
    pub cookies: Vec<Cookie>,
    /// Monotonic across sessions so stale catches can never alias
    next_id: u32,
    #[serde(skip)]
    next_tick_at: Option<i64>,
    #[serde(skip)]
    session_end_at: Option<i64>,
}

impl Default for CookieGame {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieGame {
    pub fn new() -> Self {
        Self {
            active: false,
            score: 0,
            cookies: Vec::new(),
            next_id: 0,
            next_tick_at: None,
            session_end_at: None,
        }
    }

    /// Begin a session. Starting while active is a no-op; returns whether a
    /// new session actually began.
    pub fn start(&mut self, now_ms: i64) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.score = 0;
        self.cookies.clear();
        self.next_tick_at = Some(now_ms + GAME_TICK_MS);
        self.session_end_at = Some(now_ms + GAME_SESSION_MS);
        true
    }

    /// One game tick: spawn (against the pre-tick population), advance the
    /// previously live cookies, despawn anything past the field bottom.
    pub fn step(&mut self, rng: &mut Pcg32) {
        let spawned = if self.cookies.len() < MAX_LIVE_COOKIES {
            let id = self.next_id;
            self.next_id += 1;
            Some(Cookie {
                id,
                left: rng.random_range(0.0..90.0),
                top: 0.0,
            })
        } else {
            None
        };

        for cookie in &mut self.cookies {
            cookie.top += COOKIE_FALL_STEP;
        }
        self.cookies.retain(|c| c.top < FIELD_BOTTOM);

        if let Some(cookie) = spawned {
            self.cookies.push(cookie);
        }
    }

    /// Catch a cookie by id. A stale id (already despawned) is a silent
    /// no-op; returns whether anything was caught.
    pub fn catch(&mut self, id: u32) -> bool {
        let before = self.cookies.len();
        self.cookies.retain(|c| c.id != id);
        if self.cookies.len() < before {
            self.score += CATCH_REWARD;
            true
        } else {
            false
        }
    }

    /// End the session: deactivate, disarm the tick, clear the field.
    /// Score is left in place for display.
    pub fn finish(&mut self) {
        self.active = false;
        self.cookies.clear();
        self.next_tick_at = None;
        self.session_end_at = None;
    }

    /// Fire the 100 ms tick if due; bounded catch-up after a frame stall
    pub fn tick_due(&mut self, now_ms: i64, rng: &mut Pcg32) {
        let mut fired = 0;
        while let Some(due) = self.next_tick_at {
            if now_ms < due || fired >= MAX_CATCHUP {
                break;
            }
            self.step(rng);
            self.next_tick_at = Some(due + GAME_TICK_MS);
            fired += 1;
        }
        // Drop ticks we are never going to replay
        if fired >= MAX_CATCHUP {
            if let Some(due) = self.next_tick_at {
                if now_ms >= due {
                    self.next_tick_at = Some(now_ms + GAME_TICK_MS);
                }
            }
        }

        if let Some(end) = self.session_end_at {
            if now_ms >= end {
                self.finish();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1234)
    }

    #[test]
    fn test_start_while_active_is_noop() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        assert!(game.start(0));
        game.step(&mut rng);
        let caught = game.cookies[0].id;
        assert!(game.catch(caught));
        assert_eq!(game.score, CATCH_REWARD);

        // Re-start must not reset anything
        assert!(!game.start(5_000));
        assert_eq!(game.score, CATCH_REWARD);
        assert!(game.active);
    }

    #[test]
    fn test_first_tick_spawns_at_top() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        game.step(&mut rng);
        assert_eq!(game.cookies.len(), 1);
        assert_eq!(game.cookies[0].top, 0.0);
        assert!((0.0..90.0).contains(&game.cookies[0].left));
    }

    #[test]
    fn test_cookie_falls_two_units_per_tick() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        game.step(&mut rng);
        let id = game.cookies[0].id;

        for n in 1..=10 {
            game.step(&mut rng);
            let cookie = game.cookies.iter().find(|c| c.id == id).unwrap();
            assert_eq!(cookie.top, COOKIE_FALL_STEP * n as f32);
        }
    }

    #[test]
    fn test_cookie_despawns_at_field_bottom() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        game.step(&mut rng);
        let id = game.cookies[0].id;

        // 49 more ticks: top = 98, still live
        for _ in 0..49 {
            game.step(&mut rng);
        }
        assert!(game.cookies.iter().any(|c| c.id == id));

        // 50th tick: top reaches 100 and the cookie is gone
        game.step(&mut rng);
        assert!(!game.cookies.iter().any(|c| c.id == id));
    }

    #[test]
    fn test_live_count_never_exceeds_cap() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        for _ in 0..120 {
            game.step(&mut rng);
            assert!(game.cookies.len() <= MAX_LIVE_COOKIES);
        }
        assert!(!game.cookies.is_empty());
    }

    #[test]
    fn test_catch_rewards_and_removes() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        game.step(&mut rng);
        game.step(&mut rng);
        let id = game.cookies[0].id;
        let live_before = game.cookies.len();

        assert!(game.catch(id));
        assert_eq!(game.score, CATCH_REWARD);
        assert_eq!(game.cookies.len(), live_before - 1);

        // Same id again: silent no-op
        assert!(!game.catch(id));
        assert_eq!(game.score, CATCH_REWARD);
    }

    #[test]
    fn test_catch_unknown_id_is_noop() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        game.step(&mut rng);
        assert!(!game.catch(9999));
        assert_eq!(game.score, 0);
        assert_eq!(game.cookies.len(), 1);
    }

    #[test]
    fn test_session_ends_on_deadline() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        game.tick_due(GAME_TICK_MS, &mut rng);
        let id = game.cookies[0].id;
        game.catch(id);

        game.tick_due(GAME_SESSION_MS, &mut rng);
        assert!(!game.active);
        assert!(game.cookies.is_empty());
        // Final score is retained for display
        assert_eq!(game.score, CATCH_REWARD);
    }

    #[test]
    fn test_ids_stay_monotonic_across_sessions() {
        let mut game = CookieGame::new();
        let mut rng = rng();
        game.start(0);
        game.step(&mut rng);
        let first = game.cookies[0].id;
        game.finish();

        game.start(30_000);
        game.step(&mut rng);
        assert!(game.cookies[0].id > first);
    }
}
