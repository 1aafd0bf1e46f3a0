//! Christmas joke rotator
//!
//! A fixed catalog, a current pick, and a punchline reveal flag. Hiding the
//! punchline re-rolls the joke after a short delay so the hide transition
//! can finish on screen first.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::JOKE_SWAP_DELAY_MS;

/// A setup/punchline pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Joke {
    pub setup: &'static str,
    pub punchline: &'static str,
}

/// The fixed joke catalog
pub const JOKES: [Joke; 10] = [
    Joke {
        setup: "What do you call an obnoxious reindeer?",
        punchline: "Rude-olph!",
    },
    Joke {
        setup: "Why was the snowman looking through carrots?",
        punchline: "He was picking his nose!",
    },
    Joke {
        setup: "What do elves learn in school?",
        punchline: "The elf-abet!",
    },
    Joke {
        setup: "What's every parent's favorite Christmas carol?",
        punchline: "Silent Night!",
    },
    Joke {
        setup: "Why did the Christmas tree go to the barber?",
        punchline: "It needed to be trimmed!",
    },
    Joke {
        setup: "What do you get when you cross a snowman with a vampire?",
        punchline: "Frostbite!",
    },
    Joke {
        setup: "Why does Santa go down chimneys?",
        punchline: "Because it soots him!",
    },
    Joke {
        setup: "What do snowmen eat for breakfast?",
        punchline: "Frosted Flakes!",
    },
    Joke {
        setup: "What's Santa's favorite candy?",
        punchline: "Jolly Ranchers!",
    },
    Joke {
        setup: "Why is Christmas just like a day at the office?",
        punchline: "You do all the work and the fat guy in the suit gets all the credit!",
    },
];

fn random_joke(rng: &mut Pcg32) -> Joke {
    JOKES[rng.random_range(0..JOKES.len())]
}

/// Joke viewer state
#[derive(Debug, Clone, Serialize)]
pub struct JokeRotator {
    pub current: Joke,
    pub punchline_shown: bool,
    #[serde(skip)]
    swap_at: Option<i64>,
}

impl JokeRotator {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            current: random_joke(rng),
            punchline_shown: false,
            swap_at: None,
        }
    }

    /// The single user action: reveal the punchline, or hide it and queue a
    /// fresh pick (which may repeat the current joke).
    pub fn toggle(&mut self, now_ms: i64) {
        if self.punchline_shown {
            self.punchline_shown = false;
            self.swap_at = Some(now_ms + JOKE_SWAP_DELAY_MS);
        } else {
            self.punchline_shown = true;
        }
    }

    /// Fire the delayed re-roll if due
    pub fn tick_due(&mut self, now_ms: i64, rng: &mut Pcg32) {
        if let Some(due) = self.swap_at {
            if now_ms >= due {
                self.current = random_joke(rng);
                self.swap_at = None;
            }
        }
    }
}
