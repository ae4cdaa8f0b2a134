//! Cosmetic easter eggs: the identity name click counter and the Konami code.

use std::collections::VecDeque;

/// How long the name shimmers after the third click.
pub const SHIMMER_MS: u64 = 800;
/// How long the grid wobbles after the seventh click.
pub const WOBBLE_MS: u64 = 600;
/// How long the hidden message stays after the tenth click.
pub const FOUND_MS: u64 = 3_000;
/// How long colours stay inverted after the Konami code.
pub const INVERT_MS: u64 = 2_000;
/// How long the Konami toast stays.
pub const TOAST_MS: u64 = 2_500;

/// Text of the Konami toast.
pub const TOAST_TEXT: &str = "nice";

pub const KONAMI: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClickEffect {
    Nothing,
    Shimmer,
    Wobble,
    /// Show "you found me". The counter starts over.
    Found,
}

/// Counts clicks on the identity name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameClicks {
    count: u32,
}

impl NameClicks {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn click(&mut self) -> NameClickEffect {
        self.count += 1;
        match self.count {
            3 => NameClickEffect::Shimmer,
            7 => NameClickEffect::Wobble,
            10 => {
                self.count = 0;
                NameClickEffect::Found
            }
            _ => NameClickEffect::Nothing,
        }
    }
}

/// Watches key presses for the Konami sequence.
#[derive(Debug, Clone, Default)]
pub struct KonamiDetector {
    recent: VecDeque<String>,
}

impl KonamiDetector {
    /// Record a key. Returns `true` when the sequence just completed.
    pub fn push(&mut self, key: &str) -> bool {
        if self.recent.len() == KONAMI.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(key.to_string());

        let matched = self.recent.len() == KONAMI.len()
            && self.recent.iter().zip(KONAMI).all(|(k, expected)| k == expected);
        if matched {
            self.recent.clear();
        }
        matched
    }
}
