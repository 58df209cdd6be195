//! The hidden Halley's-comet puzzle.
//!
//! Entering the right number unlocks the background music. Attempt counts
//! survive reloads; once solved, a record lands in storage so the page
//! stays unlocked on the next visit.
//!
//! 2071-07-29 is the comet's next perihelion.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::context::{EventBus, PageEvent};
use crate::music::{AudioSink, MusicContext};
use crate::storage::Storage;

pub const CORRECT_ANSWER: &str = "20710729";

const ATTEMPTS_KEY: &str = "halleysCometAttempts";
const SOLVED_KEY: &str = "halleysCometPuzzleSolved";

/// The persisted solved record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolvedRecord {
    solved: bool,
    /// Milliseconds since the epoch.
    solve_time: u64,
    attempts: u32,
}

/// What `solve` reports back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOutcome {
    pub attempts: u32,
    pub solve_secs: u64,
}

/// App-scoped puzzle state.
pub struct PuzzleContext {
    initialized: bool,
    solved: bool,
    attempts: u32,
    started_at: Option<Instant>,
    bus: EventBus,
}

impl PuzzleContext {
    pub fn new(bus: EventBus) -> Self {
        Self {
            initialized: false,
            solved: false,
            attempts: 0,
            started_at: None,
            bus,
        }
    }

    /// Arms the puzzle and restores the persisted attempt count.
    pub fn init(&mut self, storage: &dyn Storage) {
        self.initialized = true;
        self.started_at = Some(Instant::now());
        self.attempts = storage
            .get(ATTEMPTS_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        self.solved = false;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Checks a submission. Every call counts as an attempt and persists
    /// the new count.
    pub fn check_answer(&mut self, input: &str, storage: &mut dyn Storage) -> bool {
        if !self.initialized {
            log::warn!("puzzle checked before init");
            return false;
        }

        self.attempts += 1;
        storage.set(ATTEMPTS_KEY, &self.attempts.to_string());
        input == CORRECT_ANSWER
    }

    /// Marks the puzzle solved: starts the music, persists the solved
    /// record, clears the attempt counter, and notifies the page.
    /// Idempotent; only the first call does anything.
    pub fn solve(
        &mut self,
        storage: &mut dyn Storage,
        music: &mut MusicContext,
        sink: &mut dyn AudioSink,
    ) -> Option<SolveOutcome> {
        if self.solved {
            return None;
        }
        self.solved = true;

        let solve_secs = self
            .started_at
            .map(|start| start.elapsed().as_secs_f64().round() as u64)
            .unwrap_or(0);

        music.play(sink);

        let record = SolvedRecord {
            solved: true,
            solve_time: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            attempts: self.attempts,
        };
        match serde_json::to_string(&record) {
            Ok(json) => storage.set(SOLVED_KEY, &json),
            Err(err) => log::error!("failed to serialize solved record: {err}"),
        }
        storage.remove(ATTEMPTS_KEY);

        self.bus.emit(PageEvent::PuzzleSolved {
            attempts: self.attempts,
            solve_secs,
        });

        Some(SolveOutcome {
            attempts: self.attempts,
            solve_secs,
        })
    }

    /// Whether the puzzle has been solved, in this session or a previous
    /// one. A hit from storage is cached in memory.
    pub fn is_solved(&mut self, storage: &dyn Storage) -> bool {
        if self.solved {
            return true;
        }

        let Some(raw) = storage.get(SOLVED_KEY) else {
            return false;
        };
        match serde_json::from_str::<SolvedRecord>(&raw) {
            Ok(record) if record.solved => {
                self.solved = true;
                true
            }
            Ok(_) => false,
            Err(err) => {
                log::warn!("unreadable puzzle record: {err}");
                false
            }
        }
    }

    /// Clears all puzzle state, persisted included.
    pub fn reset(&mut self, storage: &mut dyn Storage) {
        self.initialized = false;
        self.solved = false;
        self.attempts = 0;
        self.started_at = None;
        storage.remove(SOLVED_KEY);
        storage.remove(ATTEMPTS_KEY);
    }
}

/// Picks the hint for the given attempt count; later attempts walk toward
/// the last, most explicit hint.
pub fn hint<'a>(hints: &'a [&'a str], attempt_count: u32) -> Option<&'a str> {
    if hints.is_empty() {
        return None;
    }
    let index = (attempt_count as usize).min(hints.len() - 1);
    Some(hints[index])
}
