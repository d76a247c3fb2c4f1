//! # Reveal Animations
//!
//! Stat counters that count up and skill bars that fill in, played the first
//! time their section scrolls into view. Both run as repeating tasks on the
//! virtual-time `Scheduler`, so jumping the clock plays them to the end.
//!
//! ```text
//! start_counters(now) ──► every 33ms: frame 1..=60 ──► "50+"      (task cancelled)
//! start_bars(now)     ──► bar 0 now, every 100ms the next bar      (task cancelled)
//! ```
//!
//! Content marks them with fenced blocks:
//!
//! ````text
//! ```stats              ```skills
//! 20 Projects shipped   Rust 85%
//! ```                   ```
//! ````

use log::{debug, warn};

use crate::core::content::Document;
use crate::core::schedule::{Millis, Scheduler, TaskId};

/// Time for a counter to reach its target.
pub const COUNTER_DURATION_MS: Millis = 2000;
pub const COUNTER_FRAMES: u32 = 60;
/// Delay between two skill bars filling.
pub const BAR_STAGGER_MS: Millis = 100;

/// A number the page counts up to, such as "20 Projects shipped".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: String,
    pub target: u32,
}

impl Stat {
    /// `"20 Projects shipped"` or `"20+ Projects shipped"`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (number, label) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let target = number.trim_end_matches('+').parse().ok()?;
        Some(Self {
            label: label.trim().to_string(),
            target,
        })
    }
}

/// A skill with a fill level in percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLevel {
    pub label: String,
    pub percent: u8,
}

impl SkillLevel {
    /// `"Rust 85%"`. Levels above 100 are rejected.
    pub fn parse(line: &str) -> Option<Self> {
        let (label, level) = line.trim().rsplit_once(char::is_whitespace)?;
        let percent: u8 = level.trim_end_matches('%').parse().ok()?;
        (percent <= 100 && !label.trim().is_empty()).then(|| Self {
            label: label.trim().to_string(),
            percent,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealStep {
    CountFrame,
    FillBar,
}

/// Counter and skill-bar progress for the page.
#[derive(Debug, Clone, Default)]
pub struct Reveal {
    counters_in: Option<String>,
    stats: Vec<Stat>,
    bars_in: Option<String>,
    skills: Vec<SkillLevel>,
    /// Counter frames played, up to `COUNTER_FRAMES`.
    frame: u32,
    /// Bars filled so far, in order.
    filled: usize,
    counter_task: Option<TaskId>,
    bar_task: Option<TaskId>,
    timers: Scheduler<RevealStep>,
}

impl Reveal {
    /// Takes the first section with stats and the first with skill levels.
    pub fn from_document(document: &Document) -> Self {
        let mut reveal = Self::default();
        for section in &document.sections {
            if !section.stats.is_empty() {
                if reveal.counters_in.is_none() {
                    reveal.counters_in = Some(section.id.clone());
                    reveal.stats = section.stats.clone();
                } else {
                    warn!("Stats in '{}' ignored: only one stats block animates", section.id);
                }
            }
            if !section.skills.is_empty() {
                if reveal.bars_in.is_none() {
                    reveal.bars_in = Some(section.id.clone());
                    reveal.skills = section.skills.clone();
                } else {
                    warn!("Skills in '{}' ignored: only one skills block animates", section.id);
                }
            }
        }
        reveal
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.skills.is_empty()
    }

    /// Section whose entry into view starts the counters.
    pub fn counters_section(&self) -> Option<&str> {
        self.counters_in.as_deref()
    }

    /// Section whose entry into view starts the skill bars.
    pub fn bars_section(&self) -> Option<&str> {
        self.bars_in.as_deref()
    }

    pub fn start_counters(&mut self, now: Millis) {
        if self.stats.is_empty() || self.frame > 0 || self.pending(self.counter_task) {
            return;
        }
        let period = COUNTER_DURATION_MS / Millis::from(COUNTER_FRAMES);
        self.counter_task = Some(self.timers.every(now, period, RevealStep::CountFrame));
        debug!("Counting up {} stats", self.stats.len());
    }

    /// The first bar fills at once, the rest follow one per stagger.
    pub fn start_bars(&mut self, now: Millis) {
        if self.skills.is_empty() || self.filled > 0 {
            return;
        }
        self.filled = 1;
        if self.skills.len() > 1 {
            self.bar_task = Some(self.timers.every(now, BAR_STAGGER_MS, RevealStep::FillBar));
        }
        debug!("Filling {} skill bars", self.skills.len());
    }

    /// Play every step due at `now`. Finished tasks are cancelled.
    pub fn advance(&mut self, now: Millis) {
        for (_, step) in self.timers.advance(now) {
            match step {
                RevealStep::CountFrame => {
                    self.frame = (self.frame + 1).min(COUNTER_FRAMES);
                    if self.frame == COUNTER_FRAMES
                        && let Some(task) = self.counter_task.take()
                    {
                        self.timers.cancel(task);
                    }
                }
                RevealStep::FillBar => {
                    self.filled = (self.filled + 1).min(self.skills.len());
                    if self.filled == self.skills.len()
                        && let Some(task) = self.bar_task.take()
                    {
                        self.timers.cancel(task);
                    }
                }
            }
        }
    }

    fn pending(&self, task: Option<TaskId>) -> bool {
        task.is_some_and(|task| self.timers.is_pending(task))
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Each stat with its current text: the running count, then `"20+"`.
    pub fn counters(&self) -> impl Iterator<Item = (&Stat, String)> + '_ {
        self.stats.iter().map(|stat| {
            let text = if self.frame >= COUNTER_FRAMES {
                format!("{}+", stat.target)
            } else {
                let value = u64::from(stat.target) * u64::from(self.frame) / u64::from(COUNTER_FRAMES);
                value.to_string()
            };
            (stat, text)
        })
    }

    /// Each skill with the level currently shown: its own once filled, else 0.
    pub fn bars(&self) -> impl Iterator<Item = (&SkillLevel, u8)> + '_ {
        self.skills
            .iter()
            .enumerate()
            .map(|(i, skill)| (skill, if i < self.filled { skill.percent } else { 0 }))
    }
}
