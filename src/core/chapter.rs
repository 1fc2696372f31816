// Chapter entrance sequencing: a section's title appears centered (intro),
// holds, docks to a corner, then the body reveals. The machine owns only the
// guarded transitions; the caller maps the returned schedule onto whatever
// timer primitive drives it (real timeouts in production, a fake clock in
// tests).

// Intersection ratio of the trigger region that starts a cycle
pub const CHAPTER_START_THRESHOLD: f64 = 0.4;

// Fixed phase delays, measured from the start of the cycle
pub const CHAPTER_INTRO_MS: u32 = 700;
pub const CHAPTER_HOLD_MS: u32 = 400;
pub const CHAPTER_DOCK_MS: u32 = 700;

/// Delay from cycle start until the title docks.
pub const DOCK_AT_MS: u32 = CHAPTER_INTRO_MS + CHAPTER_HOLD_MS;
/// Delay from cycle start until the body reveals.
pub const REVEAL_AT_MS: u32 = CHAPTER_INTRO_MS + CHAPTER_HOLD_MS + CHAPTER_DOCK_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChapterPhase {
    Idle,
    Intro,
    Dock,
    Reveal,
}

/// Timer deadlines the caller must schedule after `begin` returns true.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChapterSchedule {
    pub dock_at_ms: u32,
    pub reveal_at_ms: u32,
}

/// Per-section entrance state machine.
///
/// At most one cycle is active at a time; re-triggering mid-sequence is a
/// no-op, and a full exit from the viewport cancels the cycle from any phase.
#[derive(Clone, Copy, Debug)]
pub struct ChapterMachine {
    phase: ChapterPhase,
    cycle_active: bool,
    pinned: bool,
}

impl Default for ChapterMachine {
    fn default() -> Self {
        Self {
            phase: ChapterPhase::Idle,
            cycle_active: false,
            pinned: false,
        }
    }
}

impl ChapterMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger region crossed `ratio` of visibility. Starts a cycle only from
    /// idle; returns the timer schedule when a new cycle begins.
    pub fn begin(&mut self, ratio: f64) -> Option<ChapterSchedule> {
        if self.cycle_active || ratio < CHAPTER_START_THRESHOLD {
            return None;
        }
        self.cycle_active = true;
        self.phase = ChapterPhase::Intro;
        Some(ChapterSchedule {
            dock_at_ms: DOCK_AT_MS,
            reveal_at_ms: REVEAL_AT_MS,
        })
    }

    /// Scheduled intro -> dock transition.
    pub fn dock(&mut self) {
        if self.cycle_active && self.phase == ChapterPhase::Intro {
            self.phase = ChapterPhase::Dock;
        }
    }

    /// Scheduled dock -> reveal transition.
    pub fn reveal(&mut self) {
        if self.cycle_active && self.phase == ChapterPhase::Dock {
            self.phase = ChapterPhase::Reveal;
        }
    }

    /// The whole section fully left the viewport. Returns true when an active
    /// cycle was cancelled, in which case the caller must clear its timers.
    pub fn reset_on_exit(&mut self) -> bool {
        if !self.cycle_active || self.pinned {
            return false;
        }
        self.cycle_active = false;
        self.phase = ChapterPhase::Idle;
        true
    }

    /// Reduced motion: jump straight to reveal and stay there permanently.
    pub fn skip_to_reveal(&mut self) {
        self.cycle_active = true;
        self.pinned = true;
        self.phase = ChapterPhase::Reveal;
    }

    pub fn phase(&self) -> ChapterPhase {
        self.phase
    }

    /// Title sits in its docked position (dock or reveal).
    pub fn docked(&self) -> bool {
        matches!(self.phase, ChapterPhase::Dock | ChapterPhase::Reveal)
    }

    /// Section body is visible.
    pub fn revealed(&self) -> bool {
        self.phase == ChapterPhase::Reveal
    }
}
