//! Frame pacing and lifecycle, kept free of browser types so the transitions
//! are testable on the host. The wasm glue feeds in animation-frame
//! timestamps and visibility flips; this module only decides what to do.

/// Minimum interval between accepted frames when the cap is active (~30 fps).
pub const FRAME_CAP_INTERVAL_MS: f64 = 33.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not animating. Terminal when motion reduction is on.
    Idle,
    Running,
    /// Tab hidden; the pending frame request has been cancelled.
    Paused,
}

/// What the glue should do at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartPlan {
    /// Motion reduction: render exactly one frame and never request another.
    StaticFrame,
    /// Begin the animation-frame loop.
    Animate,
}

/// Verdict for one arriving animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAction {
    Draw,
    /// Dropped by the rate cap (or arrived while not running); the caller
    /// still requests the next frame.
    Skip,
}

pub struct AnimationScheduler {
    phase: Phase,
    capped: bool,
    last_drawn: f64,
}

impl AnimationScheduler {
    pub fn new(capped: bool) -> Self {
        Self {
            phase: Phase::Idle,
            capped,
            last_drawn: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn start(&mut self, reduced_motion: bool) -> StartPlan {
        if reduced_motion {
            StartPlan::StaticFrame
        } else {
            self.phase = Phase::Running;
            StartPlan::Animate
        }
    }

    /// Called with the timestamp of each arriving animation frame. The cap
    /// drops frames, never requests: a `Skip` still re-arms the loop.
    pub fn on_frame(&mut self, now: f64) -> FrameAction {
        if self.phase != Phase::Running {
            return FrameAction::Skip;
        }
        if self.capped && now - self.last_drawn < FRAME_CAP_INTERVAL_MS {
            return FrameAction::Skip;
        }
        self.last_drawn = now;
        FrameAction::Draw
    }

    /// Tab went hidden. Returns true when the caller must cancel the pending
    /// frame request.
    pub fn on_hidden(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            true
        } else {
            false
        }
    }

    /// Tab became visible. Returns true when the caller must issue exactly
    /// one new frame request.
    pub fn on_visible(&mut self) -> bool {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
            true
        } else {
            false
        }
    }
}

/// Trailing-edge debounce for layout changes. Each event moves the deadline;
/// a timer that fires before the deadline is stale and does nothing, so any
/// burst of events collapses into a single regeneration.
pub struct Debounce {
    quiet_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            deadline: None,
        }
    }

    /// A layout event happened at `now`.
    pub fn note(&mut self, now: f64) {
        self.deadline = Some(now + self.quiet_ms);
    }

    /// A timer fired at `now`. True exactly once per quiet period.
    pub fn fire(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
