//! Drifting-gradient nebula backdrop shared by both visual modes.
//!
//! The field owns a fixed-size pool of soft colour blobs that drift down-left
//! across the hero area. A particle that expires or leaves the generous
//! off-screen bounds is rebuilt in place, so the pool never shrinks and the
//! renderer never observes an expired slot.

use crate::rng::GeometryRng;
use crate::viewport::ViewportState;

/// Base colour of a nebula blob; `a` is the peak alpha of its gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Warm/cool palette the pool draws from.
pub const NEBULA_PALETTE: [NebulaColor; 5] = [
    NebulaColor { r: 180, g: 60, b: 40, a: 0.35 },
    NebulaColor { r: 220, g: 100, b: 50, a: 0.28 },
    NebulaColor { r: 140, g: 40, b: 60, a: 0.23 },
    NebulaColor { r: 80, g: 140, b: 160, a: 0.19 },
    NebulaColor { r: 200, g: 150, b: 80, a: 0.23 },
];

#[derive(Clone, Copy, Debug)]
pub struct NebulaParticle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Frames lived so far.
    pub life: f64,
    pub max_life: f64,
    pub color: NebulaColor,
    pub size: f64,
}

impl NebulaParticle {
    /// Fresh particle just off the top-right corner, heading down-left.
    fn spawn(viewport: &ViewportState, rng: &mut GeometryRng) -> Self {
        let angle = rng.unit() * std::f64::consts::PI * 0.5 + std::f64::consts::PI;
        let speed = rng.jitter(0.15, 0.4);
        Self {
            x: viewport.width + rng.unit() * 200.0,
            y: -rng.unit() * 200.0,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life: 0.0,
            max_life: rng.jitter(200.0, 400.0),
            color: NEBULA_PALETTE[rng.below(NEBULA_PALETTE.len())],
            size: rng.jitter(50.0, 150.0),
        }
    }

    /// Life-cycle envelope: quick fade-in over the first 20% of life, then a
    /// quadratic fade-out that reaches zero exactly at `max_life`.
    pub fn alpha(&self, pulse: f64) -> f64 {
        let ratio = self.life / self.max_life;
        let fade_in = (ratio * 5.0).min(1.0);
        let fade_out = 1.0 - ratio * ratio;
        fade_in * fade_out * self.color.a * pulse
    }
}

/// Pulse scalars shared with the mode-specific layers so their echo glows
/// breathe in the same rhythm as the hero gradients.
#[derive(Clone, Copy, Debug)]
pub struct GlowState {
    pub fast: f64,
    pub slow: f64,
}

pub struct NebulaField {
    particles: Vec<NebulaParticle>,
    time_ms: f64,
}

impl NebulaField {
    /// The field keeps its own frame-counted clock, 16 ms per advance.
    pub const FRAME_STEP_MS: f64 = 16.0;

    pub fn pool_size(constrained: bool) -> usize {
        if constrained {
            30
        } else {
            60
        }
    }

    pub fn new(viewport: &ViewportState, constrained: bool, rng: &mut GeometryRng) -> Self {
        // Scatter the initial fill across the hero area with randomised
        // elapsed life, so the first frames are not a synchronized cohort of
        // newborn particles fading in together.
        let particles = (0..Self::pool_size(constrained))
            .map(|_| {
                let mut p = NebulaParticle::spawn(viewport, rng);
                p.x = viewport.width * 0.5 + rng.unit() * viewport.width * 0.6;
                p.y = rng.unit() * viewport.hero_height * 0.6;
                p.life = rng.unit() * p.max_life;
                p
            })
            .collect();
        Self {
            particles,
            time_ms: 0.0,
        }
    }

    /// Advance every particle by one frame, recycling expired or departed
    /// ones in place, and return the pulse scalars for this frame.
    pub fn advance(&mut self, viewport: &ViewportState, rng: &mut GeometryRng) -> GlowState {
        let t = self.time_ms;
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.x += p.vx + (t * 0.0025 + i as f64).sin() * 0.1;
            p.y += p.vy + (t * 0.002 + i as f64).cos() * 0.08;
            p.life += 1.0;

            let gone = p.x < -p.size || p.y > viewport.hero_height + p.size;
            if p.life > p.max_life || gone {
                *p = NebulaParticle::spawn(viewport, rng);
            }
        }
        let glow = self.pulses();
        self.time_ms = t + Self::FRAME_STEP_MS;
        glow
    }

    /// Pulse scalars at the current field time.
    pub fn pulses(&self) -> GlowState {
        GlowState {
            fast: (self.time_ms * 0.00065).sin() * 0.03 + 0.97,
            slow: (self.time_ms * 0.00035).sin() * 0.02 + 0.98,
        }
    }

    pub fn particles(&self) -> &[NebulaParticle] {
        &self.particles
    }

    /// Field time of the frame most recently produced by [`advance`].
    ///
    /// [`advance`]: NebulaField::advance
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }
}
