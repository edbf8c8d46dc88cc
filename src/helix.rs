//! Double-helix geometry: two phase-shifted sine strands, cross rungs, and
//! particles drifting along the strands.

use std::f64::consts::{PI, TAU};

use crate::rng::GeometryRng;
use crate::viewport::ViewportState;

/// Vertical period of the helix in logical pixels.
pub const PERIOD: f64 = 350.0;
pub const FREQUENCY: f64 = TAU / PERIOD;

/// Nothing is drawn above this offset...
pub const START_Y: f64 = 280.0;
/// ...and opacity ramps in linearly over this band just below it.
pub const FADE_BAND: f64 = 200.0;

pub const RUNG_SPACING: f64 = 45.0;
/// Rungs stop this far above the bottom of the content.
pub const BOTTOM_MARGIN: f64 = 100.0;

/// One of the two strands; they sit π apart, on opposite sides of center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Warm,
    Cool,
}

impl Strand {
    pub const BOTH: [Strand; 2] = [Strand::Warm, Strand::Cool];

    pub fn phase(self) -> f64 {
        match self {
            Strand::Warm => 0.0,
            Strand::Cool => PI,
        }
    }
}

/// Particle floating along one strand.
#[derive(Clone, Copy, Debug)]
pub struct DnaParticle {
    /// Phase along the helix, also used to decorrelate its oscillations.
    pub angle: f64,
    /// Base vertical position.
    pub y: f64,
    pub speed: f64,
    pub strand: Strand,
    pub size: f64,
    pub brightness: f64,
}

/// Sine of the strand's phase at `(y, time)`; the pure oscillation with the
/// amplitude factored out. Periodic in `y` with period [`PERIOD`].
pub fn phase_wave(y: f64, time_ms: f64, strand: Strand) -> f64 {
    (y * FREQUENCY + strand.phase() + time_ms * 0.00015).sin()
}

/// Lateral amplitude: widens with depth down the page and breathes slowly
/// over time.
pub fn amplitude(y: f64, time_ms: f64, width: f64, content_height: f64) -> f64 {
    let breathe = (time_ms * 0.0004).sin() * 0.05 + 1.0;
    let y_factor = y / content_height;
    width * 0.08 * (0.8 + y_factor * 0.4) * breathe
}

/// Horizontal position of a strand at vertical position `y`.
pub fn helix_x(y: f64, time_ms: f64, strand: Strand, width: f64, content_height: f64) -> f64 {
    width * 0.5 + phase_wave(y, time_ms, strand) * amplitude(y, time_ms, width, content_height)
}

/// Linear entry fade just below [`START_Y`], clamped to `[0, 1]`.
pub fn fade_in(y: f64) -> f64 {
    ((y - START_Y) / FADE_BAND).clamp(0.0, 1.0)
}

/// Rung opacity: strongest when the helix phase is at its extreme, i.e. the
/// rung faces the viewer, dimmest edge-on.
pub fn rung_alpha(y: f64, time_ms: f64) -> f64 {
    let facing = (y * FREQUENCY + time_ms * 0.00015).cos().abs();
    fade_in(y) * 0.06 * (0.3 + facing * 0.7)
}

/// Every third rung row carries the warm tint.
pub fn rung_is_warm(y: f64) -> bool {
    (y / RUNG_SPACING).floor() as i64 % 3 == 0
}

/// Particle count scales with content height, one per 8 px.
pub fn particle_budget(content_height: f64, constrained: bool) -> usize {
    let mut count = (content_height / 8.0).floor() as usize;
    if constrained {
        count /= 2;
    }
    count
}

pub fn generate(
    viewport: &ViewportState,
    constrained: bool,
    rng: &mut GeometryRng,
) -> Vec<DnaParticle> {
    let h = viewport.content_height;
    let count = particle_budget(h, constrained);
    (0..count)
        .map(|i| {
            let frac = i as f64 / count as f64;
            DnaParticle {
                // ~20 windings over the full height, with a little scatter.
                angle: frac * TAU * 20.0 + rng.unit() * 0.3,
                y: frac * h,
                speed: rng.jitter(0.3, 0.4),
                strand: if rng.unit() > 0.5 {
                    Strand::Warm
                } else {
                    Strand::Cool
                },
                size: rng.jitter(0.8, 1.2),
                brightness: rng.jitter(0.3, 0.5),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn phase_wave_is_periodic_in_y() {
        for strand in Strand::BOTH {
            for step in 0..50 {
                let y = step as f64 * 41.0;
                let t = step as f64 * 173.0;
                let a = phase_wave(y, t, strand);
                let b = phase_wave(y + PERIOD, t, strand);
                assert!((a - b).abs() < EPS, "strand {strand:?} y={y} t={t}");
            }
        }
    }

    #[test]
    fn strands_are_half_a_period_out_of_phase() {
        for step in 0..100 {
            let y = step as f64 * 17.3;
            let t = step as f64 * 91.0;
            let warm = phase_wave(y, t, Strand::Warm);
            let cool = phase_wave(y, t, Strand::Cool);
            assert!((warm + cool).abs() < EPS);
        }
    }

    #[test]
    fn strands_mirror_about_the_center_line() {
        let (w, h) = (1280.0, 4000.0);
        for step in 0..100 {
            let y = step as f64 * 23.0;
            let t = step as f64 * 61.0;
            let x0 = helix_x(y, t, Strand::Warm, w, h);
            let x1 = helix_x(y, t, Strand::Cool, w, h);
            assert!((x0 + x1 - w).abs() < 1e-6);
        }
    }

    #[test]
    fn fade_band_ramps_from_zero_to_one() {
        assert_eq!(fade_in(0.0), 0.0);
        assert_eq!(fade_in(START_Y), 0.0);
        assert!((fade_in(START_Y + FADE_BAND * 0.5) - 0.5).abs() < EPS);
        assert_eq!(fade_in(START_Y + FADE_BAND), 1.0);
        assert_eq!(fade_in(10_000.0), 1.0);
    }

    #[test]
    fn rung_alpha_is_zero_above_the_start_offset() {
        assert_eq!(rung_alpha(100.0, 5000.0), 0.0);
        assert!(rung_alpha(START_Y + FADE_BAND, 5000.0) > 0.0);
    }

    #[test]
    fn warm_tint_repeats_every_third_row() {
        assert!(rung_is_warm(0.0));
        assert!(!rung_is_warm(RUNG_SPACING));
        assert!(!rung_is_warm(RUNG_SPACING * 2.0));
        assert!(rung_is_warm(RUNG_SPACING * 3.0));
    }

    #[test]
    fn particle_budget_scales_with_height() {
        assert_eq!(particle_budget(2000.0, false), 250);
        assert_eq!(particle_budget(2000.0, true), 125);
        assert_eq!(particle_budget(7.0, false), 0);
    }

    #[test]
    fn particles_span_the_content_height() {
        let vp = ViewportState {
            width: 1280.0,
            content_height: 3200.0,
            hero_height: 900.0,
            pixel_density: 1.0,
        };
        let particles = generate(&vp, false, &mut GeometryRng::seeded(8));
        assert_eq!(particles.len(), 400);
        for p in &particles {
            assert!((0.0..vp.content_height).contains(&p.y));
            assert!((0.3..0.7).contains(&p.speed));
        }
    }
}
