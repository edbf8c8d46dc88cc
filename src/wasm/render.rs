//! Per-frame compositor. Every frame repaints from a solid base fill, layers
//! the nebula over the hero area, then the mode-specific field on top.

use std::f64::consts::TAU;

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::helix::{self, Strand};
use crate::nebula::{GlowState, NebulaParticle};
use crate::viewport::ViewportState;

use super::app::{App, Scene};

/// Time argument used for the single reduced-motion frame.
pub(super) const STATIC_FRAME_TIME_MS: f64 = 1000.0;

/// Solid fill under everything else.
const BASE_FILL: &str = "#0f172a";

fn rgba(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a:.4})")
}

pub(super) fn draw_frame(app: &mut App, time: f64) {
    let ctx = app.ctx.clone();
    let vp = app.viewport;

    let dpr = vp.pixel_density;
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
    ctx.clear_rect(0.0, 0.0, vp.width, vp.content_height);
    ctx.set_fill_style_str(BASE_FILL);
    ctx.fill_rect(0.0, 0.0, vp.width, vp.content_height);

    // The nebula runs on its own frame-counted clock; capture the frame time
    // before advancing so the gradient drift matches this frame's particles.
    let drift_t = app.nebula.time_ms();
    let glow = app.nebula.advance(&vp, &mut app.rng);
    paint_nebula(&ctx, &vp, app.nebula.particles(), drift_t, glow);

    match &app.scene {
        Scene::Constellation(field) => paint_constellation(&ctx, &vp, field, glow, time),
        Scene::Dna(particles) => paint_dna(&ctx, &vp, particles, time),
    }
}

/// Hero-area backdrop: one anchored glow, two drifting wisps, the particle
/// pool, and a faint warmth cycle, each pulsing at its own frequency.
fn paint_nebula(
    ctx: &CanvasRenderingContext2d,
    vp: &ViewportState,
    particles: &[NebulaParticle],
    t: f64,
    glow: GlowState,
) {
    let w = vp.width;
    let vh = vp.hero_height;
    let GlowState { fast, slow } = glow;

    // Main glow anchored just past the top-right corner.
    if let Ok(grad) = ctx.create_radial_gradient(w + 100.0, -100.0, 0.0, w * 0.5, vh * 0.3, w * 0.8)
    {
        grad.add_color_stop(0.0, &rgba(180, 60, 40, 0.58 * fast)).ok();
        grad.add_color_stop(0.2, &rgba(200, 80, 50, 0.36 * fast)).ok();
        grad.add_color_stop(0.4, &rgba(140, 50, 60, 0.26 * slow)).ok();
        grad.add_color_stop(0.6, &rgba(80, 100, 120, 0.13 * slow)).ok();
        grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, 0.0, w, vh);
    }

    // Warm wisp drifting on slow sinusoidal offsets.
    if let Ok(grad) = ctx.create_radial_gradient(
        w * 0.8 + (t * 0.001).sin() * 30.0,
        vh * 0.15 + (t * 0.0008).cos() * 20.0,
        0.0,
        w * 0.6,
        vh * 0.3,
        w * 0.5,
    ) {
        grad.add_color_stop(0.0, &rgba(220, 120, 60, 0.29 * fast)).ok();
        grad.add_color_stop(0.3, &rgba(180, 80, 50, 0.2 * slow)).ok();
        grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, 0.0, w, vh);
    }

    // Teal filament accent.
    if let Ok(grad) = ctx.create_radial_gradient(
        w * 0.7 + (t * 0.0009).cos() * 40.0,
        vh * 0.25 + (t * 0.0012).sin() * 25.0,
        0.0,
        w * 0.5,
        vh * 0.35,
        w * 0.3,
    ) {
        grad.add_color_stop(0.0, &rgba(60, 140, 160, 0.2 * slow)).ok();
        grad.add_color_stop(0.5, &rgba(40, 100, 120, 0.12 * fast)).ok();
        grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, 0.0, w, vh);
    }

    // The particle pool: each blob is its own soft radial gradient.
    for p in particles {
        let alpha = p.alpha(fast);
        if let Ok(grad) = ctx.create_radial_gradient(p.x, p.y, 0.0, p.x, p.y, p.size) {
            let c = p.color;
            grad.add_color_stop(0.0, &rgba(c.r, c.g, c.b, alpha)).ok();
            grad.add_color_stop(0.5, &rgba(c.r, c.g, c.b, alpha * 0.3)).ok();
            grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
            ctx.set_fill_style_canvas_gradient(&grad);
            ctx.begin_path();
            ctx.arc(p.x, p.y, p.size, 0.0, TAU).ok();
            ctx.fill();
        }
    }

    // Subtle warmth variation over the whole hero.
    let warmth = (t * 0.0002).sin() * 0.02;
    if let Ok(grad) = ctx.create_radial_gradient(w * 0.85, vh * 0.1, 0.0, w * 0.6, vh * 0.3, w * 0.4)
    {
        grad.add_color_stop(0.0, &rgba(255, 200, 150, 0.03 + warmth)).ok();
        grad.add_color_stop(0.4, &rgba(220, 100, 60, 0.015 + warmth * 0.5)).ok();
        grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, 0.0, w, vh);
    }
}

fn paint_constellation(
    ctx: &CanvasRenderingContext2d,
    vp: &ViewportState,
    field: &crate::constellation::StarField,
    glow: GlowState,
    time: f64,
) {
    let w = vp.width;
    let h = vp.content_height;

    // Nebula echoes below the fold, breathing in the hero's rhythm.
    if let Ok(grad) = ctx.create_radial_gradient(w * 0.2, h * 0.35, 0.0, w * 0.2, h * 0.35, w * 0.4)
    {
        grad.add_color_stop(0.0, &rgba(180, 60, 40, 0.03 * glow.fast)).ok();
        grad.add_color_stop(0.5, &rgba(140, 40, 60, 0.01 * glow.slow)).ok();
        grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, h * 0.2, w, h * 0.3);
    }
    if let Ok(grad) =
        ctx.create_radial_gradient(w * 0.85, h * 0.65, 0.0, w * 0.85, h * 0.65, w * 0.35)
    {
        grad.add_color_stop(0.0, &rgba(60, 140, 160, 0.025 * glow.slow)).ok();
        grad.add_color_stop(0.5, "rgba(60,140,160,0.007)").ok();
        grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, h * 0.5, w, h * 0.3);
    }

    // Connections shimmer asynchronously: each pulse is keyed on the origin
    // star's index, not shared across edges.
    for conn in &field.connections {
        let from = &field.stars[conn.from];
        let to = &field.stars[conn.to];
        let pulse = ((time * 0.001 + conn.from as f64 * 0.5).sin() * 0.015 + conn.opacity) * 0.6;

        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.set_stroke_style_str(&rgba(45, 212, 191, pulse));
        ctx.set_line_width(0.5);
        ctx.stroke();
    }

    for star in &field.stars {
        let alpha = star.brightness * star.twinkle(time) * 0.6;

        // Soft halo behind node stars.
        if star.is_node {
            if let Ok(grad) =
                ctx.create_radial_gradient(star.x, star.y, 0.0, star.x, star.y, star.size * 4.0)
            {
                grad.add_color_stop(0.0, &rgba(45, 212, 191, alpha * 0.2)).ok();
                grad.add_color_stop(0.5, &rgba(45, 212, 191, alpha * 0.05)).ok();
                grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
                ctx.set_fill_style_canvas_gradient(&grad);
                ctx.fill_rect(
                    star.x - star.size * 4.0,
                    star.y - star.size * 4.0,
                    star.size * 8.0,
                    star.size * 8.0,
                );
            }
        }

        ctx.begin_path();
        ctx.arc(star.x, star.y, star.size, 0.0, TAU).ok();
        if star.is_node {
            ctx.set_fill_style_str(&rgba(200, 220, 230, alpha));
        } else if star.twinkle_offset > 4.5 {
            ctx.set_fill_style_str(&rgba(240, 200, 170, alpha * 0.7));
        } else {
            ctx.set_fill_style_str(&rgba(200, 210, 230, alpha * 0.8));
        }
        ctx.fill();
    }
}

fn paint_dna(
    ctx: &CanvasRenderingContext2d,
    vp: &ViewportState,
    particles: &[crate::helix::DnaParticle],
    time: f64,
) {
    let w = vp.width;
    let h = vp.content_height;

    // Base-pair rungs, drawn behind the strands.
    let mut y = helix::START_Y;
    while y < h - helix::BOTTOM_MARGIN {
        let x0 = helix::helix_x(y, time, Strand::Warm, w, h);
        let x1 = helix::helix_x(y, time, Strand::Cool, w, h);
        let alpha = helix::rung_alpha(y, time);
        let warm = helix::rung_is_warm(y);

        ctx.begin_path();
        ctx.move_to(x0, y);
        ctx.line_to(x1, y);
        ctx.set_stroke_style_str(&if warm {
            rgba(220, 100, 50, alpha)
        } else {
            rgba(45, 212, 191, alpha)
        });
        ctx.set_line_width(1.0);
        ctx.stroke();

        // Anchor dots where the rung meets each strand.
        for x in [x0, x1] {
            ctx.begin_path();
            ctx.arc(x, y, 1.5, 0.0, TAU).ok();
            ctx.set_fill_style_str(&if warm {
                rgba(220, 100, 50, alpha * 3.0)
            } else {
                rgba(45, 212, 191, alpha * 3.0)
            });
            ctx.fill();
        }

        y += helix::RUNG_SPACING;
    }

    // Each strand gets a crisp core stroke and a wide glow stroke.
    for strand in Strand::BOTH {
        trace_strand(ctx, strand, w, h, time);
        ctx.set_stroke_style_canvas_gradient(&strand_gradient(ctx, strand, h, false));
        ctx.set_line_width(1.5);
        ctx.stroke();

        trace_strand(ctx, strand, w, h, time);
        ctx.set_stroke_style_canvas_gradient(&strand_gradient(ctx, strand, h, true));
        ctx.set_line_width(8.0);
        ctx.stroke();
    }

    // Floating particles bobbing along the strands.
    for p in particles {
        let py = p.y + (time * 0.0003 + p.angle).sin() * 5.0;
        if py < helix::START_Y {
            continue;
        }
        let fade = helix::fade_in(py);
        let px = helix::helix_x(py, time, p.strand, w, h);
        let offset = (time * 0.001 * p.speed + p.angle).sin() * 15.0;
        let alpha = p.brightness * fade * (0.5 + (time * 0.002 * p.speed + p.angle).sin() * 0.3);

        ctx.begin_path();
        ctx.arc(px + offset, py, p.size, 0.0, TAU).ok();
        ctx.set_fill_style_str(&match p.strand {
            Strand::Warm => rgba(220, 150, 100, alpha * 0.4),
            Strand::Cool => rgba(100, 200, 200, alpha * 0.4),
        });
        ctx.fill();
    }
}

/// Lay down the strand polyline, skipping the region above the start offset.
fn trace_strand(ctx: &CanvasRenderingContext2d, strand: Strand, w: f64, h: f64, time: f64) {
    let steps = (h / 2.0).floor() as usize;
    ctx.begin_path();
    let mut started = false;
    for i in 0..steps {
        let y = (i as f64 / steps as f64) * h;
        if y < helix::START_Y {
            continue;
        }
        let x = helix::helix_x(y, time, strand, w, h);
        if started {
            ctx.line_to(x, y);
        } else {
            ctx.move_to(x, y);
            started = true;
        }
    }
}

/// Vertical gradient fading in at the helix entry and out towards the bottom;
/// the glow pass uses the same shape at a fraction of the opacity.
fn strand_gradient(
    ctx: &CanvasRenderingContext2d,
    strand: Strand,
    h: f64,
    glow_pass: bool,
) -> CanvasGradient {
    let grad = ctx.create_linear_gradient(0.0, helix::START_Y, 0.0, h);
    match (strand, glow_pass) {
        (Strand::Warm, false) => {
            grad.add_color_stop(0.0, "rgba(220,100,50,0)").ok();
            grad.add_color_stop(0.05, "rgba(220,100,50,0.3)").ok();
            grad.add_color_stop(0.3, "rgba(180,60,40,0.2)").ok();
            grad.add_color_stop(0.6, "rgba(200,150,80,0.15)").ok();
            grad.add_color_stop(1.0, "rgba(220,100,50,0.08)").ok();
        }
        (Strand::Cool, false) => {
            grad.add_color_stop(0.0, "rgba(45,212,191,0)").ok();
            grad.add_color_stop(0.05, "rgba(45,212,191,0.3)").ok();
            grad.add_color_stop(0.3, "rgba(60,140,160,0.2)").ok();
            grad.add_color_stop(0.6, "rgba(45,212,191,0.15)").ok();
            grad.add_color_stop(1.0, "rgba(60,140,160,0.08)").ok();
        }
        (Strand::Warm, true) => {
            grad.add_color_stop(0.0, "rgba(220,100,50,0)").ok();
            grad.add_color_stop(0.05, "rgba(220,100,50,0.08)").ok();
            grad.add_color_stop(0.5, "rgba(180,60,40,0.04)").ok();
            grad.add_color_stop(1.0, "rgba(220,100,50,0.015)").ok();
        }
        (Strand::Cool, true) => {
            grad.add_color_stop(0.0, "rgba(45,212,191,0)").ok();
            grad.add_color_stop(0.05, "rgba(45,212,191,0.08)").ok();
            grad.add_color_stop(0.5, "rgba(60,140,160,0.04)").ok();
            grad.add_color_stop(1.0, "rgba(45,212,191,0.015)").ok();
        }
    }
    grad
}
