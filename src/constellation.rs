//! Star field generation and the sparse connection graph between node stars.

use crate::rng::GeometryRng;
use crate::viewport::ViewportState;

/// One star per 3500 logical px² of drawable area.
const AREA_PER_STAR: f64 = 3500.0;

/// Fraction of surviving stars promoted to connection-eligible nodes.
const NODE_CHANCE: f64 = 0.08;

/// Connection reach as a fraction of the smaller viewport dimension.
const LINK_RANGE: f64 = 0.18;

#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Depth in `[0, 1)`; deeper dust stars render smaller.
    pub z: f64,
    pub size: f64,
    pub brightness: f64,
    pub twinkle_speed: f64,
    pub twinkle_offset: f64,
    pub is_node: bool,
}

impl Star {
    /// Twinkle factor in `[0.4, 1.0]`; modulation never raises a star above
    /// its base brightness.
    pub fn twinkle(&self, time_ms: f64) -> f64 {
        (time_ms * 0.001 * self.twinkle_speed + self.twinkle_offset).sin() * 0.3 + 0.7
    }
}

/// Undirected edge between two node stars, stored by star index.
#[derive(Clone, Copy, Debug)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub opacity: f64,
}

pub struct StarField {
    pub stars: Vec<Star>,
    pub connections: Vec<Connection>,
}

/// Candidate star count before density thinning.
pub fn star_budget(viewport: &ViewportState, constrained: bool) -> usize {
    let mut count = (viewport.area() / AREA_PER_STAR).floor() as usize;
    if constrained {
        count /= 2;
    }
    count
}

pub fn generate(viewport: &ViewportState, constrained: bool, rng: &mut GeometryRng) -> StarField {
    let w = viewport.width;
    let h = viewport.content_height;

    let mut stars = Vec::new();
    for _ in 0..star_budget(viewport, constrained) {
        let y = rng.unit() * h;
        // Depth-biased thinning: acceptance falls off linearly below 30% of
        // the content height, suggesting vertical perspective.
        let density = 1.0 - (y / h) * 0.3;
        if rng.unit() > density && y > h * 0.3 {
            continue;
        }

        let z = rng.unit();
        let is_node = rng.chance(NODE_CHANCE);
        stars.push(Star {
            x: rng.unit() * w,
            y,
            z,
            size: if is_node {
                rng.jitter(1.5, 2.0)
            } else {
                0.3 + rng.unit() * 1.5 * (1.0 - z * 0.5)
            },
            brightness: if is_node {
                rng.jitter(0.7, 0.3)
            } else {
                rng.jitter(0.15, 0.5)
            },
            twinkle_speed: rng.jitter(0.5, 2.0),
            twinkle_offset: rng.unit() * std::f64::consts::TAU,
            is_node,
        });
    }

    let connections = link_nodes(&stars, w, h, rng);
    StarField { stars, connections }
}

/// Connect each node to its nearest 1–2 in-range neighbours.
///
/// Duplicate undirected pairs are rejected against the edges accumulated so
/// far, which makes edge formation order-dependent across nodes. That
/// asymmetry is deliberate; it keeps constellation density uneven.
fn link_nodes(stars: &[Star], w: f64, h: f64, rng: &mut GeometryRng) -> Vec<Connection> {
    let nodes: Vec<usize> = (0..stars.len()).filter(|&i| stars[i].is_node).collect();
    let max_dist = w.min(h) * LINK_RANGE;

    let mut connections: Vec<Connection> = Vec::new();
    for (i, &from) in nodes.iter().enumerate() {
        let mut near: Vec<(usize, f64)> = Vec::new();
        for (j, &other) in nodes.iter().enumerate() {
            if i == j {
                continue;
            }
            let dx = stars[from].x - stars[other].x;
            let dy = stars[from].y - stars[other].y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < max_dist {
                near.push((other, dist));
            }
        }
        // Stable sort keeps the tie-break deterministic for a given rng seed.
        near.sort_by(|a, b| a.1.total_cmp(&b.1));

        let want = 1 + rng.below(2);
        for &(to, _) in near.iter().take(want) {
            let exists = connections
                .iter()
                .any(|c| (c.from == from && c.to == to) || (c.from == to && c.to == from));
            if !exists {
                connections.push(Connection {
                    from,
                    to,
                    opacity: rng.jitter(0.08, 0.12),
                });
            }
        }
    }
    connections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportState {
        ViewportState {
            width: 1024.0,
            content_height: 2000.0,
            hero_height: 768.0,
            pixel_density: 1.0,
        }
    }

    #[test]
    fn budget_matches_area_formula() {
        let vp = viewport();
        assert_eq!(star_budget(&vp, false), 585); // floor(1024 * 2000 / 3500)
        assert_eq!(star_budget(&vp, true), 292);
    }

    #[test]
    fn thinning_only_removes_stars() {
        let vp = viewport();
        for seed in 0..5 {
            let field = generate(&vp, false, &mut GeometryRng::seeded(seed));
            assert!(field.stars.len() <= star_budget(&vp, false));
            assert!(!field.stars.is_empty());
        }
    }

    #[test]
    fn connections_join_valid_nodes_without_duplicates() {
        let vp = viewport();
        for seed in 0..10 {
            let field = generate(&vp, false, &mut GeometryRng::seeded(seed));
            for (i, c) in field.connections.iter().enumerate() {
                assert!(field.stars[c.from].is_node);
                assert!(field.stars[c.to].is_node);
                assert_ne!(c.from, c.to);
                for other in &field.connections[i + 1..] {
                    let same = (other.from == c.from && other.to == c.to)
                        || (other.from == c.to && other.to == c.from);
                    assert!(!same, "duplicate undirected pair {}-{}", c.from, c.to);
                }
            }
        }
    }

    #[test]
    fn connections_respect_link_range() {
        let vp = viewport();
        let max_dist = vp.width.min(vp.content_height) * LINK_RANGE;
        let field = generate(&vp, false, &mut GeometryRng::seeded(11));
        for c in &field.connections {
            let dx = field.stars[c.from].x - field.stars[c.to].x;
            let dy = field.stars[c.from].y - field.stars[c.to].y;
            assert!((dx * dx + dy * dy).sqrt() < max_dist);
        }
    }

    #[test]
    fn twinkle_never_exceeds_base_brightness() {
        let vp = viewport();
        let field = generate(&vp, false, &mut GeometryRng::seeded(3));
        for star in &field.stars {
            for step in 0..200 {
                let t = step as f64 * 37.0;
                let factor = star.twinkle(t);
                let modulated = star.brightness * factor;
                assert!(modulated >= 0.0);
                assert!(modulated <= star.brightness + 1e-12);
            }
        }
    }

    #[test]
    fn generation_is_reproducible_under_a_fixed_seed() {
        let vp = viewport();
        let a = generate(&vp, false, &mut GeometryRng::seeded(99));
        let b = generate(&vp, false, &mut GeometryRng::seeded(99));
        assert_eq!(a.stars.len(), b.stars.len());
        assert_eq!(a.connections.len(), b.connections.len());
        for (x, y) in a.stars.iter().zip(&b.stars) {
            assert_eq!(x.x, y.x);
            assert_eq!(x.y, y.y);
            assert_eq!(x.is_node, y.is_node);
        }
    }
}
