use bytemuck::{Pod, Zeroable};

use crate::config::FieldConfig;
use crate::particle::Particle;

/// One instanced quad per particle; the fragment shader carves the circle.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// CPU-side draw list for one frame: circle instances plus line-list
/// vertices (two per link).
#[derive(Debug, Default)]
pub struct Scene {
    pub circles: Vec<CircleInstance>,
    pub lines: Vec<LineVertex>,
}

/// Particles render at hsla(hue, 80%, 60%, opacity).
const SATURATION: f32 = 0.8;
const LIGHTNESS: f32 = 0.6;

pub fn build(particles: &[Particle], config: &FieldConfig) -> Scene {
    let mut scene = Scene {
        circles: Vec::with_capacity(particles.len()),
        lines: Vec::new(),
    };
    for (i, p) in particles.iter().enumerate() {
        scene.circles.push(CircleInstance {
            center: [p.x, p.y],
            radius: p.radius,
            _pad: 0.0,
            color: hsla_to_rgba(p.hue, SATURATION, LIGHTNESS, p.opacity),
        });
        if !p.is_ambient() {
            continue;
        }
        // Later-elements-only pass so each ambient pair is visited once.
        for other in particles[i + 1..].iter().filter(|o| o.is_ambient()) {
            let dx = p.x - other.x;
            let dy = p.y - other.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < config.link_distance {
                let alpha = config.link_alpha * (1.0 - distance / config.link_distance);
                let color = hsla_to_rgba(p.hue, SATURATION, LIGHTNESS, alpha);
                scene.lines.push(LineVertex {
                    position: [p.x, p.y],
                    color,
                });
                scene.lines.push(LineVertex {
                    position: [other.x, other.y],
                    color,
                });
            }
        }
    }
    scene
}

/// hue in degrees, saturation/lightness/alpha in [0, 1].
pub fn hsla_to_rgba(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    [r + m, g + m, b + m, alpha]
}
