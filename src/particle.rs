use rand::Rng;

use crate::config::FieldConfig;

/// How a particle lives and dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Persists for the life of the field and bounces off viewport edges.
    Ambient,
    /// Spawned by an explosion; fades out over `life` remaining frames.
    /// No edge interaction: a burst near an edge may drift out of the
    /// viewport while it fades.
    Burst { life: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub opacity: f32,
    pub hue: f32,
    pub kind: Kind,
}

impl Particle {
    pub fn ambient(rng: &mut impl Rng, width: f32, height: f32, config: &FieldConfig) -> Self {
        Self {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            vx: rng.gen_range(-config.ambient_speed..config.ambient_speed),
            vy: rng.gen_range(-config.ambient_speed..config.ambient_speed),
            radius: rng.gen_range(config.radius_min..config.radius_max),
            opacity: rng.gen_range(config.opacity_min..config.opacity_max),
            hue: rng.gen_range(0.0..360.0),
            kind: Kind::Ambient,
        }
    }

    pub fn burst(rng: &mut impl Rng, x: f32, y: f32, config: &FieldConfig) -> Self {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(config.burst_speed_min..config.burst_speed_max);
        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            radius: rng.gen_range(config.radius_min..config.radius_max),
            opacity: 1.0,
            hue: rng.gen_range(0.0..360.0),
            kind: Kind::Burst {
                life: rng.gen_range(config.burst_life_min..config.burst_life_max),
            },
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self.kind, Kind::Ambient)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{FieldConfig, Kind, Particle};

    #[test]
    fn ambient_draws_within_configured_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::ambient(&mut rng, 800.0, 600.0, &config);
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!(p.vx.abs() <= config.ambient_speed);
            assert!(p.vy.abs() <= config.ambient_speed);
            assert!((config.radius_min..config.radius_max).contains(&p.radius));
            assert!((config.opacity_min..config.opacity_max).contains(&p.opacity));
            assert!((0.0..360.0).contains(&p.hue));
            assert_eq!(p.kind, Kind::Ambient);
        }
    }

    #[test]
    fn burst_starts_at_origin_with_full_opacity() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::burst(&mut rng, 320.0, 240.0, &config);
            assert_eq!((p.x, p.y), (320.0, 240.0));
            assert_eq!(p.opacity, 1.0);
            let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
            assert!(speed >= config.burst_speed_min - 1e-3);
            assert!(speed < config.burst_speed_max + 1e-3);
            match p.kind {
                Kind::Burst { life } => {
                    assert!((config.burst_life_min..config.burst_life_max).contains(&life))
                }
                Kind::Ambient => panic!("burst constructor produced an ambient particle"),
            }
        }
    }
}
