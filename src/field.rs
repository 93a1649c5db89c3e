use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldConfig;
use crate::particle::{Kind, Particle};

/// The particle field simulator. Owns every particle, the last known pointer
/// position, and the burst schedule. All mutation happens on the caller's
/// thread, one `advance` per frame.
pub struct ParticleField {
    config: FieldConfig,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    pointer: Option<(f32, f32)>,
    pointer_accepted: Option<Instant>,
    next_burst: Instant,
    running: bool,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(width: f32, height: f32, config: FieldConfig) -> Self {
        let mut field = Self {
            config,
            width,
            height,
            particles: Vec::new(),
            pointer: None,
            pointer_accepted: None,
            next_burst: Instant::now(),
            running: true,
            rng: StdRng::from_entropy(),
        };
        field.next_burst = Instant::now() + field.roll_burst_interval();
        field.populate();
        field
    }

    /// Ambient population for the current viewport: one particle per
    /// `area_per_particle` px², capped at `max_ambient`.
    pub fn ambient_target(&self) -> usize {
        ((self.width * self.height / self.config.area_per_particle) as usize)
            .min(self.config.max_ambient)
    }

    fn populate(&mut self) {
        self.particles.clear();
        let count = self.ambient_target();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::ambient(&mut self.rng, self.width, self.height, &self.config));
        }
    }

    /// Re-initializes the field wholesale for a new viewport. Bursts in
    /// flight are discarded along with the old ambient set.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.running {
            return;
        }
        self.width = width;
        self.height = height;
        self.populate();
    }

    /// Advances the simulation by one frame. Per-frame, not per-second:
    /// velocities are in px/frame and the caller is expected to pace calls
    /// to the display refresh rate.
    pub fn advance(&mut self) {
        if !self.running {
            return;
        }
        let (width, height) = (self.width, self.height);
        let pointer = self.pointer;
        let config = self.config;
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            match &mut p.kind {
                Kind::Ambient => {
                    // Invert rather than clamp, so a particle may overshoot
                    // the edge by up to one frame's displacement.
                    if p.x <= 0.0 || p.x >= width {
                        p.vx = -p.vx;
                    }
                    if p.y <= 0.0 || p.y >= height {
                        p.vy = -p.vy;
                    }
                    if let Some((mx, my)) = pointer {
                        let dx = p.x - mx;
                        let dy = p.y - my;
                        if (dx * dx + dy * dy).sqrt() < config.repel_distance {
                            p.vx += dx / config.repel_divisor;
                            p.vy += dy / config.repel_divisor;
                        }
                    }
                    true
                }
                Kind::Burst { life } => {
                    *life -= 1;
                    p.opacity *= config.burst_fade;
                    *life > 0
                }
            }
        });
    }

    /// Spawns a group of burst particles at one origin. Each one expires on
    /// its own; the group has no shared lifecycle beyond the origin.
    pub fn spawn_burst(&mut self, x: f32, y: f32) {
        if !self.running {
            return;
        }
        let count = self
            .rng
            .gen_range(self.config.burst_count_min..self.config.burst_count_max);
        for _ in 0..count {
            let p = Particle::burst(&mut self.rng, x, y, &self.config);
            self.particles.push(p);
        }
    }

    /// Records a pointer position, dropping updates that arrive within the
    /// throttle window of the last accepted one. Dropped positions are not
    /// queued; the next accepted event supersedes them.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now: Instant) {
        if let Some(last) = self.pointer_accepted {
            if now.duration_since(last) < self.config.pointer_throttle {
                return;
            }
        }
        self.pointer_accepted = Some(now);
        self.pointer = Some((x, y));
    }

    /// Once-per-frame check of the burst deadline. On expiry, spawns a burst
    /// at a random viewport point and re-rolls the deadline.
    pub fn tick_bursts(&mut self, now: Instant) {
        if !self.running || now < self.next_burst {
            return;
        }
        if self.width > 0.0 && self.height > 0.0 {
            let x = self.rng.gen_range(0.0..self.width);
            let y = self.rng.gen_range(0.0..self.height);
            self.spawn_burst(x, y);
        }
        self.next_burst = now + self.roll_burst_interval();
    }

    fn roll_burst_interval(&mut self) -> Duration {
        let min = self.config.burst_interval_min;
        let span = self
            .config
            .burst_interval_max
            .saturating_sub(min)
            .as_millis() as u64;
        if span == 0 {
            return min;
        }
        min + Duration::from_millis(self.rng.gen_range(0..span))
    }

    /// Stops the field and releases every particle. Idempotent; `advance`,
    /// `spawn_burst`, `resize` and `tick_bursts` are no-ops afterwards.
    pub fn teardown(&mut self) {
        self.running = false;
        self.particles.clear();
        self.pointer = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn ambient_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_ambient()).count()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{FieldConfig, Kind, Particle, ParticleField};

    fn empty_field(width: f32, height: f32) -> ParticleField {
        // Small enough that the area rule yields zero ambient particles.
        let field = ParticleField::new(width, height, FieldConfig::default());
        assert_eq!(field.ambient_count(), 0);
        field
    }

    #[test]
    fn ambient_count_follows_viewport_area() {
        let config = FieldConfig::default();
        assert_eq!(ParticleField::new(1200.0, 800.0, config).ambient_count(), 120);
        assert_eq!(ParticleField::new(400.0, 400.0, config).ambient_count(), 20);
        assert_eq!(ParticleField::new(100.0, 100.0, config).ambient_count(), 1);
        assert_eq!(ParticleField::new(50.0, 50.0, config).ambient_count(), 0);
        // Cap: a huge viewport still gets at most 120.
        assert_eq!(ParticleField::new(4000.0, 3000.0, config).ambient_count(), 120);
    }

    #[test]
    fn ambient_particles_stay_near_the_viewport() {
        let mut field = ParticleField::new(800.0, 600.0, FieldConfig::default());
        for _ in 0..300 {
            field.advance();
        }
        // In-bounds modulo one frame's displacement (|v| < 0.6 per axis).
        for p in field.particles() {
            assert!(p.x >= -1.0 && p.x <= 801.0, "x out of range: {}", p.x);
            assert!(p.y >= -1.0 && p.y <= 601.0, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn resize_recreates_the_ambient_set() {
        let mut field = ParticleField::new(1200.0, 800.0, FieldConfig::default());
        field.spawn_burst(600.0, 400.0);
        field.resize(400.0, 400.0);
        assert_eq!(field.len(), 20);
        assert_eq!(field.ambient_count(), 20);
    }

    #[test]
    fn spawn_burst_count_and_origin() {
        let mut field = empty_field(50.0, 50.0);
        field.spawn_burst(25.0, 30.0);
        assert!((15..25).contains(&field.len()), "got {}", field.len());
        for p in field.particles() {
            assert_eq!((p.x, p.y), (25.0, 30.0));
            assert!(!p.is_ambient());
        }
    }

    #[test]
    fn burst_opacity_strictly_decreases_until_removal() {
        let mut field = empty_field(50.0, 50.0);
        field.spawn_burst(25.0, 25.0);
        let mut previous_max = 1.0_f32;
        for _ in 0..90 {
            field.advance();
            if field.is_empty() {
                break;
            }
            let max = field
                .particles()
                .iter()
                .map(|p| p.opacity)
                .fold(0.0_f32, f32::max);
            assert!(max < previous_max);
            previous_max = max;
        }
        assert!(field.is_empty(), "bursts should all expire within 90 frames");
    }

    #[test]
    fn burst_removed_exactly_when_life_reaches_zero() {
        let mut field = empty_field(50.0, 50.0);
        field.spawn_burst(25.0, 25.0);
        let lives: Vec<u32> = field
            .particles()
            .iter()
            .map(|p| match p.kind {
                Kind::Burst { life } => life,
                Kind::Ambient => unreachable!("field holds only bursts"),
            })
            .collect();
        let max_life = *lives.iter().max().unwrap();
        for frame in 1..=max_life {
            field.advance();
            let expected = lives.iter().filter(|&&life| life > frame).count();
            assert_eq!(field.len(), expected, "after frame {frame}");
        }
        assert!(field.is_empty());
    }

    #[test]
    fn pointer_updates_are_throttled_not_queued() {
        let mut field = empty_field(50.0, 50.0);
        let t0 = Instant::now();
        field.pointer_moved(10.0, 10.0, t0);
        assert_eq!(field.pointer(), Some((10.0, 10.0)));
        // Within the 20ms window: dropped.
        field.pointer_moved(99.0, 99.0, t0 + Duration::from_millis(5));
        assert_eq!(field.pointer(), Some((10.0, 10.0)));
        // Past the window: accepted, superseding the dropped update.
        field.pointer_moved(40.0, 40.0, t0 + Duration::from_millis(25));
        assert_eq!(field.pointer(), Some((40.0, 40.0)));
    }

    #[test]
    fn pointer_repels_only_nearby_ambient_particles() {
        let mut field = empty_field(50.0, 50.0);
        let ambient = |x, y| Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 2.0,
            opacity: 0.4,
            hue: 180.0,
            kind: Kind::Ambient,
        };
        field.particles.push(ambient(20.0, 25.0));
        field.particles.push(ambient(20.0, 300.0));
        field.pointer_moved(10.0, 25.0, Instant::now());
        field.advance();
        let near = &field.particles()[0];
        assert!((near.vx - 10.0 / 2000.0).abs() < 1e-6);
        assert_eq!(near.vy, 0.0);
        let far = &field.particles()[1];
        assert_eq!((far.vx, far.vy), (0.0, 0.0));
    }

    #[test]
    fn scheduled_burst_fires_once_per_deadline() {
        let mut field = empty_field(50.0, 50.0);
        let before = field.len();
        // The first deadline is at least 2.5s out.
        field.tick_bursts(Instant::now());
        assert_eq!(field.len(), before);
        field.tick_bursts(Instant::now() + Duration::from_secs(5));
        assert!(field.len() >= before + 15);
        let after = field.len();
        // Deadline re-rolled; an immediate second tick does nothing.
        field.tick_bursts(Instant::now() + Duration::from_secs(5));
        assert_eq!(field.len(), after);
    }

    #[test]
    fn teardown_is_idempotent_and_freezes_the_field() {
        let mut field = ParticleField::new(800.0, 600.0, FieldConfig::default());
        field.teardown();
        field.teardown();
        assert!(field.is_empty());
        assert!(!field.is_running());
        field.advance();
        field.spawn_burst(100.0, 100.0);
        field.resize(1200.0, 800.0);
        field.tick_bursts(Instant::now() + Duration::from_secs(60));
        assert!(field.is_empty());
    }
}
