use std::time::Duration;

/// Tuning knobs for the particle field. Defaults reproduce the original
/// background effect at a 60Hz frame rate.
#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    /// Hard cap on ambient particles regardless of viewport area.
    pub max_ambient: usize,
    /// Viewport area (px²) per ambient particle.
    pub area_per_particle: f32,
    /// Ambient velocity components are drawn from [-ambient_speed, ambient_speed) px/frame.
    pub ambient_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    /// Ambient pairs closer than this get a connecting line.
    pub link_distance: f32,
    /// Line opacity at zero distance; falls off linearly to zero at link_distance.
    pub link_alpha: f32,
    /// Pointer repulsion radius in px.
    pub repel_distance: f32,
    /// Velocity nudge per frame is (particle - pointer) / repel_divisor per axis.
    pub repel_divisor: f32,
    pub burst_count_min: usize,
    pub burst_count_max: usize,
    pub burst_speed_min: f32,
    pub burst_speed_max: f32,
    /// Burst lifetimes in frames, drawn from [burst_life_min, burst_life_max).
    pub burst_life_min: u32,
    pub burst_life_max: u32,
    /// Per-frame opacity multiplier for burst particles.
    pub burst_fade: f32,
    /// Pointer updates landing within this window of the last accepted one are dropped.
    pub pointer_throttle: Duration,
    pub burst_interval_min: Duration,
    pub burst_interval_max: Duration,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_ambient: 120,
            area_per_particle: 8000.0,
            ambient_speed: 0.6,
            radius_min: 1.0,
            radius_max: 4.0,
            opacity_min: 0.1,
            opacity_max: 0.6,
            link_distance: 120.0,
            link_alpha: 0.15,
            repel_distance: 100.0,
            repel_divisor: 2000.0,
            burst_count_min: 15,
            burst_count_max: 25,
            burst_speed_min: 2.0,
            burst_speed_max: 6.0,
            burst_life_min: 60,
            burst_life_max: 90,
            burst_fade: 0.95,
            pointer_throttle: Duration::from_millis(20),
            burst_interval_min: Duration::from_millis(2500),
            burst_interval_max: Duration::from_millis(4000),
        }
    }
}
