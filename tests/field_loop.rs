use plexus_field::{scene, FieldConfig, Kind, ParticleField};

#[test]
fn decorative_field_end_to_end() {
    let mut field = ParticleField::new(1200.0, 800.0, FieldConfig::default());
    assert_eq!(field.ambient_count(), 120, "1200x800 hits the particle cap");

    // With no pointer input the only velocity mutation is edge inversion,
    // which preserves component magnitudes.
    let speeds_before: Vec<(f32, f32)> = field
        .particles()
        .iter()
        .map(|p| (p.vx.abs(), p.vy.abs()))
        .collect();
    for _ in 0..60 {
        field.advance();
    }
    assert_eq!(field.ambient_count(), 120);
    for (p, (vx, vy)) in field.particles().iter().zip(&speeds_before) {
        assert!(p.x >= -1.0 && p.x <= 1201.0);
        assert!(p.y >= -1.0 && p.y <= 801.0);
        assert!((p.vx.abs() - vx).abs() < 1e-6);
        assert!((p.vy.abs() - vy).abs() < 1e-6);
    }

    field.spawn_burst(600.0, 400.0);
    let added = field.len() - 120;
    assert!((15..25).contains(&added), "burst added {added} particles");
    for p in field.particles().iter().skip(120) {
        assert_eq!((p.x, p.y), (600.0, 400.0));
    }

    for _ in 0..90 {
        field.advance();
    }
    assert_eq!(field.len(), 120, "every burst particle has expired");
    assert!(field
        .particles()
        .iter()
        .all(|p| matches!(p.kind, Kind::Ambient)));

    let scene = scene::build(field.particles(), field.config());
    assert_eq!(scene.circles.len(), 120);
    assert_eq!(scene.lines.len() % 2, 0, "lines come in segment pairs");

    field.teardown();
    field.teardown();
    assert!(field.is_empty());
    field.advance();
    assert!(field.is_empty());
}
