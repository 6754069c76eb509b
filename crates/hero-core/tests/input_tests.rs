// Host-side tests for pointer normalization and smoothing.

use glam::Vec2;
use hero_core::{normalize_client, InputSmoother};

#[test]
fn normalize_client_maps_window_corners_to_unit_square() {
    assert_eq!(normalize_client(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, -1.0));
    assert_eq!(normalize_client(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, 1.0));
    assert_eq!(normalize_client(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn normalize_client_with_degenerate_window_is_center() {
    assert_eq!(normalize_client(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
}

#[test]
fn tick_moves_by_sensitivity_fraction() {
    let mut s = InputSmoother::new(0.25);
    s.set_target(Vec2::new(1.0, -1.0));
    let p = s.tick();
    assert!((p.x - 0.25).abs() < 1e-6);
    assert!((p.y + 0.25).abs() < 1e-6);
    let p = s.tick();
    assert!((p.x - 0.4375).abs() < 1e-6);
}

#[test]
fn smoothing_converges_within_bound_proportional_to_inverse_sensitivity() {
    let eps = 1e-3_f32;
    for &k in &[0.05_f32, 0.12, 0.3, 0.7, 1.0] {
        let mut s = InputSmoother::new(k);
        let target = Vec2::new(0.8, -0.6);
        s.set_target(target);
        // (1-k)^n <= eps once n >= ln(1/eps)/k
        let bound = ((1.0 / eps).ln() / k).ceil() as usize + 1;
        for _ in 0..bound {
            s.tick();
        }
        assert!(
            (s.smoothed() - target).length() < eps,
            "k={k} did not converge in {bound} ticks"
        );
    }
}

#[test]
fn sensitivity_one_snaps_to_target() {
    let mut s = InputSmoother::new(1.0);
    s.set_target(Vec2::new(-0.3, 0.9));
    assert_eq!(s.tick(), Vec2::new(-0.3, 0.9));
}

#[test]
fn non_finite_targets_are_ignored() {
    let mut s = InputSmoother::new(0.5);
    s.set_target(Vec2::new(0.5, 0.5));
    s.set_target(Vec2::new(f32::NAN, 0.0));
    s.set_target_from_client(f32::INFINITY, 1.0, 100.0, 100.0);
    assert_eq!(s.target(), Vec2::new(0.5, 0.5));
    for _ in 0..50 {
        assert!(s.tick().is_finite());
    }
}

#[test]
fn target_jump_can_reverse_without_clamping() {
    let mut s = InputSmoother::new(0.5);
    s.set_target(Vec2::new(1.0, 1.0));
    s.tick();
    s.set_target(Vec2::new(-1.0, -1.0));
    let p = s.tick();
    assert!((p.x + 0.25).abs() < 1e-6);
}
