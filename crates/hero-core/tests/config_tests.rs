// Host-side tests for configuration parsing and validation.

use hero_core::constants::{DEFAULT_ACCENT_RGB, HIGH_QUALITY_CAP, LOW_QUALITY_CAP};
use hero_core::{
    motion_override_from_query, Accent, ConfigError, DeviceHints, MotionPolicy, QualityPreset,
    RenderConfig, ShaderTunables,
};

#[test]
fn accent_parses_with_and_without_hash() {
    let a = Accent::from_hex("#64ffda").unwrap();
    assert!((a.0[0] - 100.0 / 255.0).abs() < 1e-6);
    assert_eq!(a.0[1], 1.0);
    assert!((a.0[2] - 218.0 / 255.0).abs() < 1e-6);
    assert_eq!(Accent::from_hex("64FFDA").unwrap(), a);
}

#[test]
fn bad_accent_is_rejected_and_defaults_on_fallback() {
    assert!(matches!(
        Accent::from_hex("#fff"),
        Err(ConfigError::InvalidAccent(_))
    ));
    assert!(Accent::from_hex("#gg0000").is_err());
    assert_eq!(Accent::from_hex_or_default("teal").0, DEFAULT_ACCENT_RGB);
}

#[test]
fn quality_preset_parses_case_insensitively() {
    assert_eq!("HIGH".parse::<QualityPreset>().unwrap(), QualityPreset::High);
    assert_eq!(" low ".parse::<QualityPreset>().unwrap(), QualityPreset::Low);
    assert!("ultra".parse::<QualityPreset>().is_err());
}

#[test]
fn fixed_presets_bound_the_base_cap() {
    let hints = DeviceHints::default();
    assert_eq!(QualityPreset::High.resolve_cap(1.5, &hints), HIGH_QUALITY_CAP);
    assert_eq!(QualityPreset::High.resolve_cap(3.0, &hints), 3.0);
    assert_eq!(QualityPreset::Low.resolve_cap(1.5, &hints), LOW_QUALITY_CAP);
    assert_eq!(QualityPreset::Low.resolve_cap(1.0, &hints), 1.0);
}

#[test]
fn auto_preset_follows_device_hints() {
    let strong = DeviceHints {
        memory_gb: Some(16.0),
        cores: Some(12),
    };
    let weak = DeviceHints {
        memory_gb: Some(2.0),
        cores: Some(8),
    };
    let middle = DeviceHints {
        memory_gb: Some(6.0),
        cores: Some(6),
    };
    assert_eq!(QualityPreset::Auto.resolve_cap(1.5, &strong), 2.0);
    assert_eq!(QualityPreset::Auto.resolve_cap(1.5, &weak), 1.25);
    assert_eq!(QualityPreset::Auto.resolve_cap(1.5, &middle), 1.5);
    // Unknown hints are treated as a modest device.
    assert_eq!(QualityPreset::Auto.resolve_cap(1.5, &DeviceHints::default()), 1.25);
}

#[test]
fn motion_policy_overrides() {
    let reduced = MotionPolicy {
        prefers_reduced_motion: true,
        ..MotionPolicy::default()
    };
    assert!(!reduced.allows_motion());
    assert!(MotionPolicy {
        force_motion: true,
        ..reduced
    }
    .allows_motion());
    assert!(MotionPolicy {
        query_override: true,
        ..reduced
    }
    .allows_motion());
    assert!(MotionPolicy::default().allows_motion());
}

#[test]
fn motion_query_parameter() {
    assert!(motion_override_from_query("?motion=on"));
    assert!(motion_override_from_query("?a=1&motion=on&b=2"));
    assert!(!motion_override_from_query("?motion=off"));
    assert!(!motion_override_from_query(""));
    assert!(!motion_override_from_query("?promotion=on"));
}

#[test]
fn default_config_is_valid() {
    let c = RenderConfig::default();
    c.validate().unwrap();
    assert_eq!(c.container_height_css(), "min(78vh, 900px)");
    assert_eq!(c.container_min_height_css(), "420px");
}

#[test]
fn config_rejects_broken_invariants() {
    let bad_cap = RenderConfig {
        pixel_ratio_cap: 0.0,
        ..RenderConfig::default()
    };
    assert_eq!(
        bad_cap.validate(),
        Err(ConfigError::InvalidPixelRatioCap(0.0))
    );
    let bad_disk = RenderConfig {
        tunables: ShaderTunables {
            disk_inner: 3.0,
            disk_outer: 2.0,
            ..ShaderTunables::default()
        },
        ..RenderConfig::default()
    };
    assert!(matches!(
        bad_disk.validate(),
        Err(ConfigError::DiskRadiiOrder { .. })
    ));
    let bad_sensitivity = RenderConfig {
        tunables: ShaderTunables {
            sensitivity: 0.0,
            ..ShaderTunables::default()
        },
        ..RenderConfig::default()
    };
    assert!(bad_sensitivity.validate().is_err());
}

#[test]
fn tunable_setters_keep_disk_order() {
    let mut t = ShaderTunables::default();
    assert!(t.set_disk_inner(t.disk_outer).is_err());
    assert!(t.set_disk_outer(t.disk_inner - 0.1).is_err());
    t.set_disk_outer(3.6).unwrap();
    t.set_disk_inner(1.5).unwrap();
    assert_eq!((t.disk_inner, t.disk_outer), (1.5, 3.6));
    assert!(t.set_beam_strength(f32::NAN).is_err());
    assert!(t.set_sensitivity(1.5).is_err());
    t.set_sensitivity(1.0).unwrap();
}
