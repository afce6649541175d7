// Host-side tests for marker placement, idle animation and proxies.

use globe_core::markers::{look_at_rotation, pulsation};
use globe_core::picking::{HitVolume, ProxyKind};
use globe_core::{
    default_markers, project, GlobeError, MarkerIndex, MarkerRegistry, MarkerSpec,
    MARKER_EMISSIVE_BASE, MARKER_EMISSIVE_WIREFRAME,
};
use glam::{Quat, Vec3};

#[test]
fn markers_sit_half_their_size_above_the_surface() {
    let registry = MarkerRegistry::from_specs(5.0, &default_markers()).unwrap();
    assert_eq!(registry.len(), 4);
    for (_, m) in registry.iter() {
        let expected = project(m.spec.lat, m.spec.lng, 5.0 + m.spec.size / 2.0);
        assert!((m.base_position - expected).length() < 1e-5);
        assert!((m.base_position.length() - (5.0 + m.spec.size / 2.0)).abs() < 1e-4);
    }
}

#[test]
fn markers_face_away_from_the_centre() {
    let registry = MarkerRegistry::from_specs(5.0, &default_markers()).unwrap();
    for (_, m) in registry.iter() {
        let facing = m.base_orientation * Vec3::Z;
        assert!((facing - m.base_position.normalize()).length() < 1e-4);
    }
}

#[test]
fn look_at_handles_the_poles() {
    let q = look_at_rotation(Vec3::Y);
    assert!((q * Vec3::Z - Vec3::Y).length() < 1e-4);
    let q = look_at_rotation(-Vec3::Y * 3.0);
    assert!((q * Vec3::Z + Vec3::Y).length() < 1e-4);
    assert_eq!(look_at_rotation(Vec3::ZERO), Quat::IDENTITY);
}

#[test]
fn pulsation_is_bounded_and_deterministic() {
    for phase in 0..4 {
        for step in 0..2000 {
            let t = step as f64 * 0.037;
            let p = pulsation(t, phase, 0.3);
            assert!(p.float_offset.abs() <= 0.02 + 1e-6);
            assert!(p.emissive >= 0.1 - 1e-6 && p.emissive <= 0.5 + 1e-6);
            assert_eq!(p, pulsation(t, phase, 0.3));
        }
    }
}

#[test]
fn phase_index_desynchronizes_markers() {
    let a = pulsation(1.0, 0, 0.3);
    let b = pulsation(1.0, 1, 0.3);
    assert_ne!(a.float_offset, b.float_offset);
}

#[test]
fn update_moves_markers_radially_only() {
    let mut registry = MarkerRegistry::from_specs(5.0, &default_markers()).unwrap();
    registry.update_pulsation(0.8);
    for (_, m) in registry.iter() {
        let dir_now = m.position.normalize();
        let dir_base = m.base_position.normalize();
        assert!((dir_now - dir_base).length() < 1e-5);
        let ratio = m.position.length() / m.base_position.length();
        assert!((ratio - 1.0).abs() <= 0.02 + 1e-5);
    }
}

#[test]
fn emissive_starts_by_style_then_pulses_around_one_base() {
    let specs = vec![
        MarkerSpec::new("wire", "Wire", 0.0, 0.0, 0xffffff, 0.2),
        MarkerSpec::new("solid", "Solid", 0.0, 90.0, 0xffffff, 0.2).solid(),
    ];
    let mut registry = MarkerRegistry::from_specs(5.0, &specs).unwrap();
    assert_eq!(registry.get(MarkerIndex(0)).unwrap().emissive, MARKER_EMISSIVE_WIREFRAME);
    assert_eq!(registry.get(MarkerIndex(1)).unwrap().emissive, MARKER_EMISSIVE_BASE);

    for step in 0..500 {
        let t = step as f64 * 0.021;
        registry.update_pulsation(t);
        for (_, m) in registry.iter() {
            let expected = pulsation(t, m.phase_index, MARKER_EMISSIVE_BASE).emissive;
            assert_eq!(m.emissive, expected);
            assert!(m.emissive >= 0.1 - 1e-6 && m.emissive <= 0.5 + 1e-6);
        }
    }
}

#[test]
fn click_feedback_expires() {
    let mut registry = MarkerRegistry::from_specs(5.0, &default_markers()).unwrap();
    let idx = registry.index_of("Project-2").unwrap();
    registry.get_mut(idx).unwrap().start_feedback(1.5, 1.3);
    registry.update_pulsation(1.0);
    assert_eq!(registry.get(idx).unwrap().scale, 1.5);
    registry.update_pulsation(1.31);
    assert_eq!(registry.get(idx).unwrap().scale, 1.0);
}

#[test]
fn wireframe_markers_get_an_enlarged_click_zone() {
    let specs = vec![
        MarkerSpec::new("wire", "Wire", 0.0, 0.0, 0xffffff, 0.2),
        MarkerSpec::new("solid", "Solid", 0.0, 90.0, 0xffffff, 0.2).solid(),
    ];
    let registry = MarkerRegistry::from_specs(5.0, &specs).unwrap();
    let proxies = registry.proxies(Quat::IDENTITY);
    assert_eq!(proxies.len(), 3);
    let wire: Vec<_> = proxies.iter().filter(|p| p.owner == MarkerIndex(0)).collect();
    assert_eq!(wire.len(), 2);
    let half = |kind| {
        wire.iter()
            .find(|p| p.kind == kind)
            .map(|p| match p.volume {
                HitVolume::Box { half_extent, .. } => half_extent.x,
                HitVolume::Sphere { radius, .. } => radius,
            })
            .unwrap()
    };
    assert!((half(ProxyKind::Body) - 0.1).abs() < 1e-6);
    assert!((half(ProxyKind::ClickZone) - 0.105).abs() < 1e-6);
}

#[test]
fn proxies_follow_globe_rotation() {
    let registry = MarkerRegistry::from_specs(5.0, &default_markers()).unwrap();
    let spin = Quat::from_rotation_y(0.7);
    for proxy in registry.proxies(spin) {
        let m = registry.get(proxy.owner).unwrap();
        if let HitVolume::Box { center, .. } = proxy.volume {
            assert!((center - spin * m.position).length() < 1e-5);
        }
    }
}

#[test]
fn ids_resolve_to_indices() {
    let registry = MarkerRegistry::from_specs(5.0, &default_markers()).unwrap();
    assert_eq!(registry.index_of("Project-1"), Some(MarkerIndex(0)));
    assert_eq!(registry.index_of("Project-4"), Some(MarkerIndex(3)));
    assert_eq!(registry.index_of("nope"), None);
    assert!(registry.get(MarkerIndex(4)).is_none());
}

#[test]
fn duplicate_ids_are_rejected_at_load() {
    let mut specs = default_markers();
    specs.push(MarkerSpec::new("Project-2", "Again", 0.0, 0.0, 0xffffff, 0.2));
    let err = MarkerRegistry::from_specs(5.0, &specs).unwrap_err();
    assert_eq!(err, GlobeError::DuplicateMarkerId("Project-2".into()));
}

#[test]
fn non_positive_sizes_are_rejected_at_load() {
    let specs = vec![MarkerSpec::new("tiny", "Tiny", 0.0, 0.0, 0xffffff, 0.0)];
    assert!(matches!(
        MarkerRegistry::from_specs(5.0, &specs),
        Err(GlobeError::InvalidMarkerSize { .. })
    ));
}
