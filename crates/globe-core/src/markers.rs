//! Project markers: placement on the globe, idle animation and hit proxies.
//!
//! Markers live in an arena (`Vec<Marker>`) addressed by [`MarkerIndex`];
//! picking and the camera refer to them by index or id, never by owning a copy.

use crate::config::{validate_markers, MarkerSpec};
use crate::constants::*;
use crate::error::Result;
use crate::picking::{HitVolume, PickProxy, ProxyKind};
use crate::projection::project;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat3, Quat, Vec3};
use std::f64::consts::TAU;

/// Arena index of a registered marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerIndex(pub u32);

impl MarkerIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Float offset and emissive intensity for one marker at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub float_offset: f32,
    pub emissive: f32,
}

/// Periodic idle animation. `phase_index` shifts each marker so they do not
/// bob in lockstep. Float offset stays within ±`MARKER_FLOAT_AMPLITUDE`,
/// emissive within `base_emissive ± MARKER_EMISSIVE_AMPLITUDE`.
pub fn pulsation(t: f64, phase_index: u32, base_emissive: f32) -> Pulse {
    let phase = phase_index as f64;
    let float_arg = (MARKER_FLOAT_RATE as f64 * t + phase) % TAU;
    let emissive_arg = (MARKER_EMISSIVE_RATE as f64 * t + phase) % TAU;
    Pulse {
        float_offset: (float_arg as f32).sin() * MARKER_FLOAT_AMPLITUDE,
        emissive: base_emissive + (emissive_arg as f32).sin() * MARKER_EMISSIVE_AMPLITUDE,
    }
}

/// Rotation taking local +Z to `dir`, keeping local +Y as close to world +Y
/// as possible. Falls back to +Z as the up hint at the poles.
pub fn look_at_rotation(dir: Vec3) -> Quat {
    let z = dir.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let up = if z.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub spec: MarkerSpec,
    pub phase_index: u32,
    /// Resting position in globe-local space, just outside the surface.
    pub base_position: Vec3,
    pub base_orientation: Quat,
    /// Current animated transform in globe-local space.
    pub position: Vec3,
    pub orientation: Quat,
    pub emissive: f32,
    pub scale: f32,
    feedback_until: Option<f64>,
}

impl Marker {
    fn initial_emissive(&self) -> f32 {
        if self.spec.wireframe {
            MARKER_EMISSIVE_WIREFRAME
        } else {
            MARKER_EMISSIVE_BASE
        }
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    /// Advance float, emissive pulse, tumble and click feedback to time `t`.
    pub fn update_pulsation(&mut self, t: f64) {
        let pulse = pulsation(t, self.phase_index, MARKER_EMISSIVE_BASE);
        self.position = self.base_position * (1.0 + pulse.float_offset);
        self.emissive = pulse.emissive;

        let [rx, ry, rz] = MARKER_TUMBLE_RATES;
        let angle = |rate: f32| ((rate as f64 * t) % TAU) as f32;
        self.orientation = self.base_orientation
            * Quat::from_euler(EulerRot::XYZ, angle(rx), angle(ry), angle(rz));

        match self.feedback_until {
            Some(until) if t < until => {}
            Some(_) => {
                self.feedback_until = None;
                self.scale = 1.0;
            }
            None => {}
        }
    }

    pub fn start_feedback(&mut self, scale: f32, until: f64) {
        self.scale = scale;
        self.feedback_until = Some(until);
    }

    /// Current world-space position given the globe's spin.
    #[inline]
    pub fn world_position(&self, globe_rotation: Quat) -> Vec3 {
        globe_rotation * self.position
    }
}

/// Owner of every marker in the session. Size is fixed after startup.
#[derive(Clone, Debug)]
pub struct MarkerRegistry {
    globe_radius: f32,
    markers: Vec<Marker>,
    by_id: FnvHashMap<String, MarkerIndex>,
}

impl MarkerRegistry {
    pub fn new(globe_radius: f32) -> Self {
        Self {
            globe_radius,
            markers: Vec::new(),
            by_id: FnvHashMap::default(),
        }
    }

    /// Validate a startup marker set and register all of it.
    pub fn from_specs(globe_radius: f32, specs: &[MarkerSpec]) -> Result<Self> {
        validate_markers(specs)?;
        let mut registry = Self::new(globe_radius);
        for spec in specs {
            registry.register(spec.clone());
        }
        log::info!("[markers] registered {} markers", registry.len());
        Ok(registry)
    }

    /// Place a marker so its centre sits half its size above the surface, facing
    /// away from the globe centre.
    pub fn register(&mut self, spec: MarkerSpec) -> MarkerIndex {
        let index = MarkerIndex(self.markers.len() as u32);
        let base_position = project(spec.lat, spec.lng, self.globe_radius + spec.size / 2.0);
        let base_orientation = look_at_rotation(base_position);
        let mut marker = Marker {
            phase_index: index.0,
            base_position,
            base_orientation,
            position: base_position,
            orientation: base_orientation,
            emissive: 0.0,
            scale: 1.0,
            feedback_until: None,
            spec,
        };
        marker.emissive = marker.initial_emissive();
        log::debug!(
            "[markers] {} at ({:.1}, {:.1}) -> ({:.2},{:.2},{:.2})",
            marker.spec.id,
            marker.spec.lat,
            marker.spec.lng,
            base_position.x,
            base_position.y,
            base_position.z
        );
        self.by_id.insert(marker.spec.id.clone(), index);
        self.markers.push(marker);
        index
    }

    pub fn globe_radius(&self) -> f32 {
        self.globe_radius
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: MarkerIndex) -> Option<&Marker> {
        self.markers.get(index.index())
    }

    pub fn get_mut(&mut self, index: MarkerIndex) -> Option<&mut Marker> {
        self.markers.get_mut(index.index())
    }

    pub fn index_of(&self, id: &str) -> Option<MarkerIndex> {
        self.by_id.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MarkerIndex, &Marker)> {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, m)| (MarkerIndex(i as u32), m))
    }

    pub fn update_pulsation(&mut self, t: f64) {
        for marker in &mut self.markers {
            marker.update_pulsation(t);
        }
    }

    /// Hit proxies in world space: every marker's visible box, plus a slightly
    /// larger invisible box around wireframe markers so thin edges are easy to hit.
    pub fn proxies(&self, globe_rotation: Quat) -> Vec<PickProxy> {
        let mut out = Vec::with_capacity(self.markers.len() * 2);
        for (owner, marker) in self.iter() {
            let center = marker.world_position(globe_rotation);
            let rotation = globe_rotation * marker.orientation;
            let half = marker.spec.size * marker.scale * 0.5;
            out.push(PickProxy {
                owner,
                kind: ProxyKind::Body,
                volume: HitVolume::Box {
                    center,
                    half_extent: Vec3::splat(half),
                    rotation,
                },
            });
            if marker.spec.wireframe {
                out.push(PickProxy {
                    owner,
                    kind: ProxyKind::ClickZone,
                    volume: HitVolume::Box {
                        center,
                        half_extent: Vec3::splat(half * CLICK_ZONE_SCALE),
                        rotation,
                    },
                });
            }
        }
        out
    }
}
