use crate::markers::{MarkerIndex, MarkerRegistry};
use glam::{Quat, Vec3};
use smallvec::SmallVec;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray; `dir` is normalized here so hit distances are world units.
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HitVolume {
    /// Oriented box: `half_extent` along the axes of `rotation`.
    Box {
        center: Vec3,
        half_extent: Vec3,
        rotation: Quat,
    },
    /// The registry only emits boxes; spheres are for hand-built proxy sets
    /// such as test fixtures.
    Sphere { center: Vec3, radius: f32 },
}

impl HitVolume {
    /// Distance along `ray` to the entry point, if the ray enters the volume
    /// in front of its origin.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            HitVolume::Box {
                center,
                half_extent,
                rotation,
            } => ray_obb(ray.origin, ray.dir, center, half_extent, rotation),
            HitVolume::Sphere { center, radius } => ray_sphere(ray.origin, ray.dir, center, radius),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProxyKind {
    Body,
    ClickZone,
}

/// A hit-testable volume owned by exactly one marker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickProxy {
    pub owner: MarkerIndex,
    pub kind: ProxyKind,
    pub volume: HitVolume,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub marker: MarkerIndex,
    pub id: String,
    pub distance: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    /// Hits at or beyond this distance are discarded. Oversized proxies on the
    /// far side of the globe otherwise win over nothing.
    pub max_distance: f32,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: crate::constants::PICK_MAX_DISTANCE,
        }
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Slab test in the box's local frame. Rays starting inside report no hit,
/// matching `ray_sphere`.
#[inline]
pub fn ray_obb(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    half_extent: Vec3,
    rotation: Quat,
) -> Option<f32> {
    let inv = rotation.inverse();
    let o = inv * (ray_origin - center);
    let d = inv * ray_dir;

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (oa, da, h) = (o[axis], d[axis], half_extent[axis]);
        if da.abs() < 1e-8 {
            if oa < -h || oa > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - oa) / da;
        let t2 = (h - oa) / da;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_min > t_max {
            return None;
        }
    }
    (t_min >= 0.0 && t_min.is_finite()).then_some(t_min)
}

#[derive(Debug, Copy, Clone)]
struct RawHit {
    owner: MarkerIndex,
    distance: f32,
}

/// Every hit in front of the ray closer than `max_distance`, in proxy order.
fn filtered_hits<'a>(
    ray: &'a Ray,
    proxies: &'a [PickProxy],
    opts: PickOptions,
) -> impl Iterator<Item = RawHit> + 'a {
    proxies.iter().filter_map(move |proxy| {
        let distance = proxy.volume.intersect(ray)?;
        (distance.is_finite() && distance < opts.max_distance).then_some(RawHit {
            owner: proxy.owner,
            distance,
        })
    })
}

/// Resolve a pointer ray to the single nearest marker.
///
/// Hits are grouped by owning marker (a marker may own several overlapping
/// proxies) keeping each group's minimum distance; the overall minimum wins.
/// Proxies whose owner is not registered are ignored. With identical
/// distances the first group encountered in proxy order wins; this is not
/// stable across proxy orderings.
pub fn pick(
    ray: &Ray,
    proxies: &[PickProxy],
    registry: &MarkerRegistry,
    opts: PickOptions,
) -> Option<PickHit> {
    let mut groups: SmallVec<[RawHit; 8]> = SmallVec::new();
    for hit in filtered_hits(ray, proxies, opts) {
        if registry.get(hit.owner).is_none() {
            log::debug!("[pick] proxy owner {:?} is not registered", hit.owner);
            continue;
        }
        match groups.iter_mut().find(|g| g.owner == hit.owner) {
            Some(group) if hit.distance < group.distance => group.distance = hit.distance,
            Some(_) => {}
            None => groups.push(hit),
        }
    }

    let mut best: Option<RawHit> = None;
    for group in groups {
        match best {
            Some(b) if group.distance >= b.distance => {}
            _ => best = Some(group),
        }
    }

    let best = best?;
    let marker = registry.get(best.owner)?;
    log::debug!("[pick] {} at {:.2}", marker.id(), best.distance);
    Some(PickHit {
        marker: best.owner,
        id: marker.spec.id.clone(),
        distance: best.distance,
    })
}

/// Whether a registered marker lies under the pointer. Only the nearest raw
/// hit matters here, no grouping.
pub fn hover(
    ray: &Ray,
    proxies: &[PickProxy],
    registry: &MarkerRegistry,
    opts: PickOptions,
) -> bool {
    let mut nearest: Option<RawHit> = None;
    for hit in filtered_hits(ray, proxies, opts) {
        match nearest {
            Some(n) if hit.distance >= n.distance => {}
            _ => nearest = Some(hit),
        }
    }
    nearest.is_some_and(|n| registry.get(n.owner).is_some())
}
