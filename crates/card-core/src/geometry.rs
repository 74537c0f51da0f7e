use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Plane `normal · p + constant = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -normal.dot(point),
        }
    }

    #[inline]
    pub fn distance_to(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.constant
    }

    /// Where `ray` crosses the plane, if it does so in front of its origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(ray.dir);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = -self.distance_to(ray.origin) / denom;
        (t >= 0.0).then(|| ray.at(t))
    }
}

/// Ray against an oriented box (slab test in box-local space).
///
/// Returns the distance along the ray to the first hit at or in front of the
/// origin; a ray starting inside the box hits at its exit point.
pub fn ray_obb(ray: &Ray, center: Vec3, rotation: Quat, half_extents: Vec3) -> Option<f32> {
    let inv = rotation.inverse();
    let o = inv * (ray.origin - center);
    let d = inv * ray.dir;
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (oa, da, h) = (o[axis], d[axis], half_extents[axis]);
        if da.abs() < 1e-8 {
            if oa.abs() > h {
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
    if t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}
