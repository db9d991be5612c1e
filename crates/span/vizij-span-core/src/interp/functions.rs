//! Interpolation helpers:
//! - lerp_f32 / per-component linear blend
//! - quaternion SLERP (shortest arc) with NLERP fallback for degenerate arcs
//! - Euler <-> quaternion conversion (XYZ order, radians)
//! - geometric_lerp: kind-aware blend writing into a shared output value

use nalgebra::{Quaternion, UnitQuaternion};

use crate::value::Value;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Returns a normalized quaternion (x,y,z,w).
#[inline]
pub fn nlerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    if dot4(a, b) < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
    }
    normalize4([
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ])
}

#[inline]
fn to_unit(q: [f32; 4]) -> UnitQuaternion<f32> {
    UnitQuaternion::new_normalize(Quaternion::new(q[3], q[0], q[1], q[2]))
}

#[inline]
fn from_unit(q: &UnitQuaternion<f32>) -> [f32; 4] {
    [q.i, q.j, q.k, q.w]
}

/// Spherical linear interpolation between two quaternions (x, y, z, w).
/// Nearly identical inputs, where the arc is undefined, fall back to NLERP.
pub fn slerp_quat(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let qa = to_unit(a);
    let qb = to_unit(b);
    match qa.try_slerp(&qb, t, 1.0e-6) {
        Some(q) => from_unit(&q),
        None => nlerp_quat(from_unit(&qa), from_unit(&qb), t),
    }
}

/// Euler angles (x, y, z radians) to quaternion (x, y, z, w).
#[inline]
pub fn euler_to_quat(e: [f32; 3]) -> [f32; 4] {
    from_unit(&UnitQuaternion::from_euler_angles(e[0], e[1], e[2]))
}

/// Quaternion (x, y, z, w) to Euler angles (x, y, z radians).
#[inline]
pub fn quat_to_euler(q: [f32; 4]) -> [f32; 3] {
    let (roll, pitch, yaw) = to_unit(q).euler_angles();
    [roll, pitch, yaw]
}

/// Per-component linear blend of two equally shaped slices into `out`.
#[inline]
pub fn lerp_components(a: &[f32], b: &[f32], t: f32, out: &mut [f32]) {
    for ((o, a), b) in out.iter_mut().zip(a).zip(b) {
        *o = lerp_f32(*a, *b, t);
    }
}

/// Geometric interpolation across value kinds: linear per component for
/// vectors and colors, spherical for rotations. Writes into `out`; kinds
/// are expected to match (mismatches leave `out` untouched).
pub fn geometric_lerp(a: &Value, b: &Value, t: f32, out: &mut Value) {
    match (a, b, out) {
        (Value::Quat(qa), Value::Quat(qb), Value::Quat(o)) => *o = slerp_quat(*qa, *qb, t),
        (Value::Euler(ea), Value::Euler(eb), Value::Euler(o)) => {
            *o = quat_to_euler(slerp_quat(euler_to_quat(*ea), euler_to_quat(*eb), t));
        }
        (a, b, out) if a.kind() == out.kind() && b.kind() == out.kind() => {
            lerp_components(a.components(), b.components(), t, out.components_mut());
        }
        _ => {}
    }
}
