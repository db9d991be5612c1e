//! Interpolation primitives shared by every span mode.
//!
//! Component-wise lerp for vectors and colors, quaternion SLERP with
//! shortest-arc correction for rotations.

pub mod functions;

pub use functions::{geometric_lerp, lerp_f32, slerp_quat};
