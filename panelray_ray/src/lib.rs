// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panelray Ray: pointer ray construction and ray/panel intersection.
//!
//! This crate provides the geometry-level primitives for picking textured
//! panels in a 3D scene. It is intentionally decoupled from any particular
//! renderer or scene graph:
//!
//! - [`Ray`] – an origin plus a normalized direction.
//! - [`ScreenRaySource`] – builds rays from screen-space pointer positions
//!   (mouse/touch) through a camera's view and projection matrices.
//! - [`controller_ray`] – builds a ray from a spatial controller pose
//!   (origin at the controller, pointing down its local `-Z` axis).
//! - [`Quad`] – a panel's picking geometry: an oriented rectangle with a
//!   UV parameterization, answering "where did this ray hit me?" queries.
//!
//! # Degenerate input
//!
//! Anomalous input degrades to "no ray" / "no hit" rather than producing
//! NaN: a zero-sized viewport, a singular camera matrix, a zero direction
//! vector, or a zero-sized quad all yield `None`. Callers treat "no ray"
//! identically to "ray missed everything".
//!
//! # Typical usage
//!
//! ```rust
//! use panelray_ray::{Affine3A, Mat4, Quad, ScreenRaySource, Vec2, Vec3};
//!
//! // A camera at the origin looking down -Z, and an 800x600 viewport.
//! let source = ScreenRaySource {
//!     view: Mat4::IDENTITY,
//!     proj: Mat4::perspective_rh(1.0, 800.0 / 600.0, 0.1, 100.0),
//!     viewport: Vec2::new(800.0, 600.0),
//! };
//!
//! // A 2x1 panel two units in front of the camera.
//! let panel = Quad {
//!     pose: Affine3A::from_translation(Vec3::new(0.0, 0.0, -2.0)),
//!     width: 2.0,
//!     height: 1.0,
//! };
//!
//! // The pointer in the middle of the screen hits the middle of the panel.
//! let ray = source.ray_from_screen(400.0, 300.0).unwrap();
//! let hit = panel.intersect(&ray).unwrap();
//! assert!((hit.uv.u - 0.5).abs() < 1e-4);
//! assert!((hit.uv.v - 0.5).abs() < 1e-4);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `glam`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point
//!   math.
//!
//! This crate is `no_std`.

#![no_std]

// Re-exported so downstream crates can name poses, camera matrices, and
// pointer positions without a direct `glam` dependency.
pub use glam::{Affine3A, Mat4, Vec2, Vec3};

/// Tolerance below which a direction component is treated as parallel.
const PARALLEL_EPS: f32 = 1e-6;

/// An origin point plus a normalized direction, used for intersection tests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// World-space starting point of the ray.
    pub origin: Vec3,
    /// World-space direction; unit length by construction.
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `dir`.
    ///
    /// Returns `None` when `dir` is zero or non-finite, so a malformed
    /// input can never propagate into a hit test.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        if !origin.is_finite() {
            return None;
        }
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    /// The point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// A texture-space coordinate on a panel surface.
///
/// `u` runs left to right and `v` bottom to top, both in `[0, 1]` — the 3D
/// texturing convention. Converting to top-left canvas pixels is the job of
/// the pixel mapper in the surface crate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Uv {
    /// Horizontal texture coordinate in `[0, 1]`.
    pub u: f32,
    /// Vertical texture coordinate in `[0, 1]`, origin at the bottom.
    pub v: f32,
}

/// Result of a successful ray/quad intersection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// World-space distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Texture coordinate of the hit on the quad.
    pub uv: Uv,
}

/// Builds rays from screen-space pointer positions through a camera.
///
/// The host updates `view`/`proj`/`viewport` whenever the camera or the
/// render surface changes; there is no hidden global state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenRaySource {
    /// Camera view matrix (world → view).
    pub view: Mat4,
    /// Camera projection matrix (view → clip).
    pub proj: Mat4,
    /// Render surface size in device pixels.
    pub viewport: Vec2,
}

impl ScreenRaySource {
    /// Build a world-space ray through the pointer position `(x, y)`.
    ///
    /// `x`/`y` are device pixels with the origin at the top-left of the
    /// render surface. The ray's origin is the camera position and its
    /// direction passes through the unprojected pointer.
    ///
    /// Returns `None` for a zero-sized viewport or a singular camera
    /// matrix.
    pub fn ray_from_screen(&self, x: f32, y: f32) -> Option<Ray> {
        if !(self.viewport.x > 0.0) || !(self.viewport.y > 0.0) {
            return None;
        }

        // Device pixels → normalized device coordinates in [-1, 1],
        // flipping y from top-left to bottom-left.
        let ndc_x = 2.0 * x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.viewport.y;

        let inv_proj = self.proj.inverse();
        let inv_view = self.view.inverse();
        if !inv_proj.is_finite() || !inv_view.is_finite() {
            return None;
        }

        // Unproject a point on the near plane into view space, then force it
        // onto the camera's forward axis before lifting to world space.
        let eye = inv_proj.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
        let eye = Vec3::new(eye.x, eye.y, -1.0);

        let origin = inv_view.transform_point3(Vec3::ZERO);
        let dir = inv_view.transform_vector3(eye);
        Ray::new(origin, dir)
    }
}

/// Build a ray from a spatial controller's world pose.
///
/// The origin is the pose translation and the direction is the local
/// forward axis `(0, 0, -1)` rotated into world space. Normalization strips
/// any uniform scale carried by the pose; only the rotation component
/// matters for aiming.
pub fn controller_ray(pose: &Affine3A) -> Option<Ray> {
    let origin = Vec3::from(pose.translation);
    let dir = pose.transform_vector3(Vec3::NEG_Z);
    Ray::new(origin, dir)
}

/// A panel's picking geometry: an oriented rectangle in world space.
///
/// The quad lives in the `z = 0` plane of its pose's local space, centered
/// on the local origin, facing local `+Z`. `width` spans local `x`,
/// `height` spans local `y`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    /// Local → world transform of the panel.
    pub pose: Affine3A,
    /// Panel extent along its local x axis, in world units.
    pub width: f32,
    /// Panel extent along its local y axis, in world units.
    pub height: f32,
}

impl Quad {
    /// Intersect a world-space ray with this quad.
    ///
    /// Misses (`None`) when the ray is parallel to the panel plane, the
    /// intersection lies behind the ray origin, the hit point falls outside
    /// the panel rectangle, or the quad/pose is degenerate.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return None;
        }
        let inv = self.pose.inverse();
        if !inv.is_finite() {
            return None;
        }

        // Work in the panel's local space, where the plane is z = 0.
        let o = inv.transform_point3(ray.origin);
        let d = inv.transform_vector3(ray.dir);
        if d.z.abs() <= PARALLEL_EPS {
            return None;
        }
        let t = -o.z / d.z;
        if t <= 0.0 {
            return None;
        }

        let local = o + d * t;
        let hx = self.width * 0.5;
        let hy = self.height * 0.5;
        if local.x < -hx || local.x > hx || local.y < -hy || local.y > hy {
            return None;
        }

        let uv = Uv {
            u: local.x / self.width + 0.5,
            v: local.y / self.height + 0.5,
        };
        let point = self.pose.transform_point3(local);
        // Distance in world units so hits on differently scaled panels
        // compare correctly.
        let distance = (point - ray.origin).length();
        Some(RayHit {
            distance,
            point,
            uv,
        })
    }
}
