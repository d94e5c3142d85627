// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UV to canvas-pixel mapping.
//!
//! Hit testing yields texture coordinates with `v` growing upward, while
//! widget canvases address pixels with `y` growing downward from the top
//! edge. [`uv_to_pixel`] performs the vertical flip and scales by the
//! surface's canvas size.

use kurbo::Point;
use panelray_ray::Uv;

/// Map a texture coordinate to a canvas pixel position.
///
/// `u` and `v` are clamped to `[0, 1]` first, so coordinates from an edge
/// hit (or accumulated float error) always land inside the canvas.
/// The mapping is `x = u * width`, `y = (1 - v) * height`.
pub fn uv_to_pixel(uv: Uv, canvas_width: f64, canvas_height: f64) -> Point {
    let u = f64::from(uv.u).clamp(0.0, 1.0);
    let v = f64::from(uv.v).clamp(0.0, 1.0);
    Point::new(u * canvas_width, (1.0 - v) * canvas_height)
}
