// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panelray Surface: the interactive surface registry and its hit tester.
//!
//! Widgets that want to receive pointer rays register one or more
//! [`Surface`]s — oriented panel quads tagged with visibility flags, the
//! owning widget id, the backing canvas size, and a select-repeat policy.
//! The registry hands out generational [`SurfaceId`]s so stale handles are
//! detectable, and [`cast`] resolves a ray to the nearest *visible*
//! registered surface.
//!
//! A widget may register several surfaces (a backdrop plus individual
//! keys, say); hit testing is surface-granular and the caller resolves
//! widget ownership from the returned [`SurfaceHit`].
//!
//! ## Ordering
//!
//! [`SurfaceSet::include`] inserts at the head, so iteration visits the
//! most recently mounted surface first. This only makes iteration
//! deterministic for debugging and tests; hit priority is purely geometric
//! — the nearest visible intersection along the ray wins, regardless of
//! registration order.
//!
//! ## Minimal example
//!
//! ```rust
//! use panelray_ray::{Affine3A, Quad, Ray, Vec3};
//! use panelray_surface::{Surface, SurfaceSet, cast};
//!
//! let mut set: SurfaceSet<u32> = SurfaceSet::new();
//! let panel = set.include(Surface::new(
//!     Quad {
//!         pose: Affine3A::from_translation(Vec3::new(0.0, 0.0, -2.0)),
//!         width: 2.0,
//!         height: 1.0,
//!     },
//!     7, // widget id
//!     512.0,
//!     256.0,
//! ));
//!
//! let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
//! let hit = cast(&ray, &set).unwrap();
//! assert_eq!(hit.surface, panel);
//! assert_eq!(hit.widget, 7);
//!
//! set.exclude(panel);
//! set.exclude(panel); // idempotent
//! assert!(cast(&ray, &set).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use panelray_ray::{Quad, Ray, RayHit, Uv, Vec3};
use panelray_repeat::RepeatPolicy;
use smallvec::SmallVec;

pub mod pixel;

bitflags::bitflags! {
    /// Surface flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u8 {
        /// Surface is visible. Invisible surfaces are skipped by the hit
        /// tester even when geometrically nearer.
        const VISIBLE  = 0b0000_0001;
        /// Surface participates in hit testing.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for SurfaceFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Identifier for a registered surface (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SurfaceId(u32, u32);

impl SurfaceId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Surface slots are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One registered interactive surface.
///
/// The registry holds these by value but does not own the widget: `W` is a
/// small, copyable handle (an id or key) meaningful to the host.
#[derive(Copy, Clone, Debug)]
pub struct Surface<W> {
    /// Picking geometry in world space.
    pub quad: Quad,
    /// Visibility and picking flags.
    pub flags: SurfaceFlags,
    /// Owning widget handle.
    pub widget: W,
    /// Logical width of the widget's backing canvas, in pixels.
    pub canvas_width: f64,
    /// Logical height of the widget's backing canvas, in pixels.
    pub canvas_height: f64,
    /// Select-repeat cadence for press-and-hold elements on this surface.
    pub repeat: RepeatPolicy,
}

impl<W> Surface<W> {
    /// Build a surface with default flags and an immediate repeat policy.
    pub fn new(quad: Quad, widget: W, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            quad,
            flags: SurfaceFlags::default(),
            widget,
            canvas_width,
            canvas_height,
            repeat: RepeatPolicy::immediate(),
        }
    }

    /// Builder-style flag override.
    pub fn with_flags(mut self, flags: SurfaceFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder-style repeat-policy override.
    pub fn with_repeat(mut self, repeat: RepeatPolicy) -> Self {
        self.repeat = repeat;
        self
    }
}

// Generations survive vacancy, so a handle to an excluded surface can
// never alias a later occupant of the same slot.
#[derive(Clone, Debug)]
struct Entry<W> {
    generation: u32,
    surface: Option<Surface<W>>,
}

/// Ordered registry of interactive surfaces.
///
/// Surfaces are stored in a slot arena; [`SurfaceId`]s are generational so
/// a handle kept across `exclude` can never reach a different surface.
#[derive(Clone, Debug, Default)]
pub struct SurfaceSet<W> {
    entries: Vec<Entry<W>>,
    free_list: Vec<usize>,
    // Iteration order, newest registration first.
    order: Vec<SurfaceId>,
}

impl<W: Copy> SurfaceSet<W> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Register a surface, inserting it at the head of the iteration order.
    pub fn include(&mut self, surface: Surface<W>) -> SurfaceId {
        let id = if let Some(idx) = self.free_list.pop() {
            let entry = &mut self.entries[idx];
            entry.generation += 1;
            entry.surface = Some(surface);
            SurfaceId::new(idx, entry.generation)
        } else {
            self.entries.push(Entry {
                generation: 1,
                surface: Some(surface),
            });
            SurfaceId::new(self.entries.len() - 1, 1)
        };
        self.order.insert(0, id);
        id
    }

    /// Remove a surface. Unknown or stale ids are a no-op (idempotent).
    pub fn exclude(&mut self, id: SurfaceId) {
        let Some(entry) = self.entries.get_mut(id.idx()) else {
            return;
        };
        if entry.generation == id.1 && entry.surface.is_some() {
            entry.surface = None;
            self.free_list.push(id.idx());
            self.order.retain(|o| *o != id);
        }
    }

    /// Whether `id` refers to a live registration.
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.get(id).is_some()
    }

    /// Borrow a registered surface.
    pub fn get(&self, id: SurfaceId) -> Option<&Surface<W>> {
        let entry = self.entries.get(id.idx())?;
        if entry.generation != id.1 {
            return None;
        }
        entry.surface.as_ref()
    }

    /// Mutably borrow a registered surface (to move it, change flags, …).
    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Surface<W>> {
        let entry = self.entries.get_mut(id.idx())?;
        if entry.generation != id.1 {
            return None;
        }
        entry.surface.as_mut()
    }

    /// Iterate registrations, most recently included first.
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &Surface<W>)> {
        self.order
            .iter()
            .filter_map(|id| self.get(*id).map(|s| (*id, s)))
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove all registrations.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list.clear();
        self.order.clear();
    }
}

/// Result of a successful cast against a [`SurfaceSet`].
#[derive(Copy, Clone, Debug)]
pub struct SurfaceHit<W> {
    /// The surface that was hit.
    pub surface: SurfaceId,
    /// The widget owning that surface.
    pub widget: W,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// Texture coordinate of the hit.
    pub uv: Uv,
    /// World-space hit point.
    pub point: Vec3,
}

/// Find the nearest visible, pickable surface intersected by `ray`.
///
/// Every registered quad is intersected; candidates are ordered by distance
/// ascending, and candidates whose surface is not flagged both `VISIBLE`
/// and `PICKABLE` are skipped in favor of the next-nearest rather than
/// aborting the cast. Returns `None` when no visible candidate remains.
pub fn cast<W: Copy>(ray: &Ray, set: &SurfaceSet<W>) -> Option<SurfaceHit<W>> {
    let mut candidates: SmallVec<[(SurfaceId, RayHit); 8]> = SmallVec::new();
    for (id, surface) in set.iter() {
        if let Some(hit) = surface.quad.intersect(ray) {
            candidates.push((id, hit));
        }
    }
    candidates.sort_by(|a, b| {
        a.1.distance
            .partial_cmp(&b.1.distance)
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    for (id, hit) in candidates {
        let surface = set.get(id)?;
        if !surface
            .flags
            .contains(SurfaceFlags::VISIBLE | SurfaceFlags::PICKABLE)
        {
            continue;
        }
        return Some(SurfaceHit {
            surface: id,
            widget: surface.widget,
            distance: hit.distance,
            uv: hit.uv,
            point: hit.point,
        });
    }
    None
}
