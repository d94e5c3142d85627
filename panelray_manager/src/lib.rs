// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panelray Manager: the per-pointer interaction state machine.
//!
//! This is the top of the Panelray stack. The host feeds it pointer input —
//! screen pointer moves, controller pose polls, press and release — and the
//! manager resolves each input against the registered surfaces, tracks
//! hover/press state per pointer slot, and returns the resulting
//! [`Event`]s: enter/leave, cursor icon changes, select callbacks, slider
//! value updates, redraw requests.
//!
//! ## Model
//!
//! - Three fixed [`PointerSlot`]s: the mouse plus two spatial controllers.
//!   Each slot tracks its own hover target and pressed flag independently.
//!   [`ControllerRoster`] maps controller device identities to slots.
//! - The manager is a pure state machine. It never calls into widgets:
//!   every input method returns a `Vec<Event>` describing what changed, and
//!   [`dispatch`] replays such a list onto a [`WidgetHandler`]. Hosts that
//!   keep their handler elsewhere can consume the events directly.
//! - Widgets expose their interior through an [`ElementResolver`]: given a
//!   canvas pixel, it names the logical element under that pixel and its
//!   [`ElementKind`]. Select semantics are a single exhaustive match on the
//!   kind.
//! - Press-and-hold repeat is driven by [`InteractionManager::advance`],
//!   called once per frame with the current timestamp; cadence comes from
//!   each surface's [`panelray_repeat::RepeatPolicy`].
//!
//! ## Guarantees
//!
//! - For one slot, a hover change always reports the leave strictly before
//!   the enter.
//! - A hit resolving to the element already hovered never re-reports
//!   enter or leave.
//! - A hovered surface excluded from the registry mid-interaction drops the
//!   slot back to idle without producing events for the missing widget.
//! - Unknown element kinds ignore select; malformed rays count as misses.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use panelray_manager::{
//!     ElementKind, ElementResolver, Event, InteractionManager, PointerSlot,
//! };
//! use panelray_ray::{Affine3A, Quad, Ray, Vec3};
//! use panelray_surface::{Surface, SurfaceSet};
//!
//! // One panel that is a single big button.
//! struct OneButton;
//! impl ElementResolver<u32, &'static str> for OneButton {
//!     fn element_at(&self, _widget: u32, _pixel: Point) -> Option<&'static str> {
//!         Some("ok")
//!     }
//!     fn kind_of(&self, _widget: u32, _element: &&'static str) -> ElementKind {
//!         ElementKind::Button
//!     }
//! }
//!
//! let mut surfaces: SurfaceSet<u32> = SurfaceSet::new();
//! surfaces.include(Surface::new(
//!     Quad {
//!         pose: Affine3A::from_translation(Vec3::new(0.0, 0.0, -2.0)),
//!         width: 1.0,
//!         height: 1.0,
//!     },
//!     1,
//!     256.0,
//!     256.0,
//! ));
//!
//! let mut manager: InteractionManager<u32, &'static str> = InteractionManager::new();
//! let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
//! let events = manager.pointer_moved(PointerSlot::Mouse, ray.as_ref(), &surfaces, &OneButton);
//! assert!(matches!(events[0], Event::Enter { element: "ok", .. }));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): allows the numeric dependencies to use the
//!   standard library.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point
//!   math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod events;
mod manager;
mod slot;

pub use events::{CursorIcon, ElementKind, Event, WidgetHandler, dispatch};
pub use manager::{ElementResolver, InteractionManager, SelectSource};
pub use slot::{ControllerRoster, PointerSlot};
