// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A complete pointer-to-panel interaction round trip.
//!
//! This example shows how to combine:
//! - `panelray_ray` for building rays from a screen pointer and a
//!   controller pose,
//! - `panelray_surface` for registering panel quads and hit testing,
//! - `panelray_manager` for hover/press tracking and select dispatch.
//!
//! Run:
//! - `cargo run -p panelray_demos --example pointer_panel`

use kurbo::Point;
use panelray_manager::{
    ControllerRoster, CursorIcon, ElementKind, ElementResolver, InteractionManager, PointerSlot,
    SelectSource, WidgetHandler, dispatch,
};
use panelray_ray::{Affine3A, Mat4, Quad, ScreenRaySource, Vec2, Vec3, controller_ray};
use panelray_repeat::RepeatPolicy;
use panelray_surface::{Surface, SurfaceSet};

/// Widget ids for the two panels in the scene.
const CONTROLS: u32 = 1;
const VOLUME: u32 = 2;

/// The controls panel is a row of named buttons; the volume panel is one
/// big slider track.
struct Layout;

impl ElementResolver<u32, &'static str> for Layout {
    fn element_at(&self, widget: u32, pixel: Point) -> Option<&'static str> {
        match widget {
            CONTROLS => {
                if pixel.y > 96.0 {
                    // Below the button row.
                    return None;
                }
                match pixel.x as u32 / 64 {
                    0 => Some("play"),
                    1 => Some("stop"),
                    2 => Some("loop"),
                    _ => None,
                }
            }
            VOLUME => Some("volume"),
            _ => None,
        }
    }

    fn kind_of(&self, _widget: u32, element: &&'static str) -> ElementKind {
        match *element {
            "loop" => ElementKind::Toggle,
            "volume" => ElementKind::Slider,
            _ => ElementKind::Button,
        }
    }
}

/// Prints every event it receives.
struct Printer;

impl WidgetHandler<u32, &'static str> for Printer {
    fn enter(&mut self, slot: PointerSlot, widget: &u32, element: &&'static str, pixel: Point) {
        println!("{slot:?}: enter {element} on widget {widget} at {pixel:?}");
    }
    fn leave(&mut self, slot: PointerSlot, widget: &u32, element: &&'static str) {
        println!("{slot:?}: leave {element} on widget {widget}");
    }
    fn cursor(&mut self, slot: PointerSlot, icon: CursorIcon) {
        println!("{slot:?}: cursor -> {icon:?}");
    }
    fn select(&mut self, slot: PointerSlot, widget: &u32, element: &&'static str) {
        println!("{slot:?}: select {element} on widget {widget}");
    }
    fn slider_value(&mut self, slot: PointerSlot, _widget: &u32, element: &&'static str, position: f64) {
        println!("{slot:?}: {element} -> {position:.2}");
    }
    fn open_toggle(&mut self, slot: PointerSlot, _widget: &u32, element: &&'static str) {
        println!("{slot:?}: toggle {element}");
    }
    fn needs_redraw(&mut self, widget: &u32) {
        println!("       redraw widget {widget}");
    }
}

fn main() {
    // Two panels facing the camera: controls dead ahead, volume to the right.
    let mut surfaces: SurfaceSet<u32> = SurfaceSet::new();
    surfaces.include(Surface::new(
        Quad {
            pose: Affine3A::from_translation(Vec3::new(0.0, 1.5, -2.0)),
            width: 0.6,
            height: 0.4,
        },
        CONTROLS,
        192.0,
        128.0,
    ));
    surfaces.include(
        Surface::new(
            Quad {
                pose: Affine3A::from_translation(Vec3::new(1.0, 1.5, -2.0)),
                width: 0.6,
                height: 0.2,
            },
            VOLUME,
            256.0,
            64.0,
        )
        // Hold-to-repeat: first fire after 300ms, then every 100ms.
        .with_repeat(RepeatPolicy::repeating(300, 100)),
    );

    let mut manager: InteractionManager<u32, &'static str> = InteractionManager::new();
    let mut printer = Printer;

    // A camera at the panels' height, looking down -Z over an 800x600
    // viewport.
    let camera = ScreenRaySource {
        view: Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0)).inverse(),
        proj: Mat4::perspective_rh(60_f32.to_radians(), 800.0 / 600.0, 0.1, 100.0),
        viewport: Vec2::new(800.0, 600.0),
    };

    println!("-- mouse sweeps across the controls panel --");
    for x in [350.0, 400.0, 450.0] {
        let ray = camera.ray_from_screen(x, 300.0);
        let events = manager.pointer_moved(PointerSlot::Mouse, ray.as_ref(), &surfaces, &Layout);
        dispatch(&events, &mut printer);
    }

    println!("-- mouse clicks whatever it ended up on --");
    dispatch(&manager.select_start(PointerSlot::Mouse, &surfaces), &mut printer);
    dispatch(&manager.select_end(PointerSlot::Mouse), &mut printer);
    let events = manager.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);
    dispatch(&events, &mut printer);

    println!("-- a controller aims at the volume slider and holds --");
    let mut roster: ControllerRoster<&'static str> = ControllerRoster::new();
    roster.set_presenting(true);
    roster.register("right-hand");
    let slot = roster.slot_for(&"right-hand");

    let pose = Affine3A::from_translation(Vec3::new(1.0, 1.5, 0.0));
    let ray = controller_ray(&pose);
    dispatch(
        &manager.pointer_moved(slot, ray.as_ref(), &surfaces, &Layout),
        &mut printer,
    );
    dispatch(&manager.select_start(slot, &surfaces), &mut printer);
    dispatch(&manager.select(slot, SelectSource::Press, &surfaces, 0), &mut printer);

    // Frame loop: the repeat fires at 300ms and then every 100ms.
    for now_ms in (0..=600).step_by(100) {
        let events = manager.advance(now_ms, &surfaces);
        if !events.is_empty() {
            println!("t={now_ms}ms");
            dispatch(&events, &mut printer);
        }
    }
    dispatch(&manager.select_end(slot), &mut printer);
}
