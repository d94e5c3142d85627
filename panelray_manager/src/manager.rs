// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction manager: per-slot hover/press tracking and select
//! dispatch.

use alloc::vec::Vec;

use kurbo::Point;
use panelray_ray::Ray;
use panelray_repeat::{Repeater, Schedule, TriggerId};
use panelray_surface::pixel::uv_to_pixel;
use panelray_surface::{SurfaceHit, SurfaceId, SurfaceSet, cast};

use crate::events::{CursorIcon, ElementKind, Event};
use crate::slot::PointerSlot;

/// Resolves canvas pixels to logical elements inside a widget.
///
/// Implemented by the host: the manager knows surfaces and pixels, the host
/// knows what is drawn where. Both methods are consulted on every hover
/// update, so implementations should be cheap lookups, not redraws.
pub trait ElementResolver<W, E> {
    /// The element under `pixel` on `widget`'s canvas, if any.
    fn element_at(&self, widget: W, pixel: Point) -> Option<E>;

    /// Classify an element for select and cursor handling.
    fn kind_of(&self, widget: W, element: &E) -> ElementKind;
}

/// What produced a select trigger.
///
/// Move-sourced triggers are deduplicated against an already-pending repeat
/// for the same element; press-sourced triggers restart it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectSource {
    /// A discrete activation: mouse click, controller trigger.
    Press,
    /// Derived from a pointer move while held.
    Move,
}

/// The element a slot is aimed at, with everything needed to act on it.
#[derive(Clone, Debug)]
struct Target<W, E> {
    surface: SurfaceId,
    widget: W,
    element: E,
    kind: ElementKind,
    pixel: Point,
}

#[derive(Clone, Debug)]
struct PendingRepeat<W, E> {
    id: TriggerId,
    target: Target<W, E>,
}

#[derive(Clone, Debug)]
struct SlotState<W, E> {
    last_hit: Option<SurfaceHit<W>>,
    hovered: Option<Target<W, E>>,
    pressed: bool,
    // Last drag pixel while pressed over a slider/picker; cleared on release.
    scroll: Option<Point>,
    repeat: Option<PendingRepeat<W, E>>,
}

impl<W, E> SlotState<W, E> {
    const fn new() -> Self {
        Self {
            last_hit: None,
            hovered: None,
            pressed: false,
            scroll: None,
            repeat: None,
        }
    }
}

/// Per-pointer interaction state machine.
///
/// One instance serves all three [`PointerSlot`]s. Construct it once next
/// to the [`SurfaceSet`] and feed it input; every method returns the
/// [`Event`]s the input produced, in order.
///
/// `W` is the host's widget handle (small and copyable), `E` its element
/// handle.
#[derive(Debug)]
pub struct InteractionManager<W, E> {
    slots: [SlotState<W, E>; 3],
    repeater: Repeater,
}

impl<W: Copy + PartialEq, E: Clone + PartialEq> Default for InteractionManager<W, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Copy + PartialEq, E: Clone + PartialEq> InteractionManager<W, E> {
    /// Create a manager with all slots idle.
    pub fn new() -> Self {
        Self {
            slots: [SlotState::new(), SlotState::new(), SlotState::new()],
            repeater: Repeater::new(),
        }
    }

    /// Process a pointer update for `slot`.
    ///
    /// `ray` is `None` when the source could not produce one (zero-size
    /// viewport, no pose); that is treated exactly like a ray that missed
    /// everything. Hover transitions report the leave strictly before the
    /// enter, and a repeated hit on the already-hovered element reports
    /// neither — only continuous slider/picker updates while pressed.
    pub fn pointer_moved<R>(
        &mut self,
        slot: PointerSlot,
        ray: Option<&Ray>,
        surfaces: &SurfaceSet<W>,
        resolver: &R,
    ) -> Vec<Event<W, E>>
    where
        R: ElementResolver<W, E>,
    {
        let mut out = Vec::new();
        self.drop_stale(slot, surfaces);

        let state = &mut self.slots[slot.index()];
        let hit = ray.and_then(|r| cast(r, surfaces));
        state.last_hit = hit;
        let target = resolve(hit.as_ref(), surfaces, resolver);

        // Same element as before: no enter/leave, only continuous updates.
        if let (Some(old), Some(new)) = (&mut state.hovered, &target)
            && old.surface == new.surface
            && old.element == new.element
        {
            old.pixel = new.pixel;
            if state.pressed {
                match old.kind {
                    // A move that lands on the same canvas pixel carries no
                    // new information; skip the duplicate value update.
                    ElementKind::Slider | ElementKind::Picker
                        if state.scroll != Some(new.pixel) =>
                    {
                        emit_value(slot, old, surfaces, &mut out);
                        state.scroll = Some(new.pixel);
                    }
                    _ => {}
                }
                // Keep a held repeat aimed at the pointer's latest position.
                if let Some(repeat) = &mut state.repeat
                    && repeat.target.surface == new.surface
                {
                    repeat.target.pixel = new.pixel;
                }
            }
            return out;
        }

        let left = state.hovered.take();
        if let Some(old) = &left {
            out.push(Event::Leave {
                slot,
                widget: old.widget,
                element: old.element.clone(),
            });
            out.push(Event::NeedsRedraw { widget: old.widget });
        }
        match target {
            Some(new) => {
                out.push(Event::Enter {
                    slot,
                    widget: new.widget,
                    element: new.element.clone(),
                    pixel: new.pixel,
                });
                out.push(Event::CursorChange {
                    slot,
                    icon: new.kind.cursor(),
                });
                out.push(Event::NeedsRedraw { widget: new.widget });
                state.hovered = Some(new);
            }
            None => {
                if left.is_some() {
                    out.push(Event::CursorChange {
                        slot,
                        icon: CursorIcon::Default,
                    });
                }
            }
        }
        out
    }

    /// Primary action activated (mouse button down, trigger squeezed).
    ///
    /// Sliders and pickers start their drag here: the value under the
    /// pointer is applied immediately, before any further move arrives.
    pub fn select_start(&mut self, slot: PointerSlot, surfaces: &SurfaceSet<W>) -> Vec<Event<W, E>> {
        let mut out = Vec::new();
        self.drop_stale(slot, surfaces);
        let state = &mut self.slots[slot.index()];
        state.pressed = true;
        if let Some(hovered) = &state.hovered {
            match hovered.kind {
                ElementKind::Slider | ElementKind::Picker => {
                    emit_value(slot, hovered, surfaces, &mut out);
                    state.scroll = Some(hovered.pixel);
                }
                _ => {}
            }
        }
        out
    }

    /// A logical select trigger for whatever `slot` is hovering.
    ///
    /// The hovered surface's repeat policy decides the cadence: with no
    /// initial delay the select fires synchronously in the returned events;
    /// otherwise a trigger is scheduled and fired by [`Self::advance`]. The
    /// trigger snapshots its element now, so dragging off while held keeps
    /// repeating on the originally selected element until release.
    ///
    /// A [`SelectSource::Move`] trigger is ignored when the slot is not
    /// pressed, and deduplicated when a repeat for the same element is
    /// already pending, so held-pointer move streams cannot stack timers.
    pub fn select(
        &mut self,
        slot: PointerSlot,
        source: SelectSource,
        surfaces: &SurfaceSet<W>,
        now_ms: u64,
    ) -> Vec<Event<W, E>> {
        let mut out = Vec::new();
        self.drop_stale(slot, surfaces);
        let state = &mut self.slots[slot.index()];
        let Some(hovered) = &state.hovered else {
            return out;
        };
        if hovered.kind == ElementKind::Unknown {
            return out;
        }
        if source == SelectSource::Move {
            if !state.pressed {
                return out;
            }
            if let Some(repeat) = &state.repeat
                && repeat.target.surface == hovered.surface
                && repeat.target.element == hovered.element
            {
                return out;
            }
        }
        let Some(surface) = surfaces.get(hovered.surface) else {
            return out;
        };
        match self.repeater.schedule(surface.repeat, now_ms) {
            Schedule::Immediate => {
                emit_select(slot, hovered, surfaces, &mut out);
            }
            Schedule::Pending(id) => {
                if let Some(previous) = state.repeat.take() {
                    self.repeater.cancel(previous.id);
                }
                state.repeat = Some(PendingRepeat {
                    id,
                    target: hovered.clone(),
                });
            }
        }
        out
    }

    /// Fire every scheduled select whose deadline has passed.
    ///
    /// Call once per frame with the current timestamp. Triggers whose
    /// surface has been excluded since scheduling are dropped silently.
    pub fn advance(&mut self, now_ms: u64, surfaces: &SurfaceSet<W>) -> Vec<Event<W, E>> {
        let mut out = Vec::new();
        for id in self.repeater.poll(now_ms) {
            let Some(idx) = self
                .slots
                .iter()
                .position(|s| s.repeat.as_ref().is_some_and(|r| r.id == id))
            else {
                continue;
            };
            let slot = PointerSlot::ALL[idx];
            let state = &mut self.slots[idx];
            let Some(repeat) = &state.repeat else {
                continue;
            };
            if !surfaces.contains(repeat.target.surface) {
                if let Some(stale) = state.repeat.take() {
                    self.repeater.cancel(stale.id);
                }
                continue;
            }
            let target = repeat.target.clone();
            emit_select(slot, &target, surfaces, &mut out);
            // One-shot triggers are already gone from the scheduler; drop
            // the slot's handle so a later move-sourced select can
            // reschedule.
            if !self.repeater.is_pending(id) {
                state.repeat = None;
            }
        }
        out
    }

    /// Primary action released.
    ///
    /// `Pressed(e)` returns to `Hovering(e)`; any pending repeat is
    /// cancelled and the drag context cleared. Releasing an already-idle
    /// slot is a no-op.
    pub fn select_end(&mut self, slot: PointerSlot) -> Vec<Event<W, E>> {
        let state = &mut self.slots[slot.index()];
        state.pressed = false;
        state.scroll = None;
        if let Some(repeat) = state.repeat.take() {
            self.repeater.cancel(repeat.id);
        }
        Vec::new()
    }

    /// Whether `slot`'s primary action is currently held.
    pub fn is_pressed(&self, slot: PointerSlot) -> bool {
        self.slots[slot.index()].pressed
    }

    /// The widget and element `slot` is hovering, if any.
    pub fn hovered(&self, slot: PointerSlot) -> Option<(W, &E)> {
        let target = self.slots[slot.index()].hovered.as_ref()?;
        Some((target.widget, &target.element))
    }

    /// The most recent hit for `slot`; `None` when the last cast missed.
    pub fn last_hit(&self, slot: PointerSlot) -> Option<&SurfaceHit<W>> {
        self.slots[slot.index()].last_hit.as_ref()
    }

    // A hovered or repeat-targeted surface that has been excluded since the
    // last update drops the slot to idle without events: the widget is gone,
    // so there is nobody to notify.
    fn drop_stale(&mut self, slot: PointerSlot, surfaces: &SurfaceSet<W>) {
        let state = &mut self.slots[slot.index()];
        if state
            .hovered
            .as_ref()
            .is_some_and(|h| !surfaces.contains(h.surface))
        {
            state.hovered = None;
            state.pressed = false;
            state.scroll = None;
        }
        if state
            .repeat
            .as_ref()
            .is_some_and(|r| !surfaces.contains(r.target.surface))
            && let Some(stale) = state.repeat.take()
        {
            self.repeater.cancel(stale.id);
        }
    }
}

/// Resolve a raw hit to a logical element target.
fn resolve<W, E, R>(
    hit: Option<&SurfaceHit<W>>,
    surfaces: &SurfaceSet<W>,
    resolver: &R,
) -> Option<Target<W, E>>
where
    W: Copy,
    R: ElementResolver<W, E>,
{
    let hit = hit?;
    let surface = surfaces.get(hit.surface)?;
    let pixel = uv_to_pixel(hit.uv, surface.canvas_width, surface.canvas_height);
    let element = resolver.element_at(hit.widget, pixel)?;
    let kind = resolver.kind_of(hit.widget, &element);
    Some(Target {
        surface: hit.surface,
        widget: hit.widget,
        element,
        kind,
        pixel,
    })
}

/// Normalized horizontal track position of `pixel` on its surface.
fn track_position(pixel: Point, canvas_width: f64) -> f64 {
    if canvas_width > 0.0 {
        (pixel.x / canvas_width).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Emit the continuous-update event for a slider or picker target.
fn emit_value<W: Copy, E: Clone>(
    slot: PointerSlot,
    target: &Target<W, E>,
    surfaces: &SurfaceSet<W>,
    out: &mut Vec<Event<W, E>>,
) {
    let Some(surface) = surfaces.get(target.surface) else {
        return;
    };
    match target.kind {
        ElementKind::Slider => {
            out.push(Event::SliderValue {
                slot,
                widget: target.widget,
                element: target.element.clone(),
                position: track_position(target.pixel, surface.canvas_width),
            });
            out.push(Event::NeedsRedraw {
                widget: target.widget,
            });
        }
        ElementKind::Picker => {
            out.push(Event::PickerPoint {
                slot,
                widget: target.widget,
                element: target.element.clone(),
                pixel: target.pixel,
            });
            out.push(Event::NeedsRedraw {
                widget: target.widget,
            });
        }
        _ => {}
    }
}

/// Emit the select events appropriate to the target's kind.
fn emit_select<W: Copy, E: Clone>(
    slot: PointerSlot,
    target: &Target<W, E>,
    surfaces: &SurfaceSet<W>,
    out: &mut Vec<Event<W, E>>,
) {
    match target.kind {
        ElementKind::Button => {
            out.push(Event::Select {
                slot,
                widget: target.widget,
                element: target.element.clone(),
            });
            out.push(Event::NeedsRedraw {
                widget: target.widget,
            });
        }
        ElementKind::Slider | ElementKind::Picker => {
            emit_value(slot, target, surfaces, out);
        }
        ElementKind::TextInput => {
            out.push(Event::KeyboardToggle {
                slot,
                widget: target.widget,
                element: target.element.clone(),
            });
            out.push(Event::NeedsRedraw {
                widget: target.widget,
            });
        }
        ElementKind::Toggle | ElementKind::Folder => {
            out.push(Event::OpenToggle {
                slot,
                widget: target.widget,
                element: target.element.clone(),
            });
            out.push(Event::NeedsRedraw {
                widget: target.widget,
            });
        }
        ElementKind::Unknown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use panelray_ray::{Affine3A, Quad, Vec3};
    use panelray_repeat::RepeatPolicy;
    use panelray_surface::Surface;

    // Widgets are ids, elements are names; the kind is derived from the
    // name. Every 1x1 panel maps to a 100x100 canvas, so a ray offset of
    // +0.1 from the panel center moves the hit pixel by +10.
    struct Panel;

    impl ElementResolver<u32, &'static str> for Panel {
        fn element_at(&self, widget: u32, _pixel: Point) -> Option<&'static str> {
            match widget {
                1 => Some("button"),
                2 => Some("slider"),
                4 => Some("mystery"),
                5 => Some("text"),
                _ => None,
            }
        }

        fn kind_of(&self, _widget: u32, element: &&'static str) -> ElementKind {
            match *element {
                "button" => ElementKind::Button,
                "slider" => ElementKind::Slider,
                "text" => ElementKind::TextInput,
                _ => ElementKind::Unknown,
            }
        }
    }

    fn panel_at(x: f32, widget: u32) -> Surface<u32> {
        Surface::new(
            Quad {
                pose: Affine3A::from_translation(Vec3::new(x, 0.0, -2.0)),
                width: 1.0,
                height: 1.0,
            },
            widget,
            100.0,
            100.0,
        )
    }

    fn aim(x: f32) -> Option<Ray> {
        Ray::new(Vec3::new(x, 0.0, 0.0), Vec3::NEG_Z)
    }

    fn selects(events: &[Event<u32, &'static str>]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, Event::Select { .. }))
            .count()
    }

    fn slider_positions(events: &[Event<u32, &'static str>]) -> Vec<f64> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::SliderValue { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_starts_every_slot_idle() {
        let m: InteractionManager<u32, &'static str> = InteractionManager::default();
        for slot in PointerSlot::ALL {
            assert!(!m.is_pressed(slot));
            assert!(m.hovered(slot).is_none());
            assert!(m.last_hit(slot).is_none());
        }
    }

    #[test]
    fn leave_strictly_precedes_enter_on_hover_change() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1));
        surfaces.include(panel_at(10.0, 2));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        let events = m.pointer_moved(PointerSlot::Mouse, aim(10.0).as_ref(), &surfaces, &Panel);

        let leave = events
            .iter()
            .position(|e| matches!(e, Event::Leave { widget: 1, .. }));
        let enter = events
            .iter()
            .position(|e| matches!(e, Event::Enter { widget: 2, .. }));
        assert!(leave.is_some(), "leave for the old element must be reported");
        assert!(enter.is_some(), "enter for the new element must be reported");
        assert!(leave < enter, "leave must precede enter");
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::Enter { .. } | Event::Leave { .. }))
                .count(),
            2,
            "exactly one leave and one enter"
        );
    }

    #[test]
    fn same_hover_reports_nothing() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        let first = m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        assert!(first.iter().any(|e| matches!(e, Event::Enter { .. })));

        // Still the same element, slightly different pixel.
        let second = m.pointer_moved(PointerSlot::Mouse, aim(0.1).as_ref(), &surfaces, &Panel);
        assert!(second.is_empty());
        assert_eq!(m.hovered(PointerSlot::Mouse), Some((1, &"button")));
    }

    #[test]
    fn enter_sets_kind_cursor_and_leave_resets_it() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 5)); // text input
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        let entered = m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        assert!(entered.contains(&Event::CursorChange {
            slot: PointerSlot::Mouse,
            icon: CursorIcon::Text,
        }));

        let left = m.pointer_moved(PointerSlot::Mouse, aim(10.0).as_ref(), &surfaces, &Panel);
        assert!(left.contains(&Event::CursorChange {
            slot: PointerSlot::Mouse,
            icon: CursorIcon::Default,
        }));
    }

    #[test]
    fn no_ray_is_a_miss() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        let events = m.pointer_moved(PointerSlot::Mouse, None, &surfaces, &Panel);
        assert!(events.iter().any(|e| matches!(e, Event::Leave { .. })));
        assert!(m.hovered(PointerSlot::Mouse).is_none());
        assert!(m.last_hit(PointerSlot::Mouse).is_none());
    }

    #[test]
    fn excluded_surface_drops_slot_to_idle_silently() {
        let mut surfaces = SurfaceSet::new();
        let id = surfaces.include(panel_at(0.0, 1));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.select_start(PointerSlot::Mouse, &surfaces);
        surfaces.exclude(id);

        let events = m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        assert!(
            events.is_empty(),
            "no callback may fire for the removed widget"
        );
        assert!(m.hovered(PointerSlot::Mouse).is_none());
        assert!(!m.is_pressed(PointerSlot::Mouse));
    }

    #[test]
    fn button_click_end_to_end() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        // Hover, hover off, hover again.
        let e1 = m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        assert!(e1.iter().any(|e| matches!(e, Event::Enter { widget: 1, .. })));
        let e2 = m.pointer_moved(PointerSlot::Mouse, aim(10.0).as_ref(), &surfaces, &Panel);
        assert!(e2.iter().any(|e| matches!(e, Event::Leave { widget: 1, .. })));
        let e3 = m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        assert!(e3.iter().any(|e| matches!(e, Event::Enter { widget: 1, .. })));

        // Press, release, click.
        m.select_start(PointerSlot::Mouse, &surfaces);
        assert!(m.is_pressed(PointerSlot::Mouse));
        m.select_end(PointerSlot::Mouse);
        assert!(!m.is_pressed(PointerSlot::Mouse));
        let clicked = m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);
        assert_eq!(selects(&clicked), 1, "the callback fires exactly once");
        assert_eq!(m.hovered(PointerSlot::Mouse), Some((1, &"button")));
    }

    #[test]
    fn slider_updates_continuously_while_pressed_only() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 2));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(-0.4).as_ref(), &surfaces, &Panel);
        let pressed = m.select_start(PointerSlot::Mouse, &surfaces);
        let mut positions = slider_positions(&pressed);
        for x in [-0.2, 0.0, 0.3] {
            let events = m.pointer_moved(PointerSlot::Mouse, aim(x).as_ref(), &surfaces, &Panel);
            positions.extend(slider_positions(&events));
        }

        // Drag from u=0.1 rightwards: monotone with the projected position.
        let expected = [0.1, 0.3, 0.5, 0.8];
        assert_eq!(positions.len(), expected.len());
        for (got, want) in positions.iter().zip(expected) {
            assert!((got - want).abs() < 1e-3, "expected {want}, got {got}");
        }
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // Updates stop immediately after release.
        m.select_end(PointerSlot::Mouse);
        let after = m.pointer_moved(PointerSlot::Mouse, aim(0.4).as_ref(), &surfaces, &Panel);
        assert!(slider_positions(&after).is_empty());
    }

    #[test]
    fn drag_at_same_pixel_is_deduplicated() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 2));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.select_start(PointerSlot::Mouse, &surfaces);
        let first = m.pointer_moved(PointerSlot::Mouse, aim(0.1).as_ref(), &surfaces, &Panel);
        assert_eq!(slider_positions(&first).len(), 1);
        let repeated = m.pointer_moved(PointerSlot::Mouse, aim(0.1).as_ref(), &surfaces, &Panel);
        assert!(slider_positions(&repeated).is_empty());
    }

    #[test]
    fn repeating_policy_fires_on_advance_until_released() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1).with_repeat(RepeatPolicy::repeating(300, 100)));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.select_start(PointerSlot::Mouse, &surfaces);
        let scheduled = m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);
        assert_eq!(selects(&scheduled), 0, "delayed select must not fire now");

        assert_eq!(selects(&m.advance(299, &surfaces)), 0);
        assert_eq!(selects(&m.advance(300, &surfaces)), 1);
        assert_eq!(selects(&m.advance(400, &surfaces)), 1);

        // Release at t=450: nothing at 500 or later.
        m.select_end(PointerSlot::Mouse);
        assert_eq!(selects(&m.advance(500, &surfaces)), 0);
        assert_eq!(selects(&m.advance(10_000, &surfaces)), 0);
    }

    #[test]
    fn move_sourced_select_does_not_stack_triggers() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1).with_repeat(RepeatPolicy::repeating(300, 100)));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.select_start(PointerSlot::Mouse, &surfaces);
        m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);

        // A stream of held-pointer moves re-triggers select with no state
        // change; none of them may restart or duplicate the timer.
        for t in [50, 100, 150] {
            let events = m.select(PointerSlot::Mouse, SelectSource::Move, &surfaces, t);
            assert!(events.is_empty());
        }
        assert_eq!(selects(&m.advance(300, &surfaces)), 1);
        assert_eq!(selects(&m.advance(400, &surfaces)), 1);
        m.select_end(PointerSlot::Mouse);
    }

    #[test]
    fn move_sourced_select_requires_pressed() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        let events = m.select(PointerSlot::Mouse, SelectSource::Move, &surfaces, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn delayed_one_shot_frees_the_slot_after_firing() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1).with_repeat(RepeatPolicy::delayed(200)));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.select_start(PointerSlot::Mouse, &surfaces);
        m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);
        assert_eq!(selects(&m.advance(200, &surfaces)), 1);
        assert_eq!(selects(&m.advance(1_000, &surfaces)), 0);

        // A later press schedules again.
        m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 1_000);
        assert_eq!(selects(&m.advance(1_200, &surfaces)), 1);
    }

    #[test]
    fn held_trigger_keeps_the_captured_element_when_dragged_off() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1).with_repeat(RepeatPolicy::repeating(100, 100)));
        surfaces.include(panel_at(10.0, 2));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.select_start(PointerSlot::Mouse, &surfaces);
        m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);

        // Drag onto the slider while held: hover follows the pointer, but
        // the scheduled select stays aimed at the originally captured button
        // until release.
        m.pointer_moved(PointerSlot::Mouse, aim(10.0).as_ref(), &surfaces, &Panel);
        let fired = m.advance(100, &surfaces);
        assert!(
            fired
                .iter()
                .any(|e| matches!(e, Event::Select { widget: 1, .. })),
            "repeat still fires on the captured button"
        );
        m.select_end(PointerSlot::Mouse);
        assert_eq!(selects(&m.advance(1_000, &surfaces)), 0);
    }

    #[test]
    fn stale_repeat_target_is_dropped_silently() {
        let mut surfaces = SurfaceSet::new();
        let id = surfaces.include(panel_at(0.0, 1).with_repeat(RepeatPolicy::repeating(100, 100)));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.select_start(PointerSlot::Mouse, &surfaces);
        m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);
        surfaces.exclude(id);
        assert!(m.advance(1_000, &surfaces).is_empty());
    }

    #[test]
    fn unknown_kind_ignores_select() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 4)); // "mystery"
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        let entered = m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        assert!(entered.iter().any(|e| matches!(e, Event::Enter { .. })));
        m.select_start(PointerSlot::Mouse, &surfaces);
        let events = m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn text_input_select_toggles_the_keyboard() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 5));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        let events = m.select(PointerSlot::Mouse, SelectSource::Press, &surfaces, 0);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, Event::KeyboardToggle { widget: 5, .. }))
        );
    }

    #[test]
    fn slots_track_hover_independently() {
        let mut surfaces = SurfaceSet::new();
        surfaces.include(panel_at(0.0, 1));
        surfaces.include(panel_at(10.0, 2));
        let mut m: InteractionManager<u32, &'static str> = InteractionManager::new();

        m.pointer_moved(PointerSlot::Mouse, aim(0.0).as_ref(), &surfaces, &Panel);
        m.pointer_moved(PointerSlot::ControllerA, aim(10.0).as_ref(), &surfaces, &Panel);
        assert_eq!(m.hovered(PointerSlot::Mouse), Some((1, &"button")));
        assert_eq!(m.hovered(PointerSlot::ControllerA), Some((2, &"slider")));
        assert!(m.hovered(PointerSlot::ControllerB).is_none());

        // Moving one slot off its panel does not disturb the other.
        m.pointer_moved(PointerSlot::Mouse, None, &surfaces, &Panel);
        assert!(m.hovered(PointerSlot::Mouse).is_none());
        assert_eq!(m.hovered(PointerSlot::ControllerA), Some((2, &"slider")));
    }
}
