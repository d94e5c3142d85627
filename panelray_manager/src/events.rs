// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events produced by the interaction state machine, and their dispatch
//! onto a host handler.

use kurbo::Point;

use crate::slot::PointerSlot;

/// The kind of a logical UI element, as reported by the host's
/// [`ElementResolver`](crate::ElementResolver).
///
/// Select semantics are a single exhaustive match on this enum; anything
/// the host cannot classify maps to [`Unknown`](Self::Unknown), which
/// ignores select rather than erroring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Fires a callback once per discrete select.
    Button,
    /// A draggable value track; updates continuously while pressed.
    Slider,
    /// A 2D picker (color field, touch pad); like a slider in both axes.
    Picker,
    /// Select toggles an associated on-screen keyboard.
    TextInput,
    /// Select flips an open/closed boolean.
    Toggle,
    /// Select flips the folder's open/closed state.
    Folder,
    /// Select is a no-op.
    Unknown,
}

impl ElementKind {
    /// The cursor icon shown while hovering an element of this kind.
    pub fn cursor(self) -> CursorIcon {
        match self {
            Self::Button | Self::Picker | Self::Toggle | Self::Folder => CursorIcon::Pointer,
            Self::Slider => CursorIcon::EwResize,
            Self::TextInput => CursorIcon::Text,
            Self::Unknown => CursorIcon::Default,
        }
    }
}

/// Pointer icon requests consumed by the host application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorIcon {
    /// The platform default arrow.
    #[default]
    Default,
    /// Hand/pointer, shown over clickable elements.
    Pointer,
    /// Text caret, shown over text inputs.
    Text,
    /// Horizontal resize, shown over slider tracks.
    EwResize,
}

/// One observable state transition.
///
/// `W` is the host's widget handle, `E` its element handle; both are opaque
/// to the manager. Events carry everything the host needs to react without
/// querying the manager back.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<W, E> {
    /// The slot started hovering `element` on `widget`.
    Enter {
        /// Slot that moved.
        slot: PointerSlot,
        /// Widget owning the hovered surface.
        widget: W,
        /// Element under the pointer.
        element: E,
        /// Canvas pixel of the hit.
        pixel: Point,
    },
    /// The slot stopped hovering `element`. Always precedes the `Enter`
    /// for whatever the slot hovers next.
    Leave {
        /// Slot that moved.
        slot: PointerSlot,
        /// Widget that was being hovered.
        widget: W,
        /// Element that was being hovered.
        element: E,
    },
    /// The host should change the OS pointer icon for this slot.
    CursorChange {
        /// Slot whose icon changed.
        slot: PointerSlot,
        /// Icon to show.
        icon: CursorIcon,
    },
    /// A discrete select on a button-like element.
    Select {
        /// Slot that selected.
        slot: PointerSlot,
        /// Widget owning the element.
        widget: W,
        /// Selected element.
        element: E,
    },
    /// Continuous slider update while pressed. `position` is the pointer's
    /// normalized horizontal position along the track, in `[0, 1]`.
    SliderValue {
        /// Slot dragging the slider.
        slot: PointerSlot,
        /// Widget owning the slider.
        widget: W,
        /// The slider element.
        element: E,
        /// Normalized track position.
        position: f64,
    },
    /// Continuous picker update while pressed, carrying the full canvas
    /// pixel under the pointer.
    PickerPoint {
        /// Slot dragging the picker.
        slot: PointerSlot,
        /// Widget owning the picker.
        widget: W,
        /// The picker element.
        element: E,
        /// Canvas pixel under the pointer.
        pixel: Point,
    },
    /// Select on a text input: show or hide the associated keyboard.
    KeyboardToggle {
        /// Slot that selected.
        slot: PointerSlot,
        /// Widget owning the text input.
        widget: W,
        /// The text-input element.
        element: E,
    },
    /// Select on a toggle or folder: flip its open/checked state.
    OpenToggle {
        /// Slot that selected.
        slot: PointerSlot,
        /// Widget owning the element.
        widget: W,
        /// The toggled element.
        element: E,
    },
    /// The widget's backing canvas must be re-rendered before the next
    /// frame.
    NeedsRedraw {
        /// Widget to redraw.
        widget: W,
    },
}

/// Host-side sink for [`Event`]s.
///
/// Every method has a no-op default, so hosts implement only what they
/// consume. Because the handler is a value passed to [`dispatch`] rather
/// than a callback stored inside the manager, attach and detach are
/// trivially symmetric.
pub trait WidgetHandler<W, E> {
    /// Hover started.
    fn enter(&mut self, slot: PointerSlot, widget: &W, element: &E, pixel: Point) {
        let _ = (slot, widget, element, pixel);
    }
    /// Hover ended.
    fn leave(&mut self, slot: PointerSlot, widget: &W, element: &E) {
        let _ = (slot, widget, element);
    }
    /// Pointer icon request.
    fn cursor(&mut self, slot: PointerSlot, icon: CursorIcon) {
        let _ = (slot, icon);
    }
    /// Discrete select.
    fn select(&mut self, slot: PointerSlot, widget: &W, element: &E) {
        let _ = (slot, widget, element);
    }
    /// Continuous slider position.
    fn slider_value(&mut self, slot: PointerSlot, widget: &W, element: &E, position: f64) {
        let _ = (slot, widget, element, position);
    }
    /// Continuous picker position.
    fn picker_point(&mut self, slot: PointerSlot, widget: &W, element: &E, pixel: Point) {
        let _ = (slot, widget, element, pixel);
    }
    /// Keyboard show/hide request.
    fn keyboard_toggle(&mut self, slot: PointerSlot, widget: &W, element: &E) {
        let _ = (slot, widget, element);
    }
    /// Open/checked flip.
    fn open_toggle(&mut self, slot: PointerSlot, widget: &W, element: &E) {
        let _ = (slot, widget, element);
    }
    /// Redraw request.
    fn needs_redraw(&mut self, widget: &W) {
        let _ = widget;
    }
}

/// Replay an event list onto a handler, in order.
pub fn dispatch<W, E, H: WidgetHandler<W, E>>(events: &[Event<W, E>], handler: &mut H) {
    for event in events {
        match event {
            Event::Enter {
                slot,
                widget,
                element,
                pixel,
            } => handler.enter(*slot, widget, element, *pixel),
            Event::Leave {
                slot,
                widget,
                element,
            } => handler.leave(*slot, widget, element),
            Event::CursorChange { slot, icon } => handler.cursor(*slot, *icon),
            Event::Select {
                slot,
                widget,
                element,
            } => handler.select(*slot, widget, element),
            Event::SliderValue {
                slot,
                widget,
                element,
                position,
            } => handler.slider_value(*slot, widget, element, *position),
            Event::PickerPoint {
                slot,
                widget,
                element,
                pixel,
            } => handler.picker_point(*slot, widget, element, *pixel),
            Event::KeyboardToggle {
                slot,
                widget,
                element,
            } => handler.keyboard_toggle(*slot, widget, element),
            Event::OpenToggle {
                slot,
                widget,
                element,
            } => handler.open_toggle(*slot, widget, element),
            Event::NeedsRedraw { widget } => handler.needs_redraw(widget),
        }
    }
}
