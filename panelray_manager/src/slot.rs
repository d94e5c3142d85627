// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer slots and the controller-to-slot roster.

/// One logical input source tracked independently by the state machine.
///
/// The set is fixed at three: the screen pointer plus two spatial
/// controllers, mirroring what a single-user XR session provides. Hosts
/// with only a mouse simply never touch the controller slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerSlot {
    /// Screen pointer (mouse or touch). Slot 0.
    Mouse,
    /// First spatial controller. Slot 1.
    ControllerA,
    /// Second spatial controller. Slot 2.
    ControllerB,
}

impl PointerSlot {
    /// All slots, in index order.
    pub const ALL: [Self; 3] = [Self::Mouse, Self::ControllerA, Self::ControllerB];

    /// Array index of this slot.
    pub const fn index(self) -> usize {
        match self {
            Self::Mouse => 0,
            Self::ControllerA => 1,
            Self::ControllerB => 2,
        }
    }
}

/// Maps controller device identities to pointer slots.
///
/// `D` is whatever the host uses to identify a controller (an id, a handle).
/// Devices are compared by equality; the first registered device becomes
/// [`PointerSlot::ControllerA`], the second [`PointerSlot::ControllerB`].
/// While no XR session is presenting, every lookup resolves to
/// [`PointerSlot::Mouse`] — desktop mode routes all input through slot 0.
#[derive(Clone, Debug, Default)]
pub struct ControllerRoster<D> {
    presenting: bool,
    devices: [Option<D>; 2],
}

impl<D: PartialEq> ControllerRoster<D> {
    /// An empty, non-presenting roster.
    pub fn new() -> Self {
        Self {
            presenting: false,
            devices: [None, None],
        }
    }

    /// Set whether an XR session is currently presenting.
    pub fn set_presenting(&mut self, presenting: bool) {
        self.presenting = presenting;
    }

    /// Whether an XR session is currently presenting.
    pub fn is_presenting(&self) -> bool {
        self.presenting
    }

    /// Register a controller device, filling slot A then slot B.
    ///
    /// Returns the slot assigned, or `None` when both controller slots are
    /// taken (the fixed three-slot model has no room for a third device) or
    /// the device is already registered.
    pub fn register(&mut self, device: D) -> Option<PointerSlot> {
        if self.devices.iter().flatten().any(|d| *d == device) {
            return None;
        }
        if self.devices[0].is_none() {
            self.devices[0] = Some(device);
            Some(PointerSlot::ControllerA)
        } else if self.devices[1].is_none() {
            self.devices[1] = Some(device);
            Some(PointerSlot::ControllerB)
        } else {
            None
        }
    }

    /// Forget all registered devices.
    pub fn clear(&mut self) {
        self.devices = [None, None];
    }

    /// Resolve the slot an event from `device` belongs to.
    ///
    /// Outside a presenting session, or for an unregistered device, this is
    /// [`PointerSlot::Mouse`].
    pub fn slot_for(&self, device: &D) -> PointerSlot {
        if !self.presenting {
            return PointerSlot::Mouse;
        }
        if self.devices[0].as_ref() == Some(device) {
            PointerSlot::ControllerA
        } else if self.devices[1].as_ref() == Some(device) {
            PointerSlot::ControllerB
        } else {
            PointerSlot::Mouse
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_fills_a_then_b() {
        let mut roster: ControllerRoster<u32> = ControllerRoster::new();
        assert_eq!(roster.register(10), Some(PointerSlot::ControllerA));
        assert_eq!(roster.register(20), Some(PointerSlot::ControllerB));
        assert_eq!(roster.register(30), None);
        // Re-registering an existing device is refused, not reassigned.
        assert_eq!(roster.register(10), None);
    }

    #[test]
    fn lookup_requires_a_presenting_session() {
        let mut roster: ControllerRoster<u32> = ControllerRoster::new();
        roster.register(10);
        assert_eq!(roster.slot_for(&10), PointerSlot::Mouse);
        roster.set_presenting(true);
        assert_eq!(roster.slot_for(&10), PointerSlot::ControllerA);
        assert_eq!(roster.slot_for(&99), PointerSlot::Mouse);
    }

    #[test]
    fn slot_indices_are_stable() {
        assert_eq!(PointerSlot::Mouse.index(), 0);
        assert_eq!(PointerSlot::ControllerA.index(), 1);
        assert_eq!(PointerSlot::ControllerB.index(), 2);
        for (i, slot) in PointerSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }
}
