// Copyright 2026 the Panelray Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panelray Repeat: delayed and repeating select-trigger scheduling.
//!
//! Press-and-hold UI elements (sliders, scroll arrows, keyboard keys) want a
//! "select" action that fires once after an initial delay and then keeps
//! firing at a fixed interval until released. This crate provides that
//! policy as a small, deterministic scheduler with no wall clock: time
//! enters exclusively as caller-supplied millisecond timestamps, the same
//! `u64` values that arrive on input events.
//!
//! - [`RepeatPolicy`] describes the cadence: immediate, one-shot delayed,
//!   or delayed-then-repeating.
//! - [`Repeater`] owns pending triggers in a generational arena and hands
//!   out [`TriggerId`] handles. Cancellation is unconditionally safe:
//!   double-cancel, cancel-after-fire, and stale handles are all no-ops.
//! - [`Repeater::poll`] is called once per frame (or whenever convenient)
//!   and returns every trigger that fired since the last poll, catching up
//!   on missed intervals so the cadence stays anchored to the schedule
//!   time.
//!
//! ## Minimal example
//!
//! ```rust
//! use panelray_repeat::{RepeatPolicy, Repeater, Schedule};
//!
//! let mut repeater = Repeater::new();
//!
//! // Hold-to-repeat: first fire after 300ms, then every 100ms.
//! let id = match repeater.schedule(RepeatPolicy::repeating(300, 100), 0) {
//!     Schedule::Pending(id) => id,
//!     Schedule::Immediate => unreachable!("a delayed policy is never immediate"),
//! };
//!
//! assert!(repeater.poll(299).is_empty());
//! assert_eq!(repeater.poll(300), vec![id]);
//! assert_eq!(repeater.poll(400), vec![id]);
//!
//! // Releasing the element cancels the repeat; firing stops immediately.
//! repeater.cancel(id);
//! assert!(repeater.poll(10_000).is_empty());
//! repeater.cancel(id); // idempotent
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Cadence of logical select callbacks produced from one raw trigger.
///
/// - no initial delay: fire exactly once, synchronously;
/// - delay only: fire once after `initial_delay_ms`, cancellable;
/// - delay and interval: fire after `initial_delay_ms`, then every
///   `interval_ms` until cancelled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RepeatPolicy {
    /// Delay before the first fire, in milliseconds. `None` means the
    /// trigger fires synchronously at schedule time.
    pub initial_delay_ms: Option<u64>,
    /// Interval between subsequent fires, in milliseconds. Only meaningful
    /// together with `initial_delay_ms`.
    pub interval_ms: Option<u64>,
}

impl RepeatPolicy {
    /// Fire exactly once, synchronously at schedule time.
    pub const fn immediate() -> Self {
        Self {
            initial_delay_ms: None,
            interval_ms: None,
        }
    }

    /// Fire once after `delay_ms`.
    pub const fn delayed(delay_ms: u64) -> Self {
        Self {
            initial_delay_ms: Some(delay_ms),
            interval_ms: None,
        }
    }

    /// Fire after `delay_ms`, then every `interval_ms` until cancelled.
    pub const fn repeating(delay_ms: u64, interval_ms: u64) -> Self {
        Self {
            initial_delay_ms: Some(delay_ms),
            interval_ms: Some(interval_ms),
        }
    }
}

/// Generational handle for a pending trigger.
///
/// Slots are reused after removal with a bumped generation, so a handle
/// held across its trigger's lifetime can never reach a different trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriggerId(u32, u32);

impl TriggerId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Trigger slots are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of [`Repeater::schedule`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// The policy has no initial delay: the caller fires the action
    /// synchronously, once. Nothing is stored, so there is no handle to
    /// cancel.
    Immediate,
    /// The trigger is pending; it will be reported by [`Repeater::poll`]
    /// until cancelled (one-shots report once and disappear).
    Pending(TriggerId),
}

#[derive(Clone, Debug)]
struct Trigger {
    next_fire_ms: u64,
    interval_ms: Option<u64>,
}

// Generations survive vacancy, so a handle to a cancelled trigger can never
// alias a later occupant of the same slot.
#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    trigger: Option<Trigger>,
}

/// Deterministic trigger scheduler.
///
/// Pending triggers live in a slot arena; firing order within one poll is
/// slot order, which is stable for the lifetime of a trigger.
#[derive(Clone, Debug, Default)]
pub struct Repeater {
    entries: Vec<Slot>,
    free_list: Vec<usize>,
}

impl Repeater {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Schedule a trigger under `policy` at time `now_ms`.
    pub fn schedule(&mut self, policy: RepeatPolicy, now_ms: u64) -> Schedule {
        let Some(delay) = policy.initial_delay_ms else {
            return Schedule::Immediate;
        };
        let trigger = Trigger {
            next_fire_ms: now_ms.saturating_add(delay),
            interval_ms: policy.interval_ms,
        };
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.entries[idx];
            slot.generation += 1;
            slot.trigger = Some(trigger);
            TriggerId::new(idx, slot.generation)
        } else {
            self.entries.push(Slot {
                generation: 1,
                trigger: Some(trigger),
            });
            TriggerId::new(self.entries.len() - 1, 1)
        };
        Schedule::Pending(id)
    }

    /// Report every fire due at or before `now_ms`.
    ///
    /// One-shot triggers are removed after their single fire. Repeating
    /// triggers re-arm at their interval, anchored to the original deadline:
    /// a trigger scheduled at `t=0` with delay 300 and interval 100 fires at
    /// 300, 400, 500, … regardless of poll jitter, appearing once per
    /// elapsed interval in the returned list.
    pub fn poll(&mut self, now_ms: u64) -> Vec<TriggerId> {
        let mut fired = Vec::new();
        for idx in 0..self.entries.len() {
            let slot = &mut self.entries[idx];
            let generation = slot.generation;
            let Some(trigger) = slot.trigger.as_mut() else {
                continue;
            };
            while trigger.next_fire_ms <= now_ms {
                fired.push(TriggerId::new(idx, generation));
                match trigger.interval_ms {
                    Some(interval) => {
                        // interval of 0 would never advance; treat as 1ms.
                        trigger.next_fire_ms = trigger
                            .next_fire_ms
                            .saturating_add(interval.max(1));
                    }
                    None => {
                        slot.trigger = None;
                        self.free_list.push(idx);
                        break;
                    }
                }
            }
        }
        fired
    }

    /// Cancel a pending trigger.
    ///
    /// Safe to call any number of times, with stale handles, or after a
    /// one-shot has already fired; all of those are no-ops.
    pub fn cancel(&mut self, id: TriggerId) {
        if let Some(slot) = self.entries.get_mut(id.idx())
            && slot.generation == id.1
            && slot.trigger.is_some()
        {
            slot.trigger = None;
            self.free_list.push(id.idx());
        }
    }

    /// Whether the trigger is still pending (scheduled and not yet
    /// cancelled or, for one-shots, fired).
    pub fn is_pending(&self, id: TriggerId) -> bool {
        self.entries
            .get(id.idx())
            .is_some_and(|slot| slot.generation == id.1 && slot.trigger.is_some())
    }

    /// Number of pending triggers.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|slot| slot.trigger.is_some())
            .count()
    }

    /// Whether no triggers are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
