// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Countdown queue for deferred scene actions.
//!
//! The scene runs on a single-threaded cooperative loop with no ambient
//! clock, so deferred work ("reset the expression in five seconds") is
//! modelled as countdown entries driven by the host's frame callback:
//! [`DeferredQueue::tick`] is called with the elapsed milliseconds since the
//! previous frame and returns the actions whose countdown reached zero.
//!
//! Every scheduled entry is addressed by a [`TimerToken`], so owners can
//! cancel individual entries or drop the whole queue when the state they
//! refer to goes away.

use smallvec::SmallVec;

/// Handle to one scheduled entry in a [`DeferredQueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Entry<K> {
    token: TimerToken,
    remaining_ms: u64,
    kind: K,
}

/// Token-addressed countdown timers, fired by [`DeferredQueue::tick`].
///
/// `K` identifies the action to perform when an entry expires; it is
/// returned from `tick` rather than invoked, so the owner acts on it without
/// re-borrowing issues. An entry scheduled with a zero delay fires on the
/// very next tick.
#[derive(Debug)]
pub struct DeferredQueue<K> {
    entries: SmallVec<[Entry<K>; 2]>,
    next_token: u64,
}

impl<K> Default for DeferredQueue<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
            next_token: 0,
        }
    }
}

impl<K: Copy> DeferredQueue<K> {
    /// Schedules `kind` to fire once `delay_ms` milliseconds have elapsed.
    pub fn schedule(&mut self, delay_ms: u64, kind: K) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(Entry {
            token,
            remaining_ms: delay_ms,
            kind,
        });
        token
    }

    /// Cancels the entry behind `token`.
    ///
    /// Returns `false` when the entry already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.token != token);
        self.entries.len() != before
    }

    /// Cancels every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advances all countdowns by `delta_ms` and returns the expired actions
    /// in scheduling order.
    pub fn tick(&mut self, delta_ms: u64) -> SmallVec<[K; 2]> {
        let mut fired = SmallVec::new();
        self.entries.retain(|entry| {
            entry.remaining_ms = entry.remaining_ms.saturating_sub(delta_ms);
            if entry.remaining_ms == 0 {
                fired.push(entry.kind);
                false
            } else {
                true
            }
        });
        fired
    }
}
