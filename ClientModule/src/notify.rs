//! # One-shot Notifications
//!
//! Single-resolution notifications such as "entity instantiated" and "clone
//! loaded". Waiters receive a [`Notification`], a oneshot receiver that can be
//! awaited from async code or polled with `try_recv` from the frame tick.
//!
//! A latch is tied to the lifetime of the object it describes: cancelling it
//! when the object is destroyed closes every pending receiver, so nothing
//! waits on a notification that can no longer fire.

use once_cell::sync::OnceCell;
use tokio::sync::oneshot;

/// Receiving end of a one-shot notification
pub type Notification<T> = oneshot::Receiver<T>;

/// Latch that fires at most once and fans the value out to every subscriber
#[derive(Debug)]
pub struct OneShot<T> {
    value: OnceCell<T>,
    waiters: Vec<oneshot::Sender<T>>,
    cancelled: bool,
}

impl<T: Clone> OneShot<T> {
    pub fn new() -> Self {
        Self {
            value: OnceCell::new(),
            waiters: Vec::new(),
            cancelled: false,
        }
    }

    /// Subscribe to the latch. Resolves immediately if it already fired and
    /// is closed immediately if it was cancelled.
    pub fn subscribe(&mut self) -> Notification<T> {
        let (tx, rx) = oneshot::channel();
        if let Some(value) = self.value.get() {
            let _ = tx.send(value.clone());
        } else if !self.cancelled {
            self.waiters.push(tx);
        }
        rx
    }

    /// Fire the latch. Returns false if it already fired or was cancelled.
    pub fn fire(&mut self, value: T) -> bool {
        if self.cancelled || self.value.set(value).is_err() {
            return false;
        }
        if let Some(value) = self.value.get() {
            for tx in self.waiters.drain(..) {
                // A dropped receiver just means nobody cares any more.
                let _ = tx.send(value.clone());
            }
        }
        true
    }

    /// Close every pending subscriber without a value
    pub fn cancel(&mut self) {
        if self.value.get().is_none() {
            self.cancelled = true;
        }
        self.waiters.clear();
    }

    pub fn is_fired(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn pending(&self) -> usize {
        self.waiters.len()
    }
}

impl<T: Clone> Default for OneShot<T> {
    fn default() -> Self {
        Self::new()
    }
}
