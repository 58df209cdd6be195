//! Cross-component notification.
//!
//! Page state lives in explicit context objects constructed once at startup
//! and passed by reference to whoever needs them. Components that care
//! about state changes subscribe to a shared [`EventBus`]; a notification
//! is a synchronous fan-out in the emitter's own thread of execution, in
//! registration order.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::lang::Locale;
use crate::responsive::DeviceClass;
use crate::screen::DeviceKind;

new_key_type! {
    /// Handle returned by `subscribe`; pass it back to unsubscribe.
    pub struct SubscriptionId;
}

/// A synchronous publisher. Listeners run in registration order; there is
/// no guarantee beyond that.
pub struct Publisher<E> {
    listeners: SlotMap<SubscriptionId, Box<dyn Fn(&E)>>,
}

impl<E> Default for Publisher<E> {
    fn default() -> Self {
        Self {
            listeners: SlotMap::with_key(),
        }
    }
}

impl<E> Publisher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&E) + 'static) -> SubscriptionId {
        self.listeners.insert(Box::new(listener))
    }

    /// Removes a listener. Returns `false` when the handle was already
    /// unsubscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn emit(&self, event: &E) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Everything the page broadcasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    LocaleChanged {
        locale: Locale,
    },
    DeviceChanged {
        kind: DeviceKind,
        class: DeviceClass,
    },
    PuzzleSolved {
        attempts: u32,
        solve_secs: u64,
    },
}

/// Shared, cheaply clonable handle to the page-wide [`Publisher`].
///
/// Dispatch borrows the listener table, so listeners must not subscribe or
/// unsubscribe from inside a notification.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Publisher<PageEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&PageEvent) + 'static) -> SubscriptionId {
        self.inner.borrow_mut().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().unsubscribe(id)
    }

    pub fn emit(&self, event: PageEvent) {
        self.inner.borrow().emit(&event);
    }
}
