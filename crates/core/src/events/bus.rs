// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for routing events to subscribers
//!
//! The bus is owned by one runtime instance, never process-global, so
//! completions from an unrelated run cannot cross over into this one.

use super::subscription::{SubscriberId, Subscription};
use crate::event::Event;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Sender for event delivery
pub type EventSender = mpsc::UnboundedSender<Event>;
/// Receiver for event delivery
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Routes published events to matching subscribers
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<SubscriberId, (Subscription, EventSender)>>>,
    /// Receivers of every event regardless of pattern (for logging)
    taps: Arc<RwLock<Vec<EventSender>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            taps: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to events matching the subscription's patterns
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = subscription.id.clone();

        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.insert(id, (subscription, tx));

        rx
    }

    /// Unsubscribe from events
    pub fn unsubscribe(&self, id: &SubscriberId) {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.remove(id);
    }

    /// Receive every published event, regardless of pattern
    pub fn tap(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.taps
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(tx);
        rx
    }

    /// Publish an event to taps and all matching subscribers
    pub fn publish(&self, event: Event) {
        let event_name = event.name();

        {
            let mut taps = self.taps.write().unwrap_or_else(|e| e.into_inner());
            taps.retain(|tx| tx.send(event.clone()).is_ok());
        }

        let subs = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
        for (subscription, tx) in subs.values() {
            if subscription.matches(&event_name) {
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Count of active pattern subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            taps: Arc::clone(&self.taps),
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
