// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Manages a generic event channel between the host and the dialog.
///
/// The host keeps a clone of the [`sender`](EventBus::sender); the owner of the
/// bus drains the [`receiver`](EventBus::receiver) whenever it gets control back.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Creates a new EventBus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("EventBus initialized.");
        Self { sender, receiver }
    }

    /// Sends an event, logging an error if the receiver is gone.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing an event.");

        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end, for the host to publish with.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns the receiver end. Intended for the owner of the bus.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every pending event without blocking, in publication order.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributePath;
    use crate::event::HostEvent;
    use flume::{SendError, TryRecvError};

    #[test]
    fn event_bus_starts_empty() {
        let bus = EventBus::<HostEvent>::new();
        assert!(bus.receiver().is_empty());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let bus = EventBus::<HostEvent>::new();
        let sender = bus.sender();
        let changed = HostEvent::AttributeChanged(AttributePath::new("persp", "fStop"));

        sender.send(changed.clone()).expect("Send 1 should succeed");
        bus.publish(HostEvent::SceneOpened);
        sender
            .send(HostEvent::VisibleLayerChanged {
                layer: "beauty".to_string(),
            })
            .expect("Send 3 should succeed");

        let events = bus.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], changed);
        assert_eq!(events[1], HostEvent::SceneOpened);
        assert_eq!(bus.receiver().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn send_error_on_bus_drop() {
        let bus = EventBus::<HostEvent>::new();
        let sender = bus.sender();
        drop(bus);

        match sender.send(HostEvent::SelectionChanged) {
            Err(SendError(_)) => {}
            Ok(()) => panic!("Send unexpectedly succeeded after bus drop"),
        }
    }
}
