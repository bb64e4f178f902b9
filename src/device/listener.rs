//! Raw event listeners and their ordered fan-out list

use crate::event::RawEvent;
use tokio::sync::mpsc;
use tracing::warn;

/// Receives the raw events of the devices it is registered with
pub trait RawEventListener {
    fn on_event(&mut self, event: &RawEvent);
}

// Lets the unit (or a host) collect events through a plain channel
impl RawEventListener for mpsc::UnboundedSender<RawEvent> {
    fn on_event(&mut self, event: &RawEvent) {
        if let Err(e) = self.send(*event) {
            warn!("Dropping raw event, receiver closed: {}", e);
        }
    }
}

/// Handle returned on registration, used to remove a listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered listener list; the same listener kind may be registered several times
#[derive(Default)]
pub struct ListenerList {
    listeners: Vec<(ListenerId, Box<dyn RawEventListener>)>,
    next_id: u64,
}

impl ListenerList {
    pub fn push(&mut self, listener: Box<dyn RawEventListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes one registration; false if the id is unknown
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(lid, _)| *lid == id) {
            Some(pos) => {
                self.listeners.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn dispatch(&mut self, event: &RawEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
