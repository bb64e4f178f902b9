use crate::event::VirtualEvent;
use tokio::sync::mpsc;
use tracing::warn;

/// Receives the virtual events a controller emits while processing a tick
pub trait VirtualEventListener {
    fn on_virtual_event(&mut self, event: &VirtualEvent);
}

impl VirtualEventListener for mpsc::UnboundedSender<VirtualEvent> {
    fn on_virtual_event(&mut self, event: &VirtualEvent) {
        if let Err(e) = self.send(*event) {
            warn!("Dropping virtual event, receiver closed: {}", e);
        }
    }
}

pub(super) fn emit(listener: &mut Option<Box<dyn VirtualEventListener>>, event: VirtualEvent) {
    if let Some(listener) = listener.as_mut() {
        listener.on_virtual_event(&event);
    }
}
