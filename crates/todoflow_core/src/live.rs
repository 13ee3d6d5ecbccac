//! Live query plumbing.
//!
//! A [`Subscription`] receives the full todo list once when it is created and
//! again after every successful mutation of the store it came from. Pushes are
//! buffered on an unbounded channel; readers usually only care about the most
//! recent one, see [`Subscription::latest`].

use crate::model::Todo;
use crossbeam_channel::{Receiver, Sender};

pub type SubscriptionId = u64;

#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<Vec<Todo>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Drains every pending push and returns the newest, if any arrived.
    pub fn latest(&self) -> Option<Vec<Todo>> {
        let mut newest = None;
        while let Ok(todos) = self.receiver.try_recv() {
            newest = Some(todos);
        }
        newest
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.receiver.len()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    next_id: SubscriptionId,
    senders: Vec<(SubscriptionId, Sender<Vec<Todo>>)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, current: Vec<Todo>) -> Subscription {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.next_id += 1;
        let id = self.next_id;

        // The receiver is still held here, so the initial send cannot fail.
        let _ = sender.send(current);
        self.senders.push((id, sender));
        tracing::trace!(subscription = id, "live query subscribed");

        Subscription { id, receiver }
    }

    pub(crate) fn publish(&mut self, todos: &[Todo]) {
        self.senders.retain(|(id, sender)| {
            let delivered = sender.send(todos.to_vec()).is_ok();
            if !delivered {
                tracing::trace!(subscription = *id, "live query dropped");
            }
            delivered
        });
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
