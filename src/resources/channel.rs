//! Typed message channel for one scope.
//!
//! A [`MessageChannel`] keeps two buffers. [`post`](MessageChannel::post)
//! appends to the outbox; [`deliver`](MessageChannel::deliver), run once at
//! the start of every tick, turns the outbox into the inbox that listeners
//! read with [`iter`](MessageChannel::iter). Nothing posted during a sweep is
//! visible until the next tick, so listener order never changes what a
//! listener sees.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct MessageChannel<M: Send + Sync + 'static> {
    outbox: Vec<M>,
    inbox: Vec<M>,
}

impl<M: Send + Sync + 'static> Default for MessageChannel<M> {
    fn default() -> Self {
        Self {
            outbox: Vec::new(),
            inbox: Vec::new(),
        }
    }
}

impl<M: Send + Sync + 'static> MessageChannel<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for delivery at the next tick boundary.
    pub fn post(&mut self, message: M) {
        self.outbox.push(message);
    }

    /// Replace the inbox with everything posted since the last delivery.
    pub fn deliver(&mut self) {
        self.inbox.clear();
        std::mem::swap(&mut self.inbox, &mut self.outbox);
    }

    /// Messages delivered at the start of the current tick.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.inbox.iter()
    }

    /// Messages posted during the current tick, not yet delivered.
    pub fn posted(&self) -> &[M] {
        &self.outbox
    }

    pub fn is_idle(&self) -> bool {
        self.inbox.is_empty() && self.outbox.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_is_invisible_until_delivered() {
        let mut ch = MessageChannel::new();
        ch.post(1u32);
        assert_eq!(ch.iter().count(), 0);
        assert_eq!(ch.posted(), &[1]);
        ch.deliver();
        assert_eq!(ch.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!(ch.posted().is_empty());
    }

    #[test]
    fn test_delivery_discards_previous_inbox() {
        let mut ch = MessageChannel::new();
        ch.post("a");
        ch.deliver();
        ch.post("b");
        ch.deliver();
        assert_eq!(ch.iter().copied().collect::<Vec<_>>(), vec!["b"]);
        ch.deliver();
        assert!(ch.is_idle());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut ch = MessageChannel::new();
        for i in 0..5u8 {
            ch.post(i);
        }
        ch.deliver();
        assert_eq!(ch.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }
}
