use std::collections::VecDeque;

use crate::game::Direction;

/// Directional intents collected between simulation ticks
///
/// Several key presses can arrive before the next tick; each tick drains
/// exactly one, so quick multi-key turns are applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentQueue {
    pending: VecDeque<Direction>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `direction` unless it reverses `committed` or the game is paused.
    /// Returns whether the intent was kept.
    pub fn enqueue(&mut self, direction: Direction, committed: Direction, paused: bool) -> bool {
        if paused || direction.is_opposite(committed) {
            return false;
        }
        self.pending.push_back(direction);
        true
    }

    /// Oldest queued intent, if any
    pub fn dequeue_one(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    /// Most recently queued intent
    pub fn last(&self) -> Option<Direction> {
        self.pending.back().copied()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = IntentQueue::new();
        assert!(queue.enqueue(Direction::Up, Direction::Right, false));
        assert!(queue.enqueue(Direction::Right, Direction::Right, false));

        assert_eq!(queue.dequeue_one(), Some(Direction::Up));
        assert_eq!(queue.dequeue_one(), Some(Direction::Right));
        assert_eq!(queue.dequeue_one(), None);
    }

    #[test]
    fn test_reversal_is_dropped() {
        let mut queue = IntentQueue::new();
        assert!(!queue.enqueue(Direction::Left, Direction::Right, false));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_paused_drops_everything() {
        let mut queue = IntentQueue::new();
        for dir in Direction::ALL {
            assert!(!queue.enqueue(dir, Direction::Right, true));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_filter_uses_committed_not_queued() {
        // Up then Down both pass against a committed Right; the engine's
        // commit-time check rejects the second one
        let mut queue = IntentQueue::new();
        assert!(queue.enqueue(Direction::Up, Direction::Right, false));
        assert!(queue.enqueue(Direction::Down, Direction::Right, false));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_last_is_newest() {
        let mut queue = IntentQueue::new();
        assert_eq!(queue.last(), None);
        queue.enqueue(Direction::Up, Direction::Right, false);
        queue.enqueue(Direction::Left, Direction::Up, false);
        assert_eq!(queue.last(), Some(Direction::Left));
        queue.dequeue_one();
        assert_eq!(queue.last(), Some(Direction::Left));
    }

    #[test]
    fn test_clear() {
        let mut queue = IntentQueue::new();
        queue.enqueue(Direction::Down, Direction::Left, false);
        queue.clear();
        assert_eq!(queue.dequeue_one(), None);
    }
}
