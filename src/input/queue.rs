// Input queue - fixed-capacity circular buffer of key events
//
// Single producer (the event-drain step), single consumer (the engine),
// both on the same thread. Events pack into one u16 per slot:
// `pressed << 8 | key`. Two independent cursors advance modulo the
// capacity and the queue reads as empty exactly when they are equal; no
// full flag exists. Producing never checks the read cursor, so a burst of
// unconsumed events silently overwrites - and 16 uninterrupted produces
// collide the cursors, making everything pending unobservable. This is
// the deliberate best-effort policy of the original frontend, kept as-is.

use super::keys::translate_key;
use winit::keyboard::PhysicalKey;

/// Queue capacity in events
pub const QUEUE_CAPACITY: usize = 16;

/// One key transition as the engine sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// true for press, false for release
    pub pressed: bool,
    /// Engine key byte (`GameKey` wire value)
    pub key: u8,
}

/// Circular key-event queue
pub struct InputQueue {
    slots: [u16; QUEUE_CAPACITY],
    write: usize,
    read: usize,
}

impl InputQueue {
    /// Create an empty queue. No allocation happens after this.
    pub fn new() -> Self {
        Self {
            slots: [0; QUEUE_CAPACITY],
            write: 0,
            read: 0,
        }
    }

    /// Translate and enqueue one key transition
    ///
    /// Writes unconditionally at the write cursor and advances it modulo
    /// the capacity; pending events may be overwritten.
    pub fn produce(&mut self, pressed: bool, raw_key: PhysicalKey) {
        let key = translate_key(raw_key);
        self.push_packed(pressed, key.code());
    }

    /// Enqueue an already translated key byte
    pub fn push_packed(&mut self, pressed: bool, key: u8) {
        let data = ((pressed as u16) << 8) | key as u16;
        self.slots[self.write] = data;
        self.write = (self.write + 1) % QUEUE_CAPACITY;
    }

    /// Dequeue one event, or None when the cursors are equal
    pub fn consume(&mut self) -> Option<KeyEvent> {
        if self.read == self.write {
            return None;
        }

        let data = self.slots[self.read];
        self.read = (self.read + 1) % QUEUE_CAPACITY;

        Some(KeyEvent {
            pressed: (data >> 8) != 0,
            key: (data & 0xFF) as u8,
        })
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::GameKey;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_starts_empty() {
        let mut queue = InputQueue::new();
        assert_eq!(queue.consume(), None);
    }

    #[test]
    fn test_fifo_order_up_to_fifteen() {
        let mut queue = InputQueue::new();
        for i in 0..15u8 {
            queue.push_packed(i % 2 == 0, i);
        }
        for i in 0..15u8 {
            let event = queue.consume().unwrap();
            assert_eq!(event.key, i);
            assert_eq!(event.pressed, i % 2 == 0);
        }
        assert_eq!(queue.consume(), None);
    }

    #[test]
    fn test_produce_translates() {
        let mut queue = InputQueue::new();
        queue.produce(true, PhysicalKey::Code(KeyCode::Space));
        queue.produce(false, PhysicalKey::Code(KeyCode::KeyQ));

        let event = queue.consume().unwrap();
        assert!(event.pressed);
        assert_eq!(event.key, GameKey::Use.code());

        let event = queue.consume().unwrap();
        assert!(!event.pressed);
        assert_eq!(event.key, GameKey::Nothing.code());
    }

    #[test]
    fn test_sixteen_unconsumed_produces_collide_cursors() {
        // With no full flag, the 16th produce wraps the write cursor back
        // onto the read cursor and the whole burst reads as empty
        let mut queue = InputQueue::new();
        for i in 1..=16u8 {
            queue.push_packed(true, i);
        }
        assert_eq!(queue.consume(), None);
    }

    #[test]
    fn test_seventeenth_overwrites_oldest_slot() {
        // Event 1's slot is overwritten by event 17; the cursors then sit
        // one apart, so exactly the newest event is observable
        let mut queue = InputQueue::new();
        for i in 1..=17u8 {
            queue.push_packed(true, i);
        }

        let event = queue.consume().unwrap();
        assert_eq!(event.key, 17);
        assert_eq!(queue.consume(), None);
    }

    #[test]
    fn test_interleaved_produce_consume_wraps_cleanly() {
        // Steady-state use never trips the overwrite path
        let mut queue = InputQueue::new();
        for round in 0..5u8 {
            for i in 0..10u8 {
                queue.push_packed(true, round * 10 + i);
            }
            for i in 0..10u8 {
                assert_eq!(queue.consume().unwrap().key, round * 10 + i);
            }
        }
        assert_eq!(queue.consume(), None);
    }

    #[test]
    fn test_release_events_unpack() {
        let mut queue = InputQueue::new();
        queue.push_packed(false, GameKey::Fire.code());
        let event = queue.consume().unwrap();
        assert!(!event.pressed);
        assert_eq!(event.key, 0xA3);
    }
}
