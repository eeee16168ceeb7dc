// Input module - key translation and the event queue bridging the
// platform event loop and the engine

pub mod keys;
pub mod queue;

pub use keys::{translate_key, GameKey};
pub use queue::{InputQueue, KeyEvent, QUEUE_CAPACITY};
