// Key translation - maps platform key codes to engine key bytes
//
// The engine consumes single-byte key codes; anything it has no use for
// translates to `Nothing` and is queued as a no-op.

use winit::keyboard::{KeyCode, PhysicalKey};

/// Abstract engine key code
///
/// Discriminants are the byte values the engine expects on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GameKey {
    /// Unmapped key, ignored by the engine
    Nothing = 0,
    /// Menu confirm
    Enter = 13,
    /// Menu / pause
    Escape = 27,
    /// Use / open
    Use = 0xA2,
    /// Fire
    Fire = 0xA3,
    /// Turn or strafe left
    Left = 0xAC,
    /// Move forward
    Up = 0xAD,
    /// Turn or strafe right
    Right = 0xAE,
    /// Move backward
    Down = 0xAF,
    /// Run modifier
    Run = 0xB6,
}

impl GameKey {
    /// The wire byte for this key
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Translate a platform key code to an engine key
///
/// WASD aliases the arrow keys; everything unmapped becomes
/// `GameKey::Nothing`.
pub fn translate_key(key: PhysicalKey) -> GameKey {
    let code = match key {
        PhysicalKey::Code(code) => code,
        PhysicalKey::Unidentified(_) => return GameKey::Nothing,
    };

    match code {
        KeyCode::Enter => GameKey::Enter,
        KeyCode::Escape => GameKey::Escape,
        KeyCode::KeyA | KeyCode::ArrowLeft => GameKey::Left,
        KeyCode::KeyD | KeyCode::ArrowRight => GameKey::Right,
        KeyCode::KeyW | KeyCode::ArrowUp => GameKey::Up,
        KeyCode::KeyS | KeyCode::ArrowDown => GameKey::Down,
        KeyCode::ControlLeft => GameKey::Fire,
        KeyCode::Space => GameKey::Use,
        KeyCode::ShiftLeft => GameKey::Run,
        _ => GameKey::Nothing,
    }
}
