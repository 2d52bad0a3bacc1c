/// Keyboard key identifier.
///
/// Only the keys a small interactive loop cares about are named. Other keys map to
/// `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

/// Press/release state shared by keys and mouse buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Window event forwarded to the application.
///
/// Close requests never show up here; they become the driver's quit event.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowInput {
    /// Drawable area changed, in physical pixels.
    Resized { width: u32, height: u32 },
    Focused(bool),
    Key {
        key: Key,
        state: ButtonState,
        repeat: bool,
    },
    /// Pointer position in physical pixels, matching framebuffer coordinates.
    PointerMoved { x: f32, y: f32 },
    PointerButton {
        button: MouseButton,
        state: ButtonState,
    },
}

impl WindowInput {
    /// True for a fresh (non-repeat) press of `key`.
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(
            self,
            WindowInput::Key { key: k, state: ButtonState::Pressed, repeat: false } if *k == key
        )
    }
}
