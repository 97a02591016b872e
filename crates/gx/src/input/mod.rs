//! Keyboard input vocabulary
//!
//! Key values mirror GLFW's so that backends can convert with a plain integer
//! lookup.

use bitflags::bitflags;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum KeyCode {
    Unknown = -1,
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,
    World1 = 161,
    World2 = 162,
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,
    F25 = 314,
    Kp0 = 320,
    Kp1 = 321,
    Kp2 = 322,
    Kp3 = 323,
    Kp4 = 324,
    Kp5 = 325,
    Kp6 = 326,
    Kp7 = 327,
    Kp8 = 328,
    Kp9 = 329,
    KpDecimal = 330,
    KpDivide = 331,
    KpMultiply = 332,
    KpSubtract = 333,
    KpAdd = 334,
    KpEnter = 335,
    KpEqual = 336,
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl KeyCode {
    const TABLE: [Self; 120] = [
        Self::Space, Self::Apostrophe, Self::Comma, Self::Minus, Self::Period, Self::Slash,
        Self::Num0, Self::Num1, Self::Num2, Self::Num3, Self::Num4,
        Self::Num5, Self::Num6, Self::Num7, Self::Num8, Self::Num9,
        Self::Semicolon, Self::Equal,
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G, Self::H, Self::I,
        Self::J, Self::K, Self::L, Self::M, Self::N, Self::O, Self::P, Self::Q, Self::R,
        Self::S, Self::T, Self::U, Self::V, Self::W, Self::X, Self::Y, Self::Z,
        Self::LeftBracket, Self::Backslash, Self::RightBracket, Self::GraveAccent,
        Self::World1, Self::World2,
        Self::Escape, Self::Enter, Self::Tab, Self::Backspace, Self::Insert, Self::Delete,
        Self::Right, Self::Left, Self::Down, Self::Up,
        Self::PageUp, Self::PageDown, Self::Home, Self::End,
        Self::CapsLock, Self::ScrollLock, Self::NumLock, Self::PrintScreen, Self::Pause,
        Self::F1, Self::F2, Self::F3, Self::F4, Self::F5, Self::F6,
        Self::F7, Self::F8, Self::F9, Self::F10, Self::F11, Self::F12,
        Self::F13, Self::F14, Self::F15, Self::F16, Self::F17, Self::F18, Self::F19,
        Self::F20, Self::F21, Self::F22, Self::F23, Self::F24, Self::F25,
        Self::Kp0, Self::Kp1, Self::Kp2, Self::Kp3, Self::Kp4,
        Self::Kp5, Self::Kp6, Self::Kp7, Self::Kp8, Self::Kp9,
        Self::KpDecimal, Self::KpDivide, Self::KpMultiply, Self::KpSubtract,
        Self::KpAdd, Self::KpEnter, Self::KpEqual,
        Self::LeftShift, Self::LeftControl, Self::LeftAlt, Self::LeftSuper,
        Self::RightShift, Self::RightControl, Self::RightAlt, Self::RightSuper,
        Self::Menu,
    ];

    /// Convert a raw GLFW key value; unmapped values become `Unknown`
    pub fn from_raw(raw: i32) -> Self {
        Self::TABLE
            .iter()
            .copied()
            .find(|key| *key as i32 == raw)
            .unwrap_or(Self::Unknown)
    }

    /// Raw GLFW key value
    pub fn raw(self) -> i32 {
        self as i32
    }
}

/// Key transition reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key was released
    Release,
    /// Key was pressed
    Press,
    /// Key is held and auto-repeating
    Repeat,
}

impl KeyAction {
    /// Convert a raw GLFW action value
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: i32 {
        /// Either shift key
        const SHIFT = 0x0001;
        /// Either control key
        const CONTROL = 0x0002;
        /// Either alt key
        const ALT = 0x0004;
        /// Either super key
        const SUPER = 0x0008;
        /// Caps lock is active
        const CAPS_LOCK = 0x0010;
        /// Num lock is active
        const NUM_LOCK = 0x0020;
    }
}

/// A single keyboard event delivered to keyboard callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Logical key
    pub key: KeyCode,
    /// Platform-specific scancode
    pub scancode: i32,
    /// Press, release or repeat
    pub action: KeyAction,
    /// Modifier keys held
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event with no modifiers
    pub fn new(key: KeyCode, action: KeyAction) -> Self {
        Self {
            key,
            scancode: 0,
            action,
            modifiers: Modifiers::empty(),
        }
    }

    /// Whether this is a press of `key`
    pub fn is_press(&self, key: KeyCode) -> bool {
        self.key == key && self.action == KeyAction::Press
    }
}
