//! Hexadecimal keypad and the key wait state.
use std::fmt::{self, Write};

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyCode {
    Key0 = 0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF = 0xF,
}

impl KeyCode {
    pub const ALL: [KeyCode; KEY_COUNT as usize] = [
        Self::Key0,
        Self::Key1,
        Self::Key2,
        Self::Key3,
        Self::Key4,
        Self::Key5,
        Self::Key6,
        Self::Key7,
        Self::Key8,
        Self::Key9,
        Self::KeyA,
        Self::KeyB,
        Self::KeyC,
        Self::KeyD,
        Self::KeyE,
        Self::KeyF,
    ];

    #[inline(always)]
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let key_id = self.as_u8();
        write!(f, "k{key_id:x}")
    }
}

impl From<KeyCode> for u8 {
    fn from(keycode: KeyCode) -> Self {
        keycode.as_u8()
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = InvalidKeyCode;

    fn try_from(key_id: u8) -> Result<Self, Self::Error> {
        KeyCode::ALL
            .get(key_id as usize)
            .copied()
            .ok_or(InvalidKeyCode(key_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKeyCode(pub u8);

impl std::error::Error for InvalidKeyCode {}

impl fmt::Display for InvalidKeyCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "keycode must be in range 0 <= keycode < 16, got {}", self.0)
    }
}

/// Keyboard input state. Pressed is a 1 bit, released is a 0 bit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad(u16);

impl Keypad {
    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.0 |= 1 << key.as_u8();
        } else {
            self.0 &= !(1 << key.as_u8());
        }
    }

    /// Whether the key with the given id is held down.
    ///
    /// Ids outside of the keypad are never pressed.
    pub fn is_pressed(&self, key_id: u8) -> bool {
        key_id < KEY_COUNT && self.0 & (1 << key_id) != 0
    }

    /// Check whether any key is pressed down.
    #[inline(always)]
    pub fn any_key(&self) -> bool {
        self.0 != 0
    }

    /// Clear the keyboard input state, setting all keys to up.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        KeyCode::ALL
            .into_iter()
            .filter(|key| self.is_pressed(key.as_u8()))
    }

    pub fn dump(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        if self.any_key() {
            write!(buf, "keys:")?;
            for key in self.pressed() {
                write!(buf, " {key}")?;
            }
        }

        Ok(buf)
    }
}

/// Execution state of the interpreter with regards to keyboard input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    /// Triggered by the opcode `Fx0A` (`LD Vx, K`), which stops
    /// execution until a key is pressed, and loads the key value into `Vx`.
    AwaitingKey { register: u8 },
}

#[cfg(feature = "serde")]
mod de {
    use serde::{
        de::{self, Deserialize, Deserializer, Unexpected},
        Serialize, Serializer,
    };

    use super::*;

    impl Serialize for KeyCode {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_u8(self.as_u8())
        }
    }

    impl<'de> Deserialize<'de> for KeyCode {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            // YAML integer type
            let key_id = i64::deserialize(deserializer)?;
            u8::try_from(key_id)
                .ok()
                .and_then(|key_id| KeyCode::try_from(key_id).ok())
                .ok_or_else(|| {
                    de::Error::invalid_value(
                        Unexpected::Signed(key_id),
                        &"an integer between 0 and 15",
                    )
                })
        }
    }
}
