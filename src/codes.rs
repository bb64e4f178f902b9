//! Numeric identifiers of device parts
//!
//! Keys are keyboard scan codes (set 1, extended keys with the high bit set),
//! mouse buttons or gamepad buttons. Axes use one bit per axis.

use crate::event::{Axis, Key};

// Axes
pub const AXIS_X: Axis = 1;
pub const AXIS_Y: Axis = 2;
pub const AXIS_Z: Axis = 4;
pub const AXIS_X_ROT: Axis = 8;
pub const AXIS_Y_ROT: Axis = 16;
pub const AXIS_Z_ROT: Axis = 32;
pub const SLIDER_0: Axis = 64;
pub const SLIDER_1: Axis = 128;

/// Identifier of the `n`-th axis of a device, `None` past the eighth one
pub fn nth_axis(n: u32) -> Option<Axis> {
    AXIS_X.checked_shl(n)
}

// Mouse buttons
pub const MOUSEKEY_LEFT: Key = 0x01;
pub const MOUSEKEY_RIGHT: Key = 0x02;
pub const MOUSEKEY_CENTER: Key = 0x03;
pub const MOUSEKEY_X1: Key = 0x04;
pub const MOUSEKEY_X2: Key = 0x05;
/// Extra buttons are numbered `MOUSEKEY_OTHER + n`
pub const MOUSEKEY_OTHER: Key = 0x06;

// Gamepad buttons, by physical position
pub const PAD_SOUTH: Key = 0x01;
pub const PAD_EAST: Key = 0x02;
pub const PAD_WEST: Key = 0x03;
pub const PAD_NORTH: Key = 0x04;
pub const PAD_LEFT_BUMPER: Key = 0x05;
pub const PAD_RIGHT_BUMPER: Key = 0x06;
pub const PAD_SELECT: Key = 0x07;
pub const PAD_START: Key = 0x08;
pub const PAD_LEFT_THUMB: Key = 0x09;
pub const PAD_RIGHT_THUMB: Key = 0x0A;
pub const PAD_MODE: Key = 0x0B;
pub const PAD_LEFT_TRIGGER: Key = 0x0C;
pub const PAD_RIGHT_TRIGGER: Key = 0x0D;

// Keyboard scan codes
pub const KEY_ESCAPE: Key = 0x01;
pub const KEY_1: Key = 0x02;
pub const KEY_2: Key = 0x03;
pub const KEY_3: Key = 0x04;
pub const KEY_4: Key = 0x05;
pub const KEY_5: Key = 0x06;
pub const KEY_6: Key = 0x07;
pub const KEY_7: Key = 0x08;
pub const KEY_8: Key = 0x09;
pub const KEY_9: Key = 0x0A;
pub const KEY_0: Key = 0x0B;
pub const KEY_MINUS: Key = 0x0C;
pub const KEY_EQUALS: Key = 0x0D;
pub const KEY_BACKSPACE: Key = 0x0E;
pub const KEY_TAB: Key = 0x0F;
pub const KEY_Q: Key = 0x10;
pub const KEY_W: Key = 0x11;
pub const KEY_E: Key = 0x12;
pub const KEY_R: Key = 0x13;
pub const KEY_T: Key = 0x14;
pub const KEY_Y: Key = 0x15;
pub const KEY_U: Key = 0x16;
pub const KEY_I: Key = 0x17;
pub const KEY_O: Key = 0x18;
pub const KEY_P: Key = 0x19;
pub const KEY_LBRACKET: Key = 0x1A;
pub const KEY_RBRACKET: Key = 0x1B;
pub const KEY_RETURN: Key = 0x1C;
pub const KEY_LCONTROL: Key = 0x1D;
pub const KEY_A: Key = 0x1E;
pub const KEY_S: Key = 0x1F;
pub const KEY_D: Key = 0x20;
pub const KEY_F: Key = 0x21;
pub const KEY_G: Key = 0x22;
pub const KEY_H: Key = 0x23;
pub const KEY_J: Key = 0x24;
pub const KEY_K: Key = 0x25;
pub const KEY_L: Key = 0x26;
pub const KEY_SEMICOLON: Key = 0x27;
pub const KEY_APOSTROPHE: Key = 0x28;
pub const KEY_GRAVE: Key = 0x29;
pub const KEY_LSHIFT: Key = 0x2A;
pub const KEY_BACKSLASH: Key = 0x2B;
pub const KEY_Z: Key = 0x2C;
pub const KEY_X: Key = 0x2D;
pub const KEY_C: Key = 0x2E;
pub const KEY_V: Key = 0x2F;
pub const KEY_B: Key = 0x30;
pub const KEY_N: Key = 0x31;
pub const KEY_M: Key = 0x32;
pub const KEY_COMMA: Key = 0x33;
pub const KEY_POINT: Key = 0x34;
pub const KEY_SLASH: Key = 0x35;
pub const KEY_RSHIFT: Key = 0x36;
pub const KEY_NUMPADSTAR: Key = 0x37;
pub const KEY_LALT: Key = 0x38;
pub const KEY_SPACE: Key = 0x39;
pub const KEY_CAPITAL: Key = 0x3A;
pub const KEY_F1: Key = 0x3B;
pub const KEY_F2: Key = 0x3C;
pub const KEY_F3: Key = 0x3D;
pub const KEY_F4: Key = 0x3E;
pub const KEY_F5: Key = 0x3F;
pub const KEY_F6: Key = 0x40;
pub const KEY_F7: Key = 0x41;
pub const KEY_F8: Key = 0x42;
pub const KEY_F9: Key = 0x43;
pub const KEY_F10: Key = 0x44;
pub const KEY_NUMLOCK: Key = 0x45;
pub const KEY_SCROLL_LOCK: Key = 0x46;
pub const KEY_NUMPAD7: Key = 0x47;
pub const KEY_NUMPAD8: Key = 0x48;
pub const KEY_NUMPAD9: Key = 0x49;
pub const KEY_NUMPADMINUS: Key = 0x4A;
pub const KEY_NUMPAD4: Key = 0x4B;
pub const KEY_NUMPAD5: Key = 0x4C;
pub const KEY_NUMPAD6: Key = 0x4D;
pub const KEY_NUMPADPLUS: Key = 0x4E;
pub const KEY_NUMPAD1: Key = 0x4F;
pub const KEY_NUMPAD2: Key = 0x50;
pub const KEY_NUMPAD3: Key = 0x51;
pub const KEY_NUMPAD0: Key = 0x52;
pub const KEY_NUMPADPOINT: Key = 0x53;
pub const KEY_F11: Key = 0x57;
pub const KEY_F12: Key = 0x58;
pub const KEY_NUMPADENTER: Key = 0x9C;
pub const KEY_RCONTROL: Key = 0x9D;
pub const KEY_NUMPADSLASH: Key = 0xB5;
pub const KEY_SYSRQ: Key = 0xB7;
pub const KEY_RALT: Key = 0xB8;
pub const KEY_PAUSE: Key = 0xC5;
pub const KEY_HOME: Key = 0xC7;
pub const KEY_UP: Key = 0xC8;
pub const KEY_PGUP: Key = 0xC9;
pub const KEY_LEFT: Key = 0xCB;
pub const KEY_RIGHT: Key = 0xCD;
pub const KEY_END: Key = 0xCF;
pub const KEY_DOWN: Key = 0xD0;
pub const KEY_PGDOWN: Key = 0xD1;
pub const KEY_INSERT: Key = 0xD2;
pub const KEY_DELETE: Key = 0xD3;
pub const KEY_LWIN: Key = 0xDB;
pub const KEY_RWIN: Key = 0xDC;
pub const KEY_APPS: Key = 0xDD;
pub const KEY_F13: Key = 0xF0;
pub const KEY_F14: Key = 0xF1;
pub const KEY_F15: Key = 0xF2;
pub const KEY_F16: Key = 0xF3;
pub const KEY_F17: Key = 0xF4;
pub const KEY_F18: Key = 0xF5;
pub const KEY_F19: Key = 0xF6;
pub const KEY_F20: Key = 0xF7;
pub const KEY_VOLUMEUP: Key = 0xF8;
pub const KEY_VOLUMEDOWN: Key = 0xF9;
pub const KEY_MUTE: Key = 0xFA;
