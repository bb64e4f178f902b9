//! Point-of-view (hat) positions and the rules that move them
//!
//! A POV is always in one of nine canonical positions: center, the four
//! cardinal directions, or a diagonal made of two orthogonal cardinals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a point-of-view
///
/// The discriminants follow the usual bit layout (up = 1, down = 2,
/// right = 4, left = 8, diagonals are the OR of two cardinals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum PovPosition {
    #[default]
    Center = 0,
    Up = 1,
    Down = 2,
    Right = 4,
    Left = 8,
    UpRight = 1 | 4,
    UpLeft = 1 | 8,
    DownRight = 2 | 4,
    DownLeft = 2 | 8,
}

/// One of the four cardinal directions of a POV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    fn edge_index(self, pressed: bool) -> usize {
        let base = match self {
            Direction::Up => 0,
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 6,
        };
        if pressed {
            base
        } else {
            base + 1
        }
    }
}

use PovPosition as P;

/// Transition table for POVs driven by four keys.
///
/// Rows follow [`PovPosition::state_index`]; columns are the edges
/// press-up, release-up, press-down, release-down, press-left, release-left,
/// press-right, release-right.
const KEY_TRANSITIONS: [[PovPosition; 8]; 9] = [
    // Center
    [P::Up, P::Center, P::Down, P::Center, P::Left, P::Center, P::Right, P::Center],
    // Up
    [P::Up, P::Center, P::Down, P::Up, P::UpLeft, P::Up, P::UpRight, P::Up],
    // Down
    [P::Up, P::Down, P::Down, P::Center, P::DownLeft, P::Down, P::DownRight, P::Down],
    // Left
    [P::UpLeft, P::Left, P::DownLeft, P::Left, P::Left, P::Center, P::Right, P::Left],
    // Right
    [P::UpRight, P::Right, P::DownRight, P::Right, P::Left, P::Right, P::Right, P::Center],
    // UpLeft
    [P::UpLeft, P::Left, P::DownLeft, P::UpLeft, P::UpLeft, P::Up, P::UpRight, P::UpLeft],
    // UpRight
    [P::UpRight, P::Right, P::DownRight, P::UpRight, P::UpLeft, P::UpRight, P::UpRight, P::Up],
    // DownLeft
    [P::UpLeft, P::DownLeft, P::DownLeft, P::Left, P::DownLeft, P::Down, P::DownRight, P::DownLeft],
    // DownRight
    [P::UpRight, P::DownRight, P::DownRight, P::Right, P::DownLeft, P::DownRight, P::DownRight, P::Down],
];

impl PovPosition {
    pub const ALL: [PovPosition; 9] = [
        P::Center,
        P::Up,
        P::Down,
        P::Left,
        P::Right,
        P::UpLeft,
        P::UpRight,
        P::DownLeft,
        P::DownRight,
    ];

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Converts a raw bit mask; contradictory masks (up and down together) yield `None`
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(P::Center),
            1 => Some(P::Up),
            2 => Some(P::Down),
            4 => Some(P::Right),
            8 => Some(P::Left),
            5 => Some(P::UpRight),
            9 => Some(P::UpLeft),
            6 => Some(P::DownRight),
            10 => Some(P::DownLeft),
            _ => None,
        }
    }

    /// Builds a position from held directions, cancelling opposite pairs
    pub fn from_held(up: bool, down: bool, left: bool, right: bool) -> Self {
        let vertical = match (up, down) {
            (true, false) => P::Up.bits(),
            (false, true) => P::Down.bits(),
            _ => 0,
        };
        let horizontal = match (left, right) {
            (true, false) => P::Left.bits(),
            (false, true) => P::Right.bits(),
            _ => 0,
        };
        // Never contradictory once opposite pairs are cancelled
        Self::from_bits(vertical | horizontal).unwrap_or_default()
    }

    pub fn contains(self, direction: Direction) -> bool {
        let bit = match direction {
            Direction::Up => P::Up.bits(),
            Direction::Down => P::Down.bits(),
            Direction::Left => P::Left.bits(),
            Direction::Right => P::Right.bits(),
        };
        self.bits() & bit != 0
    }

    pub fn is_center(self) -> bool {
        self == P::Center
    }

    fn state_index(self) -> usize {
        match self {
            P::Center => 0,
            P::Up => 1,
            P::Down => 2,
            P::Left => 3,
            P::Right => 4,
            P::UpLeft => 5,
            P::UpRight => 6,
            P::DownLeft => 7,
            P::DownRight => 8,
        }
    }

    /// Next position of a key-driven POV after a directional key edge
    pub fn transition(self, direction: Direction, pressed: bool) -> PovPosition {
        KEY_TRANSITIONS[self.state_index()][direction.edge_index(pressed)]
    }

    /// Position of a POV built from an up/down and a left/right axis.
    ///
    /// A value reaches a zone once its magnitude is at least `threshold`.
    /// Negative left/right values mean left unless `invert_left_right` is set.
    pub fn from_axes(
        up_down: i32,
        left_right: i32,
        threshold: i32,
        invert_left_right: bool,
    ) -> PovPosition {
        let up = up_down <= -threshold;
        let down = up_down >= threshold;
        let (left, right) = if invert_left_right {
            (left_right >= threshold, left_right <= -threshold)
        } else {
            (left_right <= -threshold, left_right >= threshold)
        };
        Self::from_held(up, down, left, right)
    }
}

impl fmt::Display for PovPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            P::Center => "Center",
            P::Up => "Up",
            P::Down => "Down",
            P::Left => "Left",
            P::Right => "Right",
            P::UpLeft => "Up/Left",
            P::UpRight => "Up/Right",
            P::DownLeft => "Down/Left",
            P::DownRight => "Down/Right",
        };
        f.write_str(name)
    }
}

/// Text shortcuts of the four directions of a virtual POV
///
/// Diagonal shortcuts are not stored: they are the plain concatenation of
/// two cardinal shortcuts, so callers must pick strings that stay
/// unambiguous once concatenated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PovShortcuts {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl PovShortcuts {
    pub fn new(
        up: impl Into<String>,
        down: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            up: up.into(),
            down: down.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// The derived diagonal shortcuts, in the order down+left, up+left,
    /// down+right, up+right
    pub fn diagonals(&self) -> [(PovPosition, String); 4] {
        [
            (P::DownLeft, format!("{}{}", self.down, self.left)),
            (P::UpLeft, format!("{}{}", self.up, self.left)),
            (P::DownRight, format!("{}{}", self.down, self.right)),
            (P::UpRight, format!("{}{}", self.up, self.right)),
        ]
    }

    /// All eight shortcuts with the position each one stands for
    pub fn all(&self) -> Vec<(PovPosition, String)> {
        let mut shortcuts = vec![
            (P::Up, self.up.clone()),
            (P::Down, self.down.clone()),
            (P::Left, self.left.clone()),
            (P::Right, self.right.clone()),
        ];
        shortcuts.extend(self.diagonals());
        shortcuts
    }

    /// Decodes a shortcut string; unknown strings map to center
    pub fn position_of(&self, shortcut: &str) -> PovPosition {
        self.all()
            .into_iter()
            .find(|(_, s)| s == shortcut)
            .map(|(position, _)| position)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(P::Center, Direction::Up, true, P::Up)]
    #[case(P::Up, Direction::Right, true, P::UpRight)]
    #[case(P::UpRight, Direction::Up, false, P::Right)]
    #[case(P::UpRight, Direction::Right, false, P::Up)]
    #[case(P::Right, Direction::Right, false, P::Center)]
    #[case(P::Left, Direction::Up, false, P::Left)]
    #[case(P::DownLeft, Direction::Up, true, P::UpLeft)]
    #[case(P::Left, Direction::Right, true, P::Right)]
    #[case(P::Down, Direction::Left, true, P::DownLeft)]
    #[case(P::DownRight, Direction::Down, false, P::Right)]
    #[case(P::UpLeft, Direction::Left, true, P::UpLeft)]
    fn key_transitions(
        #[case] from: PovPosition,
        #[case] direction: Direction,
        #[case] pressed: bool,
        #[case] expected: PovPosition,
    ) {
        assert_eq!(from.transition(direction, pressed), expected);
    }

    #[test]
    fn release_of_unheld_direction_is_noop() {
        for position in PovPosition::ALL {
            for direction in Direction::ALL {
                if !position.contains(direction) {
                    assert_eq!(position.transition(direction, false), position);
                }
            }
        }
    }

    #[test]
    fn transitions_stay_canonical() {
        for position in PovPosition::ALL {
            for direction in Direction::ALL {
                for pressed in [true, false] {
                    let next = position.transition(direction, pressed);
                    assert_eq!(PovPosition::from_bits(next.bits()), Some(next));
                    if pressed {
                        assert!(next.contains(direction));
                    } else {
                        assert!(!next.contains(direction));
                    }
                }
            }
        }
    }

    #[rstest]
    #[case(-150, -150, P::UpLeft)]
    #[case(0, 0, P::Center)]
    #[case(-100, 0, P::Up)]
    #[case(-99, 0, P::Center)]
    #[case(100, 100, P::DownRight)]
    #[case(99, -99, P::Center)]
    #[case(0, -100, P::Left)]
    #[case(-200, 200, P::UpRight)]
    #[case(150, -101, P::DownLeft)]
    fn axis_quadrants(#[case] up_down: i32, #[case] left_right: i32, #[case] expected: PovPosition) {
        assert_eq!(PovPosition::from_axes(up_down, left_right, 100, false), expected);
    }

    #[test]
    fn inverted_left_right_convention() {
        assert_eq!(PovPosition::from_axes(0, -150, 100, true), P::Right);
        assert_eq!(PovPosition::from_axes(-150, 150, 100, true), P::UpLeft);
    }

    #[test]
    fn bits_are_cardinal_unions() {
        assert_eq!(P::UpLeft.bits(), P::Up.bits() | P::Left.bits());
        assert_eq!(P::DownRight.bits(), P::Down.bits() | P::Right.bits());
        assert_eq!(PovPosition::from_bits(P::Up.bits() | P::Down.bits()), None);
        assert_eq!(PovPosition::from_held(true, true, false, true), P::Right);
    }

    #[test]
    fn shortcut_diagonals_are_concatenations() {
        let shortcuts = PovShortcuts::new("U", "D", "L", "R");
        let diagonals: Vec<String> = shortcuts.diagonals().into_iter().map(|(_, s)| s).collect();
        assert_eq!(diagonals, vec!["DL", "UL", "DR", "UR"]);
        assert_eq!(shortcuts.position_of("UR"), P::UpRight);
        assert_eq!(shortcuts.position_of("L"), P::Left);
        assert_eq!(shortcuts.position_of("X"), P::Center);
    }
}
