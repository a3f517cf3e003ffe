//! Closed lookup tables shared by the text framer and the markup codec.
//!
//! Each attribute table is a fieldless enum whose variants carry the
//! configuration name and the firmware's code byte. Names resolve through
//! [`FromStr`] (and serde, via `try_from`), so an unknown name fails with
//! [`ProtocolError::InvalidAttribute`] at the point it is first parsed.

use crate::error::{AttributeKind, ProtocolError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! lookup_table {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:expr) {
            $( $(#[$vmeta:meta])* $variant:ident => ($key:literal, $code:literal), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every entry, in table order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Code byte sent to the sign.
            pub const fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Name used in configuration files and on the command line.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Resolves a name through the table.
            pub fn lookup(name: &str) -> Result<Self, ProtocolError> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|entry| entry.name() == name)
                    .ok_or_else(|| ProtocolError::invalid_attribute($kind, name))
            }
        }

        impl FromStr for $name {
            type Err = ProtocolError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::lookup(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ProtocolError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::lookup(&value)
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.name()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

lookup_table! {
    /// Transition effect used when a frame enters or leaves the display.
    MotionMode(AttributeKind::MotionMode) {
        Random => ("random", 0x2f),
        JumpOut => ("jump_out", 0x30),
        MoveLeft => ("move_left", 0x31),
        MoveRight => ("move_right", 0x32),
        ScrollLeft => ("scroll_left", 0x33),
        ScrollRight => ("scroll_right", 0x34),
        MoveUp => ("move_up", 0x35),
        MoveDown => ("move_down", 0x36),
        ScrollHoriz => ("scroll_horiz", 0x37),
        ScrollUp => ("scroll_up", 0x38),
        ScrollDown => ("scroll_down", 0x39),
        FoldHoriz => ("fold_horiz", 0x3a),
        FoldVert => ("fold_vert", 0x3b),
        ScrollVert => ("scroll_vert", 0x3c),
        ShuttleHoriz => ("shuttle_horiz", 0x3d),
        ShuttleVert => ("shuttle_vert", 0x3e),
        PeelLeft => ("peel_left", 0x3f),
        PeelRight => ("peel_right", 0x40),
        ShutterVert => ("shutter_vert", 0x41),
        ShutterHoriz => ("shutter_horiz", 0x42),
        Raindrops => ("raindrops", 0x43),
        RandMosaic => ("rand_mosaic", 0x44),
        Twinkling => ("twinkling", 0x45),
        HipHop => ("hip_hop", 0x46),
        Radar => ("radar", 0x47),
        FanOut => ("fan_out", 0x48),
        FanIn => ("fan_in", 0x49),
        SpiralRight => ("spiral_right", 0x4a),
        SpiralLeft => ("spiral_left", 0x4b),
        ToCorners => ("to_corners", 0x4c),
        FromCorners => ("from_corners", 0x4d),
        ToSides => ("to_sides", 0x4e),
        FromSides => ("from_sides", 0x4f),
        OutBlocks => ("out_blocks", 0x50),
    }
}

lookup_table! {
    /// Foreground or background color.
    Color(AttributeKind::Color) {
        Black => ("black", 0x30),
        Red => ("red", 0x31),
        Green => ("green", 0x32),
        Amber => ("amber", 0x33),
        /// Same LEDs as amber; both names are accepted.
        Yellow => ("yellow", 0x33),
        Mix1 => ("mix_1", 0x34),
        Mix2 => ("mix_2", 0x35),
        Mix3 => ("mix_3", 0x36),
        Mix4 => ("mix_4", 0x37),
    }
}

lookup_table! {
    VerticalAlign(AttributeKind::VerticalAlign) {
        Top => ("top", 0x31),
        Bottom => ("bottom", 0x32),
        Center => ("center", 0x33),
    }
}

lookup_table! {
    HorizontalAlign(AttributeKind::HorizontalAlign) {
        Center => ("center", 0x30),
        Left => ("left", 0x31),
        Right => ("right", 0x32),
    }
}

/// Control byte that selects a font; followed by an ASCII digit.
pub const FONT_SELECT: u8 = 0x1a;

/// Digits accepted after [`FONT_SELECT`].
pub const FONT_DIGITS: &[u8] = b"01234";

/// Markup tags and the control sequences they expand to.
pub const MARKUP_TAGS: &[(&str, [u8; 2])] = &[
    // colors
    ("b", [0x1c, 0x30]),
    ("r", [0x1c, 0x31]),
    ("g", [0x1c, 0x32]),
    ("a", [0x1c, 0x33]),
    ("y", [0x1c, 0x33]),
    ("m1", [0x1c, 0x34]),
    ("m2", [0x1c, 0x35]),
    ("m3", [0x1c, 0x36]),
    ("m4", [0x1c, 0x37]),
    // flashing
    ("f", [0x07, 0x31]),
    ("/f", [0x07, 0x30]),
    // date and time fields rendered by the sign
    ("y2", [0x0b, 0x25]),
    ("y4", [0x0b, 0x26]),
    ("mo", [0x0b, 0x27]),
    ("ma", [0x0b, 0x28]),
    ("dd", [0x0b, 0x29]),
    ("dw", [0x0b, 0x2b]),
    ("h", [0x0b, 0x2c]),
    ("mi", [0x0b, 0x2d]),
    ("s", [0x0b, 0x2e]),
    ("24", [0x0b, 0x2f]),
    ("12", [0x0b, 0x30]),
];

/// Looks up the control sequence for a normalized markup key.
pub fn markup_tag(key: &str) -> Option<[u8; 2]> {
    MARKUP_TAGS
        .iter()
        .find(|(tag, _)| *tag == key)
        .map(|(_, bytes)| *bytes)
}
