use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const PINK: Color = Color::rgb(255, 175, 175);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Looks up a named constant. Both `lightGray` and `LIGHT_GRAY` spellings are accepted.
    pub fn named(name: &str) -> Option<Color> {
        PALETTE.get(name).copied()
    }

    pub fn names() -> Vec<&'static str> {
        let mut names = PALETTE.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color[r={},g={},b={}]",
            self.red, self.green, self.blue
        )
    }
}

lazy_static! {
    static ref PALETTE: HashMap<&'static str, Color> = {
        let entries = [
            ("white", "WHITE", Color::WHITE),
            ("lightGray", "LIGHT_GRAY", Color::LIGHT_GRAY),
            ("gray", "GRAY", Color::GRAY),
            ("darkGray", "DARK_GRAY", Color::DARK_GRAY),
            ("black", "BLACK", Color::BLACK),
            ("red", "RED", Color::RED),
            ("pink", "PINK", Color::PINK),
            ("orange", "ORANGE", Color::ORANGE),
            ("yellow", "YELLOW", Color::YELLOW),
            ("green", "GREEN", Color::GREEN),
            ("magenta", "MAGENTA", Color::MAGENTA),
            ("cyan", "CYAN", Color::CYAN),
            ("blue", "BLUE", Color::BLUE),
        ];
        let mut palette = HashMap::new();
        for (lower, upper, color) in entries.iter() {
            palette.insert(*lower, *color);
            palette.insert(*upper, *color);
        }
        palette
    };
}
