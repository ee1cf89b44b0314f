use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 130, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 210, g: 210, b: 210 };

pub const ALIVE: Color = Color::Green;
pub const PARTIAL: Color = Color::Yellow;
pub const FAILURE: Color = Color::Red;
pub const RANGE_DONE: Color = Color::Cyan;
