#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// RGB color used by every draw command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::new(0x80, 0x80, 0x80);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve a color string as sent by the simulation service.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and the common CSS color names,
    /// ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = value
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_function(args);
        }
        named(&value)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some(Color::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::new(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Color> {
    let mut channels = args.split(',').map(|c| c.trim().parse::<u8>().ok());
    let color = Color::new(channels.next()??, channels.next()??, channels.next()??);
    if channels.next().is_some() {
        return None;
    }
    Some(color)
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "gray" | "grey" => Color::GRAY,
        "darkgray" | "darkgrey" => Color::new(0xa9, 0xa9, 0xa9),
        "lightgray" | "lightgrey" => Color::new(0xd3, 0xd3, 0xd3),
        "silver" => Color::new(0xc0, 0xc0, 0xc0),
        "red" => Color::new(0xff, 0x00, 0x00),
        "maroon" => Color::new(0x80, 0x00, 0x00),
        "green" => Color::new(0x00, 0x80, 0x00),
        "lime" => Color::new(0x00, 0xff, 0x00),
        "olive" => Color::new(0x80, 0x80, 0x00),
        "yellow" => Color::new(0xff, 0xff, 0x00),
        "orange" => Color::new(0xff, 0xa5, 0x00),
        "blue" => Color::new(0x00, 0x00, 0xff),
        "navy" => Color::new(0x00, 0x00, 0x80),
        "teal" => Color::new(0x00, 0x80, 0x80),
        "cyan" | "aqua" => Color::new(0x00, 0xff, 0xff),
        "magenta" | "fuchsia" => Color::new(0xff, 0x00, 0xff),
        "purple" => Color::new(0x80, 0x00, 0x80),
        "pink" => Color::new(0xff, 0xc0, 0xcb),
        "brown" => Color::new(0xa5, 0x2a, 0x2a),
        _ => return None,
    };
    Some(color)
}
