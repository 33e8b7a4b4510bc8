//! ANSI color escape generation from RGB and HSV values.
//!
//! Two encodings are produced:
//!
//! - 256-color palette sequences (`ESC[38;5;Nm`), choosing between the
//!   6×6×6 color cube (indices 16–231) and the 24-step grayscale ramp
//!   (indices 232–255)
//! - 24-bit truecolor sequences (`ESC[38;2;R;G;Bm`), optionally preceded by
//!   the 256-color equivalent for terminals that ignore truecolor
//!
//! ```rust
//! use mb_util::color::{rgb256, rgb_truecolor, Layer};
//!
//! assert_eq!(rgb256(255.0, 0.0, 0.0, Layer::Foreground), "\x1b[38;5;196m");
//! assert_eq!(
//!     rgb_truecolor(10.0, 20.0, 30.0, false, Layer::Background),
//!     "\x1b[48;2;10;20;30m"
//! );
//! ```

/// Levels of the 6×6×6 cube, per channel.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// First and last intensities of the grayscale ramp (indices 232 and 255).
const GRAY_RAMP_START: u8 = 8;
const GRAY_RAMP_END: u8 = 238;

/// Whether a color sequence sets the text or the cell background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Foreground,
    Background,
}

impl Layer {
    fn sgr(self) -> u8 {
        match self {
            Layer::Foreground => 38,
            Layer::Background => 48,
        }
    }
}

/// Rounds and clamps a channel to 0..=255. NaN becomes 0.
fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Nearest cube level index for one channel, splitting at level midpoints.
fn cube_index(v: u8) -> u8 {
    let mut idx = 0;
    for pair in CUBE_LEVELS.windows(2) {
        let midpoint = (u16::from(pair[0]) + u16::from(pair[1])) as f64 / 2.0;
        if f64::from(v) >= midpoint {
            idx += 1;
        }
    }
    idx
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// Grays strictly between the ends of the grayscale ramp use the ramp; all
/// other colors, including near-black and near-white grays, use the cube.
///
/// # Example
///
/// ```rust
/// use mb_util::color::rgb_to_ansi256;
///
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
/// assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
/// assert_eq!(rgb_to_ansi256((8, 8, 8)), 16);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b && r > GRAY_RAMP_START && r < GRAY_RAMP_END {
        let gray = ((f64::from(r) - f64::from(GRAY_RAMP_START)) / 10.0).round();
        232 + gray.clamp(0.0, 23.0) as u8
    } else {
        16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
    }
}

/// 256-color escape sequence for an RGB color with channels in 0..=255.
pub fn rgb256(r: f64, g: f64, b: f64, layer: Layer) -> String {
    let index = rgb_to_ansi256((channel(r), channel(g), channel(b)));
    format!("\x1b[{};5;{}m", layer.sgr(), index)
}

/// 24-bit escape sequence for an RGB color with channels in 0..=255.
///
/// With `fallback`, the [`rgb256`] sequence for the same color comes first so
/// terminals without truecolor support still show something close.
pub fn rgb_truecolor(r: f64, g: f64, b: f64, fallback: bool, layer: Layer) -> String {
    let (r, g, b) = (channel(r), channel(g), channel(b));
    let truecolor = format!("\x1b[{};2;{};{};{}m", layer.sgr(), r, g, b);

    if fallback {
        let index = rgb_to_ansi256((r, g, b));
        format!("\x1b[{};5;{}m{}", layer.sgr(), index, truecolor)
    } else {
        truecolor
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Converts HSV (each in 0..=1) to RGB (each in 0..=1).
///
/// Hue wraps around, so `1.25` is the same as `0.25`. A non-finite hue is
/// treated as 0; saturation and value are clamped.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = if h.is_finite() { h.rem_euclid(1.0) } else { 0.0 };
    let s = unit(s);
    let v = unit(v);

    let sector = h * 6.0;
    let i = sector.floor();
    let f = sector - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Truecolor escape sequence for an HSV color. See [`hsv_to_rgb`].
pub fn hsv_to_truecolor(h: f64, s: f64, v: f64, fallback: bool, layer: Layer) -> String {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    rgb_truecolor(r * 255.0, g * 255.0, b * 255.0, fallback, layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_ansi256_near_black_uses_cube() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((3, 3, 3)), 16);
        assert_eq!(rgb_to_ansi256((8, 8, 8)), 16);
    }

    #[test]
    fn test_rgb_to_ansi256_grayscale_ramp() {
        assert_eq!(rgb_to_ansi256((9, 9, 9)), 232);
        assert_eq!(rgb_to_ansi256((128, 128, 128)), 244);
        assert_eq!(rgb_to_ansi256((237, 237, 237)), 255);
        assert_eq!(rgb_to_ansi256((238, 238, 238)), 231);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
    }

    #[test]
    fn test_rgb_to_ansi256_color_cube() {
        assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
        assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
        assert_eq!(rgb_to_ansi256((0, 0, 255)), 21);
        assert_eq!(rgb_to_ansi256((95, 135, 175)), 16 + 36 + 12 + 3);
    }

    #[test]
    fn test_cube_index_midpoints() {
        assert_eq!(cube_index(47), 0);
        assert_eq!(cube_index(48), 1);
        assert_eq!(cube_index(114), 1);
        assert_eq!(cube_index(115), 2);
        assert_eq!(cube_index(235), 5);
    }

    #[test]
    fn test_rgb256_layers() {
        assert_eq!(rgb256(0.0, 0.0, 255.0, Layer::Foreground), "\x1b[38;5;21m");
        assert_eq!(rgb256(0.0, 0.0, 255.0, Layer::Background), "\x1b[48;5;21m");
    }

    #[test]
    fn test_rgb_truecolor_rounds_and_clamps() {
        assert_eq!(
            rgb_truecolor(-5.0, 127.6, 300.0, false, Layer::Foreground),
            "\x1b[38;2;0;128;255m"
        );
        assert_eq!(
            rgb_truecolor(f64::NAN, f64::INFINITY, 1.0, false, Layer::Foreground),
            "\x1b[38;2;0;255;1m"
        );
    }

    #[test]
    fn test_rgb_truecolor_fallback_prefix() {
        assert_eq!(
            rgb_truecolor(255.0, 0.0, 0.0, true, Layer::Background),
            "\x1b[48;5;196m\x1b[48;2;255;0;0m"
        );
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(
            hsv_to_truecolor(0.0, 1.0, 1.0, false, Layer::Foreground),
            "\x1b[38;2;255;0;0m"
        );
        assert_eq!(
            hsv_to_truecolor(1.0 / 3.0, 1.0, 1.0, false, Layer::Foreground),
            "\x1b[38;2;0;255;0m"
        );
        assert_eq!(
            hsv_to_truecolor(2.0 / 3.0, 1.0, 1.0, false, Layer::Foreground),
            "\x1b[38;2;0;0;255m"
        );
    }

    #[test]
    fn test_hsv_hue_wraps() {
        assert_eq!(hsv_to_rgb(1.5, 1.0, 1.0), hsv_to_rgb(0.5, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-0.5, 1.0, 1.0), hsv_to_rgb(0.5, 1.0, 1.0));
    }

    #[test]
    fn test_hsv_non_finite_inputs() {
        assert_eq!(hsv_to_rgb(f64::NAN, 0.0, 1.0), (1.0, 1.0, 1.0));
        assert_eq!(
            hsv_to_truecolor(f64::INFINITY, f64::NAN, 2.0, false, Layer::Foreground),
            "\x1b[38;2;255;255;255m"
        );
    }
}
