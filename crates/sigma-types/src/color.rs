//! Color helpers shared by the drawing code.

use crate::canvas::Color;

/// Linearly interpolate between two colors. `t` is clamped to `[0, 1]`.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| -> u8 { (x as f32 + (y as f32 - x as f32) * t).round() as u8 };
    Color {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: lerp(a.a, b.a),
    }
}

/// Scale the RGB channels of a color toward black. `f` is clamped to `[0, 1]`.
pub fn dim(c: Color, f: f32) -> Color {
    lerp_color(Color::rgba(0, 0, 0, c.a), c, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint() {
        let c = lerp_color(Color::rgb(0, 0, 0), Color::rgb(200, 100, 50), 0.5);
        assert_eq!((c.r, c.g, c.b), (100, 50, 25));
    }

    #[test]
    fn lerp_clamps_t() {
        let a = Color::rgb(10, 10, 10);
        let b = Color::rgb(20, 20, 20);
        assert_eq!(lerp_color(a, b, -5.0), a);
        assert_eq!(lerp_color(a, b, 5.0), b);
    }

    #[test]
    fn dim_to_black() {
        let c = dim(Color::rgb(100, 200, 50), 0.0);
        assert_eq!((c.r, c.g, c.b), (0, 0, 0));
        assert_eq!(c.a, 255);
    }
}
