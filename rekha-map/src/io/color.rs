//! Colour scales for debug rendering.

/// RGB colour with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Color {
    /// Create a colour.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// 8-bit channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// Blue → cyan → green → yellow → red over `value` in [0, 1].
pub fn rainbow(value: f32) -> Color {
    let value = value.clamp(0.0, 1.0);
    if value < 0.25 {
        Color::new(0.0, 4.0 * value, 1.0)
    } else if value < 0.5 {
        Color::new(0.0, 1.0, 1.0 + 4.0 * (0.25 - value))
    } else if value < 0.75 {
        Color::new(4.0 * (value - 0.5), 1.0, 0.0)
    } else {
        Color::new(1.0, 1.0 + 4.0 * (0.75 - value), 0.0)
    }
}

/// HSV to RGB. Hue in degrees (clamped to [0, 360]), saturation and value
/// in [0, 1].
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Color {
    let h = hue.clamp(0.0, 360.0);
    let max = value;
    let min = max * (1.0 - saturation);
    let ramp = |t: f32| t / 60.0 * (max - min) + min;

    match h {
        h if h < 60.0 => Color::new(max, ramp(h), min),
        h if h < 120.0 => Color::new(ramp(120.0 - h), max, min),
        h if h < 180.0 => Color::new(min, max, ramp(h - 120.0)),
        h if h < 240.0 => Color::new(min, ramp(240.0 - h), max),
        h if h < 300.0 => Color::new(ramp(h - 240.0), min, max),
        h => Color::new(max, min, ramp(360.0 - h)),
    }
}

/// Diverging scale: 0 is red, 0.5 white, 1 blue.
pub fn blue_red(value: f32) -> Color {
    let value = value.clamp(0.0, 1.0);
    let hue = if value < 0.5 { 0.0 } else { 240.0 };
    let saturation = (value - 0.5).abs() / 0.5;
    hsv_to_rgb(hue, saturation, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rainbow_ends() {
        assert_eq!(rainbow(0.0).to_rgb8(), [0, 0, 255]);
        assert_eq!(rainbow(1.0).to_rgb8(), [255, 0, 0]);
        assert_eq!(rainbow(0.5).to_rgb8(), [0, 255, 0]);
        assert_eq!(rainbow(-3.0), rainbow(0.0));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0).to_rgb8(), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0).to_rgb8(), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0).to_rgb8(), [0, 0, 255]);
        assert_eq!(hsv_to_rgb(90.0, 0.0, 0.5).to_rgb8(), [128, 128, 128]);
    }

    #[test]
    fn test_hsv_value_scales() {
        let c = hsv_to_rgb(60.0, 1.0, 0.5);
        assert_relative_eq!(c.r, 0.5);
        assert_relative_eq!(c.g, 0.5);
        assert_relative_eq!(c.b, 0.0);
    }

    #[test]
    fn test_blue_red() {
        assert_eq!(blue_red(0.0).to_rgb8(), [255, 0, 0]);
        assert_eq!(blue_red(0.5).to_rgb8(), [255, 255, 255]);
        assert_eq!(blue_red(1.0).to_rgb8(), [0, 0, 255]);
    }
}
