// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps a divergence index to a color.  The index picks a hue, the
//! other two policy parameters fix saturation and brightness, and the
//! result goes through the classic HSB to RGB transform (the one AWT
//! ships), reproduced here rounding step for rounding step in `f32`.

use image::Rgb;

/// Black, used for points that never escaped.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// The three parameters of the color function.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorPolicy {
    /// Multiplier on the hue, `hue = index * alpha / max_iteration`.
    pub alpha: f32,
    /// Saturation.
    pub beta: f32,
    /// Brightness.
    pub gamma: f32,
}

impl ColorPolicy {
    /// Constructor.
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        ColorPolicy { alpha, beta, gamma }
    }

    /// The color of a pixel whose divergence index is `index`.  The
    /// non-divergent sentinel `max_iteration - 1` is always black.
    pub fn color(&self, index: u32, max_iteration: u32) -> Rgb<u8> {
        if index == max_iteration.saturating_sub(1) {
            return BLACK;
        }
        let hue = index as f32 * self.alpha / max_iteration as f32;
        hsb_to_rgb(hue, self.beta, self.gamma)
    }
}

impl Default for ColorPolicy {
    fn default() -> Self {
        ColorPolicy::new(20.0, 1.0, 1.0)
    }
}

fn channel(v: f32) -> u8 {
    (v * 255.0 + 0.5) as u8
}

/// Converts hue, saturation and brightness to RGB.  The hue wraps
/// around modulo 1.0; saturation and brightness are clamped to [0, 1].
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb<u8> {
    let s = saturation.max(0.0).min(1.0);
    let v = brightness.max(0.0).min(1.0);
    if s == 0.0 {
        let grey = channel(v);
        return Rgb([grey, grey, grey]);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - (s * (1.0 - f)));
    let (r, g, b) = match h as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        5 => (v, p, q),
        // hue - floor(hue) rounded up to exactly 1.0
        _ => (0.0, 0.0, 0.0),
    };
    Rgb([channel(r), channel(g), channel(b)])
}

/// Packs a color as `0xRRGGBB`.
pub fn pack(color: Rgb<u8>) -> u32 {
    let Rgb([r, g, b]) = color;
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_black() {
        let policy = ColorPolicy::default();
        assert_eq!(policy.color(99, 100), BLACK);
        assert_eq!(pack(policy.color(99, 100)), 0);
    }

    #[test]
    fn zero_index_is_pure_red() {
        let policy = ColorPolicy::new(20.0, 1.0, 1.0);
        assert_eq!(policy.color(0, 100), Rgb([255, 0, 0]));
        assert_eq!(pack(policy.color(0, 100)), 0xff0000);
    }

    #[test]
    fn primary_and_secondary_hues() {
        assert_eq!(hsb_to_rgb(0.0, 1.0, 1.0), Rgb([255, 0, 0]));
        assert_eq!(hsb_to_rgb(1.0 / 6.0, 1.0, 1.0), Rgb([255, 255, 0]));
        assert_eq!(hsb_to_rgb(1.0 / 3.0, 1.0, 1.0), Rgb([0, 255, 0]));
        assert_eq!(hsb_to_rgb(0.5, 1.0, 1.0), Rgb([0, 255, 255]));
        assert_eq!(hsb_to_rgb(2.0 / 3.0, 1.0, 1.0), Rgb([0, 0, 255]));
        assert_eq!(hsb_to_rgb(5.0 / 6.0, 1.0, 1.0), Rgb([255, 0, 255]));
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(hsb_to_rgb(1.5, 1.0, 1.0), hsb_to_rgb(0.5, 1.0, 1.0));
        assert_eq!(hsb_to_rgb(7.0, 1.0, 1.0), Rgb([255, 0, 0]));
        assert_eq!(hsb_to_rgb(-0.5, 1.0, 1.0), hsb_to_rgb(0.5, 1.0, 1.0));
    }

    #[test]
    fn grey_when_unsaturated() {
        assert_eq!(hsb_to_rgb(0.3, 0.0, 0.5), Rgb([128, 128, 128]));
        assert_eq!(hsb_to_rgb(0.3, 0.0, 0.0), BLACK);
    }

    #[test]
    fn saturation_and_brightness_are_clamped() {
        assert_eq!(hsb_to_rgb(0.0, 4.0, 9.0), Rgb([255, 0, 0]));
        assert_eq!(hsb_to_rgb(0.0, 1.0, -1.0), BLACK);
    }

    #[test]
    fn hue_follows_the_index() {
        // hue = 5 * 20 / 100 = 1.0, which wraps back to red
        let policy = ColorPolicy::default();
        assert_eq!(policy.color(5, 100), Rgb([255, 0, 0]));
        // hue = 1 * 20 / 120 = 1/6, yellow
        assert_eq!(policy.color(1, 120), Rgb([255, 255, 0]));
    }
}
