//! Low-level raster primitives.
//!
//! Pixel blending, rectangle fills, thick line segments, and the transform
//! from data coordinates to pixel coordinates within an axes panel.

use image::RgbaImage;

/// Axes panel position within the figure raster, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PanelRect {
    pub x0: u32,
    pub y0: u32,
    pub width: u32,
    pub height: u32,
}

impl PanelRect {
    /// Compute the panel from margin fractions and the figure raster size.
    ///
    /// Margins use the bottom-left origin convention; the raster's y axis
    /// points down, so the panel top is measured from `margins.top`.
    pub fn from_margins(
        fig_width: u32,
        fig_height: u32,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    ) -> Self {
        let x0 = (left * fig_width as f32).round() as u32;
        let x1 = (right * fig_width as f32).round() as u32;
        let y0 = ((1.0 - top) * fig_height as f32).round() as u32;
        let y1 = ((1.0 - bottom) * fig_height as f32).round() as u32;

        Self {
            x0,
            y0,
            width: x1.saturating_sub(x0).max(1),
            height: y1.saturating_sub(y0).max(1),
        }
    }
}

/// Mapping from data coordinates to pixel coordinates within a panel.
///
/// Data y grows upward, raster y grows downward; the transform flips it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DataTransform {
    pub rect: PanelRect,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataTransform {
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let x_span = self.x_max - self.x_min;
        let y_span = self.y_max - self.y_min;

        let tx = if x_span != 0.0 {
            (x - self.x_min) / x_span
        } else {
            0.5
        };
        let ty = if y_span != 0.0 {
            (y - self.y_min) / y_span
        } else {
            0.5
        };

        let px = self.rect.x0 as f64 + tx * (self.rect.width.saturating_sub(1)) as f64;
        let py = self.rect.y0 as f64 + (1.0 - ty) * (self.rect.height.saturating_sub(1)) as f64;
        (px, py)
    }
}

/// Blend a color over the pixel at (x, y) with the given opacity.
///
/// Out-of-bounds coordinates are ignored. The color's own alpha channel is
/// folded into the blend.
pub(crate) fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: [u8; 4], alpha: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }

    let a = (alpha * color[3] as f32 / 255.0).clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }

    let pixel = img.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let src = color[c] as f32;
        let dst = pixel.0[c] as f32;
        pixel.0[c] = (src * a + dst * (1.0 - a)).round() as u8;
    }
    pixel.0[3] = 255;
}

/// Fill a rectangle with an opaque color, clipped to the image bounds.
pub(crate) fn fill_rect(img: &mut RgbaImage, rect: PanelRect, color: [u8; 4]) {
    let x_end = (rect.x0 + rect.width).min(img.width());
    let y_end = (rect.y0 + rect.height).min(img.height());

    for y in rect.y0..y_end {
        for x in rect.x0..x_end {
            img.put_pixel(x, y, image::Rgba(color));
        }
    }
}

/// Draw a line segment of the given pixel width, alpha-blended over the image.
///
/// Bresenham traversal with a square brush stamped at each step. Each covered
/// pixel is blended once per segment so translucent strokes do not
/// self-darken along the traversal.
pub(crate) fn draw_segment(
    img: &mut RgbaImage,
    start: (f64, f64),
    end: (f64, f64),
    color: [u8; 4],
    line_width: f32,
    alpha: f32,
) {
    let (x1, y1) = (start.0.round() as i64, start.1.round() as i64);
    let (x2, y2) = (end.0.round() as i64, end.1.round() as i64);

    let half_width = ((line_width / 2.0).floor() as i64).max(0);

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x1;
    let mut y = y1;

    let mut covered = std::collections::HashSet::new();

    loop {
        for oy in -half_width..=half_width {
            for ox in -half_width..=half_width {
                covered.insert((x + ox, y + oy));
            }
        }

        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    for (px, py) in covered {
        blend_pixel(img, px, py, color, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_rect_from_margins() {
        let rect = PanelRect::from_margins(100, 200, 0.1, 0.9, 0.2, 0.8);
        assert_eq!(rect.x0, 10);
        assert_eq!(rect.width, 80);
        // top = 0.8 from the bottom -> 20% down in raster coordinates
        assert_eq!(rect.y0, 40);
        assert_eq!(rect.height, 120);
    }

    #[test]
    fn test_data_transform_orientation() {
        let transform = DataTransform {
            rect: PanelRect {
                x0: 0,
                y0: 0,
                width: 101,
                height: 101,
            },
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        };

        // Data origin maps to the bottom-left pixel
        assert_eq!(transform.to_pixel(0.0, 0.0), (0.0, 100.0));
        assert_eq!(transform.to_pixel(1.0, 1.0), (100.0, 0.0));
        assert_eq!(transform.to_pixel(0.5, 0.5), (50.0, 50.0));
    }

    #[test]
    fn test_blend_pixel_opaque_and_translucent() {
        let mut img = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));

        blend_pixel(&mut img, 1, 1, [255, 255, 255, 255], 1.0);
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);

        blend_pixel(&mut img, 2, 2, [255, 255, 255, 255], 0.5);
        let p = img.get_pixel(2, 2).0;
        assert!(p[0] > 120 && p[0] < 135);

        // Out of bounds is a no-op
        blend_pixel(&mut img, -1, 0, [255, 0, 0, 255], 1.0);
        blend_pixel(&mut img, 10, 10, [255, 0, 0, 255], 1.0);
    }

    #[test]
    fn test_draw_segment_marks_endpoints() {
        let mut img = RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 255]));
        draw_segment(&mut img, (1.0, 1.0), (8.0, 8.0), [255, 0, 0, 255], 1.0, 1.0);

        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(8, 8).0, [255, 0, 0, 255]);
        // A pixel far off the diagonal stays untouched
        assert_eq!(img.get_pixel(8, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_draw_segment_thick_coverage() {
        let mut img = RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 255]));
        draw_segment(&mut img, (5.0, 2.0), (5.0, 7.0), [255, 255, 255, 255], 3.0, 1.0);

        // A 3px vertical stroke covers the neighboring columns
        assert_eq!(img.get_pixel(4, 4).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(5, 4).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(6, 4).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut img = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
        fill_rect(
            &mut img,
            PanelRect {
                x0: 2,
                y0: 2,
                width: 10,
                height: 10,
            },
            [9, 9, 9, 255],
        );
        assert_eq!(img.get_pixel(3, 3).0, [9, 9, 9, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [0, 0, 0, 255]);
    }
}
