//! The figure: style plus axes, rendered to a raster image.
//!
//! A [`Figure`] owns one [`Axes`] and the [`FigureStyle`] that governs its
//! geometry and colors. `render` walks the axes state and produces an
//! `RgbaImage`; `save`/`encode_png` wrap the encoding step.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use image::RgbaImage;
use tracing::debug;

use crate::axes::Axes;
use crate::error::{RadiatorError, Result};
use crate::logging::log_render_stats;
use crate::render::{blend_pixel, draw_segment, fill_rect, DataTransform, PanelRect};
use crate::style::FigureStyle;

/// Tick mark length in pixels
const TICK_LENGTH: i64 = 6;

/// A complete figure: style configuration and one axes.
pub struct Figure {
    style: FigureStyle,
    axes: Axes,
}

impl Figure {
    /// Create an empty figure with the given style.
    pub fn new(style: FigureStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self {
            style,
            axes: Axes::new(),
        })
    }

    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    /// Mutable access to the style, for adjustments after composition.
    pub fn style_mut(&mut self) -> &mut FigureStyle {
        &mut self.style
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut Axes {
        &mut self.axes
    }

    /// Render the figure to an RGBA raster at the style's pixel size.
    pub fn render(&self) -> Result<RgbaImage> {
        let start = Instant::now();
        let (width, height) = self.style.pixel_size();

        debug!(
            width = width,
            height = height,
            collections = self.axes.collections().len(),
            "Rendering figure"
        );

        let mut img = RgbaImage::from_pixel(width, height, image::Rgba(self.style.background.to_rgba()));

        let margins = &self.style.margins;
        let panel = PanelRect::from_margins(
            width,
            height,
            margins.left,
            margins.right,
            margins.bottom,
            margins.top,
        );

        // The colorbar strip is carved out of the top of the panel
        let (content_rect, colorbar_rect) = match self.axes.colorbar() {
            Some(colorbar) => {
                let bar_height =
                    ((colorbar.size_frac * height as f32).round() as u32).clamp(1, panel.height);
                let pad = (colorbar.pad_frac * height as f32).round() as u32;
                let consumed = (bar_height + pad).min(panel.height.saturating_sub(1));

                let bar = PanelRect {
                    x0: panel.x0,
                    y0: panel.y0,
                    width: panel.width,
                    height: bar_height,
                };
                let content = PanelRect {
                    x0: panel.x0,
                    y0: panel.y0 + consumed,
                    width: panel.width,
                    height: panel.height - consumed,
                };
                (content, Some(bar))
            }
            None => (panel, None),
        };

        if let Some(layer) = self.axes.heatmap() {
            self.render_heatmap_panel(&mut img, content_rect, layer);
        }

        self.render_collections(&mut img, content_rect)?;

        if let (Some(colorbar), Some(bar_rect)) = (self.axes.colorbar(), colorbar_rect) {
            self.render_colorbar(&mut img, bar_rect, colorbar);
        }

        self.render_frame(&mut img, content_rect)?;

        log_render_stats(
            width,
            height,
            self.axes.collections().len(),
            self.axes.heatmap().is_some(),
            self.axes.colorbar().is_some(),
            start.elapsed().as_millis() as u64,
        );

        Ok(img)
    }

    /// Render and encode as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let img = self.render()?;
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    /// Render and save to a file; the format follows the extension (png or
    /// jpeg).
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("png") => image::ImageFormat::Png,
            Some("jpg") | Some("jpeg") => image::ImageFormat::Jpeg,
            other => {
                return Err(RadiatorError::InvalidParameter {
                    param: "path".to_string(),
                    message: format!(
                        "Unsupported image extension: {:?}. Use png or jpeg",
                        other
                    ),
                })
            }
        };

        let img = self.render()?;
        // JPEG has no alpha channel
        match format {
            image::ImageFormat::Jpeg => {
                image::DynamicImage::ImageRgba8(img).to_rgb8().save_with_format(path, format)?
            }
            _ => img.save_with_format(path, format)?,
        }
        Ok(())
    }

    fn render_heatmap_panel(
        &self,
        img: &mut RgbaImage,
        rect: PanelRect,
        layer: &crate::heatmap::HeatmapLayer,
    ) {
        let (rows, cols) = layer.data().dim();
        if rows == 0 || cols == 0 || rect.width == 0 || rect.height == 0 {
            return;
        }

        let x_denom = rect.width.saturating_sub(1).max(1) as f64;
        let y_denom = rect.height.saturating_sub(1).max(1) as f64;

        for y in 0..rect.height {
            // Row 0 of the data is the top row of the panel
            let row = y as f64 / y_denom * (rows - 1) as f64;
            for x in 0..rect.width {
                let col = x as f64 / x_denom * (cols - 1) as f64;

                // Unmappable cells keep the background color
                if let Some(color) = layer.color_at(row, col) {
                    img.put_pixel(rect.x0 + x, rect.y0 + y, image::Rgba(color));
                }
            }
        }
    }

    fn render_collections(&self, img: &mut RgbaImage, rect: PanelRect) -> Result<()> {
        if self.axes.collections().is_empty() {
            return Ok(());
        }

        let (x_min, x_max, y_min, y_max) = self.data_limits();
        let transform = DataTransform {
            rect,
            x_min,
            x_max,
            y_min,
            y_max,
        };

        // Stable sort keeps insertion order within a z level
        let mut ordered: Vec<&crate::collection::LineCollection> =
            self.axes.collections().iter().collect();
        ordered.sort_by_key(|c| c.z_order);

        for collection in ordered {
            for (i, segment) in collection.segments().iter().enumerate() {
                let Some(color) = collection.segment_color(i)? else {
                    continue;
                };

                let start = transform.to_pixel(segment.start[0], segment.start[1]);
                let end = transform.to_pixel(segment.end[0], segment.end[1]);
                draw_segment(img, start, end, color, collection.line_width, collection.alpha);
            }
        }

        Ok(())
    }

    fn render_colorbar(
        &self,
        img: &mut RgbaImage,
        rect: PanelRect,
        colorbar: &crate::heatmap::Colorbar,
    ) {
        let denom = rect.width.saturating_sub(1).max(1) as f64;

        for x in 0..rect.width {
            let t = x as f64 / denom;
            let color = colorbar.colormap().map_normalized(t);
            for y in 0..rect.height {
                img.put_pixel(rect.x0 + x, rect.y0 + y, image::Rgba(color));
            }
        }

        // Tick marks sit on top of the bar, pointing outward
        let tick_color = self.style.tick_color.to_rgba();
        for fraction in colorbar.tick_fractions() {
            let px = rect.x0 as i64 + (fraction * denom).round() as i64;
            for dy in 1..=TICK_LENGTH {
                blend_pixel(img, px, rect.y0 as i64 - dy, tick_color, 1.0);
            }
        }
    }

    fn render_frame(&self, img: &mut RgbaImage, rect: PanelRect) -> Result<()> {
        let spines = &self.axes.spines;
        let edge = self.style.edge_color.to_rgba();

        let x1 = rect.x0 + rect.width.saturating_sub(1);
        let y1 = rect.y0 + rect.height.saturating_sub(1);

        if spines.top {
            fill_rect(img, PanelRect { x0: rect.x0, y0: rect.y0, width: rect.width, height: 1 }, edge);
        }
        if spines.bottom {
            fill_rect(img, PanelRect { x0: rect.x0, y0: y1, width: rect.width, height: 1 }, edge);
        }
        if spines.left {
            fill_rect(img, PanelRect { x0: rect.x0, y0: rect.y0, width: 1, height: rect.height }, edge);
        }
        if spines.right {
            fill_rect(img, PanelRect { x0: x1, y0: rect.y0, width: 1, height: rect.height }, edge);
        }

        let tick_color = self.style.tick_color.to_rgba();
        let (x_min, x_max, y_min, y_max) = self.data_limits();
        let transform = DataTransform {
            rect,
            x_min,
            x_max,
            y_min,
            y_max,
        };

        if self.axes.x_axis.visible {
            for &tick in &self.axes.x_axis.ticks {
                let (px, _) = transform.to_pixel(tick, y_min);
                for dy in 1..=TICK_LENGTH {
                    blend_pixel(img, px.round() as i64, y1 as i64 + dy, tick_color, 1.0);
                }
            }
        }

        if self.axes.y_axis.visible {
            for &tick in &self.axes.y_axis.ticks {
                let (_, py) = transform.to_pixel(x_min, tick);
                for dx in 1..=TICK_LENGTH {
                    blend_pixel(img, rect.x0 as i64 - dx, py.round() as i64, tick_color, 1.0);
                }
            }
        }

        Ok(())
    }

    /// Effective data limits: explicit limits win, else the collection
    /// bounds, else the unit square.
    fn data_limits(&self) -> (f64, f64, f64, f64) {
        let bounds = self.axes.data_bounds();

        let (x_min, x_max) = self.axes.x_limits().unwrap_or_else(|| {
            bounds
                .map(|(x_min, x_max, _, _)| (x_min, x_max))
                .unwrap_or((0.0, 1.0))
        });
        let (y_min, y_max) = self.axes.y_limits().unwrap_or_else(|| {
            bounds
                .map(|(_, _, y_min, y_max)| (y_min, y_max))
                .unwrap_or((0.0, 1.0))
        });

        (x_min, x_max, y_min, y_max)
    }
}
