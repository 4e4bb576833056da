use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use dora_forms_types::{ChartData, ChartSurface, PNG_DATA_URL_PREFIX};
use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;
use tracing::debug;

/// Smallest canvas edge; anything smaller leaves no room for the plot area.
const MIN_EDGE: u32 = 64;

/// Error type for chart capture.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Capture was requested before any render pass.
    #[error("Chart has not been rendered yet")]
    NotRendered,

    /// PNG encoding failed.
    #[error("Failed to encode chart image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Colors used when rasterizing the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub background: Rgb<u8>,
    pub axis: Rgb<u8>,
    pub grid: Rgb<u8>,
    /// Bar colors, cycled per category.
    pub palette: Vec<Rgb<u8>>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Rgb([255, 255, 255]),
            axis: Rgb([64, 64, 64]),
            grid: Rgb([220, 220, 220]),
            palette: vec![
                Rgb([54, 162, 235]),
                Rgb([255, 99, 132]),
                Rgb([75, 192, 192]),
                Rgb([255, 159, 64]),
                Rgb([153, 102, 255]),
                Rgb([255, 205, 86]),
            ],
        }
    }
}

/// Margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl PlotArea {
    fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            left: width / 16 + 8,
            top: height / 16 + 4,
            right: width - width / 32 - 4,
            bottom: height - height / 12 - 8,
        }
    }

    fn width(&self) -> u32 {
        self.right - self.left
    }

    fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// A bar chart rendered into an in-memory RGB frame.
#[derive(Debug, Clone)]
pub struct BarChartCanvas {
    width: u32,
    height: u32,
    style: ChartStyle,
    frame: Option<RgbImage>,
}

impl Default for BarChartCanvas {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

impl BarChartCanvas {
    /// Create a canvas of the given size in pixels. Edges below 64 are raised to 64.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_EDGE),
            height: height.max(MIN_EDGE),
            style: ChartStyle::default(),
            frame: None,
        }
    }

    /// Set a custom color style.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The last rendered frame, if any.
    pub fn frame(&self) -> Option<&RgbImage> {
        self.frame.as_ref()
    }

    fn rasterize(&self, data: &ChartData) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, self.style.background);
        let area = PlotArea::for_canvas(self.width, self.height);
        let scale_max = if data.scale_max > 0.0 {
            data.scale_max
        } else {
            1.0
        };

        // Grid line per whole scale step
        let steps = scale_max.ceil() as u32;
        for step in 1..=steps {
            let y = value_to_y(f64::from(step), scale_max, &area);
            fill_rect(
                &mut img,
                area.left,
                y,
                area.right,
                y + 1,
                self.style.grid,
            );
        }

        if !data.bars.is_empty() && !self.style.palette.is_empty() {
            let slot = area.width() / data.bars.len() as u32;
            let gap = slot / 5;
            for (i, bar) in data.bars.iter().enumerate() {
                let color = self.style.palette[i % self.style.palette.len()];
                let x0 = area.left + i as u32 * slot + gap;
                let x1 = area.left + (i as u32 + 1) * slot - gap;
                let y0 = value_to_y(bar.value.clamp(0.0, scale_max), scale_max, &area);
                fill_rect(&mut img, x0, y0, x1, area.bottom, color);
            }
        }

        // Axes
        fill_rect(
            &mut img,
            area.left.saturating_sub(2),
            area.top,
            area.left,
            area.bottom + 2,
            self.style.axis,
        );
        fill_rect(
            &mut img,
            area.left.saturating_sub(2),
            area.bottom,
            area.right,
            area.bottom + 2,
            self.style.axis,
        );

        img
    }
}

fn value_to_y(value: f64, scale_max: f64, area: &PlotArea) -> u32 {
    let fraction = (value / scale_max).clamp(0.0, 1.0);
    area.bottom - (fraction * f64::from(area.height())).round() as u32
}

/// Fill the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the image.
fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    let x1 = x1.min(img.width());
    let y1 = y1.min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

impl ChartSurface for BarChartCanvas {
    type Error = ChartError;

    fn draw(&mut self, data: &ChartData) {
        debug!(bars = data.bars.len(), "rendering chart");
        self.frame = Some(self.rasterize(data));
    }

    fn is_rendered(&self) -> bool {
        self.frame.is_some()
    }

    fn to_base64_image(&self) -> Result<String, Self::Error> {
        let frame = self.frame.as_ref().ok_or(ChartError::NotRendered)?;
        let mut out = Cursor::new(Vec::new());
        frame.write_to(&mut out, ImageFormat::Png)?;
        Ok(format!(
            "{PNG_DATA_URL_PREFIX}{}",
            STANDARD.encode(out.into_inner())
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dora_forms_types::ChartBar;

    fn data(values: &[f64]) -> ChartData {
        ChartData {
            bars: values
                .iter()
                .enumerate()
                .map(|(i, &value)| ChartBar {
                    label: format!("c{i}"),
                    value,
                    answered: 1,
                })
                .collect(),
            scale_max: 5.0,
        }
    }

    #[test]
    fn capture_before_draw_fails() {
        let canvas = BarChartCanvas::new(200, 100);
        assert!(!canvas.is_rendered());
        assert!(matches!(
            canvas.to_base64_image(),
            Err(ChartError::NotRendered)
        ));
    }

    #[test]
    fn capture_is_png_data_url() {
        let mut canvas = BarChartCanvas::new(200, 100);
        canvas.draw(&data(&[3.0, 5.0]));

        let url = canvas.to_base64_image().unwrap();
        let payload = url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();

        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 100);
    }

    #[test]
    fn bars_use_palette_colors() {
        let mut canvas = BarChartCanvas::new(400, 200);
        canvas.draw(&data(&[5.0, 0.0]));

        let frame = canvas.frame().unwrap();
        let area = PlotArea::for_canvas(400, 200);
        let slot = area.width() / 2;
        let first_bar_center = (area.left + slot / 2, area.bottom - area.height() / 2);
        let second_bar_center = (area.left + slot + slot / 2, area.bottom - area.height() / 2);

        let style = ChartStyle::default();
        assert_eq!(
            *frame.get_pixel(first_bar_center.0, first_bar_center.1),
            style.palette[0]
        );
        assert_ne!(
            *frame.get_pixel(second_bar_center.0, second_bar_center.1),
            style.palette[1]
        );
    }

    #[test]
    fn tiny_canvas_is_clamped() {
        let mut canvas = BarChartCanvas::new(1, 1);
        canvas.draw(&ChartData::empty());
        assert_eq!(canvas.frame().unwrap().dimensions(), (MIN_EDGE, MIN_EDGE));
    }
}
