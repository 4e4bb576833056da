//! # dora-forms-chart
//!
//! Raster bar chart for dora-forms.
//!
//! `BarChartCanvas` implements `ChartSurface`: every `draw` rasterizes the
//! category averages into an RGB frame, and `to_base64_image` captures the
//! last frame as a `data:image/png;base64,` URL for the export pipeline.
//! Labels are not painted; the report prints them next to the image.

mod canvas;

pub use canvas::{BarChartCanvas, ChartError, ChartStyle};
