//! Linear top-to-bottom page layout.

use crate::text::chars_per_line;

/// Standard fonts available to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name in the page dictionary.
    pub(crate) fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// A drawing operation on one page, in PDF user space (origin bottom left).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        text: String,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Flows lines and images down pages, starting a new page when one is full.
pub(crate) struct Layout {
    page_width: f32,
    page_height: f32,
    margin: f32,
    pages: Vec<Vec<Op>>,
    cursor: f32,
}

impl Layout {
    pub(crate) fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            page_width,
            page_height,
            margin,
            pages: vec![Vec::new()],
            cursor: page_height - margin,
        }
    }

    fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = self.page_height - self.margin;
    }

    /// Start a new page unless `height` still fits above the bottom margin.
    fn reserve(&mut self, height: f32) {
        let page_is_empty = self.pages.last().is_none_or(Vec::is_empty);
        if self.cursor - height < self.margin && !page_is_empty {
            self.new_page();
        }
    }

    fn push(&mut self, op: Op) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    /// Add a wrapped paragraph.
    pub(crate) fn paragraph(&mut self, text: &str, size: f32, font: Font) {
        self.indented_paragraph(text, size, font, 0.0);
    }

    /// Add a wrapped paragraph shifted right by `indent`.
    pub(crate) fn indented_paragraph(&mut self, text: &str, size: f32, font: Font, indent: f32) {
        let line_height = size * 1.35;
        let bold = font == Font::Bold;
        let max_chars = chars_per_line(text, bold, size, self.content_width() - indent);
        let lines = textwrap::wrap(text, max_chars);
        for line in lines {
            self.reserve(line_height);
            self.cursor -= line_height;
            let op = Op::Text {
                x: self.margin + indent,
                y: self.cursor,
                size,
                font,
                text: line.into_owned(),
            };
            self.push(op);
        }
    }

    /// Add an image scaled to the content width, keeping its aspect ratio.
    pub(crate) fn image(&mut self, pixel_width: u32, pixel_height: u32) {
        let width = self.content_width();
        let mut height = width * pixel_height as f32 / pixel_width.max(1) as f32;
        let max_height = self.page_height - 2.0 * self.margin;
        let width = if height > max_height {
            let scaled = width * max_height / height;
            height = max_height;
            scaled
        } else {
            width
        };

        self.reserve(height);
        self.cursor -= height;
        let op = Op::Image {
            x: self.margin,
            y: self.cursor,
            width,
            height,
        };
        self.push(op);
    }

    /// Add vertical space. Space never carries over to a new page.
    pub(crate) fn gap(&mut self, height: f32) {
        self.cursor = (self.cursor - height).max(self.margin);
    }

    pub(crate) fn into_pages(self) -> Vec<Vec<Op>> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_flow_downwards() {
        let mut layout = Layout::new(200.0, 200.0, 20.0);
        layout.paragraph("uno", 10.0, Font::Regular);
        layout.paragraph("dos", 10.0, Font::Bold);

        let pages = layout.into_pages();
        assert_eq!(pages.len(), 1);
        let ys: Vec<f32> = pages[0]
            .iter()
            .map(|op| match op {
                Op::Text { y, .. } => *y,
                Op::Image { y, .. } => *y,
            })
            .collect();
        assert!(ys[0] > ys[1]);
    }

    #[test]
    fn overflow_starts_new_page() {
        let mut layout = Layout::new(200.0, 100.0, 20.0);
        for _ in 0..10 {
            layout.paragraph("línea", 10.0, Font::Regular);
        }
        let pages = layout.into_pages();
        assert!(pages.len() > 1);
        for page in &pages {
            for op in page {
                if let Op::Text { y, .. } = op {
                    assert!(*y >= 20.0);
                }
            }
        }
    }

    #[test]
    fn long_paragraph_wraps_inside_margins() {
        let mut layout = Layout::new(200.0, 400.0, 20.0);
        layout.indented_paragraph(
            "Observación bastante larga para ocupar varias líneas del informe",
            10.0,
            Font::Regular,
            12.0,
        );
        let pages = layout.into_pages();
        let lines: Vec<&str> = pages[0]
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                Op::Image { .. } => None,
            })
            .collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= 30));
        assert_eq!(
            lines.join(" "),
            "Observación bastante larga para ocupar varias líneas del informe"
        );
    }

    #[test]
    fn image_keeps_aspect_ratio() {
        let mut layout = Layout::new(300.0, 800.0, 50.0);
        layout.image(800, 400);
        let pages = layout.into_pages();
        match &pages[0][0] {
            Op::Image { width, height, .. } => {
                assert_eq!(*width, 200.0);
                assert_eq!(*height, 100.0);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }
}
