//! Builds the report layout and serializes it.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use dora_forms_types::{ChartData, DocumentRequest, Label, PNG_DATA_URL_PREFIX};
use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::layout::{Font, Layout, Op};
use crate::text::{encode_win_ansi, pdf_string};
use crate::writer::PdfWriter;
use crate::{PdfError, PdfOptions};

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.5;
const INDENT: f32 = 12.0;

/// Decode a `data:image/png;base64,` URL into RGB pixels.
pub(crate) fn decode_chart_image(url: &str) -> Result<RgbImage, PdfError> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or(PdfError::InvalidDataUrl)?;
    let bytes = STANDARD.decode(payload.trim())?;
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)?;
    Ok(image.to_rgb8())
}

/// Lay out the report pages for a request.
pub(crate) fn layout_report(
    request: &DocumentRequest<'_>,
    chart: &RgbImage,
    options: &PdfOptions,
) -> Vec<Vec<Op>> {
    let lang = request.language;
    let form = request.form;
    let mut layout = Layout::new(options.page_width, options.page_height, options.margin);

    layout.paragraph(Label::ReportTitle.text(lang), TITLE_SIZE, Font::Bold);
    layout.paragraph(
        &format!("{}: {}", Label::Date.text(lang), form.date),
        BODY_SIZE,
        Font::Regular,
    );
    layout.gap(12.0);

    layout.paragraph(Label::ChartTitle.text(lang), HEADING_SIZE, Font::Bold);
    layout.gap(4.0);
    layout.image(chart.width(), chart.height());
    layout.gap(6.0);

    // The raster carries no text, so list the bars in drawing order
    let chart_data = ChartData::from_answers(
        &form.answers,
        request.questions,
        request.categories,
        lang,
    );
    for (i, bar) in chart_data.bars.iter().enumerate() {
        layout.indented_paragraph(
            &format!("{}. {}: {:.1}", i + 1, bar.label, bar.value),
            BODY_SIZE,
            Font::Regular,
            INDENT,
        );
    }
    layout.gap(12.0);

    for category in request.categories {
        layout.paragraph(category.label(lang), HEADING_SIZE, Font::Bold);
        layout.gap(2.0);
        for question in category.questions(request.questions) {
            layout.paragraph(question.prompt(lang), BODY_SIZE, Font::Bold);

            let answer = match form.answer(question.id) {
                Some(value) => value.to_string(),
                None => Label::NoAnswer.text(lang).to_string(),
            };
            layout.indented_paragraph(
                &format!("{}: {answer}", Label::Answer.text(lang)),
                BODY_SIZE,
                Font::Regular,
                INDENT,
            );

            if let Some(observation) = form
                .observation(question.id)
                .filter(|o| !o.trim().is_empty())
            {
                layout.indented_paragraph(
                    &format!("{}: {observation}", Label::Observation.text(lang)),
                    BODY_SIZE,
                    Font::Regular,
                    INDENT,
                );
            }
            layout.gap(4.0);
        }
        layout.gap(8.0);
    }

    layout.into_pages()
}

/// Content stream of one page.
fn page_content(ops: &[Op]) -> String {
    let mut s = String::new();
    for op in ops {
        match op {
            Op::Text {
                x,
                y,
                size,
                font,
                text,
            } => {
                s.push_str(&format!(
                    "BT /{} {size:.1} Tf {x:.2} {y:.2} Td {} Tj ET\n",
                    font.resource(),
                    pdf_string(&encode_win_ansi(text))
                ));
            }
            Op::Image {
                x,
                y,
                width,
                height,
            } => {
                s.push_str(&format!(
                    "q {width:.2} 0 0 {height:.2} {x:.2} {y:.2} cm /Im1 Do Q\n"
                ));
            }
        }
    }
    s
}

/// Serialize laid-out pages into PDF bytes.
pub(crate) fn write_pdf(
    pages: &[Vec<Op>],
    chart: &RgbImage,
    options: &PdfOptions,
) -> Result<Vec<u8>, PdfError> {
    // Fixed ids: 1 catalog, 2 page tree, 3-4 fonts, 5 chart, then page + contents pairs
    const FIRST_PAGE_ID: usize = 6;

    let mut writer = PdfWriter::new(options.compress);

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
        .collect();

    let root = writer.object("<< /Type /Catalog /Pages 2 0 R >>");
    writer.object(&format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    writer.object(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    writer.object(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );
    writer.stream(
        &format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8",
            chart.width(),
            chart.height()
        ),
        chart.as_raw(),
    )?;

    for ops in pages {
        let page_id = writer.next_id();
        writer.object(&format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.0} {:.0}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> /XObject << /Im1 5 0 R >> >> \
             /Contents {} 0 R >>",
            options.page_width,
            options.page_height,
            page_id + 1
        ));
        writer.stream("", page_content(ops).as_bytes())?;
    }

    debug!(pages = pages.len(), "serialized report");
    Ok(writer.finish(root))
}
