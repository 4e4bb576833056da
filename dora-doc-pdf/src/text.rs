//! Text encoding and width estimates for the standard Helvetica fonts.

/// Encode text as WinAnsi bytes. Characters outside the encoding become `?`.
pub(crate) fn encode_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\t' | '\n' | '\r' => b' ',
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Render bytes as a PDF literal string, e.g. `(Fecha: 2024\351)`.
///
/// Delimiters are backslash-escaped and bytes outside printable ASCII are
/// written as octal escapes, so the result is plain ASCII.
pub(crate) fn pdf_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('(');
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out.push(')');
    out
}

/// Approximate advance width of a glyph in thousandths of an em.
///
/// Coarse classes of the Helvetica metrics; bold glyphs are wider.
fn glyph_width(c: char, bold: bool) -> f32 {
    let (regular, heavy) = match c {
        ' ' | 'i' | 'j' | 'l' | 'í' | 'ì' | 'ï' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => {
            (278.0, 278.0)
        }
        'f' | 't' | 'r' | 'I' | '(' | ')' | '-' | '/' | '¿' | '¡' => (333.0, 389.0),
        'm' | 'w' | 'M' | 'W' | '%' | '@' => (833.0, 889.0),
        '0'..='9' => (556.0, 556.0),
        c if c.is_uppercase() => (722.0, 778.0),
        c if c.is_lowercase() => (556.0, 611.0),
        _ => (584.0, 584.0),
    };
    if bold { heavy } else { regular }
}

/// Number of characters of `text` that fit in `width` points at `font_size`.
///
/// Uses the average glyph width of the text itself, so headings full of
/// capitals wrap earlier than body text.
pub(crate) fn chars_per_line(text: &str, bold: bool, font_size: f32, width: f32) -> usize {
    let (total, count) = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0.0, 0usize), |(total, count), c| {
            (total + glyph_width(c, bold), count + 1)
        });
    // Word spaces are narrow, so the mean is taken over visible glyphs only
    let average = if count == 0 { 556.0 } else { total / count as f32 };
    ((width * 1000.0 / (average * font_size)) as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_latin_accents() {
        assert_eq!(encode_win_ansi("Observação"), b"Observa\xe7\xe3o".to_vec());
        assert_eq!(encode_win_ansi("¿Qué?"), b"\xbfQu\xe9?".to_vec());
    }

    #[test]
    fn replaces_unencodable_chars() {
        assert_eq!(encode_win_ansi("ok ✓"), b"ok ?".to_vec());
    }

    #[test]
    fn escapes_string_delimiters_and_high_bytes() {
        assert_eq!(pdf_string(b"a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(pdf_string(b"\xe9"), "(\\351)");
    }

    #[test]
    fn bold_capitals_fit_fewer_chars() {
        let body = chars_per_line("frecuencia de despliegue", false, 10.0, 400.0);
        let heading = chars_per_line("RENDIMIENTO DE ENTREGA", true, 10.0, 400.0);
        assert!(heading < body);
        assert_eq!(chars_per_line("", false, 10.0, 400.0), 71);
    }

    #[test]
    fn estimate_never_overflows_bold_capitals() {
        let text = "MMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMM";
        let max = chars_per_line(text, true, 13.0, 200.0);
        let width: f32 = text
            .chars()
            .take(max)
            .map(|c| glyph_width(c, true) * 13.0 / 1000.0)
            .sum();
        assert!(width <= 200.0);
    }
}
