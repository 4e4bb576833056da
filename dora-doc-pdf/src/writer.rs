//! Minimal PDF 1.4 object writer.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

/// Writes numbered objects sequentially and finishes with the xref table.
pub(crate) struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
    compress: bool,
}

impl PdfWriter {
    pub(crate) fn new(compress: bool) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");
        Self {
            buf,
            offsets: Vec::new(),
            compress,
        }
    }

    /// Id the next written object receives.
    pub(crate) fn next_id(&self) -> usize {
        self.offsets.len() + 1
    }

    /// Write a dictionary or other plain object. Returns its id.
    pub(crate) fn object(&mut self, body: &str) -> usize {
        let id = self.start_object();
        self.buf.extend_from_slice(body.as_bytes());
        self.buf.extend_from_slice(b"\nendobj\n");
        id
    }

    /// Write a stream object with extra dictionary entries. Returns its id.
    pub(crate) fn stream(&mut self, dict: &str, data: &[u8]) -> std::io::Result<usize> {
        let (data, filter) = if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            (encoder.finish()?, " /Filter /FlateDecode")
        } else {
            (data.to_vec(), "")
        };

        let id = self.start_object();
        let header = format!("<< {dict}{filter} /Length {} >>\nstream\n", data.len());
        self.buf.extend_from_slice(header.as_bytes());
        self.buf.extend_from_slice(&data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
        Ok(id)
    }

    fn start_object(&mut self) -> usize {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        id
    }

    /// Append the xref table and trailer.
    pub(crate) fn finish(mut self, root: usize) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", self.offsets.len() + 1);
        for offset in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            self.offsets.len() + 1
        ));
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}
