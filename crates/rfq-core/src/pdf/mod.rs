//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Turns stored document bytes into text for extraction.
pub trait TextDecoder: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<String>;
}

/// Decodes PDFs with [`PdfExtractor`]; passes UTF-8 plain text through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecoder;

impl TextDecoder for AutoDecoder {
    fn decode(&self, data: &[u8]) -> Result<String> {
        if is_pdf(data) {
            return decode_text(data);
        }
        match std::str::from_utf8(data) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => decode_text(data),
        }
    }
}

/// Whether `data` starts with the PDF header.
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

/// Decode the text content of a PDF held in memory.
pub fn decode_text(data: &[u8]) -> Result<String> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    extractor.extract_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_decoder_passes_text_through() {
        let text = AutoDecoder.decode("QTY: 3\nlead time 10".as_bytes()).unwrap();
        assert_eq!(text, "QTY: 3\nlead time 10");
    }

    #[test]
    fn test_auto_decoder_rejects_binary_garbage() {
        assert!(AutoDecoder.decode(&[0xff, 0xfe, 0x00, 0x81]).is_err());
        assert!(AutoDecoder.decode(b"%PDF-1.7 truncated").is_err());
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.5\n"));
        assert!(!is_pdf(b"PDF"));
    }
}
