//! Text Extractor — turns uploads and remote pages into plain text.

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use tracing::debug;

use crate::errors::AppError;

/// Character budget for text sent to the LLM. Measured in raw characters,
/// not tokens: a hard cut at this offset, no sentence-boundary awareness.
pub const MAX_TEXT_CHARS: usize = 12_000;

/// Extracts plain text from an uploaded file, sniffing the format from the
/// filename extension. PDFs are extracted page by page (a page with no
/// extractable text contributes an empty string); DOCX files contribute
/// their paragraph text; everything else is decoded as UTF-8 with invalid
/// bytes dropped rather than failing.
pub fn extract_text_from_upload(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".pdf") {
        debug!("Extracting text from PDF upload '{filename}'");
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| AppError::Extraction(format!("could not read PDF '{filename}': {e}")))?;
        Ok(pages.join("\n"))
    } else if lower.ends_with(".docx") {
        debug!("Extracting text from DOCX upload '{filename}'");
        let docx = read_docx(bytes)
            .map_err(|e| AppError::Extraction(format!("could not read DOCX '{filename}': {e}")))?;
        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();
        Ok(paragraphs.join("\n"))
    } else {
        debug!("Reading upload '{filename}' as plain text");
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Fetches a remote page and reduces it to visible text, one block per line.
/// Network and non-2xx failures propagate; the fetch client carries the
/// configured short timeout.
pub async fn fetch_page_text(client: &reqwest::Client, url: &str) -> Result<String, AppError> {
    debug!("Fetching page text from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("failed to fetch '{url}': {e}")))?
        .error_for_status()
        .map_err(|e| AppError::Upstream(format!("failed to fetch '{url}': {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| AppError::Upstream(format!("failed to read body of '{url}': {e}")))?;

    html2text::from_read(html.as_bytes(), 80)
        .map_err(|e| AppError::Extraction(format!("could not render page text: {e}")))
}

/// Concatenated text of every run in a paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(text) = run_child {
                    out.push_str(&text.text);
                }
            }
        }
    }
    out
}

/// Hard cut at a character budget, respecting UTF-8 boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_upload_decodes_utf8() {
        let text = extract_text_from_upload("notes.txt", "community grant".as_bytes()).unwrap();
        assert_eq!(text, "community grant");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_lossy_text() {
        // Invalid UTF-8 must not be a hard failure.
        let bytes = b"grant \xff\xfe budget";
        let text = extract_text_from_upload("upload.bin", bytes).unwrap();
        assert!(text.contains("grant"));
        assert!(text.contains("budget"));
    }

    #[test]
    fn test_garbage_pdf_is_an_extraction_error() {
        let result = extract_text_from_upload("broken.pdf", b"not a pdf at all");
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_garbage_docx_is_an_extraction_error() {
        let result = extract_text_from_upload("broken.docx", b"not a docx at all");
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_extension_sniffing_is_case_insensitive() {
        let result = extract_text_from_upload("REPORT.PDF", b"still not a pdf");
        // Routed to the PDF reader, not the lossy-text fallback.
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_truncate_under_budget_is_untouched() {
        assert_eq!(truncate_chars("short text", 100), "short text");
    }

    #[test]
    fn test_truncate_cuts_at_exact_character_offset() {
        let text = "abcdef";
        assert_eq!(truncate_chars(text, 4), "abcd");
        assert_eq!(truncate_chars(text, 6), "abcdef");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        // Four 3-byte characters: a budget of 2 keeps two characters.
        let text = "日本語文";
        assert_eq!(truncate_chars(text, 2), "日本");
    }
}
