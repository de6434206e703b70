//! Text extraction from supported file formats

use crate::error::{MiniAtsError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            MiniAtsError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let docx_error = |e: String| {
            MiniAtsError::DocxExtraction(format!("Failed to extract text from DOCX '{}': {}", path.display(), e))
        };

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| docx_error(e.to_string()))?;
        let mut document_xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| docx_error(e.to_string()))?
            .read_to_string(&mut document_xml)?;

        document_xml_to_text(&document_xml).map_err(|e| docx_error(e.to_string()))
    }
}

/// Paragraph texts of a WordprocessingML body, non-empty ones joined by
/// newlines. Run-level tabs and breaks are kept as `\t` and `\n`.
pub fn document_xml_to_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut in_paragraph_properties = false;

    loop {
        match reader.read_event()? {
            XmlEvent::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:pPr" => in_paragraph_properties = true,
                _ => {}
            },
            XmlEvent::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:pPr" => in_paragraph_properties = false,
                b"w:p" => {
                    if !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            // Tab stops inside paragraph properties are layout, not text
            XmlEvent::Empty(e) if !in_paragraph_properties => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            XmlEvent::Text(e) if in_text => current.push_str(&e.unescape()?),
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        String::from_utf8(bytes).map_err(|_| {
            MiniAtsError::InvalidInput(format!("'{}' is not valid UTF-8 text", path.display()))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = PlainTextExtractor.extract(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Strip Markdown markup, keeping text, inline code and block structure as
/// line breaks
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
