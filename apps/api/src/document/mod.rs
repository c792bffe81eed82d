//! Structural Document Reader — opens a paginated PDF and exposes, per page:
//! extractable text, a table heuristic, embedded images, and characters with
//! their font names.
//!
//! Failure semantics: an unreadable document is terminal for the request;
//! anything that goes wrong inside a single page (missing text, undecodable
//! content stream, absent resources) degrades to empty results instead.

use std::collections::HashMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to open document: {0}")]
    Open(#[from] lopdf::Error),
}

/// Thresholds for the ruling-line table heuristic. A page is considered to
/// carry a table when its content stream draws enough rectangles or enough
/// axis-aligned line segments to form a grid.
#[derive(Debug, Clone)]
pub struct TableDetection {
    pub min_rects: usize,
    pub min_ruling_lines: usize,
}

impl Default for TableDetection {
    fn default() -> Self {
        Self {
            min_rects: 3,
            min_ruling_lines: 6,
        }
    }
}

/// One character from a page's content stream with its resolved font name.
/// Characters are byte-level (encoding-agnostic); only the font association
/// matters to consumers, the page text comes from `Page::text`.
#[derive(Debug, Clone)]
pub struct PageChar {
    pub ch: char,
    /// Resolved `BaseFont` name; empty when the font could not be resolved.
    pub font_name: String,
}

/// An embedded image XObject referenced by a page.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub name: String,
    pub width: i64,
    pub height: i64,
}

/// Read-only structural view of one page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub number: u32,
    pub text: String,
    /// 0 or 1 under the ruling-line heuristic.
    pub table_count: u32,
    pub images: Vec<PageImage>,
    pub chars: Vec<PageChar>,
}

/// Scope-bound handle over an opened PDF. Owns the parsed document for the
/// duration of one request; dropped (and thereby released) on every exit path.
pub struct DocumentReader {
    doc: Document,
    detection: TableDetection,
}

impl DocumentReader {
    /// Opens a PDF from disk. A corrupt or unsupported file is a terminal
    /// error for the whole request.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let doc = Document::load(path)?;
        Ok(Self {
            doc,
            detection: TableDetection::default(),
        })
    }

    /// Produces the ordered page sequence. Per-page extraction never fails;
    /// each signal degrades independently to its empty value.
    pub fn pages(&self) -> Vec<Page> {
        self.doc
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| self.read_page(number, page_id))
            .collect()
    }

    fn read_page(&self, number: u32, page_id: ObjectId) -> Page {
        let text = self.doc.extract_text(&[number]).unwrap_or_default();

        let resources = self.page_resources(page_id);
        let images = resources.map(|r| self.collect_images(r)).unwrap_or_default();
        let font_map = resources.map(|r| self.font_names(r)).unwrap_or_default();

        let (chars, table_count) = match self.doc.get_page_content(page_id) {
            Ok(data) => self.scan_content(&data, &font_map),
            Err(e) => {
                debug!(page = number, "content stream unavailable: {e}");
                (Vec::new(), 0)
            }
        };

        Page {
            number,
            text,
            table_count,
            images,
            chars,
        }
    }

    /// Walks the page's resource dictionary, following `Parent` links for
    /// inherited resources.
    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut dict = self.doc.get_dictionary(page_id).ok()?;
        loop {
            if let Ok(res) = dict.get(b"Resources") {
                return self.resolve_dict(res);
            }
            let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.doc.get_dictionary(parent_id).ok()?;
        }
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Dictionary(d) => Some(d),
            Object::Reference(id) => self.doc.get_object(*id).ok()?.as_dict().ok(),
            _ => None,
        }
    }

    /// Enumerates image XObjects referenced by the page resources.
    fn collect_images(&self, resources: &Dictionary) -> Vec<PageImage> {
        let Some(xobjects) = resources.get(b"XObject").ok().and_then(|o| self.resolve_dict(o))
        else {
            return Vec::new();
        };

        let mut images = Vec::new();
        for (name, object) in xobjects.iter() {
            let stream = match object {
                Object::Reference(id) => {
                    self.doc.get_object(*id).ok().and_then(|o| o.as_stream().ok())
                }
                Object::Stream(s) => Some(s),
                _ => None,
            };
            let Some(stream) = stream else { continue };
            let is_image = stream
                .dict
                .get(b"Subtype")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| n == b"Image")
                .unwrap_or(false);
            if !is_image {
                continue;
            }
            let dim = |key: &[u8]| {
                stream
                    .dict
                    .get(key)
                    .ok()
                    .and_then(|o| o.as_i64().ok())
                    .unwrap_or(0)
            };
            images.push(PageImage {
                name: String::from_utf8_lossy(name).into_owned(),
                width: dim(b"Width"),
                height: dim(b"Height"),
            });
        }
        images
    }

    /// Maps font resource names (e.g. "F1") to their `BaseFont` names.
    fn font_names(&self, resources: &Dictionary) -> HashMap<String, String> {
        let Some(fonts) = resources.get(b"Font").ok().and_then(|o| self.resolve_dict(o))
        else {
            return HashMap::new();
        };

        let mut map = HashMap::new();
        for (name, object) in fonts.iter() {
            let font_dict = self.resolve_dict(object);
            let base_font = font_dict
                .and_then(|d| d.get(b"BaseFont").ok())
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .unwrap_or_default();
            map.insert(String::from_utf8_lossy(name).into_owned(), base_font);
        }
        map
    }

    /// Single pass over the content stream: collects characters with the
    /// active font, and counts drawn rectangles and axis-aligned segments for
    /// the table heuristic.
    fn scan_content(
        &self,
        data: &[u8],
        font_map: &HashMap<String, String>,
    ) -> (Vec<PageChar>, u32) {
        let Ok(content) = Content::decode(data) else {
            return (Vec::new(), 0);
        };

        let mut chars = Vec::new();
        let mut current_font = String::new();
        let mut rects = 0usize;
        let mut ruling_lines = 0usize;
        let mut cursor: Option<(f32, f32)> = None;

        for op in &content.operations {
            match op.operator.as_str() {
                "Tf" => {
                    current_font = op
                        .operands
                        .first()
                        .and_then(|o| o.as_name().ok())
                        .map(|n| String::from_utf8_lossy(n).into_owned())
                        .and_then(|resource| font_map.get(&resource).cloned())
                        .unwrap_or_default();
                }
                "Tj" | "'" | "\"" => {
                    for operand in &op.operands {
                        if let Object::String(bytes, _) = operand {
                            push_chars(&mut chars, bytes, &current_font);
                        }
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        for item in items {
                            if let Object::String(bytes, _) = item {
                                push_chars(&mut chars, bytes, &current_font);
                            }
                        }
                    }
                }
                "re" => rects += 1,
                "m" => cursor = point(&op.operands),
                "l" => {
                    let next = point(&op.operands);
                    if let (Some((x0, y0)), Some((x1, y1))) = (cursor, next) {
                        if (x0 - x1).abs() < 0.5 || (y0 - y1).abs() < 0.5 {
                            ruling_lines += 1;
                        }
                    }
                    cursor = next;
                }
                _ => {}
            }
        }

        let has_table = rects >= self.detection.min_rects
            || ruling_lines >= self.detection.min_ruling_lines;
        (chars, has_table as u32)
    }
}

fn push_chars(chars: &mut Vec<PageChar>, bytes: &[u8], font_name: &str) {
    for &b in bytes {
        chars.push(PageChar {
            ch: b as char,
            font_name: font_name.to_string(),
        });
    }
}

fn point(operands: &[Object]) -> Option<(f32, f32)> {
    match operands {
        [x, y] => Some((x.as_float().ok()?, y.as_float().ok()?)),
        _ => None,
    }
}
