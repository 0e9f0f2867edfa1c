//! PDF payslip rendering.
//!
//! Overlays the formatted payslip values onto the first page of a template
//! PDF. The template is read into memory and its file handle released before
//! any drawing happens; the output is built in a private buffer and handed
//! back only once the whole document has been written.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Instant;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::layout::{Alignment, PayslipLayout};
use super::values::PayslipValues;

/// Resource name the overlay font is registered under on the page.
const FONT_RESOURCE: &str = "FPayslip";

/// Default text size in points.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Height assumed when the template carries no usable MediaBox (A4).
const FALLBACK_PAGE_HEIGHT: f32 = 842.0;

/// Advance widths of Helvetica for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // A..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // a..z
    334, 260, 334, 584, // {..~
];

/// Renders payslips from a fixed template and layout.
#[derive(Debug, Clone)]
pub struct PayslipRenderer {
    template_path: PathBuf,
    layout: PayslipLayout,
    font_size: f32,
}

impl PayslipRenderer {
    /// Creates a renderer for a template file.
    pub fn new(template_path: impl Into<PathBuf>, layout: PayslipLayout, font_size: f32) -> Self {
        Self {
            template_path: template_path.into(),
            layout,
            font_size,
        }
    }

    /// The template this renderer draws on.
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// The field layout in use.
    pub fn layout(&self) -> &PayslipLayout {
        &self.layout
    }

    /// Renders one payslip. See [`render_payslip`].
    pub fn render(&self, values: &PayslipValues) -> EngineResult<Vec<u8>> {
        render_payslip(&self.template_path, &self.layout, values, self.font_size)
    }
}

/// Overlays payslip values onto a template PDF and returns the new document.
///
/// # Errors
///
/// - `TemplateMissing` when the template file does not exist.
/// - `RenderError` when the template cannot be read or parsed, has no
///   pages, or the output cannot be written.
///
/// No bytes are returned on error.
pub fn render_payslip(
    template_path: &Path,
    layout: &PayslipLayout,
    values: &PayslipValues,
    font_size: f32,
) -> EngineResult<Vec<u8>> {
    let started = Instant::now();
    let mut doc = load_template(template_path)?;

    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| EngineError::render("template has no pages"))?;

    let page_height = page_height(&doc, page_id);
    register_font(&mut doc, page_id).map_err(EngineError::render)?;

    // Closes the `q` wrapped around the template's own content.
    let mut operations = vec![
        Operation::new("Q", vec![]),
        Operation::new("q", vec![]),
        Operation::new("g", vec![0.into()]),
    ];
    for (field, text) in values.iter() {
        let position = layout.position(field);
        let x = match position.align {
            Alignment::Left => position.x,
            Alignment::Right => position.x - text_width(text, font_size),
        };
        let y = page_height - position.y;

        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT_RESOURCE.into(), font_size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }
    operations.push(Operation::new("Q", vec![]));

    let overlay = Content { operations }
        .encode()
        .map_err(EngineError::render)?;
    wrap_page_contents(&mut doc, page_id, overlay).map_err(EngineError::render)?;

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(EngineError::render)?;

    debug!(
        template = %template_path.display(),
        bytes = buffer.len(),
        duration_us = started.elapsed().as_micros() as u64,
        "Payslip rendered"
    );
    Ok(buffer)
}

/// Width of `text` in points when set in Helvetica at `font_size`.
///
/// Characters outside printable ASCII are measured as a digit.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                u32::from(HELVETICA_WIDTHS[(code - 32) as usize])
            } else {
                556
            }
        })
        .sum();
    units as f32 * font_size / 1000.0
}

fn load_template(path: &Path) -> EngineResult<Document> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            warn!(template = %path.display(), "Payslip template missing");
            EngineError::TemplateMissing {
                path: path.display().to_string(),
            }
        } else {
            EngineError::render(format!("cannot open template {}: {}", path.display(), e))
        }
    })?;

    // The reader owns the handle; it is closed when this call returns.
    Document::load_from(BufReader::new(file))
        .map_err(|e| EngineError::render(format!("cannot parse template {}: {}", path.display(), e)))
}

/// Walks up the page tree looking for an inheritable attribute.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dict = doc.get_dictionary(id).ok()?;
        if let Ok(value) = dict.get(key) {
            return match value {
                Object::Reference(target) => doc.get_object(*target).ok(),
                other => Some(other),
            };
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

fn page_height(doc: &Document, page_id: ObjectId) -> f32 {
    let bounds = inherited_attribute(doc, page_id, b"MediaBox")
        .and_then(|media_box| media_box.as_array().ok())
        .filter(|values| values.len() == 4)
        .and_then(|values| Some((values[1].as_float().ok()?, values[3].as_float().ok()?)));

    match bounds {
        Some((bottom, top)) => top - bottom,
        None => FALLBACK_PAGE_HEIGHT,
    }
}

/// Adds the overlay font to the page's font resources.
///
/// Resources inherited from the page tree are copied onto the page first so
/// the template's own fonts stay reachable.
fn register_font(doc: &mut Document, page_id: ObjectId) -> lopdf::Result<()> {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let existing = doc.get_dictionary(page_id)?.get(b"Resources").ok().cloned();
    let shared_resources = match existing {
        Some(Object::Reference(id)) => Some(id),
        Some(Object::Dictionary(_)) => None,
        _ => {
            let inherited = inherited_attribute(doc, page_id, b"Resources")
                .and_then(|resources| resources.as_dict().ok())
                .cloned()
                .unwrap_or_else(Dictionary::new);
            doc.get_dictionary_mut(page_id)?.set("Resources", inherited);
            None
        }
    };

    let resources = match shared_resources {
        Some(id) => doc.get_dictionary_mut(id)?,
        None => doc
            .get_dictionary_mut(page_id)?
            .get_mut(b"Resources")?
            .as_dict_mut()?,
    };

    let shared_fonts = match resources.get(b"Font") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    match shared_fonts {
        Some(id) => {
            doc.get_dictionary_mut(id)?.set(FONT_RESOURCE, font_id);
        }
        None => {
            if !matches!(resources.get(b"Font"), Ok(Object::Dictionary(_))) {
                resources.set("Font", Dictionary::new());
            }
            resources
                .get_mut(b"Font")?
                .as_dict_mut()?
                .set(FONT_RESOURCE, font_id);
        }
    }

    Ok(())
}

/// Saves the graphics state before the template's content streams and
/// appends `overlay`, which must start by restoring it.
fn wrap_page_contents(
    doc: &mut Document,
    page_id: ObjectId,
    overlay: Vec<u8>,
) -> lopdf::Result<()> {
    let existing = doc.get_page_contents(page_id);

    let open = doc.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
    let mut close = b"\n".to_vec();
    close.extend(overlay);
    let close = doc.add_object(Stream::new(dictionary! {}, close));

    let mut contents: Vec<Object> = Vec::with_capacity(existing.len() + 2);
    contents.push(open.into());
    contents.extend(existing.into_iter().map(Object::Reference));
    contents.push(close.into());

    doc.get_dictionary_mut(page_id)?.set("Contents", contents);
    Ok(())
}

/// Encodes text for a WinAnsi font.
///
/// Characters outside Latin-1 become `?`, as do the C1 controls, whose
/// byte values WinAnsi assigns to other glyphs.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(0x80..=0x9F) | Err(_) => b'?',
            Ok(byte) => byte,
        })
        .collect()
}
