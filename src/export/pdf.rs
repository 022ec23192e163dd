use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use super::errors::{ExportError, ExportResult};
use super::table::{ReportRow, ReportTable, COLUMNS};

// A4 portrait, millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 12.0;
const ROW_HEIGHT: f32 = 7.0;
const TITLE_SIZE: f32 = 16.0;
const TEXT_SIZE: f32 = 9.0;
const CELL_PADDING: f32 = 1.5;

/// Column widths matching [`COLUMNS`]; they add up to the printable width
const COLUMN_WIDTHS: [f32; 6] = [32.0, 34.0, 12.0, 44.0, 28.0, 36.0];

/// Renders a report table as a PDF document
///
/// The title sits on top of the first page. The column header is repeated
/// on every page and rows flow onto new pages as needed.
///
/// Text is set in the built-in Helvetica faces, which only cover the
/// WinAnsi (Latin-1) character set. Names in other scripts, e.g. Devanagari,
/// render as substitute glyphs rather than failing the export.
pub fn render_pdf(table: &ReportTable) -> ExportResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("{} Registrations", table.title()),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Font(format!("{:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Font(format!("{:?}", e)))?;

    let mut canvas = Canvas {
        layer: doc.get_page(page).get_layer(layer),
        cursor: PAGE_HEIGHT - MARGIN,
        regular,
        bold,
    };

    canvas.title(&format!("{} Registrations", table.title()));
    canvas.column_header();

    for row in table.rows() {
        if canvas.cursor - ROW_HEIGHT < MARGIN {
            canvas.new_page(&doc);
        }
        match row {
            ReportRow::TeamHeader(team) => canvas.team_header(team),
            ReportRow::Participant(participant) => canvas.cells(&participant.cells()),
            ReportRow::Spacer => canvas.cursor -= ROW_HEIGHT,
        }
    }

    tracing::debug!(
        title = table.title(),
        rows = table.rows().len(),
        "Rendered registration report"
    );

    doc.save_to_bytes()
        .map_err(|e| ExportError::Render(format!("{:?}", e)))
}

/// Current drawing position within the document
struct Canvas {
    layer: PdfLayerReference,
    /// Baseline of the next row, measured from the page bottom
    cursor: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas {
    fn title(&mut self, text: &str) {
        self.cursor -= TITLE_SIZE * 0.5;
        self.layer
            .use_text(text, TITLE_SIZE, Mm(MARGIN), Mm(self.cursor), &self.bold);
        self.cursor -= ROW_HEIGHT;
    }

    fn column_header(&mut self) {
        let mut x = MARGIN;
        for (label, width) in COLUMNS.iter().zip(COLUMN_WIDTHS) {
            self.layer.use_text(
                *label,
                TEXT_SIZE,
                Mm(x + CELL_PADDING),
                Mm(self.cursor),
                &self.bold,
            );
            x += width;
        }
        self.rule(self.cursor - 2.0);
        self.cursor -= ROW_HEIGHT;
    }

    fn team_header(&mut self, team: &str) {
        let width = PAGE_WIDTH - 2.0 * MARGIN;
        self.layer.use_text(
            fit_to_width(team, width),
            TEXT_SIZE + 1.0,
            Mm(MARGIN + CELL_PADDING),
            Mm(self.cursor),
            &self.bold,
        );
        self.rule(self.cursor - 2.0);
        self.cursor -= ROW_HEIGHT;
    }

    fn cells(&mut self, cells: &[String; 6]) {
        let mut x = MARGIN;
        for (text, width) in cells.iter().zip(COLUMN_WIDTHS) {
            self.layer.use_text(
                fit_to_width(text, width),
                TEXT_SIZE,
                Mm(x + CELL_PADDING),
                Mm(self.cursor),
                &self.regular,
            );
            x += width;
        }
        self.cursor -= ROW_HEIGHT;
    }

    /// Full-width horizontal line at height `y`
    fn rule(&self, y: f32) {
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn new_page(&mut self, doc: &PdfDocumentReference) {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;
        self.column_header();
    }
}

/// Truncates `text` so it fits a column of `width_mm` at body text size
///
/// Uses an average Helvetica glyph width; long values end in "..".
fn fit_to_width(text: &str, width_mm: f32) -> String {
    // Average glyph is roughly half an em; 1pt = 0.3528mm
    let glyph_mm = TEXT_SIZE * 0.3528 * 0.5;
    let max_chars = ((width_mm - 2.0 * CELL_PADDING) / glyph_mm).floor() as usize;

    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    format!("{}..", kept)
}
