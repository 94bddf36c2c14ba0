//! Minimal PDF table writer
//!
//! Produces a PDF 1.4 document on US Letter pages using the built-in
//! Helvetica fonts (no embedding). The table header is shaded grey and
//! repeated on every page; every cell is boxed. Column widths are
//! proportional to the longest text in the column, and cell text that does
//! not fit is cut with `...`.

use super::{ReportError, ReportTable};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 40.0;
const ROW_HEIGHT: f32 = 18.0;
const FONT_SIZE: f32 = 9.0;
const CELL_PADDING: f32 = 4.0;
/// Average Helvetica glyph width as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.55;
/// Minimum column width in characters
const MIN_COLUMN_CHARS: usize = 4;

/// Render `table` as a PDF document. Refuses an empty table.
pub fn to_pdf(table: &ReportTable) -> Result<Vec<u8>, ReportError> {
    if table.is_empty() {
        return Err(ReportError::Empty);
    }

    let widths = column_widths(table);
    let rows_per_page = rows_per_page();
    let pages: Vec<String> = table
        .rows
        .chunks(rows_per_page)
        .map(|rows| page_content(&table.headers, rows, &widths))
        .collect();

    Ok(assemble(&pages))
}

fn rows_per_page() -> usize {
    let usable = PAGE_HEIGHT - 2.0 * MARGIN;
    // one row reserved for the header
    ((usable / ROW_HEIGHT) as usize).saturating_sub(1).max(1)
}

fn column_widths(table: &ReportTable) -> Vec<f32> {
    let chars: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_CHARS)
        })
        .collect();
    let total: usize = chars.iter().sum();
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    chars
        .iter()
        .map(|&c| usable * c as f32 / total as f32)
        .collect()
}

/// Cut `text` so it fits in a column `width` points wide
fn fit(text: &str, width: f32) -> String {
    let max_chars = ((width - 2.0 * CELL_PADDING) / (FONT_SIZE * GLYPH_WIDTH)).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Escape a string for a PDF literal, mapping to WinAnsi (Latin-1 subset)
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out
}

/// Content stream operators for one page, one per line
fn page_content(headers: &[&str], rows: &[Vec<String>], widths: &[f32]) -> String {
    let top = PAGE_HEIGHT - MARGIN;
    let table_width: f32 = widths.iter().sum();
    let mut ops = Vec::new();

    // header shading
    ops.push(format!(
        "0.75 g {MARGIN:.2} {:.2} {table_width:.2} {ROW_HEIGHT:.2} re f 0 g",
        top - ROW_HEIGHT
    ));

    // grid
    ops.push("0 G 0.5 w".to_string());
    for r in 0..=rows.len() {
        let y = top - ROW_HEIGHT * (r as f32 + 1.0);
        let mut x = MARGIN;
        for w in widths {
            ops.push(format!("{x:.2} {y:.2} {w:.2} {ROW_HEIGHT:.2} re S"));
            x += w;
        }
    }

    // text
    let header_cells = headers.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    let lines = std::iter::once((&header_cells, "F2")).chain(rows.iter().map(|r| (r, "F1")));
    for (r, (cells, font)) in lines.enumerate() {
        let baseline = top - ROW_HEIGHT * (r as f32 + 1.0) + (ROW_HEIGHT - FONT_SIZE) / 2.0 + 2.0;
        let mut x = MARGIN;
        for (cell, w) in cells.iter().zip(widths) {
            let text = escape(&fit(cell, *w));
            ops.push(format!(
                "BT /{font} {FONT_SIZE:.1} Tf {:.2} {baseline:.2} Td ({text}) Tj ET",
                x + CELL_PADDING
            ));
            x += w;
        }
    }

    let mut content = ops.join("\n");
    content.push('\n');
    content
}

/// Lay out objects and the cross-reference table
fn assemble(pages: &[String]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 regular font, 4 bold font,
    // then a (page, content) pair per page
    let page_obj = |i: usize| 5 + 2 * i;
    let mut objects: Vec<String> = Vec::with_capacity(4 + 2 * pages.len());

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", page_obj(i)))
        .collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    for (i, content) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            page_obj(i) + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}endstream",
            content.len()
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let size = objects.len() + 1;
    let xref_start = out.len();
    out.push_str(&format!("xref\n0 {size}\n0000000000 65535 f \n"));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n"
    ));
    out.into_bytes()
}
