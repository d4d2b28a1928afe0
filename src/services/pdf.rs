// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PDF export of a user's activity list.
//!
//! Writes a small PDF 1.4 document by hand: A4 pages, the standard Helvetica
//! fonts (no embedding), a title block and a bordered table with a filled
//! header row and alternating row shading. Long lists continue on further
//! pages.

use chrono::NaiveDate;

use crate::models::Activity;

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 40.0;
const ROW_HEIGHT: f64 = 18.0;
const FONT_SIZE: f64 = 9.0;
const CELL_PADDING: f64 = 4.0;
const ELLIPSIS: &str = "...";
const FIRST_TABLE_TOP: f64 = 760.0;
const TABLE_TOP: f64 = 800.0;
const BOTTOM_MARGIN: f64 = 50.0;

const TITLE: &str = "EcoTrack Activity Report";
const EMPTY_ROW: &str = "No activities recorded.";

/// Column titles and widths in points; widths sum to the printable width.
const COLUMNS: [(&str, f64); 6] = [
    ("Date", 80.0),
    ("Travel Mode", 85.0),
    ("Distance (KM)", 85.0),
    ("Electricity (kWh)", 95.0),
    ("Diet Type", 80.0),
    ("CO2 (kg)", 90.0),
];

// Object numbers of the fixed objects; pages start right after them.
const CATALOG_OBJ: usize = 1;
const PAGES_OBJ: usize = 2;
const FONT_REGULAR_OBJ: usize = 3;
const FONT_BOLD_OBJ: usize = 4;
const FIRST_PAGE_OBJ: usize = 5;

/// Render the activity table as a PDF document.
pub fn to_pdf(activities: &[Activity], generated_on: NaiveDate) -> Vec<u8> {
    let mut rows: Vec<Vec<String>> = activities
        .iter()
        .map(|a| {
            vec![
                a.date.to_string(),
                a.travel_mode.clone(),
                format!("{:.2}", a.travel_km),
                format!("{:.2}", a.electricity_kwh),
                a.diet_type.clone(),
                format!("{:.2}", a.co2_kg),
            ]
        })
        .collect();
    if rows.is_empty() {
        rows.push(vec![EMPTY_ROW.to_string()]);
    }

    let subtitle = format!(
        "Generated {} - {} {}",
        generated_on,
        activities.len(),
        if activities.len() == 1 { "activity" } else { "activities" }
    );

    let chunks = paginate(&rows);
    let page_count = chunks.len();
    let contents: Vec<String> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let heading = (index == 0).then_some(subtitle.as_str());
            page_content(chunk, heading, index + 1, page_count)
        })
        .collect();

    assemble(&contents)
}

/// Data rows that fit below the header row on a page whose table starts at `top`.
fn rows_per_page(top: f64) -> usize {
    ((top - BOTTOM_MARGIN) / ROW_HEIGHT).floor() as usize - 1
}

fn paginate(rows: &[Vec<String>]) -> Vec<&[Vec<String>]> {
    let mut pages = Vec::new();
    let mut rest = rows;
    let mut top = FIRST_TABLE_TOP;
    while !rest.is_empty() {
        let take = rows_per_page(top).min(rest.len());
        let (page, tail) = rest.split_at(take);
        pages.push(page);
        rest = tail;
        top = TABLE_TOP;
    }
    pages
}

fn page_content(
    rows: &[Vec<String>],
    subtitle: Option<&str>,
    page_number: usize,
    page_count: usize,
) -> String {
    let mut s = String::new();

    let top = match subtitle {
        Some(subtitle) => {
            s.push_str("0 0 0 rg\n");
            text(&mut s, "F2", 18.0, MARGIN, 800.0, TITLE);
            text(&mut s, "F1", 10.0, MARGIN, 782.0, subtitle);
            FIRST_TABLE_TOP
        }
        None => TABLE_TOP,
    };

    let header: Vec<String> = COLUMNS.iter().map(|(title, _)| title.to_string()).collect();
    draw_row(&mut s, top, &header, RowStyle::Header);
    for (i, row) in rows.iter().enumerate() {
        let style = if i % 2 == 1 { RowStyle::Shaded } else { RowStyle::Plain };
        draw_row(&mut s, top - (i + 1) as f64 * ROW_HEIGHT, row, style);
    }

    s.push_str("0.4 0.4 0.4 rg\n");
    text(
        &mut s,
        "F1",
        8.0,
        PAGE_WIDTH - MARGIN - 60.0,
        30.0,
        &format!("Page {page_number} of {page_count}"),
    );
    s
}

#[derive(Clone, Copy)]
enum RowStyle {
    Header,
    Plain,
    Shaded,
}

fn draw_row(s: &mut String, row_top: f64, cells: &[String], style: RowStyle) {
    let y = row_top - ROW_HEIGHT;
    let width: f64 = COLUMNS.iter().map(|(_, w)| w).sum();

    match style {
        RowStyle::Header => s.push_str("0.18 0.49 0.20 rg\n"),
        RowStyle::Shaded => s.push_str("0.94 0.97 0.94 rg\n"),
        RowStyle::Plain => {}
    }
    if !matches!(style, RowStyle::Plain) {
        s.push_str(&format!("{MARGIN:.2} {y:.2} {width:.2} {ROW_HEIGHT:.2} re f\n"));
    }

    s.push_str("0.6 0.6 0.6 RG 0.5 w\n");
    let mut x = MARGIN;
    for (_, w) in COLUMNS {
        s.push_str(&format!("{x:.2} {y:.2} {w:.2} {ROW_HEIGHT:.2} re S\n"));
        x += w;
    }

    let (font, color) = match style {
        RowStyle::Header => ("F2", "1 1 1 rg\n"),
        _ => ("F1", "0 0 0 rg\n"),
    };
    s.push_str(color);
    let mut x = MARGIN;
    for (cell, (_, w)) in cells.iter().zip(COLUMNS) {
        let cell = match style {
            RowStyle::Header => cell.clone(),
            _ => fit_cell(cell, w - 2.0 * CELL_PADDING),
        };
        text(s, font, FONT_SIZE, x + CELL_PADDING, y + 5.5, &cell);
        x += w;
    }
}

fn text(s: &mut String, font: &str, size: f64, x: f64, y: f64, value: &str) {
    s.push_str(&format!(
        "BT /{font} {size:.1} Tf {x:.2} {y:.2} Td ({}) Tj ET\n",
        escape(value)
    ));
}

/// Escape a PDF literal string for a WinAnsi font.
///
/// Latin-1 letters are written as octal escapes; anything else outside
/// printable ASCII becomes `?`.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

/// Approximate Helvetica advance width in 1/1000 em, rounded up per class.
fn glyph_width(c: char) -> u32 {
    match c {
        'i' | 'j' | 'l' => 222,
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | 'I' | 'f' | 't' | '[' | ']' | '\\' | '|' => 278,
        '(' | ')' | '-' | 'r' | '\'' | '`' => 333,
        'm' | 'M' => 833,
        'W' => 944,
        '%' => 889,
        '@' => 1015,
        'w' => 722,
        c if c.is_uppercase() => 778,
        _ => 556,
    }
}

fn text_width(value: &str, size: f64) -> f64 {
    value.chars().map(glyph_width).sum::<u32>() as f64 * size / 1000.0
}

/// Shorten `value` with a trailing ellipsis so it fits in `max_width` points.
fn fit_cell(value: &str, max_width: f64) -> String {
    if text_width(value, FONT_SIZE) <= max_width {
        return value.to_string();
    }

    let budget = max_width - text_width(ELLIPSIS, FONT_SIZE);
    let mut out = String::new();
    let mut width = 0.0;
    for c in value.chars() {
        let w = glyph_width(c) as f64 * FONT_SIZE / 1000.0;
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Serialize the object graph with a cross-reference table.
fn assemble(contents: &[String]) -> Vec<u8> {
    let kids: Vec<String> = (0..contents.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJ + 2 * i))
        .collect();

    let mut objects: Vec<String> = vec![
        format!("<< /Type /Catalog /Pages {PAGES_OBJ} 0 R >>"),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            contents.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (i, content) in contents.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent {PAGES_OBJ} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 {FONT_REGULAR_OBJ} 0 R /F2 {FONT_BOLD_OBJ} 0 R >> >> \
             /Contents {} 0 R >>",
            FIRST_PAGE_OBJ + 2 * i + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {CATALOG_OBJ} 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}
