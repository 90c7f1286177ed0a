// --- File: crates/ruangbook_admin/src/export.rs ---
//! CSV and PDF renderings of the dashboard booking list.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use ruangbook_common::models::{Booking, BookingStatus};
use std::fmt::Write as _;

const CSV_HEADER: [&str; 9] = [
    "No",
    "Tanggal Booking",
    "Tanggal Penggunaan",
    "Ruang",
    "Nama",
    "Unit Kerja",
    "Jam",
    "Peserta",
    "Status",
];

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// `10 Maret 2025`
pub fn indonesian_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `10/03/2025 15:42` in the office time zone.
pub fn local_timestamp(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string()
}

pub fn status_label(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "Aktif",
        BookingStatus::Cancelled => "Dibatalkan",
    }
}

/// `bookings-2025-03-10.csv`
pub fn file_name(today: NaiveDate, extension: &str) -> String {
    format!("bookings-{}.{}", today.format("%Y-%m-%d"), extension)
}

fn row_cells(index: usize, booking: &Booking, tz: Tz) -> [String; 9] {
    [
        (index + 1).to_string(),
        local_timestamp(booking.created_at, tz),
        indonesian_date(booking.usage_date),
        booking.room.label().to_string(),
        booking.booker_name.clone(),
        booking.department.as_str().to_string(),
        booking.time_range(),
        booking.participant_count.to_string(),
        status_label(booking.status).to_string(),
    ]
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

pub fn to_csv(bookings: &[Booking], tz: Tz) -> String {
    let mut lines = Vec::with_capacity(bookings.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for (index, booking) in bookings.iter().enumerate() {
        let cells: Vec<String> = row_cells(index, booking, tz)
            .iter()
            .map(|cell| quote(cell))
            .collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

// --- PDF ---

// A4 landscape in points.
const PAGE_WIDTH: u32 = 842;
const PAGE_HEIGHT: u32 = 595;
const MARGIN: u32 = 40;
const LINE_HEIGHT: u32 = 16;
const TITLE_SIZE: u32 = 16;
const BODY_SIZE: u32 = 9;
const FIRST_PAGE_ROWS: usize = 27;
const ROWS_PER_PAGE: usize = 30;

/// Column x positions and the number of characters that fit in each.
const COLUMNS: [(u32, usize); 9] = [
    (40, 4),
    (70, 17),
    (160, 19),
    (265, 16),
    (355, 30),
    (510, 11),
    (575, 14),
    (660, 8),
    (710, 12),
];

// WinAnsiEncoding code for characters outside printable ASCII.
fn win_ansi(c: char) -> Option<u8> {
    let code = match c {
        '\u{A0}'..='\u{FF}' => return u8::try_from(u32::from(c)).ok(),
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

fn pdf_text(value: &str, max_chars: usize) -> String {
    let clipped: Vec<char> = if value.chars().count() > max_chars {
        value
            .chars()
            .take(max_chars.saturating_sub(3))
            .chain("...".chars())
            .collect()
    } else {
        value.chars().collect()
    };

    let mut out = String::with_capacity(clipped.len());
    for c in clipped {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => match win_ansi(c) {
                Some(code) => {
                    let _ = write!(out, "\\{:03o}", code);
                }
                None => out.push('?'),
            },
        }
    }
    out
}

fn text_at(out: &mut String, size: u32, x: u32, y: u32, value: &str, max_chars: usize) {
    let _ = writeln!(
        out,
        "BT /F1 {} Tf {} {} Td ({}) Tj ET",
        size,
        x,
        y,
        pdf_text(value, max_chars)
    );
}

fn table_row(out: &mut String, y: u32, cells: &[String; 9]) {
    for ((x, width), cell) in COLUMNS.iter().zip(cells.iter()) {
        text_at(out, BODY_SIZE, *x, y, cell, *width);
    }
}

fn header_cells() -> [String; 9] {
    CSV_HEADER.map(str::to_string)
}

fn page_content(
    page: usize,
    pages: usize,
    rows: &[[String; 9]],
    title: &str,
    generated: &str,
) -> String {
    let mut out = String::new();
    let mut y = PAGE_HEIGHT - MARGIN;
    if page == 0 {
        text_at(&mut out, TITLE_SIZE, MARGIN, y, title, 90);
        y -= LINE_HEIGHT + 4;
        text_at(&mut out, BODY_SIZE, MARGIN, y, generated, 120);
        y -= LINE_HEIGHT * 2;
    }
    table_row(&mut out, y, &header_cells());
    let _ = writeln!(
        out,
        "{} {} m {} {} l S",
        MARGIN,
        y - 4,
        PAGE_WIDTH - MARGIN,
        y - 4
    );
    y -= LINE_HEIGHT;

    if rows.is_empty() {
        text_at(&mut out, BODY_SIZE, MARGIN, y, "Tidak ada data booking", 60);
    }
    for row in rows {
        table_row(&mut out, y, row);
        y -= LINE_HEIGHT;
    }

    let footer = format!("Halaman {} dari {}", page + 1, pages);
    text_at(&mut out, BODY_SIZE, PAGE_WIDTH - MARGIN - 80, MARGIN / 2, &footer, 30);
    out
}

fn paginate(rows: &[[String; 9]]) -> Vec<&[[String; 9]]> {
    let split = rows.len().min(FIRST_PAGE_ROWS);
    let (first, rest) = rows.split_at(split);
    let mut pages = vec![first];
    pages.extend(rest.chunks(ROWS_PER_PAGE));
    pages
}

/// Single-font PDF 1.4 document: one table line per booking, paginated.
pub fn to_pdf(bookings: &[Booking], tz: Tz, generated_at: DateTime<Utc>) -> Vec<u8> {
    let rows: Vec<[String; 9]> = bookings
        .iter()
        .enumerate()
        .map(|(index, booking)| row_cells(index, booking, tz))
        .collect();
    let pages = paginate(&rows);
    let generated = format!(
        "Dicetak: {} - {} booking",
        local_timestamp(generated_at, tz),
        bookings.len()
    );

    // Objects: 1 catalog, 2 page tree, 3 font, then a page and its content stream per page.
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + i * 2).collect();
    let mut objects: Vec<String> = Vec::with_capacity(3 + pages.len() * 2);
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );

    for (index, page_rows) in pages.iter().enumerate() {
        let content = page_content(
            index,
            pages.len(),
            page_rows,
            "Laporan Booking Ruang Diskusi",
            &generated,
        );
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            page_ids[index] + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        let _ = write!(pdf, "{} 0 obj\n{}\nendobj\n", index + 1, object);
    }

    let xref_offset = pdf.len();
    let _ = write!(pdf, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(pdf, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        pdf,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    pdf.into_bytes()
}
