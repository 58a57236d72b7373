//! Parser for the book-crossing CSV files.
//!
//! - Books.csv: `ISBN`, `Book-Title`, `Book-Author`, `Year-Of-Publication`, `Publisher`, ...
//! - Ratings.csv: `User-ID`, `ISBN`, `Book-Rating`
//!
//! Columns are located by header name, so extra columns (the catalog ships
//! three image URL columns) and column order do not matter. Fields are read
//! as bytes and decoded lossily: the public dumps of this dataset contain
//! stray Latin-1 bytes.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{ByteRecord, ReaderBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Required catalog columns, in the order `parse_books_from_reader` uses them
pub const BOOK_COLUMNS: [&str; 5] = [
    "ISBN",
    "Book-Title",
    "Book-Author",
    "Year-Of-Publication",
    "Publisher",
];

/// Required ratings columns, in the order `parse_ratings_from_reader` uses them
pub const RATING_COLUMNS: [&str; 3] = ["User-ID", "ISBN", "Book-Rating"];

/// Open a data file, mapping a missing file to `FileNotFound`
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the book catalog at `path`
pub fn parse_books(path: &Path) -> Result<Vec<Book>> {
    parse_books_from_reader(open(path)?, &file_label(path))
}

/// Parse the ratings table at `path`
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    parse_ratings_from_reader(open(path)?, &file_label(path))
}

/// Parse a book catalog from any reader.
///
/// `file` is only used to label errors.
pub fn parse_books_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Book>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader.byte_headers().map_err(|e| csv_error(file, e))?.clone();
    let [isbn, title, author, year, publisher] = locate_columns(&headers, BOOK_COLUMNS, file)?;

    let mut books = Vec::new();
    let mut record = ByteRecord::new();
    while reader
        .read_byte_record(&mut record)
        .map_err(|e| csv_error(file, e))?
    {
        books.push(Book {
            isbn: field(&record, isbn).into_owned(),
            title: field(&record, title).into_owned(),
            author: optional_text(&record, author),
            publisher: optional_text(&record, publisher),
            year: parse_year(&field(&record, year)),
        });
    }
    Ok(books)
}

/// Parse a ratings table from any reader.
///
/// Unlike catalog metadata, user ids and rating values are required: a row
/// that cannot be parsed fails the whole load.
pub fn parse_ratings_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Rating>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader.byte_headers().map_err(|e| csv_error(file, e))?.clone();
    let [user_id, isbn, rating] = locate_columns(&headers, RATING_COLUMNS, file)?;

    let mut ratings = Vec::new();
    let mut record = ByteRecord::new();
    while reader
        .read_byte_record(&mut record)
        .map_err(|e| csv_error(file, e))?
    {
        let line_no = record.position().map(|p| p.line()).unwrap_or(0);
        let parse_error = |reason: String| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason,
        };

        let user_raw = field(&record, user_id);
        let user_id: UserId = user_raw
            .trim()
            .parse()
            .map_err(|e| parse_error(format!("Invalid User-ID '{}': {}", user_raw, e)))?;

        let rating_raw = field(&record, rating);
        let rating: f32 = rating_raw
            .trim()
            .parse()
            .map_err(|e| parse_error(format!("Invalid Book-Rating '{}': {}", rating_raw, e)))?;
        if !rating.is_finite() {
            return Err(parse_error(format!("Invalid Book-Rating '{}'", rating_raw)));
        }

        ratings.push(Rating {
            user_id,
            isbn: field(&record, isbn).into_owned(),
            rating,
        });
    }
    Ok(ratings)
}

fn csv_error(file: &str, source: csv::Error) -> DataLoadError {
    DataLoadError::Csv {
        file: file.to_string(),
        source,
    }
}

/// Find the position of every required column in the header row
fn locate_columns<const N: usize>(
    headers: &ByteRecord,
    required: [&str; N],
    file: &str,
) -> Result<[usize; N]> {
    let mut positions = [0; N];
    for (slot, column) in positions.iter_mut().zip(required) {
        *slot = headers
            .iter()
            .position(|header| header_name(header) == column)
            .ok_or_else(|| DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            })?;
    }
    Ok(positions)
}

/// Header text without surrounding whitespace or a UTF-8 byte order mark
fn header_name(raw: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(raw);
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim_start_matches('\u{feff}').trim()),
        Cow::Owned(s) => Cow::Owned(s.trim_start_matches('\u{feff}').trim().to_string()),
    }
}

fn field(record: &ByteRecord, pos: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(record.get(pos).unwrap_or_default())
}

/// Empty cells are gaps, everything else is kept verbatim
fn optional_text(record: &ByteRecord, pos: usize) -> Option<String> {
    let value = field(record, pos);
    (!value.is_empty()).then(|| value.into_owned())
}

/// Parse a publication year, tolerating float formatting.
///
/// Examples: "2002" -> Some(2002), "2002.0" -> Some(2002),
///           "DK Publishing Inc" -> None
fn parse_year(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<u16>() {
        return Some(year);
    }
    let year: f64 = raw.parse().ok()?;
    (year.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&year)).then_some(year as u16)
}
