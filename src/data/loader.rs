use std::collections::HashSet;
use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, StringRecord};

use super::encoding::{TextEncoding, FALLBACK_ENCODINGS};
use super::error::ReadError;
use super::model::{CellValue, Table};

/// Field contents treated as missing values.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Extensions routed to the spreadsheet reader.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

// ---------------------------------------------------------------------------
// Encoding fallback
// ---------------------------------------------------------------------------

/// Outcome of walking the encoding list for one file.
#[derive(Debug)]
pub struct FallbackRead {
    /// The first successfully parsed table, if any.
    pub table: Option<Table>,
    /// The encoding that produced `table`.
    pub encoding: Option<TextEncoding>,
    /// Every failed attempt before success (or all of them).
    pub failures: Vec<(TextEncoding, ReadError)>,
}

/// Read a CSV file, trying each of [`FALLBACK_ENCODINGS`] in turn.
///
/// Decoding failures are swallowed; any other failure is logged together
/// with the file and encoding before moving on.  Returns `None` (and logs)
/// when no encoding yields a table.
pub fn read_csv_safe(path: &Path) -> Option<Table> {
    let outcome = read_csv_with_fallback(path);

    for (encoding, err) in &outcome.failures {
        if !err.is_decode() {
            log::warn!("Error reading {} with {encoding}: {err}", path.display());
        }
    }

    if outcome.table.is_none() {
        log::warn!("Failed to read {} with any encoding", path.display());
    }
    outcome.table
}

/// The fallback chain without logging; stops at the first success.
pub fn read_csv_with_fallback(path: &Path) -> FallbackRead {
    let mut failures = Vec::new();

    for encoding in FALLBACK_ENCODINGS {
        match read_csv_with_encoding(path, encoding) {
            Ok(table) => {
                log::debug!(
                    "read {} as {encoding}: {} rows x {} columns",
                    path.display(),
                    table.height(),
                    table.width()
                );
                return FallbackRead {
                    table: Some(table),
                    encoding: Some(encoding),
                    failures,
                };
            }
            Err(err) => failures.push((encoding, err)),
        }
    }

    FallbackRead {
        table: None,
        encoding: None,
        failures,
    }
}

/// One attempt: open, decode with `encoding`, parse.
pub fn read_csv_with_encoding(path: &Path, encoding: TextEncoding) -> Result<Table, ReadError> {
    let bytes = fs::read(path)?;
    let text = encoding
        .decode(&bytes)
        .ok_or(ReadError::Decode { encoding })?;
    parse_csv_text(&text)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse comma-separated text with a header row into a [`Table`].
///
/// * A leading byte-order mark is ignored.
/// * Records shorter than the header are padded with nulls; longer ones
///   are an error.
/// * Cells matching [`NA_VALUES`] become [`CellValue::Null`].
/// * Column types are inferred over all non-null cells of a column.
pub fn parse_csv_text(text: &str) -> Result<Table, ReadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ReadError::NoColumns),
    };
    if is_blank(&header) {
        return Err(ReadError::NoColumns);
    }
    let columns = normalize_headers(header.iter());
    let width = columns.len();

    let mut raw: Vec<Vec<Option<String>>> = Vec::new();
    for record in records {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        if record.len() > width {
            return Err(ReadError::RaggedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|field| (!is_na(field)).then(|| field.to_string()))
            .collect();
        row.resize(width, None);
        raw.push(row);
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| infer_kind(raw.iter().filter_map(|row| row[col].as_deref())))
        .collect();

    let rows = raw
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&kinds)
                .map(|(cell, kind)| match cell {
                    Some(s) => kind.convert(s),
                    None => CellValue::Null,
                })
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// A line holding nothing but whitespace.
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, |f| f.trim().is_empty())
}

fn is_na(field: &str) -> bool {
    NA_VALUES.contains(&field)
}

/// Give blank header cells a positional name and de-duplicate repeats as
/// `name.1`, `name.2`, ...
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let name = name.as_ref();
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}.{suffix}");
        }
        seen.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}

// ---------------------------------------------------------------------------
// Column type inference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn classify(s: &str) -> Self {
        if s.parse::<i64>().is_ok() {
            ColumnKind::Integer
        } else if s.parse::<f64>().is_ok() {
            ColumnKind::Float
        } else if parse_bool(s).is_some() {
            ColumnKind::Bool
        } else {
            ColumnKind::Text
        }
    }

    /// The narrowest kind that can hold both.
    fn widen(self, other: Self) -> Self {
        use ColumnKind::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Text,
        }
    }

    fn convert(self, s: String) -> CellValue {
        let parsed = match self {
            ColumnKind::Integer => s.parse().ok().map(CellValue::Integer),
            ColumnKind::Float => s.parse().ok().map(CellValue::Float),
            ColumnKind::Bool => parse_bool(&s).map(CellValue::Bool),
            ColumnKind::Text => None,
        };
        parsed.unwrap_or(CellValue::String(s))
    }
}

fn infer_kind<'a>(values: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for v in values {
        let next = ColumnKind::classify(v);
        let widened = kind.map_or(next, |k| k.widen(next));
        if widened == ColumnKind::Text {
            return widened;
        }
        kind = Some(widened);
    }
    kind.unwrap_or(ColumnKind::Text)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Spreadsheets
// ---------------------------------------------------------------------------

/// Whether `path` has one of the [`SPREADSHEET_EXTENSIONS`].
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
}

/// Load the first worksheet of a workbook; its first row is the header.
pub fn read_spreadsheet(path: &Path) -> Result<Table, ReadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ReadError::NoWorksheet)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(ReadError::NoColumns)?;
    let columns = normalize_headers(header.iter().map(|cell| cell.to_string()));

    let data = rows
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(Table::new(columns, data))
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if is_na(s) => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        other => CellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn parses_header_and_infers_column_types() {
        let table = parse_csv_text("id,score,flag,text\n1,0.5,True,hi\n2,3,false,there\n").unwrap();
        assert_eq!(table.columns(), ["id", "score", "flag", "text"]);
        assert_eq!(table.shape(), (2, 4));

        let row = table.row(1).unwrap();
        assert_eq!(row.get("id"), Some(&CellValue::Integer(2)));
        assert_eq!(row.get("score"), Some(&CellValue::Float(3.0)));
        assert_eq!(row.get("flag"), Some(&CellValue::Bool(false)));
        assert_eq!(row.get("text"), Some(&CellValue::String("there".into())));
    }

    #[test]
    fn mixed_column_falls_back_to_strings() {
        let table = parse_csv_text("v\n1\nabc\n").unwrap();
        assert_eq!(table.row(0).unwrap().get("v"), Some(&CellValue::String("1".into())));
    }

    #[test]
    fn na_tokens_and_short_rows_become_null() {
        let table = parse_csv_text("a,b,c\n1,NA,\n2\n").unwrap();
        let first = table.row(0).unwrap();
        assert_eq!(first.get("b"), Some(&CellValue::Null));
        assert_eq!(first.get("c"), Some(&CellValue::Null));
        assert_eq!(
            table.row(1).unwrap().values(),
            [CellValue::Integer(2), CellValue::Null, CellValue::Null]
        );
    }

    #[test]
    fn long_row_is_rejected() {
        let err = parse_csv_text("a,b\n1,2\n3,4,5\n").unwrap_err();
        match err {
            ReadError::RaggedRow {
                line,
                expected,
                found,
            } => {
                assert_eq!((line, expected, found), (3, 2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_has_no_columns() {
        assert!(matches!(parse_csv_text(""), Err(ReadError::NoColumns)));
        assert!(matches!(parse_csv_text("\u{feff}"), Err(ReadError::NoColumns)));
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let table = parse_csv_text("id,text\n1,\"a, b\nc\"\n").unwrap();
        assert_eq!(table.shape(), (1, 2));
        assert_eq!(
            table.row(0).unwrap().get("text"),
            Some(&CellValue::String("a, b\nc".into()))
        );
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let table = parse_csv_text("\u{feff}id,text\n1,x\n").unwrap();
        assert_eq!(table.columns()[0], "id");
    }

    #[test]
    fn headers_are_named_and_deduplicated() {
        assert_eq!(
            normalize_headers(["", "a", "a", "a.1", "b", "a"]),
            vec!["Unnamed: 0", "a", "a.1", "a.1.1", "b", "a.2"]
        );
    }

    #[test]
    fn fallback_skips_undecodable_utf8_silently() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"name\nJos\xe9\n").unwrap();

        let outcome = read_csv_with_fallback(&path);
        assert_eq!(outcome.encoding, Some(TextEncoding::Latin1));
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].1.is_decode());

        let table = outcome.table.unwrap();
        assert_eq!(
            table.row(0).unwrap().get("name"),
            Some(&CellValue::String("José".into()))
        );
    }

    #[test]
    fn malformed_file_fails_every_encoding() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "a,b\n1,2,3\n").unwrap();

        let outcome = read_csv_with_fallback(&path);
        assert!(outcome.table.is_none());
        let tried: Vec<_> = outcome.failures.iter().map(|(e, _)| *e).collect();
        assert_eq!(tried, FALLBACK_ENCODINGS);
        assert!(read_csv_safe(&path).is_none());
    }

    #[test]
    fn missing_file_is_an_io_failure_per_encoding() {
        let dir = tempdir().unwrap();
        let outcome = read_csv_with_fallback(&dir.path().join("nope.csv"));
        assert!(outcome.table.is_none());
        assert!(outcome
            .failures
            .iter()
            .all(|(_, err)| matches!(err, ReadError::Io(_))));
    }

    #[test]
    fn spreadsheet_extensions_are_case_insensitive() {
        assert!(is_spreadsheet(Path::new("Stress.xlsx")));
        assert!(is_spreadsheet(Path::new("data/Stress.XLSX")));
        assert!(is_spreadsheet(Path::new("sheet.ods")));
        assert!(!is_spreadsheet(Path::new("Stress.csv")));
        assert!(!is_spreadsheet(Path::new("xlsx")));
    }

    #[test]
    fn corrupt_spreadsheet_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, b"not a zip archive").unwrap();
        assert!(read_spreadsheet(&path).is_err());
    }
}
