use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::tempdir;
use zip::write::FileOptions;
use zip::ZipWriter;

use mental_health_data::data::loader::is_spreadsheet;
use mental_health_data::data::manifest::Manifest;
use mental_health_data::{load_group, read_spreadsheet, CellValue, ReadError};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Write a one-sheet .xlsx whose `<sheetData>` body is `rows`.
fn write_xlsx(path: &Path, rows: &str) {
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{rows}</sheetData></worksheet>"#
    );

    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = FileOptions::default();
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn inline(cell: &str, text: &str) -> String {
    format!(r#"<c r="{cell}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}

/// Header row leaves A1 blank; row 3 leaves B3 empty and uses an NA token.
fn survey_rows() -> String {
    format!(
        concat!(
            r#"<row r="1">{}{}{}</row>"#,
            r#"<row r="2"><c r="A2"><v>1</v></c><c r="B2"><v>2.5</v></c><c r="C2" t="b"><v>1</v></c>{}</row>"#,
            r#"<row r="3"><c r="A3"><v>2</v></c><c r="C3" t="b"><v>0</v></c>{}</row>"#,
        ),
        inline("B1", "score"),
        inline("C1", "flag"),
        inline("D1", "text"),
        inline("D2", "hello"),
        inline("D3", "NA"),
    )
}

#[test]
fn workbook_first_sheet_loads_with_typed_cells() {
    let dir = tempdir().unwrap();
    write_xlsx(&dir.path().join("survey.xlsx"), &survey_rows());
    const MANIFEST: Manifest = &[("survey", "survey.xlsx")];

    let data = load_group(dir.path(), MANIFEST, is_spreadsheet);
    let table = data.get("survey").unwrap();
    assert_eq!(table.shape(), (2, 4));
    assert_eq!(table.columns(), ["Unnamed: 0", "score", "flag", "text"]);

    let first = table.row(0).unwrap();
    assert_eq!(first.get("Unnamed: 0").and_then(CellValue::as_f64), Some(1.0));
    assert_eq!(first.get("score").and_then(CellValue::as_f64), Some(2.5));
    assert_eq!(first.get("flag"), Some(&CellValue::Bool(true)));
    assert_eq!(first.get("text").and_then(CellValue::as_str), Some("hello"));

    let second = table.row(1).unwrap();
    assert!(second.get("score").is_some_and(CellValue::is_null));
    assert_eq!(second.get("flag"), Some(&CellValue::Bool(false)));
    assert!(second.get("text").is_some_and(CellValue::is_null));
}

#[test]
fn empty_workbook_is_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    write_xlsx(&path, "");
    std::fs::write(dir.path().join("Stress.csv"), "label\n1\n").unwrap();
    const MANIFEST: Manifest = &[("empty", "empty.xlsx"), ("stress", "Stress.csv")];

    assert!(matches!(read_spreadsheet(&path), Err(ReadError::NoColumns)));

    let data = load_group(dir.path(), MANIFEST, is_spreadsheet);
    assert_eq!(data.keys().collect::<Vec<_>>(), vec!["stress"]);
}
