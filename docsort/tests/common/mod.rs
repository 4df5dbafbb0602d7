#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;

/// Writes `bytes` under `dir` and returns the file's path.
pub fn write_document(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap_or_else(|e| panic!("Failed to write '{name}': {e}"));
    path
}

/// Number of entries left in `dir`, treating a missing directory as empty.
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}

fn zip_parts(parts: &[(String, String)]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for (name, content) in parts {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }

        zip.finish().unwrap();
    }
    buffer.into_inner()
}

// DOCX

pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::*;

    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

pub fn build_docx_with_table(intro: &str, rows: &[[&str; 2]]) -> Vec<u8> {
    use docx_rs::*;

    let table_rows = rows
        .iter()
        .map(|cells| {
            TableRow::new(
                cells
                    .iter()
                    .map(|cell| {
                        TableCell::new()
                            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(*cell)))
                    })
                    .collect(),
            )
        })
        .collect();

    let docx = Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(intro).bold()))
        .add_table(Table::new(table_rows));

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

// XLSX

/// A worksheet given as rows of cells. Cells that parse as numbers are
/// stored as numeric values, everything else as inline strings.
pub struct SheetContent {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetContent {
    pub fn new(name: &str, rows: &[&[&str]]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    pub fn empty(name: &str) -> Self {
        Self::new(name, &[])
    }
}

pub fn build_xlsx(sheets: &[SheetContent]) -> Vec<u8> {
    let mut overrides = String::new();
    let mut sheet_entries = String::new();
    let mut relationships = String::new();

    for (i, sheet) in sheets.iter().enumerate() {
        let n = i + 1;
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
        sheet_entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            sheet.name
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));
    }

    let mut parts = vec![
        (
            "[Content_Types].xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
{overrides}</Types>"#
            ),
        ),
        (
            "_rels/.rels".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
                .to_string(),
        ),
        (
            "xl/workbook.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>{sheet_entries}</sheets>
</workbook>"#
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
{relationships}</Relationships>"#
            ),
        ),
    ];

    for (i, sheet) in sheets.iter().enumerate() {
        parts.push((
            format!("xl/worksheets/sheet{}.xml", i + 1),
            generate_sheet_xml(&sheet.rows),
        ));
    }

    zip_parts(&parts)
}

fn generate_sheet_xml(rows: &[Vec<String>]) -> String {
    let mut sheet_data = String::new();

    for (r, row) in rows.iter().enumerate() {
        let row_num = r + 1;
        sheet_data.push_str(&format!(r#"<row r="{row_num}">"#));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{row_num}", column_letter(c));
            if cell.parse::<f64>().is_ok() {
                sheet_data.push_str(&format!(r#"<c r="{reference}"><v>{cell}</v></c>"#));
            } else {
                sheet_data.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr"><is><t>{cell}</t></is></c>"#
                ));
            }
        }
        sheet_data.push_str("</row>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>{sheet_data}</sheetData>
</worksheet>"#
    )
}

fn column_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

// PPTX

pub struct SlideContent {
    pub title: String,
    pub content: String,
    pub notes: Option<String>,
}

impl SlideContent {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// A presentation whose slides are numbered from 1 in the given order.
pub fn build_pptx(slides: &[SlideContent]) -> Vec<u8> {
    let mut parts = pptx_skeleton(slides.len());

    for (i, slide) in slides.iter().enumerate() {
        parts.push((
            format!("ppt/slides/slide{}.xml", i + 1),
            slide_xml(&[&slide.title, &slide.content]),
        ));
        if let Some(notes) = &slide.notes {
            parts.push((
                format!("ppt/slides/_rels/slide{}.xml.rels", i + 1),
                slide_rels(i + 1),
            ));
            parts.push((
                format!("ppt/notesSlides/notesSlide{}.xml", i + 1),
                notes_xml(notes),
            ));
        }
    }

    zip_parts(&parts)
}

/// A presentation built from raw `(part path, xml)` pairs on top of the
/// package skeleton, for tests that need unusual part names or broken XML.
pub fn build_pptx_from_parts(slide_count: usize, extra: &[(&str, &str)]) -> Vec<u8> {
    let mut parts = pptx_skeleton(slide_count);
    parts.extend(
        extra
            .iter()
            .map(|(name, xml)| (name.to_string(), xml.to_string())),
    );
    zip_parts(&parts)
}

fn pptx_skeleton(slide_count: usize) -> Vec<(String, String)> {
    let mut slide_ids = String::new();
    let mut relationships = String::new();
    let mut overrides = String::new();

    for n in 1..=slide_count {
        slide_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{n}"/>"#, 255 + n));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{n}.xml"/>"#
        ));
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
    }

    vec![
        (
            "[Content_Types].xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
{overrides}</Types>"#
            ),
        ),
        (
            "_rels/.rels".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#
                .to_string(),
        ),
        (
            "ppt/presentation.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:sldIdLst>{slide_ids}</p:sldIdLst>
</p:presentation>"#
            ),
        ),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
{relationships}</Relationships>"#
            ),
        ),
    ]
}

/// Slide XML with one shape per text run.
pub fn slide_xml(runs: &[&str]) -> String {
    let shapes: String = runs
        .iter()
        .enumerate()
        .map(|(i, text)| {
            format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Text {i}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#,
                i + 2
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr/>
{shapes}
</p:spTree></p:cSld>
</p:sld>"#
    )
}

fn slide_rels(slide_num: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide" Target="../notesSlides/notesSlide{slide_num}.xml"/>
</Relationships>"#
    )
}

pub fn notes_xml(notes_text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr/>
<p:sp><p:nvSpPr><p:cNvPr id="2" name="Notes"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>{notes_text}</a:t></a:r></a:p></p:txBody></p:sp>
</p:spTree></p:cSld>
</p:notes>"#
    )
}
