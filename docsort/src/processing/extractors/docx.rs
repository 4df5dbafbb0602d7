use crate::error::{DocsortError, Result};
use crate::models::DocumentFormat;

/// Raw text of a Word document: one block per non-empty paragraph or table,
/// blocks separated by a blank line. Styling is dropped.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn extract(bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| DocsortError::extraction(DocumentFormat::Docx, e))?;

        let mut blocks: Vec<String> = Vec::new();

        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    let para_text = Self::extract_paragraph(paragraph);
                    if !para_text.trim().is_empty() {
                        blocks.push(para_text);
                    }
                }
                docx_rs::DocumentChild::Table(table) => {
                    let table_text = Self::extract_table(table);
                    if !table_text.is_empty() {
                        blocks.push(table_text);
                    }
                }
                _ => {}
            }
        }

        Ok(blocks.join("\n\n"))
    }

    fn extract_paragraph(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        Self::collect_children(&paragraph.children, &mut content);
        content
    }

    fn collect_children(children: &[docx_rs::ParagraphChild], out: &mut String) {
        for para_child in children {
            match para_child {
                docx_rs::ParagraphChild::Run(run) => Self::collect_run(run, out),
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    Self::collect_children(&link.children, out)
                }
                _ => {}
            }
        }
    }

    fn collect_run(run: &docx_rs::Run, out: &mut String) {
        for run_child in &run.children {
            match run_child {
                docx_rs::RunChild::Text(text) => out.push_str(&text.text),
                docx_rs::RunChild::Tab(_) => out.push('\t'),
                docx_rs::RunChild::Break(_) => out.push('\n'),
                _ => {}
            }
        }
    }

    // Rows on their own line, cells separated by tabs.
    fn extract_table(table: &docx_rs::Table) -> String {
        let mut rows: Vec<String> = Vec::new();

        for table_child in &table.rows {
            let docx_rs::TableChild::TableRow(row) = table_child;
            let mut row_cells: Vec<String> = Vec::new();
            for row_child in &row.cells {
                let docx_rs::TableRowChild::TableCell(cell) = row_child;
                let mut cell_text = String::new();
                for cell_child in &cell.children {
                    if let docx_rs::TableCellContent::Paragraph(para) = cell_child {
                        let para_text = Self::extract_paragraph(para);
                        if !cell_text.is_empty() && !para_text.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&para_text);
                    }
                }
                row_cells.push(cell_text.trim().to_string());
            }
            if row_cells.iter().any(|c| !c.is_empty()) {
                rows.push(row_cells.join("\t"));
            }
        }

        rows.join("\n")
    }
}
