use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

use crate::error::{DocsortError, Result};
use crate::models::DocumentFormat;

const CELL_DELIMITER: &str = "\t";

/// Flattens a workbook into text, one `Sheet: <name>` section per sheet in
/// the workbook's declared order.
pub struct XlsxExtractor;

impl XlsxExtractor {
    pub fn extract(bytes: &[u8]) -> Result<String> {
        let cursor = Cursor::new(bytes);
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| DocsortError::extraction(DocumentFormat::Xlsx, e))?;

        let mut sections: Vec<String> = Vec::new();

        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| DocsortError::extraction(DocumentFormat::Xlsx, e))?;

            sections.push(format!("Sheet: {name}"));
            sections.push(Self::render_range(&range));
        }

        Ok(sections.join("\n\n"))
    }

    /// Row-major rendering: cells joined by a tab, rows by a newline.
    fn render_range(range: &Range<Data>) -> String {
        let (rows, cols) = range.get_size();
        if rows == 0 || cols == 0 {
            return String::new();
        }

        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string())
                    .collect::<Vec<_>>()
                    .join(CELL_DELIMITER)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
