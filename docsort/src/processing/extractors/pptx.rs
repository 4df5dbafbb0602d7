//! PPTX extractor: unpacks the archive into a scratch workspace and scrapes
//! the `<a:t>` text runs out of every slide and speaker-notes part.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_MAX_UNPACKED_BYTES;
use crate::error::{DocsortError, Result};
use crate::processing::workspace::TempWorkspace;

const SLIDES_DIR: &str = "ppt/slides";
const NOTES_DIR: &str = "ppt/notesSlides";
const TEXT_RUN_TAG: &[u8] = b"a:t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Slide,
    Notes,
}

impl SectionKind {
    fn label(&self, number: u64) -> String {
        match self {
            SectionKind::Slide => format!("Slide {number}:"),
            SectionKind::Notes => format!("Slide {number} notes:"),
        }
    }
}

/// An XML part found in the slides or notes directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SlidePart {
    path: PathBuf,
    file_name: String,
    /// Digits embedded in the file name (`slide12.xml` -> 12).
    number: Option<u64>,
}

impl SlidePart {
    fn new(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let digits: String = file_name.chars().filter(|c| c.is_ascii_digit()).collect();
        let number = digits.parse().ok();
        Some(Self {
            path,
            file_name,
            number,
        })
    }
}

pub struct PptxExtractor {
    temp_root: PathBuf,
    max_unpacked_bytes: u64,
}

impl PptxExtractor {
    /// Workspaces are created under `temp_root`.
    pub fn new(temp_root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: temp_root.into(),
            max_unpacked_bytes: DEFAULT_MAX_UNPACKED_BYTES,
        }
    }

    pub fn with_max_unpacked_bytes(mut self, max_unpacked_bytes: u64) -> Self {
        self.max_unpacked_bytes = max_unpacked_bytes;
        self
    }

    /// Extracts the text of a `.pptx` file on disk.
    pub fn extract_file(&self, path: &Path) -> Result<String> {
        let file = File::open(path)?;
        self.extract(BufReader::new(file))
    }

    /// Unpacks `reader` into a fresh workspace, collects the slide and notes
    /// sections, and removes the workspace before returning.
    pub fn extract<R: Read + Seek>(&self, reader: R) -> Result<String> {
        let workspace = TempWorkspace::create(&self.temp_root)?;

        let result = workspace
            .unpack(reader, self.max_unpacked_bytes)
            .and_then(|()| Self::extract_unpacked(workspace.path()));

        workspace.close();
        result
    }

    fn extract_unpacked(root: &Path) -> Result<String> {
        let mut sections: Vec<String> = Vec::new();

        Self::collect_sections(&root.join(SLIDES_DIR), SectionKind::Slide, &mut sections)?;
        Self::collect_sections(&root.join(NOTES_DIR), SectionKind::Notes, &mut sections)?;

        Ok(sections.join("\n\n"))
    }

    fn collect_sections(dir: &Path, kind: SectionKind, sections: &mut Vec<String>) -> Result<()> {
        if !dir.is_dir() {
            tracing::debug!("No {} directory in presentation", dir.display());
            return Ok(());
        }

        let parts = Self::list_parts(dir)?;

        // Unnumbered parts are labelled after the highest embedded number.
        let mut next_unnumbered = parts.iter().filter_map(|p| p.number).max().unwrap_or(0);

        for part in parts {
            let number = match part.number {
                Some(number) => number,
                None => {
                    next_unnumbered += 1;
                    next_unnumbered
                }
            };

            let text = match Self::read_part_text(&part) {
                Ok(text) => text,
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Skipping {}: {}", part.file_name, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if text.is_empty() {
                continue;
            }

            sections.push(kind.label(number));
            sections.push(text);
        }

        Ok(())
    }

    /// Regular XML files of `dir`, ordered by their embedded number, with the
    /// file name breaking ties. Parts without digits sort after numbered ones,
    /// by name. Symlinks are never followed.
    fn list_parts(dir: &Path) -> Result<Vec<SlidePart>> {
        let mut parts = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            let is_xml = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("xml"));

            if is_xml {
                if let Some(part) = SlidePart::new(path) {
                    parts.push(part);
                }
            }
        }

        Self::sort_parts(&mut parts);
        Ok(parts)
    }

    fn sort_parts(parts: &mut [SlidePart]) {
        parts.sort_by(|a, b| {
            (a.number.is_none(), a.number, &a.file_name).cmp(&(
                b.number.is_none(),
                b.number,
                &b.file_name,
            ))
        });
    }

    fn read_part_text(part: &SlidePart) -> Result<String> {
        let partial = |message: String| DocsortError::PartialSlideParse {
            part: part.file_name.clone(),
            message,
        };

        let xml = std::fs::read_to_string(&part.path).map_err(|e| partial(e.to_string()))?;
        Self::extract_text_runs(&xml).map_err(|e| partial(e.to_string()))
    }

    /// Concatenates the trimmed, non-empty contents of every text run with
    /// single spaces. Nested markup inside a run contributes only its text.
    fn extract_text_runs(xml: &str) -> quick_xml::Result<String> {
        let mut reader = Reader::from_str(xml);

        let mut runs: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut run_depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if e.name().as_ref() == TEXT_RUN_TAG {
                        if run_depth == 0 {
                            current.clear();
                        }
                        run_depth += 1;
                    }
                }
                Event::End(e) => {
                    if e.name().as_ref() == TEXT_RUN_TAG && run_depth > 0 {
                        run_depth -= 1;
                        if run_depth == 0 {
                            let trimmed = current.trim();
                            if !trimmed.is_empty() {
                                runs.push(trimmed.to_string());
                            }
                        }
                    }
                }
                Event::Text(e) if run_depth > 0 => {
                    current.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
                Event::CData(e) if run_depth > 0 => {
                    current.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
                Event::GeneralRef(e) if run_depth > 0 => {
                    if let Some(ch) = e.resolve_char_ref()? {
                        current.push(ch);
                    } else {
                        let name = String::from_utf8_lossy(e.as_ref());
                        match resolve_predefined_entity(&name) {
                            Some(resolved) => current.push_str(resolved),
                            None => {
                                current.push('&');
                                current.push_str(&name);
                                current.push(';');
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(runs.join(" "))
    }
}
