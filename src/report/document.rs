//! Report document patching
//!
//! The document is split into the text before the Performance section, the
//! section itself, and the text after it. Only the middle part is replaced;
//! everything else is kept byte for byte.

use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{
    constants::report::{HEADING, MACHINE_PREFIX},
    error::{AppError, AppResult},
};

/// A report document loaded into memory
#[derive(Debug, Clone)]
pub struct ReportDocument {
    path: PathBuf,
    content: String,
}

impl ReportDocument {
    /// Read the whole document
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|source| AppError::DocumentRead {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, content })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the Performance section in memory
    pub fn replace_performance_section(&mut self, section: &str) {
        self.content = patch_section(&self.content, section);
    }

    /// Write the whole document back.
    ///
    /// The new content goes to a temporary file next to the document which is
    /// then renamed over it, so readers see either the old or the new text.
    pub fn save(&self) -> AppResult<()> {
        let write_error = |source: std::io::Error| AppError::DocumentWrite {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
        tmp.write_all(self.content.as_bytes()).map_err(write_error)?;
        tmp.as_file().sync_all().map_err(write_error)?;

        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(write_error)?;
        }

        tmp.persist(&self.path).map_err(|e| write_error(e.error))?;
        Ok(())
    }
}

/// Replace the Performance section of `document` with `section`.
///
/// The existing section spans the heading, an optional `**Machine:**` line and
/// the table that follows. Further Performance sections are dropped so only
/// one remains. Without an existing section the new one is appended after a
/// single blank line.
pub fn patch_section(document: &str, section: &str) -> String {
    let Some(existing) = find_section(document) else {
        let prior = document.trim_end();
        if prior.is_empty() {
            return section.to_string();
        }
        return format!("{}\n\n{}", prior, section);
    };

    let mut output = String::with_capacity(document.len() + section.len());
    output.push_str(&document[..existing.start]);
    output.push_str(section);

    let mut rest = &document[existing.end..];
    while let Some(duplicate) = find_section(rest) {
        output.push_str(&rest[..duplicate.start]);
        rest = &rest[duplicate.end..];
    }
    output.push_str(rest);

    output
}

/// Byte range of the first Performance section, if any
fn find_section(document: &str) -> Option<Range<usize>> {
    let mut lines = lines_with_offsets(document).peekable();

    let heading = lines.find(|line| line.text.trim_end() == HEADING)?;
    let mut end = heading.end;

    while lines.next_if(|line| line.is_blank()).is_some() {}

    if let Some(machine) = lines.next_if(|line| line.text.starts_with(MACHINE_PREFIX)) {
        end = machine.end;
        while lines.next_if(|line| line.is_blank()).is_some() {}
    }

    while let Some(row) = lines.next_if(|line| line.text.trim_start().starts_with('|')) {
        end = row.end;
    }

    Some(heading.start..end)
}

struct Line<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

impl Line<'_> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Lines with the byte range they occupy, terminator included
fn lines_with_offsets(document: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    document.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        Line {
            start,
            end: offset,
            text: raw.trim_end_matches(['\n', '\r']),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION: &str = "## Performance\n\n**Machine:** Test, 4 cores, 8 GB RAM\n\n| Day | Time |\n|-----|------|\n| 1 | 8 ms |\n";

    #[test]
    fn test_append_when_missing() {
        let doc = "# Advent of Code\n\nSolutions.\n\n\n";
        let patched = patch_section(doc, SECTION);

        assert_eq!(patched, format!("# Advent of Code\n\nSolutions.\n\n{}", SECTION));
        assert_eq!(patched.matches("## Performance").count(), 1);
    }

    #[test]
    fn test_append_to_empty_document() {
        assert_eq!(patch_section("", SECTION), SECTION);
    }

    #[test]
    fn test_replace_preserves_surroundings() {
        let doc = "# Title\n\n## Performance\n\n**Machine:** Old\n\n| Day | Time |\n|-----|------|\n| 1 | 9 ms |\n| 2 | 1.0 s |\n\n## License\n\nMIT\n";
        let patched = patch_section(doc, SECTION);

        assert_eq!(patched, format!("# Title\n\n{}\n## License\n\nMIT\n", SECTION));
    }

    #[test]
    fn test_replace_without_machine_line() {
        let doc = "intro\n\n## Performance\n\n| Day | Time |\n|-----|------|\n| 3 | 2 ms |\ntrailer\n";
        let patched = patch_section(doc, SECTION);

        assert_eq!(patched, format!("intro\n\n{}trailer\n", SECTION));
    }

    #[test]
    fn test_replace_heading_without_table() {
        let doc = "## Performance\n\nComing soon.\n";
        let patched = patch_section(doc, SECTION);

        assert_eq!(patched, format!("{}\nComing soon.\n", SECTION));
    }

    #[test]
    fn test_update_is_idempotent() {
        let doc = "# Title\n\nSome text.\n";
        let once = patch_section(doc, SECTION);
        let twice = patch_section(&once, SECTION);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicate_sections_collapse() {
        let doc = format!("a\n\n{}\nb\n\n{}", SECTION, SECTION);
        let patched = patch_section(&doc, SECTION);

        assert_eq!(patched.matches("## Performance").count(), 1);
        assert!(patched.starts_with("a\n\n## Performance"));
        assert!(patched.contains("\nb\n"));
    }

    #[test]
    fn test_similar_heading_is_not_a_section() {
        let doc = "### Performance notes\n";
        let patched = patch_section(doc, SECTION);

        assert!(patched.starts_with("### Performance notes\n\n## Performance"));
    }

    #[test]
    fn test_crlf_document() {
        let doc = "x\r\n## Performance\r\n\r\n| Day | Time |\r\n|-----|------|\r\n| 1 | 2 ms |\r\ny\r\n";
        let patched = patch_section(doc, SECTION);

        assert_eq!(patched, format!("x\r\n{}y\r\n", SECTION));
    }

    #[test]
    fn test_load_replace_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Title\n").unwrap();

        let mut doc = ReportDocument::load(&path).unwrap();
        doc.replace_performance_section(SECTION);
        doc.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), format!("# Title\n\n{}", SECTION));
    }

    #[test]
    fn test_load_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReportDocument::load(dir.path().join("missing.md")).unwrap_err();

        assert!(matches!(err, AppError::DocumentRead { .. }));
    }
}
