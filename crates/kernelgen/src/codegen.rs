//! Line-oriented text writer for generated C.
//!
//! Text is accumulated in memory and written once by [`Codegen::finish`], so
//! a fatal error earlier in the run never leaves a half-written artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Width of one indentation step in generated code.
pub const INDENT: usize = 8;

/// Accumulates indented lines for one output artifact.
#[derive(Debug, Clone, Default)]
pub struct Codegen {
    path: Option<PathBuf>,
    text: String,
    indentation: usize,
    use_tabs: bool,
}

impl Codegen {
    /// Creates a writer targeting `path`; without a path output is discarded.
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            text: String::new(),
            indentation: 0,
            use_tabs: false,
        }
    }

    /// Renders each full [`INDENT`] of leading whitespace as a tab.
    #[must_use]
    pub const fn with_tabs(mut self) -> Self {
        self.use_tabs = true;
        self
    }

    /// Appends text at the current indentation.
    ///
    /// Multi-line text is split and every line indented; `"\n"` alone emits
    /// one blank line. Trailing whitespace is stripped.
    pub fn line(&mut self, text: &str) {
        for line in text.lines() {
            let prefix = if self.use_tabs {
                let tabs = self.indentation / INDENT;
                let spaces = self.indentation % INDENT;
                format!("{}{}", "\t".repeat(tabs), " ".repeat(spaces))
            } else {
                " ".repeat(self.indentation)
            };
            let full = format!("{prefix}{line}");
            self.text.push_str(full.trim_end());
            self.text.push('\n');
        }
    }

    /// Increases indentation by `columns`.
    pub const fn indent(&mut self, columns: usize) {
        self.indentation += columns;
    }

    /// Decreases indentation by `columns`, stopping at zero.
    pub const fn outdent(&mut self, columns: usize) {
        self.indentation = self.indentation.saturating_sub(columns);
    }

    /// Text accumulated so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Destination path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the accumulated text to the destination path.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn finish(&self) -> io::Result<()> {
        match &self.path {
            Some(path) => fs::write(path, &self.text),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_with_spaces() {
        let mut c = Codegen::new(None);
        c.line("{");
        c.indent(INDENT);
        c.line("x = 1;");
        c.outdent(INDENT);
        c.line("}");
        assert_eq!(c.text(), "{\n        x = 1;\n}\n");
    }

    #[test]
    fn indents_with_tabs() {
        let mut c = Codegen::new(None).with_tabs();
        c.indent(INDENT * 2);
        c.line("a;");
        c.outdent(4);
        c.line("b;");
        assert_eq!(c.text(), "\t\ta;\n\t    b;\n");
    }

    #[test]
    fn newline_only_emits_blank_line() {
        let mut c = Codegen::new(None).with_tabs();
        c.indent(INDENT);
        c.line("\n");
        assert_eq!(c.text(), "\n");
    }

    #[test]
    fn multi_line_text_keeps_inner_blank_lines() {
        let mut c = Codegen::new(None);
        c.line("#define X\n\n");
        c.line("");
        assert_eq!(c.text(), "#define X\n\n");
    }

    #[test]
    fn outdent_saturates() {
        let mut c = Codegen::new(None);
        c.outdent(INDENT);
        c.line("a");
        assert_eq!(c.text(), "a\n");
    }

    #[test]
    fn finish_without_path_is_noop() {
        let mut c = Codegen::new(None);
        c.line("ignored");
        assert!(c.finish().is_ok());
        assert!(c.path().is_none());
    }

    #[test]
    fn finish_writes_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.h");
        let mut c = Codegen::new(Some(path.clone()));
        c.line("#endif");
        c.finish().expect("writable");
        assert_eq!(fs::read_to_string(path).expect("readable"), "#endif\n");
    }
}
