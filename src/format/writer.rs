//! Output writer with indentation tracking
//!
//! Handles writing formatted code with proper indentation.

use super::config::FormatConfig;

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    config: FormatConfig,
    /// Whether we're at the start of a line
    at_line_start: bool,
    /// Characters on the current line so far, indentation included
    current_line_length: usize,
}

impl FormatWriter {
    /// Create a new format writer with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
            current_line_length: 0,
        }
    }

    /// Get the formatted output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write indentation if at line start
    fn write_indent(&mut self) {
        if self.at_line_start {
            let indent = " ".repeat(self.indent_level * self.config.indent_width);
            self.output.push_str(&indent);
            self.current_line_length = indent.len();
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent). `s` must not contain a newline.
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
        self.current_line_length += s.chars().count();
    }

    /// Write just a newline
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
        self.current_line_length = 0;
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Check if current line would exceed max length with `additional` more characters
    pub fn would_exceed_line_length(&self, additional: usize) -> bool {
        let indent_len = if self.at_line_start {
            self.indent_level * self.config.indent_width
        } else {
            0
        };
        self.current_line_length + indent_len + additional > self.config.line_length
    }
}
