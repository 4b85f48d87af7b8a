//! Formatting configuration for Rill

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Maximum line length; only [`PipelineLayout::Fit`] consults it
    pub line_length: usize,
    /// How pipelines at the top of a definition are laid out
    pub pipeline_layout: PipelineLayout,
}

/// Layout of a pipeline that forms the whole value of a statement.
///
/// Pipelines nested inside other expressions are always written inline with `|>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineLayout {
    /// One stage per indented line under the seed.
    #[default]
    Indented,
    /// `seed |> stage |> stage` on one line.
    Inline,
    /// Inline when the line fits in `line_length`, indented otherwise.
    Fit,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            line_length: 100,
            pipeline_layout: PipelineLayout::Indented,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the maximum line length
    pub fn with_line_length(mut self, length: usize) -> Self {
        self.line_length = length;
        self
    }

    pub fn with_pipeline_layout(mut self, layout: PipelineLayout) -> Self {
        self.pipeline_layout = layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.line_length, 100);
        assert_eq!(config.pipeline_layout, PipelineLayout::Indented);
        assert_eq!(FormatConfig::new(), config);
    }

    #[test]
    fn test_with_indent_width() {
        let config = FormatConfig::new().with_indent_width(4);
        assert_eq!(config.indent_width, 4);
        // Other fields unchanged
        assert_eq!(config.line_length, 100);
    }

    #[test]
    fn test_builder_chain_all() {
        let config = FormatConfig::new()
            .with_indent_width(4)
            .with_line_length(60)
            .with_pipeline_layout(PipelineLayout::Fit);

        assert_eq!(config.indent_width, 4);
        assert_eq!(config.line_length, 60);
        assert_eq!(config.pipeline_layout, PipelineLayout::Fit);
    }

    #[test]
    fn test_builder_override() {
        let config = FormatConfig::new()
            .with_pipeline_layout(PipelineLayout::Inline)
            .with_pipeline_layout(PipelineLayout::Indented);

        assert_eq!(config.pipeline_layout, PipelineLayout::Indented); // Last value wins
    }
}
