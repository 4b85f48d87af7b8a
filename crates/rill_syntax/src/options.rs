//! Parser configuration.

/// How the parser reacts to a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Stop at the first error and return no tree.
    #[default]
    Strict,
    /// Record the error, skip to the next top-level statement and keep going.
    BestEffort,
}

/// Default nesting limit for [`ParseOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Deepest allowed expression/pattern nesting; deeper input fails with a limit error.
    pub max_depth: usize,
    /// Desugar every pipeline into nested applications when building the tree.
    pub resolve_pipelines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
            resolve_pipelines: false,
        }
    }
}

impl ParseOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn resolve_pipelines(mut self, resolve: bool) -> Self {
        self.resolve_pipelines = resolve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.mode, ParseMode::Strict);
        assert_eq!(options.max_depth, 256);
        assert!(!options.resolve_pipelines);
    }

    #[test]
    fn test_builder_methods_only_touch_their_field() {
        let options = ParseOptions::new().mode(ParseMode::BestEffort).max_depth(8);
        assert_eq!(options.mode, ParseMode::BestEffort);
        assert_eq!(options.max_depth, 8);
        assert!(!options.resolve_pipelines);
    }
}
