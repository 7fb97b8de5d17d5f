//! Interpreter configuration.
//!
//! Evaluation runs on a thread of its own whose stack is sized from
//! [`InterpreterConfig::stack_size`], so the depth limits below are reported
//! as errors long before that stack runs out.

/// Call depth allowed when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

/// Highest call depth a configuration accepts. Larger requests are clamped.
pub const MAX_CALL_DEPTH: usize = 4096;

/// Evaluation nesting allowed when none is configured.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 2048;

/// Highest evaluation nesting a configuration accepts. Larger requests are clamped.
pub const MAX_NESTING_DEPTH: usize = 8192;

/// Stack reserved for each level of evaluation nesting.
pub const STACK_BYTES_PER_LEVEL: usize = 16 * 1024;

const BASE_STACK_BYTES: usize = 1024 * 1024;

/// Operational limits and output behaviour of an [`Interpreter`].
///
/// [`Interpreter`]: crate::interpreter::interpreter::Interpreter
#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterConfig {
    /// Maximum number of nested user function calls
    pub max_call_depth: usize,
    /// Maximum number of statements and expressions being evaluated inside
    /// one another, counted across function calls
    pub max_nesting_depth: usize,
    /// Maximum number of bindings in any one environment, unbounded when `None`
    pub max_variables: Option<usize>,
    /// Whether `print` also writes its lines to stdout
    pub echo_output: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_variables: None,
            echo_output: false,
        }
    }
}

impl InterpreterConfig {
    /// Sets the call depth limit, clamped to [`MAX_CALL_DEPTH`].
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth.min(MAX_CALL_DEPTH);
        self
    }

    /// Sets the nesting limit, clamped to [`MAX_NESTING_DEPTH`].
    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth.min(MAX_NESTING_DEPTH);
        self
    }

    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = Some(max_variables);
        self
    }

    pub fn with_echo_output(mut self, echo_output: bool) -> Self {
        self.echo_output = echo_output;
        self
    }

    /// The nesting limit evaluation enforces.
    ///
    /// The fields are public, so the ceiling is applied here as well.
    pub fn nesting_limit(&self) -> usize {
        self.max_nesting_depth.min(MAX_NESTING_DEPTH)
    }

    /// Size in bytes of the stack evaluation runs on.
    pub fn stack_size(&self) -> usize {
        BASE_STACK_BYTES + self.nesting_limit() * STACK_BYTES_PER_LEVEL
    }
}
