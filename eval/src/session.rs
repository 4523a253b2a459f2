//! Carry-over of the previous result between evaluations.

use calc_parser::ParserOptions;

use crate::{evaluate_expression_with_options, Environment, EvaluationError};

/// Caller-owned evaluation session.
///
/// A session stores the last successful result, which is visible to subsequent
/// expressions as `ans`. The result is only updated when an evaluation succeeds.
/// A session is a plain value; concurrent users must serialize access to it.
///
/// # Examples
///
/// ```
/// use calc_eval::Session;
///
/// let mut session = Session::new();
/// assert!(session.evaluate("ans").is_err());
/// assert_eq!(session.evaluate("2 + 2").unwrap(), 4.0);
/// assert_eq!(session.evaluate("ans * 2").unwrap(), 8.0);
/// // Failed evaluations do not affect the previous result.
/// assert!(session.evaluate("ans / 0").is_err());
/// assert_eq!(session.last_result(), Some(8.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Session {
    last_result: Option<f64>,
    options: ParserOptions,
}

impl Session {
    /// Creates a session with no previous result and default parser options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the specified parser options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            last_result: None,
            options,
        }
    }

    /// Sets the previous result. Non-finite values are ignored.
    #[must_use]
    pub fn with_last_result(mut self, value: f64) -> Self {
        if value.is_finite() {
            self.last_result = Some(value);
        }
        self
    }

    /// Returns the parser options used by this session.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Returns the last successful result.
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Forgets the last successful result.
    pub fn clear(&mut self) {
        self.last_result = None;
    }

    /// Returns the environment the next expression will be evaluated in.
    pub fn environment(&self) -> Environment {
        Environment::new(self.last_result)
    }

    /// Evaluates `source`, updating the last result on success.
    ///
    /// # Errors
    ///
    /// Returns parsing or evaluation errors; the last result is left intact in this case.
    pub fn evaluate<'a>(&mut self, source: &'a str) -> Result<f64, EvaluationError<'a>> {
        let value = evaluate_expression_with_options(source, self.last_result, &self.options)?;
        self.last_result = Some(value);
        Ok(value)
    }
}
