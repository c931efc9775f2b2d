//! Service-message construction and line-oriented output.
//!
//! The consuming CI server parses `##teamcity[...]` lines literally,
//! so [`ServiceMessage::render`] reproduces message name, attribute
//! order, quoting, and key names exactly.

use crate::escape::escape;
use crate::result::InformarResult;
use std::io::Write;

/// A single `##teamcity[...]` protocol message.
///
/// Attributes keep insertion order; every value passes through
/// [`escape`] at render time.
///
/// # Example
///
/// ```
/// use informar::ServiceMessage;
///
/// let line = ServiceMessage::new("testStarted")
///     .attr("name", "adds [1, 2]")
///     .attr("captureStandardOutput", "true")
///     .render();
/// assert_eq!(
///     line,
///     "##teamcity[testStarted name='adds |[1, 2|]' captureStandardOutput='true']"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMessage {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
}

impl ServiceMessage {
    /// Create a message with the given protocol name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    /// Append an attribute. The value is escaped when rendered.
    #[must_use]
    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    /// Render the full protocol line, without a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        use std::fmt::Write as _;

        let mut line = String::from("##teamcity[");
        line.push_str(self.name);
        for (key, value) in &self.attrs {
            let _ = write!(line, " {key}='{}'", escape(value));
        }
        line.push(']');
        line
    }
}

/// Synchronous line sink for protocol and console output.
///
/// Each call writes exactly one line plus `\n`, in call order. There
/// is no buffering or batching beyond the underlying writer's own.
#[derive(Debug)]
pub struct ProtocolWriter<W: Write> {
    sink: W,
}

impl<W: Write> ProtocolWriter<W> {
    /// Wrap an output sink.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write one protocol message line.
    pub fn message(&mut self, message: &ServiceMessage) -> InformarResult<()> {
        writeln!(self.sink, "{}", message.render())?;
        Ok(())
    }

    /// Write one human-readable console line.
    pub fn line(&mut self, text: &str) -> InformarResult<()> {
        writeln!(self.sink, "{text}")?;
        Ok(())
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> InformarResult<()> {
        writeln!(self.sink)?;
        Ok(())
    }

    /// Consume the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
