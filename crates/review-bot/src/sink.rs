//! Finding delivery.
//!
//! The runner hands findings to a [`FindingSink`] one at a time as they are
//! produced. Sinks decide how the review platform sees them.

use std::io::Write;

use clap::ValueEnum;
use pr_policy::Finding;

/// Receives findings in emission order.
pub trait FindingSink {
    fn emit(&mut self, finding: &Finding) -> std::io::Result<()>;
}

/// Output format of the command-line sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `[severity] message` lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    /// Build a sink writing to `writer`.
    pub fn sink<'a, W: Write + 'a>(self, writer: W) -> Box<dyn FindingSink + 'a> {
        match self {
            Self::Text => Box::new(TextSink::new(writer)),
            Self::Json => Box::new(JsonLinesSink::new(writer)),
        }
    }
}

/// Writes `[severity] message` lines.
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FindingSink for TextSink<W> {
    fn emit(&mut self, finding: &Finding) -> std::io::Result<()> {
        writeln!(self.writer, "{finding}")?;
        self.writer.flush()
    }
}

/// Writes one serialized finding per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FindingSink for JsonLinesSink<W> {
    fn emit(&mut self, finding: &Finding) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, finding)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

/// Keeps findings in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub findings: Vec<Finding>,
}

impl FindingSink for CollectingSink {
    fn emit(&mut self, finding: &Finding) -> std::io::Result<()> {
        self.findings.push(finding.clone());
        Ok(())
    }
}
