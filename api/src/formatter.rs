//! Interfaces for statement formatters.

use crate::model::Statement;
use std::error::Error;
use std::io;
use std::io::Write;

/// A formatter for [`Statement`](../model/struct.Statement.html).
pub trait StatementFormatter {
    type Error: Error;

    /// Writes a statement
    fn format(&mut self, statement: &Statement) -> Result<(), Self::Error>;
}

/// Writes one `Statement <subject> <predicate> <object>` line per statement.
///
/// ```
/// use rdfprint_api::factory::NodeFactory;
/// use rdfprint_api::formatter::{LineFormatter, StatementFormatter};
/// use rdfprint_api::model::Statement;
///
/// let factory = NodeFactory::new();
/// let mut formatter = LineFormatter::new(Vec::default());
/// formatter.format(&Statement::new(
///     factory.named_node("urn:a"),
///     factory.named_node("urn:p"),
///     factory.simple_literal("b"),
/// ))?;
/// assert_eq!(b"Statement <urn:a> <urn:p> \"b\"\n".as_ref(), formatter.finish()?.as_slice());
/// # std::io::Result::Ok(())
/// ```
pub struct LineFormatter<W: Write> {
    write: W,
}

impl<W: Write> LineFormatter<W> {
    pub fn new(write: W) -> Self {
        Self { write }
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.write.flush()
    }

    /// Flushes and returns the underlying `Write` implementation.
    pub fn finish(mut self) -> Result<W, io::Error> {
        self.write.flush()?;
        Ok(self.write)
    }
}

impl<W: Write> StatementFormatter for LineFormatter<W> {
    type Error = io::Error;

    fn format(&mut self, statement: &Statement) -> Result<(), io::Error> {
        writeln!(self.write, "Statement {}", statement)
    }
}
