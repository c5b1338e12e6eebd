//! Printing the statements of a document, either while it is parsed or once it has been parsed.

use crate::buffering::{BufferingConsumer, BufferingError};
use crate::formatter::{LineFormatter, StatementFormatter};
use crate::parser::{ConsumeError, StatementParser};
use crate::store::Model;
use crate::streaming::StreamingConsumer;
use log::info;
use std::convert::Infallible;
use std::error::Error;
use std::fmt;
use std::io;
use std::io::Write;

/// When the statements are printed.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum PrintMode {
    /// Each statement is printed as soon as it is parsed. The model does not grow.
    Streaming,
    /// The statements are stored in the model and printed once the parse is done.
    Buffered,
}

impl Default for PrintMode {
    fn default() -> Self {
        PrintMode::Streaming
    }
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintMode::Streaming => write!(f, "streaming"),
            PrintMode::Buffered => write!(f, "static"),
        }
    }
}

/// What [`print_statements`](fn.print_statements.html) did.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PrintSummary {
    pub mode: PrintMode,
    /// Number of statements written to the output.
    pub printed: u64,
    /// Number of failures that have been logged without stopping the parse.
    pub warnings: u64,
}

/// Error returned by [`print_statements`](fn.print_statements.html).
#[derive(Debug)]
pub enum PrintError<P> {
    /// The parser failed.
    Parse(P),
    /// The model rejected a statement while buffering.
    Buffering(BufferingError),
    /// The buffered statements could not be written.
    Output(io::Error),
}

impl<P: fmt::Display> fmt::Display for PrintError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::Parse(error) => write!(f, "RDF parsing failed - {}", error),
            PrintError::Buffering(error) => write!(f, "{}", error),
            PrintError::Output(error) => write!(f, "failed to write the statements - {}", error),
        }
    }
}

impl<P: Error + 'static> Error for PrintError<P> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PrintError::Parse(error) => Some(error),
            PrintError::Buffering(error) => Some(error),
            PrintError::Output(error) => Some(error),
        }
    }
}

impl<P> From<ConsumeError<P, BufferingError>> for PrintError<P> {
    fn from(error: ConsumeError<P, BufferingError>) -> Self {
        match error {
            ConsumeError::Parser(error) => PrintError::Parse(error),
            ConsumeError::Consumer(error) => PrintError::Buffering(error),
        }
    }
}

impl<P> From<ConsumeError<P, Infallible>> for PrintError<P> {
    fn from(error: ConsumeError<P, Infallible>) -> Self {
        match error {
            ConsumeError::Parser(error) => PrintError::Parse(error),
            ConsumeError::Consumer(error) => match error {},
        }
    }
}

/// Parses a document and writes its statements to `output`, one `Statement <s> <p> <o>` line each.
///
/// In [`Streaming`](enum.PrintMode.html#variant.Streaming) mode a [`StreamingConsumer`](../streaming/struct.StreamingConsumer.html)
/// writes the statements while they are parsed.
/// In [`Buffered`](enum.PrintMode.html#variant.Buffered) mode a [`BufferingConsumer`](../buffering/struct.BufferingConsumer.html)
/// fills `model`, which is then written in insertion order.
/// Both modes write the same lines for a document without duplicated statements.
pub fn print_statements<P: StatementParser, W: Write>(
    parser: &mut P,
    model: &mut Model,
    mode: PrintMode,
    output: W,
) -> Result<PrintSummary, PrintError<P::Error>> {
    info!("Printing statements in {} mode", mode);
    match mode {
        PrintMode::Streaming => {
            let mut consumer = StreamingConsumer::new(model, output);
            parser.parse_into(&mut consumer)?;
            let report = consumer.report();
            Ok(PrintSummary {
                mode,
                printed: report.statements.saturating_sub(report.write_failures),
                warnings: report.write_failures + report.flush_failures + report.model_failures,
            })
        }
        PrintMode::Buffered => {
            parser.parse_into(&mut BufferingConsumer::new(model))?;
            let mut formatter = LineFormatter::new(output);
            let mut printed = 0;
            for statement in model.elements() {
                formatter.format(statement).map_err(PrintError::Output)?;
                printed += 1;
            }
            formatter.finish().map_err(PrintError::Output)?;
            Ok(PrintSummary {
                mode,
                printed,
                warnings: 0,
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::test::{BrokenDocument, ListParser};

    const DOCUMENT: [(&str, &str, &str); 3] = [
        ("urn:a", "urn:p", "urn:b"),
        ("urn:b", "urn:p", "urn:c"),
        ("urn:a", "urn:q", "urn:c"),
    ];

    fn print(
        triples: &[(&'static str, &'static str, &'static str)],
        mode: PrintMode,
    ) -> (String, Model) {
        let mut model = Model::new();
        let mut output = Vec::default();
        let summary =
            print_statements(&mut ListParser::new(triples.to_vec()), &mut model, mode, &mut output)
                .unwrap();
        assert_eq!(mode, summary.mode);
        assert_eq!(0, summary.warnings);
        (String::from_utf8(output).unwrap(), model)
    }

    #[test]
    fn streaming_single_statement() {
        let (output, model) = print(&[("urn:a", "urn:p", "urn:b")], PrintMode::Streaming);
        assert_eq!("Statement <urn:a> <urn:p> <urn:b>\n", output);
        assert!(model.is_empty());
    }

    #[test]
    fn both_modes_print_the_same_lines() {
        let (streamed, streaming_model) = print(&DOCUMENT, PrintMode::Streaming);
        let (buffered, buffered_model) = print(&DOCUMENT, PrintMode::Buffered);
        assert_eq!(streamed, buffered);
        assert_eq!(3, streamed.lines().count());
        assert!(streaming_model.is_empty());
        assert_eq!(3, buffered_model.len());
    }

    #[test]
    fn buffered_mode_removes_duplicates() {
        let (output, model) = print(
            &[("urn:a", "urn:p", "urn:b"), ("urn:a", "urn:p", "urn:b")],
            PrintMode::Buffered,
        );
        assert_eq!("Statement <urn:a> <urn:p> <urn:b>\n", output);
        assert_eq!(1, model.len());
    }

    #[test]
    fn empty_document() {
        for mode in &[PrintMode::Streaming, PrintMode::Buffered] {
            let (output, model) = print(&[], *mode);
            assert!(output.is_empty());
            assert!(model.is_empty());
        }
    }

    struct UnflushableWrite(Vec<u8>);

    impl Write for UnflushableWrite {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn flush_failures_do_not_lower_the_printed_count() {
        let mut output = UnflushableWrite(Vec::default());
        let summary = print_statements(
            &mut ListParser::new(DOCUMENT.to_vec()),
            &mut Model::new(),
            PrintMode::Streaming,
            &mut output,
        )
        .unwrap();
        assert_eq!(3, summary.printed);
        assert_eq!(1, summary.warnings);
        assert_eq!(3, String::from_utf8(output.0).unwrap().lines().count());
    }

    #[test]
    fn parse_errors_are_returned() {
        let mut parser = ListParser::new(DOCUMENT.to_vec());
        parser.fail = true;
        let mut output = Vec::default();
        match print_statements(&mut parser, &mut Model::new(), PrintMode::Streaming, &mut output) {
            Err(PrintError::Parse(BrokenDocument)) => (),
            r => panic!("unexpected result {:?}", r),
        }
        // statements read before the failure are kept
        assert_eq!(3, String::from_utf8(output).unwrap().lines().count());
    }

    #[test]
    fn buffered_parse_errors_print_nothing() {
        let mut parser = ListParser::new(DOCUMENT.to_vec());
        parser.fail = true;
        let mut output = Vec::default();
        let mut model = Model::new();
        assert!(print_statements(&mut parser, &mut model, PrintMode::Buffered, &mut output).is_err());
        assert!(output.is_empty());
        assert_eq!(3, model.len());
    }
}
