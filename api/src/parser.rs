//! Interfaces for RDF parsers.

use crate::consumer::StatementConsumer;
use crate::factory::NodeFactory;
use crate::model::Statement;
use std::error::Error;
use std::fmt;

/// A parser returning [`Statement`](../model/struct.Statement.html).
pub trait StatementParser: Sized {
    type Error: Error;

    /// Parses the complete file and calls `on_statement` each time a new statement is read.
    ///
    /// The statement nodes are built with `factory`.
    fn parse_all<E: From<Self::Error>>(
        &mut self,
        factory: &NodeFactory,
        on_statement: &mut impl FnMut(Statement) -> Result<(), E>,
    ) -> Result<(), E> {
        while !self.is_end() {
            self.parse_step(factory, on_statement)?
        }
        Ok(())
    }

    /// Parses a small chunk of the file and calls `on_statement` each time a new statement is read.
    ///
    /// This method should be called as long as [`is_end`](#tymethod.is_end) returns false.
    /// A statement is always given whole to `on_statement`: stopping between two steps never exposes a partial one.
    fn parse_step<E: From<Self::Error>>(
        &mut self,
        factory: &NodeFactory,
        on_statement: &mut impl FnMut(Statement) -> Result<(), E>,
    ) -> Result<(), E>;

    /// Returns `true` if the complete file has been consumed by the parser.
    fn is_end(&self) -> bool;

    /// Parses the complete file into a [`StatementConsumer`](../consumer/trait.StatementConsumer.html).
    ///
    /// The consumer `begin` method is called first, then `on_statement` for each statement,
    /// then `end`. `end` is called even if parsing or the consumer failed, and the first error is returned.
    fn parse_into<C: StatementConsumer>(
        &mut self,
        consumer: &mut C,
    ) -> Result<(), ConsumeError<Self::Error, C::Error>> {
        let factory = consumer.node_factory();
        consumer.begin();
        let parsed = self.parse_all(&factory, &mut |statement| {
            consumer
                .on_statement(statement)
                .map_err(ConsumeError::Consumer)
        });
        let ended = consumer.end().map_err(ConsumeError::Consumer);
        parsed.and(ended)
    }
}

/// Error returned by [`StatementParser::parse_into`](trait.StatementParser.html#method.parse_into).
#[derive(Debug)]
pub enum ConsumeError<P, C> {
    /// The document could not be parsed.
    Parser(P),
    /// The consumer refused a statement.
    Consumer(C),
}

impl<P: fmt::Display, C: fmt::Display> fmt::Display for ConsumeError<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumeError::Parser(error) => write!(f, "RDF parsing failed - {}", error),
            ConsumeError::Consumer(error) => write!(f, "statement consumer failed - {}", error),
        }
    }
}

impl<P: Error + 'static, C: Error + 'static> Error for ConsumeError<P, C> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConsumeError::Parser(error) => Some(error),
            ConsumeError::Consumer(error) => Some(error),
        }
    }
}

impl<P, C> From<P> for ConsumeError<P, C> {
    fn from(error: P) -> Self {
        ConsumeError::Parser(error)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::consumer::Lifecycle;
    use std::convert::Infallible;

    #[derive(Debug, Clone, Copy)]
    pub struct BrokenDocument;

    impl fmt::Display for BrokenDocument {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "broken document")
        }
    }

    impl Error for BrokenDocument {}

    /// Yields the given `(subject, predicate, object)` IRIs one per step, then fails if `fail` is set.
    pub struct ListParser {
        pub triples: Vec<(&'static str, &'static str, &'static str)>,
        pub fail: bool,
        pub position: usize,
    }

    impl ListParser {
        pub fn new(triples: Vec<(&'static str, &'static str, &'static str)>) -> Self {
            Self {
                triples,
                fail: false,
                position: 0,
            }
        }
    }

    impl StatementParser for ListParser {
        type Error = BrokenDocument;

        fn parse_step<E: From<BrokenDocument>>(
            &mut self,
            factory: &NodeFactory,
            on_statement: &mut impl FnMut(Statement) -> Result<(), E>,
        ) -> Result<(), E> {
            if let Some((s, p, o)) = self.triples.get(self.position).copied() {
                self.position += 1;
                on_statement(Statement::new(
                    factory.named_node(s),
                    factory.named_node(p),
                    factory.named_node(o),
                ))
            } else {
                self.position += 1;
                if self.fail {
                    Err(BrokenDocument.into())
                } else {
                    Ok(())
                }
            }
        }

        fn is_end(&self) -> bool {
            self.position > self.triples.len()
        }
    }

    /// Records the protocol calls it receives.
    #[derive(Default)]
    struct RecordingConsumer {
        factory: NodeFactory,
        lifecycle: Lifecycle,
        calls: Vec<String>,
    }

    impl StatementConsumer for RecordingConsumer {
        type Error = Infallible;

        fn begin(&mut self) {
            self.lifecycle.begin();
            self.calls.push("begin".to_owned());
        }

        fn node_factory(&self) -> NodeFactory {
            self.factory.clone()
        }

        fn on_statement(&mut self, statement: Statement) -> Result<(), Infallible> {
            self.lifecycle.check_active();
            assert!(self.factory.owns(&statement));
            self.calls.push(statement.to_string());
            Ok(())
        }

        fn end(&mut self) -> Result<(), Infallible> {
            self.lifecycle.end();
            self.calls.push("end".to_owned());
            Ok(())
        }
    }

    #[test]
    fn lifecycle_around_statements() {
        let mut consumer = RecordingConsumer::default();
        ListParser::new(vec![("urn:a", "urn:p", "urn:b"), ("urn:b", "urn:p", "urn:c")])
            .parse_into(&mut consumer)
            .unwrap();
        assert_eq!(
            vec![
                "begin",
                "<urn:a> <urn:p> <urn:b>",
                "<urn:b> <urn:p> <urn:c>",
                "end"
            ],
            consumer.calls
        );
    }

    #[test]
    fn lifecycle_without_statements() {
        let mut consumer = RecordingConsumer::default();
        ListParser::new(Vec::new())
            .parse_into(&mut consumer)
            .unwrap();
        assert_eq!(vec!["begin", "end"], consumer.calls);
    }

    #[test]
    fn end_is_called_after_a_parse_error() {
        let mut consumer = RecordingConsumer::default();
        let mut parser = ListParser::new(vec![("urn:a", "urn:p", "urn:b")]);
        parser.fail = true;
        match parser.parse_into(&mut consumer) {
            Err(ConsumeError::Parser(BrokenDocument)) => (),
            r => panic!("unexpected result {:?}", r),
        }
        assert_eq!(
            vec!["begin", "<urn:a> <urn:p> <urn:b>", "end"],
            consumer.calls
        );
        assert_eq!(Lifecycle::Closed, consumer.lifecycle);
    }
}
