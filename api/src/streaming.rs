use crate::consumer::{Lifecycle, StatementConsumer};
use crate::factory::NodeFactory;
use crate::formatter::{LineFormatter, StatementFormatter};
use crate::model::Statement;
use crate::store::{AddOutcome, Model};
use log::{debug, error, warn};
use std::convert::Infallible;
use std::io::Write;

/// Counters of a [`StreamingConsumer`](struct.StreamingConsumer.html) run.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct StreamingReport {
    /// Statements received.
    pub statements: u64,
    /// Statements that could not be written to the output.
    pub write_failures: u64,
    /// Failures of the final flush of the output.
    pub flush_failures: u64,
    /// Statements that could not be added to or removed from the model.
    pub model_failures: u64,
}

/// A consumer that writes each statement as soon as it is parsed.
///
/// Each statement is written to the output, then added to the model and immediately removed from it,
/// so the model does not grow with the document.
/// Output and model failures are logged and counted in the [`StreamingReport`](struct.StreamingReport.html):
/// they never stop the parse.
///
/// ```
/// use rdfprint_api::consumer::StatementConsumer;
/// use rdfprint_api::model::Statement;
/// use rdfprint_api::store::Model;
/// use rdfprint_api::streaming::StreamingConsumer;
///
/// let mut model = Model::new();
/// let mut output = Vec::default();
/// let mut consumer = StreamingConsumer::new(&mut model, &mut output);
/// let factory = consumer.node_factory();
/// consumer.begin();
/// consumer.on_statement(Statement::new(
///     factory.named_node("urn:a"),
///     factory.named_node("urn:p"),
///     factory.named_node("urn:b"),
/// )).unwrap();
/// consumer.end().unwrap();
/// assert_eq!(1, consumer.report().statements);
/// drop(consumer);
///
/// assert_eq!(b"Statement <urn:a> <urn:p> <urn:b>\n".as_ref(), output.as_slice());
/// assert!(model.is_empty());
/// ```
pub struct StreamingConsumer<'a, W: Write> {
    model: &'a mut Model,
    factory: NodeFactory,
    formatter: LineFormatter<W>,
    round_trip: bool,
    lifecycle: Lifecycle,
    report: StreamingReport,
}

impl<'a, W: Write> StreamingConsumer<'a, W> {
    pub fn new(model: &'a mut Model, output: W) -> Self {
        Self {
            factory: model.node_factory(),
            model,
            formatter: LineFormatter::new(output),
            round_trip: true,
            lifecycle: Lifecycle::default(),
            report: StreamingReport::default(),
        }
    }

    /// Only writes the statements, without adding them to the model.
    pub fn without_model_round_trip(mut self) -> Self {
        self.round_trip = false;
        self
    }

    pub fn report(&self) -> StreamingReport {
        self.report
    }

    fn pass_through_model(&mut self, statement: Statement) {
        match self.model.add(statement.clone()) {
            Ok(AddOutcome::Added) => {
                if let Err(e) = self.model.remove(&statement) {
                    warn!("Error in removing statement - {}", e);
                    self.report.model_failures += 1;
                }
            }
            // It was in the model before the parse: it is not ours to remove.
            Ok(AddOutcome::AlreadyPresent) => (),
            Err(e) => {
                warn!("Error in adding statement - {}", e);
                self.report.model_failures += 1;
            }
        }
    }
}

impl<'a, W: Write> StatementConsumer for StreamingConsumer<'a, W> {
    type Error = Infallible;

    fn begin(&mut self) {
        self.lifecycle.begin();
        debug!("Streaming statements from {:?}", self.model.source_iri());
    }

    fn node_factory(&self) -> NodeFactory {
        self.factory.clone()
    }

    fn on_statement(&mut self, statement: Statement) -> Result<(), Infallible> {
        self.lifecycle.check_active();
        self.report.statements += 1;
        if let Err(e) = self.formatter.format(&statement) {
            error!("Error in writing statement {} - {}", statement, e);
            self.report.write_failures += 1;
        }
        if self.round_trip {
            self.pass_through_model(statement);
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), Infallible> {
        self.lifecycle.end();
        if let Err(e) = self.formatter.flush() {
            error!("Error in flushing the output - {}", e);
            self.report.flush_failures += 1;
        }
        debug!(
            "Streamed {} statements, {} left in the model",
            self.report.statements,
            self.model.len()
        );
        Ok(())
    }
}
