use crate::consumer::{Lifecycle, StatementConsumer};
use crate::factory::NodeFactory;
use crate::model::Statement;
use crate::store::{Model, ModelError};
use log::debug;
use std::error::Error;
use std::fmt;

/// Error returned by a [`BufferingConsumer`](struct.BufferingConsumer.html) when the model rejects a statement.
#[derive(Debug)]
pub struct BufferingError {
    cause: ModelError,
}

impl fmt::Display for BufferingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to add a statement to the model: {}", self.cause)
    }
}

impl Error for BufferingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// A consumer that only adds the statements to the model.
///
/// The statements are read back from the model once the parse is done.
/// Duplicated statements are stored once.
/// A statement the model rejects aborts the parse.
///
/// ```
/// use rdfprint_api::buffering::BufferingConsumer;
/// use rdfprint_api::consumer::StatementConsumer;
/// use rdfprint_api::model::Statement;
/// use rdfprint_api::store::Model;
///
/// let mut model = Model::new();
/// let mut consumer = BufferingConsumer::new(&mut model);
/// let factory = consumer.node_factory();
/// let statement = Statement::new(
///     factory.named_node("urn:a"),
///     factory.named_node("urn:p"),
///     factory.named_node("urn:b"),
/// );
/// consumer.begin();
/// consumer.on_statement(statement.clone())?;
/// consumer.on_statement(statement.clone())?;
/// consumer.end()?;
///
/// assert_eq!(vec![&statement], model.elements().collect::<Vec<_>>());
/// # Result::<_, rdfprint_api::buffering::BufferingError>::Ok(())
/// ```
pub struct BufferingConsumer<'a> {
    model: &'a mut Model,
    factory: NodeFactory,
    lifecycle: Lifecycle,
}

impl<'a> BufferingConsumer<'a> {
    pub fn new(model: &'a mut Model) -> Self {
        Self {
            factory: model.node_factory(),
            model,
            lifecycle: Lifecycle::default(),
        }
    }
}

impl<'a> StatementConsumer for BufferingConsumer<'a> {
    type Error = BufferingError;

    fn begin(&mut self) {
        self.lifecycle.begin();
    }

    fn node_factory(&self) -> NodeFactory {
        self.factory.clone()
    }

    fn on_statement(&mut self, statement: Statement) -> Result<(), BufferingError> {
        self.lifecycle.check_active();
        self.model
            .add(statement)
            .map_err(|cause| BufferingError { cause })?;
        Ok(())
    }

    fn end(&mut self) -> Result<(), BufferingError> {
        self.lifecycle.end();
        debug!("Buffered {} statements", self.model.len());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejected_statements_abort() {
        let mut model = Model::new();
        let mut consumer = BufferingConsumer::new(&mut model);
        let foreign = NodeFactory::new();
        consumer.begin();
        let error = consumer
            .on_statement(Statement::new(
                foreign.named_node("urn:a"),
                foreign.named_node("urn:p"),
                foreign.named_node("urn:b"),
            ))
            .unwrap_err();
        assert!(error.source().is_some());
        assert!(error.to_string().contains("<urn:a> <urn:p> <urn:b>"));
    }

    #[test]
    fn keeps_document_order() -> Result<(), BufferingError> {
        let mut model = Model::new();
        let mut consumer = BufferingConsumer::new(&mut model);
        let factory = consumer.node_factory();
        let statements: Vec<_> = ["urn:z", "urn:a", "urn:m", "urn:a"]
            .iter()
            .map(|s| {
                Statement::new(
                    factory.named_node(s),
                    factory.named_node("urn:p"),
                    factory.simple_literal("v"),
                )
            })
            .collect();
        consumer.begin();
        for statement in &statements {
            consumer.on_statement(statement.clone())?;
        }
        consumer.end()?;
        assert_eq!(
            vec![&statements[0], &statements[1], &statements[2]],
            model.elements().collect::<Vec<_>>()
        );
        Ok(())
    }

    #[test]
    #[should_panic(expected = "statement delivered")]
    fn statement_before_begin_panics() {
        let mut model = Model::new();
        let mut consumer = BufferingConsumer::new(&mut model);
        let factory = consumer.node_factory();
        let _ = consumer.on_statement(Statement::new(
            factory.named_node("urn:a"),
            factory.named_node("urn:p"),
            factory.named_node("urn:b"),
        ));
    }
}
