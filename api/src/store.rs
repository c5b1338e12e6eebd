//! An in-memory, de-duplicating collection of statements.

use crate::factory::NodeFactory;
use crate::model::*;
use indexmap::IndexSet;
use std::error::Error;
use std::fmt;

/// The outcome of [`Model::add`](struct.Model.html#method.add).
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Error returned by [`Model`](struct.Model.html) mutations.
#[derive(Debug)]
pub struct ModelError {
    kind: ModelErrorKind,
    statement: Statement,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ModelErrorKind {
    /// The statement references nodes that were not built by the model node factory.
    ForeignNode,
    /// The statement is not in the model.
    NotFound,
}

impl ModelError {
    pub fn kind(&self) -> ModelErrorKind {
        self.kind
    }

    /// The statement that has been rejected.
    pub fn statement(&self) -> &Statement {
        &self.statement
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ModelErrorKind::ForeignNode => write!(
                f,
                "the statement {} uses nodes from another node factory",
                self.statement
            ),
            ModelErrorKind::NotFound => {
                write!(f, "the statement {} is not in the model", self.statement)
            }
        }
    }
}

impl Error for ModelError {}

/// A set of statements that keeps insertion order.
///
/// Adding a statement that is already present is a no-op.
/// Removing a statement keeps the order of the other ones.
///
/// The model owns the [`NodeFactory`](../factory/struct.NodeFactory.html) that must be used to build its statements.
///
/// ```
/// use rdfprint_api::model::Statement;
/// use rdfprint_api::store::{AddOutcome, Model};
///
/// let mut model = Model::new();
/// let factory = model.node_factory();
/// let statement = Statement::new(
///     factory.named_node("urn:a"),
///     factory.named_node("urn:p"),
///     factory.named_node("urn:b"),
/// );
/// assert_eq!(AddOutcome::Added, model.add(statement.clone())?);
/// assert_eq!(AddOutcome::AlreadyPresent, model.add(statement.clone())?);
/// assert_eq!(1, model.len());
/// model.remove(&statement)?;
/// assert!(model.is_empty());
/// # Result::<_, rdfprint_api::store::ModelError>::Ok(())
/// ```
#[derive(Debug, Default)]
pub struct Model {
    factory: NodeFactory,
    statements: IndexSet<Statement>,
    source_iri: Option<String>,
    /// Makes every removal fail.
    #[cfg(test)]
    pub(crate) refuse_removals: bool,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the factory that mints this model nodes.
    pub fn node_factory(&self) -> NodeFactory {
        self.factory.clone()
    }

    pub fn add(&mut self, statement: Statement) -> Result<AddOutcome, ModelError> {
        if !self.factory.owns(&statement) {
            return Err(ModelError {
                kind: ModelErrorKind::ForeignNode,
                statement,
            });
        }
        Ok(if self.statements.insert(statement) {
            AddOutcome::Added
        } else {
            AddOutcome::AlreadyPresent
        })
    }

    pub fn remove(&mut self, statement: &Statement) -> Result<(), ModelError> {
        if !self.removals_refused() && self.statements.shift_remove(statement) {
            Ok(())
        } else {
            Err(ModelError {
                kind: ModelErrorKind::NotFound,
                statement: statement.clone(),
            })
        }
    }

    #[cfg(test)]
    fn removals_refused(&self) -> bool {
        self.refuse_removals
    }

    #[cfg(not(test))]
    fn removals_refused(&self) -> bool {
        false
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.statements.contains(statement)
    }

    /// Iterates on the statements in insertion order.
    ///
    /// Each call starts a new iteration on the current content.
    pub fn elements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Iterates on the statements matching a pattern, `None` matching anything.
    pub fn statements_matching<'a>(
        &'a self,
        subject: Option<&'a NamedOrBlankNode>,
        predicate: Option<&'a NamedNode>,
        object: Option<&'a Term>,
    ) -> impl Iterator<Item = &'a Statement> + 'a {
        self.statements.iter().filter(move |s| {
            subject.map_or(true, |subject| s.subject() == subject)
                && predicate.map_or(true, |predicate| s.predicate() == predicate)
                && object.map_or(true, |object| s.object() == object)
        })
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Records the IRI of the document the statements come from.
    pub fn set_source_iri(&mut self, iri: impl Into<String>) {
        self.source_iri = Some(iri.into());
    }

    pub fn source_iri(&self) -> Option<&str> {
        self.source_iri.as_deref()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn statement(model: &Model, s: &str, p: &str, o: &str) -> Statement {
        let factory = model.node_factory();
        Statement::new(
            factory.named_node(s),
            factory.named_node(p),
            factory.named_node(o),
        )
    }

    #[test]
    fn duplicate_add_is_a_no_op() -> Result<(), ModelError> {
        let mut model = Model::new();
        let t = statement(&model, "urn:a", "urn:p", "urn:b");
        model.add(t.clone())?;
        let once: Vec<_> = model.elements().cloned().collect();
        assert_eq!(AddOutcome::AlreadyPresent, model.add(t.clone())?);
        let twice: Vec<_> = model.elements().cloned().collect();
        assert_eq!(once, twice);
        assert_eq!(vec![t], twice);
        Ok(())
    }

    #[test]
    fn enumeration_keeps_insertion_order() -> Result<(), ModelError> {
        let mut model = Model::new();
        let statements: Vec<_> = (0..10)
            .map(|i| statement(&model, &format!("urn:s{}", 9 - i), "urn:p", "urn:o"))
            .collect();
        for s in &statements {
            model.add(s.clone())?;
        }
        model.remove(&statements[3])?;
        let expected: Vec<_> = statements
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 3)
            .map(|(_, s)| s)
            .collect();
        assert_eq!(expected, model.elements().collect::<Vec<_>>());
        // restartable
        assert_eq!(9, model.elements().count());
        assert_eq!(9, model.elements().count());
        Ok(())
    }

    #[test]
    fn removing_a_missing_statement_fails() {
        let mut model = Model::new();
        let t = statement(&model, "urn:a", "urn:p", "urn:b");
        let error = model.remove(&t).unwrap_err();
        assert_eq!(ModelErrorKind::NotFound, error.kind());
        assert_eq!(&t, error.statement());
    }

    #[test]
    fn foreign_statements_are_rejected() {
        let mut model = Model::new();
        let other = Model::new();
        let t = statement(&other, "urn:a", "urn:p", "urn:b");
        let error = model.add(t).unwrap_err();
        assert_eq!(ModelErrorKind::ForeignNode, error.kind());
        assert!(model.is_empty());
    }

    #[test]
    fn pattern_queries() -> Result<(), ModelError> {
        let mut model = Model::new();
        model.add(statement(&model, "urn:a", "urn:p", "urn:b"))?;
        model.add(statement(&model, "urn:a", "urn:q", "urn:c"))?;
        model.add(statement(&model, "urn:d", "urn:p", "urn:b"))?;
        let factory = model.node_factory();
        let a: NamedOrBlankNode = factory.named_node("urn:a").into();
        let p = factory.named_node("urn:p");
        let b: Term = factory.named_node("urn:b").into();
        assert_eq!(2, model.statements_matching(Some(&a), None, None).count());
        assert_eq!(2, model.statements_matching(None, Some(&p), Some(&b)).count());
        assert_eq!(
            1,
            model
                .statements_matching(Some(&a), Some(&p), Some(&b))
                .count()
        );
        assert_eq!(3, model.statements_matching(None, None, None).count());
        Ok(())
    }

    #[test]
    fn source_iri_and_display() -> Result<(), ModelError> {
        let mut model = Model::new();
        assert_eq!(None, model.source_iri());
        model.set_source_iri("file:///tmp/foo.rdf");
        assert_eq!(Some("file:///tmp/foo.rdf"), model.source_iri());
        model.add(statement(&model, "urn:a", "urn:p", "urn:b"))?;
        assert_eq!("<urn:a> <urn:p> <urn:b>\n", model.to_string());
        Ok(())
    }
}
