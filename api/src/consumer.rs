//! The protocol between a parser and the recipient of its statements.

use crate::factory::NodeFactory;
use crate::model::Statement;
use std::error::Error;

/// Receives the statements of a single parse.
///
/// A parser calls [`begin`](#tymethod.begin) once, then [`on_statement`](#tymethod.on_statement)
/// for each statement in document order, then [`end`](#tymethod.end) once, even if the parse failed
/// or found no statement.
/// The nodes of the statements must be built with the factory returned by [`node_factory`](#tymethod.node_factory).
///
/// A consumer is bound to one parse and is not reused.
/// Calling the methods out of this order is a bug of the caller: implementations panic.
pub trait StatementConsumer {
    type Error: Error;

    /// Called before the first statement.
    fn begin(&mut self);

    /// The factory used to build the nodes of this parse. It is the same one for the whole parse.
    fn node_factory(&self) -> NodeFactory;

    /// Called for each statement in document order.
    fn on_statement(&mut self, statement: Statement) -> Result<(), Self::Error>;

    /// Called after the last statement. The consumer must release its output.
    fn end(&mut self) -> Result<(), Self::Error>;
}

/// The state of a consumer in the `begin`, `on_statement`*, `end` sequence.
///
/// Transitions out of order panic.
///
/// ```
/// use rdfprint_api::consumer::Lifecycle;
///
/// let mut lifecycle = Lifecycle::default();
/// lifecycle.begin();
/// lifecycle.check_active();
/// lifecycle.end();
/// assert_eq!(Lifecycle::Closed, lifecycle);
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Lifecycle {
    Uninitialized,
    Active,
    Closed,
}

impl Lifecycle {
    pub fn begin(&mut self) {
        match self {
            Lifecycle::Uninitialized => *self = Lifecycle::Active,
            state => panic!("begin called on a consumer in state {:?}", state),
        }
    }

    pub fn check_active(&self) {
        if *self != Lifecycle::Active {
            panic!("statement delivered to a consumer in state {:?}", self)
        }
    }

    pub fn end(&mut self) {
        match self {
            Lifecycle::Active => *self = Lifecycle::Closed,
            state => panic!("end called on a consumer in state {:?}", state),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::Uninitialized
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[should_panic(expected = "statement delivered")]
    fn statement_before_begin() {
        Lifecycle::default().check_active();
    }

    #[test]
    #[should_panic(expected = "statement delivered")]
    fn statement_after_end() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.begin();
        lifecycle.end();
        lifecycle.check_active();
    }

    #[test]
    #[should_panic(expected = "begin called")]
    fn double_begin() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.begin();
        lifecycle.begin();
    }

    #[test]
    #[should_panic(expected = "end called")]
    fn end_without_begin() {
        Lifecycle::default().end();
    }
}
