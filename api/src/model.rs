//! Data structures for [RDF 1.1 Concepts](https://www.w3.org/TR/rdf11-concepts/) like IRI, literal or statements.
//!
//! Nodes share their text through reference counting: they are minted by a
//! [`NodeFactory`](../factory/struct.NodeFactory.html) and may be referenced by any number of statements.

use std::fmt;
use std::fmt::Write;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
///
/// The default string formatter is returning an N-Triples, Turtle and SPARQL compatible representation.
///
/// ```
/// use rdfprint_api::factory::NodeFactory;
///
/// let factory = NodeFactory::new();
/// assert_eq!(
///     "<http://example.com/foo>",
///     factory.named_node("http://example.com/foo").to_string()
/// )
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct NamedNode {
    pub(crate) iri: Rc<str>,
}

impl NamedNode {
    /// The [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri) itself.
    pub fn as_str(&self) -> &str {
        &self.iri
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// A blank node is either labelled, when the document gives it an identifier,
/// or generated by a factory. Generated nodes are scoped to their factory:
/// two factories never produce equal generated nodes.
///
/// The default string formatter is returning an N-Triples, Turtle and SPARQL compatible representation.
/// Generated nodes are written with a purely numeric label, which no XML `NCName` can clash with.
///
/// ```
/// use rdfprint_api::factory::NodeFactory;
///
/// let factory = NodeFactory::new();
/// assert_eq!("_:a1", factory.blank_node("a1").to_string());
/// assert_eq!("_:1", factory.fresh_blank_node().to_string());
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct BlankNode {
    pub(crate) kind: BlankNodeKind,
}

#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub(crate) enum BlankNodeKind {
    Labelled(Rc<str>),
    Generated { scope: u64, id: u64 },
}

impl BlankNode {
    /// The label given by the document, if any.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            BlankNodeKind::Labelled(label) => Some(&**label),
            BlankNodeKind::Generated { .. } => None,
        }
    }

    /// Returns `true` if this node was generated by a factory rather than read from the document.
    pub fn is_generated(&self) -> bool {
        matches!(self.kind, BlankNodeKind::Generated { .. })
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BlankNodeKind::Labelled(label) => write!(f, "_:{}", label),
            BlankNodeKind::Generated { id, .. } => write!(f, "_:{}", id),
        }
    }
}

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// The default string formatter is returning an N-Triples, Turtle and SPARQL compatible representation.
///
/// ```
/// use rdfprint_api::factory::NodeFactory;
///
/// let factory = NodeFactory::new();
/// assert_eq!(
///     "\"foo\\nbar\"",
///     factory.simple_literal("foo\nbar").to_string()
/// );
/// assert_eq!(
///     "\"1999-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>",
///     factory.typed_literal("1999-01-01", "http://www.w3.org/2001/XMLSchema#date").to_string()
/// );
/// assert_eq!(
///     "\"foo\"@en",
///     factory.language_tagged_literal("foo", "en").to_string()
/// );
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Literal {
    /// A [simple literal](https://www.w3.org/TR/rdf11-concepts/#dfn-simple-literal) without datatype or language form.
    Simple {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: Rc<str>,
    },
    /// A [language-tagged string](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tagged-string)
    LanguageTaggedString {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: Rc<str>,
        /// The [language tag](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tag).
        language: Rc<str>,
    },
    /// A literal with an explicit datatype
    Typed {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: Rc<str>,
        /// The [datatype IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-datatype-iri).
        datatype: NamedNode,
    },
}

impl Literal {
    /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
    pub fn value(&self) -> &str {
        match self {
            Literal::Simple { value }
            | Literal::LanguageTaggedString { value, .. }
            | Literal::Typed { value, .. } => &**value,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        escape(self.value()).try_for_each(|c| f.write_char(c))?;
        f.write_char('"')?;
        match self {
            Literal::Simple { .. } => Ok(()),
            Literal::LanguageTaggedString { language, .. } => write!(f, "@{}", language),
            Literal::Typed { datatype, .. } => write!(f, "^^{}", datatype),
        }
    }
}

/// The union of [IRIs](https://www.w3.org/TR/rdf11-concepts/#dfn-iri) and [blank nodes](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// The default string formatter is returning an N-Triples, Turtle and SPARQL compatible representation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum NamedOrBlankNode {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl fmt::Display for NamedOrBlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamedOrBlankNode::NamedNode(node) => node.fmt(f),
            NamedOrBlankNode::BlankNode(node) => node.fmt(f),
        }
    }
}

impl From<NamedNode> for NamedOrBlankNode {
    fn from(node: NamedNode) -> Self {
        NamedOrBlankNode::NamedNode(node)
    }
}

impl From<BlankNode> for NamedOrBlankNode {
    fn from(node: BlankNode) -> Self {
        NamedOrBlankNode::BlankNode(node)
    }
}

/// An RDF [term](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-term).
///
/// It is the union of [IRIs](https://www.w3.org/TR/rdf11-concepts/#dfn-iri), [blank nodes](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node) and [literals](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// The default string formatter is returning an N-Triples, Turtle and SPARQL compatible representation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(node) => node.fmt(f),
            Term::BlankNode(node) => node.fmt(f),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl From<NamedOrBlankNode> for Term {
    fn from(resource: NamedOrBlankNode) -> Self {
        match resource {
            NamedOrBlankNode::NamedNode(node) => Term::NamedNode(node),
            NamedOrBlankNode::BlankNode(node) => Term::BlankNode(node),
        }
    }
}

/// Where a statement has been read from.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Provenance {
    /// The IRI of the source document.
    pub document: Option<Rc<str>>,
    /// The byte offset in the document at which the statement was recognized.
    pub byte_offset: Option<u64>,
}

/// An [RDF triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple) with an optional [`Provenance`].
///
/// Equality and hashing only consider the subject, the predicate and the object.
///
/// The default string formatter is returning the subject, the predicate and the object
/// separated by spaces, each of them in N-Triples syntax.
///
/// ```
/// use rdfprint_api::factory::NodeFactory;
/// use rdfprint_api::model::Statement;
///
/// let factory = NodeFactory::new();
/// let statement = Statement::new(
///     factory.named_node("http://example.com/foo"),
///     factory.named_node("http://schema.org/sameAs"),
///     factory.named_node("http://example.com/foo"),
/// );
/// assert_eq!(
///     "<http://example.com/foo> <http://schema.org/sameAs> <http://example.com/foo>",
///     statement.to_string()
/// )
/// ```
#[derive(Debug, Clone)]
pub struct Statement {
    subject: NamedOrBlankNode,
    predicate: NamedNode,
    object: Term,
    provenance: Option<Provenance>,
}

impl Statement {
    pub fn new(
        subject: impl Into<NamedOrBlankNode>,
        predicate: NamedNode,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
            provenance: None,
        }
    }

    /// Attaches a provenance to the statement. It does not change its identity.
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub fn subject(&self) -> &NamedOrBlankNode {
        &self.subject
    }

    pub fn predicate(&self) -> &NamedNode {
        &self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}

impl Eq for Statement {}

impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.predicate.hash(state);
        self.object.hash(state);
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

fn escape(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(EscapeRdf::new)
}

/// A customized version of EscapeDefault of the Rust standard library
struct EscapeRdf {
    state: EscapeRdfState,
}

enum EscapeRdfState {
    Done,
    Char(char),
    Backslash(char),
}

impl EscapeRdf {
    fn new(c: char) -> Self {
        Self {
            state: match c {
                '\n' => EscapeRdfState::Backslash('n'),
                '\r' => EscapeRdfState::Backslash('r'),
                '"' => EscapeRdfState::Backslash('"'),
                '\\' => EscapeRdfState::Backslash('\\'),
                c => EscapeRdfState::Char(c),
            },
        }
    }
}

impl Iterator for EscapeRdf {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self.state {
            EscapeRdfState::Backslash(c) => {
                self.state = EscapeRdfState::Char(c);
                Some('\\')
            }
            EscapeRdfState::Char(c) => {
                self.state = EscapeRdfState::Done;
                Some(c)
            }
            EscapeRdfState::Done => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::factory::NodeFactory;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(statement: &Statement) -> u64 {
        let mut hasher = DefaultHasher::new();
        statement.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn provenance_does_not_change_identity() {
        let factory = NodeFactory::new();
        let plain = Statement::new(
            factory.named_node("urn:a"),
            factory.named_node("urn:p"),
            factory.named_node("urn:b"),
        );
        let located = plain.clone().with_provenance(Provenance {
            document: Some("file:///tmp/a.rdf".into()),
            byte_offset: Some(42),
        });
        assert_eq!(plain, located);
        assert_eq!(hash_of(&plain), hash_of(&located));
        assert_eq!(Some(42), located.provenance().and_then(|p| p.byte_offset));
    }

    #[test]
    fn literals_are_escaped() {
        let factory = NodeFactory::new();
        assert_eq!(
            r#""say \"hi\"\\"@en"#,
            factory
                .language_tagged_literal("say \"hi\"\\", "en")
                .to_string()
        );
    }

    #[test]
    fn generated_blank_nodes_are_scoped_to_their_factory() {
        let first = NodeFactory::new();
        let second = NodeFactory::new();
        let a = first.fresh_blank_node();
        let b = second.fresh_blank_node();
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
        assert!(a.is_generated());
        assert_eq!(None, a.label());
    }
}
