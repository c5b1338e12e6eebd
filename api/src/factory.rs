//! Interning factory for nodes.

use crate::model::*;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCOPE: AtomicU64 = AtomicU64::new(1);

/// Minimal interner size before unreferenced strings are swept.
const MIN_SWEEP_THRESHOLD: usize = 1024;

/// Mints the nodes used by statements.
///
/// Node texts are interned: two nodes with the same text built by the same factory share their allocation.
/// A factory also generates fresh blank nodes that can not be equal to the blank nodes of another factory.
///
/// `NodeFactory` is a cheap handle: clones refer to the same factory, which [`ptr_eq`](#method.ptr_eq) can check.
/// Interned strings that are not referenced by any node anymore are dropped once the interner grows,
/// so a factory used for streaming keeps a memory footprint bounded by the live nodes.
///
/// ```
/// use rdfprint_api::factory::NodeFactory;
///
/// let factory = NodeFactory::new();
/// let a = factory.named_node("http://example.com/a");
/// let statement = rdfprint_api::model::Statement::new(a.clone(), a.clone(), a);
/// assert!(factory.owns(&statement));
/// assert!(!NodeFactory::new().owns(&statement));
/// ```
#[derive(Clone)]
pub struct NodeFactory {
    inner: Rc<FactoryInner>,
}

struct FactoryInner {
    scope: u64,
    strings: RefCell<HashSet<Rc<str>>>,
    sweep_threshold: Cell<usize>,
    generated: Cell<u64>,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FactoryInner {
                scope: NEXT_SCOPE.fetch_add(1, Ordering::Relaxed),
                strings: RefCell::default(),
                sweep_threshold: Cell::new(MIN_SWEEP_THRESHOLD),
                generated: Cell::new(0),
            }),
        }
    }

    pub fn named_node(&self, iri: &str) -> NamedNode {
        NamedNode {
            iri: self.intern(iri),
        }
    }

    /// A blank node with a label given by the document, like an `rdf:nodeID` value.
    pub fn blank_node(&self, label: &str) -> BlankNode {
        BlankNode {
            kind: BlankNodeKind::Labelled(self.intern(label)),
        }
    }

    /// A new blank node, different from all the nodes built before.
    pub fn fresh_blank_node(&self) -> BlankNode {
        let id = self.inner.generated.get() + 1;
        self.inner.generated.set(id);
        BlankNode {
            kind: BlankNodeKind::Generated {
                scope: self.inner.scope,
                id,
            },
        }
    }

    pub fn simple_literal(&self, value: &str) -> Literal {
        Literal::Simple {
            value: self.intern(value),
        }
    }

    /// The language tag is expected to be already validated and normalized.
    pub fn language_tagged_literal(&self, value: &str, language: &str) -> Literal {
        Literal::LanguageTaggedString {
            value: self.intern(value),
            language: self.intern(language),
        }
    }

    pub fn typed_literal(&self, value: &str, datatype: &str) -> Literal {
        Literal::Typed {
            value: self.intern(value),
            datatype: self.named_node(datatype),
        }
    }

    /// Returns `true` if all the nodes of the statement have been built by this factory.
    pub fn owns(&self, statement: &Statement) -> bool {
        self.owns_subject(statement.subject())
            && self.owns_named_node(statement.predicate())
            && self.owns_term(statement.object())
    }

    /// Returns `true` if `other` is a handle to the same factory.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of strings currently interned.
    pub fn interned_len(&self) -> usize {
        self.inner.strings.borrow().len()
    }

    fn intern(&self, value: &str) -> Rc<str> {
        let mut strings = self.inner.strings.borrow_mut();
        if let Some(existing) = strings.get(value) {
            return existing.clone();
        }
        if strings.len() >= self.inner.sweep_threshold.get() {
            strings.retain(|s| Rc::strong_count(s) > 1);
            self.inner
                .sweep_threshold
                .set((strings.len() * 2).max(MIN_SWEEP_THRESHOLD));
        }
        let value: Rc<str> = value.into();
        strings.insert(value.clone());
        value
    }

    fn owns_str(&self, value: &Rc<str>) -> bool {
        self.inner
            .strings
            .borrow()
            .get(&**value)
            .map_or(false, |interned| Rc::ptr_eq(interned, value))
    }

    fn owns_named_node(&self, node: &NamedNode) -> bool {
        self.owns_str(&node.iri)
    }

    fn owns_blank_node(&self, node: &BlankNode) -> bool {
        match &node.kind {
            BlankNodeKind::Labelled(label) => self.owns_str(label),
            BlankNodeKind::Generated { scope, id } => {
                *scope == self.inner.scope && *id <= self.inner.generated.get()
            }
        }
    }

    fn owns_subject(&self, node: &NamedOrBlankNode) -> bool {
        match node {
            NamedOrBlankNode::NamedNode(node) => self.owns_named_node(node),
            NamedOrBlankNode::BlankNode(node) => self.owns_blank_node(node),
        }
    }

    fn owns_term(&self, term: &Term) -> bool {
        match term {
            Term::NamedNode(node) => self.owns_named_node(node),
            Term::BlankNode(node) => self.owns_blank_node(node),
            Term::Literal(Literal::Simple { value }) => self.owns_str(value),
            Term::Literal(Literal::LanguageTaggedString { value, language }) => {
                self.owns_str(value) && self.owns_str(language)
            }
            Term::Literal(Literal::Typed { value, datatype }) => {
                self.owns_str(value) && self.owns_named_node(datatype)
            }
        }
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeFactory")
            .field("scope", &self.inner.scope)
            .field("interned", &self.interned_len())
            .field("generated", &self.inner.generated.get())
            .finish()
    }
}
