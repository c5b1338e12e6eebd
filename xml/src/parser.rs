use crate::error::RdfXmlError;
use log::{debug, warn};
use oxilangtag::LanguageTag;
use oxiri::Iri;
use quick_xml::events::*;
use quick_xml::Reader;
use rdfprint_api::factory::NodeFactory;
use rdfprint_api::model::*;
use rdfprint_api::parser::StatementParser;
use std::collections::HashSet;
use std::io::BufRead;
use std::rc::Rc;

/// A [RDF XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser.
///
/// It implements the `StatementParser` trait.
/// It reads the file in streaming. It does not keep data in memory except a stack for handling nested XML tags
/// and a set of all seen `rdf:ID`s to detect duplicate ids.
///
/// Only the striped syntax is reduced to statements: node elements, property elements with a resource,
/// a nested node or a literal, and property attributes.
/// `rdf:parseType`, `rdf:li` and reification with `rdf:ID` on property elements are reported as unsupported.
///
/// In robust mode, the default, grammar errors are logged and the element in which they occur is skipped
/// with all its content. XML well-formedness errors always stop the parse.
///
/// Count the number of people:
/// ```
/// use rdfprint_api::factory::NodeFactory;
/// use rdfprint_api::parser::StatementParser;
/// use rdfprint_xml::{RdfXmlError, RdfXmlParser};
///
/// let file = b"<?xml version=\"1.0\"?>
/// <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:schema=\"http://schema.org/\">
///  <rdf:Description rdf:about=\"http://example.com/foo\">
///    <rdf:type rdf:resource=\"http://schema.org/Person\" />
///    <schema:name>Foo</schema:name>
///  </rdf:Description>
///  <schema:Person rdf:about=\"http://example.com/bar\" schema:name=\"Bar\" />
/// </rdf:RDF>";
///
/// let factory = NodeFactory::new();
/// let rdf_type = factory.named_node("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
/// let schema_person = factory.named_node("http://schema.org/Person");
/// let mut count = 0;
/// RdfXmlParser::new(file.as_ref(), "")?.parse_all(&factory, &mut |s| {
///     if *s.predicate() == rdf_type && *s.object() == schema_person.clone().into() {
///         count += 1;
///     }
///     Ok::<_, RdfXmlError>(())
/// })?;
/// assert_eq!(2, count);
/// # Result::<_, RdfXmlError>::Ok(())
/// ```
pub struct RdfXmlParser<R: BufRead> {
    reader: RdfXmlReader<R>,
    reader_buffer: Vec<u8>,
    is_end: bool,
}

impl<R: BufRead> RdfXmlParser<R> {
    /// Builds the parser from a `BufRead` implementation and a base IRI for relative IRI resolution.
    ///
    /// The base IRI might be empty to state there is no base IRI.
    /// It is also recorded as the document of the statements [`Provenance`](../rdfprint_api/model/struct.Provenance.html).
    pub fn new(reader: R, base_iri: &str) -> Result<Self, RdfXmlError> {
        let mut reader = Reader::from_reader(reader);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        let (base_iri, source) = if base_iri.is_empty() {
            (None, None)
        } else {
            (
                Some(
                    Iri::parse(base_iri.to_owned())
                        .map_err(|error| RdfXmlError::invalid_iri(base_iri, error))?,
                ),
                Some(base_iri.into()),
            )
        };
        Ok(Self {
            reader: RdfXmlReader {
                reader,
                state: vec![RdfXmlState::Doc { base_iri }],
                namespace_buffer: Vec::default(),
                known_rdf_id: HashSet::default(),
                has_root: false,
                robust: true,
                source,
                recovered_errors: 0,
            },
            reader_buffer: Vec::default(),
            is_end: false,
        })
    }

    /// In robust mode grammar errors are logged and the offending element is skipped.
    /// Otherwise the first grammar error stops the parse.
    pub fn with_robust_mode(mut self, robust: bool) -> Self {
        self.reader.robust = robust;
        self
    }

    /// Sets the document IRI recorded in the statements provenance.
    pub fn with_source(mut self, source: &str) -> Self {
        self.reader.source = Some(source.into());
        self
    }

    /// Number of grammar errors the parser has recovered from.
    pub fn recovered_errors(&self) -> u64 {
        self.reader.recovered_errors
    }
}

impl<R: BufRead> StatementParser for RdfXmlParser<R> {
    type Error = RdfXmlError;

    fn parse_step<E: From<RdfXmlError>>(
        &mut self,
        factory: &NodeFactory,
        on_statement: &mut impl FnMut(Statement) -> Result<(), E>,
    ) -> Result<(), E> {
        self.reader_buffer.clear();
        let event = match self
            .reader
            .reader
            .read_namespaced_event(&mut self.reader_buffer, &mut self.reader.namespace_buffer)
        {
            Ok((_, event)) => event,
            Err(error) => {
                self.is_end = true;
                let position = self.reader.reader.buffer_position();
                return Err(RdfXmlError::from(error).at(position).into());
            }
        };
        let position = self.reader.reader.buffer_position();
        match event {
            Event::Start(event) => {
                self.reader
                    .parse_start_event(&event, position, factory, on_statement)
            }
            Event::Text(event) => {
                let text = event.unescape_and_decode(&self.reader.reader);
                Ok(self.reader.parse_text_event(text, position)?)
            }
            Event::CData(event) => {
                let text = self.reader.reader.decode(&event).map(str::to_owned);
                Ok(self.reader.parse_text_event(text, position)?)
            }
            Event::End(_) => self
                .reader
                .parse_end_event(position, factory, on_statement),
            Event::Eof => {
                self.is_end = true;
                Ok(self.reader.parse_eof(position)?)
            }
            _ => Ok(()),
        }
    }

    fn is_end(&self) -> bool {
        self.is_end
    }
}

const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
const RDF_ABOUT_EACH_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
const RDF_BAG_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

const RESERVED_RDF_ELEMENTS: [&str; 11] = [
    RDF_ABOUT,
    RDF_ABOUT_EACH,
    RDF_ABOUT_EACH_PREFIX,
    RDF_BAG_ID,
    RDF_DATATYPE,
    RDF_ID,
    RDF_LI,
    RDF_NODE_ID,
    RDF_PARSE_TYPE,
    RDF_RDF,
    RDF_RESOURCE,
];
const RESERVED_RDF_ATTRIBUTES: [&str; 5] = [
    RDF_ABOUT_EACH,
    RDF_ABOUT_EACH_PREFIX,
    RDF_LI,
    RDF_RDF,
    RDF_RESOURCE,
];

enum NodeOrText {
    Node(NamedOrBlankNode),
    Text(String),
}

enum RdfXmlState {
    Doc {
        base_iri: Option<Iri<String>>,
    },
    Rdf {
        base_iri: Option<Iri<String>>,
        language: Option<String>,
    },
    NodeElt {
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: NamedOrBlankNode,
    },
    PropertyElt {
        iri: String,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: NamedOrBlankNode,
        object: Option<NodeOrText>,
        datatype: Option<String>,
    },
    /// An element ignored after a recovered error, and all its content.
    Skipped,
}

impl RdfXmlState {
    fn base_iri(&self) -> Option<&Iri<String>> {
        match self {
            RdfXmlState::Doc { base_iri }
            | RdfXmlState::Rdf { base_iri, .. }
            | RdfXmlState::NodeElt { base_iri, .. }
            | RdfXmlState::PropertyElt { base_iri, .. } => base_iri.as_ref(),
            RdfXmlState::Skipped => None,
        }
    }

    fn language(&self) -> Option<&String> {
        match self {
            RdfXmlState::Rdf { language, .. }
            | RdfXmlState::NodeElt { language, .. }
            | RdfXmlState::PropertyElt { language, .. } => language.as_ref(),
            RdfXmlState::Doc { .. } | RdfXmlState::Skipped => None,
        }
    }
}

/// The RDF attributes of an element, with the IRIs already resolved.
#[derive(Default)]
struct RdfAttributes {
    id: Option<String>,
    node_id: Option<String>,
    about: Option<String>,
    resource: Option<String>,
    datatype: Option<String>,
    type_: Option<String>,
    properties: Vec<(String, String)>,
}

struct RdfXmlReader<R: BufRead> {
    reader: Reader<R>,
    state: Vec<RdfXmlState>,
    namespace_buffer: Vec<u8>,
    known_rdf_id: HashSet<String>,
    has_root: bool,
    robust: bool,
    source: Option<Rc<str>>,
    recovered_errors: u64,
}

impl<R: BufRead> RdfXmlReader<R> {
    fn parse_start_event<E: From<RdfXmlError>>(
        &mut self,
        event: &BytesStart<'_>,
        position: usize,
        factory: &NodeFactory,
        on_statement: &mut impl FnMut(Statement) -> Result<(), E>,
    ) -> Result<(), E> {
        if let Some(RdfXmlState::Skipped) = self.state.last() {
            self.state.push(RdfXmlState::Skipped);
            return Ok(());
        }
        match self.read_element(event, factory) {
            Ok((state, statements)) => {
                self.state.push(state);
                for statement in statements {
                    on_statement(self.with_provenance(statement, position))?;
                }
            }
            Err(error) => {
                self.recover(error.at(position))?;
                self.skip_property_elt();
                self.state.push(RdfXmlState::Skipped);
            }
        }
        Ok(())
    }

    fn parse_end_event<E: From<RdfXmlError>>(
        &mut self,
        position: usize,
        factory: &NodeFactory,
        on_statement: &mut impl FnMut(Statement) -> Result<(), E>,
    ) -> Result<(), E> {
        match self.state.pop() {
            Some(RdfXmlState::PropertyElt {
                iri,
                language,
                subject,
                object,
                datatype,
                ..
            }) => {
                let object: Term = match object {
                    Some(NodeOrText::Node(node)) => node.into(),
                    Some(NodeOrText::Text(text)) => {
                        new_literal(factory, &text, &language, &datatype).into()
                    }
                    None => new_literal(factory, "", &language, &datatype).into(),
                };
                let statement = Statement::new(subject, factory.named_node(&iri), object);
                on_statement(self.with_provenance(statement, position))?;
            }
            Some(RdfXmlState::NodeElt { subject, .. }) => {
                if let Some(RdfXmlState::PropertyElt { object, .. }) = self.state.last_mut() {
                    *object = Some(NodeOrText::Node(subject))
                }
            }
            _ => (),
        }
        Ok(())
    }

    /// Text and CDATA content.
    fn parse_text_event(
        &mut self,
        text: Result<String, quick_xml::Error>,
        position: usize,
    ) -> Result<(), RdfXmlError> {
        if let Some(RdfXmlState::Skipped) = self.state.last() {
            return Ok(());
        }
        let text = text.map_err(|error| RdfXmlError::from(error).at(position))?;
        let error = match self.state.last_mut() {
            Some(RdfXmlState::PropertyElt { object, .. }) => match object {
                None => {
                    *object = Some(NodeOrText::Text(text));
                    return Ok(());
                }
                Some(NodeOrText::Text(value)) => {
                    value.push_str(&text);
                    return Ok(());
                }
                Some(NodeOrText::Node(_)) => RdfXmlError::msg(format!(
                    "A property element can not contain both a node and the text {}",
                    text
                )),
            },
            _ => RdfXmlError::msg(format!("Unexpected text event: {}", text)),
        };
        self.recover(error.at(position))?;
        self.skip_property_elt();
        Ok(())
    }

    /// A property element whose content has been skipped states nothing.
    fn skip_property_elt(&mut self) {
        if let Some(state) = self.state.last_mut() {
            if matches!(state, RdfXmlState::PropertyElt { .. }) {
                *state = RdfXmlState::Skipped;
            }
        }
    }

    fn parse_eof(&mut self, position: usize) -> Result<(), RdfXmlError> {
        if !self.has_root {
            return self.recover(RdfXmlError::msg("The document has no root element").at(position));
        }
        let unclosed = self.state.len() - 1;
        if unclosed > 0 {
            self.state.truncate(1);
            return self.recover(
                RdfXmlError::msg(format!(
                    "Unexpected end of file, {} elements are not closed",
                    unclosed
                ))
                .at(position),
            );
        }
        debug!(
            "End of the RDF/XML document after {} bytes with {} recovered errors",
            position, self.recovered_errors
        );
        Ok(())
    }

    /// Logs a recoverable error in robust mode, returns it otherwise.
    fn recover(&mut self, error: RdfXmlError) -> Result<(), RdfXmlError> {
        if self.robust && error.is_recoverable() {
            warn!("Skipping invalid RDF/XML content: {}", error);
            self.recovered_errors += 1;
            Ok(())
        } else {
            Err(error)
        }
    }

    fn with_provenance(&self, statement: Statement, position: usize) -> Statement {
        statement.with_provenance(Provenance {
            document: self.source.clone(),
            byte_offset: Some(position as u64),
        })
    }

    /// Reads a start tag and returns the state it opens with the statements it already states.
    fn read_element(
        &mut self,
        event: &BytesStart<'_>,
        factory: &NodeFactory,
    ) -> Result<(RdfXmlState, Vec<Statement>), RdfXmlError> {
        enum RdfXmlNextProduction {
            Rdf,
            NodeElt,
            PropertyElt { subject: NamedOrBlankNode },
        }

        let iri = self.resolve_tag_name(event.name())?;

        let (mut language, mut base_iri) = match self.state.last() {
            Some(state) => (state.language().cloned(), state.base_iri().cloned()),
            None => return Err(RdfXmlError::msg("No state in the stack: the XML is not balanced")),
        };
        let mut attributes = RdfAttributes::default();
        for attribute in event.attributes() {
            let attribute = attribute?;
            match attribute.key {
                b"xml:lang" => {
                    let tag = attribute.unescape_and_decode_value(&self.reader)?;
                    language = if tag.is_empty() {
                        None
                    } else {
                        Some(parse_language_tag(tag)?)
                    };
                }
                b"xml:base" => {
                    base_iri = Some(resolve(
                        base_iri.as_ref(),
                        attribute.unescape_and_decode_value(&self.reader)?,
                    )?);
                }
                key if !key.starts_with(b"xml") => {
                    let attribute_url = self.resolve_attribute_name(key)?;
                    let value = attribute.unescape_and_decode_value(&self.reader)?;
                    if attribute_url == RDF_ID {
                        if !is_nc_name(&value) {
                            return Err(RdfXmlError::msg(format!(
                                "{} is not a valid rdf:ID value",
                                value
                            )));
                        }
                        attributes.id = Some(value);
                    } else if attribute_url == RDF_NODE_ID {
                        if !is_nc_name(&value) {
                            return Err(RdfXmlError::msg(format!(
                                "{} is not a valid rdf:nodeID value",
                                value
                            )));
                        }
                        attributes.node_id = Some(value);
                    } else if attribute_url == RDF_ABOUT {
                        attributes.about = Some(value);
                    } else if attribute_url == RDF_RESOURCE {
                        attributes.resource = Some(value);
                    } else if attribute_url == RDF_DATATYPE {
                        attributes.datatype = Some(value);
                    } else if attribute_url == RDF_TYPE {
                        attributes.type_ = Some(value);
                    } else if attribute_url == RDF_PARSE_TYPE {
                        return Err(RdfXmlError::unsupported(format!(
                            "rdf:parseType=\"{}\"",
                            value
                        )));
                    } else if attribute_url == RDF_BAG_ID {
                        return Err(RdfXmlError::unsupported("rdf:bagID"));
                    } else if RESERVED_RDF_ATTRIBUTES.contains(&&*attribute_url) {
                        return Err(RdfXmlError::msg(format!(
                            "{} is not a valid attribute",
                            attribute_url
                        )));
                    } else {
                        attributes.properties.push((attribute_url, value));
                    }
                }
                _ => (), //We do not fail for unknown attributes in the XML namespace
            }
        }

        //Parsing with the base URI
        if let Some(id) = attributes.id.take() {
            let iri = resolve(base_iri.as_ref(), format!("#{}", id))?.into_inner();
            if self.known_rdf_id.contains(&iri) {
                return Err(RdfXmlError::msg(format!(
                    "{} has already been used as rdf:ID value",
                    iri
                )));
            }
            self.known_rdf_id.insert(iri.clone());
            attributes.id = Some(iri);
        }
        for value in [
            &mut attributes.about,
            &mut attributes.resource,
            &mut attributes.datatype,
            &mut attributes.type_,
        ] {
            if let Some(relative) = value.take() {
                *value = Some(resolve(base_iri.as_ref(), relative)?.into_inner());
            }
        }

        let expected_production = match self.state.last() {
            Some(RdfXmlState::Doc { .. }) => {
                if self.has_root {
                    return Err(RdfXmlError::msg("The document has more than one root element"));
                }
                self.has_root = true;
                RdfXmlNextProduction::Rdf
            }
            Some(RdfXmlState::Rdf { .. }) => RdfXmlNextProduction::NodeElt,
            Some(RdfXmlState::NodeElt { subject, .. }) => RdfXmlNextProduction::PropertyElt {
                subject: subject.clone(),
            },
            Some(RdfXmlState::PropertyElt { object: None, .. }) => RdfXmlNextProduction::NodeElt,
            Some(RdfXmlState::PropertyElt { .. }) => {
                return Err(RdfXmlError::msg(
                    "A property element can only contain a single node element",
                ))
            }
            Some(RdfXmlState::Skipped) | None => {
                return Err(RdfXmlError::msg("No state in the stack: the XML is not balanced"))
            }
        };

        match expected_production {
            RdfXmlNextProduction::Rdf if iri == RDF_RDF => {
                Ok((RdfXmlState::Rdf { base_iri, language }, Vec::new()))
            }
            RdfXmlNextProduction::Rdf | RdfXmlNextProduction::NodeElt => {
                if RESERVED_RDF_ELEMENTS.contains(&&*iri) {
                    return Err(RdfXmlError::msg(format!(
                        "Invalid node element tag name: {}",
                        iri
                    )));
                }
                build_node_elt(iri, base_iri, language, attributes, factory)
            }
            RdfXmlNextProduction::PropertyElt { subject } => {
                if iri == RDF_LI {
                    return Err(RdfXmlError::unsupported("rdf:li container membership"));
                }
                if RESERVED_RDF_ELEMENTS.contains(&&*iri) || iri == RDF_DESCRIPTION {
                    return Err(RdfXmlError::msg(format!(
                        "Invalid property element tag name: {}",
                        iri
                    )));
                }
                build_property_elt(iri, base_iri, language, subject, attributes, factory)
            }
        }
    }

    fn resolve_tag_name(&self, qname: &[u8]) -> Result<String, RdfXmlError> {
        let (namespace, local_name) = self.reader.event_namespace(qname, &self.namespace_buffer);
        self.resolve_ns_name(namespace, local_name)
    }

    fn resolve_attribute_name(&self, qname: &[u8]) -> Result<String, RdfXmlError> {
        let (namespace, local_name) = self
            .reader
            .attribute_namespace(qname, &self.namespace_buffer);
        self.resolve_ns_name(namespace, local_name)
    }

    fn resolve_ns_name(
        &self,
        namespace: Option<&[u8]>,
        local_name: &[u8],
    ) -> Result<String, RdfXmlError> {
        match namespace {
            Some(namespace) => {
                Ok(self.reader.decode(namespace)?.to_owned() + self.reader.decode(local_name)?)
            }
            None => Err(RdfXmlError::msg(format!(
                "The name {} is not in a namespace",
                self.reader.decode(local_name)?
            ))),
        }
    }
}

fn build_node_elt(
    iri: String,
    base_iri: Option<Iri<String>>,
    language: Option<String>,
    attributes: RdfAttributes,
    factory: &NodeFactory,
) -> Result<(RdfXmlState, Vec<Statement>), RdfXmlError> {
    if attributes.resource.is_some() || attributes.datatype.is_some() {
        return Err(RdfXmlError::msg(
            "rdf:resource and rdf:datatype are not allowed on node elements",
        ));
    }
    let subject: NamedOrBlankNode = match (attributes.id, attributes.node_id, attributes.about) {
        (Some(id), None, None) => factory.named_node(&id).into(),
        (None, Some(node_id), None) => factory.blank_node(&node_id).into(),
        (None, None, Some(about)) => factory.named_node(&about).into(),
        (None, None, None) => factory.fresh_blank_node().into(),
        (Some(_), Some(_), _) => {
            return Err(RdfXmlError::msg(
                "Not both rdf:ID and rdf:nodeID could be set at the same time",
            ))
        }
        (_, Some(_), Some(_)) => {
            return Err(RdfXmlError::msg(
                "Not both rdf:nodeID and rdf:about could be set at the same time",
            ))
        }
        (Some(_), _, Some(_)) => {
            return Err(RdfXmlError::msg(
                "Not both rdf:ID and rdf:about could be set at the same time",
            ))
        }
    };

    let mut statements =
        property_attr_statements(&subject, attributes.properties, &language, factory);
    if let Some(type_attr) = attributes.type_ {
        statements.push(Statement::new(
            subject.clone(),
            factory.named_node(RDF_TYPE),
            factory.named_node(&type_attr),
        ));
    }
    if iri != RDF_DESCRIPTION {
        statements.push(Statement::new(
            subject.clone(),
            factory.named_node(RDF_TYPE),
            factory.named_node(&iri),
        ));
    }
    Ok((
        RdfXmlState::NodeElt {
            base_iri,
            language,
            subject,
        },
        statements,
    ))
}

fn build_property_elt(
    iri: String,
    base_iri: Option<Iri<String>>,
    language: Option<String>,
    subject: NamedOrBlankNode,
    attributes: RdfAttributes,
    factory: &NodeFactory,
) -> Result<(RdfXmlState, Vec<Statement>), RdfXmlError> {
    if attributes.id.is_some() {
        return Err(RdfXmlError::unsupported(
            "Reification with rdf:ID on a property element",
        ));
    }
    if attributes.about.is_some() {
        return Err(RdfXmlError::msg(
            "rdf:about is not allowed on property elements",
        ));
    }
    if attributes.resource.is_none()
        && attributes.node_id.is_none()
        && attributes.type_.is_none()
        && attributes.properties.is_empty()
    {
        return Ok((
            RdfXmlState::PropertyElt {
                iri,
                base_iri,
                language,
                subject,
                object: None,
                datatype: attributes.datatype,
            },
            Vec::new(),
        ));
    }

    if attributes.datatype.is_some() {
        return Err(RdfXmlError::msg(
            "rdf:datatype is not allowed on a property element with a resource value",
        ));
    }
    let object: NamedOrBlankNode = match (attributes.resource, attributes.node_id) {
        (Some(resource), None) => factory.named_node(&resource).into(),
        (None, Some(node_id)) => factory.blank_node(&node_id).into(),
        (None, None) => factory.fresh_blank_node().into(),
        (Some(_), Some(_)) => {
            return Err(RdfXmlError::msg(
                "Not both rdf:resource and rdf:nodeID could be set at the same time",
            ))
        }
    };
    let mut statements =
        property_attr_statements(&object, attributes.properties, &language, factory);
    if let Some(type_attr) = attributes.type_ {
        statements.push(Statement::new(
            object.clone(),
            factory.named_node(RDF_TYPE),
            factory.named_node(&type_attr),
        ));
    }
    Ok((
        RdfXmlState::PropertyElt {
            iri,
            base_iri,
            language,
            subject,
            object: Some(NodeOrText::Node(object)),
            datatype: None,
        },
        statements,
    ))
}

fn property_attr_statements(
    subject: &NamedOrBlankNode,
    properties: Vec<(String, String)>,
    language: &Option<String>,
    factory: &NodeFactory,
) -> Vec<Statement> {
    properties
        .into_iter()
        .map(|(predicate, value)| {
            Statement::new(
                subject.clone(),
                factory.named_node(&predicate),
                new_literal(factory, &value, language, &None),
            )
        })
        .collect()
}

fn new_literal(
    factory: &NodeFactory,
    value: &str,
    language: &Option<String>,
    datatype: &Option<String>,
) -> Literal {
    if let Some(datatype) = datatype {
        factory.typed_literal(value, datatype)
    } else if let Some(language) = language {
        factory.language_tagged_literal(value, language)
    } else {
        factory.simple_literal(value)
    }
}

fn resolve(base_iri: Option<&Iri<String>>, iri: String) -> Result<Iri<String>, RdfXmlError> {
    let resolved = if let Some(base_iri) = base_iri {
        base_iri.resolve(&iri)
    } else {
        Iri::parse(iri.clone())
    };
    resolved.map_err(|error| RdfXmlError::invalid_iri(iri, error))
}

fn parse_language_tag(tag: String) -> Result<String, RdfXmlError> {
    match LanguageTag::parse(tag.as_str()) {
        Ok(_) => Ok(tag.to_ascii_lowercase()),
        Err(error) => Err(RdfXmlError::invalid_language_tag(tag, error)),
    }
}

fn is_nc_name(name: &str) -> bool {
    // Name - (Char* ':' Char*)
    is_name(name) && name.chars().all(|c| c != ':')
}

fn is_name(name: &str) -> bool {
    // NameStartChar (NameChar)*
    let mut c = name.chars();
    match c.next() {
        Some(c) if is_name_start_char(c) => (),
        _ => return false,
    };
    c.all(is_name_char)
}

fn is_name_start_char(c: char) -> bool {
    // ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    // NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
    is_name_start_char(c)
        || matches!(c, '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}
