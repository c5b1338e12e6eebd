//! A streaming [RDF XML](https://www.w3.org/TR/rdf-syntax-grammar/) parser driver.
//!
//! It reduces the striped syntax of RDF/XML (node elements, property elements and property attributes)
//! to [`Statement`](../rdfprint_api/model/struct.Statement.html)s and hands them to a statement consumer.
//!
//! How to print the statements of a file `foo.rdf` while it is parsed:
//! ```no_run
//! use rdfprint_api::parser::StatementParser;
//! use rdfprint_api::store::Model;
//! use rdfprint_api::streaming::StreamingConsumer;
//! use rdfprint_xml::RdfXmlParser;
//! use std::fs::File;
//! use std::io::{stdout, BufReader};
//!
//! let mut model = Model::new();
//! let mut consumer = StreamingConsumer::new(&mut model, stdout());
//! RdfXmlParser::new(BufReader::new(File::open("foo.rdf")?), "file:///foo.rdf")?
//!     .parse_into(&mut consumer)?;
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]

mod error;
mod parser;

pub use error::{RdfXmlError, RdfXmlErrorKind};
pub use parser::RdfXmlParser;
