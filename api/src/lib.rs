//! This crate provides the statement model and the consumer protocol shared by RDF parsers,
//! with two consumers: one printing statements while they are parsed, one storing them in a [`Model`](store/struct.Model.html).
//!
//! It is currently used by the [`rdfprint_xml`](https://docs.rs/rdfprint_xml/) crate.
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
#![doc(test(attr(deny(warnings))))]

pub mod buffering;
pub mod consumer;
pub mod factory;
pub mod formatter;
pub mod model;
pub mod parser;
pub mod print;
pub mod store;
pub mod streaming;
