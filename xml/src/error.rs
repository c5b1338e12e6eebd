use oxilangtag::LanguageTagParseError;
use oxiri::IriParseError;
use std::error::Error;
use std::fmt;

/// Error that might be returned during parsing.
///
/// It might wrap an IO or XML error or be a grammar error.
/// Grammar errors are [recoverable](#method.is_recoverable): in robust mode the parser logs them
/// and skips the offending element instead of returning them.
#[derive(Debug)]
pub struct RdfXmlError {
    pub(crate) kind: RdfXmlErrorKind,
    pub(crate) position: Option<usize>,
}

#[derive(Debug)]
pub enum RdfXmlErrorKind {
    /// The document is not well-formed XML or could not be read.
    Xml(quick_xml::Error),
    InvalidIri {
        iri: String,
        error: IriParseError,
    },
    InvalidLanguageTag {
        tag: String,
        error: LanguageTagParseError,
    },
    /// A valid RDF/XML construct this parser does not reduce to statements.
    Unsupported(String),
    Other(String),
}

impl RdfXmlError {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::Other(message.into()),
            position: None,
        }
    }

    pub(crate) fn unsupported(construct: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::Unsupported(construct.into()),
            position: None,
        }
    }

    pub(crate) fn invalid_iri(iri: impl Into<String>, error: IriParseError) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidIri {
                iri: iri.into(),
                error,
            },
            position: None,
        }
    }

    pub(crate) fn invalid_language_tag(tag: String, error: LanguageTagParseError) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidLanguageTag { tag, error },
            position: None,
        }
    }

    /// Sets the byte position if none is known yet.
    pub(crate) fn at(mut self, position: usize) -> Self {
        self.position.get_or_insert(position);
        self
    }

    pub fn kind(&self) -> &RdfXmlErrorKind {
        &self.kind
    }

    /// The byte offset in the document where the error has been detected.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Returns `false` for the errors after which the document can not be read any further.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind, RdfXmlErrorKind::Xml(_))
    }
}

impl fmt::Display for RdfXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RdfXmlErrorKind::Xml(error) => write!(f, "{}", error),
            RdfXmlErrorKind::InvalidIri { iri, error } => {
                write!(f, "The IRI {} is invalid: {}", iri, error)
            }
            RdfXmlErrorKind::InvalidLanguageTag { tag, error } => {
                write!(f, "The language tag {} is invalid: {}", tag, error)
            }
            RdfXmlErrorKind::Unsupported(construct) => {
                write!(f, "{} is not supported", construct)
            }
            RdfXmlErrorKind::Other(message) => write!(f, "{}", message),
        }
        .and_then(|()| match self.position {
            Some(position) => write!(f, " at byte {}", position),
            None => Ok(()),
        })
    }
}

impl Error for RdfXmlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RdfXmlErrorKind::Xml(quick_xml::Error::Io(error)) => Some(error),
            RdfXmlErrorKind::Xml(quick_xml::Error::Utf8(error)) => Some(error),
            RdfXmlErrorKind::InvalidIri { error, .. } => Some(error),
            RdfXmlErrorKind::InvalidLanguageTag { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for RdfXmlError {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            kind: RdfXmlErrorKind::Xml(error),
            position: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_with_position() {
        let error = RdfXmlError::unsupported("rdf:parseType").at(42).at(50);
        assert_eq!("rdf:parseType is not supported at byte 42", error.to_string());
        assert_eq!(Some(42), error.position());
        assert!(error.is_recoverable());
    }

    #[test]
    fn xml_errors_are_fatal() {
        let error = RdfXmlError::from(quick_xml::Error::UnexpectedEof("Comment".to_owned()));
        assert!(!error.is_recoverable());
        assert!(error.source().is_none());
    }

    #[test]
    fn iri_errors_have_a_source() {
        let error = match oxiri::Iri::parse("foo") {
            Ok(_) => panic!("foo is a relative IRI"),
            Err(error) => RdfXmlError::invalid_iri("foo", error),
        };
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("The IRI foo is invalid"));
    }
}
