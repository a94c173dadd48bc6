//! Dispatch from qualified element names to element parsers.
//!
//! The enclosing protocol stack resolves extension elements by
//! `(namespace, local name)`. This module provides that seam: an
//! [`ElementParser`] trait with one implementation per element type, and a
//! [`ParserRegistry`] holding the mapping. The registry is passed
//! explicitly by whoever composes parsers; there is no global dispatch
//! table.

use std::collections::HashMap;

use crate::cursor::{Cursor, StartTag, Token};
use crate::endpoint::{self, Endpoint, EndpointParser};
use crate::error::ParseError;
use crate::ns;
use crate::transport::{self, Transport, TransportParser};

/// A parsed Colibri2 extension element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionElement {
    /// An `<endpoint>` element
    Endpoint(Endpoint),
    /// A `<transport>` element
    Transport(Transport),
}

/// A parser for one extension element type.
///
/// Contract: `start` is the element's start tag and `cursor` is positioned
/// immediately after it; on success the cursor is left immediately after
/// the matching end tag. Implementations are stateless and shareable
/// across concurrent parses of independent documents.
pub trait ElementParser: Send + Sync {
    /// Parse one element of this parser's type.
    fn parse(
        &self,
        start: &StartTag,
        cursor: &mut Cursor<'_>,
    ) -> Result<ExtensionElement, ParseError>;
}

impl ElementParser for EndpointParser {
    fn parse(
        &self,
        start: &StartTag,
        cursor: &mut Cursor<'_>,
    ) -> Result<ExtensionElement, ParseError> {
        EndpointParser::parse(self, start, cursor).map(ExtensionElement::Endpoint)
    }
}

impl ElementParser for TransportParser {
    fn parse(
        &self,
        start: &StartTag,
        cursor: &mut Cursor<'_>,
    ) -> Result<ExtensionElement, ParseError> {
        TransportParser::parse(self, start, cursor).map(ExtensionElement::Transport)
    }
}

/// Maps `(namespace, local name)` to the parser for that element type.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<(String, String), Box<dyn ElementParser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// A registry with the Colibri2 endpoint and transport parsers
    /// registered.
    pub fn colibri2() -> Self {
        let mut registry = Self::new();
        registry.register(ns::COLIBRI2, endpoint::ELEMENT, Box::new(EndpointParser));
        registry.register(ns::COLIBRI2, transport::ELEMENT, Box::new(TransportParser));
        registry
    }

    /// Register a parser for `(namespace, local)`, replacing any previous
    /// registration.
    pub fn register(&mut self, namespace: &str, local: &str, parser: Box<dyn ElementParser>) {
        self.parsers
            .insert((namespace.to_string(), local.to_string()), parser);
    }

    /// Look up the parser registered for `(namespace, local)`.
    pub fn get(&self, namespace: &str, local: &str) -> Option<&dyn ElementParser> {
        self.parsers
            .get(&(namespace.to_string(), local.to_string()))
            .map(Box::as_ref)
    }

    /// Parse the next element in the document by registry dispatch.
    ///
    /// Advances the cursor to the next start tag, resolves its parser and
    /// delegates to it. An element with no registered parser is an
    /// [`ParseError::UnexpectedElement`].
    pub fn parse(&self, cursor: &mut Cursor<'_>) -> Result<ExtensionElement, ParseError> {
        match cursor.advance()? {
            Token::Start(start) => {
                let namespace = start.namespace.clone().unwrap_or_default();
                match self.get(&namespace, &start.local) {
                    Some(parser) => parser.parse(&start, cursor),
                    None => Err(ParseError::unexpected_element(start.namespace, start.local)),
                }
            }
            Token::End(end) => Err(ParseError::unexpected_element(end.namespace, end.local)),
            Token::Eof => Err(ParseError::truncated("extension element")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_dispatches_endpoint() {
        let registry = ParserRegistry::colibri2();
        let mut cursor = Cursor::new(
            "<endpoint xmlns='jitsi:colibri2' id='e1'><transport id='t1'/></endpoint>",
        );

        match registry.parse(&mut cursor).unwrap() {
            ExtensionElement::Endpoint(endpoint) => {
                assert_eq!(endpoint.id.as_deref(), Some("e1"));
                assert_eq!(endpoint.transports.len(), 1);
            }
            other => panic!("Expected endpoint, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_dispatches_transport() {
        let registry = ParserRegistry::colibri2();
        let mut cursor = Cursor::new("<transport xmlns='jitsi:colibri2' ice-controlling='true'/>");

        match registry.parse(&mut cursor).unwrap() {
            ExtensionElement::Transport(transport) => {
                assert_eq!(transport.ice_controlling, Some(true));
            }
            other => panic!("Expected transport, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_rejects_unregistered_element() {
        let registry = ParserRegistry::colibri2();
        let mut cursor = Cursor::new("<conference-modify xmlns='jitsi:colibri2'/>");

        let err = registry.parse(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedElement { ref local, .. } if local == "conference-modify"
        ));
    }

    #[test]
    fn test_registry_rejects_known_name_in_wrong_namespace() {
        let registry = ParserRegistry::colibri2();
        let mut cursor = Cursor::new("<endpoint xmlns='urn:other'/>");

        assert!(matches!(
            registry.parse(&mut cursor).unwrap_err(),
            ParseError::UnexpectedElement { .. }
        ));
    }

    #[test]
    fn test_registry_rejects_empty_document() {
        let registry = ParserRegistry::colibri2();
        let mut cursor = Cursor::new("");

        assert!(matches!(
            registry.parse(&mut cursor).unwrap_err(),
            ParseError::TruncatedDocument { .. }
        ));
    }

    #[test]
    fn test_manual_registration() {
        let mut registry = ParserRegistry::new();
        assert!(registry.get(ns::COLIBRI2, endpoint::ELEMENT).is_none());

        registry.register(ns::COLIBRI2, endpoint::ELEMENT, Box::new(EndpointParser));
        assert!(registry.get(ns::COLIBRI2, endpoint::ELEMENT).is_some());
        assert!(registry.get(ns::COLIBRI2, transport::ELEMENT).is_none());
    }
}
