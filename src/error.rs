//! Error types for Colibri2 extension parsing.

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors raised while parsing Colibri2 extension elements.
///
/// All of these abort the current parse immediately; no partial value is
/// ever returned. Retry, if any, is a policy decision of the enclosing
/// session layer.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An attribute is present but its literal cannot be interpreted as
    /// its expected type (e.g. a non-boolean `ice-controlling` value).
    #[error("malformed '{attribute}' attribute on <{element}>: {value:?}")]
    MalformedAttribute {
        /// Local name of the element carrying the attribute
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
        /// The literal found on the wire
        value: String,
    },

    /// A child element is neither a recognized type nor skippable.
    ///
    /// Unknown children are rejected rather than skipped so that a
    /// protocol-version mismatch surfaces instead of being masked.
    #[error("unexpected <{local}> element")]
    UnexpectedElement {
        /// Resolved namespace of the element, if any
        namespace: Option<String>,
        /// Local name of the element
        local: String,
    },

    /// Two or more transports within one endpoint share an effective id.
    #[error("duplicate transport id {id:?}")]
    DuplicateIdentifier {
        /// The colliding effective id
        id: String,
    },

    /// The document ended before the expected closing tag.
    #[error("unexpected end of document while reading <{element}>")]
    TruncatedDocument {
        /// Local name of the element being read
        element: String,
    },

    /// The underlying XML reader rejected the document.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute list was syntactically invalid.
    #[error("XML attribute error: {0}")]
    Attr(#[from] AttrError),
}

impl ParseError {
    /// Create a [`ParseError::TruncatedDocument`] for the named element.
    pub fn truncated(element: impl Into<String>) -> Self {
        Self::TruncatedDocument {
            element: element.into(),
        }
    }

    /// Create a [`ParseError::UnexpectedElement`].
    pub fn unexpected_element(namespace: Option<String>, local: impl Into<String>) -> Self {
        Self::UnexpectedElement {
            namespace,
            local: local.into(),
        }
    }
}
