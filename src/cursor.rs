//! Forward-only streaming cursor over an XML token stream.
//!
//! Colibri2 parsers consume a positioned cursor rather than a materialized
//! tree: each parser reads forward from its own start tag to its matching
//! end tag and no further, so an enclosing parser can resume at the next
//! sibling. The cursor wraps quick-xml's namespace-aware pull reader and
//! exposes only what the parsers need: the next significant token, its
//! resolved namespace and local name, and its attributes.
//!
//! Self-closing elements are expanded into start/end pairs, so every
//! element has a matching [`Token::End`] and sub-parsers never need a
//! special case for `<transport/>` versus `<transport></transport>`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::ParseError;

/// A start tag with its resolved namespace, local name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Resolved namespace URI, if the element is in one
    pub namespace: Option<String>,
    /// Local element name (prefix stripped)
    pub local: String,
    attributes: Vec<(String, String)>,
}

impl StartTag {
    fn from_event(namespace: Option<String>, event: &BytesStart<'_>) -> Result<Self, ParseError> {
        let local = decode(event.local_name().as_ref());
        let mut attributes = Vec::new();
        for attribute in event.attributes() {
            let attribute = attribute?;
            let key = decode(attribute.key.as_ref());
            // Namespace declarations are consumed by the reader's resolver,
            // not surfaced as ordinary attributes.
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            namespace,
            local,
            attributes,
        })
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether this tag has the given namespace and local name.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

/// An end tag with its resolved namespace and local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndTag {
    /// Resolved namespace URI, if the element is in one
    pub namespace: Option<String>,
    /// Local element name (prefix stripped)
    pub local: String,
}

/// A significant token in the stream.
///
/// Text, CDATA, comments, processing instructions and the XML declaration
/// are skipped by [`Cursor::advance`]; only element boundaries matter to
/// the Colibri2 grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An element start tag
    Start(StartTag),
    /// An element end tag
    End(EndTag),
    /// End of input
    Eof,
}

/// Forward-only cursor over one XML document.
///
/// The cursor is owned exclusively by the calling context for the duration
/// of a parse; the parsers themselves hold no state.
pub struct Cursor<'a> {
    reader: NsReader<&'a [u8]>,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the beginning of `document`.
    pub fn new(document: &'a str) -> Self {
        let mut reader = NsReader::from_str(document);
        reader.config_mut().expand_empty_elements = true;
        Self { reader }
    }

    /// Advance to the next element boundary or end of input.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        loop {
            match self.reader.read_resolved_event()? {
                (resolve, Event::Start(start)) => {
                    let namespace = resolved_namespace(resolve);
                    return Ok(Token::Start(StartTag::from_event(namespace, &start)?));
                }
                (resolve, Event::End(end)) => {
                    return Ok(Token::End(EndTag {
                        namespace: resolved_namespace(resolve),
                        local: decode(end.local_name().as_ref()),
                    }));
                }
                (_, Event::Eof) => return Ok(Token::Eof),
                _ => {}
            }
        }
    }

    /// Advance to the next element start tag and require it to be
    /// `(namespace, local)`.
    ///
    /// Used by callers to position the cursor at the root of the subtree
    /// they are about to hand to a parser.
    pub fn expect_start(&mut self, namespace: &str, local: &str) -> Result<StartTag, ParseError> {
        match self.advance()? {
            Token::Start(start) if start.is(namespace, local) => Ok(start),
            Token::Start(start) => Err(ParseError::unexpected_element(start.namespace, start.local)),
            Token::End(end) => Err(ParseError::unexpected_element(end.namespace, end.local)),
            Token::Eof => Err(ParseError::truncated(local)),
        }
    }

    /// Consume the remainder of the current element.
    ///
    /// The cursor must be positioned immediately after a start tag; on
    /// return it is positioned immediately after the matching end tag,
    /// with any nested children traversed and discarded. `element` names
    /// the element being skipped, for error reporting only.
    pub fn skip_subtree(&mut self, element: &str) -> Result<(), ParseError> {
        let mut depth = 1usize;
        loop {
            match self.advance()? {
                Token::Start(_) => depth += 1,
                Token::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Token::Eof => return Err(ParseError::truncated(element)),
            }
        }
    }
}

fn resolved_namespace(resolve: ResolveResult<'_>) -> Option<String> {
    match resolve {
        ResolveResult::Bound(Namespace(ns)) => Some(decode(ns)),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

fn decode(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
