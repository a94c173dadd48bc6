//! The Colibri2 `endpoint` extension element.
//!
//! ## XML Format
//!
//! ```xml
//! <endpoint xmlns='jitsi:colibri2' id='bd9b6765' stats-id='Jayme-Clv'>
//!   <transport ice-controlling='true'/>
//!   <transport id='second-transport' use-unique-port='true'/>
//! </endpoint>
//! ```
//!
//! Beyond what the grammar expresses, an endpoint enforces that no two of
//! its transports share an effective id (the `id` attribute, or
//! [`Transport::ID_DEFAULT`] when absent). A transport that spells out
//! `id='default'` therefore collides with one that omitted the attribute.

use std::collections::HashSet;

use tracing::debug;

use crate::cursor::{Cursor, StartTag, Token};
use crate::error::ParseError;
use crate::ns;
use crate::transport::{self, Transport, TransportParser};

/// Local name of the endpoint element.
pub const ELEMENT: &str = "endpoint";

/// One conference participant's description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    /// The `id` attribute; opaque identifier, expected present in practice
    pub id: Option<String>,
    /// The `stats-id` attribute; opaque diagnostic label
    pub stats_id: Option<String>,
    /// Transports in document order, owned exclusively by this endpoint
    pub transports: Vec<Transport>,
}

/// Parser for `<endpoint>` elements.
///
/// Stateless; one instance can serve any number of parses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointParser;

impl EndpointParser {
    /// Parse one endpoint element.
    ///
    /// `start` is the element's start tag; `cursor` is positioned
    /// immediately after it. On success the cursor is left immediately
    /// after the matching end tag, never before it and never past a
    /// sibling, so the enclosing parser can resume.
    ///
    /// All-or-nothing: any failure, including a duplicate transport id
    /// detected after the children were read, returns an error and no
    /// partial endpoint.
    pub fn parse(&self, start: &StartTag, cursor: &mut Cursor<'_>) -> Result<Endpoint, ParseError> {
        let id = start.attr("id").map(str::to_owned);
        let stats_id = start.attr("stats-id").map(str::to_owned);
        let mut transports = Vec::new();

        loop {
            match cursor.advance()? {
                Token::Start(child) if child.is(ns::COLIBRI2, transport::ELEMENT) => {
                    transports.push(TransportParser.parse(&child, cursor)?);
                }
                // Unknown children are a protocol-version mismatch, not
                // something to skip silently.
                Token::Start(child) => {
                    return Err(ParseError::unexpected_element(child.namespace, child.local));
                }
                // Delegation consumes whole subtrees, so the only end tag
                // reachable at this depth is our own.
                Token::End(_) => break,
                Token::Eof => return Err(ParseError::truncated(ELEMENT)),
            }
        }

        check_unique_effective_ids(&transports)?;

        debug!(
            id = id.as_deref().unwrap_or(""),
            transport_count = transports.len(),
            "parsed endpoint element"
        );
        Ok(Endpoint {
            id,
            stats_id,
            transports,
        })
    }
}

/// Reject transport sets where two entries share an effective id.
///
/// Scans in document order, so the first offending transport is the one
/// reported.
fn check_unique_effective_ids(transports: &[Transport]) -> Result<(), ParseError> {
    let mut seen = HashSet::new();
    for transport in transports {
        let id = transport.effective_id();
        if !seen.insert(id) {
            return Err(ParseError::DuplicateIdentifier { id: id.to_string() });
        }
    }
    Ok(())
}
