//! The Colibri2 `transport` extension element.
//!
//! ## XML Format
//!
//! ```xml
//! <transport xmlns='jitsi:colibri2'
//!            id='second-transport'
//!            ice-controlling='true'
//!            use-unique-port='true'/>
//! ```
//!
//! All attributes are optional. A transport that omits `id` is identified
//! by the fixed default id [`Transport::ID_DEFAULT`] when the owning
//! endpoint checks id uniqueness; the parsed value itself keeps `id`
//! unset, faithful to what was on the wire.

use tracing::debug;

use crate::cursor::{Cursor, StartTag};
use crate::error::ParseError;

/// Local name of the transport element.
pub const ELEMENT: &str = "transport";

/// One network transport offered by an endpoint.
///
/// Immutable once constructed; owned by its [`Endpoint`](crate::Endpoint).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transport {
    /// The `id` attribute, exactly as present on the wire
    pub id: Option<String>,
    /// The `ice-controlling` attribute
    pub ice_controlling: Option<bool>,
    /// The `use-unique-port` attribute
    pub use_unique_port: Option<bool>,
}

impl Transport {
    /// The id a transport is known by when its `id` attribute is absent.
    pub const ID_DEFAULT: &'static str = "default";

    /// The id this transport is known by: `id` if present, else
    /// [`Transport::ID_DEFAULT`].
    pub fn effective_id(&self) -> &str {
        self.id.as_deref().unwrap_or(Self::ID_DEFAULT)
    }
}

/// Parser for `<transport>` elements.
///
/// Stateless; one instance can serve any number of parses.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportParser;

impl TransportParser {
    /// Parse one transport element.
    ///
    /// `start` is the element's start tag; `cursor` is positioned
    /// immediately after it. On success the cursor is left immediately
    /// after the matching end tag. Children are traversed and discarded;
    /// this protocol version defines none with meaning here.
    pub fn parse(&self, start: &StartTag, cursor: &mut Cursor<'_>) -> Result<Transport, ParseError> {
        let id = start.attr("id").map(str::to_owned);
        let ice_controlling = parse_bool_attr(start, "ice-controlling")?;
        let use_unique_port = parse_bool_attr(start, "use-unique-port")?;

        cursor.skip_subtree(ELEMENT)?;

        let transport = Transport {
            id,
            ice_controlling,
            use_unique_port,
        };
        debug!(id = transport.effective_id(), "parsed transport element");
        Ok(transport)
    }
}

/// Read an optional boolean attribute.
///
/// Accepts the XML-Schema boolean literals `true`, `false`, `1` and `0`;
/// any other present value is a [`ParseError::MalformedAttribute`].
fn parse_bool_attr(start: &StartTag, attribute: &'static str) -> Result<Option<bool>, ParseError> {
    match start.attr(attribute) {
        None => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(ParseError::MalformedAttribute {
            element: ELEMENT,
            attribute,
            value: other.to_string(),
        }),
    }
}
