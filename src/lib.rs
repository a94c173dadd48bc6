//! # colibri2
//!
//! Parsers for the endpoint/transport subtree of the Colibri2
//! conference-control signaling extension (namespace `jitsi:colibri2`).
//!
//! Colibri2 elements ride inside a larger XMPP IQ exchange between a
//! conference focus and a videobridge. This crate covers the part of that
//! extension whose invariants the document grammar alone cannot express:
//! identifier defaulting and per-endpoint transport-id uniqueness.
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
//! ## Parsing model
//!
//! Every parser is a pure function over a forward-only [`Cursor`]: it is
//! handed its own start tag plus the cursor positioned immediately after
//! that tag, and on success it leaves the cursor immediately after its
//! matching end tag. That contract is what lets parsers nest: the endpoint
//! parser delegates each `<transport>` child to the transport parser and
//! resumes exactly where the child left off.
//!
//! Parsers hold no per-call state, so a single instance can serve any
//! number of concurrent parses of independent documents.

pub mod cursor;
pub mod endpoint;
pub mod registry;
pub mod transport;

mod error;

pub use cursor::{Cursor, EndTag, StartTag, Token};
pub use endpoint::{Endpoint, EndpointParser};
pub use error::ParseError;
pub use registry::{ElementParser, ExtensionElement, ParserRegistry};
pub use transport::{Transport, TransportParser};

/// Namespace URIs used by the Colibri2 extension.
pub mod ns {
    /// COnferencing with LIghtweight BRIdging, version 2.
    pub const COLIBRI2: &str = "jitsi:colibri2";
}
