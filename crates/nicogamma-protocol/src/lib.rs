//! Comment-thread replay protocol.
//!
//! A request flows through three stages:
//!
//! 1. [`parse_request`] turns the raw `<thread .../>` body into a [`ThreadRequest`].
//! 2. [`ReplayEngine`] loads the recorded thread and decides what to emit.
//! 3. [`serialize_packet`] renders the emissions as a `<packet>` document.

pub mod clock;
pub mod error;
pub mod packet;
pub mod replay;
pub mod request;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ProtocolError, Result};
pub use packet::{escape_attribute, escape_text, serialize_packet, EscapeMode};
pub use replay::{select_emissions, Emission, Replay, ReplayEngine};
pub use request::parse_request;

pub use nicogamma_types::{ThreadEvent, ThreadRequest};
