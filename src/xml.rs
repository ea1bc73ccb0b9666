//! XML decoding capability.
//!
//! The legacy WebService endpoints reply in XML. Converting that XML to
//! structured data is a collaborator concern: this crate defines the seam
//! and leaves the parser choice to the embedder (quick-xml, serde-xml-rs,
//! a hand-rolled mapper, whatever the application already carries).

use serde_json::Value;

use crate::error::Result;

/// Decodes a gateway XML reply into structured data.
///
/// Implementations should map element text and attributes into a
/// [`serde_json::Value`] tree; [`crate::services::WebService`] hands the
/// raw response body here verbatim.
pub trait XmlDecoder: Send + Sync {
    /// Decodes one XML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RobokassaError::MalformedResponse`] if the
    /// document cannot be parsed.
    fn decode(&self, xml: &str) -> Result<Value>;
}
