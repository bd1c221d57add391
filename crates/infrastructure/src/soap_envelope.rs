//! SOAP 1.1 envelopes exchanged with the legacy approval system.
//!
//! Inbound documents are matched by local element name, so any namespace
//! prefix the legacy system chooses is accepted.

use apprelay_core::{AppError, AppResult};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

mod registration;
mod status_callback;
mod xml_tree;

pub use registration::{parse_registration_response, render_registration_request};
pub use status_callback::{parse_status_callback, render_status_response};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

const SOAP_PREFIX: &str = "soapenv";
const BODY_PREFIX: &str = "ns";

/// Streams one envelope whose body payload is written by `write_body`.
fn write_envelope<F>(namespace: &str, write_body: F) -> AppResult<String>
where
    F: FnOnce(&mut EnvelopeWriter) -> AppResult<()>,
{
    let mut writer = EnvelopeWriter {
        inner: Writer::new(Vec::new()),
    };

    writer.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.event(Event::Start(
        BytesStart::new(format!("{SOAP_PREFIX}:Envelope")).with_attributes([
            (format!("xmlns:{SOAP_PREFIX}").as_str(), SOAP_ENVELOPE_NS),
            (format!("xmlns:{BODY_PREFIX}").as_str(), namespace),
        ]),
    ))?;
    writer.event(Event::Empty(BytesStart::new(format!("{SOAP_PREFIX}:Header"))))?;
    writer.open(&format!("{SOAP_PREFIX}:Body"))?;
    write_body(&mut writer)?;
    writer.close(&format!("{SOAP_PREFIX}:Body"))?;
    writer.close(&format!("{SOAP_PREFIX}:Envelope"))?;

    String::from_utf8(writer.inner.into_inner())
        .map_err(|error| AppError::Internal(format!("soap envelope is not utf-8: {error}")))
}

struct EnvelopeWriter {
    inner: Writer<Vec<u8>>,
}

impl EnvelopeWriter {
    fn event(&mut self, event: Event<'_>) -> AppResult<()> {
        self.inner
            .write_event(event)
            .map_err(|error| AppError::Internal(format!("failed to write soap envelope: {error}")))
    }

    fn open(&mut self, name: &str) -> AppResult<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> AppResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// Opens a payload element qualified with the body namespace prefix.
    fn open_qualified(&mut self, local_name: &str) -> AppResult<()> {
        self.open(&format!("{BODY_PREFIX}:{local_name}"))
    }

    fn close_qualified(&mut self, local_name: &str) -> AppResult<()> {
        self.close(&format!("{BODY_PREFIX}:{local_name}"))
    }

    /// Writes `<name>text</name>` with the text escaped.
    fn text_element(&mut self, name: &str, text: &str) -> AppResult<()> {
        self.open(name)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }
}
