//! Serializers used by [`DocumentStore`](super::DocumentStore).
//!
//! The store only moves text between codecs and the filesystem. Any type implementing
//! [`Codec`] can be plugged in through `DocumentStore::with_codecs`.

use std::borrow::Cow;
use std::fmt;

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Boxed error returned by codecs; wrapped into `StoreError::Serialization` by the store.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Document format, reported in serialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
  Json,
  Xml,
}

impl Format {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Json => "json",
      Self::Xml => "xml",
    }
  }
}

impl fmt::Display for Format {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Converts typed values to and from document text.
pub trait Codec {
  fn format(&self) -> Format;

  fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, BoxError>;

  fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, BoxError>;
}

/// JSON via `serde_json`. Compact unless built with [`JsonCodec::pretty`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
  pretty: bool,
}

impl JsonCodec {
  pub fn pretty() -> Self {
    Self { pretty: true }
  }
}

impl Codec for JsonCodec {
  fn format(&self) -> Format {
    Format::Json
  }

  fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, BoxError> {
    let text = if self.pretty {
      serde_json::to_string_pretty(value)?
    } else {
      serde_json::to_string(value)?
    };
    Ok(text)
  }

  fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, BoxError> {
    Ok(serde_json::from_str(text)?)
  }
}

/// XML via `quick-xml`'s serde support. The root element is named after the serialized type.
///
/// The deserializer trims whitespace around text content, so leading and trailing whitespace
/// of text nodes is written as character references to survive a round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl Codec for XmlCodec {
  fn format(&self) -> Format {
    Format::Xml
  }

  fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, BoxError> {
    let xml = quick_xml::se::to_string(value)?;
    protect_edge_whitespace(&xml)
  }

  fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, BoxError> {
    Ok(quick_xml::de::from_str(text)?)
  }
}

fn protect_edge_whitespace(xml: &str) -> Result<String, BoxError> {
  let mut reader = Reader::from_str(xml);
  let mut writer = Writer::new(Vec::with_capacity(xml.len()));
  loop {
    match reader.read_event()? {
      Event::Eof => break,
      Event::Text(text) => {
        let raw = std::str::from_utf8(&text)?;
        writer.write_event(Event::Text(BytesText::from_escaped(escape_edges(raw))))?;
      }
      event => writer.write_event(event)?,
    }
  }
  Ok(String::from_utf8(writer.into_inner())?)
}

fn is_xml_whitespace(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Replace leading and trailing XML whitespace with numeric character references.
fn escape_edges(raw: &str) -> Cow<'_, str> {
  let body = raw.trim_matches(is_xml_whitespace);
  if body.len() == raw.len() {
    return Cow::Borrowed(raw);
  }

  let start = raw.len() - raw.trim_start_matches(is_xml_whitespace).len();
  let (lead, rest) = raw.split_at(start);
  let trail = &rest[body.len()..];

  let mut out = String::with_capacity(raw.len() + 8 * (lead.len() + trail.len()));
  out.extend(lead.chars().map(|c| format!("&#{};", c as u32)));
  out.push_str(body);
  out.extend(trail.chars().map(|c| format!("&#{};", c as u32)));
  Cow::Owned(out)
}
