//! Request body values and their serialization per content type.
//!
//! # Design
//! The body is a tagged union chosen by the caller rather than an untyped
//! value inspected at send time. `ContentType` then decides how the chosen
//! variant is rendered; every variant has a defined rendering under every
//! content type, so serialization only fails on encoder errors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assemble::form_encode;
use crate::error::ConfigurationError;
use crate::params::Params;

/// Body serialization selector, numbered by its historical code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Undefined,
    Json,
    Text,
    Xml,
}

impl ContentType {
    pub fn code(self) -> i32 {
        match self {
            ContentType::Undefined => 0,
            ContentType::Json => 1,
            ContentType::Text => 2,
            ContentType::Xml => 3,
        }
    }

    /// MIME type sent when the caller did not set a `Content-Type` header.
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Undefined => "application/x-www-form-urlencoded",
            ContentType::Json => "application/json",
            ContentType::Text => "text/plain",
            ContentType::Xml => "application/xml",
        }
    }
}

impl TryFrom<i32> for ContentType {
    type Error = ConfigurationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ContentType::Undefined),
            1 => Ok(ContentType::Json),
            2 => Ok(ContentType::Text),
            3 => Ok(ContentType::Xml),
            other => Err(ConfigurationError::UnsupportedContentType(other)),
        }
    }
}

/// A structured XML document that knows its own text form.
pub trait XmlDocument: fmt::Debug + Send + Sync {
    fn to_xml(&self) -> String;
}

/// XML payload: either a document object or already rendered text.
#[derive(Debug, Clone)]
pub enum XmlBody {
    Document(Arc<dyn XmlDocument>),
    Raw(String),
}

impl XmlBody {
    pub fn document(document: impl XmlDocument + 'static) -> Self {
        XmlBody::Document(Arc::new(document))
    }

    pub fn to_xml_string(&self) -> String {
        match self {
            XmlBody::Document(document) => document.to_xml(),
            XmlBody::Raw(text) => text.clone(),
        }
    }
}

/// The body of a request.
#[derive(Debug, Clone)]
pub enum PostData {
    /// Named fields, built up with `Request::add_post_field`.
    Fields(Params),
    Json(serde_json::Value),
    Text(String),
    Xml(XmlBody),
}

impl PostData {
    /// Empty bodies are not sent at all.
    pub fn is_empty(&self) -> bool {
        match self {
            PostData::Fields(fields) => fields.is_empty(),
            PostData::Json(value) => match value {
                serde_json::Value::Null => true,
                serde_json::Value::String(s) => s.is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::Object(map) => map.is_empty(),
                _ => false,
            },
            PostData::Text(text) => text.is_empty(),
            PostData::Xml(XmlBody::Raw(text)) => text.is_empty(),
            PostData::Xml(XmlBody::Document(_)) => false,
        }
    }

    pub fn fields(&self) -> Option<&Params> {
        match self {
            PostData::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// String form of the body, used by the text-like content types.
    fn to_text(&self) -> Result<String, ConfigurationError> {
        match self {
            PostData::Fields(fields) => form_encode(fields),
            PostData::Json(value) => serde_json::to_string(value)
                .map_err(|e| ConfigurationError::Serialization(e.to_string())),
            PostData::Text(text) => Ok(text.clone()),
            PostData::Xml(xml) => Ok(xml.to_xml_string()),
        }
    }

    fn to_json(&self) -> Result<String, ConfigurationError> {
        let value = match self {
            PostData::Fields(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.to_string(), serde_json::Value::String(value.to_string())))
                    .collect(),
            ),
            PostData::Json(value) => value.clone(),
            PostData::Text(text) => serde_json::Value::String(text.clone()),
            PostData::Xml(xml) => serde_json::Value::String(xml.to_xml_string()),
        };
        serde_json::to_string(&value).map_err(|e| ConfigurationError::Serialization(e.to_string()))
    }
}

impl From<Params> for PostData {
    fn from(fields: Params) -> Self {
        PostData::Fields(fields)
    }
}

impl From<serde_json::Value> for PostData {
    fn from(value: serde_json::Value) -> Self {
        PostData::Json(value)
    }
}

impl From<String> for PostData {
    fn from(text: String) -> Self {
        PostData::Text(text)
    }
}

impl From<&str> for PostData {
    fn from(text: &str) -> Self {
        PostData::Text(text.to_string())
    }
}

impl From<XmlBody> for PostData {
    fn from(xml: XmlBody) -> Self {
        PostData::Xml(xml)
    }
}

/// Render `data` as the wire body for `content_type`.
pub fn encode_body(content_type: ContentType, data: &PostData) -> Result<String, ConfigurationError> {
    match content_type {
        ContentType::Json => data.to_json(),
        ContentType::Undefined | ContentType::Text | ContentType::Xml => data.to_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Note {
        to: String,
    }

    impl XmlDocument for Note {
        fn to_xml(&self) -> String {
            format!("<?xml version=\"1.0\"?>\n<note><to>{}</to></note>\n", self.to)
        }
    }

    fn fields() -> PostData {
        PostData::Fields([("field1", "value 1"), ("field2", "a&b")].into_iter().collect())
    }

    #[test]
    fn undefined_encodes_fields_as_form() {
        let body = encode_body(ContentType::Undefined, &fields()).unwrap();
        assert_eq!(body, "field1=value+1&field2=a%26b");
    }

    #[test]
    fn json_encodes_fields_as_object() {
        let body = encode_body(ContentType::Json, &fields()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["field1"], "value 1");
        assert_eq!(value["field2"], "a&b");
    }

    #[test]
    fn json_encodes_value_as_is() {
        let data = PostData::Json(serde_json::json!({"list": [1, 2, 3], "ok": true}));
        let body = encode_body(ContentType::Json, &data).unwrap();
        assert_eq!(body, r#"{"list":[1,2,3],"ok":true}"#);
    }

    #[test]
    fn json_encodes_text_as_string() {
        let body = encode_body(ContentType::Json, &PostData::from("hi")).unwrap();
        assert_eq!(body, r#""hi""#);
    }

    #[test]
    fn text_is_sent_unmodified() {
        let data = PostData::from("raw body & stuff");
        assert_eq!(encode_body(ContentType::Text, &data).unwrap(), "raw body & stuff");
    }

    #[test]
    fn xml_document_is_serialized() {
        let data = PostData::Xml(XmlBody::document(Note { to: "Tove".to_string() }));
        let body = encode_body(ContentType::Xml, &data).unwrap();
        assert!(body.contains("<note><to>Tove</to></note>"));
    }

    #[test]
    fn xml_raw_text_is_used_verbatim() {
        let data = PostData::Xml(XmlBody::Raw("<a/>".to_string()));
        assert_eq!(encode_body(ContentType::Xml, &data).unwrap(), "<a/>");
    }

    #[test]
    fn xml_content_type_with_text_body() {
        let data = PostData::from("<b/>");
        assert_eq!(encode_body(ContentType::Xml, &data).unwrap(), "<b/>");
    }

    #[test]
    fn content_type_codes() {
        assert_eq!(ContentType::try_from(1).unwrap(), ContentType::Json);
        assert_eq!(ContentType::Xml.code(), 3);
        assert_eq!(
            ContentType::try_from(9).unwrap_err(),
            ConfigurationError::UnsupportedContentType(9)
        );
    }

    #[test]
    fn emptiness() {
        assert!(PostData::Fields(Params::new()).is_empty());
        assert!(PostData::Json(serde_json::Value::Null).is_empty());
        assert!(PostData::from("").is_empty());
        assert!(!PostData::Json(serde_json::json!(0)).is_empty());
        assert!(!PostData::Xml(XmlBody::document(Note { to: String::new() })).is_empty());
    }
}
