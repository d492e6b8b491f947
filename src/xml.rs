//! Owned XML element tree for media server responses.
//!
//! The server carries all of its data in attributes, so the tree keeps
//! element names, attributes and child elements and drops text nodes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::{Serialize, Serializer};

/// Serializes as `{"tag", "attributes": {..}, "children": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XmlElement {
    #[serde(rename = "tag")]
    pub name: String,
    #[serde(serialize_with = "attributes_as_map")]
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

fn attributes_as_map<S: Serializer>(attributes: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(attributes.iter().map(|(k, v)| (k, v)))
}

impl XmlElement {
    /// Value of an attribute. Absent and empty attributes are both `None`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Attribute value, or the empty string when not present.
    pub fn attr(&self, name: &str) -> String {
        self.attr_or(name, "")
    }

    pub fn attr_or(&self, name: &str, default: &str) -> String {
        self.get_attr(name).unwrap_or(default).to_string()
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// First direct child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant with the given tag name, in document order.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }
}

/// Attribute read on an element that may itself be missing.
pub fn attr_of(element: Option<&XmlElement>, name: &str) -> String {
    element.map(|e| e.attr(name)).unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML error at byte {0}: {1}")]
    Xml(u64, String),
    #[error("empty document")]
    Empty,
    #[error("unclosed element <{0}>")]
    Unclosed(String),
    #[error("multiple root elements")]
    MultipleRoots,
}

/// Parse a complete document and return its root element.
pub fn parse_document(data: &[u8]) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from(e, position)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from(e, position)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ParseError::Xml(position, e.to_string())),
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::Unclosed(open.name));
    }
    root.ok_or(ParseError::Empty)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(ParseError::MultipleRoots);
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn element_from(e: &BytesStart, position: u64) -> Result<XmlElement, ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Xml(position, err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = String::from_utf8_lossy(attr.value.as_ref()).to_string();
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|err| ParseError::Xml(position, err.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}
