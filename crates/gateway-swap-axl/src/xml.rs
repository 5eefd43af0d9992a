// crates/gateway-swap-axl/src/xml.rs
// ============================================================================
// Module: XML Element Tree
// Description: Minimal namespace-stripped element tree over quick-xml events.
// Purpose: Give response decoders random access to SOAP reply content.
// Dependencies: quick-xml, thiserror
// ============================================================================

//! ## Overview
//! AXL replies are small, deeply nested documents whose element names are
//! stable while their namespace prefixes are not. [`XmlElement::parse`] reads
//! a reply into a tree keyed by local name, keeping attributes and the
//! concatenated text of each element as sent. Callers trim the fields that
//! are identifiers or numbers. Mixed content is not preserved.
//!
//! Security posture: input is untrusted; nesting depth is bounded by
//! [`MAX_DEPTH`] and DTDs are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use quick_xml::Reader;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum element nesting accepted by [`XmlElement::parse`].
pub const MAX_DEPTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// XML tree errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// The document is not well-formed.
    #[error("malformed xml: {0}")]
    Malformed(String),
    /// The document nests deeper than [`MAX_DEPTH`].
    #[error("xml nesting exceeds {0} levels")]
    TooDeep(usize),
    /// The document has no root element.
    #[error("xml document has no root element")]
    Empty,
    /// A request envelope could not be written.
    #[error("xml write failed: {0}")]
    Write(String),
}

// ============================================================================
// SECTION: Element Tree
// ============================================================================

/// One element of a parsed document.
///
/// # Invariants
/// - `name` and attribute keys are local names (namespace prefix removed).
/// - `text` is the unescaped text directly under this element, unmodified.
/// - Whitespace-only text of an element with children (indentation) is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Local element name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Direct text content.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parses a document and returns its root element.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] when the document is malformed, too deep, or empty.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Self> = Vec::new();
        let mut root: Option<Self> = None;
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref start)) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(XmlError::TooDeep(MAX_DEPTH));
                    }
                    stack.push(Self::open(start)?);
                }
                Ok(Event::Empty(ref start)) => {
                    let element = Self::open(start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| XmlError::Malformed("unbalanced end tag".to_string()))?;
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref text)) => {
                    let value =
                        text.unescape().map_err(|err| XmlError::Malformed(err.to_string()))?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&value);
                    }
                }
                Ok(Event::CData(ref data)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(data));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(XmlError::Malformed(err.to_string())),
            }
        }
        if !stack.is_empty() {
            return Err(XmlError::Malformed("unclosed element".to_string()));
        }
        root.ok_or(XmlError::Empty)
    }

    /// Builds an element from a start tag.
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|err| XmlError::Malformed(err.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|err| XmlError::Malformed(err.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Returns the first child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns every child named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Follows a chain of child names.
    #[must_use]
    pub fn path(&self, names: &[&str]) -> Option<&Self> {
        names.iter().try_fold(self, |element, name| element.child(name))
    }

    /// Returns the first element named `name` at any depth, depth-first.
    #[must_use]
    pub fn descendant(&self, name: &str) -> Option<&Self> {
        self.children
            .iter()
            .find_map(|child| if child.name == name { Some(child) } else { child.descendant(name) })
    }

    /// Returns the value of attribute `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Returns the text of child `name`, or `None` when absent or empty.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str()).filter(|text| !text.is_empty())
    }

    /// Returns the first attribute value in the tree, depth-first, that satisfies `predicate`.
    #[must_use]
    pub fn find_attribute_value(&self, predicate: &impl Fn(&str) -> bool) -> Option<&str> {
        self.attributes
            .iter()
            .map(|(_, value)| value.as_str())
            .find(|value| predicate(value))
            .or_else(|| self.children.iter().find_map(|child| child.find_attribute_value(predicate)))
    }
}

/// Attaches a closed element to its parent, or makes it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Malformed("multiple root elements".to_string()));
    }
    *root = Some(element);
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
