//! Namespace-aware XML element tree and field-extraction helpers.
//!
//! DATEX II entities decode themselves field by field from an element tree
//! rather than from a serde binding: the schema relies on `xsi:type`
//! dispatch for abstract classes and on opaque extension elements that must
//! round-trip verbatim, neither of which fits derive-based decoding.
//!
//! [`XmlElement`] is the tree: expanded-name elements, attributes and text
//! children, built from a document string by [`XmlElement::parse_document`]
//! and written back by [`XmlElement::to_xml_string`]. [`ElementReader`]
//! wraps one element during entity decoding and turns absent or malformed
//! fields into the crate's field-level errors, naming the schema class and
//! field that failed. Decoders extract fields in schema order with `?`, so
//! the first failing field aborts the parse.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use quick_xml::writer::Writer;
use serde::{Deserialize, Serialize};

use crate::error::{DatexError, Result};

/// Namespace URI of the DATEX II v3 `Common` schema.
pub const NS_COMMON: &str = "http://datex2.eu/schema/3/common";
/// Namespace URI of the DATEX II v3 `Facilities` schema.
pub const NS_FACILITIES: &str = "http://datex2.eu/schema/3/facilities";
/// Namespace URI of the DATEX II v3 `EnergyInfrastructure` schema.
pub const NS_ENERGY: &str = "http://datex2.eu/schema/3/energyInfrastructure";
/// Namespace URI of the DATEX II v3 `LocationReferencing` schema.
pub const NS_LOCATION: &str = "http://datex2.eu/schema/3/locationReferencing";
/// Namespace URI of XML Schema instance attributes (`xsi:type`).
pub const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

fn canonical_prefix(uri: &str) -> Option<&'static str> {
    match uri {
        NS_COMMON => Some("com"),
        NS_FACILITIES => Some("fac"),
        NS_ENERGY => Some("egi"),
        NS_LOCATION => Some("loc"),
        NS_XSI => Some("xsi"),
        _ => None,
    }
}

/// Local part of a prefixed discriminator value such as
/// `"egi:ElectricChargingPointStatus"`.
pub fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

// ---------------------------------------------------------------------------
// XmlName
// ---------------------------------------------------------------------------

/// Expanded name of an element or attribute: namespace URI plus local part.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct XmlName {
    /// Namespace URI, `None` for unqualified names.
    pub namespace: Option<String>,
    /// Local part of the name.
    pub local: String,
}

impl XmlName {
    /// Create a namespace-qualified name.
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            local: local.to_string(),
        }
    }

    /// Create an unqualified name.
    pub fn unqualified(local: &str) -> Self {
        Self {
            namespace: None,
            local: local.to_string(),
        }
    }

    fn matches(&self, namespace: &str, local: &str) -> bool {
        if self.local != local {
            return false;
        }
        // An unqualified name matches any requested namespace: schema
        // fragments are often written without xmlns declarations, and the
        // element vocabularies of the DATEX II sub-schemas do not collide.
        match self.namespace.as_deref() {
            Some(bound) => bound == namespace,
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// XmlElement
// ---------------------------------------------------------------------------

/// One attribute of an [`XmlElement`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Expanded attribute name.
    pub name: XmlName,
    /// Attribute value, entity references already resolved.
    pub value: String,
}

/// One child node of an [`XmlElement`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// A nested element.
    Element(XmlElement),
    /// Character data. Whitespace-only nodes are dropped while reading.
    Text(String),
}

/// A namespace-qualified XML element with attributes and child nodes.
///
/// Attribute and child order is preserved, so a tree written by
/// [`to_xml_string`](Self::to_xml_string) and re-read by
/// [`parse_document`](Self::parse_document) compares equal to the original.
/// Extension content carried through entity decoding is held as a subtree
/// of this type and re-emitted verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Expanded element name.
    pub name: XmlName,
    /// Attributes in document order, namespace declarations excluded.
    pub attributes: Vec<XmlAttribute>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element with a namespace-qualified name.
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            name: XmlName::new(namespace, local),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding a single text node, the shape of every
    /// simple-content DATEX II field.
    pub fn text_element(namespace: &str, local: &str, text: &str) -> Self {
        Self::new(namespace, local).with_text(text)
    }

    /// Add an unqualified attribute.
    pub fn with_attribute(mut self, local: &str, value: &str) -> Self {
        self.attributes.push(XmlAttribute {
            name: XmlName::unqualified(local),
            value: value.to_string(),
        });
        self
    }

    /// Add a namespace-qualified attribute such as `xsi:type`.
    pub fn with_attribute_ns(mut self, namespace: &str, local: &str, value: &str) -> Self {
        self.attributes.push(XmlAttribute {
            name: XmlName::new(namespace, local),
            value: value.to_string(),
        });
        self
    }

    /// Add a text child.
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(XmlNode::Text(text.to_string()));
        self
    }

    /// Add an element child.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Append an element child in place.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// First child element with the given expanded name. A child parsed
    /// from an undeclared (unqualified) name matches any namespace.
    pub fn child(&self, namespace: &str, local: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|node| match node {
            XmlNode::Element(e) if e.name.matches(namespace, local) => Some(e),
            _ => None,
        })
    }

    /// Every child element with the given expanded name, in document order.
    pub fn children(&self, namespace: &str, local: &str) -> Vec<&XmlElement> {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Element(e) if e.name.matches(namespace, local) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// Value of an unqualified attribute.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace.is_none() && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Value of a namespace-qualified attribute.
    pub fn attribute_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(namespace, local))
            .map(|a| a.value.as_str())
    }

    /// Direct text content: all text children concatenated, then trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let XmlNode::Text(t) = node {
                out.push_str(t);
            }
        }
        out.trim().to_string()
    }

    // -- reading ------------------------------------------------------------

    /// Parse an XML document into the tree of its root element.
    ///
    /// Namespace prefixes are resolved to URIs; `xmlns` declarations are
    /// consumed and not kept as attributes. Whitespace-only text nodes are
    /// dropped: DATEX II is data-content XML, indentation is not content.
    /// Comments, processing instructions and the XML declaration are
    /// skipped. General entity references in element content are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DatexError::Xml`] when the input is not well-formed or
    /// uses an unsupported construct.
    pub fn parse_document(xml: &str) -> Result<XmlElement> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        // Contiguous character data arrives as alternating `Text` and
        // `GeneralRef` events; pieces accumulate here and become one text
        // node when the run ends at the next markup event.
        let mut pending_text = String::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|e| DatexError::Xml { reason: e.to_string() })?;
            match event {
                Event::Start(start) => {
                    flush_text(&mut stack, &mut pending_text);
                    let element = element_from_start(&reader, &start)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    flush_text(&mut stack, &mut pending_text);
                    let element = element_from_start(&reader, &start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    flush_text(&mut stack, &mut pending_text);
                    let element = stack.pop().ok_or_else(|| DatexError::Xml {
                        reason: "unexpected closing tag".to_string(),
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let value = text
                        .decode()
                        .map_err(|e| DatexError::Xml { reason: e.to_string() })?;
                    pending_text.push_str(&value);
                }
                Event::GeneralRef(reference) => {
                    append_reference(&mut pending_text, &reference)?;
                }
                Event::CData(cdata) => {
                    flush_text(&mut stack, &mut pending_text);
                    let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    push_text(&mut stack, &value);
                }
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {
                    flush_text(&mut stack, &mut pending_text);
                }
                Event::Eof => break,
            }
        }

        root.ok_or_else(|| DatexError::Xml {
            reason: "document contains no root element".to_string(),
        })
    }

    // -- writing ------------------------------------------------------------

    /// Serialise the tree to an XML string.
    ///
    /// Namespace declarations for every URI used in the tree are emitted
    /// once on the root element, with the canonical DATEX II prefixes
    /// (`com`, `fac`, `egi`, `loc`, `xsi`) for the known schemas and
    /// generated `ext0`, `ext1`, … prefixes for extension namespaces.
    ///
    /// # Errors
    ///
    /// Returns [`DatexError::Xml`] if the underlying writer fails.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut prefixes = PrefixMap::default();
        prefixes.collect(self);
        let mut writer = Writer::new(Vec::new());
        self.write_into(&mut writer, &prefixes, true)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| DatexError::Xml { reason: e.to_string() })
    }

    fn write_into(
        &self,
        writer: &mut Writer<Vec<u8>>,
        prefixes: &PrefixMap,
        is_root: bool,
    ) -> Result<()> {
        let tag = prefixes.qualify(&self.name);
        let mut start = BytesStart::new(tag.clone());
        if is_root {
            for (uri, prefix) in &prefixes.entries {
                start.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
            }
        }
        for attribute in &self.attributes {
            let name = prefixes.qualify(&attribute.name);
            start.push_attribute((name.as_str(), attribute.value.as_str()));
        }
        if self.children.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| DatexError::Xml { reason: e.to_string() })?;
            return Ok(());
        }
        writer
            .write_event(Event::Start(start))
            .map_err(|e| DatexError::Xml { reason: e.to_string() })?;
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_into(writer, prefixes, false)?,
                XmlNode::Text(text) => writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(|e| DatexError::Xml { reason: e.to_string() })?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(|e| DatexError::Xml { reason: e.to_string() })
    }
}

fn element_from_start(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<XmlElement> {
    let (resolution, local) = reader.resolve_element(start.name());
    let namespace = namespace_uri(&resolution)?;
    let local = String::from_utf8_lossy(local.as_ref()).into_owned();
    let mut element = XmlElement {
        name: XmlName { namespace, local },
        attributes: Vec::new(),
        children: Vec::new(),
    };
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| DatexError::Xml { reason: e.to_string() })?;
        if is_namespace_declaration(attribute.key.0) {
            continue;
        }
        let (resolution, local) = reader.resolve_attribute(attribute.key);
        let value = attribute
            .unescape_value()
            .map_err(|e| DatexError::Xml { reason: e.to_string() })?
            .into_owned();
        element.attributes.push(XmlAttribute {
            name: XmlName {
                namespace: namespace_uri(&resolution)?,
                local: String::from_utf8_lossy(local.as_ref()).into_owned(),
            },
            value,
        });
    }
    Ok(element)
}

fn namespace_uri(resolution: &ResolveResult<'_>) -> Result<Option<String>> {
    match resolution {
        ResolveResult::Bound(namespace) => {
            Ok(Some(String::from_utf8_lossy(namespace.0).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(DatexError::Xml {
            reason: format!(
                "undeclared namespace prefix \"{}\"",
                String::from_utf8_lossy(prefix)
            ),
        }),
    }
}

fn is_namespace_declaration(raw_name: &[u8]) -> bool {
    raw_name == b"xmlns" || raw_name.starts_with(b"xmlns:")
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(DatexError::Xml {
            reason: "multiple root elements".to_string(),
        }),
    }
}

fn push_text(stack: &mut [XmlElement], value: &str) {
    if value.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Text(value.to_string()));
    }
}

fn flush_text(stack: &mut [XmlElement], pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    push_text(stack, pending);
    pending.clear();
}

/// Resolve a `&...;` reference: character references and the predefined XML
/// entities are appended to the current text run, anything else — a general
/// entity defined in a DTD — is rejected.
fn append_reference(out: &mut String, reference: &BytesRef<'_>) -> Result<()> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| DatexError::Xml { reason: e.to_string() })?
    {
        out.push(ch);
        return Ok(());
    }
    let name = reference
        .decode()
        .map_err(|e| DatexError::Xml { reason: e.to_string() })?;
    match resolve_predefined_entity(&name) {
        Some(resolved) => {
            out.push_str(resolved);
            Ok(())
        }
        None => Err(DatexError::Xml {
            reason: format!("unsupported general entity reference \"&{name};\""),
        }),
    }
}

#[derive(Default)]
struct PrefixMap {
    entries: Vec<(String, String)>,
}

impl PrefixMap {
    fn collect(&mut self, element: &XmlElement) {
        if let Some(uri) = &element.name.namespace {
            self.ensure(uri);
        }
        for attribute in &element.attributes {
            if let Some(uri) = &attribute.name.namespace {
                self.ensure(uri);
            }
        }
        for child in &element.children {
            if let XmlNode::Element(e) = child {
                self.collect(e);
            }
        }
    }

    fn ensure(&mut self, uri: &str) {
        if self.entries.iter().any(|(known, _)| known == uri) {
            return;
        }
        let prefix = match canonical_prefix(uri) {
            Some(p) => p.to_string(),
            None => {
                let generated = self
                    .entries
                    .iter()
                    .filter(|(known, _)| canonical_prefix(known).is_none())
                    .count();
                format!("ext{generated}")
            }
        };
        self.entries.push((uri.to_string(), prefix));
    }

    fn qualify(&self, name: &XmlName) -> String {
        match &name.namespace {
            Some(uri) => match self.entries.iter().find(|(known, _)| known == uri) {
                Some((_, prefix)) => format!("{prefix}:{}", name.local),
                None => name.local.clone(),
            },
            None => name.local.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ElementReader
// ---------------------------------------------------------------------------

/// Field-extraction helper wrapping one element during entity decoding.
///
/// Every accessor reports failures as [`DatexError::MissingField`] or
/// [`DatexError::InvalidField`] carrying the schema class name given at
/// construction and the schema name of the offending field. Mandatory
/// accessors fail when the field is absent; optional accessors fail only
/// when the field is present but malformed.
pub struct ElementReader<'a> {
    element: &'a XmlElement,
    class: &'static str,
}

impl<'a> ElementReader<'a> {
    /// Wrap `element` for decoding into the schema class `class`.
    pub fn new(element: &'a XmlElement, class: &'static str) -> Self {
        Self { element, class }
    }

    /// The wrapped element.
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// The schema class this reader decodes into.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Mandatory child element.
    ///
    /// # Errors
    ///
    /// [`DatexError::MissingField`] when absent.
    pub fn mandatory_child(&self, namespace: &str, field: &'static str) -> Result<&'a XmlElement> {
        self.element
            .child(namespace, field)
            .ok_or(DatexError::MissingField {
                class: self.class,
                field,
            })
    }

    /// Optional child element.
    pub fn optional_child(&self, namespace: &str, field: &str) -> Option<&'a XmlElement> {
        self.element.child(namespace, field)
    }

    /// Every child element named `field`, empty when none are present.
    pub fn children(&self, namespace: &str, field: &str) -> Vec<&'a XmlElement> {
        self.element.children(namespace, field)
    }

    /// Mandatory simple-content field.
    ///
    /// # Errors
    ///
    /// [`DatexError::MissingField`] when the child is absent,
    /// [`DatexError::InvalidField`] when present but empty.
    pub fn mandatory_text(&self, namespace: &str, field: &'static str) -> Result<String> {
        let child = self.mandatory_child(namespace, field)?;
        let text = child.text();
        if text.is_empty() {
            return Err(DatexError::InvalidField {
                class: self.class,
                field,
                reason: "must not be empty".to_string(),
            });
        }
        Ok(text)
    }

    /// Optional simple-content field. Present-but-empty content is a hard
    /// failure; an absent field is `None`.
    ///
    /// # Errors
    ///
    /// [`DatexError::InvalidField`] when present but empty.
    pub fn optional_text(&self, namespace: &str, field: &'static str) -> Result<Option<String>> {
        let Some(child) = self.element.child(namespace, field) else {
            return Ok(None);
        };
        let text = child.text();
        if text.is_empty() {
            return Err(DatexError::InvalidField {
                class: self.class,
                field,
                reason: "must not be empty".to_string(),
            });
        }
        Ok(Some(text))
    }

    /// Mandatory simple-content field decoded through [`std::str::FromStr`].
    ///
    /// # Errors
    ///
    /// [`DatexError::MissingField`] when absent, [`DatexError::InvalidField`]
    /// when the content does not decode.
    pub fn mandatory_parsed<T>(&self, namespace: &str, field: &'static str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let text = self.mandatory_text(namespace, field)?;
        text.parse().map_err(|e: T::Err| DatexError::InvalidField {
            class: self.class,
            field,
            reason: e.to_string(),
        })
    }

    /// Optional simple-content field decoded through [`std::str::FromStr`].
    ///
    /// # Errors
    ///
    /// [`DatexError::InvalidField`] when present but undecodable.
    pub fn optional_parsed<T>(&self, namespace: &str, field: &'static str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(text) = self.optional_text(namespace, field)? else {
            return Ok(None);
        };
        let value = text.parse().map_err(|e: T::Err| DatexError::InvalidField {
            class: self.class,
            field,
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    /// Mandatory `xs:boolean` field; accepts the schema literals `true`,
    /// `false`, `1` and `0`.
    ///
    /// # Errors
    ///
    /// [`DatexError::MissingField`] when absent, [`DatexError::InvalidField`]
    /// on any other content.
    pub fn mandatory_boolean(&self, namespace: &str, field: &'static str) -> Result<bool> {
        let text = self.mandatory_text(namespace, field)?;
        self.decode_boolean(&text, field)
    }

    /// Optional `xs:boolean` field.
    ///
    /// # Errors
    ///
    /// [`DatexError::InvalidField`] when present but not a boolean literal.
    pub fn optional_boolean(&self, namespace: &str, field: &'static str) -> Result<Option<bool>> {
        match self.optional_text(namespace, field)? {
            Some(text) => Ok(Some(self.decode_boolean(&text, field)?)),
            None => Ok(None),
        }
    }

    fn decode_boolean(&self, text: &str, field: &'static str) -> Result<bool> {
        match text {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(DatexError::InvalidField {
                class: self.class,
                field,
                reason: format!("not an xs:boolean literal: \"{other}\""),
            }),
        }
    }

    /// Optional unqualified attribute.
    pub fn attribute(&self, field: &str) -> Option<String> {
        self.element.attribute(field).map(str::to_string)
    }

    /// Mandatory unqualified attribute.
    ///
    /// # Errors
    ///
    /// [`DatexError::MissingField`] when absent.
    pub fn mandatory_attribute(&self, field: &'static str) -> Result<String> {
        self.element
            .attribute(field)
            .map(str::to_string)
            .ok_or(DatexError::MissingField {
                class: self.class,
                field,
            })
    }

    /// The `xsi:type` discriminator attribute.
    pub fn xsi_type(&self) -> Option<&str> {
        self.element.attribute_ns(NS_XSI, "type")
    }

    /// Mandatory `xsi:type` discriminator attribute.
    ///
    /// # Errors
    ///
    /// [`DatexError::MissingField`] when absent.
    pub fn mandatory_xsi_type(&self) -> Result<&'a str> {
        self.element
            .attribute_ns(NS_XSI, "type")
            .ok_or(DatexError::MissingField {
                class: self.class,
                field: "xsi:type",
            })
    }

    /// Opaque extension slot: the named child under the `Common` namespace,
    /// cloned verbatim for passthrough. Never interpreted.
    pub fn extension(&self, field: &str) -> Option<XmlElement> {
        self.element.child(NS_COMMON, field).cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
