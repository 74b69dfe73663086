//! Markup parsing for appliance status reports.
//!
//! Parsing happens in two steps. [`parse_document`] turns markup into a
//! generic [`Element`] tree without any knowledge of the report layout, and
//! [`to_snapshot`] walks that tree once to build the typed [`Snapshot`].
//!
//! The expected layout is:
//!
//! ```text
//! monitorResponse
//! └── computenode
//!     ├── epoch                       (seconds, as text)
//!     └── components @name            (appliance | enclosure, repeated)
//!         └── component
//!             └── <category>          (disks, fans, ..., optional description)
//!                 └── <record> @id    (disk, fan, ..., repeated or single)
//!                     └── property @name @value
//! ```

use std::collections::BTreeMap;

use probe_types::{ComponentGroup, Property, RawRecord, Snapshot};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::error::{ProbeError, Result};

/// A generic markup element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    /// Concatenated, trimmed text content.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Parse a markup document into its root element.
pub fn parse_document(content: &str) -> Result<Element> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(open_element(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = open_element(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ProbeError::Parse("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                if let Some(current) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| ProbeError::Parse(err.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ProbeError::Parse(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            // Declarations, comments and processing instructions carry no data
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ProbeError::Parse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| ProbeError::Parse("document has no root element".to_string()))
}

fn open_element(start: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attributes = BTreeMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ProbeError::Parse(format!("in <{}>: {}", name, e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ProbeError::Parse(format!("in <{}>: {}", name, e)))?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(Element {
        name,
        attributes,
        ..Default::default()
    })
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(ProbeError::Parse(format!(
                "second root element <{}>",
                element.name
            )))
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Build the typed snapshot from a parsed report document.
pub fn to_snapshot(root: &Element) -> Result<Snapshot> {
    if root.name != "monitorResponse" {
        return Err(ProbeError::Shape(format!(
            "expected root element <monitorResponse>, found <{}>",
            root.name
        )));
    }

    let node = root
        .child("computenode")
        .ok_or_else(|| ProbeError::Shape("missing <computenode> element".to_string()))?;

    let epoch = node.child("epoch").map(|e| e.text.clone());

    let mut groups = Vec::new();
    for components in node.children_named("components") {
        let scope = components.attr("name").ok_or_else(|| {
            ProbeError::Shape("<components> element without a name attribute".to_string())
        })?;
        for component in components.children_named("component") {
            groups.extend(component.children.iter().map(|category| to_group(scope, category)));
        }
    }

    debug!(
        groups = groups.len(),
        has_epoch = epoch.is_some(),
        "Built snapshot from document"
    );

    Ok(Snapshot { epoch, groups })
}

fn to_group(scope: &str, category: &Element) -> ComponentGroup {
    let description = category
        .child("description")
        .map(|d| d.text.clone())
        .or_else(|| category.attr("description").map(str::to_string));

    // A category holding exactly one record has the same shape as one holding many
    let records = category
        .children
        .iter()
        .filter(|c| c.name != "description")
        .map(to_record)
        .collect();

    ComponentGroup {
        scope: scope.to_string(),
        category: category.name.clone(),
        description,
        records,
    }
}

fn to_record(element: &Element) -> RawRecord {
    let properties = element
        .children_named("property")
        .filter_map(|p| match p.attr("name") {
            Some(name) => Some(Property::new(name, p.attr("value").unwrap_or_default())),
            None => {
                warn!(record = %element.name, "Skipping property without a name");
                None
            }
        })
        .collect();

    RawRecord {
        tag: element.name.clone(),
        id: element.attr("id").map(str::to_string),
        properties,
    }
}
