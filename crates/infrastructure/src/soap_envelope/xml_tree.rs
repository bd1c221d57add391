use apprelay_core::{AppError, AppResult};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Element keyed by local name, with concatenated text content.
#[derive(Debug, Default)]
pub(super) struct XmlElement {
    pub(super) name: String,
    pub(super) text: String,
    pub(super) children: Vec<XmlElement>,
}

impl XmlElement {
    /// Returns the first direct child named `name`.
    pub(super) fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns the trimmed text of the first direct child named `name`.
    pub(super) fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.trim())
    }

    /// Returns every descendant named `name` in document order.
    pub(super) fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    /// Returns the first descendant named `name` in document order.
    pub(super) fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find(name)
            }
        })
    }

    /// Returns this element or the first descendant with a direct child named `child_name`.
    pub(super) fn find_containing(&self, child_name: &str) -> Option<&XmlElement> {
        if self.child(child_name).is_some() {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_containing(child_name))
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }
}

/// Parses a document into a tree and returns its root element.
pub(super) fn parse_document(xml: &str) -> AppResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|error| {
            AppError::Validation(format!(
                "malformed xml at position {}: {error}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(XmlElement {
                name: local_name(start.local_name().as_ref())?,
                ..XmlElement::default()
            }),
            Event::Empty(empty) => {
                let element = XmlElement {
                    name: local_name(empty.local_name().as_ref())?,
                    ..XmlElement::default()
                };
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text.unescape().map_err(|error| {
                        AppError::Validation(format!("invalid xml text: {error}"))
                    })?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    AppError::Validation("unbalanced closing tag in xml".to_owned())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(AppError::Validation("unterminated element in xml".to_owned()));
    }
    root.ok_or_else(|| AppError::Validation("xml document has no root element".to_owned()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> AppResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(AppError::Validation(
            "xml document has more than one root element".to_owned(),
        )),
    }
}

fn local_name(raw: &[u8]) -> AppResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|error| AppError::Validation(format!("invalid xml element name: {error}")))
}
