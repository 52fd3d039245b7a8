//! Decoding of the character document into raw stroke paths.
//!
//! The document is a tree of the form
//!
//! ```xml
//! <kanji>
//!     <g name="ichi">
//!         <path d="M11,54c3,1,9,1,13,0"/>
//!     </g>
//! </kanji>
//! ```
//!
//! Every direct child of a `<kanji>` element is a character (stroke group)
//! and every direct child of a stroke group is one stroke.

use std::str;

use log::{debug, trace};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

const CONTAINER_TAG: &[u8] = b"kanji";
const NAME_ATTR: &[u8] = b"name";
const PATH_ATTR: &[u8] = b"d";

/// One stroke of a character, still in its path command form.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawStroke {
    /// 1-based position of the stroke within its character.
    pub index: usize,
    pub path: String,
}

/// A named character with its strokes in document order.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Character {
    pub name: String,
    pub strokes: Vec<RawStroke>,
}

impl Character {
    fn new(name: String) -> Self {
        Self {
            name,
            strokes: Vec::new(),
        }
    }

    /// First word of the name, used as the key for labels and audio clips.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    fn add_stroke(&mut self, path: String) {
        let index = self.strokes.len() + 1;
        self.strokes.push(RawStroke { index, path });
    }
}

/// Nesting bookkeeping while walking the event stream.
#[derive(Debug, Default)]
struct Cursor {
    depth: usize,
    container_depth: Option<usize>,
    group_depth: Option<usize>,
    current: Option<Character>,
}

impl Cursor {
    fn in_container_child_level(&self) -> bool {
        matches!(self.container_depth, Some(d) if self.depth == d + 1) && self.current.is_none()
    }

    fn in_group_child_level(&self) -> bool {
        matches!(self.group_depth, Some(d) if self.depth == d + 1)
    }
}

fn find_attribute(element: &BytesStart, key: &[u8]) -> Result<Option<String>, Error> {
    let attr: Option<Attribute> = element
        .attributes()
        .filter_map(Result::ok)
        .find(|attr| attr.key == key);
    match attr {
        Some(attr) => {
            let value = attr.unescaped_value()?;
            let value = str::from_utf8(&value).map_err(|e| {
                Error::MalformedDocument(format!("attribute is not valid UTF-8: {}", e))
            })?;
            Ok(Some(value.to_string()))
        }
        None => Ok(None),
    }
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name()).into_owned()
}

/// Handle the opening of an element. `empty` is set for self-closing tags.
fn open_element(element: &BytesStart, empty: bool, cursor: &mut Cursor) -> Result<(), Error> {
    if cursor.in_group_child_level() {
        trace!("decode_document: Found stroke <{}>", element_name(element));
        let path = find_attribute(element, PATH_ATTR)?.ok_or_else(|| {
            Error::MalformedDocument(format!(
                "stroke <{}> has no \"d\" attribute",
                element_name(element)
            ))
        })?;
        if let Some(character) = cursor.current.as_mut() {
            character.add_stroke(path);
        }
    } else if cursor.in_container_child_level() {
        let name = find_attribute(element, NAME_ATTR)?.ok_or_else(|| {
            Error::MalformedDocument(format!(
                "stroke group <{}> has no \"name\" attribute",
                element_name(element)
            ))
        })?;
        trace!("decode_document: Found stroke group {:?}", name);
        let character = Character::new(name);
        if empty {
            return Err(Error::MalformedDocument(format!(
                "stroke group {:?} has no strokes",
                character.name
            )));
        }
        cursor.group_depth = Some(cursor.depth);
        cursor.current = Some(character);
    } else if cursor.container_depth.is_none() && element.local_name() == CONTAINER_TAG {
        trace!("decode_document: Found character container");
        if !empty {
            cursor.container_depth = Some(cursor.depth);
        }
    }

    if !empty {
        cursor.depth += 1;
    }
    Ok(())
}

fn close_element(cursor: &mut Cursor, characters: &mut Vec<Character>) -> Result<(), Error> {
    cursor.depth = cursor.depth.saturating_sub(1);
    if cursor.group_depth == Some(cursor.depth) {
        cursor.group_depth = None;
        if let Some(character) = cursor.current.take() {
            if character.strokes.is_empty() {
                return Err(Error::MalformedDocument(format!(
                    "stroke group {:?} has no strokes",
                    character.name
                )));
            }
            debug!(
                "decode_document: Character {:?} with {} strokes",
                character.name,
                character.strokes.len()
            );
            characters.push(character);
        }
    } else if cursor.container_depth == Some(cursor.depth) {
        cursor.container_depth = None;
    }
    Ok(())
}

/// Decode a character document into a list of characters, preserving
/// document order for characters and strokes.
pub fn decode_document(source: &str) -> Result<Vec<Character>, Error> {
    trace!("decode_document");
    if source.trim().is_empty() {
        return Err(Error::EmptySource);
    }

    let mut reader = quick_xml::Reader::from_str(source);
    reader.trim_text(true);

    let mut cursor = Cursor::default();
    let mut characters = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => open_element(e, false, &mut cursor)?,
            Event::Empty(ref e) => open_element(e, true, &mut cursor)?,
            Event::End(_) => close_element(&mut cursor, &mut characters)?,
            Event::Eof => {
                trace!("decode_document: EOF");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    if cursor.current.is_some() || cursor.depth != 0 {
        return Err(Error::MalformedDocument("unexpected end of document".into()));
    }
    if characters.is_empty() {
        return Err(Error::MalformedDocument(
            "document contains no character stroke groups".into(),
        ));
    }
    trace!("decode_document: Return {} characters", characters.len());
    Ok(characters)
}
