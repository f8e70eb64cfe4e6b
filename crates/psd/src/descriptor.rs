//! Action descriptor parsing.
//!
//! Descriptors are the container format's generic key/value structure,
//! used by the type tool block (among others) to carry structured data.
//! Only the value types that appear in real documents are understood;
//! anything else fails the load rather than desynchronizing the reader,
//! because every value's size depends on its type.

use crate::LoadError;
use crate::cursor::Cursor;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Descriptor {
    #[allow(dead_code)]
    pub(crate) name: String,
    pub(crate) class_id: String,
    pub(crate) items: Vec<(String, DescriptorValue)>,
}

/// Parsed item values. Variants beyond `Text` exist to keep the read
/// position correct; their payloads are carried but not interpreted.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DescriptorValue {
    Text(String),
    Descriptor(Descriptor),
    List(Vec<DescriptorValue>),
    Double(f64),
    UnitDouble { unit: [u8; 4], value: f64 },
    Enumerated { type_id: String, value: String },
    Integer(i32),
    LargeInteger(i64),
    Boolean(bool),
    Class { name: String, class_id: String },
    Raw(Vec<u8>),
}

impl Descriptor {
    pub(crate) fn parse(cursor: &mut Cursor) -> Result<Self, LoadError> {
        let name = cursor.read_unicode_string()?;
        let class_id = read_key(cursor)?;
        // Every item carries at least a four-byte key length and a type tag.
        let count = read_count(cursor, 8)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            let key = read_key(cursor)?;
            let value = parse_value(cursor)?;
            items.push((key, value));
        }
        Ok(Self {
            name,
            class_id,
            items,
        })
    }

    /// Looks up a text item by key. A missing key is not an error; a key
    /// bound to a non-text value is.
    pub(crate) fn text_item(&self, key: &str) -> Result<Option<String>, LoadError> {
        match self.items.iter().find(|(item_key, _)| item_key == key) {
            None => Ok(None),
            Some((_, DescriptorValue::Text(value))) => Ok(Some(value.clone())),
            Some((_, _)) => Err(LoadError::Corrupt(format!(
                "descriptor '{}' item '{key}' is not a text value",
                self.class_id
            ))),
        }
    }
}

/// Reads an element count and checks it against the bytes left. Every
/// element occupies at least `min_size` bytes, so a count past that bound
/// cannot be satisfied by the data and is rejected before any allocation.
fn read_count(cursor: &mut Cursor, min_size: usize) -> Result<usize, LoadError> {
    let count = cursor.read_u32()? as usize;
    if count > cursor.remaining() / min_size {
        return Err(LoadError::Corrupt(format!(
            "descriptor claims {count} elements with only {} bytes left",
            cursor.remaining()
        )));
    }
    Ok(count)
}

/// Keys and class identifiers share one encoding: a four-byte length,
/// where zero means a fixed four-character code follows instead.
fn read_key(cursor: &mut Cursor) -> Result<String, LoadError> {
    let len = cursor.read_u32()? as usize;
    let bytes = if len == 0 {
        cursor.read_bytes(4)?
    } else {
        cursor.read_bytes(len)?
    };
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn parse_value(cursor: &mut Cursor) -> Result<DescriptorValue, LoadError> {
    let os_type = cursor.read_tag()?;
    match &os_type {
        b"TEXT" => Ok(DescriptorValue::Text(cursor.read_unicode_string()?)),
        b"Objc" | b"GlbO" => Ok(DescriptorValue::Descriptor(Descriptor::parse(cursor)?)),
        b"VlLs" => {
            // Every element carries at least a four-byte type tag.
            let count = read_count(cursor, 4)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(parse_value(cursor)?);
            }
            Ok(DescriptorValue::List(items))
        }
        b"doub" => Ok(DescriptorValue::Double(cursor.read_f64()?)),
        b"UntF" => {
            let unit = cursor.read_tag()?;
            let value = cursor.read_f64()?;
            Ok(DescriptorValue::UnitDouble { unit, value })
        }
        b"enum" => {
            let type_id = read_key(cursor)?;
            let value = read_key(cursor)?;
            Ok(DescriptorValue::Enumerated { type_id, value })
        }
        b"long" => Ok(DescriptorValue::Integer(cursor.read_i32()?)),
        b"comp" => Ok(DescriptorValue::LargeInteger(cursor.read_i64()?)),
        b"bool" => Ok(DescriptorValue::Boolean(cursor.read_u8()? != 0)),
        b"type" | b"GlbC" => {
            let name = cursor.read_unicode_string()?;
            let class_id = read_key(cursor)?;
            Ok(DescriptorValue::Class { name, class_id })
        }
        b"alis" | b"tdta" => {
            let len = cursor.read_u32()? as usize;
            Ok(DescriptorValue::Raw(cursor.read_bytes(len)?.to_vec()))
        }
        other => Err(LoadError::Corrupt(format!(
            "unsupported descriptor value type '{}'",
            String::from_utf8_lossy(other)
        ))),
    }
}
