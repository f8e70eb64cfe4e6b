//! Sequential reader for the layered-image container.
//!
//! The file is a chain of big-endian, length-prefixed sections. Only the
//! header and the layer list matter for structure extraction; pixel data,
//! image resources, and color tables are skipped by their declared
//! lengths. Layer records appear on disk bottom to top, with groups
//! delimited by hidden marker records, so reading happens in two passes:
//! flat records first, then tree assembly.

use crate::LoadError;
use crate::cursor::Cursor;
use crate::descriptor::Descriptor;
use stratum_types::{Canvas, Document, Group, Layer, Node, Rect};

const FILE_SIGNATURE: &[u8; 4] = b"8BPS";
const BLOCK_SIGNATURE: &[u8; 4] = b"8BIM";
const BIG_BLOCK_SIGNATURE: &[u8; 4] = b"8B64";
const SUPPORTED_VERSION: u16 = 1;

/// Flag bit meaning the layer is hidden in the editor.
const HIDDEN_FLAG: u8 = 0x02;

/// Group boundary role carried by a record's section marker block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    /// An open or closed folder: the record names a group.
    FolderStart,
    /// The hidden record that closes a group.
    Divider,
    /// An ordinary layer. Unknown marker values land here too, so newer
    /// writers do not break loading.
    Plain,
}

/// One entry of the flat layer list, still in file order.
#[derive(Debug)]
struct LayerRecord {
    id: Option<u32>,
    name: String,
    bbox: Rect,
    text: Option<String>,
    visible: bool,
    clipping: u8,
    section: SectionKind,
}

pub(crate) fn parse(data: &[u8]) -> Result<Document, LoadError> {
    let mut cursor = Cursor::new(data);
    let canvas = read_header(&mut cursor)?;
    skip_length_prefixed(&mut cursor)?; // color mode data
    skip_length_prefixed(&mut cursor)?; // image resources
    let records = read_layer_list(&mut cursor)?;
    log::debug!(
        "canvas {}x{}, {} layer records",
        canvas.width,
        canvas.height,
        records.len()
    );
    let children = build_tree(records)?;
    Ok(Document { canvas, children })
}

fn read_header(cursor: &mut Cursor) -> Result<Canvas, LoadError> {
    let signature = cursor.read_tag()?;
    if &signature != FILE_SIGNATURE {
        return Err(LoadError::BadSignature);
    }
    let version = cursor.read_u16()?;
    if version != SUPPORTED_VERSION {
        return Err(LoadError::UnsupportedVersion(version));
    }
    cursor.skip(6)?; // reserved
    let _channels = cursor.read_u16()?;
    let height = cursor.read_u32()?;
    let width = cursor.read_u32()?;
    let _depth = cursor.read_u16()?;
    let _color_mode = cursor.read_u16()?;
    if width == 0 || height == 0 {
        return Err(LoadError::Corrupt(format!(
            "canvas dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(Canvas::new(width, height))
}

fn skip_length_prefixed(cursor: &mut Cursor) -> Result<(), LoadError> {
    let len = cursor.read_u32()? as usize;
    cursor.skip(len)
}

/// Reads the layer list out of the layer-and-mask section. Channel image
/// data follows the records inside the same section and is left unread.
fn read_layer_list(cursor: &mut Cursor) -> Result<Vec<LayerRecord>, LoadError> {
    let section_len = cursor.read_u32()? as usize;
    if section_len == 0 {
        return Ok(Vec::new());
    }
    let mut section = cursor.take(section_len)?;
    let info_len = section.read_u32()? as usize;
    if info_len == 0 {
        return Ok(Vec::new());
    }
    let mut info = section.take(info_len)?;
    // A negative count flags merged transparency data; the magnitude is
    // the record count either way.
    let count = info.read_i16()?.unsigned_abs() as usize;
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(read_layer_record(&mut info)?);
    }
    Ok(records)
}

fn read_layer_record(cursor: &mut Cursor) -> Result<LayerRecord, LoadError> {
    let top = cursor.read_i32()?;
    let left = cursor.read_i32()?;
    let bottom = cursor.read_i32()?;
    let right = cursor.read_i32()?;
    if bottom < top || right < left {
        return Err(LoadError::Corrupt(format!(
            "layer bounds are inverted: top {top} bottom {bottom} left {left} right {right}"
        )));
    }
    let width = (i64::from(right) - i64::from(left)) as u32;
    let height = (i64::from(bottom) - i64::from(top)) as u32;
    let bbox = Rect::new(left, top, width, height);

    let channel_count = cursor.read_u16()? as usize;
    cursor.skip(channel_count * 6)?; // per channel: id and data length

    let signature = cursor.read_tag()?;
    if &signature != BLOCK_SIGNATURE {
        return Err(LoadError::Corrupt(format!(
            "bad blend mode signature '{}'",
            String::from_utf8_lossy(&signature)
        )));
    }
    let _blend_key = cursor.read_tag()?;
    let _opacity = cursor.read_u8()?;
    let clipping = cursor.read_u8()?;
    let flags = cursor.read_u8()?;
    cursor.skip(1)?; // filler
    let visible = flags & HIDDEN_FLAG == 0;

    let extra_len = cursor.read_u32()? as usize;
    let mut extra = cursor.take(extra_len)?;
    skip_length_prefixed(&mut extra)?; // layer mask data
    skip_length_prefixed(&mut extra)?; // blending ranges
    let fallback_name = extra.read_pascal_string(4)?;

    let mut record = LayerRecord {
        id: None,
        name: fallback_name,
        bbox,
        text: None,
        visible,
        clipping,
        section: SectionKind::Plain,
    };
    read_tagged_blocks(&mut extra, &mut record)?;
    Ok(record)
}

/// Consumes the tagged blocks trailing a layer record. Blocks the reader
/// does not care about are skipped by length.
fn read_tagged_blocks(cursor: &mut Cursor, record: &mut LayerRecord) -> Result<(), LoadError> {
    // A block needs at least signature, key, and length; a shorter
    // remnant is trailing padding.
    while cursor.remaining() >= 12 {
        let signature = cursor.read_tag()?;
        if &signature != BLOCK_SIGNATURE && &signature != BIG_BLOCK_SIGNATURE {
            return Err(LoadError::Corrupt(format!(
                "bad tagged block signature '{}'",
                String::from_utf8_lossy(&signature)
            )));
        }
        let key = cursor.read_tag()?;
        let len = cursor.read_u32()? as usize;
        let mut block = cursor.take(len)?;
        match &key {
            b"lsct" => record.section = read_section_marker(&mut block)?,
            b"lyid" => record.id = Some(block.read_u32()?),
            b"luni" => record.name = block.read_unicode_string()?,
            b"TySh" => record.text = read_type_tool(&mut block)?,
            _ => {}
        }
    }
    Ok(())
}

fn read_section_marker(block: &mut Cursor) -> Result<SectionKind, LoadError> {
    let kind = block.read_u32()?;
    Ok(match kind {
        1 | 2 => SectionKind::FolderStart,
        3 => SectionKind::Divider,
        _ => SectionKind::Plain,
    })
}

/// Pulls the text content out of a type tool block. The block holds a
/// transform, a text descriptor, and warp data; only the descriptor's
/// 'Txt ' item matters here.
fn read_type_tool(block: &mut Cursor) -> Result<Option<String>, LoadError> {
    let version = block.read_u16()?;
    if version != 1 {
        return Err(LoadError::Corrupt(format!(
            "unsupported type tool version {version}"
        )));
    }
    block.skip(48)?; // 2D transform, six f64 values
    let text_version = block.read_u16()?;
    if text_version != 50 {
        return Err(LoadError::Corrupt(format!(
            "unsupported type tool text version {text_version}"
        )));
    }
    let descriptor_version = block.read_u32()?;
    if descriptor_version != 16 {
        return Err(LoadError::Corrupt(format!(
            "unsupported text descriptor version {descriptor_version}"
        )));
    }
    let descriptor = Descriptor::parse(block)?;
    descriptor.text_item("Txt ")
}

/// Turns the flat record list into a forest. Records are stored bottom
/// to top, so the list is reversed first; after that a folder record
/// opens a group and the matching divider closes it.
fn build_tree(records: Vec<LayerRecord>) -> Result<Vec<Node>, LoadError> {
    let mut ordered = records;
    ordered.reverse();
    let mut iter = ordered.into_iter();
    build_forest(&mut iter, 0)
}

fn build_forest(
    records: &mut std::vec::IntoIter<LayerRecord>,
    depth: usize,
) -> Result<Vec<Node>, LoadError> {
    let mut nodes = Vec::new();
    while let Some(record) = records.next() {
        match record.section {
            SectionKind::FolderStart => {
                let children = build_forest(records, depth + 1)?;
                nodes.push(Node::Group(Group {
                    id: record.id,
                    name: record.name,
                    visible: record.visible,
                    clipping: record.clipping,
                    children,
                }));
            }
            SectionKind::Divider => {
                if depth == 0 {
                    return Err(LoadError::Corrupt(
                        "group divider without a matching group".to_string(),
                    ));
                }
                return Ok(nodes);
            }
            SectionKind::Plain => {
                nodes.push(Node::Layer(Layer {
                    id: record.id,
                    name: record.name,
                    bbox: record.bbox,
                    text: record.text,
                    visible: record.visible,
                    clipping: record.clipping,
                }));
            }
        }
    }
    if depth > 0 {
        return Err(LoadError::Corrupt("unterminated layer group".to_string()));
    }
    Ok(nodes)
}
