//! Synthetic document files for end-to-end tests.
//!
//! The builder takes nodes in document order, top layer first, and
//! `build` writes them bottom to top the way the container stores them.
//! Every record carries both the legacy padded name and a unicode name
//! block, matching what real writers emit.

pub struct PsdBuilder {
    width: u32,
    height: u32,
    records: Vec<RecordSpec>,
}

struct RecordSpec {
    name: String,
    id: Option<u32>,
    /// x, y, width, height.
    bounds: (i32, i32, u32, u32),
    visible: bool,
    clipping: u8,
    text: Option<String>,
    /// Section marker value for the `lsct` block, when present.
    marker: Option<u32>,
}

impl RecordSpec {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: None,
            bounds: (0, 0, 0, 0),
            visible: true,
            clipping: 0,
            text: None,
            marker: None,
        }
    }
}

impl PsdBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            records: Vec::new(),
        }
    }

    /// Opens a group; nodes added until `end_group` become its members.
    pub fn begin_group(mut self, id: u32, name: &str) -> Self {
        let mut record = RecordSpec::named(name);
        record.id = Some(id);
        record.marker = Some(1);
        self.records.push(record);
        self
    }

    pub fn begin_hidden_group(mut self, id: u32, name: &str) -> Self {
        let mut record = RecordSpec::named(name);
        record.id = Some(id);
        record.marker = Some(1);
        record.visible = false;
        self.records.push(record);
        self
    }

    pub fn end_group(mut self) -> Self {
        let mut record = RecordSpec::named("</Layer group>");
        record.marker = Some(3);
        self.records.push(record);
        self
    }

    pub fn layer(self, id: u32, name: &str, bounds: (i32, i32, u32, u32)) -> Self {
        self.push_layer(Some(id), name, bounds, true, 0, None)
    }

    pub fn hidden_layer(self, id: u32, name: &str, bounds: (i32, i32, u32, u32)) -> Self {
        self.push_layer(Some(id), name, bounds, false, 0, None)
    }

    pub fn clipped_layer(
        self,
        id: u32,
        name: &str,
        bounds: (i32, i32, u32, u32),
        clipping: u8,
    ) -> Self {
        self.push_layer(Some(id), name, bounds, true, clipping, None)
    }

    pub fn text_layer(
        self,
        id: u32,
        name: &str,
        bounds: (i32, i32, u32, u32),
        text: &str,
    ) -> Self {
        self.push_layer(Some(id), name, bounds, true, 0, Some(text.to_string()))
    }

    pub fn layer_without_id(self, name: &str, bounds: (i32, i32, u32, u32)) -> Self {
        self.push_layer(None, name, bounds, true, 0, None)
    }

    fn push_layer(
        mut self,
        id: Option<u32>,
        name: &str,
        bounds: (i32, i32, u32, u32),
        visible: bool,
        clipping: u8,
        text: Option<String>,
    ) -> Self {
        self.records.push(RecordSpec {
            name: name.to_string(),
            id,
            bounds,
            visible,
            clipping,
            text,
            marker: None,
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut info = Vec::new();
        info.extend_from_slice(&(self.records.len() as i16).to_be_bytes());
        for record in self.records.iter().rev() {
            info.extend_from_slice(&record_bytes(record));
        }
        for _ in &self.records {
            info.extend_from_slice(&[0, 0]); // raw channel data, one channel each
        }
        if info.len() % 2 != 0 {
            info.push(0);
        }

        let mut section = Vec::new();
        section.extend_from_slice(&(info.len() as u32).to_be_bytes());
        section.extend_from_slice(&info);
        section.extend_from_slice(&0u32.to_be_bytes()); // no global mask

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"8BPS");
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.extend_from_slice(&[0; 6]);
        bytes.extend_from_slice(&3u16.to_be_bytes()); // channels
        bytes.extend_from_slice(&self.height.to_be_bytes());
        bytes.extend_from_slice(&self.width.to_be_bytes());
        bytes.extend_from_slice(&8u16.to_be_bytes()); // depth
        bytes.extend_from_slice(&3u16.to_be_bytes()); // rgb
        bytes.extend_from_slice(&0u32.to_be_bytes()); // no color mode data
        bytes.extend_from_slice(&0u32.to_be_bytes()); // no image resources
        bytes.extend_from_slice(&(section.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&section);
        bytes
    }
}

fn record_bytes(record: &RecordSpec) -> Vec<u8> {
    let (x, y, width, height) = record.bounds;
    let top = y;
    let left = x;
    let bottom = y + height as i32;
    let right = x + width as i32;

    let mut bytes = Vec::new();
    for value in [top, left, bottom, right] {
        bytes.extend_from_slice(&value.to_be_bytes());
    }
    bytes.extend_from_slice(&1u16.to_be_bytes()); // one channel
    bytes.extend_from_slice(&0i16.to_be_bytes()); // channel id
    bytes.extend_from_slice(&2u32.to_be_bytes()); // channel data length
    bytes.extend_from_slice(b"8BIM");
    bytes.extend_from_slice(b"norm");
    bytes.push(255); // opacity
    bytes.push(record.clipping);
    bytes.push(if record.visible { 0 } else { 0x02 });
    bytes.push(0); // filler

    let mut extra = Vec::new();
    extra.extend_from_slice(&0u32.to_be_bytes()); // no mask data
    extra.extend_from_slice(&0u32.to_be_bytes()); // no blending ranges
    extra.extend_from_slice(&pascal_string(&record.name));
    if let Some(marker) = record.marker {
        extra.extend_from_slice(&tagged_block(b"lsct", &marker.to_be_bytes()));
    }
    if let Some(id) = record.id {
        extra.extend_from_slice(&tagged_block(b"lyid", &id.to_be_bytes()));
    }
    extra.extend_from_slice(&tagged_block(b"luni", &unicode_string(&record.name)));
    if let Some(text) = &record.text {
        extra.extend_from_slice(&type_tool_block(text));
    }

    bytes.extend_from_slice(&(extra.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&extra);
    bytes
}

fn pascal_string(name: &str) -> Vec<u8> {
    let raw = name.as_bytes();
    let len = raw.len().min(255);
    let mut bytes = vec![len as u8];
    bytes.extend_from_slice(&raw[..len]);
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }
    bytes
}

fn unicode_string(value: &str) -> Vec<u8> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut bytes = (units.len() as u32).to_be_bytes().to_vec();
    for unit in units {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

fn tagged_block(key: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"8BIM");
    bytes.extend_from_slice(key);
    bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
    bytes.extend_from_slice(data);
    bytes
}

fn type_tool_block(text: &str) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&1u16.to_be_bytes()); // block version
    data.extend_from_slice(&[0; 48]); // identity transform
    data.extend_from_slice(&50u16.to_be_bytes()); // text data version
    data.extend_from_slice(&16u32.to_be_bytes()); // descriptor version
    data.extend_from_slice(&unicode_string("")); // descriptor name
    data.extend_from_slice(&0u32.to_be_bytes()); // four-character class id
    data.extend_from_slice(b"TxLr");
    data.extend_from_slice(&1u32.to_be_bytes()); // one item
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(b"Txt ");
    data.extend_from_slice(b"TEXT");
    data.extend_from_slice(&unicode_string(text));
    tagged_block(b"TySh", &data)
}
