use polyser::{
    BigEndian, Limits, LittleEndian, Result, Serialize, Serializer, from_binary_array,
    load_from_binary_key_value_with, load_from_json, load_sequence_from_json,
    store_to_binary_key_value, to_binary_array,
};

#[macro_use]
extern crate afl;
extern crate polyser;

#[derive(Clone, Default)]
struct Record {
    name: String,
    id: u64,
    delta: i32,
    flag: bool,
    ratio: f64,
    blob: Vec<u8>,
    tags: Vec<String>,
    children: Vec<Record>,
}

impl Serialize for Record {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        self.name.serialize_field("name", s)?;
        self.id.serialize_field("id", s)?;
        self.delta.serialize_field("delta", s)?;
        self.flag.serialize_field("flag", s)?;
        self.ratio.serialize_field("ratio", s)?;
        s.bytes(&mut self.blob, "blob")?;
        self.tags.serialize_field("tags", s)?;
        self.children.serialize_field("children", s)?;
        Ok(())
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut record = Record::default();
        if load_from_binary_key_value_with::<LittleEndian, _>(&mut record, data, Limits::default()) {
            let _ = store_to_binary_key_value(&record);
            let _ = to_binary_array(&record);
        }
        let mut record = Record::default();
        let _ = load_from_binary_key_value_with::<BigEndian, _>(&mut record, data, Limits::default());

        if let Ok(record) = from_binary_array::<Record>(data) {
            let _ = store_to_binary_key_value(&record);
        }

        if let Ok(text) = std::str::from_utf8(data) {
            let mut record = Record::default();
            let _ = load_from_json(&mut record, text);
            let mut ids: Vec<u64> = Vec::new();
            let _ = load_sequence_from_json(&mut ids, text);
        }
    });
}
