use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{xml_err, PlistError, Value};

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);

const FOOTER: &str = "\n</plist>\n";

/// Serialize `value` as an XML property list.
///
/// Dictionary keys come out sorted and nesting is tab-indented, so the same
/// value always produces the same bytes.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>, PlistError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    write_value(&mut writer, value)?;

    let body = writer.into_inner();
    let mut out = Vec::with_capacity(HEADER.len() + body.len() + FOOTER.len());
    out.extend_from_slice(HEADER.as_bytes());
    out.extend_from_slice(&body);
    out.extend_from_slice(FOOTER.as_bytes());
    Ok(out)
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<(), PlistError> {
    match value {
        Value::Dictionary(dict) if dict.is_empty() => write_empty(writer, "dict"),
        Value::Dictionary(dict) => {
            writer
                .write_event(Event::Start(BytesStart::new("dict")))
                .map_err(xml_err)?;
            for (key, item) in dict {
                write_text_element(writer, "key", key)?;
                write_value(writer, item)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("dict")))
                .map_err(xml_err)
        }
        Value::Array(items) if items.is_empty() => write_empty(writer, "array"),
        Value::Array(items) => {
            writer
                .write_event(Event::Start(BytesStart::new("array")))
                .map_err(xml_err)?;
            for item in items {
                write_value(writer, item)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("array")))
                .map_err(xml_err)
        }
        Value::String(s) => write_text_element(writer, "string", s),
        Value::Integer(i) => write_text_element(writer, "integer", &i.to_string()),
        Value::Real(r) => write_text_element(writer, "real", &r.to_string()),
        Value::Boolean(true) => write_empty(writer, "true"),
        Value::Boolean(false) => write_empty(writer, "false"),
        Value::Date(d) => write_text_element(writer, "date", d),
        Value::Data(d) => write_text_element(writer, "data", d),
    }
}

fn write_empty(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), PlistError> {
    writer
        .write_event(Event::Empty(BytesStart::new(tag)))
        .map_err(xml_err)
}

/// `<tag>text</tag>` on one line; only `&`, `<` and `>` are escaped.
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    text: &str,
) -> Result<(), PlistError> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::from_escaped(partial_escape(text)))
        .map_err(xml_err)?;
    Ok(())
}
