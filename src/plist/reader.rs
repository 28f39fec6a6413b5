use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{xml_err, PlistError, Value};

/// Parse an XML property list.
///
/// Text inside `<string>` and `<key>` is taken verbatim (entities and CDATA
/// decoded, whitespace untouched); whitespace between elements is ignored.
pub fn from_bytes(data: &[u8]) -> Result<Value, PlistError> {
    if data.starts_with(b"bplist") {
        return Err(PlistError::UnsupportedFormat);
    }
    let text = std::str::from_utf8(data).map_err(|_| PlistError::UnsupportedFormat)?;
    let mut reader = Reader::from_str(text);

    // Prolog (declaration, doctype, comments) is skipped by `next_significant`.
    match next_significant(&mut reader)? {
        Event::Start(e) if e.name().as_ref() == b"plist" => {}
        Event::Eof => return Err(PlistError::UnexpectedEof),
        other => return Err(unexpected(&other)),
    }

    let value = match next_value(&mut reader)? {
        Some(value) => value,
        None => return Err(PlistError::UnexpectedElement("/plist".to_string())),
    };

    match next_significant(&mut reader)? {
        Event::End(e) if e.name().as_ref() == b"plist" => Ok(value),
        Event::Eof => Err(PlistError::UnexpectedEof),
        other => Err(unexpected(&other)),
    }
}

/// Next event that carries structure: skips blank text, comments, PIs, and prolog markup.
fn next_significant<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Event<'a>, PlistError> {
    loop {
        let event = reader.read_event().map_err(xml_err)?;
        match &event {
            Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => continue,
            _ => return Ok(event),
        }
    }
}

/// Read one value. `None` means the enclosing container's end tag was reached instead.
fn next_value(reader: &mut Reader<&[u8]>) -> Result<Option<Value>, PlistError> {
    match next_significant(reader)? {
        Event::Start(e) => {
            let value = match e.name().as_ref() {
                b"dict" => parse_dict(reader)?,
                b"array" => parse_array(reader)?,
                b"string" => Value::String(read_text(reader)?),
                b"integer" => parse_integer(&read_text(reader)?)?,
                b"real" => parse_real(&read_text(reader)?)?,
                b"date" => Value::Date(read_text(reader)?.trim().to_string()),
                b"data" => Value::Data(
                    read_text(reader)?
                        .chars()
                        .filter(|c| !c.is_whitespace())
                        .collect(),
                ),
                b"true" => {
                    read_text(reader)?;
                    Value::Boolean(true)
                }
                b"false" => {
                    read_text(reader)?;
                    Value::Boolean(false)
                }
                _ => return Err(PlistError::UnexpectedElement(element_name(&e))),
            };
            Ok(Some(value))
        }
        Event::Empty(e) => {
            let value = match e.name().as_ref() {
                b"dict" => Value::Dictionary(BTreeMap::new()),
                b"array" => Value::Array(Vec::new()),
                b"string" => Value::String(String::new()),
                b"data" => Value::Data(String::new()),
                b"true" => Value::Boolean(true),
                b"false" => Value::Boolean(false),
                _ => return Err(PlistError::UnexpectedElement(element_name(&e))),
            };
            Ok(Some(value))
        }
        Event::End(_) => Ok(None),
        Event::Eof => Err(PlistError::UnexpectedEof),
        other => Err(unexpected(&other)),
    }
}

fn parse_dict(reader: &mut Reader<&[u8]>) -> Result<Value, PlistError> {
    let mut dict = BTreeMap::new();
    loop {
        let key = match next_significant(reader)? {
            Event::Start(e) if e.name().as_ref() == b"key" => read_text(reader)?,
            Event::Empty(e) if e.name().as_ref() == b"key" => String::new(),
            Event::End(_) => return Ok(Value::Dictionary(dict)),
            Event::Eof => return Err(PlistError::UnexpectedEof),
            other => return Err(unexpected(&other)),
        };
        match next_value(reader)? {
            Some(value) => {
                dict.insert(key, value);
            }
            None => return Err(PlistError::MissingValue(key)),
        }
    }
}

fn parse_array(reader: &mut Reader<&[u8]>) -> Result<Value, PlistError> {
    let mut items = Vec::new();
    while let Some(value) = next_value(reader)? {
        items.push(value);
    }
    Ok(Value::Array(items))
}

/// Collect the text content of the current element up to its end tag.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, PlistError> {
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(xml_err)?),
            Event::CData(c) => text.push_str(std::str::from_utf8(&c).map_err(xml_err)?),
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(PlistError::UnexpectedEof),
            event @ (Event::Start(_) | Event::Empty(_)) => return Err(unexpected(&event)),
            _ => {}
        }
    }
}

fn parse_integer(text: &str) -> Result<Value, PlistError> {
    let trimmed = text.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => trimmed.parse::<i64>().ok(),
    };
    parsed.map(Value::Integer).ok_or_else(|| PlistError::InvalidScalar {
        tag: "integer",
        text: trimmed.to_string(),
    })
}

fn parse_real(text: &str) -> Result<Value, PlistError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map(Value::Real)
        .map_err(|_| PlistError::InvalidScalar {
            tag: "real",
            text: trimmed.to_string(),
        })
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn unexpected(event: &Event<'_>) -> PlistError {
    match event {
        Event::Start(e) | Event::Empty(e) => PlistError::UnexpectedElement(element_name(e)),
        Event::End(e) => PlistError::UnexpectedElement(format!(
            "/{}",
            String::from_utf8_lossy(e.name().as_ref())
        )),
        Event::Text(_) | Event::CData(_) => PlistError::Xml("unexpected text content".to_string()),
        Event::Eof => PlistError::UnexpectedEof,
        _ => PlistError::Xml("unexpected markup".to_string()),
    }
}
