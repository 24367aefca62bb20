//! VICI message tree and its element encoding.
//!
//! A message is an ordered list of named entries. Each entry is a string
//! value, a nested section or a list of string values.

use super::ViciError;
use bytes::{Buf, BufMut, BytesMut};
use std::fmt;

const SECTION_START: u8 = 1;
const SECTION_END: u8 = 2;
const KEY_VALUE: u8 = 3;
const LIST_START: u8 = 4;
const LIST_ITEM: u8 = 5;
const LIST_END: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(Vec<u8>),
    Section(Message),
    List(Vec<Vec<u8>>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    entries: Vec<(String, Value)>,
}

impl Message {
    pub fn new() -> Message {
        Message::default()
    }

    /// Append a key-value entry.
    pub fn key_value(mut self, key: &str, value: impl AsRef<[u8]>) -> Message {
        self.entries
            .push((key.to_string(), Value::Str(value.as_ref().to_vec())));
        self
    }

    /// Append a nested section.
    pub fn section(mut self, name: &str, section: Message) -> Message {
        self.entries.push((name.to_string(), Value::Section(section)));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// String value of `key`, lossy UTF-8.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Str(value) => Some(String::from_utf8_lossy(value).into_owned()),
            _ => None,
        }
    }

    /// First top level key-value entry.
    pub fn first_key_value(&self) -> Option<(&str, String)> {
        self.entries.iter().find_map(|(name, value)| match value {
            Value::Str(v) => Some((name.as_str(), String::from_utf8_lossy(v).into_owned())),
            _ => None,
        })
    }

    pub fn encode_into(&self, buf: &mut BytesMut) -> Result<(), ViciError> {
        for (name, value) in &self.entries {
            match value {
                Value::Str(v) => {
                    buf.put_u8(KEY_VALUE);
                    put_name(buf, name)?;
                    put_value(buf, name, v)?;
                }
                Value::Section(section) => {
                    buf.put_u8(SECTION_START);
                    put_name(buf, name)?;
                    section.encode_into(buf)?;
                    buf.put_u8(SECTION_END);
                }
                Value::List(items) => {
                    buf.put_u8(LIST_START);
                    put_name(buf, name)?;
                    for item in items {
                        buf.put_u8(LIST_ITEM);
                        put_value(buf, name, item)?;
                    }
                    buf.put_u8(LIST_END);
                }
            }
        }
        Ok(())
    }

    /// Decode a complete element stream. Sections and lists must be balanced.
    pub fn decode(mut buf: &[u8]) -> Result<Message, ViciError> {
        let mut parents: Vec<(String, Message)> = Vec::new();
        let mut current = Message::new();
        let mut list: Option<(String, Vec<Vec<u8>>)> = None;

        while buf.has_remaining() {
            let kind = buf.get_u8();
            if list.is_some() && kind != LIST_ITEM && kind != LIST_END {
                return Err(ViciError::Decode(format!(
                    "element type {kind} inside a list"
                )));
            }
            match kind {
                SECTION_START => {
                    let name = get_name(&mut buf)?;
                    parents.push((name, std::mem::take(&mut current)));
                }
                SECTION_END => {
                    let (name, parent) = parents
                        .pop()
                        .ok_or_else(|| ViciError::Decode("unexpected section end".into()))?;
                    let section = std::mem::replace(&mut current, parent);
                    current.entries.push((name, Value::Section(section)));
                }
                KEY_VALUE => {
                    let name = get_name(&mut buf)?;
                    let value = get_value(&mut buf)?;
                    current.entries.push((name, Value::Str(value)));
                }
                LIST_START => {
                    list = Some((get_name(&mut buf)?, Vec::new()));
                }
                LIST_ITEM => {
                    let value = get_value(&mut buf)?;
                    list.as_mut()
                        .ok_or_else(|| ViciError::Decode("list item outside a list".into()))?
                        .1
                        .push(value);
                }
                LIST_END => {
                    let (name, items) = list
                        .take()
                        .ok_or_else(|| ViciError::Decode("unexpected list end".into()))?;
                    current.entries.push((name, Value::List(items)));
                }
                other => {
                    return Err(ViciError::Decode(format!("unknown element type {other}")));
                }
            }
        }

        if !parents.is_empty() || list.is_some() {
            return Err(ViciError::Decode("unterminated section or list".into()));
        }
        Ok(current)
    }

    pub(super) fn render(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        for (name, value) in &self.entries {
            match value {
                Value::Str(v) => {
                    writeln!(f, "{indent}{name} = {}", String::from_utf8_lossy(v))?
                }
                Value::Section(section) => {
                    writeln!(f, "{indent}{name} {{")?;
                    section.render(f, depth + 1)?;
                    writeln!(f, "{indent}}}")?;
                }
                Value::List(items) => {
                    let items: Vec<_> = items.iter().map(|i| String::from_utf8_lossy(i)).collect();
                    writeln!(f, "{indent}{name} = [{}]", items.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.render(f, 0)
    }
}

pub(super) fn put_name(buf: &mut BytesMut, name: &str) -> Result<(), ViciError> {
    let len = u8::try_from(name.len()).map_err(|_| ViciError::NameTooLong(name.to_string()))?;
    buf.put_u8(len);
    buf.put_slice(name.as_bytes());
    Ok(())
}

fn put_value(buf: &mut BytesMut, name: &str, value: &[u8]) -> Result<(), ViciError> {
    let len = u16::try_from(value.len()).map_err(|_| ViciError::ValueTooLong {
        key: name.to_string(),
        len: value.len(),
    })?;
    buf.put_u16(len);
    buf.put_slice(value);
    Ok(())
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> Result<&'a [u8], ViciError> {
    if buf.len() < len {
        return Err(ViciError::Decode(format!(
            "truncated: need {len} bytes, have {}",
            buf.len()
        )));
    }
    let slice: &'a [u8] = *buf;
    let (head, tail) = slice.split_at(len);
    *buf = tail;
    Ok(head)
}

pub(super) fn get_name(buf: &mut &[u8]) -> Result<String, ViciError> {
    let len = take(buf, 1)?[0] as usize;
    let name = take(buf, len)?;
    String::from_utf8(name.to_vec()).map_err(|e| ViciError::Decode(format!("name: {e}")))
}

fn get_value(buf: &mut &[u8]) -> Result<Vec<u8>, ViciError> {
    let len = take(buf, 2)?;
    let len = u16::from_be_bytes([len[0], len[1]]) as usize;
    Ok(take(buf, len)?.to_vec())
}
