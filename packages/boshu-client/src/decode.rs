//! Decoder for the boshu items bundle wire format.
//!
//! The board returns a bare concatenation of `<ascii-length><json-document>`
//! pairs: no delimiter between the length and the payload, and no fixed width
//! for the length field. `52{...}345{...}` is one 52-byte document followed
//! by one 345-byte document.

use serde::de::DeserializeOwned;

use crate::error::{BoshuError, Result};

/// Decode a full items bundle into its ordered document sequence.
///
/// Decoding the same bytes twice yields the same sequence; the input is never
/// mutated.
pub fn decode_bundle<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let mut docs = Vec::new();
    let mut cursor = Cursor::new(bytes);
    while !cursor.is_done() {
        let len = cursor.read_length()?;
        let start = cursor.pos;
        let payload = cursor.take(len)?;
        let doc = serde_json::from_slice(payload).map_err(|e| BoshuError::MalformedStream {
            offset: start,
            reason: format!("invalid JSON document: {e}"),
        })?;
        docs.push(doc);
    }
    Ok(docs)
}

/// Two-phase pull parser: read a length token, then slice exactly that many
/// payload bytes.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Scan forward to the next run of ASCII digits and consume it as a
    /// decimal byte length.
    fn read_length(&mut self) -> Result<usize> {
        let Some(rel) = self.buf[self.pos..].iter().position(u8::is_ascii_digit) else {
            return Err(BoshuError::MalformedStream {
                offset: self.pos,
                reason: "no length prefix before end of stream".into(),
            });
        };
        let start = self.pos + rel;
        let mut end = start;
        let mut len: usize = 0;
        while end < self.buf.len() && self.buf[end].is_ascii_digit() {
            len = len
                .checked_mul(10)
                .and_then(|l| l.checked_add((self.buf[end] - b'0') as usize))
                .ok_or_else(|| BoshuError::MalformedStream {
                    offset: start,
                    reason: "length prefix overflows".into(),
                })?;
            end += 1;
        }
        self.pos = end;
        Ok(len)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.buf.len() - self.pos;
        if len > remaining {
            return Err(BoshuError::MalformedStream {
                offset: self.pos,
                reason: format!("document of {len} bytes declared but only {remaining} remain"),
            });
        }
        let payload = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(payload)
    }
}
