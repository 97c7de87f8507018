// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON rendering with sorted keys in compact or pretty layout.
//!
//! Values are converted to [`serde_json::Value`] first. Its object map is a
//! `BTreeMap`, so keys come out sorted at every depth in both layouts. The
//! compact layout keeps a space after `,` and `:`, and both layouts escape
//! non-ASCII characters, to stay byte-compatible with existing clients.

use crate::error::ApiError;
use crate::types::Envelope;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Compact,
    Pretty,
}

impl From<bool> for Format {
    fn from(pretty: bool) -> Self {
        if pretty {
            Format::Pretty
        } else {
            Format::Compact
        }
    }
}

/// Formatter writing `", "` and `": "` separators (or newlines and
/// indentation when `indent` is set) and escaping non-ASCII as `\uXXXX`.
struct AsciiFormatter {
    indent: Option<&'static [u8]>,
    depth: usize,
    has_value: bool,
}

impl AsciiFormatter {
    fn compact() -> Self {
        Self {
            indent: None,
            depth: 0,
            has_value: false,
        }
    }

    fn pretty() -> Self {
        Self {
            indent: Some(b"    "),
            ..Self::compact()
        }
    }

    fn newline<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if let Some(indent) = self.indent {
            writer.write_all(b"\n")?;
            for _ in 0..self.depth {
                writer.write_all(indent)?;
            }
        }
        Ok(())
    }

    fn open<W>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(bracket)
    }

    fn close<W>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth -= 1;
        if self.has_value {
            self.newline(writer)?;
        }
        writer.write_all(bracket)
    }

    fn separate<W>(&self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match (first, self.indent.is_some()) {
            (true, _) => self.newline(writer),
            (false, true) => {
                writer.write_all(b",")?;
                self.newline(writer)
            }
            (false, false) => writer.write_all(b", "),
        }
    }
}

impl Formatter for AsciiFormatter {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.open(writer, b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.close(writer, b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.separate(writer, first)
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.open(writer, b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.close(writer, b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.separate(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    // Quotes, backslashes and control characters never reach here.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for (i, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&fragment.as_bytes()[i..i + 1])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` with sorted keys in the requested layout.
pub fn render<T: Serialize>(value: &T, format: Format) -> Result<Vec<u8>, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    let mut out = Vec::with_capacity(256);

    let formatter = match format {
        Format::Pretty => AsciiFormatter::pretty(),
        Format::Compact => AsciiFormatter::compact(),
    };
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;

    Ok(out)
}

/// An envelope paired with the layout it should be rendered in.
#[derive(Debug, Clone)]
pub struct JsonEnvelope {
    pub envelope: Envelope,
    pub format: Format,
}

impl JsonEnvelope {
    pub fn new(envelope: Envelope, format: Format) -> Self {
        Self { envelope, format }
    }
}

impl IntoResponse for JsonEnvelope {
    fn into_response(self) -> Response {
        match render(&self.envelope, self.format) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(e) => ApiError::from(e).into_response(),
        }
    }
}
