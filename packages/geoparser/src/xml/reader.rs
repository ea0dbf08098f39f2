//! Token source backed by quick-xml's namespace-aware streaming reader.

use std::io::{self, BufRead};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use super::position::{LineTracker, Position};
use super::token::{Attribute, TokenSource, TokenType};
use crate::error::{GeoParseError, Result};

/// Streams tokens out of buffered XML input.
///
/// Empty elements (`<a/>`) are reported as a start followed by an end
/// element, entity and character references are resolved into text and
/// namespace declarations are not listed as attributes. Only the current
/// event is held in memory.
pub struct XmlTokenSource<R> {
    reader: NsReader<LineTracker<R>>,
    buf: Vec<u8>,
    token: TokenType,
    finished: bool,
    after_text: bool,
    local_name: String,
    namespace_uri: String,
    attributes: Vec<Attribute>,
    text: String,
    token_start: Position,
}

impl<R: BufRead> XmlTokenSource<R> {
    /// Create a token source over buffered input.
    #[must_use]
    pub fn new(input: R) -> Self {
        let mut reader = NsReader::from_reader(LineTracker::new(input));
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.trim_text(false);

        Self {
            reader,
            buf: Vec::new(),
            token: TokenType::EndOfInput,
            finished: false,
            after_text: false,
            local_name: String::new(),
            namespace_uri: String::new(),
            attributes: Vec::new(),
            text: String::new(),
            token_start: Position::START,
        }
    }

    fn syntax_error(message: impl Into<String>, position: Position) -> GeoParseError {
        GeoParseError::Syntax {
            message: message.into(),
            line: position.line,
            column: position.column(),
        }
    }

    fn read_error(&self, err: quick_xml::Error) -> GeoParseError {
        match err {
            quick_xml::Error::Io(err) => GeoParseError::Io(io::Error::new(err.kind(), err.to_string())),
            other => {
                let position = self.reader.get_ref().position_at(self.reader.error_position());
                Self::syntax_error(other.to_string(), position)
            }
        }
    }

    fn read_attributes(&mut self, start: &BytesStart<'_>) -> Result<()> {
        for attr in start.attributes() {
            let attr = attr.map_err(|err| Self::syntax_error(err.to_string(), self.token_start))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let value = attr
                .decode_and_unescape_value(self.reader.decoder())
                .map_err(|err| Self::syntax_error(err.to_string(), self.token_start))?
                .into_owned();
            self.attributes.push(Attribute::new(decode_bytes(key), value));
        }
        Ok(())
    }

    fn set_token(&mut self, token: TokenType) -> Result<TokenType> {
        self.token = token;
        Ok(token)
    }

    fn read_token(&mut self, buf: &mut Vec<u8>) -> Result<TokenType> {
        loop {
            buf.clear();
            // Text is read up to and including the `<` of the next markup.
            let after_text = std::mem::take(&mut self.after_text);
            let mark = self.reader.get_mut().mark();

            let (resolved, event) = match self.reader.read_resolved_event_into(buf) {
                Ok(pair) => pair,
                Err(err) => return Err(self.read_error(err)),
            };

            let is_markup = matches!(event, Event::Start(_) | Event::End(_));
            self.token_start = if after_text && is_markup {
                mark.previous()
            } else {
                mark
            };

            let namespace = match resolved {
                ResolveResult::Bound(ns) => decode_bytes(ns.as_ref()),
                ResolveResult::Unbound => String::new(),
                ResolveResult::Unknown(prefix) => {
                    let prefix = decode_bytes(&prefix);
                    return Err(Self::syntax_error(
                        format!("Namespace prefix '{prefix}' not declared"),
                        self.token_start,
                    ));
                }
            };

            match event {
                Event::Start(start) => {
                    self.local_name = decode_bytes(start.local_name().as_ref());
                    self.namespace_uri = namespace;
                    self.read_attributes(&start)?;
                    return self.set_token(TokenType::StartElement);
                }
                Event::End(end) => {
                    self.local_name = decode_bytes(end.local_name().as_ref());
                    self.namespace_uri = namespace;
                    return self.set_token(TokenType::EndElement);
                }
                Event::Text(text) => {
                    self.after_text = true;
                    let decoded = text
                        .decode()
                        .map_err(|err| Self::syntax_error(err.to_string(), self.token_start))?;
                    self.text.push_str(&decoded);
                    return self.set_token(TokenType::Characters);
                }
                Event::CData(cdata) => {
                    let decoded = cdata
                        .decode()
                        .map_err(|err| Self::syntax_error(err.to_string(), self.token_start))?;
                    self.text.push_str(&decoded);
                    return self.set_token(TokenType::Characters);
                }
                Event::GeneralRef(reference) => {
                    let name = decode_bytes(reference.as_ref());
                    let Some(resolved) = resolve_reference(&name) else {
                        return Err(Self::syntax_error(
                            format!("Entity '&{name};' not declared"),
                            self.token_start,
                        ));
                    };
                    self.text.push_str(&resolved);
                    return self.set_token(TokenType::Characters);
                }
                Event::Eof => {
                    self.finished = true;
                    self.local_name.clear();
                    self.namespace_uri.clear();
                    return self.set_token(TokenType::EndOfInput);
                }
                // Declarations, comments, processing instructions, doctype
                _ => continue,
            }
        }
    }
}

impl<'i> XmlTokenSource<&'i [u8]> {
    /// Create a token source over a string.
    #[must_use]
    pub fn from_text(input: &'i str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<R: BufRead> TokenSource for XmlTokenSource<R> {
    fn advance(&mut self) -> Result<TokenType> {
        if self.finished {
            return Ok(TokenType::EndOfInput);
        }

        self.attributes.clear();
        self.text.clear();

        let mut buf = std::mem::take(&mut self.buf);
        let result = self.read_token(&mut buf);
        buf.clear();
        self.buf = buf;
        result
    }

    fn token_type(&self) -> TokenType {
        self.token
    }

    fn local_name(&self) -> &str {
        &self.local_name
    }

    fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn line_number(&self) -> u64 {
        self.token_start.line
    }

    fn column_number(&self) -> u64 {
        self.token_start.column()
    }
}

fn decode_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Resolve a predefined entity (`amp`) or a character reference (`#38`, `#x26`).
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}
