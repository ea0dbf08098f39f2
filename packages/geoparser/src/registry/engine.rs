//! Dispatch loop that drives a token source through the handler registry.

use std::io::{BufReader, Read};
use std::sync::Arc;

use super::context::ParseContext;
use super::core::HandlerRegistry;
use super::qname::QualifiedName;
use super::stack::{ParseStack, StackFrame};
use crate::config::ParseOptions;
use crate::error::{GeoParseError, Result};
use crate::format::FormatDescriptor;
use crate::model::GeoDocument;
use crate::xml::{TokenSource, TokenType, XmlTokenSource};

/// Parser for one document at a time.
///
/// For every start element the parser looks up a handler by qualified
/// name, lets it build or mutate nodes and pushes a frame with the node it
/// returned. Elements without a handler still get a frame (without node),
/// so stack depth always equals element nesting depth. Handlers that
/// consume their element's text get no frame at all.
pub struct GeoParser {
    format: &'static FormatDescriptor,
    registry: Arc<HandlerRegistry>,
    options: ParseOptions,
    stack: ParseStack,
    document: Option<GeoDocument>,
}

impl GeoParser {
    /// Create a parser for `format` using the given handlers.
    #[must_use]
    pub fn new(format: &'static FormatDescriptor, registry: Arc<HandlerRegistry>) -> Self {
        Self {
            format,
            registry,
            options: ParseOptions::default(),
            stack: ParseStack::new(),
            document: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn format(&self) -> &'static FormatDescriptor {
        self.format
    }

    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Depth of the parse stack; zero between parses.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Parse everything `reader` yields, streaming it through a buffer.
    ///
    /// # Errors
    /// See [`read_tokens`](Self::read_tokens); reader failures are returned
    /// as `Io`.
    pub fn read(&mut self, reader: impl Read) -> Result<()> {
        self.read_tokens(&mut XmlTokenSource::new(BufReader::new(reader)))
    }

    /// Parse a document held in memory.
    ///
    /// # Errors
    /// See [`read_tokens`](Self::read_tokens).
    pub fn read_bytes(&mut self, input: &[u8]) -> Result<()> {
        self.read_tokens(&mut XmlTokenSource::new(input))
    }

    /// Parse a document held in a string.
    ///
    /// # Errors
    /// See [`read_tokens`](Self::read_tokens).
    pub fn read_str(&mut self, input: &str) -> Result<()> {
        self.read_bytes(input.as_bytes())
    }

    /// Parse a document from any token source.
    ///
    /// A new document is created first and kept by the parser whatever the
    /// outcome, so a partially built document can still be released after
    /// a failure.
    ///
    /// # Errors
    /// Returns `Syntax` for malformed markup or a second top-level element,
    /// `InvalidRoot` if the outermost element does not belong to the format
    /// and `UnclosedTags` if input ends inside an element.
    pub fn read_tokens(&mut self, source: &mut dyn TokenSource) -> Result<()> {
        self.stack.clear();
        let mut document = self.format.new_document();

        let result = self.seek_root(source, &mut document);
        self.document = Some(document);

        if let Err(err) = &result {
            tracing::debug!(
                format = self.format.name,
                error = %err,
                line = ?err.line(),
                "Parsing failed"
            );
        }
        result
    }

    /// Hand over the parsed document. Returns `None` on repeated calls.
    pub fn release_document(&mut self) -> Option<GeoDocument> {
        self.document.take()
    }

    /// The parsed document, if not yet released.
    #[must_use]
    pub fn document(&self) -> Option<&GeoDocument> {
        self.document.as_ref()
    }

    fn seek_root(&mut self, source: &mut dyn TokenSource, document: &mut GeoDocument) -> Result<()> {
        let mut root_parsed = false;
        loop {
            match source.advance()? {
                TokenType::StartElement if root_parsed => {
                    return Err(GeoParseError::Syntax {
                        message: format!(
                            "Extra content at end of document: <{}>",
                            source.local_name()
                        ),
                        line: source.line_number(),
                        column: source.column_number(),
                    });
                }
                TokenType::StartElement => {
                    if !self
                        .format
                        .is_valid_root(source.local_name(), source.namespace_uri())
                    {
                        return Err(GeoParseError::InvalidRoot {
                            format: self.format.name,
                            name: source.local_name().to_string(),
                            namespace: source.namespace_uri().to_string(),
                            line: source.line_number(),
                        });
                    }
                    self.parse_element_tree(source, document)?;
                    root_parsed = true;
                }
                TokenType::EndOfInput => return Ok(()),
                TokenType::EndElement | TokenType::Characters => {}
            }
        }
    }

    /// Parse the element the source is positioned at, with all children.
    fn parse_element_tree(
        &mut self,
        source: &mut dyn TokenSource,
        document: &mut GeoDocument,
    ) -> Result<()> {
        self.open_element(source, document)?;

        while !self.stack.is_empty() {
            match source.advance()? {
                TokenType::StartElement => self.open_element(source, document)?,
                TokenType::EndElement => {
                    if let Some(frame) = self.stack.pop() {
                        tracing::trace!(
                            tag = %frame.qualified_name,
                            depth = self.stack.len(),
                            "Closed element"
                        );
                    }
                }
                TokenType::Characters => {}
                TokenType::EndOfInput => {
                    return Err(GeoParseError::UnclosedTags {
                        count: self.stack.len(),
                        innermost: self
                            .stack
                            .top()
                            .map(|frame| frame.qualified_name.local_name.clone())
                            .unwrap_or_default(),
                        line: source.line_number(),
                    });
                }
            }
        }
        Ok(())
    }

    fn open_element(
        &mut self,
        source: &mut dyn TokenSource,
        document: &mut GeoDocument,
    ) -> Result<()> {
        let name = QualifiedName::new(source.local_name(), source.namespace_uri());
        let mut node = None;

        if let Some(handler) = self.registry.lookup(&name) {
            let mut ctx = ParseContext::new(source, &self.stack, document, &self.options, &name);
            node = handler.parse(&mut ctx)?;

            if source.token_type() == TokenType::EndElement {
                tracing::trace!(tag = %name, depth = self.stack.len(), "Consumed element");
                return Ok(());
            }
        }

        tracing::trace!(
            tag = %name,
            depth = self.stack.len() + 1,
            handled = node.is_some(),
            "Opened element"
        );
        self.stack.push(StackFrame::new(name, node));
        Ok(())
    }
}
