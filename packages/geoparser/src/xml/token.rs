//! The token source capability.

use crate::error::Result;

/// Kind of the token a source is currently positioned at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// An element was opened.
    StartElement,
    /// An element was closed.
    EndElement,
    /// Character data (text, CDATA or resolved references).
    Characters,
    /// The input is exhausted.
    EndOfInput,
}

/// One attribute of the current start element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name as written (`lat`, `xsi:schemaLocation`).
    pub name: String,
    /// Unescaped attribute value.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A forward-only stream of hierarchical tagged tokens.
///
/// Malformed input is reported as an `Err` from [`advance`](Self::advance);
/// once [`TokenType::EndOfInput`] is reached every further call returns it
/// again.
pub trait TokenSource {
    /// Move to the next token and return its type.
    fn advance(&mut self) -> Result<TokenType>;

    /// Type of the current token.
    fn token_type(&self) -> TokenType;

    /// Local name of the current start or end element.
    fn local_name(&self) -> &str;

    /// Namespace URI of the current start or end element (empty if none).
    fn namespace_uri(&self) -> &str;

    /// Attributes of the current start element.
    fn attributes(&self) -> &[Attribute];

    /// Character data of the current `Characters` token.
    fn text(&self) -> &str;

    /// 1-based line of the current token.
    fn line_number(&self) -> u64;

    /// 1-based column of the current token.
    fn column_number(&self) -> u64;

    /// Value of the named attribute of the current start element.
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Read all character data up to the end of the current element.
    ///
    /// Text of nested elements is included. On return the source is
    /// positioned at the matching end element, or at end of input when the
    /// document is truncated.
    ///
    /// # Panics
    /// Panics if the source is not positioned at a start element.
    fn read_element_text(&mut self) -> Result<String> {
        assert_eq!(
            self.token_type(),
            TokenType::StartElement,
            "read_element_text called outside of a start element"
        );

        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.advance()? {
                TokenType::Characters => text.push_str(self.text()),
                TokenType::StartElement => depth += 1,
                TokenType::EndElement if depth == 0 => break,
                TokenType::EndElement => depth -= 1,
                TokenType::EndOfInput => break,
            }
        }
        Ok(text)
    }
}
