//! Dot-path string parser.

use super::ast::{DotPath, Segment, SEPARATOR, WILDCARD};
use super::error::PathError;

/// Parser for dot-path strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given path string.
    pub fn new(path: &'a str) -> Self {
        Self {
            input: path,
            position: 0,
        }
    }

    /// Parses the path string into a DotPath.
    ///
    /// The empty string parses to the identity path.
    pub fn parse(path: &str) -> Result<DotPath, PathError> {
        let mut parser = Parser::new(path);
        parser.parse_path()
    }

    /// Parses every path in `paths`, failing on the first malformed one.
    pub fn parse_all<I, S>(paths: I) -> Result<Vec<DotPath>, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|path| Parser::parse(path.as_ref()))
            .collect()
    }

    fn parse_path(&mut self) -> Result<DotPath, PathError> {
        let mut segments = Vec::new();

        if self.is_eof() {
            return Ok(DotPath::default());
        }

        if self.peek() == Some(SEPARATOR) {
            return Err(self.error("path must not start with a separator"));
        }

        loop {
            segments.push(self.parse_segment()?);

            match self.next() {
                None => break,
                Some(SEPARATOR) => {
                    if self.is_eof() {
                        return Err(self.error("path must not end with a separator"));
                    }
                    if self.peek() == Some(SEPARATOR) {
                        return Err(self.error("consecutive separators"));
                    }
                }
                Some(ch) => {
                    // parse_segment stops only at a separator or the end
                    return Err(self.error(&format!("unexpected character '{}'", ch)));
                }
            }
        }

        Ok(DotPath::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Reads one segment up to the next separator.
    fn parse_segment(&mut self) -> Result<Segment, PathError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch == SEPARATOR {
                break;
            }
            self.next();
        }
        let token = &self.input[start..self.position];

        if token == WILDCARD {
            Ok(Segment::Wildcard)
        } else if token.contains(WILDCARD) {
            Err(PathError::InvalidPathSyntax {
                path: self.input.to_string(),
                position: start,
                message: format!("'{}' mixes '*' with other characters", token),
            })
        } else {
            Ok(Segment::Literal(token.to_string()))
        }
    }

    fn error(&self, message: &str) -> PathError {
        PathError::InvalidPathSyntax {
            path: self.input.to_string(),
            position: self.position,
            message: message.to_string(),
        }
    }
}
