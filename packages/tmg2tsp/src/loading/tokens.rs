//! A whitespace token cursor over a buffered reader. TMG files are mostly
//! token oriented, with tokens free to cross line breaks, except for the
//! shaping points at the end of an edge line which run to the end of that
//! line. The cursor supports both kinds of read.

use std::io::BufRead;
use std::str::FromStr;

/// Reads whitespace separated tokens, keeping the current line so that its
/// remainder can be taken whole
pub struct TokenReader<R> {
    reader: R,
    line: String,
    pos: usize,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        TokenReader {
            reader,
            line: String::new(),
            pos: 0,
        }
    }

    /// Move the cursor to the start of the next token, reading further lines
    /// as needed. Returns false once the input is exhausted
    fn skip_whitespace(&mut self) -> std::io::Result<bool> {
        loop {
            let rest = &self.line[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if !trimmed.is_empty() {
                return Ok(true);
            }

            self.line.clear();
            self.pos = 0;
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(false);
            }
        }
    }

    /// Read the next whitespace delimited token, or None at end of input
    pub fn next_token(&mut self) -> std::io::Result<Option<String>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }

        let rest = &self.line[self.pos..];
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = rest[..len].to_string();
        self.pos += len;

        Ok(Some(token))
    }

    /// Read the next token and parse it. Both end of input and a token which
    /// does not parse are reported as None
    pub fn next_value<T: FromStr>(&mut self) -> std::io::Result<Option<T>> {
        Ok(self.next_token()?.and_then(|token| token.parse().ok()))
    }

    /// Consume whatever remains of the current line, without the surrounding
    /// whitespace. Empty if the line has nothing left
    pub fn rest_of_line(&mut self) -> String {
        let rest = self.line[self.pos..].trim().to_string();
        self.pos = self.line.len();
        rest
    }
}

#[cfg(test)]
mod tests {

    use std::io::Cursor;

    use super::*;

    fn reader(text: &str) -> TokenReader<Cursor<Vec<u8>>> {
        TokenReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    fn next(tokens: &mut TokenReader<Cursor<Vec<u8>>>) -> Option<String> {
        match tokens.next_token() {
            Ok(token) => token,
            Err(err) => panic!("Read failed: {err}"),
        }
    }

    #[test]
    fn test_tokens_cross_lines() {
        let mut tokens = reader("TMG 1.0\n  simple\n\n3 2\n");

        let mut found = Vec::new();
        while let Some(token) = next(&mut tokens) {
            found.push(token);
        }

        assert_eq!(found, vec!["TMG", "1.0", "simple", "3", "2"]);
    }

    #[test]
    fn test_next_value() {
        let mut tokens = reader("12 -3.5 abc");

        assert_eq!(tokens.next_value::<usize>().ok(), Some(Some(12)));
        assert_eq!(tokens.next_value::<f64>().ok(), Some(Some(-3.5)));
        assert_eq!(tokens.next_value::<f64>().ok(), Some(None));
        assert_eq!(tokens.next_value::<f64>().ok(), Some(None));
    }

    #[test]
    fn test_rest_of_line() {
        let mut tokens = reader("0 1 I-90 42.1 -73.2 42.2 -73.3\n1 2 I-87\n");

        assert_eq!(next(&mut tokens), Some("0".to_string()));
        assert_eq!(next(&mut tokens), Some("1".to_string()));
        assert_eq!(next(&mut tokens), Some("I-90".to_string()));
        assert_eq!(tokens.rest_of_line(), "42.1 -73.2 42.2 -73.3");

        assert_eq!(next(&mut tokens), Some("1".to_string()));
        assert_eq!(next(&mut tokens), Some("2".to_string()));
        assert_eq!(next(&mut tokens), Some("I-87".to_string()));
        assert_eq!(tokens.rest_of_line(), "");
        assert_eq!(next(&mut tokens), None);
    }

    #[test]
    fn test_rest_of_line_without_trailing_newline() {
        let mut tokens = reader("0 1 I-90 42.1 -73.2");

        for _ in 0..3 {
            next(&mut tokens);
        }

        assert_eq!(tokens.rest_of_line(), "42.1 -73.2");
    }
}
