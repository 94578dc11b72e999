/// Lexer that splits a raw input line into tokens
///
/// A token is a maximal run of non-whitespace characters and double-quoted
/// fragments. Quotes are stripped, whitespace inside them is kept. There is
/// no escape mechanism.
struct Lexer {
    position: usize,
    chars: Vec<char>,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            position: 0,
            chars: input.chars().collect(),
        }
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Advance to the next character and return the current one
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Position of the quote closing the one at the cursor, if any
    fn closing_quote(&self) -> Option<usize> {
        self.chars[self.position + 1..]
            .iter()
            .position(|&c| c == '"')
            .map(|offset| self.position + 1 + offset)
    }

    /// Read one token starting at the cursor
    ///
    /// Returns `None` when nothing matches here, which only happens on a
    /// quote that is never closed.
    fn read_token(&mut self) -> Option<String> {
        let mut token = String::new();
        let mut matched = false;

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    let Some(end) = self.closing_quote() else {
                        break;
                    };
                    token.extend(&self.chars[self.position + 1..end]);
                    self.position = end + 1;
                    matched = true;
                }
                c if c.is_whitespace() => break,
                c => {
                    token.push(c);
                    self.advance();
                    matched = true;
                }
            }
        }

        matched.then_some(token)
    }

    fn tokenize(&mut self) -> Vec<String> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }
            match self.read_token() {
                Some(token) => tokens.push(token),
                // Unpaired quote: drop it and keep scanning
                None => {
                    self.advance();
                }
            }
        }
        tokens
    }
}

/// Split a command line into tokens
///
/// # Examples
/// ```
/// use cmdnode::command::tokenize;
///
/// assert_eq!(tokenize(r#"set "hello world" 3"#), vec!["set", "hello world", "3"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    Lexer::new(line).tokenize()
}
