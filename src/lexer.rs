use crate::token::{Token, TokenSource, TokenType};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    // current position in input (points to current char)
    read_position: usize,
    // current reading position in input (after current char)
    ch: Option<char>, // current char under examination, None at end of input
}

impl Lexer {
    pub fn new(input: &str) -> Lexer {
        let mut l = Lexer {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: None,
        };
        l.read_char();
        l
    }

    fn read_char(&mut self) {
        self.ch = self.input.get(self.read_position).copied();
        self.position = self.read_position;
        if self.read_position <= self.input.len() {
            self.read_position += 1;
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while self.ch.is_some_and(|c| is_letter(c) || c.is_ascii_digit()) {
            self.read_char();
        }
        self.slice(start, self.position)
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_some_and(|c| c.is_ascii_digit()) {
            self.read_char();
        }
        self.slice(start, self.position)
    }

    /// Reads the body of a string literal. Returns `None` when the input
    /// ends before the closing quote.
    fn read_string(&mut self) -> Option<String> {
        let start = self.position + 1;
        loop {
            self.read_char();
            match self.ch {
                Some('"') => return Some(self.slice(start, self.position)),
                None => return None,
                Some(_) => {}
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_some_and(char::is_whitespace) {
            self.read_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.ch else {
            return Token::eof();
        };

        let tok = match ch {
            '=' => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    Token::new(TokenType::Eq, "==")
                } else {
                    Token::new(TokenType::Assign, "=")
                }
            }
            '!' => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    Token::new(TokenType::NotEq, "!=")
                } else {
                    Token::new(TokenType::Bang, "!")
                }
            }
            ';' => Token::new(TokenType::Semicolon, ";"),
            ':' => Token::new(TokenType::Colon, ":"),
            ',' => Token::new(TokenType::Comma, ","),
            '(' => Token::new(TokenType::LParen, "("),
            ')' => Token::new(TokenType::RParen, ")"),
            '{' => Token::new(TokenType::LBrace, "{"),
            '}' => Token::new(TokenType::RBrace, "}"),
            '[' => Token::new(TokenType::LBracket, "["),
            ']' => Token::new(TokenType::RBracket, "]"),
            '+' => Token::new(TokenType::Plus, "+"),
            '-' => Token::new(TokenType::Minus, "-"),
            '*' => Token::new(TokenType::Asterisk, "*"),
            '/' => Token::new(TokenType::Slash, "/"),
            '<' => Token::new(TokenType::Lt, "<"),
            '>' => Token::new(TokenType::Gt, ">"),
            '"' => match self.read_string() {
                Some(literal) => Token::new(TokenType::String, literal),
                // unterminated; the rest of the input has been consumed
                None => return Token::new(TokenType::Illegal, "\""),
            },
            c if is_letter(c) => {
                let literal = self.read_identifier();
                return Token::new(TokenType::lookup_ident(&literal), literal);
            }
            c if c.is_ascii_digit() => {
                return Token::new(TokenType::Int, self.read_number());
            }
            c => Token::new(TokenType::Illegal, c.to_string()),
        };

        self.read_char();
        tok
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::Lexer;
    use crate::token::TokenType;

    fn assert_tokens(input: &str, expected: &[(TokenType, &str)]) {
        let mut lexer = Lexer::new(input);
        for (i, (expected_type, expected_literal)) in expected.iter().enumerate() {
            let tok = lexer.next_token();

            assert_eq!(tok.token_type, *expected_type, "Test[{}] - TokenType wrong. Expected {:?}, got {:?}", i, expected_type, tok.token_type);
            assert_eq!(tok.literal, *expected_literal, "Test[{}] - Literal wrong. Expected {:?}, got {:?}", i, expected_literal, tok.literal);
        }
    }

    #[test]
    fn test_next_token() {
        assert_tokens("=+(){},;", &[
            (TokenType::Assign, "="),
            (TokenType::Plus, "+"),
            (TokenType::LParen, "("),
            (TokenType::RParen, ")"),
            (TokenType::LBrace, "{"),
            (TokenType::RBrace, "}"),
            (TokenType::Comma, ","),
            (TokenType::Semicolon, ";"),
            (TokenType::Eof, ""),
        ]);
    }

    #[test]
    fn test_next_token_program() {
        let input = r#"let sq = fn(n) { n * n };
if (sq(3) != 9) { return !false; } else { -1 / 2 }
let m = {"k": [a1, 7]};
m["k"] == 0 < 1 > 2;
"#;

        assert_tokens(input, &[
            (TokenType::Let, "let"),
            (TokenType::Ident, "sq"),
            (TokenType::Assign, "="),
            (TokenType::Function, "fn"),
            (TokenType::LParen, "("),
            (TokenType::Ident, "n"),
            (TokenType::RParen, ")"),
            (TokenType::LBrace, "{"),
            (TokenType::Ident, "n"),
            (TokenType::Asterisk, "*"),
            (TokenType::Ident, "n"),
            (TokenType::RBrace, "}"),
            (TokenType::Semicolon, ";"),
            (TokenType::If, "if"),
            (TokenType::LParen, "("),
            (TokenType::Ident, "sq"),
            (TokenType::LParen, "("),
            (TokenType::Int, "3"),
            (TokenType::RParen, ")"),
            (TokenType::NotEq, "!="),
            (TokenType::Int, "9"),
            (TokenType::RParen, ")"),
            (TokenType::LBrace, "{"),
            (TokenType::Return, "return"),
            (TokenType::Bang, "!"),
            (TokenType::False, "false"),
            (TokenType::Semicolon, ";"),
            (TokenType::RBrace, "}"),
            (TokenType::Else, "else"),
            (TokenType::LBrace, "{"),
            (TokenType::Minus, "-"),
            (TokenType::Int, "1"),
            (TokenType::Slash, "/"),
            (TokenType::Int, "2"),
            (TokenType::RBrace, "}"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "m"),
            (TokenType::Assign, "="),
            (TokenType::LBrace, "{"),
            (TokenType::String, "k"),
            (TokenType::Colon, ":"),
            (TokenType::LBracket, "["),
            (TokenType::Ident, "a1"),
            (TokenType::Comma, ","),
            (TokenType::Int, "7"),
            (TokenType::RBracket, "]"),
            (TokenType::RBrace, "}"),
            (TokenType::Semicolon, ";"),
            (TokenType::Ident, "m"),
            (TokenType::LBracket, "["),
            (TokenType::String, "k"),
            (TokenType::RBracket, "]"),
            (TokenType::Eq, "=="),
            (TokenType::Int, "0"),
            (TokenType::Lt, "<"),
            (TokenType::Int, "1"),
            (TokenType::Gt, ">"),
            (TokenType::Int, "2"),
            (TokenType::Semicolon, ";"),
            (TokenType::Eof, ""),
        ]);
    }

    #[test]
    fn test_non_ascii_input() {
        assert_tokens("\"héllo wörld\" @ x_1", &[
            (TokenType::String, "héllo wörld"),
            (TokenType::Illegal, "@"),
            (TokenType::Ident, "x_1"),
            (TokenType::Eof, ""),
            (TokenType::Eof, ""),
        ]);
    }

    #[test]
    fn test_unterminated_string() {
        assert_tokens("\"abc", &[
            (TokenType::Illegal, "\""),
            (TokenType::Eof, ""),
        ]);
    }
}
