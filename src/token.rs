use std::collections::HashMap;
use std::fmt::{self, Display};
use lazy_static::lazy_static;


#[derive(Debug, Clone, PartialEq, Hash, Copy, Eq, Default)]
pub enum TokenType {
    #[default]
    Illegal,
    Eof,
    Ident,
    Int,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq, // ==
    NotEq, // !=

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = {
        let mut m = HashMap::new();
        m.insert("fn", TokenType::Function);
        m.insert("let", TokenType::Let);
        m.insert("true", TokenType::True);
        m.insert("false", TokenType::False);
        m.insert("if", TokenType::If);
        m.insert("else", TokenType::Else);
        m.insert("return", TokenType::Return);
        m
    };
}

impl TokenType {
    pub fn lookup_ident(ident: &str) -> Self {
        KEYWORDS.get(ident).copied().unwrap_or(TokenType::Ident)
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::Eof => "EOF",
            TokenType::Ident => "IDENT",
            TokenType::Int => "INT",
            TokenType::String => "STRING",
            TokenType::Assign => "=",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Bang => "!",
            TokenType::Asterisk => "*",
            TokenType::Slash => "/",
            TokenType::Lt => "<",
            TokenType::Gt => ">",
            TokenType::Eq => "==",
            TokenType::NotEq => "!=",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Colon => ":",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBrace => "{",
            TokenType::RBrace => "}",
            TokenType::LBracket => "[",
            TokenType::RBracket => "]",
            TokenType::Function => "FUNCTION",
            TokenType::Let => "LET",
            TokenType::True => "TRUE",
            TokenType::False => "FALSE",
            TokenType::If => "IF",
            TokenType::Else => "ELSE",
            TokenType::Return => "RETURN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
}

impl Token {
    pub fn new(token_type: TokenType, literal: impl Into<String>) -> Self {
        Token {
            token_type,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenType::Eof, "")
    }
}

/// Pull-based supplier of tokens for the parser.
///
/// Once the input is exhausted an implementation must keep returning
/// `Eof` tokens for every further request.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Adapts any token iterator into a [`TokenSource`].
///
/// The iterator does not need to end with an `Eof` token; one is
/// synthesized after the last item.
pub struct Tokens<I> {
    iter: I,
}

impl<I: Iterator<Item = Token>> Tokens<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Tokens { iter: iter.into_iter() }
    }
}

impl<I: Iterator<Item = Token>> TokenSource for Tokens<I> {
    fn next_token(&mut self) -> Token {
        self.iter.next().unwrap_or_else(Token::eof)
    }
}
