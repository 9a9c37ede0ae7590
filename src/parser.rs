use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{
    self, ArrayLiteral, BlockStatement, CallExpression, Expression, FunctionLiteral, HashLiteral,
    Identifier, IfExpression, IndexExpression, InfixExpression, InfixOperator, PrefixExpression,
    PrefixOperator, Statement,
};
use crate::token::{Token, TokenSource, TokenType};


#[derive(PartialOrd, Ord, PartialEq, Eq, Debug, Copy, Clone)]
pub enum Precedence {
    Lowest,
    Equals,
    // == or !=
    LessGreater,
    // > or <
    Sum,
    // + or -
    Product,
    // * or /
    Prefix,
    // -X or !X
    Call,
    // myFunction(X)
    Index,
    // array[index]
}

impl Precedence {
    fn of(token_type: TokenType) -> Precedence {
        match token_type {
            TokenType::Eq | TokenType::NotEq => Precedence::Equals,
            TokenType::Lt | TokenType::Gt => Precedence::LessGreater,
            TokenType::Plus | TokenType::Minus => Precedence::Sum,
            TokenType::Slash | TokenType::Asterisk => Precedence::Product,
            TokenType::LParen => Precedence::Call,
            TokenType::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

/// A syntax error recorded while parsing. Parsing continues after any of
/// these; the [`Display`](std::fmt::Display) text is what
/// [`Parser::errors`] reports.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenType, got: TokenType },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenType),
    #[error("could not parse {0} as integer")]
    InvalidInteger(String),
    #[error("illegal token '{0}'")]
    IllegalToken(String),
    #[error("expression nested too deeply (limit {0})")]
    NestingTooDeep(usize),
}

/// Deepest expression nesting accepted before parsing gives up on a
/// statement. Keeps pathological input from overflowing the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

type PrefixParseFn<S> = fn(&mut Parser<S>) -> Option<Expression>;
type InfixParseFn<S> = fn(&mut Parser<S>, Expression) -> Option<Expression>;

pub struct Parser<S> {
    l: S,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
    depth: usize,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(l: S) -> Parser<S> {
        let mut p = Parser {
            l,
            cur_token: Token::default(),
            peek_token: Token::default(),
            errors: Vec::new(),
            depth: 0,
        };

        p.next_token();
        p.next_token();
        p
    }

    fn prefix_parse_fn(token_type: TokenType) -> Option<PrefixParseFn<S>> {
        match token_type {
            TokenType::Ident => Some(Self::parse_identifier),
            TokenType::Int => Some(Self::parse_integer_literal),
            TokenType::String => Some(Self::parse_string_literal),
            TokenType::True | TokenType::False => Some(Self::parse_boolean),
            TokenType::Bang | TokenType::Minus => Some(Self::parse_prefix_expression),
            TokenType::LParen => Some(Self::parse_grouped_expression),
            TokenType::LBracket => Some(Self::parse_array_literal),
            TokenType::LBrace => Some(Self::parse_hash_literal),
            TokenType::If => Some(Self::parse_if_expression),
            TokenType::Function => Some(Self::parse_function_literal),
            TokenType::Illegal
            | TokenType::Eof
            | TokenType::Assign
            | TokenType::Asterisk
            | TokenType::Slash
            | TokenType::Lt
            | TokenType::Gt
            | TokenType::Eq
            | TokenType::NotEq
            | TokenType::Plus
            | TokenType::Comma
            | TokenType::Semicolon
            | TokenType::Colon
            | TokenType::RParen
            | TokenType::RBrace
            | TokenType::RBracket
            | TokenType::Let
            | TokenType::Else
            | TokenType::Return => None,
        }
    }

    fn infix_parse_fn(token_type: TokenType) -> Option<InfixParseFn<S>> {
        match token_type {
            TokenType::Plus
            | TokenType::Minus
            | TokenType::Asterisk
            | TokenType::Slash
            | TokenType::Lt
            | TokenType::Gt
            | TokenType::Eq
            | TokenType::NotEq => Some(Self::parse_infix_expression),
            TokenType::LParen => Some(Self::parse_call_expression),
            TokenType::LBracket => Some(Self::parse_index_expression),
            _ => None,
        }
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.l.next_token());
    }

    pub fn parse_program(&mut self) -> ast::Program {
        let mut program = ast::Program::default();

        while !self.cur_token_is(TokenType::Eof) {
            match self.parse_statement() {
                Some(statement) => program.statements.push(statement),
                None => self.synchronize(),
            }
            self.next_token();
        }

        program
    }

    /// Skips the remains of a statement that failed to parse, stopping on
    /// its terminator or just before something that starts a new statement.
    fn synchronize(&mut self) {
        while !self.cur_token_is(TokenType::Semicolon)
            && !self.cur_token_is(TokenType::Eof)
            && !self.peek_token_is(TokenType::Let)
            && !self.peek_token_is(TokenType::Return)
        {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type {
            TokenType::Let => self.parse_let_statement().map(Statement::Let),
            TokenType::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        let name = Identifier::new(self.cur_token.literal.clone());

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }

        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        self.next_token();

        let return_value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ReturnStatement { return_value })
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ExpressionStatement { expression })
    }

    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        let mut block = BlockStatement::default();

        self.next_token();

        while !self.cur_token_is(TokenType::RBrace) {
            if self.cur_token_is(TokenType::Eof) {
                // unclosed block
                self.push_error(ParseError::UnexpectedToken {
                    expected: TokenType::RBrace,
                    got: TokenType::Eof,
                });
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                block.statements.push(stmt);
            }
            self.next_token();
        }

        Some(block)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        if self.depth >= MAX_NESTING_DEPTH {
            self.push_error(ParseError::NestingTooDeep(MAX_NESTING_DEPTH));
            return None;
        }
        self.depth += 1;
        let expression = self.parse_nested_expression(precedence);
        self.depth -= 1;
        expression
    }

    fn parse_nested_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        trace!(token = %self.cur_token.token_type, depth = self.depth, ?precedence, "parse_expression");

        let Some(prefix) = Self::prefix_parse_fn(self.cur_token.token_type) else {
            self.no_prefix_parse_fn_error();
            return None;
        };
        let mut left_exp = prefix(self)?;

        while !self.peek_token_is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = Self::infix_parse_fn(self.peek_token.token_type) else {
                return Some(left_exp);
            };
            self.next_token();
            left_exp = infix(self, left_exp)?;
        }

        Some(left_exp)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::new(self.cur_token.literal.clone())))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(value)),
            Err(_) => {
                self.push_error(ParseError::InvalidInteger(self.cur_token.literal.clone()));
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::StringLiteral(self.cur_token.literal.clone()))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token_is(TokenType::True)))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = PrefixOperator::from_token(self.cur_token.token_type)?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(PrefixExpression {
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = InfixOperator::from_token(self.cur_token.token_type)?;

        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let exp = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(exp)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement()?;

        let mut alternative = None;
        if self.peek_token_is(TokenType::Else) {
            self.next_token();

            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }

            alternative = Some(self.parse_block_statement()?);
        }

        Some(Expression::If(IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let body = self.parse_block_statement()?;

        Some(Expression::FunctionLiteral(FunctionLiteral {
            parameters: parameters.into(),
            body: Rc::new(body),
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut identifiers = Vec::new();

        if self.peek_token_is(TokenType::RParen) {
            self.next_token();
            return Some(identifiers);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        identifiers.push(Identifier::new(self.cur_token.literal.clone()));

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            identifiers.push(Identifier::new(self.cur_token.literal.clone()));
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenType::RParen)?;
        Some(Expression::Call(CallExpression {
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RBracket) {
            return None;
        }

        Some(Expression::Index(IndexExpression {
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenType::RBracket)?;
        Some(Expression::ArrayLiteral(ArrayLiteral { elements }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();

        while !self.peek_token_is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenType::Colon) {
                return None;
            }

            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_token_is(TokenType::RBrace) && !self.expect_peek(TokenType::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBrace) {
            return None;
        }

        Some(Expression::HashLiteral(HashLiteral { pairs }))
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek_token.token_type)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur_token.token_type)
    }

    /// Diagnostics in the order they were found, rendered as text.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn parse_errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn push_error(&mut self, error: ParseError) {
        debug!(%error, "syntax error");
        self.errors.push(error);
    }

    fn no_prefix_parse_fn_error(&mut self) {
        let error = match self.cur_token.token_type {
            TokenType::Illegal => ParseError::IllegalToken(self.cur_token.literal.clone()),
            t => ParseError::NoPrefixParseFn(t),
        };
        self.push_error(error);
    }

    fn peek_error(&mut self, expected: TokenType) {
        let got = self.peek_token.token_type;
        self.push_error(ParseError::UnexpectedToken { expected, got });
    }

    fn cur_token_is(&self, t: TokenType) -> bool {
        self.cur_token.token_type == t
    }

    fn peek_token_is(&self, t: TokenType) -> bool {
        self.peek_token.token_type == t
    }

    fn expect_peek(&mut self, t: TokenType) -> bool {
        if self.peek_token_is(t) {
            self.next_token();
            true
        } else {
            self.peek_error(t);
            false
        }
    }
}
