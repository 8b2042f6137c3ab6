//! 语法分析器
//!
//! 语言只有一种语句形式 `TYPE IDENT = NUMBER OP NUMBER ;`，
//! 因此这里按固定的七个 token 逐个匹配，而不是做通用的递归下降。

mod literals;

use tracing::debug;
use crate::ast::{BinaryOp, Expr, Statement};
use crate::error::{MathError, MathResult, SourceLocation, parser_error};
use crate::lexer::{Token, TokenKind};
use crate::types::Type;

/// 一条语句必须严格匹配的 token 序列
pub const STATEMENT_SHAPE: [TokenKind; 7] = [
    TokenKind::Type,
    TokenKind::Ident,
    TokenKind::Assign,
    TokenKind::Number,
    TokenKind::Op,
    TokenKind::Number,
    TokenKind::Semicolon,
];

/// 语法分析器
pub struct Parser {
    /// 令牌流
    pub tokens: Vec<Token>,
    /// 当前解析位置
    pub pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// 解析一条赋值语句
    pub fn parse(&mut self) -> MathResult<Statement> {
        let start = self.pos;
        for expected in STATEMENT_SHAPE {
            self.consume(expected)?;
        }

        if let Some(extra) = self.tokens.get(self.pos) {
            return Err(parser_error(
                extra.loc,
                format!(
                    "expected end of input after SEMICOLON, found {} '{}' at position {}",
                    extra.kind,
                    extra.lexeme,
                    self.pos + 1
                ),
            ));
        }

        // token 种类已经匹配，这里再校验词素本身
        let matched = &self.tokens[start..self.pos];
        let (type_token, ident_token, assign_token) = (&matched[0], &matched[1], &matched[2]);
        let (left_token, op_token, right_token) = (&matched[3], &matched[4], &matched[5]);
        let semi_token = &matched[6];

        let declared_type = Type::from_keyword(&type_token.lexeme).ok_or_else(|| {
            parser_error(type_token.loc, format!("unknown type '{}'", type_token.lexeme))
        })?;

        if !is_valid_identifier(&ident_token.lexeme) {
            return Err(parser_error(
                ident_token.loc,
                format!("invalid identifier '{}'", ident_token.lexeme),
            ));
        }

        expect_lexeme(assign_token, "=")?;
        expect_lexeme(semi_token, ";")?;

        let op = BinaryOp::from_symbol(&op_token.lexeme).ok_or_else(|| {
            parser_error(op_token.loc, format!("unknown operator '{}'", op_token.lexeme))
        })?;

        let left = literals::parse_number(left_token)?;
        let right = literals::parse_number(right_token)?;

        debug!(identifier = %ident_token.lexeme, %declared_type, %op, "parsed statement");

        Ok(Statement {
            declared_type,
            identifier: ident_token.lexeme.clone(),
            expression: Expr::binary(Expr::Literal(left), op, Expr::Literal(right), op_token.loc),
            loc: type_token.loc,
        })
    }

    fn consume(&mut self, expected: TokenKind) -> MathResult<()> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(parser_error(
                token.loc,
                format!(
                    "expected {} at position {}, found {} '{}'",
                    expected,
                    self.pos + 1,
                    token.kind,
                    token.lexeme
                ),
            )),
            None => Err(self.error_at_end(expected)),
        }
    }

    fn error_at_end(&self, expected: TokenKind) -> MathError {
        let loc = self
            .tokens
            .last()
            .map(|t| SourceLocation {
                line: t.loc.line,
                column: t.loc.column + t.lexeme.chars().count(),
            })
            .unwrap_or(SourceLocation { line: 1, column: 1 });
        parser_error(
            loc,
            format!(
                "expected {} at position {}, found end of input",
                expected,
                self.pos + 1
            ),
        )
    }
}

fn expect_lexeme(token: &Token, lexeme: &str) -> MathResult<()> {
    if token.lexeme == lexeme {
        Ok(())
    } else {
        Err(parser_error(
            token.loc,
            format!("expected '{}', found '{}'", lexeme, token.lexeme),
        ))
    }
}

/// 标识符：字母开头，后跟字母或数字
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// 解析令牌流生成 AST
pub fn parse(tokens: Vec<Token>) -> MathResult<Statement> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}
