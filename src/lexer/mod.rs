use std::fmt;
use logos::Logos;
use tracing::debug;
use crate::error::{MathResult, lexer_error};
use crate::error::SourceLocation;

/// 错误信息中附带的源码片段最大字符数
const SNIPPET_LEN: usize = 10;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f\r\x0b]+")]
pub enum TokenKind {
    // 类型关键字
    #[token("int")]
    #[token("double")]
    Type,

    // 标识符
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Ident,

    #[token("=")]
    Assign,

    // 字面量：digits 或 digits.digits
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    // 运算符
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    Op,

    #[token(";")]
    Semicolon,

    // 换行（用于跟踪行号）
    #[token("\n")]
    Newline,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Type => "TYPE",
            TokenKind::Ident => "IDENT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Number => "NUMBER",
            TokenKind::Op => "OP",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Newline => "NEWLINE",
        };
        f.write_str(name)
    }
}

/// 词法单元：(kind, lexeme) 以及它在源码中的位置
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub loc: SourceLocation,
}

pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, TokenKind>,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            line: 1,
            line_start: 0,
        }
    }

    pub fn tokenize(&mut self) -> MathResult<Vec<Token>> {
        if self.source.is_empty() {
            return Err(lexer_error(1, 1, "empty input"));
        }

        let mut tokens = Vec::new();

        while let Some(result) = self.inner.next() {
            let span = self.inner.span();
            let loc = SourceLocation {
                line: self.line,
                column: self.source[self.line_start..span.start].chars().count() + 1,
            };

            match result {
                Ok(TokenKind::Newline) => {
                    // 不保留换行 token
                    self.line += 1;
                    self.line_start = span.end;
                }
                Ok(kind) => {
                    tokens.push(Token {
                        kind,
                        lexeme: self.inner.slice().to_string(),
                        loc,
                    });
                }
                Err(_) => {
                    let snippet: String = self.source[span.start..]
                        .chars()
                        .take_while(|c| *c != '\n')
                        .take(SNIPPET_LEN)
                        .collect();
                    return Err(lexer_error(
                        loc.line,
                        loc.column,
                        format!("unrecognized input at position {}: '{}'", span.start, snippet),
                    ));
                }
            }
        }

        if tokens.is_empty() {
            return Err(lexer_error(self.line, 1, "empty input"));
        }

        debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }
}

pub fn lex(source: &str) -> MathResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    lexer.tokenize()
}

/// 只取出 token 的种类序列
pub fn token_kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}
