//! 数值字面量转换
//!
//! 含 `.` 的词素转换为浮点值，否则为整数值。

use crate::ast::LiteralValue;
use crate::error::{MathResult, parser_error};
use crate::lexer::Token;

pub(super) fn parse_number(token: &Token) -> MathResult<LiteralValue> {
    let text = token.lexeme.as_str();

    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(parser_error(token.loc, format!("invalid number '{}'", text)));
    }

    if text.contains('.') {
        text.parse::<f64>()
            .map(LiteralValue::Float)
            .map_err(|e| parser_error(token.loc, format!("invalid number '{}': {}", text, e)))
    } else {
        text.parse::<i64>()
            .map(LiteralValue::Int)
            .map_err(|e| parser_error(token.loc, format!("invalid number '{}': {}", text, e)))
    }
}
