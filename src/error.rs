use thiserror::Error;
use std::fmt;

/// 编译流水线的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
    Ir,
    CodeGen,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Lexical => write!(f, "lexical analysis"),
            Phase::Syntax => write!(f, "syntax analysis"),
            Phase::Semantic => write!(f, "semantic analysis"),
            Phase::Ir => write!(f, "intermediate code generation"),
            Phase::CodeGen => write!(f, "assembly generation"),
        }
    }
}

/// 语义错误的细分类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    MalformedAst,
    UnsupportedOperator,
    NonNumericOperand,
    DivisionByZero,
    MixedTypeExpression,
    TypeMismatch,
}

impl fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SemanticErrorKind::MalformedAst => "malformed AST",
            SemanticErrorKind::UnsupportedOperator => "unsupported operator",
            SemanticErrorKind::NonNumericOperand => "non-numeric operand",
            SemanticErrorKind::DivisionByZero => "division by zero",
            SemanticErrorKind::MixedTypeExpression => "mixed-type expression",
            SemanticErrorKind::TypeMismatch => "type mismatch",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("LexicalError at line {line}, column {column}: {message}")]
    Lexer { line: usize, column: usize, message: String },

    #[error("SyntaxError at line {line}, column {column}: {message}")]
    Parser { line: usize, column: usize, message: String },

    #[error("SemanticError: {kind}: {message}")]
    Semantic { kind: SemanticErrorKind, message: String },

    #[error("IRError: {0}")]
    Ir(String),

    #[error("CodegenError: {0}")]
    CodeGen(String),
}

impl MathError {
    /// 出错的阶段
    pub fn phase(&self) -> Phase {
        match self {
            MathError::Lexer { .. } => Phase::Lexical,
            MathError::Parser { .. } => Phase::Syntax,
            MathError::Semantic { .. } => Phase::Semantic,
            MathError::Ir(_) => Phase::Ir,
            MathError::CodeGen(_) => Phase::CodeGen,
        }
    }

    pub fn semantic_kind(&self) -> Option<SemanticErrorKind> {
        match self {
            MathError::Semantic { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// 带位置信息的错误返回 (行, 列)
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            MathError::Lexer { line, column, .. } | MathError::Parser { line, column, .. } => {
                Some(SourceLocation { line: *line, column: *column })
            }
            _ => None,
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub fn lexer_error(line: usize, column: usize, message: impl Into<String>) -> MathError {
    MathError::Lexer {
        line,
        column,
        message: message.into(),
    }
}

pub fn parser_error(loc: SourceLocation, message: impl Into<String>) -> MathError {
    MathError::Parser {
        line: loc.line,
        column: loc.column,
        message: message.into(),
    }
}

pub fn semantic_error(kind: SemanticErrorKind, message: impl Into<String>) -> MathError {
    MathError::Semantic {
        kind,
        message: message.into(),
    }
}

/// 渲染带源码上下文的错误信息，在出错列下方标出 `^`
pub fn render_error_with_context(error: &MathError, source: &str) -> String {
    let mut out = format!("error: {}\n", error);

    if let Some(loc) = error.location() {
        if let Some(line_text) = source.lines().nth(loc.line.saturating_sub(1)) {
            let gutter = loc.line.to_string();
            out.push_str(&format!("{} | {}\n", gutter, line_text));
            let pad = " ".repeat(gutter.len() + 3 + loc.column.saturating_sub(1));
            out.push_str(&format!("{}^\n", pad));
        }
    }

    out
}

/// 打印带源码上下文的错误信息到 stderr
pub fn print_error_with_context(error: &MathError, source: &str) {
    eprint!("{}", render_error_with_context(error, source));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_points_at_column() {
        let err = lexer_error(1, 9, "unexpected input '%'");
        let rendered = render_error_with_context(&err, "int w = 9 % 2;");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "1 | int w = 9 % 2;");
        assert_eq!(lines[2].find('^'), Some(4 + 8));
    }

    #[test]
    fn test_phase_of_each_variant() {
        assert_eq!(lexer_error(1, 1, "x").phase(), Phase::Lexical);
        assert_eq!(
            semantic_error(SemanticErrorKind::TypeMismatch, "x").phase(),
            Phase::Semantic
        );
        assert_eq!(MathError::Ir("x".into()).phase(), Phase::Ir);
        assert_eq!(MathError::CodeGen("x".into()).phase(), Phase::CodeGen);
    }

    #[test]
    fn test_semantic_display_names_kind() {
        let err = semantic_error(SemanticErrorKind::DivisionByZero, "right operand of '/' is 0");
        assert_eq!(
            err.to_string(),
            "SemanticError: division by zero: right operand of '/' is 0"
        );
    }
}
