use std::fmt;
use crate::types::Type;
use crate::error::SourceLocation;

/// 一条赋值语句：`TYPE IDENT = expression ;`
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub declared_type: Type,
    pub identifier: String,
    pub expression: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralValue),
    Binary(BinaryExpr),
}

/// 数值字面量，类型由字面量形式决定（是否含 `.`），与值无关
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl LiteralValue {
    pub fn literal_type(&self) -> Type {
        match self {
            LiteralValue::Int(_) => Type::Int,
            LiteralValue::Float(_) => Type::Double,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            LiteralValue::Int(v) => *v == 0,
            LiteralValue::Float(v) => *v == 0.0,
        }
    }
}

impl fmt::Display for LiteralValue {
    /// 浮点字面量按定点形式输出，且总是带小数点（`5.0` 而不是 `5`）
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(v) => write!(f, "{}", v),
            LiteralValue::Float(v) => {
                let text = v.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOp, right: Expr, loc: SourceLocation) -> Expr {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            loc,
        })
    }
}
