//! 字面量结果计算
//!
//! 前置条件：语句已经通过类型检查（特别是除零检查），这里不再重复检查。
//! 整数运算使用 checked 运算，溢出报告为代码生成错误。

use std::fmt;
use tracing::debug;
use crate::ast::*;
use crate::error::{MathError, MathResult};
use crate::types::Type;

/// 浮点结果输出的最大有效数字位数
pub const SIGNIFICANT_DIGITS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn render(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => format_significant(*v, SIGNIFICANT_DIGITS),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Value::Int(v) => *v as f64,
            Value::Float(v) => *v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<LiteralValue> for Value {
    fn from(lit: LiteralValue) -> Self {
        match lit {
            LiteralValue::Int(v) => Value::Int(v),
            LiteralValue::Float(v) => Value::Float(v),
        }
    }
}

/// 计算语句的值：`int` 向零截断，`double` 保持浮点
pub fn evaluate(stmt: &Statement) -> MathResult<Value> {
    let raw = eval_expr(&stmt.expression)?;
    let value = match (stmt.declared_type, raw) {
        (Type::Int, Value::Int(v)) => Value::Int(v),
        (Type::Int, Value::Float(v)) => {
            let truncated = v.trunc();
            if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
                return Err(MathError::CodeGen(format!("{} does not fit in int", v)));
            }
            Value::Int(truncated as i64)
        }
        (Type::Double, v) => Value::Float(v.as_f64()),
    };
    debug!(identifier = %stmt.identifier, %value, "computed result");
    Ok(value)
}

fn eval_expr(expr: &Expr) -> MathResult<Value> {
    match expr {
        Expr::Literal(lit) => Ok(Value::from(*lit)),
        Expr::Binary(bin) => {
            let left = eval_expr(&bin.left)?;
            let right = eval_expr(&bin.right)?;
            match (left, right) {
                (Value::Int(l), Value::Int(r)) => eval_int(bin.op, l, r),
                (l, r) => eval_float(bin.op, l.as_f64(), r.as_f64()),
            }
        }
    }
}

fn eval_int(op: BinaryOp, l: i64, r: i64) -> MathResult<Value> {
    let result = match op {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Sub => l.checked_sub(r),
        BinaryOp::Mul => l.checked_mul(r),
        BinaryOp::Div => l.checked_div(r),
    };
    result
        .map(Value::Int)
        .ok_or_else(|| MathError::CodeGen(format!("integer overflow in {} {} {}", l, op, r)))
}

fn eval_float(op: BinaryOp, l: f64, r: f64) -> MathResult<Value> {
    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
    };
    if result.is_finite() {
        Ok(Value::Float(result))
    } else {
        Err(MathError::CodeGen(format!("{} {} {} is not a finite number", l, op, r)))
    }
}

/// 按最多 `digits` 位有效数字舍入后以定点形式输出，去掉末尾多余的 0，
/// 但总保留一位小数（`7.0` 而不是 `7`）
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }

    // 先按科学计数法舍入到指定位数，再转回浮点数
    let sci = format!("{:.*e}", digits.max(1) - 1, value);
    let rounded = sci.parse::<f64>().unwrap_or(value);

    // f64 的 Display 总是定点形式，并给出最短的精确表示
    let text = rounded.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}
