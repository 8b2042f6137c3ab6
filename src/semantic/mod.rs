//! 语义分析（类型检查）
//!
//! 检查按固定顺序进行：AST 结构、运算符、操作数、除零、操作数类型一致、
//! 声明类型匹配。除零检查在类型检查之前，所以 `double u = 9.2 / 0;`
//! 报告的是除零而不是混合类型。
//!
//! 不做隐式的 int/double 提升。

mod symbol_table;

pub use symbol_table::{SemanticSymbolInfo, SymbolTable};

use tracing::{debug, warn};
use crate::ast::*;
use crate::error::{MathResult, SemanticErrorKind, semantic_error};
use crate::parser::is_valid_identifier;
use crate::types::Type;

/// 语义分析器
#[derive(Debug, Default)]
pub struct SemanticAnalyzer;

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// 检查语句，通过后把变量登记到符号表，返回表达式类型
    pub fn analyze(&self, stmt: &Statement, symbols: &mut SymbolTable) -> MathResult<Type> {
        self.check_structure(stmt)?;
        self.check_operators(&stmt.expression)?;
        self.check_operands(&stmt.expression)?;
        self.check_division_by_zero(&stmt.expression)?;

        let expr_type = self.infer_expr_type(&stmt.expression)?;
        if expr_type != stmt.declared_type {
            return Err(semantic_error(
                SemanticErrorKind::TypeMismatch,
                format!(
                    "cannot assign {} expression to '{}' declared as {}",
                    expr_type, stmt.identifier, stmt.declared_type
                ),
            ));
        }

        if let Some(previous) = symbols.declare(&stmt.identifier, stmt.declared_type) {
            if previous.symbol_type != stmt.declared_type {
                warn!(
                    identifier = %stmt.identifier,
                    from = %previous.symbol_type,
                    to = %stmt.declared_type,
                    "redeclaration changes variable type"
                );
            }
        }

        debug!(identifier = %stmt.identifier, %expr_type, "type check passed");
        Ok(expr_type)
    }

    fn check_structure(&self, stmt: &Statement) -> MathResult<()> {
        if !is_valid_identifier(&stmt.identifier) {
            return Err(semantic_error(
                SemanticErrorKind::MalformedAst,
                format!("invalid identifier '{}'", stmt.identifier),
            ));
        }
        if let Expr::Literal(_) = stmt.expression {
            return Err(semantic_error(
                SemanticErrorKind::MalformedAst,
                "expression must be a binary operation",
            ));
        }
        Ok(())
    }

    fn check_operators(&self, expr: &Expr) -> MathResult<()> {
        match expr {
            Expr::Literal(_) => Ok(()),
            Expr::Binary(bin) => {
                // 目前 BinaryOp 只有四种算术运算符；新增运算符时在这里决定是否
                // 报告 UnsupportedOperator
                match bin.op {
                    BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {}
                }
                self.check_operators(&bin.left)?;
                self.check_operators(&bin.right)
            }
        }
    }

    fn check_operands(&self, expr: &Expr) -> MathResult<()> {
        match expr {
            Expr::Literal(LiteralValue::Int(_)) => Ok(()),
            Expr::Literal(LiteralValue::Float(v)) => {
                if v.is_finite() {
                    Ok(())
                } else {
                    Err(semantic_error(
                        SemanticErrorKind::NonNumericOperand,
                        format!("operand {} is not a finite number", v),
                    ))
                }
            }
            Expr::Binary(bin) => {
                self.check_operands(&bin.left)?;
                self.check_operands(&bin.right)
            }
        }
    }

    fn check_division_by_zero(&self, expr: &Expr) -> MathResult<()> {
        if let Expr::Binary(bin) = expr {
            if bin.op == BinaryOp::Div {
                if let Expr::Literal(lit) = bin.right.as_ref() {
                    if lit.is_zero() {
                        return Err(semantic_error(
                            SemanticErrorKind::DivisionByZero,
                            format!("right operand of '/' is {}", lit),
                        ));
                    }
                }
            }
            self.check_division_by_zero(&bin.left)?;
            self.check_division_by_zero(&bin.right)?;
        }
        Ok(())
    }

    /// 推断表达式类型，两侧操作数类型必须相同
    fn infer_expr_type(&self, expr: &Expr) -> MathResult<Type> {
        match expr {
            Expr::Literal(lit) => Ok(lit.literal_type()),
            Expr::Binary(bin) => {
                let left_type = self.infer_expr_type(&bin.left)?;
                let right_type = self.infer_expr_type(&bin.right)?;
                if left_type != right_type {
                    return Err(semantic_error(
                        SemanticErrorKind::MixedTypeExpression,
                        format!(
                            "cannot apply '{}' to {} and {}",
                            bin.op, left_type, right_type
                        ),
                    ));
                }
                Ok(left_type)
            }
        }
    }
}

/// 对语句做类型检查并登记符号
pub fn check(stmt: &Statement, symbols: &mut SymbolTable) -> MathResult<Type> {
    SemanticAnalyzer::new().analyze(stmt, symbols)
}
