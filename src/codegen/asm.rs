//! 伪汇编生成
//!
//! `int` 使用整数指令族（LD/ADD/SUB/MUL/DIV/ST），
//! `double` 使用浮点指令族（LDF/ADDF/SUBF/MULF/DIVF/STF）。

use tracing::debug;
use crate::ast::*;
use crate::error::{MathError, MathResult};
use crate::codegen::context::CodegenContext;
use crate::types::Type;

/// 按声明类型选出的助记符
#[derive(Debug, Clone, Copy)]
struct Mnemonics {
    load: &'static str,
    store: &'static str,
    add: &'static str,
    sub: &'static str,
    mul: &'static str,
    div: &'static str,
}

const INT_MNEMONICS: Mnemonics = Mnemonics {
    load: "LD",
    store: "ST",
    add: "ADD",
    sub: "SUB",
    mul: "MUL",
    div: "DIV",
};

const FLOAT_MNEMONICS: Mnemonics = Mnemonics {
    load: "LDF",
    store: "STF",
    add: "ADDF",
    sub: "SUBF",
    mul: "MULF",
    div: "DIVF",
};

impl Mnemonics {
    fn for_type(ty: Type) -> Mnemonics {
        match ty {
            Type::Int => INT_MNEMONICS,
            Type::Double => FLOAT_MNEMONICS,
        }
    }

    fn arith(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Add => self.add,
            BinaryOp::Sub => self.sub,
            BinaryOp::Mul => self.mul,
            BinaryOp::Div => self.div,
        }
    }
}

pub struct AsmEmitter {
    ctx: CodegenContext,
    code: Vec<String>,
}

impl AsmEmitter {
    pub fn new() -> Self {
        Self {
            ctx: CodegenContext::new(),
            code: Vec::new(),
        }
    }

    /// 生成伪汇编。调用前语句必须已通过类型检查
    pub fn emit(&mut self, stmt: &Statement) -> MathResult<Vec<String>> {
        self.ctx.reset();
        self.code.clear();

        if stmt.identifier.is_empty() {
            return Err(MathError::CodeGen("cannot store into an empty identifier".to_string()));
        }

        let mnemonics = Mnemonics::for_type(stmt.declared_type);
        let reg = self.emit_expression(&stmt.expression, mnemonics);
        self.code.push(format!("{} {}, {}", mnemonics.store, stmt.identifier, reg));

        debug!(instructions = self.code.len(), "emitted pseudo-assembly");
        Ok(std::mem::take(&mut self.code))
    }

    /// 返回保存表达式结果的寄存器
    fn emit_expression(&mut self, expr: &Expr, mnemonics: Mnemonics) -> String {
        match expr {
            Expr::Literal(lit) => {
                let reg = self.ctx.new_register();
                self.code.push(format!("{} {}, {}", mnemonics.load, reg, lit));
                reg
            }
            Expr::Binary(bin) => {
                let reg = self.emit_expression(&bin.left, mnemonics);
                let operand = match bin.right.as_ref() {
                    Expr::Literal(lit) => lit.to_string(),
                    nested => self.emit_expression(nested, mnemonics),
                };
                self.code.push(format!("{} {}, {}", mnemonics.arith(bin.op), reg, operand));
                reg
            }
        }
    }
}

impl Default for AsmEmitter {
    fn default() -> Self {
        Self::new()
    }
}
