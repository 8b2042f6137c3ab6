//! 三地址码生成
//!
//! 对表达式树做后序遍历：字面量直接输出数值文本，二元节点分配新的临时变量
//! 并输出 `t = left op right`，最后输出 `identifier = 结果`。

use tracing::debug;
use crate::ast::*;
use crate::error::{MathError, MathResult};
use crate::codegen::context::CodegenContext;

pub struct IRGenerator {
    ctx: CodegenContext,
    code: Vec<String>,
}

impl IRGenerator {
    pub fn new() -> Self {
        Self {
            ctx: CodegenContext::new(),
            code: Vec::new(),
        }
    }

    pub fn generate(&mut self, stmt: &Statement) -> MathResult<Vec<String>> {
        self.ctx.reset();
        self.code.clear();

        if stmt.identifier.is_empty() {
            return Err(MathError::Ir("invalid AST: missing identifier".to_string()));
        }

        let result = self.generate_expression(&stmt.expression);
        self.emit(format!("{} = {}", stmt.identifier, result));

        debug!(instructions = self.code.len(), "generated three-address code");
        Ok(std::mem::take(&mut self.code))
    }

    fn generate_expression(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(lit) => lit.to_string(),
            Expr::Binary(bin) => {
                let left = self.generate_expression(&bin.left);
                let right = self.generate_expression(&bin.right);
                let temp = self.ctx.new_temp();
                self.emit(format!("{} = {} {} {}", temp, left, bin.op, right));
                temp
            }
        }
    }

    fn emit(&mut self, line: String) {
        self.code.push(line);
    }
}

impl Default for IRGenerator {
    fn default() -> Self {
        Self::new()
    }
}
