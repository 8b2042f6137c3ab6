pub mod error;
pub mod types;
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod codegen;

use tracing::debug;
use ast::Statement;
use codegen::{AsmEmitter, IRGenerator, Value};
use error::MathResult;
use lexer::Token;
use semantic::{SemanticAnalyzer, SymbolTable};
use types::Type;

/// 一次成功编译的全部产物
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub ast: Statement,
    pub expr_type: Type,
    pub ir: Vec<String>,
    pub assembly: Vec<String>,
    pub value: Value,
}

impl Compilation {
    /// 最终结果 `identifier=value;`
    pub fn result_line(&self) -> String {
        format!("{}={};", self.ast.identifier, self.value.render())
    }
}

/// 单次编译：每次调用都使用全新的符号表和计数器
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Self
    }

    pub fn compile(&self, source: &str) -> MathResult<Compilation> {
        let mut symbols = SymbolTable::new();
        compile_with(source, &mut symbols)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// 交互会话：符号表在多条语句之间保留
#[derive(Debug, Default)]
pub struct Session {
    symbols: SymbolTable,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compile(&mut self, source: &str) -> MathResult<Compilation> {
        compile_with(source, &mut self.symbols)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

/// 依次执行五个阶段，任何阶段失败都立即返回
pub fn compile_with(source: &str, symbols: &mut SymbolTable) -> MathResult<Compilation> {
    // 1. 词法分析
    let tokens = lexer::lex(source)?;
    debug!(kinds = ?lexer::token_kinds(&tokens), "lexical analysis passed");

    // 2. 语法分析
    let ast = parser::parse(tokens.clone())?;

    // 3. 语义分析
    let expr_type = SemanticAnalyzer::new().analyze(&ast, symbols)?;

    // 4. 三地址码
    let ir = IRGenerator::new().generate(&ast)?;

    // 5. 伪汇编和结果
    let assembly = AsmEmitter::new().emit(&ast)?;
    let value = codegen::evaluate(&ast)?;

    Ok(Compilation {
        tokens,
        ast,
        expr_type,
        ir,
        assembly,
        value,
    })
}
