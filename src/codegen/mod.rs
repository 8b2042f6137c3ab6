//! 代码生成
//!
//! 三地址码、伪汇编以及字面量结果计算。

pub mod context;
mod ir_gen;
mod asm;
mod value;

pub use context::CodegenContext;
pub use ir_gen::IRGenerator;
pub use asm::AsmEmitter;
pub use value::{Value, evaluate, format_significant, SIGNIFICANT_DIGITS};
