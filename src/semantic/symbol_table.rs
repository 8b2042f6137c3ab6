//! 符号表：标识符 -> 声明类型

use std::collections::HashMap;
use crate::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticSymbolInfo {
    pub name: String,
    pub symbol_type: Type,
}

/// 一个会话内的符号表，重复声明会覆盖旧记录
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, SemanticSymbolInfo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明变量，返回被覆盖的旧记录（如果有）
    pub fn declare(&mut self, name: &str, symbol_type: Type) -> Option<SemanticSymbolInfo> {
        self.symbols.insert(
            name.to_string(),
            SemanticSymbolInfo {
                name: name.to_string(),
                symbol_type,
            },
        )
    }

    pub fn lookup(&self, name: &str) -> Option<&SemanticSymbolInfo> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// 按名字排序的全部记录
    pub fn entries(&self) -> Vec<&SemanticSymbolInfo> {
        let mut entries: Vec<_> = self.symbols.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeclaration_overwrites() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", Type::Int).is_none());
        let previous = table.declare("x", Type::Double).unwrap();
        assert_eq!(previous.symbol_type, Type::Int);
        assert_eq!(table.lookup("x").unwrap().symbol_type, Type::Double);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_entries_sorted() {
        let mut table = SymbolTable::new();
        table.declare("b", Type::Int);
        table.declare("a", Type::Double);
        let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
