use std::fmt;

/// 变量声明类型，同时也是字面量推断出的操作数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Double,
}

impl Type {
    pub fn from_keyword(keyword: &str) -> Option<Type> {
        match keyword {
            "int" => Some(Type::Int),
            "double" => Some(Type::Double),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Double => "double",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_mapping() {
        assert_eq!(Type::from_keyword("int"), Some(Type::Int));
        assert_eq!(Type::from_keyword("double"), Some(Type::Double));
        assert_eq!(Type::from_keyword("float"), None);
        assert_eq!(Type::Double.to_string(), "double");
    }
}
