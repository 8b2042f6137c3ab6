//! 编译流水线集成测试
//!
//! 覆盖从源码到三地址码、伪汇编和最终结果的完整流程。

use math_solver::error::{MathError, Phase, SemanticErrorKind};
use math_solver::lexer::{lex, token_kinds, TokenKind};
use math_solver::semantic::SymbolTable;
use math_solver::{compile_with, Compiler, Session};

fn compile(source: &str) -> Result<math_solver::Compilation, MathError> {
    Compiler::new().compile(source)
}

fn expect_phase(source: &str, phase: Phase) -> MathError {
    let err = compile(source).expect_err("compilation should fail");
    assert_eq!(err.phase(), phase, "unexpected failure for {:?}: {}", source, err);
    err
}

#[test]
fn test_int_addition() {
    let out = compile("int y = 4 + 3;").unwrap();
    assert_eq!(out.ir, ["t1 = 4 + 3", "y = t1"]);
    assert_eq!(out.assembly, ["LD R1, 4", "ADD R1, 3", "ST y, R1"]);
    assert_eq!(out.result_line(), "y=7;");
}

#[test]
fn test_double_multiplication() {
    let out = compile("double area = 2.5 * 5.0;").unwrap();
    assert_eq!(out.ir, ["t1 = 2.5 * 5.0", "area = t1"]);
    assert_eq!(out.assembly, ["LDF R1, 2.5", "MULF R1, 5.0", "STF area, R1"]);
    assert_eq!(out.result_line(), "area=12.5;");
}

#[test]
fn test_int_multiplication() {
    assert_eq!(compile("int z = 3 * 4;").unwrap().result_line(), "z=12;");
}

#[test]
fn test_compact_double() {
    let out = compile("double t=4.0*3.1;").unwrap();
    assert_eq!(out.result_line(), "t=12.4;");
}

#[test]
fn test_int_division_truncates() {
    let out = compile("int q = 7 / 2;").unwrap();
    assert_eq!(out.assembly[1], "DIV R1, 2");
    assert_eq!(out.result_line(), "q=3;");
}

#[test]
fn test_double_keeps_decimal_point() {
    assert_eq!(compile("double y = 2.0 + 2.0;").unwrap().result_line(), "y=4.0;");
}

#[test]
fn test_int_subtraction_below_zero() {
    let out = compile("int d = 3 - 5;").unwrap();
    assert_eq!(out.assembly[1], "SUB R1, 5");
    assert_eq!(out.result_line(), "d=-2;");
}

#[test]
fn test_double_division() {
    let out = compile("double r = 1.0 / 3.0;").unwrap();
    assert_eq!(out.assembly, ["LDF R1, 1.0", "DIVF R1, 3.0", "STF r, R1"]);
    assert_eq!(out.result_line(), "r=0.333333333333;");
}

#[test]
fn test_token_kinds_round_trip() {
    let accepted = [
        "int y = 4 + 3;",
        "double t=4.0*3.1;",
        "  int   abc9 =10/5 ;  ",
        "double x = 0.5 - 0.25;",
    ];
    for source in accepted {
        let tokens = lex(source).unwrap();
        assert_eq!(
            token_kinds(&tokens),
            [
                TokenKind::Type,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Op,
                TokenKind::Number,
                TokenKind::Semicolon,
            ],
            "{}",
            source
        );
        assert!(compile(source).is_ok(), "{}", source);
    }
}

#[test]
fn test_identifier_preserved() {
    for (source, identifier) in [
        ("int alpha = 1 + 2;", "alpha"),
        ("double B2 = 1.5 + 2.5;", "B2"),
        ("int x = 8 / 4;", "x"),
    ] {
        let out = compile(source).unwrap();
        assert_eq!(out.ast.identifier, identifier);
        assert!(out.result_line().starts_with(&format!("{}=", identifier)));
        assert_eq!(out.ir.last().unwrap(), &format!("{} = t1", identifier));
    }
}

#[test]
fn test_independent_runs_are_identical() {
    let first = compile("double area = 2.5 * 5.0;").unwrap();
    let second = compile("double area = 2.5 * 5.0;").unwrap();
    assert_eq!(first.ir, second.ir);
    assert_eq!(first.assembly, second.assembly);
}

#[test]
fn test_session_counters_restart() {
    let mut session = Session::new();
    let first = session.compile("int a = 1 + 2;").unwrap();
    let second = session.compile("int b = 3 + 4;").unwrap();
    assert_eq!(first.ir[0], "t1 = 1 + 2");
    assert_eq!(second.ir[0], "t1 = 3 + 4");
    assert_eq!(second.assembly[0], "LD R1, 3");
}

#[test]
fn test_mixed_type_rejected() {
    let err = expect_phase("int y = 4.0 + 3;", Phase::Semantic);
    assert_eq!(err.semantic_kind(), Some(SemanticErrorKind::MixedTypeExpression));
}

#[test]
fn test_division_by_zero_rejected() {
    let err = expect_phase("double u = 9.2 / 0;", Phase::Semantic);
    assert_eq!(err.semantic_kind(), Some(SemanticErrorKind::DivisionByZero));
}

#[test]
fn test_int_declared_with_double_literals() {
    let err = expect_phase("int t = 4.0/2.0;", Phase::Semantic);
    assert_eq!(err.semantic_kind(), Some(SemanticErrorKind::TypeMismatch));
}

#[test]
fn test_missing_semicolon() {
    let err = expect_phase("int x=5+2", Phase::Syntax);
    assert!(err.to_string().starts_with("SyntaxError"));
}

#[test]
fn test_unknown_operator() {
    let err = expect_phase("int w = 9 % 2;", Phase::Lexical);
    assert!(err.to_string().starts_with("LexicalError"));
}

#[test]
fn test_syntax_failures() {
    expect_phase("y = 4 + 3;", Phase::Syntax);
    expect_phase("int y 4 + 3;", Phase::Syntax);
    expect_phase("int y = 4 3;", Phase::Syntax);
    expect_phase("int y = 4 + ;", Phase::Syntax);
    expect_phase("int y = 4;", Phase::Syntax);
    expect_phase("int y = a + 3;", Phase::Syntax);
}

#[test]
fn test_failed_statement_not_recorded() {
    let mut symbols = SymbolTable::new();
    assert!(compile_with("double u = 9.2 / 0;", &mut symbols).is_err());
    assert!(symbols.lookup("u").is_none());
    assert!(compile_with("double u = 9.2 / 2.0;", &mut symbols).is_ok());
    assert!(symbols.lookup("u").is_some());
}

#[test]
fn test_carriage_return_and_vertical_tab_separators() {
    assert_eq!(compile("int y = 4 + 3;\r").unwrap().result_line(), "y=7;");
    assert_eq!(compile("int y =\x0b4 + 3;").unwrap().result_line(), "y=7;");
    assert_eq!(compile("int y = 4 + 3;\r\n").unwrap().result_line(), "y=7;");
}

#[test]
fn test_small_double_stays_positional() {
    let out = compile("double a = 0.000001 * 1.0;").unwrap();
    assert_eq!(out.ir, ["t1 = 0.000001 * 1.0", "a = t1"]);
    assert_eq!(out.assembly[0], "LDF R1, 0.000001");
    assert_eq!(out.result_line(), "a=0.000001;");
}

#[test]
fn test_large_double_stays_positional() {
    let out = compile("double b = 100000000000.0 * 100.0;").unwrap();
    assert_eq!(out.assembly[0], "LDF R1, 100000000000.0");
    assert_eq!(out.result_line(), "b=10000000000000.0;");
}
