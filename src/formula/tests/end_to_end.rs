use crate::common::{Error, ErrorKind, EvaluationError};
use crate::descent::Trace;
use crate::formula::{EngineConfig, FormulaEngine, FunctionLibrary, Variables};
use std::sync::Arc;

fn eval(input: &str) -> crate::common::Result<f64> {
    FormulaEngine::default().eval(input, &Variables::new())
}

fn eval_with(input: &str, vars: &Variables) -> crate::common::Result<f64> {
    FormulaEngine::default().eval(input, vars)
}

#[test]
fn subtraction_chain_groups_to_the_right() {
    // 1-(2-3)
    assert_eq!(eval("1-2-3").unwrap(), 2.0);
    assert_eq!(eval("10-4+3").unwrap(), 3.0);
}

#[test]
fn precedence_and_parentheses() {
    assert_eq!(eval("(1+2)*3").unwrap(), 9.0);
    assert_eq!(eval("1+2*3").unwrap(), 7.0);
    assert_eq!(eval("-(2+3)").unwrap(), -5.0);
    assert_eq!(eval("((((4))))").unwrap(), 4.0);
}

#[test]
fn builtin_functions() {
    assert_eq!(eval("max(1,5,3)").unwrap(), 5.0);
    assert_eq!(eval("pow(2,10)").unwrap(), 1024.0);
    assert_eq!(eval("round(3.14159, 2)").unwrap(), 3.14);
    assert_eq!(eval("average(2, 4)").unwrap(), 3.0);
    assert_eq!(eval("min()").unwrap(), f64::INFINITY);
    assert_eq!(eval("max()").unwrap(), f64::NEG_INFINITY);
    assert!(eval("avg()").unwrap().is_nan());
}

#[test]
fn conditional_expression() {
    assert_eq!(eval("(1<2?10:20)").unwrap(), 10.0);
    assert_eq!(eval("((1==1)&&(2==2)?1:0)").unwrap(), 1.0);
    assert_eq!(eval("(~(1<2)?1:0)").unwrap(), 0.0);
    // nested in arithmetic and in arguments
    assert_eq!(eval("1 + (2>1 ? 2 : 3) * 10").unwrap(), 21.0);
    assert_eq!(eval("max((1>0?7:0), 3)").unwrap(), 7.0);
}

#[test]
fn bare_condition_needs_condition_entry() {
    let engine = FormulaEngine::default();
    let vars = Variables::new();
    assert!(engine.eval_condition("(1==1)&&(2==2)", &vars).unwrap());
    assert!(engine.compile("(1==1)&&(2==2)").is_err());
}

#[test]
fn unparenthesised_conditional() {
    assert_eq!(eval("1<2?10:20").unwrap(), 10.0);
    assert_eq!(eval("1==1?1:[x]").unwrap(), 1.0);
    assert_eq!(eval("2 > 3 or 1 == 1 ? max(4, 5) : 0").unwrap(), 5.0);
    // a dangling `?` is still a syntax error
    assert_eq!(eval("1<2?10").unwrap_err().kind(), ErrorKind::Syntax);
}

#[test]
fn word_operators_need_no_spaces() {
    assert_eq!(eval("7mod3").unwrap(), 1.0);
    assert_eq!(eval("(1<2and2>1?1:0)").unwrap(), 1.0);
    assert_eq!(eval("(1>2or2>1?1:0)").unwrap(), 1.0);
}

#[test]
fn exponent_marker_is_lower_case() {
    assert_eq!(eval("1e+2").unwrap(), 100.0);
    assert_eq!(eval("1E+2").unwrap_err().kind(), ErrorKind::Syntax);
}

#[test]
fn non_ascii_letters_are_lexical_errors() {
    let err = eval("\u{17F}um(1)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(eval("2 * \u{212A}").unwrap_err().kind(), ErrorKind::Lexical);
}

#[test]
fn nested_parentheses() {
    let depth = 8;
    let input = format!("{}[x] + 1{}", "(".repeat(depth), ")".repeat(depth));
    let vars = Variables::from([("x", 2.0)]);
    assert_eq!(eval_with(&input, &vars).unwrap(), 3.0);
}

#[test]
fn variables_resolve_case_insensitively() {
    let vars = Variables::from([("x", 4.0), ("Rate", 0.25)]);
    assert_eq!(eval_with("[x]+1", &vars).unwrap(), 5.0);
    assert_eq!(eval_with("[RATE] * [X]", &vars).unwrap(), 1.0);
}

#[test]
fn not_cannot_start_an_expression() {
    let err = eval("not(1==1)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.is_compile_error());
}

#[test]
fn syntax_error_reports_last_matched_token() {
    assert_eq!(
        eval("1 + 2 )").unwrap_err(),
        Error::Syntax {
            near: "2".to_string(),
            offset: Some(4),
        }
    );
    assert_eq!(
        eval(")").unwrap_err().to_string(),
        "compile error - invalid syntax at start of input"
    );
}

#[test]
fn arity_error_carries_trace() {
    let err = eval("pow(2)").unwrap_err();
    assert_eq!(
        err,
        Error::Evaluation {
            error: EvaluationError::ArgumentCount {
                function: "pow".to_string(),
                expected: 2,
                got: 1,
            },
            trace: "Expr > Term > Factor > FuncCall".to_string(),
        }
    );
}

#[test]
fn unknown_names() {
    let err = eval("foo(1)").unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("unrecognized function `foo`"));

    let err = eval("1 + [missing]").unwrap_err();
    match err {
        Error::Evaluation { error, trace } => {
            assert_eq!(error, EvaluationError::UnknownVariable("missing".to_string()));
            assert_eq!(trace, "Expr > Expr > Term > Factor > Variable");
        },
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn epsilon_controls_equality() {
    let vars = Variables::new();
    let loose = FormulaEngine::new(EngineConfig::default().with_epsilon(0.01));
    assert_eq!(loose.eval("(0.1==0.105?1:0)", &vars).unwrap(), 1.0);
    assert_eq!(loose.eval("(0.1!=0.105?1:0)", &vars).unwrap(), 0.0);
    assert_eq!(eval("(0.1==0.105?1:0)").unwrap(), 0.0);
}

#[test]
fn untaken_branch_is_not_evaluated() {
    assert_eq!(eval("(1==1?1:[x])").unwrap(), 1.0);
    let err = eval("(1==2?1:[x])").unwrap_err();
    assert!(err.to_string().contains("unknown variable `x`"));
}

#[test]
fn mod_operator() {
    assert_eq!(eval("7 mod 3").unwrap(), 1.0);
    assert_eq!(eval("7 MOD 3 + 1").unwrap(), 2.0);
}

#[test]
fn custom_library_overrides_builtin() {
    let lib = FunctionLibrary::new()
        .with_function("max", |_: &Trace, args: &[f64]| Ok(args.iter().sum()))
        .with_function("clamp01", |_: &Trace, args: &[f64]| Ok(args[0].clamp(0.0, 1.0)));
    let engine = FormulaEngine::default().with_library(Arc::new(lib));
    let vars = Variables::new();

    assert_eq!(engine.eval("max(1,2,3)", &vars).unwrap(), 6.0);
    assert_eq!(engine.eval("clamp01(7)", &vars).unwrap(), 1.0);
    assert_eq!(engine.eval("pow(3,2)", &vars).unwrap(), 9.0);

    // the default engine is unaffected
    assert_eq!(eval("max(1,2,3)").unwrap(), 3.0);
}

#[test]
fn crate_level_eval() {
    assert_eq!(crate::eval("2 * (3 + 4)").unwrap(), 14.0);
}
