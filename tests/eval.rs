use monkey::{eval, eval_program, Environment, Lexer, Object, Parser, Token, TokenType, Tokens};
use pretty_assertions::assert_eq;

fn run(input: &str) -> String {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(), "parser errors: {:?}", parser.errors());
    eval_program(&program, &Environment::new()).inspect()
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(run("5 + 2 * 10"), "25");
    assert_eq!(run("2 * (5 + 10)"), "30");
    assert_eq!(run("!5"), "false");
    assert_eq!(run("!!5"), "true");
}

#[test]
fn zero_is_truthy() {
    assert_eq!(run("if (0) { 1 }"), "1");
    assert_eq!(run("if (false) { 1 }"), "null");
}

#[test]
fn closures_capture_their_scope() {
    let input = "
let newAdder = fn(x) {
  fn(y) { x + y };
};

let addTwo = newAdder(2);
addTwo(2);
";
    assert_eq!(run(input), "4");
}

#[test]
fn recursive_functions() {
    let input = "
let fib = fn(n) {
  if (n < 2) { return n; }
  fib(n - 1) + fib(n - 2)
};
fib(15);
";
    assert_eq!(run(input), "610");
}

#[test]
fn higher_order_map_and_reduce() {
    let input = "
let map = fn(arr, f) {
  let iter = fn(arr, acc) {
    if (len(arr) == 0) { acc } else { iter(tail(arr), append(acc, f(head(arr)))) }
  };
  iter(arr, []);
};
let reduce = fn(arr, initial, f) {
  let iter = fn(arr, result) {
    if (len(arr) == 0) { result } else { iter(tail(arr), f(result, head(arr))) }
  };
  iter(arr, initial);
};
let doubled = map([1, 2, 3, 4], fn(x) { x * 2 });
[doubled, reduce(doubled, 0, fn(acc, x) { acc + x })];
";
    assert_eq!(run(input), "[[2, 4, 6, 8], 20]");
}

#[test]
fn runtime_errors() {
    assert_eq!(run("5 + true"), "ERROR: type mismatch: INTEGER + BOOLEAN");
    assert_eq!(
        run("if (10 > 1) { true + false; }"),
        "ERROR: unknown operation: BOOLEAN + BOOLEAN"
    );
    assert_eq!(run("1 / 0"), "ERROR: division by zero");
    assert_eq!(
        run("let f = fn(a) { a }; f(1, 2)"),
        "ERROR: wrong number of arguments: want=1, got=2"
    );
    assert_eq!(run("missing + 1"), "ERROR: undefined identifier: missing");
}

#[test]
fn nested_return() {
    let input = "
if (10 > 1) {
  if (10 > 1) {
    return 10;
  }
  return 1;
}
";
    assert_eq!(run(input), "10");
}

#[test]
fn arrays_and_hashes() {
    assert_eq!(run("len([1, 2, 3])"), "3");
    assert_eq!(run("[1, 2, 3][3]"), "null");
    assert_eq!(run(r#"{"a": 1, "a": 2}["a"]"#), "2");
    assert_eq!(run(r#"let h = {"one": 1, 2: "two", true: [3]}; h"#), "{one: 1, 2: two, true: [3]}");
    assert_eq!(run(r#"{"k": 1}[[]]"#), "ERROR: invalid as hash key: ARRAY");
}

#[test]
fn parse_errors_recover() {
    let mut parser = Parser::new(Lexer::new("let x 5; let y = 10; y"));
    let program = parser.parse_program();

    assert_eq!(parser.errors(), vec!["expected next token to be =, got INT instead"]);
    assert_eq!(program.statements.len(), 2);
    assert_eq!(eval_program(&program, &Environment::new()).inspect(), "10");
}

#[test]
fn canonical_rendering() {
    let mut parser = Parser::new(Lexer::new("a + b * c; -a * b; add(a, b[1])"));
    let program = parser.parse_program();
    let rendered: Vec<String> = program.statements.iter().map(|s| s.to_string()).collect();

    assert_eq!(rendered, vec!["(a + (b * c))", "((-a) * b)", "add(a, (b[1]))"]);
}

#[test]
fn parses_from_any_token_source() {
    let tokens = vec![
        Token::new(TokenType::Int, "40"),
        Token::new(TokenType::Plus, "+"),
        Token::new(TokenType::Int, "2"),
    ];
    let mut parser = Parser::new(Tokens::new(tokens));
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(eval(&program, &Environment::new()).inspect(), "42");
}

#[test]
fn environment_persists_between_programs() {
    let env = Environment::new();
    for (input, expected) in [
        ("let counter = fn(x) { x + 1 };", "null"),
        ("let a = counter(1);", "null"),
        ("counter(a)", "3"),
    ] {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert_eq!(eval_program(&program, &env).inspect(), expected);
    }

    match env.get("a") {
        Some(Object::Integer(2)) => {}
        other => panic!("unexpected binding for a: {:?}", other),
    }
}

#[test]
fn return_inside_if_expression_exits_function() {
    let input = "
let pick = fn(n) {
  let r = if (n > 0) { return 1; } else { 2 };
  r * 10
};
[pick(1), pick(0)]
";
    assert_eq!(run(input), "[1, 20]");
}
