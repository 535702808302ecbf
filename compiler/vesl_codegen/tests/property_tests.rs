//! Property-based tests for the generator.
//!
//! 1. Parenthesization: rendering a random operator tree and parsing the
//!    text back with C precedence rules yields the same tree.
//! 2. Naming: auto names depend only on construction order, and two builds
//!    with the same order render identically.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use vesl_build::{BuildContext, Shader};
use vesl_codegen::{render, Glsl, RenderOptions};
use vesl_ir::{BinaryOp, Expr, Literal, Rank, TypeDesc};

const OPS: [BinaryOp; 18] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Mod,
    BinaryOp::Eq,
    BinaryOp::NotEq,
    BinaryOp::Lt,
    BinaryOp::LtEq,
    BinaryOp::Gt,
    BinaryOp::GtEq,
    BinaryOp::And,
    BinaryOp::Or,
    BinaryOp::BitAnd,
    BinaryOp::BitOr,
    BinaryOp::BitXor,
    BinaryOp::Shl,
    BinaryOp::Shr,
];

// -- Strategies --

fn op_strategy() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(OPS.to_vec())
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = (0i64..100).prop_map(Expr::int);
    leaf.prop_recursive(5, 32, 2, |inner| {
        (op_strategy(), inner.clone(), inner).prop_map(|(op, lhs, rhs)| Expr::binary(op, lhs, rhs))
    })
}

// -- A small C expression parser --

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Int(i64),
    Op(BinaryOp),
    Open,
    Close,
}

fn tokenize(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    'outer: while pos < bytes.len() {
        let c = bytes[pos];
        if c == b' ' {
            pos += 1;
            continue;
        }
        if c.is_ascii_digit() {
            let start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            tokens.push(Token::Int(text[start..pos].parse().unwrap()));
            continue;
        }
        if c == b'(' || c == b')' {
            tokens.push(if c == b'(' { Token::Open } else { Token::Close });
            pos += 1;
            continue;
        }
        // Longest symbol first, so `<<` is not read as `<`.
        for len in [2, 1] {
            if let Some(symbol) = text.get(pos..pos + len) {
                if let Some(op) = OPS.iter().find(|op| op.as_symbol() == symbol) {
                    tokens.push(Token::Op(*op));
                    pos += len;
                    continue 'outer;
                }
            }
        }
        panic!("unexpected character {:?} in {text:?}", c as char);
    }
    tokens
}

fn level(op: BinaryOp) -> u8 {
    match op.rank() {
        Rank::Level(level) => level,
        Rank::Undefined => panic!("{op:?} has no rank"),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn primary(&mut self) -> Expr {
        match self.next() {
            Some(Token::Int(value)) => Expr::int(value),
            Some(Token::Open) => {
                let inner = self.binary(0);
                assert_eq!(self.next(), Some(Token::Close));
                inner
            }
            other => panic!("unexpected token {other:?}"),
        }
    }

    /// Precedence climbing; every operator here is left-associative.
    fn binary(&mut self, min_level: u8) -> Expr {
        let mut lhs = self.primary();
        while let Some(Token::Op(op)) = self.peek().cloned() {
            if level(op) < min_level {
                break;
            }
            self.pos += 1;
            let rhs = self.binary(level(op) + 1);
            lhs = Expr::binary(op, lhs, rhs);
        }
        lhs
    }
}

fn parse(text: &str) -> Expr {
    let mut parser = Parser {
        tokens: tokenize(text),
        pos: 0,
    };
    let expr = parser.binary(0);
    assert_eq!(parser.peek(), None, "trailing tokens in {text:?}");
    expr
}

fn render_statement(expr: &Expr) -> String {
    let mut ctx = BuildContext::default();
    ctx.push_expression(expr.clone()).unwrap();
    let shader = ctx.finish().unwrap();
    let text = render(&shader, &Glsl, &RenderOptions::default().without_preamble()).unwrap();
    text.strip_suffix(";\n").unwrap().to_owned()
}

fn count_parens(text: &str) -> usize {
    text.matches('(').count()
}

// -- Naming --

fn type_of(choice: u8) -> TypeDesc {
    match choice % 3 {
        0 => TypeDesc::FLOAT,
        1 => TypeDesc::vec(3),
        _ => TypeDesc::mat(4),
    }
}

fn declare_all(choices: &[u8]) -> Shader {
    let mut ctx = BuildContext::default();
    for &choice in choices {
        let var = ctx.declare(type_of(choice), None).unwrap();
        let reference = ctx.var(var).unwrap();
        ctx.push_expression(reference).unwrap();
    }
    ctx.finish().unwrap()
}

fn expected_lines(choices: &[u8]) -> Vec<String> {
    let mut counters = [0u32; 3];
    let mut lines = Vec::new();
    for &choice in choices {
        let (prefix, ty) = match choice % 3 {
            0 => ("x", "float"),
            1 => ("v", "vec3"),
            _ => ("m", "mat4"),
        };
        let counter = &mut counters[usize::from(choice % 3)];
        let name = format!("{prefix}{counter}");
        *counter += 1;
        lines.push(format!("{ty} {name};"));
        lines.push(format!("{name};"));
    }
    lines
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn rendered_text_parses_back_to_the_tree(expr in expr_strategy()) {
        let text = render_statement(&expr);
        prop_assert_eq!(parse(&text), expr, "rendered as {}", text);
    }

    #[test]
    fn tighter_operands_need_no_parentheses(
        outer in op_strategy(),
        inner in op_strategy(),
        a in 0i64..10,
        b in 0i64..10,
        c in 0i64..10,
    ) {
        let nested = Expr::binary(inner, Expr::int(a), Expr::int(b));
        let text = render_statement(&Expr::binary(outer, nested, Expr::int(c)));
        let wrapped = level(inner) < level(outer);
        prop_assert_eq!(count_parens(&text), usize::from(wrapped), "rendered as {}", text);
    }

    #[test]
    fn right_operand_wraps_on_ties(
        outer in op_strategy(),
        inner in op_strategy(),
    ) {
        let nested = Expr::binary(inner, Expr::int(1), Expr::int(2));
        let text = render_statement(&Expr::binary(outer, Expr::int(0), nested));
        let wrapped = level(inner) <= level(outer);
        prop_assert_eq!(count_parens(&text), usize::from(wrapped), "rendered as {}", text);
    }

    #[test]
    fn auto_names_follow_construction_order(choices in prop::collection::vec(any::<u8>(), 0..24)) {
        let options = RenderOptions::default().without_preamble();
        let first = render(&declare_all(&choices), &Glsl, &options).unwrap();
        let second = render(&declare_all(&choices), &Glsl, &options).unwrap();
        prop_assert_eq!(&first, &second);

        let lines: Vec<String> = first.lines().map(str::to_owned).collect();
        prop_assert_eq!(lines, expected_lines(&choices));
    }

    #[test]
    fn literals_render_as_themselves(value in 0i64..1_000_000) {
        prop_assert_eq!(render_statement(&Expr::Literal(Literal::Int(value))), value.to_string());
    }
}
