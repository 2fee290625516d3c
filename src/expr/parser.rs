use std::f64::consts::{E, PI};

use super::EvalError;
use super::lexer::Token;

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Function {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Abs,
    Ln,
    Log,
    Log2,
    Exp,
    Floor,
    Ceil,
    Round,
    Sign,
    Min,
    Max,
    Pow,
}

impl Function {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" | "tg" => Self::Tan,
            "cot" | "cotg" => Self::Cot,
            "sec" => Self::Sec,
            "csc" => Self::Csc,
            "asin" | "arcsin" => Self::Asin,
            "acos" | "arccos" => Self::Acos,
            "atan" | "arctan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "ln" => Self::Ln,
            "log" => Self::Log,
            "log2" => Self::Log2,
            "exp" => Self::Exp,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "sign" | "sgn" => Self::Sign,
            "min" => Self::Min,
            "max" => Self::Max,
            "pow" => Self::Pow,
            _ => return None,
        };
        Some(function)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Cot => "cot",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "abs",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Log2 => "log2",
            Self::Exp => "exp",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pow => "pow",
        }
    }

    /// Accepted argument counts as `(min, max)`.
    fn arity(self) -> (usize, usize) {
        match self {
            Self::Log => (1, 2),
            Self::Min | Self::Max | Self::Pow => (2, 2),
            _ => (1, 1),
        }
    }

    fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        let a = args[0];
        let value = match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Cot => divide(1.0, a.tan())?,
            Self::Sec => divide(1.0, a.cos())?,
            Self::Csc => divide(1.0, a.sin())?,
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Sqrt => a.sqrt(),
            Self::Cbrt => a.cbrt(),
            Self::Abs => a.abs(),
            Self::Ln => a.ln(),
            Self::Log => match args.get(1) {
                Some(value) => divide(value.ln(), a.ln())?,
                None => a.log10(),
            },
            Self::Log2 => a.log2(),
            Self::Exp => a.exp(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Round => a.round(),
            Self::Sign => {
                if a == 0.0 {
                    0.0
                } else {
                    a.signum()
                }
            }
            Self::Min => a.min(args[1]),
            Self::Max => a.max(args[1]),
            Self::Pow => a.powf(args[1]),
        };
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Variable,
    Neg(Box<Expr>),
    Factorial(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub(crate) fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Variable => Ok(x),
            Self::Neg(inner) => Ok(-inner.eval(x)?),
            Self::Factorial(inner) => Ok(factorial(inner.eval(x)?)),
            Self::Binary { op, lhs, rhs } => {
                let a = lhs.eval(x)?;
                let b = rhs.eval(x)?;
                match op {
                    BinOp::Add => Ok(a + b),
                    BinOp::Sub => Ok(a - b),
                    BinOp::Mul => Ok(a * b),
                    BinOp::Div => divide(a, b),
                    BinOp::Pow => Ok(a.powf(b)),
                }
            }
            Self::Call { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(x))
                    .collect::<Result<Vec<_>, _>>()?;
                function.apply(&values)
            }
        }
    }
}

fn divide(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(a / b)
}

/// Factorial extended to reals through the gamma function.
fn factorial(n: f64) -> f64 {
    if n.is_nan() || (n < 0.0 && n.fract() == 0.0) {
        return f64::NAN;
    }
    if n.fract() == 0.0 && n <= 170.0 {
        return (1..=n as u32).fold(1.0, |acc, k| acc * f64::from(k));
    }
    gamma(n + 1.0)
}

// Lanczos approximation, g = 7.
fn gamma(z: f64) -> f64 {
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if z < 0.5 {
        return PI / ((PI * z).sin() * gamma(1.0 - z));
    }
    let z = z - 1.0;
    let t = z + 7.5;
    let series = COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(COEFFICIENTS[0], |acc, (i, c)| acc + c / (z + i as f64));
    (2.0 * PI).sqrt() * t.powf(z + 0.5) * (-t).exp() * series
}

/// Deepest nesting the parser accepts. Evaluation and drop recurse over the
/// tree, so this also bounds their stack use.
pub(crate) const MAX_DEPTH: usize = 256;

/// Recursive-descent parser over a token list.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    /// Parse the whole token list as one expression.
    pub(crate) fn parse(mut self) -> Result<Expr, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::Empty);
        }
        let expr = self.parse_additive()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    // Each link of a left-associative chain adds one tree level.
    fn parse_additive(&mut self) -> Result<Expr, EvalError> {
        let entry = self.depth;
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let rhs = self.parse_term()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth = entry;
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let entry = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth = entry;
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        self.descend()?;
        let expr = self.parse_signed()?;
        self.depth -= 1;
        Ok(expr)
    }

    // `-x^2` is `-(x^2)`
    fn parse_signed(&mut self) -> Result<Expr, EvalError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_postfix()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.parse_unary()?;
            return Ok(binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, EvalError> {
        let entry = self.depth;
        let mut expr = self.parse_primary()?;
        while self.peek() == Some(&Token::Bang) {
            self.pos += 1;
            self.descend()?;
            expr = Expr::Factorial(Box::new(expr));
        }
        self.depth = entry;
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::LParen) => {
                let inner = self.parse_additive()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => self.parse_identifier(name),
            Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn parse_identifier(&mut self, name: String) -> Result<Expr, EvalError> {
        match name.as_str() {
            "x" => return Ok(Expr::Variable),
            "pi" | "π" => return Ok(Expr::Number(PI)),
            "e" => return Ok(Expr::Number(E)),
            _ => {}
        }
        let Some(function) = Function::lookup(&name) else {
            return Err(EvalError::UnknownIdentifier(name));
        };

        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                args.push(self.parse_additive()?);
                if self.peek() == Some(&Token::Comma) {
                    self.pos += 1;
                    continue;
                }
                break;
            }
        }
        self.expect(Token::RParen)?;

        let (min, max) = function.arity();
        if args.len() < min || args.len() > max {
            return Err(EvalError::Arity {
                function: function.name(),
                found: args.len(),
            });
        }
        Ok(Expr::Call { function, args })
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn eval(source: &str, x: f64) -> Result<f64, EvalError> {
        Parser::new(tokenize(source)?).parse()?.eval(x)
    }

    fn approx(source: &str, x: f64, expected: f64) {
        let value = eval(source, x).unwrap_or_else(|err| panic!("{source}: {err}"));
        assert!(
            (value - expected).abs() < 1e-9,
            "{source} at {x}: {value} != {expected}"
        );
    }

    #[test]
    fn precedence_and_associativity() {
        approx("1 + 2 * 3", 0.0, 7.0);
        approx("2^3^2", 0.0, 512.0);
        approx("-x^2", 3.0, -9.0);
        approx("2^-1", 0.0, 0.5);
        approx("10 - 4 - 3", 0.0, 3.0);
        approx("(x+1)(x-1)", 3.0, 8.0);
        approx("2sin(x)", PI / 2.0, 2.0);
        approx("xsin(x)", PI / 2.0, PI / 2.0);
        approx("x2 + 1", 3.0, 7.0);
    }

    #[test]
    fn functions_and_constants() {
        approx("sqrt(16)", 0.0, 4.0);
        approx("log(100)", 0.0, 2.0);
        approx("log(2, 8)", 0.0, 3.0);
        approx("ln(e)", 0.0, 1.0);
        approx("cos(pi)", 0.0, -1.0);
        approx("max(x, 2)", 5.0, 5.0);
        approx("abs(x)", -2.5, 2.5);
    }

    #[test]
    fn factorials() {
        approx("5!", 0.0, 120.0);
        approx("0!", 0.0, 1.0);
        approx("0.5!", 0.0, PI.sqrt() / 2.0);
        assert!(eval("(-2)!", 0.0).expect("evaluates").is_nan());
    }

    #[test]
    fn reports_errors() {
        assert_eq!(eval("1/x", 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(
            eval("foo(x)", 1.0),
            Err(EvalError::UnknownIdentifier("foo".into()))
        );
        assert_eq!(eval("x +", 1.0), Err(EvalError::UnexpectedEnd));
        assert_eq!(eval("(x", 1.0), Err(EvalError::UnexpectedEnd));
        assert_eq!(eval("x)", 1.0), Err(EvalError::UnexpectedToken(")".into())));
        assert_eq!(
            eval("min(1)", 1.0),
            Err(EvalError::Arity {
                function: "min",
                found: 1
            })
        );
        assert_eq!(eval("", 1.0), Err(EvalError::Empty));
    }

    #[test]
    fn moderate_nesting_parses() {
        let nested = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        approx(&nested, 1.5, 1.5);
        approx(&format!("{}x", "-".repeat(100)), 2.0, 2.0);
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let too_deep = Err(EvalError::TooDeep(MAX_DEPTH));
        let parens = format!("{}x{}", "(".repeat(700), ")".repeat(700));
        assert_eq!(eval(&parens, 1.0), too_deep);
        let negations = format!("{}x", "-".repeat(5000));
        assert_eq!(eval(&negations, 1.0), too_deep);
        let sum = vec!["x"; 5000].join("+");
        assert_eq!(eval(&sum, 1.0), too_deep);
        let product = vec!["x"; 5000].join("*");
        assert_eq!(eval(&product, 1.0), too_deep);
        let powers = vec!["x"; 5000].join("^");
        assert_eq!(eval(&powers, 1.0), too_deep);
        let factorials = format!("3{}", "!".repeat(5000));
        assert_eq!(eval(&factorials, 1.0), too_deep);
    }
}
