use super::EvalError;
use super::parser::Function;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn can_end_implicit_mul(&self) -> bool {
        matches!(
            self,
            Self::Number(_) | Self::Ident(_) | Self::RParen | Self::Bang
        )
    }

    fn can_start_implicit_mul(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Ident(_) | Self::LParen)
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Ident(name) => name.clone(),
            Self::Plus => "+".into(),
            Self::Minus => "-".into(),
            Self::Star => "*".into(),
            Self::Slash => "/".into(),
            Self::Caret => "^".into(),
            Self::Bang => "!".into(),
            Self::LParen => "(".into(),
            Self::RParen => ")".into(),
            Self::Comma => ",".into(),
        }
    }
}

/// Split an expression into tokens, inserting `*` where multiplication is
/// implied (`2x`, `3(x+1)`, `(x-1)(x+1)`, `x(x+1)`).
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        if ch.is_whitespace() {
            pos += 1;
            continue;
        }

        let token = if ch.is_ascii_digit() || ch == '.' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                pos += 1;
            }
            // exponent: 1e5, 2.5e-3
            if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
                let mut look = pos + 1;
                if look < chars.len() && (chars[look] == '+' || chars[look] == '-') {
                    look += 1;
                }
                if look < chars.len() && chars[look].is_ascii_digit() {
                    pos = look;
                    while pos < chars.len() && chars[pos].is_ascii_digit() {
                        pos += 1;
                    }
                }
            }
            let text: String = chars[start..pos].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidNumber(text.clone()))?;
            Token::Number(value)
        } else if ch.is_alphabetic() {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            for piece in split_word(&word.to_lowercase()) {
                push_token(&mut tokens, piece);
            }
            continue;
        } else {
            pos += 1;
            match ch {
                '+' => Token::Plus,
                '-' | '\u{2212}' => Token::Minus,
                '*' | '\u{00d7}' | '\u{22c5}' => Token::Star,
                '/' | '\u{00f7}' => Token::Slash,
                '^' => Token::Caret,
                '!' => Token::Bang,
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                other => {
                    return Err(EvalError::UnexpectedChar {
                        ch: other,
                        pos: pos - 1,
                    });
                }
            }
        };

        push_token(&mut tokens, token);
    }

    Ok(tokens)
}

fn push_token(tokens: &mut Vec<Token>, token: Token) {
    if let Some(prev) = tokens.last() {
        let numbers_adjacent =
            matches!(prev, Token::Number(_)) && matches!(token, Token::Number(_));
        let is_call = matches!(prev, Token::Ident(name) if Function::lookup(name).is_some())
            && token == Token::LParen;
        if prev.can_end_implicit_mul()
            && token.can_start_implicit_mul()
            && !numbers_adjacent
            && !is_call
        {
            tokens.push(Token::Star);
        }
    }
    tokens.push(token);
}

fn is_known_name(name: &str) -> bool {
    matches!(name, "x" | "pi" | "π" | "e") || Function::lookup(name).is_some()
}

/// Break a run of letters and digits into known names and integers, longest
/// name first, so `xsin` reads as `x sin` and `x2` as `x 2`. A run that does
/// not split cleanly stays one identifier.
fn split_word(word: &str) -> Vec<Token> {
    if is_known_name(word) {
        return vec![Token::Ident(word.to_string())];
    }
    let chars: Vec<char> = word.chars().collect();
    let mut pieces = Vec::new();
    let mut pos = 0;
    'outer: while pos < chars.len() {
        if chars[pos].is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let digits: String = chars[start..pos].iter().collect();
            match digits.parse::<f64>() {
                Ok(value) => pieces.push(Token::Number(value)),
                Err(_) => break,
            }
            continue;
        }
        for end in (pos + 1..=chars.len()).rev() {
            let candidate: String = chars[pos..end].iter().collect();
            if is_known_name(&candidate) {
                pieces.push(Token::Ident(candidate));
                pos = end;
                continue 'outer;
            }
        }
        break;
    }
    if pos < chars.len() {
        return vec![Token::Ident(word.to_string())];
    }
    pieces
}
