use std::fmt;

use inlinable_string::{InlinableString, StringExt};
use itertools::Itertools;
use num_bigint::BigInt;

use crate::error::CalcError;
use crate::util::char_to_string;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    Number(BigInt),
    Identifier(InlinableString),
    Op(char),
    OpenBracket,
    CloseBracket,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Op(op) => write!(f, "{}", op),
            Token::OpenBracket => write!(f, "("),
            Token::CloseBracket => write!(f, ")"),
        }
    }
}

// precedence classes: additive 0, multiplicative 1; brackets and operands take
// the top class so a precedence comparison never evicts them
pub fn precedence(token: &Token) -> usize {
    match token {
        Token::Op('+') | Token::Op('-') => 0,
        Token::Op('*') | Token::Op('/') => 1,
        _ => 2,
    }
}

// structural pre-checks shared by every non-command line. longer sign runs
// like -- or +++ are legal here; the normalizer collapses them later.
pub fn validate(input: &str) -> Result<(), CalcError> {
    let legal_chars = input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '=' | ' '));
    if !legal_chars
        || input.matches('(').count() != input.matches(')').count()
        || input.contains("**")
        || input.contains("//")
        || input.contains("+-")
        || input.contains("-+")
    {
        return Err(CalcError::InvalidExpression);
    }
    Ok(())
}

#[derive(Debug)]
enum LexState {
    Number(InlinableString),
    Identifier(InlinableString),
    None,
}

fn commit(state: LexState, toks: &mut Vec<Token>) -> Result<(), CalcError> {
    match state {
        LexState::Number(s) => {
            let number: BigInt = s.parse().map_err(|_| CalcError::InvalidExpression)?;
            toks.push(Token::Number(number));
        }
        LexState::Identifier(s) => toks.push(Token::Identifier(s)),
        LexState::None => (),
    }
    Ok(())
}

// lexer
// state machine over the raw line; digit and letter runs accumulate, operator
// characters and spaces commit the pending atom
pub fn lex(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut toks = vec![];
    let mut state = LexState::None;
    for char in input.chars() {
        state = match (char, state) {
            ('0'..='9', LexState::None) => LexState::Number(char_to_string(char)),
            ('0'..='9', LexState::Number(mut n)) => {
                n.push(char);
                LexState::Number(n)
            }
            ('a'..='z' | 'A'..='Z', LexState::None) => LexState::Identifier(char_to_string(char)),
            ('a'..='z' | 'A'..='Z', LexState::Identifier(mut s)) => {
                s.push(char);
                LexState::Identifier(s)
            }
            // a digit run flowing into letters (or letters into digits) names nothing
            ('0'..='9', LexState::Identifier(_)) | ('a'..='z' | 'A'..='Z', LexState::Number(_)) => {
                return Err(CalcError::InvalidExpression)
            }
            ('+' | '-' | '*' | '/' | '(' | ')', state) => {
                commit(state, &mut toks)?;
                toks.push(match char {
                    '(' => Token::OpenBracket,
                    ')' => Token::CloseBracket,
                    op => Token::Op(op),
                });
                LexState::None
            }
            (' ', state) => {
                commit(state, &mut toks)?;
                LexState::None
            }
            (_, _) => return Err(CalcError::InvalidExpression),
        }
    }
    // commit last thing
    commit(state, &mut toks)?;
    Ok(toks)
}

// sign-chain collapsing, done on tokens rather than raw text so interior
// whitespace does not matter. the pass order is load-bearing: minus pairs
// cancel first, then a minus absorbs pluses before it, then plus runs collapse.
pub fn normalize(tokens: Vec<Token>) -> Vec<Token> {
    // 1: each maximal run of consecutive minuses cancels pairwise; an
    // odd-length run leaves a trailing minus behind the plus
    let grouped = tokens.into_iter().group_by(|tok| matches!(tok, Token::Op('-')));
    let mut collapsed: Vec<Token> = Vec::new();
    for (is_minus, run) in &grouped {
        if !is_minus {
            collapsed.extend(run);
            continue;
        }
        let count = run.count();
        if count == 1 {
            collapsed.push(Token::Op('-'));
        } else {
            collapsed.push(Token::Op('+'));
            if count % 2 == 1 {
                collapsed.push(Token::Op('-'));
            }
        }
    }
    // 2: a minus absorbs any pluses directly before it
    let mut folded: Vec<Token> = Vec::with_capacity(collapsed.len());
    for tok in collapsed {
        if matches!(tok, Token::Op('-')) {
            while matches!(folded.last(), Some(Token::Op('+'))) {
                folded.pop();
            }
        }
        folded.push(tok);
    }
    // 3: collapse what remains of the plus runs
    folded.dedup_by(|a, b| matches!(a, Token::Op('+')) && matches!(b, Token::Op('+')));
    folded
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(tokens: &[Token]) -> String {
        tokens.iter().join(" ")
    }

    #[test]
    fn accepts_and_rejects_lines() {
        for good in ["2 + 3", "a = 8", "(1 + 2) * 3", "5 --- 3", "9 +++ 10 -- 8"] {
            assert!(validate(good).is_ok(), "{}", good);
        }
        for bad in ["2 ^ 3", "1 ? 2", "(1 + 2", "8 + 1)", "2 ** 3", "4 // 2", "2 +- 3", "2 -+ 3"] {
            assert_eq!(validate(bad), Err(CalcError::InvalidExpression), "{}", bad);
        }
    }

    #[test]
    fn lexes_atoms_and_operators() {
        let toks = lex("12 + count * (3 - 4)").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::Number(BigInt::from(12)),
                Token::Op('+'),
                Token::Identifier(InlinableString::from("count")),
                Token::Op('*'),
                Token::OpenBracket,
                Token::Number(BigInt::from(3)),
                Token::Op('-'),
                Token::Number(BigInt::from(4)),
                Token::CloseBracket,
            ]
        );
    }

    #[test]
    fn splits_spaced_atoms() {
        let toks = lex("12 34").unwrap();
        assert_eq!(toks, vec![Token::Number(BigInt::from(12)), Token::Number(BigInt::from(34))]);
    }

    #[test]
    fn rejects_mixed_atoms() {
        assert_eq!(lex("1a"), Err(CalcError::InvalidExpression));
        assert_eq!(lex("a1"), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn collapses_sign_chains() {
        let cases = [
            ("5 - 3", "5 - 3"),
            ("5 -- 3", "5 + 3"),
            ("5--3", "5 + 3"),
            ("5 --- 3", "5 - 3"),
            ("5 - - - - 3", "5 + 3"),
            ("1 + - - + 2", "1 + 2"),
            ("9 +++ 10 -- 8", "9 + 10 + 8"),
            ("1 - + - 2", "1 - - 2"),
            ("(--3)", "( + 3 )"),
            ("- 5", "- 5"),
        ];
        for (input, expected) in cases {
            let normalized = normalize(lex(input).unwrap());
            assert_eq!(render(&normalized), expected, "{}", input);
        }
    }

    #[test]
    fn precedence_classes() {
        assert_eq!(precedence(&Token::Op('+')), precedence(&Token::Op('-')));
        assert_eq!(precedence(&Token::Op('*')), precedence(&Token::Op('/')));
        assert!(precedence(&Token::Op('*')) > precedence(&Token::Op('+')));
        assert!(precedence(&Token::OpenBracket) > precedence(&Token::Op('*')));
    }
}
