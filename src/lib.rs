use num_bigint::BigInt;
use num_traits::Zero;
#[cfg(target_family="wasm")]
use wasm_bindgen::prelude::*;

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

mod env;
mod error;
mod parse;
mod util;

use env::Env;
use error::CalcError;
use parse::{precedence, Token};

// infix to postfix (shunting-yard) over an explicit operator stack
fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, CalcError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = vec![];
    for token in tokens {
        match token {
            Token::Number(_) | Token::Identifier(_) => output.push(token),
            Token::OpenBracket => stack.push(token),
            Token::CloseBracket => loop {
                match stack.pop() {
                    Some(Token::OpenBracket) => break,
                    Some(op) => output.push(op),
                    // bracket counts can match while the nesting is still wrong, e.g. ")("
                    None => return Err(CalcError::InvalidExpression),
                }
            },
            Token::Op(_) => match stack.last() {
                None | Some(Token::OpenBracket) => stack.push(token),
                Some(top) if precedence(&token) > precedence(top) => stack.push(token),
                // equal precedence pops too, keeping chains left-associative
                Some(_) => {
                    while let Some(top) = stack.pop() {
                        if top == Token::OpenBracket || precedence(&top) < precedence(&token) {
                            stack.push(top);
                            break;
                        }
                        output.push(top);
                    }
                    stack.push(token);
                }
            },
        }
    }
    while let Some(op) = stack.pop() {
        if op == Token::OpenBracket {
            return Err(CalcError::InvalidExpression);
        }
        output.push(op);
    }
    Ok(output)
}

fn apply_op(op: char, first: BigInt, second: BigInt) -> Result<BigInt, CalcError> {
    match op {
        '+' => Ok(first + second),
        '-' => Ok(first - second),
        '*' => Ok(first * second),
        '/' if second.is_zero() => Err(CalcError::DivisionByZero),
        '/' => Ok(first / second),
        _ => Err(CalcError::InvalidExpression),
    }
}

fn eval_postfix(tokens: Vec<Token>, env: &Env) -> Result<BigInt, CalcError> {
    let mut stack: Vec<BigInt> = vec![];
    for token in tokens {
        match token {
            Token::Number(n) => stack.push(n),
            Token::Identifier(name) => match env.get(&name) {
                Some(value) => stack.push(value.clone()),
                None => return Err(CalcError::UnknownVariable),
            },
            Token::Op(op) => {
                // a missing operand defaults to zero; this is what makes a
                // leading sign work without a dedicated unary-minus token
                let second = stack.pop().unwrap_or_default();
                let first = stack.pop().unwrap_or_default();
                stack.push(apply_op(op, first, second)?);
            }
            Token::OpenBracket | Token::CloseBracket => return Err(CalcError::InvalidExpression),
        }
    }
    stack.pop().ok_or(CalcError::InvalidExpression)
}

pub struct Calculator {
    env: Env,
}

impl Calculator {
    pub fn init() -> Self {
        Calculator { env: Env::new() }
    }

    // one line of user input: assignment, bare literal, bare name, or
    // expression. Ok(None) means an assignment succeeded, nothing to print.
    pub fn eval_line(&mut self, line: &str) -> Result<Option<BigInt>, CalcError> {
        parse::validate(line)?;
        if line.contains('=') {
            self.assign(line)?;
            return Ok(None);
        }
        if let Some(value) = util::parse_literal(line) {
            return Ok(Some(value));
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return self.lookup(trimmed).map(Some);
        }
        self.evaluate(line).map(Some)
    }

    pub fn evaluate(&self, line: &str) -> Result<BigInt, CalcError> {
        parse::validate(line)?;
        let tokens = parse::normalize(parse::lex(line)?);
        let postfix = to_postfix(tokens)?;
        eval_postfix(postfix, &self.env)
    }

    pub fn assign(&mut self, line: &str) -> Result<(), CalcError> {
        parse::validate(line)?;
        // interior whitespace is dropped too, so "a  =  5" and "a=5" agree
        let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.matches('=').count() != 1 {
            return Err(CalcError::InvalidAssignment);
        }
        let (name, value) = stripped.split_once('=').ok_or(CalcError::InvalidAssignment)?;
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CalcError::InvalidIdentifier);
        }
        if util::is_signed_literal(value) {
            let parsed: BigInt = value.parse().map_err(|_| CalcError::InvalidAssignment)?;
            self.env.set(name, parsed);
            return Ok(());
        }
        if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()) {
            let copied = self.env.get(value).cloned().ok_or(CalcError::UnknownVariable)?;
            self.env.set(name, copied);
            return Ok(());
        }
        Err(CalcError::InvalidAssignment)
    }

    pub fn lookup(&self, name: &str) -> Result<BigInt, CalcError> {
        self.env.get(name.trim()).cloned().ok_or(CalcError::UnknownVariable)
    }
}

#[cfg(target_family="wasm")]
static mut JS_CONTEXT: Option<Calculator> = None;

#[cfg(target_family="wasm")]
#[wasm_bindgen]
pub fn init_context() {
    unsafe {
        JS_CONTEXT = Some(Calculator::init());
    }
}
#[cfg(target_family="wasm")]
#[wasm_bindgen]
pub fn run_line(line: &str) -> String {
    unsafe {
        let calc = (&mut JS_CONTEXT).as_mut().unwrap();
        match calc.eval_line(line) {
            Ok(Some(result)) => result.to_string(),
            Ok(None) => String::new(),
            Err(e) => e.to_string(),
        }
    }
}
#[cfg(target_family="wasm")]
#[wasm_bindgen]
pub fn deinit_context() {
    unsafe {
        std::mem::take(&mut JS_CONTEXT);
    }
}
