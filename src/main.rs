use smartcalc::Calculator;
use std::io::BufRead;
use anyhow::Result;

const HELP: &str = "Evaluates + - * / over arbitrarily large whole numbers, with parentheses and
chained unary signs (e.g. -2 + 4 * (12 / 6)).
Assign variables with n = 5 or n = m, then use them in expressions or type a
name on its own to print its value.
Commands: /help, /exit.";

fn main() -> Result<()> {
    let mut calc = Calculator::init();
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // commands are matched on the raw line, so " /exit" is an expression
        if line.starts_with('/') {
            match line.as_str() {
                "/exit" => {
                    println!("Bye!");
                    break;
                }
                "/help" => println!("{}", HELP),
                _ => println!("Unknown command"),
            }
            continue;
        }
        match calc.eval_line(&line) {
            Ok(Some(result)) => println!("{}", result),
            Ok(None) => (),
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}
