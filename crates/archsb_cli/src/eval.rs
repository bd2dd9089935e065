//! `archsb eval`: evaluate a single permutation formula.

use archsb_formula::{evaluate, is_piecewise, to_rpn, tokenize, FormulaData, FormulaError, Token};

use crate::{EvalArgs, GlobalArgs, ReportFormat};

/// Runs `archsb eval`. Prints the value and returns 0, or reports the error
/// and returns 1.
pub fn run(args: &EvalArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let data = FormulaData::new(args.wire, args.width);
    let format = args
        .format
        .unwrap_or_else(|| global.config.output.format.into());

    if global.verbose && !global.quiet && !is_piecewise(&args.formula) {
        print_stages(&args.formula, data);
    }

    let result = evaluate(&args.formula, data);
    match format {
        ReportFormat::Text => match &result {
            Ok(value) => println!("{value}"),
            Err(err) => {
                eprintln!("error: {err}");
                if let Some(pos) = error_offset(err) {
                    eprintln!("  {}", args.formula);
                    eprintln!("  {}", caret_line(&args.formula, pos));
                }
            }
        },
        ReportFormat::Json => {
            let outcome = match &result {
                Ok(value) => serde_json::json!({ "result": value }),
                Err(err) => serde_json::json!({ "error": err.to_string() }),
            };
            let report = serde_json::json!({
                "formula": args.formula,
                "data": data,
                "outcome": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if result.is_ok() { 0 } else { 1 })
}

/// Shows the token stream and its postfix form on stderr.
fn print_stages(formula: &str, data: FormulaData) {
    let Ok(tokens) = tokenize(formula, data) else {
        return;
    };
    eprintln!("   Tokens: {}", join(&tokens));
    if let Ok(rpn) = to_rpn(&tokens) {
        eprintln!("   Postfix: {}", join(&rpn));
    }
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte offset an error refers to, if it has one.
fn error_offset(err: &FormulaError) -> Option<usize> {
    match err {
        FormulaError::UnexpectedChar { pos, .. }
        | FormulaError::MissingDelimiter { pos, .. }
        | FormulaError::MismatchedBracket { pos } => Some(*pos),
        _ => None,
    }
}

fn caret_line(formula: &str, pos: usize) -> String {
    let col = formula.get(..pos).map_or(pos, |prefix| prefix.chars().count());
    format!("{}^", " ".repeat(col))
}
