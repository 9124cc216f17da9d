//! Result reporting.

use anstyle::Style;
use etymon_lib::decompose::Observer;
use etymon_lib::model::WordOutput;
use crate::error::AppError;

/// Print the decomposition: full JSON in verbose mode, a short summary
/// otherwise.
pub fn print_result(word: &str, output: &WordOutput, verbose: bool) -> Result<(), AppError> {
    if verbose {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }

    let bold = Style::new().bold();

    let parts = output.parts.iter()
        .map(|p| format!("{} ({})", p.text, p.meaning))
        .collect::<Vec<_>>()
        .join(", ");

    let definition = output.final_combination()
        .map(|c| c.definition.as_str())
        .unwrap_or_default();

    println!("{bold}Word:{bold:#} {word}");
    println!("{bold}Parts:{bold:#} {parts}");
    println!("{bold}Definition:{bold:#} {definition}");

    Ok(())
}

/// Observer reporting rejected attempts on stderr.
pub struct ProgressReporter;

impl Observer for ProgressReporter {

    fn rejected(&self, n: usize, issues: &[String]) {
        eprintln!("Attempt {} rejected, retrying:", n);
        for issue in issues {
            eprintln!("  - {}", issue);
        }
    }
}
