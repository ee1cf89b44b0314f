//! Interactive prompts for scan parameters missing from the command line.

use std::path::PathBuf;

use colored::*;
use console::Term;
use srvsweep_common::network::descriptor;

use crate::terminal::colors;

/// Interactive worker entry stops here; `--workers` is not capped.
pub const MAX_INTERACTIVE_WORKERS: usize = 48;

fn ask(term: &Term, question: &str) -> anyhow::Result<String> {
    term.write_str(&format!("{} ", question.color(colors::PRIMARY)))?;
    Ok(term.read_line()?.trim().to_string())
}

/// Asks until `parse` accepts the answer, showing each rejection.
fn ask_until<T>(
    question: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> anyhow::Result<T> {
    let term = Term::stdout();
    loop {
        let answer = ask(&term, question)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(reason) => term.write_line(&format!("{}", reason.red()))?,
        }
    }
}

pub fn descriptors() -> anyhow::Result<Vec<String>> {
    ask_until(
        "Enter the CIDR ranges, IP address ranges, filename containing ip addresses, \
         or filename containing such inputs (<filename) separated by commas:",
        parse_descriptors,
    )
}

pub fn workers() -> anyhow::Result<usize> {
    ask_until(
        &format!(
            "Enter the number of threads (the greater the number the faster). \
             Maximum number: {MAX_INTERACTIVE_WORKERS}:"
        ),
        parse_workers,
    )
}

pub fn timeout() -> anyhow::Result<u64> {
    ask_until("Enter the timeout period (in seconds):", parse_timeout)
}

pub fn output() -> anyhow::Result<PathBuf> {
    ask_until("Enter the name of the file to save the results:", |answer| {
        if answer.is_empty() {
            Err("A file name is required".to_string())
        } else {
            Ok(PathBuf::from(answer))
        }
    })
}

pub fn confirm(question: &str) -> anyhow::Result<bool> {
    ask_until(question, |answer| match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" | "" => Ok(false),
        _ => Err("Please answer y or n".to_string()),
    })
}

fn parse_descriptors(answer: &str) -> Result<Vec<String>, String> {
    let descriptors = descriptor::split_list(answer);
    if descriptors.is_empty() {
        return Err("At least one input is required".to_string());
    }
    Ok(descriptors)
}

fn parse_workers(answer: &str) -> Result<usize, String> {
    match answer.parse::<usize>() {
        Ok(n) if (1..=MAX_INTERACTIVE_WORKERS).contains(&n) => Ok(n),
        _ => Err(format!(
            "Enter a whole number between 1 and {MAX_INTERACTIVE_WORKERS}"
        )),
    }
}

fn parse_timeout(answer: &str) -> Result<u64, String> {
    match answer.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err("Enter a whole number of seconds greater than 0".to_string()),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
