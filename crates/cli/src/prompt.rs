// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive confirmations.

use std::io::{self, BufRead, Write};

fn read_answer(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// Ask the user to type the number of jobs about to be deleted. Anything
/// else, including end of input, declines.
pub fn confirm_count(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
    count: usize,
) -> io::Result<bool> {
    write!(out, "{question}\nConfirm by typing in the number of jobs to be deleted: ")?;
    out.flush()?;
    Ok(read_answer(input)?.is_some_and(|answer| answer == count.to_string()))
}

/// Yes/no question. An empty answer or end of input picks `default`;
/// unrecognized answers ask again.
pub fn ask_yes_no(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
    default: bool,
) -> io::Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        write!(out, "{question} {hint} ")?;
        out.flush()?;
        let Some(answer) = read_answer(input)? else {
            return Ok(default);
        };
        match answer.as_str() {
            "" => return Ok(default),
            "y" | "ye" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "Please respond with 'yes' or 'no' (or 'y' or 'n').")?,
        }
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
