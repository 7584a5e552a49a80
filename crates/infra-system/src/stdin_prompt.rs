// Terminal prompt adapter

use std::io::{BufRead, Write};

use bidsify_core::port::Prompt;

/// Reads operator answers from standard input
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

/// Strip the line terminator (`\n` or `\r\n`)
fn trim_newline(mut line: String) -> String {
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }
    line
}

fn read_answer(reader: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(trim_newline(line)))
}

impl Prompt for StdinPrompt {
    fn read_line(&self) -> std::io::Result<Option<String>> {
        // Questions go through the logger; make sure they are visible first
        std::io::stdout().flush()?;
        read_answer(&mut std::io::stdin().lock())
    }
}
