// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line-based path prompt for the terminal.

use crate::env_paths::{PathPrompt, PromptReply};
use regex::Regex;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Prompts on a writer and reads one line from a reader.
///
/// An empty line accepts the default; end of input cancels.
pub struct StdinPrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl StdinPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Read from stdin, prompt on stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PathPrompt for StdinPrompt<R, W> {
    fn prompt_for_path(&mut self, pattern: &Regex, default: &Path, label: &str) -> PromptReply {
        let _ = write!(self.writer, "{} [{}]: ", label, default.display());
        let _ = self.writer.flush();

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => PromptReply::cancelled(),
            Ok(_) => {
                let text = line.trim();
                if text.is_empty() {
                    return PromptReply::entered(default.display().to_string());
                }
                if !pattern.is_match(text) {
                    let _ = writeln!(self.writer, "Paths may not contain spaces.");
                }
                PromptReply::entered(text)
            }
        }
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
