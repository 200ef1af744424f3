//! Interactive questions, injected so commands can be tested without a terminal

use colored::Colorize;
use std::io::{self, BufRead, Write};

pub trait Prompt {
    /// Ask a yes/no question; only `y` or `yes` (any case) confirm
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Ask for a line of free text, returned without the trailing newline
    fn input(&mut self, question: &str) -> io::Result<String>;
}

/// Prompt on stdout, answers read from stdin
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn ask(question: &str, hint: &str) -> io::Result<String> {
        print!("{} {} {} ", "?".bold().cyan(), question, hint.dimmed());
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().lock().read_line(&mut response)?;
        Ok(response.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let response = Self::ask(question, "[y/n] ›")?;
        Ok(is_yes(&response))
    }

    fn input(&mut self, question: &str) -> io::Result<String> {
        Self::ask(question, "›")
    }
}

fn is_yes(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompt answering from a fixed script; questions are recorded
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: std::collections::VecDeque<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedPrompt {
            answers: answers.iter().map(|a| (*a).to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.input(question).map(|answer| is_yes(&answer))
    }

    fn input(&mut self, question: &str) -> io::Result<String> {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer"))
    }
}
