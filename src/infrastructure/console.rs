//! Sink writing traversal lines to stdout.
//!
//! Coloring follows the global `colored` override set by the CLI.

use colored::Colorize;

use crate::config::Settings;
use crate::domain::{Line, Sink};

pub struct ConsoleSink {
    indent: usize,
}

impl ConsoleSink {
    pub fn new(settings: &Settings) -> Self {
        Self {
            indent: settings.indent,
        }
    }

    /// Text as printed, without color.
    pub fn format(&self, line: &Line) -> String {
        format!("{}{}", " ".repeat(self.indent * line.depth), line.text)
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, line: Line) {
        let text = self.format(&line);
        if line.depth == 0 {
            println!("{}", text.bold());
        } else {
            println!("{}", text);
        }
    }
}
