//! Indentation-tracking text accumulator used by all emitters.

use crate::error::Result;

#[derive(Debug)]
pub struct CodeWriter {
    out: String,
    level: usize,
    unit: String,
}

impl CodeWriter {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            level: 0,
            unit: unit.into(),
        }
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.level {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Write a line ignoring indentation (template echo and markers).
    pub fn verbatim(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Empty line, never indented.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `begin`, run `body` one level deeper, then write `end` at the
    /// original level. The level is restored and `end` written even when
    /// `body` fails; its error is returned afterwards.
    pub fn block<F>(&mut self, begin: &str, end: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.line(begin);
        let result = self.indented(1, body);
        self.line(end);
        result
    }

    /// Run `body` `levels` deeper.
    pub fn indented<F>(&mut self, levels: usize, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.level += levels;
        let result = body(self);
        self.level -= levels;
        result
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
