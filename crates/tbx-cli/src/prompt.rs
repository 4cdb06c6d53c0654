//! Interactive field selection and renaming.
//!
//! The prompt only talks to a `BufRead` and a `Write`, so tests drive it
//! with in-memory buffers and the binary with locked stdin/stdout.

use std::io::{self, BufRead, Write};

use tbx_model::{FieldCatalog, FieldTemplate, SelectionConfig};
use thiserror::Error;

/// Invalid answer to the field selection question. The prompt reports it
/// and asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no fields entered")]
    Empty,
    #[error("'{0}' is not a field number")]
    NotANumber(String),
    #[error("{number} is out of range; enter numbers between 1 and {max}")]
    OutOfRange { number: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input ended before the field selection was complete")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parse a selection answer into 1-based field numbers.
///
/// Accepts `all` (any case) or comma-separated numbers. Repeated numbers are
/// kept once, in the order first given.
pub fn parse_selection(input: &str, field_count: usize) -> Result<Vec<usize>, SelectionError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return Ok((1..=field_count).collect());
    }
    let mut numbers = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let number: usize = token
            .parse()
            .map_err(|_| SelectionError::NotANumber(token.to_string()))?;
        if number == 0 || number > field_count {
            return Err(SelectionError::OutOfRange {
                number,
                max: field_count,
            });
        }
        if !numbers.contains(&number) {
            numbers.push(number);
        }
    }
    if numbers.is_empty() {
        return Err(SelectionError::Empty);
    }
    Ok(numbers)
}

/// The catalog as a numbered list, one field per line.
pub fn render_catalog(catalog: &FieldCatalog) -> String {
    let mut out = String::new();
    for (number, template) in catalog.numbered() {
        out.push_str(&format!("{number:>2}. {template}\n"));
    }
    out
}

pub struct SelectionPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> SelectionPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask which fields to keep and how to name them.
    pub fn run(&mut self, catalog: &FieldCatalog) -> Result<SelectionConfig, PromptError> {
        if catalog.is_empty() {
            writeln!(self.output, "No fields found in the document.")?;
            return Ok(SelectionConfig::default());
        }
        let chosen = self.choose_fields(catalog)?;
        let mut selection: SelectionConfig = chosen.iter().cloned().collect();
        if self.wants_rename()? {
            self.rename_fields(&chosen, &mut selection)?;
        } else {
            writeln!(self.output, "Using original field names.")?;
        }
        self.output.flush()?;
        Ok(selection)
    }

    fn choose_fields(&mut self, catalog: &FieldCatalog) -> Result<Vec<FieldTemplate>, PromptError> {
        writeln!(
            self.output,
            "Found {} fields in the document:",
            catalog.len()
        )?;
        write!(self.output, "{}", render_catalog(catalog))?;
        writeln!(
            self.output,
            "Enter the numbers of the fields to include, separated by commas (e.g. 1,3,5), or 'all':"
        )?;
        loop {
            let answer = self.ask("> ")?;
            match parse_selection(&answer, catalog.len()) {
                Ok(numbers) => {
                    let chosen: Vec<FieldTemplate> = numbers
                        .into_iter()
                        .filter_map(|number| catalog.by_number(number).cloned())
                        .collect();
                    writeln!(self.output, "Selected {} fields.", chosen.len())?;
                    return Ok(chosen);
                }
                Err(error) => writeln!(self.output, "Invalid selection: {error}")?,
            }
        }
    }

    fn wants_rename(&mut self) -> Result<bool, PromptError> {
        writeln!(self.output, "Keep the original field names or rename them? (keep/rename)")?;
        loop {
            let answer = self.ask("> ")?.to_lowercase();
            match answer.as_str() {
                "keep" | "k" => return Ok(false),
                "rename" | "r" => return Ok(true),
                _ => writeln!(self.output, "Please enter 'keep' or 'rename'.")?,
            }
        }
    }

    fn rename_fields(
        &mut self,
        chosen: &[FieldTemplate],
        selection: &mut SelectionConfig,
    ) -> Result<(), PromptError> {
        writeln!(self.output, "Press Enter to keep a field's original name.")?;
        for template in chosen {
            let answer = self.ask(&format!("New name for '{template}': "))?;
            selection.rename(template, &answer);
            let display = selection.display_name(template);
            if display == template.name() {
                writeln!(self.output, "  keeping '{template}'")?;
            } else {
                writeln!(self.output, "  '{template}' -> '{display}'")?;
            }
        }
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::UnexpectedEof);
        }
        Ok(line.trim().to_string())
    }
}
