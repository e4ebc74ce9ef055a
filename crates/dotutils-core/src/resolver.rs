//! Interactive argument resolution.
//!
//! Given a flag's [`Signature`] and the raw values found on the command line,
//! the resolver fills every missing slot (from the default registry, a
//! literal default, or an interactive prompt) and converts every value with
//! its slot's check, prompting again until each check accepts.

use crate::check::Check;
use crate::console::Console;
use crate::error::ResolveError;
use crate::network::Network;
use crate::registry::ValidatorRegistry;
use crate::slot::{Signature, SlotKind};
use crate::value::Value;
use std::io;

/// Where prompted values come from. `Ok(None)` means input is exhausted.
pub trait LineSource {
    fn next_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

impl<F> LineSource for F
where
    F: FnMut(&str) -> io::Result<Option<String>>,
{
    fn next_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self(prompt)
    }
}

enum Entry {
    /// Taken from the command line, not yet checked.
    Raw(String),
    /// Already typed: prompted and accepted, or a declared default.
    Resolved(Value),
}

pub struct Resolver<'a> {
    validators: &'a ValidatorRegistry,
    network: &'a Network,
    console: &'a Console,
}

impl<'a> Resolver<'a> {
    pub fn new(validators: &'a ValidatorRegistry, network: &'a Network, console: &'a Console) -> Self {
        Self {
            validators,
            network,
            console,
        }
    }

    pub fn resolve(
        &self,
        signature: &Signature,
        supplied: Vec<String>,
        input: &mut dyn LineSource,
    ) -> Result<Vec<Value>, ResolveError> {
        let mut entries: Vec<Entry> = supplied.into_iter().map(Entry::Raw).collect();

        while entries.len() < signature.len() {
            let slot = &signature.slots[entries.len()];
            let value = match &slot.kind {
                SlotKind::Optional(fallback) => {
                    tracing::debug!(slot = %slot.name, value = %fallback, "optional slot defaulted");
                    fallback.clone()
                }
                SlotKind::Default(value) => {
                    tracing::debug!(slot = %slot.name, %value, "default slot filled");
                    value.clone()
                }
                SlotKind::Required | SlotKind::Multiple => {
                    let check = self.validators.check_for(&slot.name, &signature.fallback);
                    self.prompt_missing(&slot.name, check, input)?
                }
            };
            entries.push(Entry::Resolved(value));
        }

        let mut values = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let value = match entry {
                Entry::Resolved(value) => value,
                Entry::Raw(raw) => {
                    let (name, check) = self.slot_at(signature, position);
                    match check.check(&Value::Str(raw), self.network) {
                        Ok(value) => value,
                        Err(repeat) => {
                            self.console.error(&repeat);
                            self.prompt_replacement(&name, check, input)?
                        }
                    }
                }
            };
            values.push(value);
        }
        Ok(values)
    }

    /// Name and check for `position`. Positions past the declared slots belong
    /// to the `(Multiple)` slot, or to the signature's fallback check.
    fn slot_at<'s>(&'s self, signature: &'s Signature, position: usize) -> (String, &'s Check) {
        let slot = signature
            .slots
            .get(position)
            .or_else(|| signature.multiple());
        match slot {
            Some(slot) => (
                slot.name.clone(),
                self.validators.check_for(&slot.name, &signature.fallback),
            ),
            None => (format!("Argument {}", position + 1), &signature.fallback),
        }
    }

    fn prompt_missing(
        &self,
        name: &str,
        check: &Check,
        input: &mut dyn LineSource,
    ) -> Result<Value, ResolveError> {
        loop {
            self.show_choices(check);
            self.console.prompt(
                &["please provide a value for ", name, ": "],
                &["text", "yellow", "text"],
            );
            let prompt = format!("please provide a value for {name}: ");
            let line = read_line(input, name, &prompt)?;
            match check.check(&Value::Str(line), self.network) {
                Ok(value) => return Ok(value),
                Err(repeat) => self.console.error(&repeat),
            }
        }
    }

    fn prompt_replacement(
        &self,
        name: &str,
        check: &Check,
        input: &mut dyn LineSource,
    ) -> Result<Value, ResolveError> {
        loop {
            self.show_choices(check);
            let prompt = format!("Provide a new value for {name}: ");
            self.console.prompt(&[prompt.as_str()], &["text"]);
            let line = read_line(input, name, &prompt)?;
            match check.check(&Value::Str(line), self.network) {
                Ok(value) => return Ok(value),
                Err(repeat) => self.console.error(&repeat),
            }
        }
    }

    fn show_choices(&self, check: &Check) {
        if let Some(choices) = check.choices() {
            self.console
                .print_col(&format!("Choices: {}", choices.join(" ")), &["BLUE"]);
        }
    }
}

fn read_line(input: &mut dyn LineSource, slot: &str, prompt: &str) -> Result<String, ResolveError> {
    match input.next_line(prompt) {
        Ok(Some(line)) => Ok(line.trim().to_string()),
        Ok(None) => Err(ResolveError::InputUnavailable {
            slot: slot.to_string(),
        }),
        Err(source) => Err(ResolveError::Input {
            slot: slot.to_string(),
            source,
        }),
    }
}
