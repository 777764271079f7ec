//! Evaluation of `each`, `if` and `for` sections.
//!
//! Each evaluation compiles the section body again with the same engine and
//! renders it against data derived from the current [`Store`].
use super::{
    resolve::{resolve, resolve_lenient},
    truthy::is_truthy,
    Renderer,
};
use crate::{
    compile::{Kind, Section},
    log::Error,
    Store,
};
use serde_json::{Map, Value};

const KEY: &str = "@key";
const INDEX: &str = "@index";
const VALUE: &str = "@value";

impl<'source, 'store> Renderer<'source, 'store> {
    /// Evaluate a [`Section`] and return its output.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the section path reads a member of a missing
    /// value, or rendering the section body fails.
    pub(super) fn evaluate_section(&self, section: &Section<'source>) -> Result<String, Error> {
        tracing::trace!(kind = %section.kind, arguments = section.arguments, "evaluating section");

        match section.kind {
            Kind::Each => self.evaluate_each(section),
            Kind::If => self.evaluate_if(section),
            Kind::For => self.evaluate_for(section),
            Kind::Unknown => {
                tracing::debug!(
                    section = section.region.literal(self.template.source),
                    "unknown section kind renders empty"
                );
                Ok(String::new())
            }
        }
    }

    /// Render the body once for every member of the object at the section path.
    ///
    /// Arrays are visited by index, and anything else renders nothing.
    fn evaluate_each(&self, section: &Section<'source>) -> Result<String, Error> {
        let path = section.arguments.split_whitespace().last().unwrap_or_default();
        let target = resolve(self.store, path)
            .map_err(|e| e.with_pointer(self.template.source, section.region))?;

        let mut buffer = String::new();
        match target {
            Some(Value::Object(object)) => {
                for (key, member) in object {
                    let data = iteration(KEY, Value::from(key.as_str()), member);
                    buffer.push_str(&self.render_body(section.body, &data)?);
                }
            }
            Some(Value::Array(array)) => {
                for (index, element) in array.iter().enumerate() {
                    let data = iteration(KEY, Value::from(index.to_string()), element);
                    buffer.push_str(&self.render_body(section.body, &data)?);
                }
            }
            _ => {}
        }

        Ok(buffer)
    }

    /// Render the body with the current [`Store`] if the section path is truthy.
    ///
    /// A missing or falsy value anywhere along the path is treated as false.
    fn evaluate_if(&self, section: &Section<'source>) -> Result<String, Error> {
        let path = section.arguments.split_whitespace().last().unwrap_or_default();

        if resolve_lenient(self.store, path).is_some_and(is_truthy) {
            return self.render_body(section.body, self.store);
        }

        Ok(String::new())
    }

    /// Render the body for each index in `0..count` that has an element in
    /// the array named by the second argument.
    ///
    /// A missing or zero count uses the length of the array instead.
    fn evaluate_for(&self, section: &Section<'source>) -> Result<String, Error> {
        let mut terms = section.arguments.split_whitespace();
        let count = terms.next().map_or(0, parse_count);
        let target = terms
            .next()
            .and_then(|key| self.store.get(key))
            .filter(|value| is_truthy(value));

        let (length, limit) = match target {
            Some(Value::Array(array)) => (array.len(), array.len()),
            Some(Value::String(string)) => {
                let chars = string.chars().count();
                (chars, chars)
            }
            // Objects have no length, but may hold members named by index.
            Some(Value::Object(object)) => (
                0,
                object
                    .keys()
                    .filter_map(|key| key.parse::<usize>().ok())
                    .max()
                    .map_or(0, |last| last + 1),
            ),
            _ => (0, 0),
        };
        let bound = if count != 0 {
            usize::try_from(count).unwrap_or(0)
        } else {
            length
        };

        let mut buffer = String::new();
        for index in 0..bound.min(limit) {
            let element = match target {
                Some(Value::Array(array)) => array.get(index).cloned(),
                Some(Value::String(string)) => string
                    .chars()
                    .nth(index)
                    .map(|c| Value::from(c.to_string())),
                Some(Value::Object(object)) => object.get(&index.to_string()).cloned(),
                _ => None,
            };
            // Indices without an element are skipped, not rendered empty.
            if let Some(element) = element {
                let data = iteration(INDEX, Value::from(index), &element);
                buffer.push_str(&self.render_body(section.body, &data)?);
            }
        }

        Ok(buffer)
    }

    /// Compile and render a section body with the given [`Store`].
    fn render_body(&self, body: &'source str, store: &Store) -> Result<String, Error> {
        self.template.engine.compile(body).render(store)
    }
}

/// Build the [`Store`] for one iteration of a section.
///
/// An object entry is copied with `marker` added to it, an array entry
/// becomes an object keyed by element index, and any other entry is wrapped
/// as `{ marker: .., "@value": entry }`.
fn iteration(marker: &str, position: Value, entry: &Value) -> Store {
    let data = match entry {
        Value::Object(object) => {
            let mut object = object.clone();
            object.insert(marker.to_string(), position);
            object
        }
        Value::Array(array) => {
            let mut object: Map<String, Value> = array
                .iter()
                .enumerate()
                .map(|(index, element)| (index.to_string(), element.clone()))
                .collect();
            object.insert(marker.to_string(), position);
            object
        }
        _ => {
            let mut object = Map::new();
            object.insert(marker.to_string(), position);
            object.insert(VALUE.to_string(), entry.clone());
            object
        }
    };

    Store::from(data)
}

/// Parse the leading integer of a section count, as in `3` or `3px`.
///
/// Returns zero when the term does not begin with a number.
fn parse_count(term: &str) -> i64 {
    let (sign, digits) = match term.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, term.strip_prefix('+').unwrap_or(term)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}
