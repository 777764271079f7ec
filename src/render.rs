mod resolve;
mod section;
mod truthy;

use crate::{
    compile::Template,
    format::{collapse, encode, escape, to_text},
    log::Error,
    Engine, Options, Store,
};
use serde_json::Value;
use std::borrow::Cow;

/// Render the given text with the given [`Store`] and [`Options`][`crate::Options`].
///
/// Provides a shortcut to compile and render in one call when the compiled
/// `Template` is not needed again.
///
/// # Examples
///
/// ```
/// use curly::{render, Options, Store};
///
/// let output = render(
///     "{{#each people }}{{ @key }} is {{ @value }}. {{/each}}",
///     &Store::new().with_must("people", serde_json::json!({ "taylor": 30, "jordan": 28 })),
///     Options::new(),
/// );
///
/// assert_eq!(output.unwrap(), "taylor is 30. jordan is 28. ");
/// ```
pub fn render(text: &str, store: &Store, options: Options) -> Result<String, Error> {
    Engine::new(options).render(text, store)
}

/// Renders one [`Template`] with one [`Store`].
///
/// Each `Renderer` owns a fresh copy of the template slots, so rendering
/// never changes the `Template` itself.
pub struct Renderer<'source, 'store> {
    /// The template being rendered.
    template: &'store Template<'source>,
    /// The Store that the Template is rendered with.
    store: &'store Store,
}

impl<'source, 'store> Renderer<'source, 'store> {
    /// Create a new Renderer.
    pub fn new(template: &'store Template<'source>, store: &'store Store) -> Self {
        Renderer { template, store }
    }

    /// Render the [`Template`] stored inside the [`Renderer`].
    ///
    /// Every top-level member of the `Store` is written to the slots that
    /// display it, then every section is evaluated into its own slot.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if evaluating a section fails.
    pub fn render(&self) -> Result<String, Error> {
        let mut slots: Vec<Cow<'source, str>> = self
            .template
            .slots
            .iter()
            .map(|slot| Cow::Borrowed(*slot))
            .collect();

        for (key, value) in self.store.iter() {
            if self.template.is_referenced(key) {
                self.fill(&mut slots, key, value);
            }
        }

        for section in self.template.sections() {
            let output = self.evaluate_section(section)?;
            slots[section.slot] = Cow::Owned(output);
        }

        let output = slots.concat();
        if self.template.engine.options().collapse {
            return Ok(collapse(&output).into_owned());
        }

        Ok(output)
    }

    /// Write the given [`Value`] to every slot that displays `path`.
    ///
    /// Objects are never written directly, each member is written to the
    /// slots of `path.member` instead. Arrays are written as JSON, and
    /// their elements are also available as `path.0`, `path.1` and so on.
    fn fill(&self, slots: &mut [Cow<'source, str>], path: &str, value: &Value) {
        match value {
            Value::Object(object) => {
                for (key, member) in object {
                    self.fill_member(slots, path, key, member);
                }
            }
            Value::Array(array) => {
                self.write(slots, path, value);
                for (index, element) in array.iter().enumerate() {
                    self.fill_member(slots, path, &index.to_string(), element);
                }
            }
            // A null has no members to visit, and is not written.
            Value::Null => {}
            _ => self.write(slots, path, value),
        }
    }

    fn fill_member(&self, slots: &mut [Cow<'source, str>], path: &str, key: &str, value: &Value) {
        let member_path = format!("{path}.{key}");
        if self.template.is_referenced(&member_path) {
            self.fill(slots, &member_path, value);
        }
    }

    /// Write the text of a value to the slots that display `path`.
    fn write(&self, slots: &mut [Cow<'source, str>], path: &str, value: &Value) {
        let references = self.template.references(path);
        if references.is_empty() {
            return;
        }

        let options = self.template.engine.options();
        let text = to_text(value);
        let raw = escape(&text, &options.escape);
        let mut encoded: Option<String> = None;

        for reference in references {
            slots[reference.slot] = if reference.encode {
                let encoded = encoded
                    .get_or_insert_with(|| escape(&encode(&text, &options.encode), &options.escape));
                Cow::Owned(encoded.clone())
            } else {
                Cow::Owned(raw.clone())
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Renderer;
    use crate::{Engine, Options, Store};
    use serde_json::json;

    #[test]
    fn test_render_raw() {
        let engine = Engine::default();
        let result = Renderer::new(&engine.compile("hello there"), &Store::new()).render();

        assert_eq!(result.unwrap(), "hello there");
    }

    #[test]
    fn test_render_output() {
        let engine = Engine::default();
        let result = Renderer::new(
            &engine.compile("hello there, {{ name }}!"),
            &Store::new().with_must("name", "taylor"),
        )
        .render();

        assert_eq!(result.unwrap(), "hello there, taylor!");
    }

    #[test]
    fn test_render_nested_object() {
        let engine = Engine::default();
        let result = engine.render(
            "{{x.a}}-{{x.b}}-{{x.c.d}}",
            &Store::new().with_must("x", json!({ "a": 1, "b": 2, "c": { "d": "deep" } })),
        );

        assert_eq!(result.unwrap(), "1-2-deep");
    }

    #[test]
    fn test_render_object_not_written_directly() {
        let engine = Engine::default();
        let result = engine.render("{{x}}|{{x.a}}", &Store::new().with_must("x", json!({ "a": 1 })));

        assert_eq!(result.unwrap(), "{{x}}|1");
    }

    #[test]
    fn test_render_array() {
        let engine = Engine::default();
        let result = engine.render(
            "{{list}} {{list.1}} {{list.2.name}}",
            &Store::new().with_must("list", json!(["a", "b", { "name": "c" }])),
        );

        assert_eq!(result.unwrap(), r#"["a","b",{"name":"c"}] b c"#);
    }

    #[test]
    fn test_render_null_unresolved() {
        let engine = Engine::default();
        let result = engine.render("[{{gone}}]", &Store::new().with_must("gone", json!(null)));

        assert_eq!(result.unwrap(), "[{{gone}}]");
    }

    #[test]
    fn test_render_unmatched() {
        let store = Store::new().with_must("a", 1);

        assert_eq!(
            Engine::default().render("{{a}}{{ b }}{{{c}}}", &store).unwrap(),
            "1{{ b }}{{{c}}}"
        );
        assert_eq!(
            Engine::new(Options::new().remove_unmatched(true))
                .render("{{a}}{{ b }}{{{c}}}", &store)
                .unwrap(),
            "1"
        );
    }

    #[test]
    fn test_render_encode_then_escape() {
        let engine = Engine::new(Options::new().escape(["&"]));
        let result = engine.render(
            "{{v}} {{{v}}}",
            &Store::new().with_must("v", "a&b"),
        );

        assert_eq!(result.unwrap(), r"a\&b a\&amp;b");
    }

    #[test]
    fn test_render_collapse() {
        let engine = Engine::new(Options::new().collapse(true));
        let result = engine.render("a\n\t {{b}}\n\n", &Store::new().with_must("b", "c"));

        assert_eq!(result.unwrap(), "a c ");
    }

    #[test]
    fn test_render_reuse_template() {
        let engine = Engine::default();
        let template = engine.compile("{{a}}/{{b}}");

        assert_eq!(
            template.render(&Store::new().with_must("a", 1).with_must("b", 2)).unwrap(),
            "1/2"
        );
        assert_eq!(
            template.render(&Store::new().with_must("a", 3)).unwrap(),
            "3/{{b}}"
        );
    }
}
