use curly::{render, Engine, Options, Store, Tags, DATA_SHAPE_MISMATCH};
use serde_json::json;

#[test]
fn test_literal_passthrough() {
    let store = Store::new().with_must("a", 1).with_must("b", json!({ "c": 2 }));
    for text in ["", "plain", "a { b } c", "{ {{ }} }}", "line one\nline two"] {
        assert_eq!(render(text, &store, Options::new()).unwrap(), text);
    }
}

#[test]
fn test_scalar_raw_and_encoded() {
    let engine = Engine::new(Options::new().escape(["'"]));
    let store = Store::new().with_must("x", "<it's>");

    assert_eq!(engine.render("{{x}}", &store).unwrap(), r"<it\'s>");
    assert_eq!(engine.render("{{{x}}}", &store).unwrap(), "&lt;it&#39;s&gt;");
}

#[test]
fn test_number_and_bool() {
    let store = Store::new()
        .with_must("n", 42)
        .with_must("f", 2.5)
        .with_must("b", false);

    assert_eq!(
        render("{{n}} {{f}} {{b}}", &store, Options::new()).unwrap(),
        "42 2.5 false"
    );
}

#[test]
fn test_compound_flattening() {
    let store = Store::new().with_must("x", json!({ "a": 1, "b": 2 }));

    assert_eq!(
        render("{{x.a}}-{{x.b}}", &store, Options::new()).unwrap(),
        "1-2"
    );
}

#[test]
fn test_each_enumeration_order() {
    let store = Store::new()
        .with_must("obj", json!({ "a": 1, "b": 2 }))
        .with_must("none", json!({}))
        .with_must("list", json!([]));
    let output = render(
        "{{#each obj}}{{@key}}={{@value}};{{/each}}|{{#each none}}x{{/each}}|{{#each list}}y{{/each}}",
        &store,
        Options::new(),
    );

    assert_eq!(output.unwrap(), "a=1;b=2;||");
}

#[test]
fn test_if_missing_path_never_fails() {
    let output = render("<{{#if a.b.c.d}}x{{/if}}>", &Store::new(), Options::new());

    assert_eq!(output.unwrap(), "<>");
}

#[test]
fn test_each_missing_parent_fails() {
    let error = render("{{#each a.b}}x{{/each}}", &Store::new(), Options::new()).unwrap_err();

    assert_eq!(error.reason(), DATA_SHAPE_MISMATCH);
}

#[test]
fn test_for_skips_missing_indices() {
    let store = Store::new().with_must("items", json!(["a", "b"]));
    let output = render(
        "{{#for 3 items}}({{@index}}){{/for}}",
        &store,
        Options::new(),
    );

    assert_eq!(output.unwrap(), "(0)(1)");
}

#[test]
fn test_repeated_render_is_stable() {
    let engine = Engine::default();
    let text = "{{a}} {{#each b}}{{@value}}{{/each}} {{c.d}}";
    let first = engine.compile(text);
    let second = engine.compile(text);
    let full = Store::new()
        .with_must("a", "A")
        .with_must("b", json!([1, 2]))
        .with_must("c", json!({ "d": "D" }));
    let partial = Store::new().with_must("b", json!([3]));

    let expected = "A 12 D";
    assert_eq!(first.render(&full).unwrap(), expected);
    assert_eq!(second.render(&full).unwrap(), expected);
    // Nothing from the previous render leaks into the next one.
    assert_eq!(first.render(&partial).unwrap(), "{{a}} 3 {{c.d}}");
    assert_eq!(first.render(&full).unwrap(), expected);
}

#[test]
fn test_concurrent_renders() {
    let engine = Engine::default();
    let template = engine.compile("{{n}}:{{#for 0 rows}}{{@value}}{{/for}}");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let template = &template;
                scope.spawn(move || {
                    let store = Store::new()
                        .with_must("n", n)
                        .with_must("rows", json!([n, n]));
                    template.render(&store).unwrap()
                })
            })
            .collect();

        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("{n}:{n}{n}"));
        }
    });
}

#[test]
fn test_collapse() {
    let output = render("a\n\t b", &Store::new(), Options::new().collapse(true));

    assert_eq!(output.unwrap(), "a b");
}

#[test]
fn test_nested_sections() {
    let store = Store::new().with_must(
        "groups",
        json!({
            "fruit": { "items": ["apple", "pear"] },
            "veg": { "items": ["kale"] }
        }),
    );
    let output = render(
        "{{#each groups}}{{@key}}: {{#each items}}{{@value}} {{/each}}| {{/each}}",
        &store,
        Options::new(),
    );

    assert_eq!(output.unwrap(), "fruit: apple pear | veg: kale | ");
}

#[test]
fn test_custom_tags_from_json() {
    let options = Options::from_json(
        r#"{ "tags": { "raw": ["[[", "]]"], "encoded": ["[[=", "]]"], "section": ["[[#", "[[/", "]]"] } }"#,
    )
    .unwrap();
    let store = Store::new()
        .with_must("name", "<x>")
        .with_must("show", true);
    let output = render(
        "[[name]] [[= name ]] [[#if show]]yes[[/if]] {{name}}",
        &store,
        options,
    );

    assert_eq!(output.unwrap(), "<x> &lt;x&gt; yes {{name}}");
}

#[test]
fn test_remove_unmatched() {
    let output = render(
        "a{{missing}}b{{#with x}}c{{/with}}d",
        &Store::new(),
        Options::new().remove_unmatched(true),
    );

    assert_eq!(output.unwrap(), "abd");
}

#[test]
fn test_custom_encode_table() {
    let options = Options::new().encode([("a", "b"), ("b", "c")]);
    let output = render("{{{v}}} {{v}}", &Store::new().with_must("v", "ab"), options);

    assert_eq!(output.unwrap(), "cc ab");
}

#[test]
fn test_tags_builder() {
    let options = Options::new().tags(Tags::default().section("{%", "{%end", "%}"));
    let output = render(
        "{%if ok %}yes{%endif%}",
        &Store::new().with_must("ok", 1),
        options,
    );

    assert_eq!(output.unwrap(), "yes");
}
