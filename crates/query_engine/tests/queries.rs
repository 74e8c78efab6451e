use element_index::ClassIndex;
use markup::{Document, Element};
use query_engine::{select, select_first, select_first_indexed, select_indexed};
use selectors::Selector;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixture() -> (Document, std::sync::Arc<ClassIndex>) {
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);

    document.append_element(
        None,
        Element::new("div")
            .with_attribute("class", "highlight selected")
            .with_attribute("data-state", "active"),
    );
    document.append_element(
        None,
        Element::new("div")
            .with_attribute("class", "highlight")
            .with_attribute("data-state", "inactive"),
    );
    document.append_element(
        None,
        Element::new("span")
            .with_attribute("class", "highlight")
            .with_attribute("data-state", "active"),
    );
    document.append_element(None, Element::new("div").with_attribute("data-state", "active"));

    (document, index)
}

#[test]
fn tag_class_and_attribute_conjunction() {
    init_logging();
    let (document, _index) = fixture();
    let selector = Selector::compile("div.highlight[data-state=active]").unwrap();

    let hits = select(&document, &selector);
    assert_eq!(hits.len(), 1);
    let element = document.element(hits[0]).unwrap();
    assert_eq!(element.tag_name(), "div");
    assert_eq!(element.attribute_value("class"), Some("highlight selected"));
}

#[test]
fn indexed_and_scanned_paths_agree() {
    init_logging();
    let (document, index) = fixture();

    for expression in [
        "div.highlight[data-state=active]",
        ".highlight",
        "span.highlight",
        "div[data-state=active]",
        "*",
        ".missing",
    ] {
        let selector = Selector::compile(expression).unwrap();
        let mut scanned = select(&document, &selector);
        let mut indexed = select_indexed(&document, &index, &selector);
        scanned.sort_unstable();
        indexed.sort_unstable();
        assert_eq!(scanned, indexed, "for `{expression}`");
    }
}

#[test]
fn index_candidates_are_reverified_after_mutation() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let key = document.append_element(
        None,
        Element::new("div")
            .with_attribute("class", "menu")
            .with_attribute("data-open", "yes"),
    );
    let selector = Selector::compile("div.menu[data-open=yes]").unwrap();
    assert_eq!(select_indexed(&document, &index, &selector), [key]);

    // Still in the `.menu` bucket, but no longer fully eligible.
    document.set_attribute(key, "data-open", "no");
    assert!(select_indexed(&document, &index, &selector).is_empty());
}

#[test]
fn select_first_returns_document_order_winner() {
    init_logging();
    let (document, index) = fixture();
    let selector = Selector::compile(".highlight").unwrap();

    let first = select_first(&document, &selector).unwrap();
    let element = document.element(first).unwrap();
    assert_eq!(element.attribute_value("data-state"), Some("active"));

    let first_indexed = select_first_indexed(&document, &index, &selector).unwrap();
    assert_eq!(first, first_indexed);
}

#[test]
fn queries_reflect_live_document_edits() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let selector = Selector::compile("p.note").unwrap();

    assert!(select_indexed(&document, &index, &selector).is_empty());

    let key = document.append_element(None, Element::new("p").with_attribute("class", "note"));
    assert_eq!(select_indexed(&document, &index, &selector), [key]);

    document.set_attribute(key, "class", "aside");
    assert!(select_indexed(&document, &index, &selector).is_empty());

    document.set_attribute(key, "class", "note aside");
    assert_eq!(select_indexed(&document, &index, &selector), [key]);

    document.remove_element(key);
    assert!(select_indexed(&document, &index, &selector).is_empty());
}

#[test]
fn pseudo_classes_participate_end_to_end() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let on = document.append_element(
        None,
        Element::new("input")
            .with_attribute("class", "field")
            .with_flag("checked"),
    );
    document.append_element(None, Element::new("input").with_attribute("class", "field"));

    let selector = Selector::compile("input.field:checked").unwrap();
    assert_eq!(select_indexed(&document, &index, &selector), [on]);
    assert_eq!(select(&document, &selector), [on]);
}
