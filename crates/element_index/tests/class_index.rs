use element_index::ClassIndex;
use markup::{Document, Element, NodeKey};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn lookup_finds_every_token_of_an_element() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);

    let key = document.append_element(None, Element::new("div").with_attribute("class", "a b c"));

    for token in ["a", "b", "c"] {
        assert_eq!(index.lookup(token), [key], "token `{token}`");
    }
    assert!(index.lookup("d").is_empty());
}

#[test]
fn bind_time_scan_indexes_preexisting_elements_in_document_order() {
    init_logging();
    let mut document = Document::new();
    let first = document.append_element(None, Element::new("div").with_attribute("class", "x"));
    let second = document.append_element(None, Element::new("div").with_attribute("class", "x y"));
    let third = document.append_element(None, Element::new("div").with_attribute("class", "y"));

    let index = ClassIndex::attach(&mut document);

    assert_eq!(index.lookup("x"), [first, second]);
    assert_eq!(index.lookup("y"), [second, third]);
}

#[test]
fn class_value_change_lands_on_exactly_the_new_token_set() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let key = document.append_element(None, Element::new("div").with_attribute("class", "a b"));

    document.set_attribute(key, "class", "b c");

    assert!(index.lookup("a").is_empty());
    // The overlapping token keeps the element exactly once.
    assert_eq!(index.lookup("b"), [key]);
    assert_eq!(index.lookup("c"), [key]);
}

#[test]
fn overlapping_change_does_not_disturb_other_elements() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let stable = document.append_element(None, Element::new("div").with_attribute("class", "b"));
    let moving = document.append_element(None, Element::new("div").with_attribute("class", "a b"));

    document.set_attribute(moving, "class", "b c");

    let bucket = index.lookup("b");
    assert_eq!(bucket.iter().filter(|key| **key == stable).count(), 1);
    assert_eq!(bucket.iter().filter(|key| **key == moving).count(), 1);
    assert_eq!(bucket[0], stable);
}

#[test]
fn removing_the_class_attribute_clears_every_bucket() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let key = document.append_element(None, Element::new("div").with_attribute("class", "x y"));
    let other = document.append_element(None, Element::new("div").with_attribute("class", "z"));

    document.remove_attribute(key, "class");

    assert!(index.lookup("x").is_empty());
    assert!(index.lookup("y").is_empty());
    assert_eq!(index.lookup("z"), [other]);
}

#[test]
fn element_removal_is_idempotent_and_leaves_others_intact() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let doomed = document.append_element(None, Element::new("div").with_attribute("class", "a b"));
    let survivor = document.append_element(None, Element::new("div").with_attribute("class", "a"));

    document.remove_element(doomed);
    document.remove_element(doomed);

    assert_eq!(index.lookup("a"), [survivor]);
    assert!(index.lookup("b").is_empty());
}

#[test]
fn subtree_removal_unindexes_descendants() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let outer =
        document.append_element(None, Element::new("section").with_attribute("class", "shell"));
    let inner =
        document.append_element(Some(outer), Element::new("p").with_attribute("class", "note"));
    let _ = inner;

    document.remove_element(outer);

    assert!(index.lookup("shell").is_empty());
    assert!(index.lookup("note").is_empty());
    assert!(index.is_empty());
}

#[test]
fn untracked_attributes_never_touch_the_index() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let key = document.append_element(None, Element::new("div").with_attribute("class", "a"));

    document.set_attribute(key, "data-state", "active b");
    document.remove_attribute(key, "data-state");

    assert_eq!(index.lookup("a"), [key]);
    assert!(index.lookup("active").is_empty());
    assert!(index.lookup("b").is_empty());
    assert_eq!(index.token_count(), 1);
}

#[test]
fn elements_without_class_are_simply_absent() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    document.append_element(None, Element::new("br"));
    let key = document.append_element(None, Element::new("div").with_flag("class"));

    // A valueless class attribute contributes no tokens.
    assert!(index.is_empty());

    document.set_attribute(key, "class", "now");
    assert_eq!(index.lookup("now"), [key]);
}

#[test]
fn lookup_is_a_snapshot_not_a_live_view() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let key = document.append_element(None, Element::new("div").with_attribute("class", "a"));

    let snapshot: Vec<NodeKey> = index.lookup("a");
    document.remove_element(key);

    assert_eq!(snapshot, [key]);
    assert!(index.lookup("a").is_empty());
}

#[test]
fn case_sensitive_tokens() {
    init_logging();
    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let key = document.append_element(None, Element::new("div").with_attribute("class", "Nav"));

    assert_eq!(index.lookup("Nav"), [key]);
    assert!(index.lookup("nav").is_empty());
}
