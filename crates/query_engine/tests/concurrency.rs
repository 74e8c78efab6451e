//! Readers hammer the class index while a writer mutates the document.

use element_index::ClassIndex;
use markup::{Document, Element};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread;

#[test]
fn lookups_stay_consistent_under_concurrent_mutation() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut document = Document::new();
    let index = ClassIndex::attach(&mut document);
    let anchor =
        document.append_element(None, Element::new("div").with_attribute("class", "stable"));
    let shared = Arc::new(RwLock::new(document));

    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for _ in 0..300 {
                let mut document = shared.write();
                let key = document
                    .append_element(None, Element::new("div").with_attribute("class", "a b"));
                document.set_attribute(key, "class", "b c");
                document.remove_attribute(key, "class");
                document.set_attribute(key, "class", "a c");
                document.remove_element(key);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    // The untouched element stays exactly once in its bucket
                    // through every snapshot.
                    assert_eq!(index.lookup("stable"), [anchor]);

                    // No snapshot ever holds a duplicated key.
                    for token in ["a", "b", "c"] {
                        let bucket = index.lookup(token);
                        let mut deduped = bucket.clone();
                        deduped.sort_unstable();
                        deduped.dedup();
                        assert_eq!(deduped.len(), bucket.len(), "token `{token}`");
                    }
                }
            })
        })
        .collect();

    writer.join().expect("writer thread panicked");
    for reader in readers {
        reader.join().expect("reader thread panicked");
    }

    // Everything transient is gone; the anchor remains.
    assert_eq!(index.lookup("stable"), [anchor]);
    for token in ["a", "b", "c"] {
        assert!(index.lookup(token).is_empty(), "token `{token}`");
    }
}
