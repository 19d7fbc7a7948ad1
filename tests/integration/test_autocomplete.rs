//! Autocomplete lookup against stored question patterns.

use std::sync::Arc;

use civiq::{Dispatcher, ParserRegistry, QuestionPattern};

#[test]
fn typed_prefix_selects_matching_patterns() {
    let dispatcher = Dispatcher::new(Arc::new(ParserRegistry::new()), Vec::new());

    let patterns = vec![
        QuestionPattern::new("census", "how many {noun} live in {place}?"),
        QuestionPattern::new("werewolves", "is {person} a werewolf?"),
    ];

    let hits = dispatcher.autocomplete(&patterns, "How Many");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].module, "census");

    let hits = dispatcher.autocomplete(&patterns, "is a w");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].module, "werewolves");

    assert!(dispatcher.autocomplete(&patterns, "what time").is_empty());
}
