//! Property tests for snake_case / camelCase translation.

use proptest::prelude::*;
use protobind_util::naming::{camel_to_snake, snake_to_camel};

proptest! {
    #[test]
    fn snake_to_camel_removes_underscores(name in "[a-zA-Z_]{0,24}") {
        prop_assert!(!snake_to_camel(&name).contains('_'));
    }

    #[test]
    fn snake_to_camel_is_idempotent(name in "[a-zA-Z_]{0,24}") {
        let once = snake_to_camel(&name);
        prop_assert_eq!(snake_to_camel(&once), once.clone());
    }

    #[test]
    fn camel_to_snake_lowercases(name in "[a-z][a-zA-Z]{0,20}") {
        let snake = camel_to_snake(&name);
        prop_assert!(!snake.chars().any(char::is_uppercase));
        prop_assert_eq!(snake.replace('_', ""), name.to_lowercase());
    }

    #[test]
    fn simple_camel_names_round_trip(words in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let mut camel = words[0].clone();
        for word in &words[1..] {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                camel.extend(first.to_uppercase());
                camel.push_str(chars.as_str());
            }
        }
        prop_assert_eq!(camel_to_snake(&camel), words.join("_"));
        prop_assert_eq!(snake_to_camel(&camel_to_snake(&camel)), camel);
    }
}
