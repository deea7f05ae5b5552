use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Intent, IntentFlags};

// "order" appears in both the order and confirm_order alternations; the
// responder's rule order decides which one wins.
static INTENT_PATTERNS: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    [
        (
            Intent::Greeting,
            r"\b(hi|hello|hey|greetings|morning|afternoon|evening)\b",
        ),
        (Intent::Pizza, r"\bpizza\b"),
        (Intent::Offer, r"\b(offers?|promotions?|deals?)\b"),
        (Intent::Size, r"\b(size|sizes|price|prices)\b"),
        (Intent::Recommend, r"\brecommend\b"),
        (Intent::Order, r"\border\b"),
        (Intent::Customize, r"\b(custom|customize)\b"),
        (Intent::Topping, r"\b(topping|toppings)\b"),
        (Intent::Vegan, r"\b(vegan|vegetarian)\b"),
        (Intent::Thank, r"\b(thank|thanks)\b"),
        (Intent::ConfirmOrder, r"\b(order|confirm|yes|okay|sure)\b"),
        (Intent::CancelOrder, r"\b(cancel|no|stop)\b"),
    ]
    .into_iter()
    .map(|(intent, pattern)| (intent, Regex::new(pattern).expect("valid intent regex")))
    .collect()
});

/// Tests every intent pattern against the lower-cased text. All patterns run;
/// any number of intents may come back set.
pub fn classify(text: &str) -> IntentFlags {
    let lower = text.to_lowercase();

    let mut flags = IntentFlags::new();
    for (intent, pattern) in INTENT_PATTERNS.iter() {
        if pattern.is_match(&lower) {
            flags.set(*intent);
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(text: &str) -> Vec<Intent> {
        classify(text).active().collect()
    }

    #[test]
    fn every_intent_has_a_pattern() {
        for intent in Intent::ALL {
            assert!(INTENT_PATTERNS.iter().any(|(i, _)| *i == intent));
        }
    }

    #[test]
    fn hello_there_is_only_a_greeting() {
        assert_eq!(active("hello there"), vec![Intent::Greeting]);
    }

    #[test]
    fn greeting_and_offer_together() {
        assert_eq!(
            active("hi, any offers?"),
            vec![Intent::Greeting, Intent::Offer]
        );
        assert!(classify("any deal on large pizzas").contains(Intent::Offer));
    }

    #[test]
    fn order_word_also_counts_as_confirmation() {
        let flags = classify("I want to order a large Pepperoni");
        assert!(flags.contains(Intent::Order));
        assert!(flags.contains(Intent::ConfirmOrder));
        assert!(!flags.contains(Intent::Pizza));
        assert!(!flags.contains(Intent::CancelOrder));
    }

    #[test]
    fn matches_whole_words_only() {
        assert!(classify("this is nothing").is_empty());
        assert!(classify("shipping ordered").is_empty());
        assert!(classify("NO thanks").contains(Intent::CancelOrder));
        assert!(classify("NO thanks").contains(Intent::Thank));
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(classify("RECOMMEND"), classify("recommend"));
        assert!(classify("Good Evening").contains(Intent::Greeting));
    }

    #[test]
    fn unmatched_text_has_no_flags() {
        assert!(classify("").is_empty());
        assert!(classify("qwerty asdf").is_empty());
    }

    #[test]
    fn classification_is_repeatable() {
        let text = "yes please, a vegan pizza with custom toppings";
        assert_eq!(classify(text), classify(text));
        assert_eq!(
            active(text),
            vec![
                Intent::Pizza,
                Intent::Customize,
                Intent::Topping,
                Intent::Vegan,
                Intent::ConfirmOrder
            ]
        );
    }
}
