#![forbid(unsafe_code)]

//! English singularization and camel-casing for component identifiers.
//!
//! Identifiers are hyphen-separated lowercase tokens (`bank-accounts-list`).
//! Only the final token of a phrase is singularized, matching how a list
//! of compound nouns is named.
//!
//! # Invariants
//!
//! 1. Singularization is idempotent on every word the rule table treats
//!    as already singular (`address`, `status`, `analysis`, `bus`, `news`).
//! 2. Case of the input is preserved on the first letter (`Categories`
//!    becomes `Category`).
//! 3. The suffix that marks a list identifier is stripped only when it is
//!    trailing.

/// Suffix marking a list component identifier.
pub const LIST_SUFFIX: &str = "-list";

/// Suffix appended to the entity name of a selection event.
pub const SELECTED_SUFFIX: &str = "Selected";

/// Words whose singular and plural forms are the same.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "feedback",
    "information",
    "metadata",
    "money",
    "news",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Whole-word plural → singular pairs the suffix rules get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("cookies", "cookie"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("men", "man"),
    ("menus", "menu"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("people", "person"),
    ("shoes", "shoe"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Endings of words that are already singular despite a trailing `s`.
const SINGULAR_ENDINGS: &[&str] = &[
    "ss", "sis", "alias", "bonus", "bus", "campus", "canvas", "census", "focus", "status",
    "virus",
];

/// Ordered suffix rules: the first matching plural suffix is replaced.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("campuses", "campus"),
    ("canvases", "canvas"),
    ("censuses", "census"),
    ("focuses", "focus"),
    ("statuses", "status"),
    ("viruses", "virus"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("diagnoses", "diagnosis"),
    ("synopses", "synopsis"),
    ("theses", "thesis"),
    ("ies", "y"),
    ("sses", "ss"),
    ("xes", "x"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("oes", "o"),
    ("s", ""),
];

/// Singularize one English word.
#[must_use]
pub fn singular_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_owned();
    }

    if let Some((_, replacement)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return match_leading_case(word, replacement);
    }

    if SINGULAR_ENDINGS.iter().any(|ending| lower.ends_with(ending)) {
        return word.to_owned();
    }

    for (plural, replacement) in SUFFIX_RULES {
        if lower.len() > plural.len() && lower.ends_with(plural) {
            let stem = &word[..word.len() - plural.len()];
            return format!("{stem}{replacement}");
        }
        if lower == *plural && !replacement.is_empty() {
            return match_leading_case(word, replacement);
        }
    }

    word.to_owned()
}

/// Singularize the final token of a hyphen- or underscore-separated phrase.
#[must_use]
pub fn singular(phrase: &str) -> String {
    match phrase.rfind(['-', '_']) {
        Some(split) => {
            let (head, last) = phrase.split_at(split + 1);
            format!("{head}{}", singular_word(last))
        }
        None => singular_word(phrase),
    }
}

/// Camel-case a phrase separated by hyphens, underscores or whitespace.
#[must_use]
pub fn camel(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let words = phrase
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty());

    for (i, word) in words.enumerate() {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        if i == 0 {
            out.extend(first.to_lowercase());
        } else {
            out.extend(first.to_uppercase());
        }
        out.push_str(chars.as_str());
    }
    out
}

/// Selection event name for a component identifier.
///
/// `customers-list` → `customerSelected`, `bank-accounts-list` →
/// `bankAccountSelected`.
#[must_use]
pub fn select_event(identifier: &str) -> String {
    let entity = identifier.strip_suffix(LIST_SUFFIX).unwrap_or(identifier);
    format!("{}{SELECTED_SUFFIX}", camel(&singular(entity)))
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    let upper = original.chars().next().is_some_and(char::is_uppercase);
    if !upper {
        return replacement.to_owned();
    }
    let mut chars = replacement.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn select_event_from_list_identifiers() {
        assert_eq!(select_event("customers-list"), "customerSelected");
        assert_eq!(select_event("products-list"), "productSelected");
        assert_eq!(select_event("bank-accounts-list"), "bankAccountSelected");
    }

    #[test]
    fn select_event_without_list_suffix() {
        assert_eq!(select_event("customers"), "customerSelected");
        assert_eq!(select_event("customer"), "customerSelected");
    }

    #[test]
    fn list_suffix_only_stripped_when_trailing() {
        assert_eq!(select_event("price-lists-list"), "priceListSelected");
        assert_eq!(select_event("list-items"), "listItemSelected");
    }

    #[test]
    fn plain_plurals() {
        assert_eq!(singular_word("customers"), "customer");
        assert_eq!(singular_word("orders"), "order");
        assert_eq!(singular_word("invoices"), "invoice");
    }

    #[test]
    fn suffix_rules() {
        assert_eq!(singular_word("categories"), "category");
        assert_eq!(singular_word("addresses"), "address");
        assert_eq!(singular_word("boxes"), "box");
        assert_eq!(singular_word("batches"), "batch");
        assert_eq!(singular_word("wishes"), "wish");
        assert_eq!(singular_word("heroes"), "hero");
        assert_eq!(singular_word("movies"), "movie");
    }

    #[test]
    fn select_event_for_tricky_plurals() {
        let cases = [
            ("movies-list", "movieSelected"),
            ("statuses-list", "statusSelected"),
            ("order-statuses-list", "orderStatusSelected"),
            ("menus-list", "menuSelected"),
            ("apis-list", "apiSelected"),
            ("kpis-list", "kpiSelected"),
            ("buses-list", "busSelected"),
            ("analyses-list", "analysisSelected"),
            ("courses-list", "courseSelected"),
            ("houses-list", "houseSelected"),
        ];
        for (identifier, event) in cases {
            assert_eq!(select_event(identifier), event, "{identifier}");
        }
    }

    #[test]
    fn whole_word_plurals() {
        assert_eq!(singular_word("buses"), "bus");
        assert_eq!(singular_word("Statuses"), "Status");
        assert_eq!(singular_word("crises"), "crisis");
        assert_eq!(singular_word("s"), "s");
    }

    #[test]
    fn already_singular_is_identity() {
        for word in [
            "address", "status", "analysis", "basis", "bus", "campus", "customer", "news", "data",
        ] {
            assert_eq!(singular_word(word), word);
        }
    }

    #[test]
    fn irregulars_keep_leading_case() {
        assert_eq!(singular_word("people"), "person");
        assert_eq!(singular_word("People"), "Person");
        assert_eq!(singular_word("children"), "child");
    }

    #[test]
    fn only_final_token_singularizes() {
        assert_eq!(singular("bank-accounts"), "bank-account");
        assert_eq!(singular("sales-orders"), "sales-order");
        assert_eq!(singular("time_entries"), "time_entry");
    }

    #[test]
    fn camel_case() {
        assert_eq!(camel("bank-account"), "bankAccount");
        assert_eq!(camel("time_entry"), "timeEntry");
        assert_eq!(camel("Customer"), "customer");
        assert_eq!(camel("a--b"), "aB");
        assert_eq!(camel(""), "");
    }

    proptest! {
        #[test]
        fn regular_plural_round_trips(stem in "[a-z]{2,8}[bdgkmnprt]") {
            let plural = format!("{stem}s-list");
            prop_assert_eq!(select_event(&plural), format!("{stem}{SELECTED_SUFFIX}"));
        }

        #[test]
        fn singular_never_panics(word in "\\PC{0,12}") {
            let _ = singular(&word);
            let _ = select_event(&word);
        }
    }
}
