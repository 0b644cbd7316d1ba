#![no_main]

use libfuzzer_sys::fuzz_target;
use overstack_detail::{DataValidator, PageLayout, Rule, Validator, extract_rules};

fuzz_target!(|data: &[u8]| {
    let Ok(layout) = serde_json::from_slice::<PageLayout>(data) else {
        return;
    };
    let rules = extract_rules(&layout.fields);
    for field_rules in rules.values() {
        assert_eq!(field_rules.as_slice(), [Rule::Required]);
    }
    let _ = DataValidator.validate(&rules, &serde_json::Value::Null);
});
