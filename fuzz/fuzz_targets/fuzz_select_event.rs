#![no_main]

use libfuzzer_sys::fuzz_target;
use overstack_detail::inflect::{SELECTED_SUFFIX, select_event};

fuzz_target!(|identifier: &str| {
    let event = select_event(identifier);
    assert!(event.ends_with(SELECTED_SUFFIX));
});
