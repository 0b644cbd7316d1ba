#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use overstack_core::{Arguments, ModalKey, ModalStackManager, ProbeError, Signal};

const COMPONENTS: [&str; 3] = ["customer-detail", "customers-list", "invoice-detail"];

#[derive(Debug, Arbitrary)]
enum Op {
    Open { component: u8, sourced: bool },
    Close { index: u8, wrong_component: bool },
    CloseStale { key: String },
    CloseTop,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut manager = ModalStackManager::new().with_probe(|_: &str| {
        Ok::<_, ProbeError>(vec!["filter".to_owned(), "customerId".to_owned()])
    });

    for op in ops {
        let signal = match op {
            Op::Open { component, sourced } => {
                let component = COMPONENTS[usize::from(component) % COMPONENTS.len()];
                Signal::open(component, Arguments::new(), sourced.then(|| "list".to_owned()))
            }
            Op::Close {
                index,
                wrong_component,
            } => {
                let Some(record) = manager.stack().iter().nth(usize::from(index)) else {
                    continue;
                };
                let component = if wrong_component {
                    "unknown".to_owned()
                } else {
                    record.component_name.clone()
                };
                Signal::close(component, None, record.key.clone())
            }
            Op::CloseStale { key } => Signal::close(COMPONENTS[0], None, ModalKey::new(key)),
            Op::CloseTop => Signal::CloseTopModal,
        };
        let _ = manager.handle(signal);

        let stack = manager.stack();
        let tops = stack.iter().filter(|r| r.top_modal).count();
        assert_eq!(tops, usize::from(stack.visible_count() > 0));
        if let Some(last) = stack.iter().rev().find(|r| r.show) {
            assert!(last.top_modal);
        }
    }
});
