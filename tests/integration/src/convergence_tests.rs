//! Property tests: the drag surface always ends up matching the signer list.

use proptest::prelude::*;
use signing_core::{Entry, Identity, NativeId, Sequence};
use signing_form::{FormConfig, SignerForm};
use signing_sync::MemorySurface;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Intent {
    Drag(usize, Option<usize>),
    Type(usize, usize),
}

fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        (0usize..10, proptest::option::of(0usize..10)).prop_map(|(s, d)| Intent::Drag(s, d)),
        (0usize..10, 0usize..11).prop_map(|(p, n)| Intent::Type(p, n)),
    ]
}

fn seeded(len: usize, mask: &[bool]) -> (Sequence, HashSet<NativeId>) {
    let mut sequence = Sequence::new();
    let mut locked = HashSet::new();
    for index in 0..len {
        let native_id = NativeId::new(index as u64 + 1);
        if mask.get(index).copied().unwrap_or(false) {
            locked.insert(native_id);
        }
        sequence.append(Entry::new(Identity::new(format!("s{index}"))).with_native_id(native_id));
    }
    (sequence, locked)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_surface_converges_with_list(
        len in 1usize..9,
        mask in proptest::collection::vec(any::<bool>(), 9),
        intents in proptest::collection::vec(intent(), 1..12),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let _runtime_guard = runtime.enter();
        let (sequence, locked) = seeded(len, &mask);
        let surface = MemorySurface::new(sequence.identities());
        let config = FormConfig::from_toml_str("[replay]\nsettle_delay_ms = 0\n").unwrap();
        let mut form = SignerForm::new(&config, Arc::new(locked))
            .with_sequence(sequence)
            .with_drag_surface(Arc::new(surface.clone()));
        for identity in form.pinned() {
            surface.pin(identity);
        }
        let pinned_layout: Vec<usize> = form
            .sequence()
            .iter()
            .enumerate()
            .filter(|(_, e)| form.is_locked(&e.identity))
            .map(|(position, _)| position)
            .collect();

        for intent in intents {
            match intent {
                Intent::Drag(source, destination) => {
                    let _ = form.drag(source, destination);
                    surface.reset(form.sequence().identities());
                }
                Intent::Type(position, number) => {
                    let Ok(edit) = form.type_order(position, &number.to_string()) else {
                        continue;
                    };
                    if let Some(ticket) = edit.replay {
                        prop_assert!(ticket.is_scheduled());
                        let report = runtime
                            .block_on(ticket.finished())
                            .unwrap()
                            .unwrap();
                        prop_assert!(report.is_complete());
                    }
                    prop_assert_eq!(surface.items(), form.sequence().identities());
                }
            }

            prop_assert!(form.sequence().is_at_rest());
            let now_pinned: Vec<usize> = form
                .sequence()
                .iter()
                .enumerate()
                .filter(|(_, e)| form.is_locked(&e.identity))
                .map(|(position, _)| position)
                .collect();
            prop_assert_eq!(&now_pinned, &pinned_layout);
        }
    }
}
