//! Random operation sequences must never leave a priority or deadline
//! without its chronicle, an empty objective, or an out-of-range urgency.

use chronicle_registry::prelude::*;
use chronicle_registry::testing::*;
use chronicle_storage::memory::MemoryStore;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Establish(String),
    Modify(String, bool),
    Deadline(u64),
    Priority(u8),
    Terminate,
    Delegate(usize, String),
    Advance(u64),
}

const ACTORS: [Address; 4] = [ALICE, BOB, CHARLIE, DAVE];

fn objective() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z ]{1,12}"]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        objective().prop_map(Op::Establish),
        (objective(), any::<bool>()).prop_map(|(o, f)| Op::Modify(o, f)),
        (0u64..20).prop_map(Op::Deadline),
        (0u8..6).prop_map(Op::Priority),
        Just(Op::Terminate),
        (0usize..4, objective()).prop_map(|(t, o)| Op::Delegate(t, o)),
        (0u64..5).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn prop_slots_stay_consistent(steps in prop::collection::vec((0usize..4, op()), 1..60)) {
        let registry = ChronicleRegistry::open(MemoryStore::new()).unwrap();
        let env = TestEnv::new().with_height(100);

        for (actor, op) in steps {
            env.set_sender(ACTORS[actor]);
            let ctx = env.ctx();
            let result = match op {
                Op::Establish(o) => registry.establish(&ctx, &o),
                Op::Modify(o, f) => registry.modify(&ctx, &o, f),
                Op::Deadline(w) => registry.configure_deadline(&ctx, w),
                Op::Priority(u) => registry.set_priority(&ctx, u),
                Op::Terminate => registry.terminate(&ctx),
                Op::Delegate(t, o) => registry.delegate(&ctx, &ACTORS[t], &o),
                Op::Advance(by) => {
                    env.advance(by);
                    continue;
                }
            };
            if let Err(e) = result {
                prop_assert!(e.kind().is_some(), "unexpected storage fault: {}", e);
            }

            for who in ACTORS {
                let chronicle = registry.chronicle_of(&who).unwrap();
                let priority = registry.priority_of(&who).unwrap();
                let deadline = registry.deadline_of(&who).unwrap();
                if chronicle.is_none() {
                    prop_assert!(priority.is_none());
                    prop_assert!(deadline.is_none());
                }
                if let Some(c) = chronicle {
                    prop_assert!(!c.objective.is_empty());
                }
                if let Some(p) = priority {
                    prop_assert!((1..=3).contains(&p.urgency));
                }
                if let Some(d) = deadline {
                    prop_assert!(d.deadline_height > 100);
                    prop_assert!(!d.alert_active);
                }
            }
        }

        let active = registry.participants().unwrap().len() as i64;
        prop_assert_eq!(registry.metrics().active.get(), active);
    }
}
