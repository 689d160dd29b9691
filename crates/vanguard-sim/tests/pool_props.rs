use proptest::prelude::*;

use vanguard_sim::core::components::Entity;
use vanguard_sim::EntityPool;

#[derive(Debug, Clone)]
enum Op {
    Acquire,
    Release(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Acquire),
        4 => (0usize..40).prop_map(Op::Release),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn pool_never_exceeds_capacity(capacity in 1usize..32, ops in prop::collection::vec(op(), 0..200)) {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(capacity);
        let mut model = vec![false; capacity];

        for op in ops {
            match op {
                Op::Acquire => {
                    let expected = model.iter().position(|used| !used);
                    let got = pool.acquire_slot().map(|(slot, _)| slot);
                    prop_assert_eq!(got, expected, "acquire takes the lowest free slot");
                    if let Some(slot) = got {
                        model[slot] = true;
                    }
                }
                Op::Release(slot) => {
                    pool.release(slot);
                    if let Some(used) = model.get_mut(slot) {
                        *used = false;
                    }
                }
                Op::Clear => {
                    pool.clear();
                    model.iter_mut().for_each(|used| *used = false);
                }
            }

            prop_assert!(pool.active_count() <= pool.capacity());
            prop_assert_eq!(pool.capacity(), capacity);
            prop_assert_eq!(pool.active_count(), model.iter().filter(|used| **used).count());
            prop_assert_eq!(pool.is_saturated(), model.iter().all(|used| *used));
        }
    }

    #[test]
    fn acquired_slot_is_fresh(capacity in 1usize..16, dirty_x in -500.0f32..500.0) {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(capacity);
        {
            let entity = pool.acquire().unwrap();
            entity.position.x = dirty_x;
            entity.hp = 7;
        }
        pool.release(0);

        let (slot, entity) = pool.acquire_slot().unwrap();
        prop_assert_eq!(slot, 0);
        prop_assert!(entity.active);
        prop_assert_eq!(entity.position.x, 0.0);
        prop_assert_eq!(entity.hp, 0);
    }
}
