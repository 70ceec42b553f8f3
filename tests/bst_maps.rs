const NUM_OF_OPERATIONS: usize = 20_000;

macro_rules! bst_map_tests {
    ($($module_name:ident: $type_name:ident,)*) => {
        $(
            mod $module_name {
                use ordered_trees::$module_name::$type_name;
                use rand::rngs::StdRng;
                use rand::{Rng, SeedableRng};
                use std::collections::BTreeMap;
                use super::NUM_OF_OPERATIONS;

                #[test]
                fn int_test_map() {
                    let mut rng = StdRng::seed_from_u64(1);
                    let mut map = $type_name::new();
                    let mut expected = BTreeMap::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0..1024u32);
                        let val = rng.gen::<u32>();

                        let actual = map.insert(key, val).map(|pair| pair.1);
                        assert_eq!(actual, expected.insert(key, val));
                    }

                    assert_eq!(map.len(), expected.len());
                    assert!(map.check_invariants().is_ok());
                    assert_eq!(
                        map.iter().collect::<Vec<(&u32, &u32)>>(),
                        expected.iter().collect::<Vec<(&u32, &u32)>>(),
                    );

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0..1024u32);

                        assert_eq!(map.get(&key), expected.get(&key));
                        assert_eq!(map.remove(&key), expected.remove_entry(&key));
                    }

                    assert_eq!(map.len(), expected.len());
                    assert!(map.check_invariants().is_ok());
                }

                #[test]
                fn int_test_interleaved() {
                    let mut rng = StdRng::seed_from_u64(2);
                    let mut map = $type_name::new();
                    let mut expected = BTreeMap::new();

                    for i in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0..256u32);
                        if rng.gen::<bool>() {
                            map.insert(key, i);
                            expected.insert(key, i);
                        } else {
                            assert_eq!(map.remove(&key), expected.remove_entry(&key));
                        }

                        if i % 1000 == 0 {
                            assert!(map.check_invariants().is_ok());
                        }
                    }

                    for key in 0..256u32 {
                        assert_eq!(map.floor(&key), expected.range(..=key).next_back().map(|pair| pair.0));
                        assert_eq!(map.ceil(&key), expected.range(key..).next().map(|pair| pair.0));
                    }
                    assert_eq!(map.min(), expected.keys().next());
                    assert_eq!(map.max(), expected.keys().next_back());
                    assert_eq!(
                        map.into_iter().collect::<Vec<(u32, usize)>>(),
                        expected.into_iter().collect::<Vec<(u32, usize)>>(),
                    );
                }

                #[test]
                fn int_test_empty() {
                    let mut map: $type_name<u32, u32> = $type_name::new();

                    assert_eq!(map.get(&5), None);
                    assert_eq!(map.remove(&5), None);
                    assert_eq!(map.height(), 0);
                    assert!(map.is_empty());
                    assert!(map.check_invariants().is_ok());
                }

                #[test]
                fn int_test_remove_missing() {
                    let mut map: $type_name<u32, u32> = (0..16).map(|key| (key * 2, key)).collect();
                    let before = map.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>();

                    assert_eq!(map.remove(&7), None);
                    assert_eq!(map.len(), 16);
                    assert_eq!(
                        map.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>(),
                        before,
                    );
                    assert!(map.check_invariants().is_ok());
                }
            }
        )*
    }
}

bst_map_tests!(
    bst: BstMap,
    avl_tree: AvlMap,
    red_black_tree: RedBlackMap,
);

mod red_black_tree_shape {
    use ordered_trees::red_black_tree::{Color, RedBlackMap};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn int_test_shuffled() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut keys = (0..4096u32).collect::<Vec<u32>>();
        keys.shuffle(&mut rng);

        let mut map = RedBlackMap::new();
        for key in &keys {
            map.insert(*key, ());
        }
        assert!(map.check_invariants().is_ok());
        assert_eq!(map.root().map(|pair| map.color(pair.0)), Some(Some(Color::Black)));

        // a red black tree with n nodes is at most 2 * log2(n + 1) high
        assert!(map.height() <= 24);

        keys.shuffle(&mut rng);
        for key in &keys[..2048] {
            assert_eq!(map.remove(key), Some((*key, ())));
        }
        assert_eq!(map.len(), 2048);
        assert!(map.check_invariants().is_ok());
    }

    #[test]
    fn int_test_render_shape() {
        let map: RedBlackMap<u32, ()> = (1..=3).map(|key| (key, ())).collect();
        assert_eq!(
            map.render(|key, _, color| format!("{}({})", key, color)),
            "   _2(B)__\n  /       \\\n1(R)    3(R)",
        );
    }
}
