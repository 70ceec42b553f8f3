use ordered_trees::avl_tree::AvlMap;
use ordered_trees::bst::BstMap;
use ordered_trees::red_black_tree::RedBlackMap;
use quickcheck::quickcheck;
use std::collections::BTreeMap;

// `true` inserts the key and `false` removes it.
type Ops = Vec<(bool, i8, i8)>;

fn apply(ops: &Ops) -> BTreeMap<i8, i8> {
    let mut map = BTreeMap::new();
    for &(is_insert, key, value) in ops {
        if is_insert {
            map.insert(key, value);
        } else {
            map.remove(&key);
        }
    }
    map
}

macro_rules! run_ops {
    ($map:expr, $ops:expr) => {{
        let mut map = $map;
        for &(is_insert, key, value) in $ops {
            if is_insert {
                map.insert(key, value);
            } else {
                map.remove(&key);
            }
        }
        map
    }};
}

quickcheck! {
    fn bst_matches_btreemap(ops: Ops) -> bool {
        let map = run_ops!(BstMap::new(), &ops);
        map.check_invariants().is_ok()
            && map.iter().collect::<Vec<_>>() == apply(&ops).iter().collect::<Vec<_>>()
    }

    fn avl_matches_btreemap(ops: Ops) -> bool {
        let map = run_ops!(AvlMap::new(), &ops);
        map.check_invariants().is_ok()
            && map.iter().collect::<Vec<_>>() == apply(&ops).iter().collect::<Vec<_>>()
    }

    fn red_black_matches_btreemap(ops: Ops) -> bool {
        let map = run_ops!(RedBlackMap::new(), &ops);
        map.check_invariants().is_ok()
            && map.iter().collect::<Vec<_>>() == apply(&ops).iter().collect::<Vec<_>>()
    }

    fn avl_height_is_logarithmic(keys: Vec<u16>) -> bool {
        let map: AvlMap<u16, ()> = keys.into_iter().map(|key| (key, ())).collect();
        let len = map.len() as f64;
        (map.height() as f64) <= 1.45 * (len + 2.0).log2()
    }

    fn red_black_height_is_logarithmic(keys: Vec<u16>) -> bool {
        let map: RedBlackMap<u16, ()> = keys.into_iter().map(|key| (key, ())).collect();
        let len = map.len() as f64;
        (map.height() as f64) <= 2.0 * (len + 1.0).log2()
    }
}
