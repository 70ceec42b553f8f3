//! Serde support: maps serialize as serde maps and sets as sequences, both in ascending key order.
//! Deserializing rebuilds the tree by inserting every element, so a later duplicate key replaces an
//! earlier one.

use crate::avl_tree::{AvlMap, AvlSet};
use crate::bst::{BstMap, BstSet};
use crate::red_black_tree::{RedBlackMap, RedBlackSet};
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

macro_rules! impl_map_serde {
    ($map:ident, $visitor:ident, $name:expr) => {
        impl<T, U> Serialize for $map<T, U>
        where
            T: Serialize,
            U: Serialize,
        {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(Some(self.len()))?;
                for (key, value) in self {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }

        struct $visitor<T, U> {
            marker: PhantomData<fn() -> $map<T, U>>,
        }

        impl<'de, T, U> Visitor<'de> for $visitor<T, U>
        where
            T: Deserialize<'de> + Ord,
            U: Deserialize<'de>,
        {
            type Value = $map<T, U>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str($name)
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut map = $map::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        impl<'de, T, U> Deserialize<'de> for $map<T, U>
        where
            T: Deserialize<'de> + Ord,
            U: Deserialize<'de>,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_map($visitor {
                    marker: PhantomData,
                })
            }
        }
    };
}

macro_rules! impl_set_serde {
    ($set:ident, $visitor:ident, $name:expr) => {
        impl<T> Serialize for $set<T>
        where
            T: Serialize,
        {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for key in self {
                    seq.serialize_element(key)?;
                }
                seq.end()
            }
        }

        struct $visitor<T> {
            marker: PhantomData<fn() -> $set<T>>,
        }

        impl<'de, T> Visitor<'de> for $visitor<T>
        where
            T: Deserialize<'de> + Ord,
        {
            type Value = $set<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str($name)
            }

            fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = $set::new();
                while let Some(key) = access.next_element()? {
                    set.insert(key);
                }
                Ok(set)
            }
        }

        impl<'de, T> Deserialize<'de> for $set<T>
        where
            T: Deserialize<'de> + Ord,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_seq($visitor {
                    marker: PhantomData,
                })
            }
        }
    };
}

impl_map_serde!(BstMap, BstMapVisitor, "a binary search tree map");
impl_map_serde!(AvlMap, AvlMapVisitor, "an avl tree map");
impl_map_serde!(RedBlackMap, RedBlackMapVisitor, "a red black tree map");
impl_set_serde!(BstSet, BstSetVisitor, "a binary search tree set");
impl_set_serde!(AvlSet, AvlSetVisitor, "an avl tree set");
impl_set_serde!(RedBlackSet, RedBlackSetVisitor, "a red black tree set");

#[cfg(test)]
mod tests {
    use crate::avl_tree::AvlMap;
    use crate::bst::{BstMap, BstSet};
    use crate::red_black_tree::{RedBlackMap, RedBlackSet};
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_bst_map_tokens() {
        let map: BstMap<char, i32> = vec![('b', 1), ('a', 0), ('c', 2)].into_iter().collect();
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(3) },
                Token::Char('a'),
                Token::I32(0),
                Token::Char('b'),
                Token::I32(1),
                Token::Char('c'),
                Token::I32(2),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_avl_map_tokens() {
        let map: AvlMap<u32, bool> = vec![(2, true), (1, false)].into_iter().collect();
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::Bool(false),
                Token::U32(2),
                Token::Bool(true),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_red_black_map_duplicate_keys() {
        let map: RedBlackMap<u32, u32> = vec![(1, 20)].into_iter().collect();
        assert_de_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::U32(10),
                Token::U32(1),
                Token::U32(20),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_set_tokens() {
        let set: BstSet<u32> = vec![3, 1, 2].into_iter().collect();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );

        let set: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }
}
