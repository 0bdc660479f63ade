use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Add(i64, u32),
    Remove(i64),
    RemoveFirst,
    RemoveBack,
    Get(i64),
    Range(i64, i64),
}

// A narrow score space forces plenty of duplicate merges and removal hits.
fn score_strategy() -> impl Strategy<Value = i64> + Clone {
    prop_oneof![
        8 => -64i64..64,
        1 => Just(i64::MIN),
        1 => Just(i64::MAX),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let score = score_strategy();
    let op = prop_oneof![
        40 => (score.clone(), any::<u32>()).prop_map(|(s, v)| Op::Add(s, v)),
        20 => score.clone().prop_map(Op::Remove),
        5 => Just(Op::RemoveFirst),
        5 => Just(Op::RemoveBack),
        15 => score.clone().prop_map(Op::Get),
        15 => (score.clone(), score).prop_map(|(a, b)| Op::Range(a, b)),
    ];
    prop::collection::vec(op, 0..=400)
}

fn model_all(m: &BTreeMap<i64, Vec<u32>>) -> Vec<u32> {
    m.values().flat_map(|vs| vs.iter().copied()).collect()
}

fn model_range(m: &BTreeMap<i64, Vec<u32>>, begin: i64, end: i64) -> Vec<u32> {
    if begin > end {
        return Vec::new();
    }
    m.range(begin..=end)
        .flat_map(|(_, vs)| vs.iter().copied())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(seed in any::<u64>(), ops in ops_strategy()) {
        let mut sk: SkipList<u32> = SkipList::with_seed(seed);
        let mut m: BTreeMap<i64, Vec<u32>> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(score, value) => {
                    sk.add(score, value);
                    m.entry(score).or_default().push(value);
                }
                Op::Remove(score) => {
                    let len = sk.len();
                    let got = sk.remove(score);
                    prop_assert_eq!(&got, &m.remove(&score));
                    prop_assert_eq!(sk.len(), len - usize::from(got.is_some()));
                    prop_assert!(sk.get_by_score(score).is_empty());
                }
                Op::RemoveFirst => {
                    let key = m.keys().next().copied();
                    let expected = key.map(|k| (k, m.remove(&k).unwrap()));
                    prop_assert_eq!(sk.remove_first(), expected);
                }
                Op::RemoveBack => {
                    let key = m.keys().next_back().copied();
                    let expected = key.map(|k| (k, m.remove(&k).unwrap()));
                    prop_assert_eq!(sk.remove_back(), expected);
                }
                Op::Get(score) => {
                    let expected = m.get(&score).cloned().unwrap_or_default();
                    prop_assert_eq!(sk.get_by_score(score), expected);
                    prop_assert!(sk.search_paths_agree(score));
                }
                Op::Range(begin, end) => {
                    prop_assert_eq!(sk.get_by_range(begin, end), model_range(&m, begin, end));
                }
            }
            prop_assert_eq!(sk.len(), m.len());
        }

        sk.ensure_invariants();
        let forward = sk.get_all(false);
        prop_assert_eq!(&forward, &model_all(&m));
        let mut backward = sk.get_all(true);
        backward.reverse();
        prop_assert_eq!(backward, forward);
    }

    #[test]
    fn prop_drain_in_any_order(
        seed in any::<u64>(),
        scores in prop::collection::vec(score_strategy(), 0..=100),
        picks in prop::collection::vec(0u8..3, 0..=100),
    ) {
        let mut sk = SkipList::with_seed(seed);
        for (i, score) in scores.iter().enumerate() {
            sk.add(*score, i);
        }
        sk.ensure_invariants();

        let mut picks = picks.into_iter().cycle();
        while !sk.is_empty() {
            let len = sk.len();
            let (lo, _) = sk.first().unwrap();
            let (hi, _) = sk.last().unwrap();
            match picks.next().unwrap_or(0) {
                0 => {
                    let (score, _) = sk.remove_first().unwrap();
                    prop_assert_eq!(score, lo);
                }
                1 => {
                    let (score, _) = sk.remove_back().unwrap();
                    prop_assert_eq!(score, hi);
                }
                _ => {
                    let mid = sk.iter().nth(len / 2).map(|(s, _)| s).unwrap();
                    prop_assert!(sk.remove(mid).is_some());
                }
            }
            prop_assert_eq!(sk.len(), len - 1);
            sk.ensure_invariants();
        }

        prop_assert_eq!(sk.height(), 1);
        prop_assert!(sk.get_all(false).is_empty());
        prop_assert!(sk.get_all(true).is_empty());
    }
}

#[test]
fn search_from_ceiling_matches_current_height() {
    let mut sk = SkipList::with_seed(1234);
    for i in 0..2_000i64 {
        sk.add((i * 7919) % 1_009, i);
    }
    for score in -5..1_015 {
        assert!(sk.search_paths_agree(score), "paths differ at {}", score);
    }
    for score in 0..500 {
        sk.remove(score * 2);
    }
    for score in -5..1_015 {
        assert!(sk.search_paths_agree(score), "paths differ at {}", score);
    }
    sk.ensure_invariants();
}
