use super::*;
use std::collections::HashSet;

#[test]
fn sample_size_is_bounded_and_unique() {
    let mut sampler = RandomSampler::seeded(7);
    let items: Vec<u32> = (0..10).collect();
    for k in 0..15 {
        let picked = sampler.sample(&items, k);
        assert_eq!(picked.len(), k.min(items.len()));
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), picked.len(), "duplicates for k={k}");
        assert!(picked.iter().all(|x| items.contains(x)));
    }
}

#[test]
fn sample_of_empty_input_is_empty() {
    let mut sampler = RandomSampler::seeded(1);
    let empty: [u8; 0] = [];
    assert!(sampler.sample(&empty, 3).is_empty());
    assert_eq!(sampler.choose(&empty), None);
}

#[test]
fn seeded_samplers_repeat_themselves() {
    let items: Vec<u32> = (0..50).collect();
    let a = RandomSampler::seeded(42).sample(&items, 5);
    let b = RandomSampler::seeded(42).sample(&items, 5);
    assert_eq!(a, b);
}

#[test]
fn choose_is_one_element_sample() {
    let items = ["a", "b", "c"];
    let mut sampler = RandomSampler::seeded(3);
    for _ in 0..20 {
        let pick = sampler.choose(&items).unwrap();
        assert!(items.contains(&pick));
    }
}

#[test]
fn free_function_matches_bound() {
    let mut rng = StdRng::seed_from_u64(9);
    let items = vec![1, 2, 3];
    assert_eq!(sample(&mut rng, &items, 10).len(), 3);
    assert_eq!(sample(&mut rng, &items, 0).len(), 0);
}

#[test]
fn in_order_sampler_takes_prefix() {
    let items = [5, 6, 7, 8];
    assert_eq!(InOrderSampler.sample(&items, 2), vec![5, 6]);
    assert_eq!(InOrderSampler.choose(&items), Some(5));
}
