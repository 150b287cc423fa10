//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's lifecycle rules over generated keys,
//! values and durations. Time is simulated with `ManualClock`.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::{CacheConfig, CacheStore, Lookup, ManualClock};

// == Test Configuration ==
const T0: u64 = 1_700_000_000_000;

fn test_store() -> (CacheStore<String, ManualClock>, ManualClock) {
    let clock = ManualClock::new(T0);
    (CacheStore::with_clock(clock.clone()), clock)
}

// == Strategies ==
/// Generates cache keys (non-empty flat strings)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,64}"
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,256}"
}

/// Generates configs with `stale_time <= ttl`, both positive
fn config_strategy() -> impl Strategy<Value = CacheConfig> {
    (1u64..=86_400)
        .prop_flat_map(|ttl| (Just(ttl), 1u64..=ttl))
        .prop_map(|(ttl, stale_time)| CacheConfig::new(ttl, stale_time))
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Clear { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // Small key space so operations collide
    let key = "[a-d]";
    prop_oneof![
        (key, value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
        key.prop_map(|key| CacheOp::Clear { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Round trip: a value read back immediately after writing is unchanged.
    #[test]
    fn prop_roundtrip_storage(
        key in key_strategy(),
        value in value_strategy(),
        config in config_strategy()
    ) {
        let (mut store, _clock) = test_store();

        store.set(key.clone(), value.clone(), &config);

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Overwrite: last writer wins and the freshness clock restarts.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
        config in config_strategy()
    ) {
        let (mut store, clock) = test_store();

        store.set(key.clone(), value1, &config);
        // Move to the edge of the first write's lifetime
        clock.advance_secs(config.ttl);
        store.set(key.clone(), value2.clone(), &config);
        clock.advance_secs(config.ttl);

        // Exactly ttl after the second write: still live
        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }

    // Expiry: one millisecond past the TTL the entry is gone.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        config in config_strategy()
    ) {
        let (mut store, clock) = test_store();
        store.set(key.clone(), value, &config);

        clock.set_ms(T0 + config.ttl * 1000 + 1);

        prop_assert_eq!(store.get(&key), None);
        prop_assert!(!store.has_cache(&key));
        prop_assert!(store.is_empty(), "Expired entry should be removed on access");
    }

    // Staleness window: fresh up to stale_time, stale until ttl.
    #[test]
    fn prop_staleness_window(
        key in key_strategy(),
        value in value_strategy(),
        config in config_strategy(),
        offset in 0u64..1000
    ) {
        let (mut store, clock) = test_store();
        store.set(key.clone(), value.clone(), &config);

        let stale_ms = config.stale_time * 1000;
        let ttl_ms = config.ttl * 1000;

        clock.set_ms(T0 + stale_ms.saturating_sub(offset));
        let fresh = store.get_with_stale(&key);
        prop_assert_eq!(fresh, Lookup { data: Some(value.clone()), is_stale: false });

        if ttl_ms > stale_ms {
            let stale_at = stale_ms + 1 + offset % (ttl_ms - stale_ms);
            clock.set_ms(T0 + stale_at);
            let stale = store.get_with_stale(&key);
            prop_assert_eq!(stale, Lookup { data: Some(value), is_stale: true });
        }
    }

    // Independent keys: clearing one leaves the other retrievable.
    #[test]
    fn prop_clear_is_per_key(
        a in key_strategy(),
        b in key_strategy(),
        config in config_strategy()
    ) {
        prop_assume!(a != b);
        let (mut store, _clock) = test_store();

        store.set(a.clone(), "a".to_string(), &config);
        store.set(b.clone(), "b".to_string(), &config);
        store.clear_cache(&a);

        prop_assert_eq!(store.get(&a), None);
        prop_assert_eq!(store.get(&b), Some("b".to_string()));
    }

    // Clear all: every key is gone afterwards.
    #[test]
    fn prop_clear_all(
        keys in prop::collection::hash_set(key_strategy(), 1..50),
        config in config_strategy()
    ) {
        let (mut store, _clock) = test_store();

        for key in &keys {
            store.set(key.clone(), key.clone(), &config);
        }
        store.clear_all_cache();

        for key in &keys {
            prop_assert!(!store.has_cache(key), "Key '{}' should be cleared", key);
        }
    }

    // Idempotent clear: clearing an absent key changes nothing.
    #[test]
    fn prop_clear_absent_is_noop(
        keys in prop::collection::hash_set(key_strategy(), 0..20),
        missing in key_strategy(),
        config in config_strategy()
    ) {
        prop_assume!(!keys.contains(&missing));
        let (mut store, _clock) = test_store();

        for key in &keys {
            store.set(key.clone(), key.clone(), &config);
        }
        prop_assert!(!store.clear_cache(&missing));
        prop_assert!(!store.clear_cache(&missing));

        prop_assert_eq!(store.len(), keys.len());
        for key in &keys {
            prop_assert_eq!(store.get(key), Some(key.clone()));
        }
    }

    // Model check: the store behaves like a map when nothing expires.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let (mut store, _clock) = test_store();
        let config = CacheConfig::new(60, 30);
        let mut model = std::collections::HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), &config);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    match &got {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                }
                CacheOp::Clear { key } => {
                    store.clear_cache(&key);
                    model.remove(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
    }

    // Sweep: removes exactly the expired keys and nothing else.
    #[test]
    fn prop_sweep_removes_only_expired(
        short in prop::collection::hash_set("s[a-z]{1,8}", 0..10),
        long in prop::collection::hash_set("l[a-z]{1,8}", 0..10)
    ) {
        let (mut store, clock) = test_store();

        for key in &short {
            store.set(key.clone(), key.clone(), &CacheConfig::new(1, 0));
        }
        for key in &long {
            store.set(key.clone(), key.clone(), &CacheConfig::new(60, 30));
        }

        clock.advance_secs(2);
        prop_assert_eq!(store.sweep_expired(), short.len());

        let remaining: HashSet<String> = long
            .iter()
            .filter(|key| store.has_cache(key))
            .cloned()
            .collect();
        prop_assert_eq!(remaining, long.clone());
        prop_assert_eq!(store.len(), long.len());
    }
}
