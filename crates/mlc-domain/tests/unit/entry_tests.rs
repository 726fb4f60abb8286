//! Unit tests for cache entries, tiers and write options

use mlc_domain::value_objects::{CacheEntry, CacheKey, SetOptions, Tier, TierSet};
use std::time::{Duration, Instant};

#[test]
fn test_entry_expiry() {
    let entry = CacheEntry::new("k", serde_json::json!(1), Duration::from_secs(60), Tier::L1);
    assert!(!entry.is_expired());
    assert!(entry.is_expired_at(Instant::now() + Duration::from_secs(61)));
    assert!(entry.remaining_ttl() <= Duration::from_secs(60));
}

#[test]
fn test_zero_ttl_entry_is_expired_immediately() {
    let entry = CacheEntry::new("k", serde_json::json!(1), Duration::ZERO, Tier::L1);
    assert!(entry.is_expired());
}

#[test]
fn test_unrepresentable_ttl_never_expires() {
    for ttl in [Duration::from_secs(u64::MAX), Duration::MAX] {
        let entry = CacheEntry::new("k", serde_json::json!(1), ttl, Tier::L1);
        assert_eq!(entry.expires_at(), None);
        assert!(!entry.is_expired());
        assert!(!entry.is_expired_at(Instant::now() + Duration::from_secs(86_400 * 365)));
        assert_eq!(entry.remaining_ttl(), Duration::MAX);
    }
}

#[test]
fn test_tier_labels() {
    assert_eq!(Tier::L1.to_string(), "l1");
    assert_eq!(Tier::L2.as_str(), "l2");
    assert_eq!(serde_json::to_string(&Tier::L2).unwrap(), "\"l2\"");
}

#[test]
fn test_tier_set_includes() {
    assert!(TierSet::Both.includes(Tier::L1));
    assert!(TierSet::Both.includes(Tier::L2));
    assert!(TierSet::L1Only.includes(Tier::L1));
    assert!(!TierSet::L1Only.includes(Tier::L2));
    assert!(!TierSet::L2Only.includes(Tier::L1));
}

#[test]
fn test_set_options_defaults() {
    let options = SetOptions::default();
    assert_eq!(options.ttl, None);
    assert_eq!(options.tiers, TierSet::Both);
    assert_eq!(
        SetOptions::ttl(Duration::from_secs(5)).ttl,
        Some(Duration::from_secs(5))
    );
}

#[test]
fn test_cache_key_is_transparent() {
    let key = CacheKey::from("user:42");
    assert_eq!(key.as_str(), "user:42");
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"user:42\"");
}
