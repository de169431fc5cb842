use burrow_bloom::{BloomFilter, BloomFilterConfig};
use burrow_core::{InMemoryStore, ShortCode, Store};
use burrow_flake::{Snowflake, SnowflakeSettings};
use burrow_shortener::{
    HashCoder, HashMethod, IdCoder, ShortenerError, ShortenerService, StrategyKind,
    StrategyOptions,
};
use std::sync::Arc;

const URL: &str = "https://a.example/x";

fn filter() -> BloomFilter {
    BloomFilter::new(
        BloomFilterConfig::builder()
            .expected_items(10_000)
            .false_positive_rate(0.01)
            .build(),
    )
    .unwrap()
}

#[tokio::test]
async fn hash_then_id_scenario() {
    let service = ShortenerService::with_kind(
        InMemoryStore::new(),
        filter(),
        StrategyKind::Hash,
        StrategyOptions::default(),
    )
    .unwrap();

    let c1 = service.shorten(URL).await.unwrap();
    assert_eq!(c1.len(), 7);
    assert_eq!(service.resolve(c1.as_str()).await.unwrap(), URL);

    service.set_strategy_kind(StrategyKind::Id, StrategyOptions::default());
    let c2 = service.shorten(URL).await.unwrap();
    assert_ne!(c1, c2);
    assert_eq!(service.resolve(c2.as_str()).await.unwrap(), URL);

    assert_eq!(
        service.resolve("doesnotexist").await.unwrap_err(),
        ShortenerError::NotFound("doesnotexist".to_string())
    );
}

#[tokio::test]
async fn seeded_hash_collision_resolves_both_urls() {
    let coder = HashCoder::builder().method(HashMethod::Sha1).build();
    let generator = Arc::new(Snowflake::new(SnowflakeSettings::default()).unwrap());

    // A store that already maps URL's first candidate to another URL.
    let store = InMemoryStore::new();
    let taken = coder.candidate(URL, 0);
    store.put(&taken, "https://b.example/y").await.unwrap();

    let service = ShortenerService::new(store, filter(), generator, coder);

    let code = service.shorten(URL).await.unwrap();
    assert_ne!(code, taken);
    assert_eq!(service.resolve(code.as_str()).await.unwrap(), URL);
    assert_eq!(
        service.resolve(taken.as_str()).await.unwrap(),
        "https://b.example/y"
    );
}

#[tokio::test]
async fn id_codes_are_base62_of_the_generated_id() {
    let generator = Arc::new(Snowflake::new(SnowflakeSettings::default()).unwrap());
    let service = ShortenerService::new(
        InMemoryStore::new(),
        filter(),
        Arc::clone(&generator),
        IdCoder::new(Arc::clone(&generator)),
    );

    let before = generator.next_u64().unwrap();
    let code = service.shorten(URL).await.unwrap();
    let after = generator.next_u64().unwrap();

    let id = burrow_core::base62::decode(code.as_str()).unwrap();
    assert!(before < id && id < after);
    assert_eq!(ShortCode::from_id(id), code);
}

#[tokio::test]
async fn resolve_does_not_depend_on_active_strategy() {
    let service = ShortenerService::with_kind(
        InMemoryStore::new(),
        filter(),
        StrategyKind::Id,
        StrategyOptions::default(),
    )
    .unwrap();

    let by_id = service.shorten("https://a.example/1").await.unwrap();
    service.set_strategy_kind(
        StrategyKind::Hash,
        StrategyOptions::builder()
            .hash_method(HashMethod::Crc32)
            .build(),
    );
    let by_hash = service.shorten("https://a.example/2").await.unwrap();

    for kind in [StrategyKind::Hash, StrategyKind::Id] {
        service.set_strategy_kind(kind, StrategyOptions::default());
        assert_eq!(
            service.resolve(by_id.as_str()).await.unwrap(),
            "https://a.example/1"
        );
        assert_eq!(
            service.resolve(by_hash.as_str()).await.unwrap(),
            "https://a.example/2"
        );
    }
}

#[tokio::test]
async fn crc32_colliding_urls_get_distinct_codes() {
    // "plumless" and "buckeroo" share a CRC-32, and equal-length collisions
    // survive a common prefix.
    const A: &str = "https://a.example/plumless";
    const B: &str = "https://a.example/buckeroo";

    let coder = HashCoder::builder().method(HashMethod::Crc32).build();
    assert_eq!(coder.candidate(A, 0), coder.candidate(B, 0));

    let generator = Arc::new(Snowflake::new(SnowflakeSettings::default()).unwrap());
    let service = ShortenerService::new(InMemoryStore::new(), filter(), generator, coder.clone());

    let ca = service.shorten(A).await.unwrap();
    let cb = service.shorten(B).await.unwrap();
    assert_eq!(ca, coder.candidate(A, 0));
    assert_eq!(cb, coder.candidate(B, 1));
    assert_ne!(ca, cb);

    assert_eq!(service.resolve(ca.as_str()).await.unwrap(), A);
    assert_eq!(service.resolve(cb.as_str()).await.unwrap(), B);

    // shortening again walks the same candidates
    assert_eq!(service.shorten(A).await.unwrap(), ca);
    assert_eq!(service.shorten(B).await.unwrap(), cb);
}
