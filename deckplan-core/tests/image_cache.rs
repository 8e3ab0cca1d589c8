use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use deckplan_core::assets::{slide_text, AssetPlanner};
use deckplan_core::config::{IconCacheConfig, ImageCacheConfig};
use deckplan_core::contract::{MockImageGenerator, MockRasterizer};
use deckplan_core::error::GenerationError;
use deckplan_core::icons::{IconCache, IconLibrary};
use deckplan_core::images::{build_prompt, fingerprint, ImageCache, ImageStore};
use deckplan_core::model::{BulletPoint, LayoutType, PresentationData, SlideContent};
use deckplan_core::retry::RetryPolicy;
use tempfile::{tempdir, TempDir};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn png(tag: u8) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.push(tag);
    bytes
}

fn config(dir: &TempDir) -> ImageCacheConfig {
    ImageCacheConfig {
        dir: dir.path().join("images"),
        ..ImageCacheConfig::default()
    }
}

fn set_age(path: &Path, age: Duration) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

#[test]
fn test_fingerprint_uses_title_and_content_prefix() {
    let base = "a".repeat(200);
    let one = fingerprint("Team", &format!("{base}X"), 200);
    let two = fingerprint("Team", &format!("{base}Y"), 200);
    assert_eq!(one, two, "characters past the prefix are ignored");
    assert_eq!(one.len(), 64);
    assert!(one.chars().all(|c| c.is_ascii_hexdigit()));

    assert_ne!(one, fingerprint("Teams", &base, 200));
    assert_ne!(fingerprint("Team", "alpha", 200), fingerprint("Team", "beta", 200));
}

#[test]
fn test_prompt_follows_title_keywords() {
    assert!(build_prompt("Our Team").contains("professional team"));
    assert!(build_prompt("Project Roadmap").contains("roadmap"));
    let generic = build_prompt("Zebra crossings");
    assert!(generic.contains("\"Zebra crossings\""));
    assert!(generic.contains("no text"));
}

#[tokio::test(start_paused = true)]
async fn test_fresh_entry_is_served_without_generation() {
    let dir = tempdir().unwrap();
    let mut generator = MockImageGenerator::new();
    generator.expect_generate().times(0);
    let cache = ImageCache::open(config(&dir), generator).unwrap();

    let key = cache.disk().key_for("Timeline", "Q1 kickoff");
    cache.disk().store(&key, &png(1)).unwrap();

    assert_eq!(cache.get_or_generate("Timeline", "Q1 kickoff").await, Some(png(1)));
}

#[tokio::test(start_paused = true)]
async fn test_miss_generates_once_and_writes_file() {
    let dir = tempdir().unwrap();
    let mut generator = MockImageGenerator::new();
    generator
        .expect_generate()
        .withf(|prompt: &str| prompt.contains("target"))
        .times(1)
        .returning(|_| Ok(png(2)));
    let cache = ImageCache::open(config(&dir), generator).unwrap();

    let first = cache.get_or_generate("Objectives", "grow revenue").await;
    assert_eq!(first, Some(png(2)));

    let path = cache.disk().path_for(&cache.disk().key_for("Objectives", "grow revenue"));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    assert_eq!(fs::read(&path).unwrap(), png(2));

    // Second call is a hit; the mock would panic on a second generation.
    assert_eq!(cache.get_or_generate("Objectives", "grow revenue").await, Some(png(2)));
}

#[tokio::test(start_paused = true)]
async fn test_stale_entry_is_deleted_and_regenerated() {
    let dir = tempdir().unwrap();
    let mut generator = MockImageGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .returning(|_| Ok(png(3)));
    let cache = ImageCache::open(config(&dir), generator).unwrap();

    let key = cache.disk().key_for("Budget", "");
    cache.disk().store(&key, &png(0)).unwrap();
    set_age(&cache.disk().path_for(&key), 8 * DAY);

    assert_eq!(cache.disk().cached(&key), None);
    assert!(!cache.disk().path_for(&key).exists(), "stale file is removed on lookup");
    assert_eq!(cache.get_or_generate("Budget", "").await, Some(png(3)));
    assert_eq!(fs::read(cache.disk().path_for(&key)).unwrap(), png(3));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_is_retried_with_backoff() {
    let dir = tempdir().unwrap();
    let mut generator = MockImageGenerator::new();
    let mut calls = 0;
    generator.expect_generate().times(3).returning(move |_| {
        calls += 1;
        if calls < 3 {
            Err(GenerationError::RateLimited)
        } else {
            Ok(png(4))
        }
    });
    let cache = ImageCache::open(config(&dir), generator).unwrap();

    let started = tokio::time::Instant::now();
    let image = cache.get_or_generate("Risks", "vendor lock-in").await;
    assert_eq!(image, Some(png(4)));
    // 2^0 + 2^1 seconds between the three attempts.
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_client_error_is_not_retried() {
    let dir = tempdir().unwrap();
    let mut generator = MockImageGenerator::new();
    generator.expect_generate().times(1).returning(|_| {
        Err(GenerationError::Client {
            status: 400,
            message: "content policy".into(),
        })
    });
    let cache = ImageCache::open(config(&dir), generator).unwrap();

    assert_eq!(cache.get_or_generate("Team", "").await, None);
    assert!(cache.disk().entries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_yield_none_without_trailing_sleep() {
    let dir = tempdir().unwrap();
    let mut generator = MockImageGenerator::new();
    generator.expect_generate().times(3).returning(|_| {
        Err(GenerationError::Server {
            status: 503,
            message: "overloaded".into(),
        })
    });
    let mut cfg = config(&dir);
    cfg.retry = RetryPolicy {
        max_attempts: 3,
        backoff_base_secs: 2,
    };
    let cache = ImageCache::open(cfg, generator).unwrap();

    let started = tokio::time::Instant::now();
    assert_eq!(cache.get_or_generate("Quality", "").await, None);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert!(cache.disk().entries().is_empty());
}

#[test]
fn test_size_budget_evicts_oldest_first() {
    let dir = tempdir().unwrap();
    let mut cfg = config(&dir);
    cfg.max_size_bytes = 100;
    let store = ImageStore::open(cfg).unwrap();

    store.store("k1", &[1u8; 40]).unwrap();
    set_age(&store.path_for("k1"), Duration::from_secs(60));
    store.store("k2", &[2u8; 40]).unwrap();
    set_age(&store.path_for("k2"), Duration::from_secs(30));
    assert_eq!(store.usage_bytes(), 80);

    store.store("k3", &[3u8; 40]).unwrap();
    assert!(!store.path_for("k1").exists());
    assert!(store.path_for("k2").exists());
    assert!(store.path_for("k3").exists());
    assert_eq!(store.usage_bytes(), 80);
}

#[test]
fn test_store_within_budget_keeps_everything() {
    let dir = tempdir().unwrap();
    let mut cfg = config(&dir);
    cfg.max_size_bytes = 100;
    let store = ImageStore::open(cfg).unwrap();

    store.store("a", &[0u8; 50]).unwrap();
    store.store("b", &[0u8; 50]).unwrap();
    assert_eq!(store.entries().len(), 2);
    assert_eq!(store.usage_bytes(), 100);
}

#[test]
fn test_open_sweeps_expired_files() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir);
    fs::create_dir_all(&cfg.dir).unwrap();
    let old = cfg.dir.join("old.png");
    let fresh = cfg.dir.join("fresh.png");
    let other = cfg.dir.join("notes.txt");
    fs::write(&old, png(5)).unwrap();
    fs::write(&fresh, png(6)).unwrap();
    fs::write(&other, "keep").unwrap();
    set_age(&old, 8 * DAY);
    set_age(&other, 8 * DAY);

    let store = ImageStore::open(cfg).unwrap();
    assert!(!old.exists());
    assert!(fresh.exists());
    assert!(other.exists(), "only cache files are managed");
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.swept_at_open(), 1);
    assert_eq!(store.sweep_expired(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_asset_planner_skips_dividers_and_picks_icons() {
    let dir = tempdir().unwrap();
    let mut generator = MockImageGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .returning(|_| Ok(png(7)));
    let images = ImageCache::open(config(&dir), generator).unwrap();

    let mut rasterizer = MockRasterizer::new();
    rasterizer
        .expect_rasterize()
        .returning(|_, pixels| Ok(vec![pixels as u8]));
    let icons = IconCache::new(IconCacheConfig::default(), IconLibrary::builtin(), rasterizer);

    let mut team = SlideContent::new(LayoutType::Content, "content", "Team");
    team.bullets = vec![BulletPoint::new("Two engineers"), BulletPoint::new("One designer")];
    let presentation = PresentationData {
        title: "Pitch".into(),
        slides: vec![
            SlideContent::new(LayoutType::Section, "section", "Introduction"),
            team,
        ],
        ..PresentationData::default()
    };

    let mut planner = AssetPlanner::new(&icons, &images);
    planner.icon_size = 32;
    let assets = planner.plan(&presentation).await;

    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].image, None);
    assert_eq!(assets[1].image, Some(png(7)));
    assert_eq!(assets[1].icon_name, "users");
    assert_eq!(assets[1].icon_png.as_deref(), Some(&vec![128u8]));
    assert_eq!(slide_text(&presentation.slides[1]), "Two engineers One designer");
}
