//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release -- --ignored --nocapture bench

use std::time::Instant;

use chrono::{Duration, Utc};
use tempfile::NamedTempFile;

use showcase::database::{find_post_by_slug, init_db, insert_media, insert_post, list_posts};
use showcase::handler::media::content_snapshot;
use showcase::model::{new_document_id, MediaKind, MediaRecord, Post};
use showcase::portfolio::{apply_filter, ContentFilter};
use showcase::slug::slugify;

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(),
{
    let start = Instant::now();

    for _ in 0..iterations {
        f();
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

#[test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
fn bench_portfolio_snapshot() {
    println!("\n=== Benchmark: Portfolio snapshot ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let db = init_db(temp_db.path().to_str().unwrap()).unwrap();

    let now = Utc::now();
    for i in 0..500 {
        let kind = if i % 2 == 0 { MediaKind::Video } else { MediaKind::Audio };
        let record = MediaRecord {
            id: new_document_id(),
            title: format!("Item {}", i),
            tags: vec!["bench".to_string()],
            url: format!("http://localhost:8080/media/uploads/{}/{}.bin", kind.as_str(), i),
            cover_url: None,
            kind,
            created_at: now - Duration::seconds(i),
        };
        insert_media(&db, &record).unwrap();
    }

    benchmark("Merge 500 records", 200, || {
        let items = content_snapshot(&db).unwrap();
        assert_eq!(items.len(), 500);
    });

    benchmark("Merge + filter audio", 200, || {
        let items = apply_filter(content_snapshot(&db).unwrap(), ContentFilter::Audio);
        assert_eq!(items.len(), 250);
    });
}

#[test]
#[ignore]
fn bench_post_lookup_by_slug() {
    println!("\n=== Benchmark: Post lookup by slug ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let db = init_db(temp_db.path().to_str().unwrap()).unwrap();

    let now = Utc::now();
    for i in 0..500 {
        let title = format!("Behind the scenes, part {}", i);
        let post = Post {
            id: new_document_id(),
            slug: slugify(&title),
            title,
            content: "Lorem ipsum\ndolor sit amet".to_string(),
            youtube_url: None,
            cover_url: None,
            created_at: now - Duration::seconds(i),
        };
        insert_post(&db, &post).unwrap();
    }

    benchmark("List 500 posts", 200, || {
        assert_eq!(list_posts(&db).unwrap().len(), 500);
    });

    benchmark("Find by slug", 200, || {
        assert!(find_post_by_slug(&db, "behind-the-scenes-part-250").unwrap().is_some());
    });

    benchmark("Slugify title", 10_000, || {
        slugify("  A Rather Long Title -- With Punctuation!!  ");
    });
}
