//! End-to-end pipeline tests over real temp directories.

use chrono::NaiveDateTime;
use pressgang::build::build;
use pressgang::catalog::{self, CatalogError};
use pressgang::config::BuildConfig;
use pressgang::render::{write_pages, MaudTemplates};
use pressgang::types::DATE_FORMAT;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn test_config(root: &Path) -> BuildConfig {
    BuildConfig {
        source_root: root.join("content"),
        output_root: root.join("public"),
        assets_root: root.join("builder"),
        watch: false,
    }
}

fn write_post(source_root: &Path, name: &str, front: &str, body: &str) {
    let posts = source_root.join("posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(posts.join(name), format!("---\n{front}---\n{body}\n")).unwrap();
}

fn front(uuid: &str, date: &str, kind: &str) -> String {
    format!("description: a description\ntags: [notes]\nuuid: {uuid}\ndate: {date}\ntype: {kind}\n")
}

#[test]
fn every_record_appears_once_in_date_order() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(tmp.path());
    for (i, name) in ["a.md", "b.md", "c.md", "d.md"].iter().enumerate() {
        write_post(
            &config.source_root,
            name,
            &front(&format!("u{i}"), &format!("202{i}-01-01-00-00-00", ), "essay"),
            "body",
        );
    }

    let catalog = catalog::gather(&config.source_root).unwrap();
    assert_eq!(catalog.len(), 4);

    let dates: Vec<_> = catalog.records().iter().map(|r| r.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);

    let mut urls: Vec<_> = catalog.records().iter().map(|r| r.url.clone()).collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 4);
}

#[test]
fn two_versions_one_latest() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(tmp.path());
    write_post(
        &config.source_root,
        "draft.md",
        &front("U1", "2023-01-01-00-00-00", "essay"),
        "old",
    );
    write_post(
        &config.source_root,
        "final.md",
        &front("U1", "2024-01-01-00-00-00", "essay"),
        "new",
    );

    let catalog = catalog::gather(&config.source_root).unwrap();
    let newer = catalog.records().iter().find(|r| r.url == "final").unwrap();
    let older = catalog.records().iter().find(|r| r.url == "draft").unwrap();

    assert!(newer.latest);
    assert_eq!(newer.versions, 2);
    assert!(!older.latest);
    assert_eq!(older.versions, 2);
}

#[test]
fn short_post_with_mismatched_title_aborts() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(tmp.path());
    write_post(
        &config.source_root,
        "2023-05-05-10-00-00-hello.md",
        "description: d\ntags: [t]\nuuid: s1\ndate: 2023-05-05-10-00-00\ntype: short\ntitle: hello\n",
        "short body",
    );

    let err = catalog::gather(&config.source_root).unwrap_err();
    assert!(matches!(err, CatalogError::Validate(_)));
    assert!(err.to_string().contains("short"));

    // And the full pipeline refuses to publish anything.
    assert!(build(&config, &MaudTemplates, None).is_err());
    assert!(!config.output_root.exists());
}

#[test]
fn image_without_alt_aborts_naming_the_field() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(tmp.path());
    write_post(
        &config.source_root,
        "p.md",
        &format!("{}image: photo.webp\n", front("u1", "2023-01-01-00-00-00", "essay")),
        "body",
    );

    let err = catalog::gather(&config.source_root).unwrap_err();
    assert!(err.to_string().contains("image-alt"));
}

#[test]
fn empty_source_tree_builds_only_static_assets() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(tmp.path());
    fs::create_dir_all(config.source_root.join("posts")).unwrap();
    fs::create_dir_all(config.assets_root.join("css")).unwrap();
    fs::write(config.assets_root.join("css/main.css"), "body{}").unwrap();

    let report = build(&config, &MaudTemplates, None).unwrap();
    assert_eq!(report.pages, 0);
    assert!(config.output_root.join("css/main.css").exists());
    assert!(fs::read_dir(&config.output_root)
        .unwrap()
        .filter_map(|e| e.ok())
        .all(|e| e.path().extension().is_none_or(|x| x != "html")));
}

#[test]
fn rerun_on_unchanged_sources_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(tmp.path());
    write_post(
        &config.source_root,
        "stable.md",
        &front("u1", "2023-01-01-00-00-00", "essay"),
        "Same body both times.",
    );
    write_post(
        &config.source_root,
        "other.md",
        &front("u2", "2023-02-01-00-00-00", "long"),
        "Another body.",
    );

    // Render with a fixed timestamp so the comparison is exact.
    let now = NaiveDateTime::parse_from_str("2024-06-01-12-00-00", DATE_FORMAT).unwrap();
    let catalog = catalog::gather(&config.source_root).unwrap();

    let out_a = tmp.path().join("out-a");
    let out_b = tmp.path().join("out-b");
    fs::create_dir_all(&out_a).unwrap();
    fs::create_dir_all(&out_b).unwrap();
    write_pages(&MaudTemplates, &catalog, &out_a, now).unwrap();

    let catalog2 = catalog::gather(&config.source_root).unwrap();
    write_pages(&MaudTemplates, &catalog2, &out_b, now).unwrap();

    for name in ["stable.html", "other.html"] {
        let a = fs::read(out_a.join(name)).unwrap();
        let b = fs::read(out_b.join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn converted_images_feed_the_published_site() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(tmp.path());
    let images = config.source_root.join("images");
    fs::create_dir_all(&images).unwrap();
    image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]))
        .save_with_format(images.join("photo.png"), image::ImageFormat::Png)
        .unwrap();
    write_post(
        &config.source_root,
        "p.md",
        &front("u1", "2023-01-01-00-00-00", "essay"),
        "![a photo](/images/photo.png)",
    );

    let report = build(&config, &MaudTemplates, None).unwrap();
    assert_eq!(report.images_converted, 1);

    // Source image converted, markdown reference rewritten, output copied.
    assert!(images.join("photo.webp").exists());
    assert!(!images.join("photo.png").exists());
    let page = fs::read_to_string(config.output_root.join("p.html")).unwrap();
    assert!(page.contains("photo.webp"));
    assert!(config.output_root.join("images/photo.webp").exists());
}
