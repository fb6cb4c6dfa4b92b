//! End-to-end properties of a build run, driven through the library API.
//!
//! Each test builds a throwaway post directory, runs the pipeline and checks
//! the resulting images directory and gallery document.

use seq_gal::config::{GalleryConfig, OrderMode};
use seq_gal::pipeline::{self, PipelineError};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn post(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    fs::create_dir_all(&images).unwrap();
    for name in names {
        fs::write(images.join(name), format!("content of {name}")).unwrap();
    }
    tmp
}

fn whistler(order: OrderMode) -> GalleryConfig {
    GalleryConfig {
        base_name: "Whistler".into(),
        order,
        ..GalleryConfig::default()
    }
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

fn set_mtime(path: &Path, secs: u64) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Minimal JPEG carrying only an EXIF `DateTimeOriginal`.
fn jpeg_taken_at(stamp: &str) -> Vec<u8> {
    let mut value = stamp.as_bytes().to_vec();
    value.push(0);

    let mut tiff = b"II".to_vec();
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    for (tag, typ, count, offset) in [(0x8769u16, 4u16, 1u32, 26u32), (0x9003, 2, 20, 44)] {
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&tag.to_le_bytes());
        tiff.extend_from_slice(&typ.to_le_bytes());
        tiff.extend_from_slice(&count.to_le_bytes());
        tiff.extend_from_slice(&offset.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
    }
    tiff.extend_from_slice(&value);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

fn block_links(doc: &str) -> Vec<&str> {
    doc.lines()
        .filter(|l| l.starts_with("!["))
        .map(|l| {
            let start = l.find("](").unwrap() + 2;
            let end = l.find("){").unwrap();
            &l[start..end]
        })
        .collect()
}

#[test]
fn renames_into_contiguous_sequence() {
    let tmp = post(&["IMG_3.JPG", "IMG_1.jpg", "IMG_2.png", "IMG_4.jpeg", "notes.txt"]);
    let report = pipeline::run(tmp.path(), &whistler(OrderMode::Filename), |_| {}).unwrap();

    let images = tmp.path().join("images");
    assert_eq!(
        names_in(&images),
        vec![
            "Whistler01.jpeg",
            "Whistler02.jpeg",
            "Whistler03.jpeg",
            "Whistler04.jpeg",
            "notes.txt",
        ]
    );
    assert!(names_in(&images).iter().all(|n| !n.contains("tmprename")));
    assert_eq!(report.filenames.len(), 4);
}

#[test]
fn document_lists_every_file_in_order() {
    let tmp = post(&["c.jpg", "a.jpg", "b.jpg"]);
    let report = pipeline::run(tmp.path(), &whistler(OrderMode::Filename), |_| {}).unwrap();

    let doc = fs::read_to_string(report.gallery_path).unwrap();
    assert_eq!(
        block_links(&doc),
        vec![
            "images/Whistler01.jpeg",
            "images/Whistler02.jpeg",
            "images/Whistler03.jpeg",
        ]
    );
    assert!(doc.ends_with("{group=\"Whistler\"}\n\n"));
}

#[test]
fn capture_time_beats_filename_order() {
    let tmp = post(&[]);
    let images = tmp.path().join("images");
    fs::write(images.join("a.jpg"), jpeg_taken_at("2025:08:29 15:00:00")).unwrap();
    fs::write(images.join("b.jpg"), jpeg_taken_at("2025:08:29 09:00:00")).unwrap();
    fs::write(images.join("c.jpg"), jpeg_taken_at("2025:08:29 12:00:00")).unwrap();
    let original_b = fs::read(images.join("b.jpg")).unwrap();
    let original_a = fs::read(images.join("a.jpg")).unwrap();

    pipeline::run(tmp.path(), &whistler(OrderMode::CaptureTime), |_| {}).unwrap();

    assert_eq!(fs::read(images.join("Whistler01.jpeg")).unwrap(), original_b);
    assert_eq!(fs::read(images.join("Whistler03.jpeg")).unwrap(), original_a);
}

#[test]
fn second_run_does_not_renumber() {
    let tmp = post(&["x.jpg", "y.png", "z.jpeg"]);
    let images = tmp.path().join("images");
    for (i, name) in ["x.jpg", "y.png", "z.jpeg"].iter().enumerate() {
        set_mtime(&images.join(name), 10_000 - i as u64 * 100);
    }

    let config = whistler(OrderMode::CaptureTime);
    pipeline::run(tmp.path(), &config, |_| {}).unwrap();
    let first: Vec<Vec<u8>> = names_in(&images)
        .iter()
        .map(|n| fs::read(images.join(n)).unwrap())
        .collect();

    pipeline::run(tmp.path(), &config, |_| {}).unwrap();
    let second: Vec<Vec<u8>> = names_in(&images)
        .iter()
        .map(|n| fs::read(images.join(n)).unwrap())
        .collect();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(images.join("Whistler01.jpeg")).unwrap(), "content of z.jpeg");
}

#[test]
fn adding_a_photo_renumbers_safely() {
    let tmp = post(&["a.jpg", "c.jpg"]);
    let config = whistler(OrderMode::Filename);
    pipeline::run(tmp.path(), &config, |_| {}).unwrap();

    // A new photo that sorts first shifts every existing number
    let images = tmp.path().join("images");
    fs::write(images.join("An_early_one.jpg"), "early").unwrap();
    let report = pipeline::run(tmp.path(), &config, |_| {}).unwrap();

    assert_eq!(report.filenames.len(), 3);
    assert_eq!(fs::read_to_string(images.join("Whistler01.jpeg")).unwrap(), "early");
    assert_eq!(fs::read_to_string(images.join("Whistler02.jpeg")).unwrap(), "content of a.jpg");
    assert_eq!(fs::read_to_string(images.join("Whistler03.jpeg")).unwrap(), "content of c.jpg");
}

#[test]
fn zero_images_is_a_no_op_failure() {
    let tmp = post(&["readme.txt"]);
    let result = pipeline::run(tmp.path(), &whistler(OrderMode::CaptureTime), |_| {});

    assert!(matches!(result, Err(PipelineError::Empty { .. })));
    assert!(!tmp.path().join("Whistler.md").exists());
    assert_eq!(names_in(&tmp.path().join("images")), vec!["readme.txt"]);
}

#[test]
fn two_file_example_with_equal_mtimes() {
    for order in [OrderMode::Filename, OrderMode::CaptureTime] {
        let tmp = post(&["b.png", "a.jpg"]);
        let images = tmp.path().join("images");
        set_mtime(&images.join("a.jpg"), 1_700_000_000);
        set_mtime(&images.join("b.png"), 1_700_000_000);

        let report = pipeline::run(tmp.path(), &whistler(order), |_| {}).unwrap();
        assert_eq!(report.filenames, vec!["Whistler01.jpeg", "Whistler02.jpeg"]);
        assert_eq!(
            fs::read_to_string(images.join("Whistler01.jpeg")).unwrap(),
            "content of a.jpg"
        );
        assert_eq!(
            fs::read_to_string(images.join("Whistler02.jpeg")).unwrap(),
            "content of b.png"
        );
        let doc = fs::read_to_string(tmp.path().join("Whistler.md")).unwrap();
        assert_eq!(doc.matches("![Whistler]").count(), 2);
    }
}

#[test]
fn detected_folder_is_used_when_images_missing() {
    let tmp = TempDir::new().unwrap();
    let photos = tmp.path().join("Trip Photos");
    fs::create_dir_all(&photos).unwrap();
    fs::write(photos.join("one.jpg"), "1").unwrap();

    let report = pipeline::run(tmp.path(), &whistler(OrderMode::Filename), |_| {}).unwrap();
    assert!(report.images.detected);
    assert_eq!(names_in(&photos), vec!["Whistler01.jpeg"]);
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_file_name_joins_the_sequence() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = post(&["a.jpg"]);
    let images = tmp.path().join("images");
    fs::write(images.join(OsStr::from_bytes(b"b\xffphoto.jpg")), "odd").unwrap();

    let report = pipeline::run(tmp.path(), &whistler(OrderMode::Filename), |_| {}).unwrap();
    assert_eq!(report.filenames, vec!["Whistler01.jpeg", "Whistler02.jpeg"]);
    assert_eq!(names_in(&images), vec!["Whistler01.jpeg", "Whistler02.jpeg"]);
    assert_eq!(fs::read_to_string(images.join("Whistler02.jpeg")).unwrap(), "odd");
}
