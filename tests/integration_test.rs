use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_timetable-render"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

fn image_dimensions(name: &str) -> (u32, u32) {
    let path = output_dir().join(name);
    assert!(path.exists(), "Image file was not created");
    image::image_dimensions(&path).expect("Failed to read image header")
}

#[test]
fn test_week_wide() {
    setup();
    let output_file = "test-week-wide.png";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "week",
            "-i", "tests/fixtures/week.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(image_dimensions(output_file), (1388, 1024));
}

#[test]
fn test_week_compact_with_colors() {
    setup();
    let output_file = "test-week-compact.png";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "week",
            "-i", "tests/fixtures/week.json",
            "--layout", "compact",
            "-c", "back=#FEFEFE",
            "-c", "фронт=#212121",
            "-c", "time=#DD75DD",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(image_dimensions(output_file), (1024, 900));

    let img = image::open(output_dir().join(output_file)).expect("Failed to open image").to_rgba8();
    assert_eq!(*img.get_pixel(0, 0), image::Rgba([0xfe, 0xfe, 0xfe, 0xff]));
}

#[test]
fn test_single_day_file() {
    setup();
    let output_file = "test-day.png";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "day",
            "-i", "tests/fixtures/day.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(image_dimensions(output_file), (512, 600));
}

#[test]
fn test_day_selected_from_week() {
    setup();
    let output_file = "test-day-friday.png";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "day",
            "-i", "tests/fixtures/week.json",
            "-d", "пятница",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Пятница"));
    assert_eq!(image_dimensions(output_file), (512, 600));
}

#[test]
fn test_grades_sheet() {
    setup();
    let output_file = "test-grades.png";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "grades",
            "-i", "tests/fixtures/grades.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let (width, height) = image_dimensions(output_file);
    assert_eq!(width, 1400);
    assert!(height > 200, "Grade sheet is too short: {}", height);
}

#[test]
fn test_demotivator_from_caption_pool() {
    setup();
    let photo_file = "test-dm-source.png";
    let output_file = "test-dm.png";
    cleanup_file(photo_file);
    cleanup_file(output_file);

    image::RgbImage::from_pixel(300, 200, image::Rgb([30, 120, 200]))
        .save(output_dir().join(photo_file))
        .expect("Failed to write source photo");

    let output = cargo_bin()
        .args([
            "dm",
            "-p", &format!("tests/output/{}", photo_file),
            "--captions", "tests/fixtures/captions.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(image_dimensions(output_file), (1024, 1150));
}

#[test]
fn test_demotivator_batch_of_photos() {
    setup();
    let photos = ["test-dm-batch-a.png", "test-dm-batch-b.png"];
    let outputs = ["test-dm-batch-1.png", "test-dm-batch-2.png"];
    for name in photos.iter().chain(outputs.iter()) {
        cleanup_file(name);
    }
    cleanup_file("test-dm-batch.png");

    image::RgbImage::from_pixel(320, 240, image::Rgb([200, 40, 40]))
        .save(output_dir().join(photos[0]))
        .expect("Failed to write source photo");
    image::RgbImage::from_pixel(240, 320, image::Rgb([40, 200, 40]))
        .save(output_dir().join(photos[1]))
        .expect("Failed to write source photo");

    let output = cargo_bin()
        .args([
            "dm",
            "-p", &format!("tests/output/{}", photos[0]),
            "-p", &format!("tests/output/{}", photos[1]),
            "--captions", "tests/fixtures/captions.json",
            "-o", "tests/output/test-dm-batch.png",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("✓ Generated").count(), 2, "stdout: {}", stdout);
    for name in outputs {
        assert_eq!(image_dimensions(name), (1024, 1150));
    }
    assert!(!output_dir().join("test-dm-batch.png").exists());
}

#[test]
fn test_demotivator_without_any_caption() {
    setup();
    let photo_file = "test-dm-nocaption.png";
    cleanup_file(photo_file);

    image::RgbImage::from_pixel(64, 64, image::Rgb([0, 0, 0]))
        .save(output_dir().join(photo_file))
        .expect("Failed to write source photo");

    let output = cargo_bin()
        .args([
            "dm",
            "-p", &format!("tests/output/{}", photo_file),
            "-o", "tests/output/should-not-exist.png",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed without a caption");
}

#[test]
fn test_invalid_color() {
    let output = cargo_bin()
        .args([
            "week",
            "-i", "tests/fixtures/week.json",
            "-c", "back=#12345",
            "-o", "tests/output/should-not-exist.png",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for invalid color");
}

#[test]
fn test_missing_schedule_file() {
    let output = cargo_bin()
        .args([
            "week",
            "-i", "nonexistent.json",
            "-o", "tests/output/should-not-exist.png",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing schedule");
}

#[test]
fn test_unknown_day_name() {
    let output = cargo_bin()
        .args([
            "day",
            "-i", "tests/fixtures/week.json",
            "-d", "someday",
            "-o", "tests/output/should-not-exist.png",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for unknown day");
}
