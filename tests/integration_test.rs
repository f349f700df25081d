use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
  <rect x="8" y="8" width="48" height="48" rx="8" fill="#e4572e"/>
</svg>"##;

fn webicons(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_webicons"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("Failed to run webicons")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("webicons failed with status {}", output.status);
    }
}

/// Runs `webicons logo.svg` with the default `--out` and checks the summary.
#[test]
fn test_default_run_writes_layout_and_summary() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("logo.svg"), LOGO_SVG).unwrap();

    let output = webicons(temp_dir.path(), &["logo.svg"]);
    assert_success(&output);

    let base = temp_dir.path().join("assets/icons");
    for rel in [
        "favicon/favicon-16x16.png",
        "favicon/favicon-32x32.png",
        "favicon/favicon.ico",
        "pwa/icon-192x192.png",
        "pwa/icon-256x256.png",
        "pwa/icon-384x384.png",
        "pwa/icon-512x512.png",
        "pwa/icon-maskable-512x512.png",
        "apple/apple-touch-icon.png",
    ] {
        assert!(base.join(rel).is_file(), "missing {rel}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Icon generation complete."));
    assert!(stdout.contains("Written:"));
    assert!(!stdout.contains("Skipped"));
    assert!(stdout.contains(
        r#"<link rel="apple-touch-icon" sizes="180x180" href="/assets/icons/apple/apple-touch-icon.png">"#
    ));
    assert!(stdout.contains(r#""purpose": "maskable""#));
}

#[test]
fn test_rerun_reports_skipped_and_exits_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("logo.svg"), LOGO_SVG).unwrap();

    assert_success(&webicons(temp_dir.path(), &["logo.svg", "--out", "out"]));
    let output = webicons(temp_dir.path(), &["logo.svg", "--out", "out"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skipped (already exists; use --overwrite to replace):"));
    assert!(!stdout.contains("Written:"));
    assert!(stdout.contains("out/pwa/icon-512x512.png"));

    let output = webicons(temp_dir.path(), &["logo.svg", "--out", "out", "--overwrite"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Written:"));
    assert!(!stdout.contains("Skipped"));
}

#[test]
fn test_no_maskable_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("logo.svg"), LOGO_SVG).unwrap();

    let output = webicons(temp_dir.path(), &["logo.svg", "-o", "out", "--no-maskable"]);
    assert_success(&output);

    assert!(!temp_dir.path().join("out/pwa/icon-maskable-512x512.png").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("icon-maskable"));
}

#[test]
fn test_background_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("logo.svg"), LOGO_SVG).unwrap();

    let output = webicons(
        temp_dir.path(),
        &["logo.svg", "-o", "out", "--background", "#00ff00"],
    );
    assert_success(&output);

    let img = image::open(temp_dir.path().join("out/pwa/icon-192x192.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
}

#[test]
fn test_invalid_background_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("logo.svg"), LOGO_SVG).unwrap();

    let output = webicons(
        temp_dir.path(),
        &["logo.svg", "-o", "out", "--background", "definitely-not-a-color"],
    );

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_non_svg_input_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("logo.png"), b"not really a png").unwrap();

    let output = webicons(temp_dir.path(), &["logo.png", "-o", "out"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input must be an .svg file"), "{stderr}");
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = webicons(temp_dir.path(), &["missing.svg"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SVG not found"), "{stderr}");
    assert!(!temp_dir.path().join("assets").exists());
}
