//! CLI integration tests for the `cgrid` binary.
//!
//! Each test runs the binary in a fresh temporary directory with
//! `XDG_CONFIG_HOME` pointed at it, so no user configuration leaks in.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const IMPOSTOR: &str = "RD_RD_RD_RD/RD_RD_RD_RD/GY_GY_GY_GY/GY_GY_GY_GY";
const ALL_PURPLE: &str = "PU_PU_PU_PU/PU_PU_PU_PU/PU_PU_PU_PU/PU_PU_PU_PU";

/// Run cgrid in `dir` and return (stdout, stderr, exit code).
fn run_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_cgrid"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .output()
        .expect("Failed to execute cgrid");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn run(args: &[&str]) -> (String, String, i32) {
    let temp = TempDir::new().unwrap();
    run_in(temp.path(), args)
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("valid JSON")
}

// ============================================================================
// show / apply / set
// ============================================================================

#[test]
fn test_show_defaults_to_first_preset() {
    let (stdout, _, code) = run(&["show", "--json"]);
    assert_eq!(code, 0);
    let view = json(&stdout);
    assert_eq!(view["label"], "ImPOstor");
    assert_eq!(view["code"], IMPOSTOR);
    assert_eq!(view["grid"].as_array().unwrap().len(), 16);
}

#[test]
fn test_show_plain_text() {
    let (stdout, _, code) = run(&["show", "--preset", "FADE", "--no-color"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("FADE\n"));
    assert!(stdout.contains(" 0: BK DG LG WH"));
    assert!(stdout.contains("Order Code: BK_DG_LG_WH/BK_DG_LG_WH/BK_DG_LG_WH/BK_DG_LG_WH"));
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn test_show_unknown_preset() {
    let (_, stderr, code) = run(&["show", "--preset", "Nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown preset 'Nope'"));
}

#[test]
fn test_apply_matches_preset() {
    let (stdout, _, code) = run(&["apply", "PUPUPUPUPUPUPUPUPUPUPUPUPUPUPUPU", "--json"]);
    assert_eq!(code, 0);
    let view = json(&stdout);
    assert_eq!(view["label"], "ALL PURPLE");
    assert_eq!(view["code"], ALL_PURPLE);
}

#[test]
fn test_apply_too_short() {
    let (stdout, stderr, code) = run(&["apply", "RD_RD"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Please provide at least 16 color codes (found 2)"));
}

#[test]
fn test_set_cells() {
    let (stdout, _, code) = run(&["set", "3=BL", "--json"]);
    assert_eq!(code, 0);
    let view = json(&stdout);
    assert_eq!(view["label"], "Custom");
    assert_eq!(view["code"], "RD_RD_RD_BL/RD_RD_RD_RD/GY_GY_GY_GY/GY_GY_GY_GY");
    assert_eq!(view["grid"][3], "BL");
}

#[test]
fn test_set_back_to_preset() {
    let (stdout, _, code) = run(&["set", "--preset", "ALL PURPLE", "0=RD", "0=PU", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["label"], "ALL PURPLE");
}

#[test]
fn test_set_invalid_edit() {
    let (_, stderr, code) = run(&["set", "3=BLUE"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("exactly 2 characters"));
}

#[test]
fn test_set_out_of_range() {
    let (_, stderr, code) = run(&["set", "16=BL"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of range"));
}

// ============================================================================
// format / presets / palette
// ============================================================================

#[test]
fn test_format_normalizes() {
    let (stdout, _, code) = run(&["format", "RDRD/RDRD_RDRDRDRDRDRDRDRDRDRDRDRD"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "RD_RD_RD_RD/RD_RD_RD_RD/RD_RD_RD_RD/RD_RD_RD_RD");
}

#[test]
fn test_format_dangling_character_warns() {
    let (stdout, stderr, code) = run(&["format", "RD_RD_R"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "RD_RD");
    assert!(stderr.contains("Warning:"));
}

#[test]
fn test_presets_json() {
    let (stdout, _, code) = run(&["presets", "--json"]);
    assert_eq!(code, 0);
    let presets = json(&stdout);
    let presets = presets.as_array().unwrap();
    assert_eq!(presets.len(), 10);
    assert_eq!(presets[0]["name"], "ImPOstor");
    assert_eq!(presets[1]["code"], "BK_BK_BK_BK/OR_OR_OR_OR/RD_RD_RD_RD/DG_DG_DG_DG/");
}

#[test]
fn test_palette_json() {
    let (stdout, _, code) = run(&["palette", "--json"]);
    assert_eq!(code, 0);
    let palette = json(&stdout);
    let palette = palette.as_array().unwrap();
    assert_eq!(palette.len(), 11);
    assert_eq!(palette[0]["code"], "RD");
    assert_eq!(palette[6]["hex"], "#876FCC");
}

#[test]
fn test_palette_plain() {
    let (stdout, _, code) = run(&["palette", "--no-color"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("IB  Ice Blue"));
}

// ============================================================================
// export
// ============================================================================

#[test]
fn test_export_default_name() {
    let temp = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_in(temp.path(), &["export", "--preset", "MERICA"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout.trim(), "./grid-MERICA.png");

    let image = image::open(temp.path().join("grid-MERICA.png")).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (320, 320));
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
    // First cell is BL
    assert_eq!(image.get_pixel(30, 30).0, [69, 204, 245]);
}

#[test]
fn test_export_scaled_jpeg() {
    let temp = TempDir::new().unwrap();
    let (_, stderr, code) =
        run_in(temp.path(), &["export", "-o", "out/", "--format", "jpg", "--scale", "2"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let path = temp.path().join("out").join("grid-ImPOstor.jpg");
    let image = image::open(&path).unwrap();
    assert_eq!(image.width(), 640);
}

#[test]
fn test_export_sanitizes_label() {
    let temp = TempDir::new().unwrap();
    let (_, _, code) = run_in(temp.path(), &["export", "--preset", "Linn LM-1(1980)", "-o", "x/"]);
    assert_eq!(code, 0);
    assert!(temp.path().join("x").join("grid-Linn LM-1(1980).png").exists());
}

#[test]
fn test_export_invalid_scale() {
    let (_, _, code) = run(&["export", "--scale", "0"]);
    assert_eq!(code, 2);
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_adds_palette_and_presets() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("cgrid.toml"),
        r##"
[[palette]]
code = "GY"
name = "Gray"
color = "#808080"

[[presets]]
name = "Checker"
code = "BK_WH_BK_WH/WH_BK_WH_BK/BK_WH_BK_WH/WH_BK_WH_BK"
"##,
    )
    .unwrap();

    let (stdout, _, code) = run_in(temp.path(), &["palette", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout).as_array().unwrap().len(), 12);

    let (stdout, _, code) = run_in(
        temp.path(),
        &["apply", "BKWHBKWHWHBKWHBKBKWHBKWHWHBKWHBK", "--json"],
    );
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["label"], "Checker");
}

#[test]
fn test_invalid_config_reports_errors() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    fs::write(&config, "[export]\nformat = \"gif\"\n").unwrap();

    let (_, stderr, code) = run(&["--config", config.to_str().unwrap(), "show"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Config validation failed"));
}

#[test]
fn test_unknown_code_warns_once() {
    let (_, stderr, code) = run(&["show", "--no-color"]);
    assert_eq!(code, 0);
    assert_eq!(stderr.matches("'GY' not found").count(), 1);
}

#[test]
fn test_set_rejects_delimiter_in_code() {
    let (stdout, stderr, code) = run(&["set", "3=R/"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("color code 'R/'"));
}

#[test]
fn test_oversized_export_layout_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("cgrid.toml"), "[export]\ncell_size = 2000000000\n").unwrap();

    let (stdout, stderr, code) = run_in(temp.path(), &["export"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("export.cell_size must be 1-1024"));
}

#[test]
fn test_export_scale_over_image_limit() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("cgrid.toml"), "[export]\ncell_size = 1024\n").unwrap();

    let (_, stderr, code) = run_in(temp.path(), &["export", "--scale", "4"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("exceeds 8192"));
    assert!(!temp.path().join("grid-ImPOstor.png").exists());
}

// ============================================================================
// copy
// ============================================================================

#[cfg(unix)]
#[test]
fn test_copy_without_tool_or_terminal_fails() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_cgrid"))
        .arg("copy")
        .current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path())
        .env("PATH", temp.path())
        .env_remove("WAYLAND_DISPLAY")
        .output()
        .expect("Failed to execute cgrid");

    assert_eq!(output.status.code(), Some(1));
    // Nothing written to the redirected stdout
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no clipboard backend available"), "{}", stderr);
}

#[test]
fn test_copy_osc52_backend_writes_sequence() {
    let (stdout, stderr, code) = run(&["copy", "--preset", "FADE", "--backend", "osc52"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("\x1b]52;c;"));
    assert!(stderr.contains("Copied BK_DG_LG_WH/"));
}
