use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

fn airpanel() -> Command {
    Command::new(assert_cmd::cargo_bin!("airpanel"))
}

#[test]
fn writes_default_output_without_resources() {
    let tmp = tempfile::tempdir().expect("tempdir");
    airpanel()
        .current_dir(tmp.path())
        .args(["--seed", "1"])
        .assert()
        .success();

    let svg = fs::read_to_string(tmp.path().join("te.svg")).expect("te.svg written");
    let doc = roxmltree::Document::parse(&svg).expect("well-formed");
    assert_eq!(doc.root_element().attribute("id"), Some("svgAirflowM1"));
    assert!(!svg.contains("<script"));
}

#[test]
fn embeds_resources_and_honors_output_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let res = tmp.path().join("assets");
    fs::create_dir_all(res.join("js")).expect("mkdir");
    fs::create_dir_all(res.join("style")).expect("mkdir");
    fs::write(res.join("js/update.js"), "if (a < b && c) {}").expect("write js");
    fs::write(
        res.join("style/defs.xml"),
        "<svg><style>.fan-label { fill: black; }</style></svg>",
    )
    .expect("write style");

    let out = tmp.path().join("panel.svg");
    airpanel()
        .args([
            "--resources",
            res.to_string_lossy().as_ref(),
            "--seed",
            "7",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("output written");
    assert!(svg.contains("if (a < b && c) {}"));
    assert!(svg.contains("<style>.fan-label { fill: black; }</style>"));
}

#[test]
fn same_seed_is_reproducible() {
    let tmp = tempfile::tempdir().expect("tempdir");
    for name in ["a.svg", "b.svg"] {
        airpanel()
            .current_dir(tmp.path())
            .args(["--seed", "99", name])
            .assert()
            .success();
    }
    let a = fs::read(tmp.path().join("a.svg")).expect("a");
    let b = fs::read(tmp.path().join("b.svg")).expect("b");
    assert_eq!(a, b);
}

#[test]
fn config_file_supplies_seed() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::write(tmp.path().join("panel.json"), r#"{ "seed": 5 }"#).expect("write config");
    airpanel()
        .current_dir(tmp.path())
        .args(["--config", "panel.json", "x.svg"])
        .assert()
        .success();
    airpanel()
        .current_dir(tmp.path())
        .args(["--config", "panel.json", "y.svg"])
        .assert()
        .success();
    assert_eq!(
        fs::read(tmp.path().join("x.svg")).expect("x"),
        fs::read(tmp.path().join("y.svg")).expect("y")
    );
}

#[test]
fn malformed_style_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("res/style")).expect("mkdir");
    fs::write(tmp.path().join("res/style/defs.xml"), "<svg><style>").expect("write");
    airpanel()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1);
    assert!(!tmp.path().join("te.svg").exists());
}

#[test]
fn unwritable_output_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("missing-dir").join("te.svg");
    airpanel()
        .current_dir(tmp.path())
        .arg(out.to_string_lossy().as_ref())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn help_prints_usage() {
    airpanel().arg("--help").assert().failure().code(2);
}
