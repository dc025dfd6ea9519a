use airpanel::fan::{FanLabel, FanSpec, PowerState, build_fan};
use airpanel::particles::build_starfield;
use airpanel::serialize::XML_DECLARATION;
use airpanel::{Error, Node, PanelOptions, build_panel, render_panel, to_document_string, write_panel};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::Path;

fn write_resources(dir: &Path, js: &str, style_xml: &str) {
    fs::create_dir_all(dir.join("js")).expect("mkdir js");
    fs::create_dir_all(dir.join("style")).expect("mkdir style");
    fs::write(dir.join("js/update.js"), js).expect("write js");
    fs::write(dir.join("style/defs.xml"), style_xml).expect("write style");
}

#[test]
fn fan1_scenario() {
    let mut root = Node::new("svg");
    build_fan(
        &mut root,
        &FanSpec {
            x: 10.0,
            y: 50.0,
            size: 10.0,
            stroke_width: 0.75,
            id: "power-fan1",
            label: FanLabel::Fan1,
            state: PowerState::On,
        },
    );

    let group = root.find_by_id("power-fan1").expect("fan group");
    assert!(group.has_class("power-on"));
    let blades = group
        .descendants()
        .filter(|n| n.has_class("fan-blade"))
        .count();
    assert_eq!(blades, 5);
    let disks = group
        .descendants()
        .filter(|n| n.has_class("power-bg-disk"))
        .count();
    assert_eq!(disks, 1);

    let label = root
        .children
        .iter()
        .find(|n| n.has_class("fan-label"))
        .and_then(Node::text);
    assert_eq!(label, Some("FAN1"));
    assert_eq!(root.find_by_id("fan1-hours").and_then(Node::text), Some("000000"));
}

#[test]
fn starfield_has_75_lines_with_two_animations_each() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut root = Node::new("g");
    build_starfield(&mut root, 75, &mut rng);
    assert_eq!(root.children.len(), 75);
    for line in &root.children {
        assert_eq!(line.tag, "line");
        let animates: Vec<&str> = line
            .children_by_tag("animate")
            .filter_map(|a| a.attr("attributeName"))
            .collect();
        assert_eq!(animates, ["y1", "y2"]);
    }
}

#[test]
fn same_seed_same_document() {
    let a = build_panel(Some("go()"), Some(".x{}"), &mut StdRng::seed_from_u64(5));
    let b = build_panel(Some("go()"), Some(".x{}"), &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
    assert_eq!(to_document_string(&a), to_document_string(&b));

    let c = build_panel(Some("go()"), Some(".x{}"), &mut StdRng::seed_from_u64(6));
    assert_ne!(a, c);
}

#[test]
fn script_and_style_round_trip_verbatim() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let js = "if (a < b && b > c) { label.textContent = '&lt;'; }";
    let css = "g > circle { fill: red; }";
    let style_xml = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><style><![CDATA[{css}]]></style></svg>"#
    );
    write_resources(tmp.path(), js, &style_xml);

    let opts = PanelOptions::from_resource_dir(tmp.path()).with_seed(1);
    let doc = render_panel(&opts).expect("render");

    assert!(doc.starts_with(&format!("{XML_DECLARATION}\n<svg ")));
    assert!(doc.contains(js), "script not embedded verbatim");
    assert!(doc.contains(&format!("<style>{css}</style>")));
    // the script's own literal entity is the only one left
    assert_eq!(doc.matches("&lt;").count(), 1);
    assert!(!doc.contains("&amp;"));
}

#[test]
fn output_is_well_formed_xml() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_resources(
        tmp.path(),
        "function update(v) { return v < 3 && v > 1; }",
        "<svg><style>.fan-label { font-size: 4px; }</style></svg>",
    );
    let doc = render_panel(&PanelOptions::from_resource_dir(tmp.path()).with_seed(2)).expect("render");
    let parsed = roxmltree::Document::parse(&doc).expect("well-formed output");
    let root = parsed.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("id"), Some("svgAirflowM1"));
    assert_eq!(root.attribute("viewBox"), Some("0 0 100 100"));

    let script = root
        .children()
        .find(|n| n.has_tag_name("script"))
        .and_then(|n| n.text())
        .expect("script text");
    assert!(script.contains("v < 3 && v > 1"));

    let lines = parsed
        .descendants()
        .filter(|n| n.has_tag_name("line") && n.attribute("stroke") == Some("white"))
        .count();
    assert_eq!(lines, 75);
    let particles = parsed
        .descendants()
        .filter(|n| n.attribute("class") == Some("plume-particle"))
        .count();
    assert_eq!(particles, 10 + 10 + 24);
}

#[test]
fn missing_resources_are_not_errors() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = render_panel(&PanelOptions::from_resource_dir(tmp.path()).with_seed(3))
        .expect("render without resources");
    assert!(!doc.contains("<script"));
    assert!(!doc.contains("<style"));
    assert!(doc.contains(r#"id="blur-effect""#));
}

#[test]
fn malformed_style_is_fatal() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_resources(tmp.path(), "x()", "this is <not xml");
    let err = render_panel(&PanelOptions::from_resource_dir(tmp.path())).unwrap_err();
    assert!(matches!(err, Error::MalformedStyle { .. }), "{err}");
}

#[test]
fn unwritable_output_is_reported() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("no-such-dir").join("te.svg");
    let err = write_panel(&out, &PanelOptions::default().with_seed(4)).unwrap_err();
    assert!(matches!(err, Error::WriteOutput { .. }), "{err}");
}

#[test]
fn write_panel_writes_the_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("te.svg");
    let opts = PanelOptions::default().with_seed(8);
    write_panel(&out, &opts).expect("write");
    let written = fs::read_to_string(&out).expect("read back");
    assert_eq!(written, render_panel(&opts).expect("render"));
    assert!(!written.ends_with('\n'));
}
