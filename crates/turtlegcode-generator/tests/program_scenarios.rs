use turtlegcode_generator::{Config, ConfigPatch, GcodeGenerator, Segment};
use turtlegcode_parser::{ProgramParser, ProgramSummary};
use turtlegcode_settings::PenPreset;

fn body(text: &str) -> Vec<&str> {
    // Lines between the header separator and the footer separator
    let lines: Vec<&str> = text.lines().collect();
    let end = lines.len() - 3;
    lines[4..end].to_vec()
}

#[test]
fn test_single_segment() {
    let mut generator = GcodeGenerator::new();
    generator.record(Segment::new(0.0, 0.0, 10.0, 0.0));
    generator.rebuild();
    let text = generator.program_text();

    assert_eq!(
        body(&text),
        vec!["M3 ; Pen down", "G1 X10.000 Y0.000 F3000 ;", "M5 ; Pen up"]
    );
    assert!(text.ends_with("\nG0 X0 Y0 ; Return to origin\nM2 ; End program"));
}

#[test]
fn test_empty_history_after_clear() {
    let mut generator = GcodeGenerator::new();
    generator.record(Segment::new(-5.0, 5.0, 5.0, -5.0));
    generator.rebuild();
    generator.clear();
    generator.rebuild();
    let text = generator.program_text();

    assert!(text.starts_with("G21 ; Set units to millimeters\nG90 ; Absolute positioning\nG28 ;\n\n"));
    assert!(text.contains("; No drawing commands recorded\n\nG0 X0 Y0 ; Return to origin\nM2 ; End program"));
    assert!(!text.lines().any(|l| l.starts_with("G1 ")));
    assert!(!text.contains("Pen"));
}

#[test]
fn test_disjoint_segments_travel_with_pen_up() {
    let mut generator = GcodeGenerator::new();
    generator.record_all([
        Segment::new(0.0, 0.0, 10.0, 0.0),
        Segment::new(0.0, 10.0, 10.0, 10.0),
    ]);
    generator.rebuild();
    let text = generator.program_text();

    // y is inverted, so the first segment sits at the top of the page
    assert_eq!(
        body(&text),
        vec![
            "G0 X0.000 Y10.000 ;",
            "M3 ; Pen down",
            "G1 X10.000 Y10.000 F3000 ;",
            "M5 ; Pen up",
            "G0 X0.000 Y0.000 ;",
            "M3 ; Pen down",
            "G1 X10.000 Y0.000 F3000 ;",
            "M5 ; Pen up",
        ]
    );
}

#[test]
fn test_chained_segments_draw_continuously() {
    let mut generator = GcodeGenerator::new();
    generator.record_all([
        Segment::new(0.0, 0.0, 10.0, 0.0),
        Segment::new(10.0, 0.0, 10.0, -10.0),
        Segment::new(10.005, -10.0, 0.0, -10.0),
    ]);
    generator.rebuild();
    let text = generator.program_text();

    assert_eq!(text.matches("; Pen down").count(), 1);
    assert_eq!(text.matches("; Pen up").count(), 1);
    assert!(!body(&text).iter().any(|l| l.starts_with("G0 ")));
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut generator = GcodeGenerator::new();
    generator.record_all([
        Segment::new(-30.0, 12.5, 40.0, -7.25),
        Segment::new(3.0, 3.0, -3.0, -3.0),
    ]);
    let first = generator.rebuild().text();
    let second = generator.rebuild().text();
    assert_eq!(first, second);
}

#[test]
fn test_scale_and_pen_preset() {
    let mut generator =
        GcodeGenerator::with_config(Config::with_preset(PenPreset::Servo)).unwrap();
    generator
        .update_configuration(&ConfigPatch {
            scale_percent: Some(50.0),
            feed_rate: Some(1200.0),
            ..ConfigPatch::default()
        })
        .unwrap();
    generator.record(Segment::new(-10.0, 0.0, 10.0, 0.0));
    generator.rebuild();

    assert_eq!(
        body(&generator.program_text()),
        vec![
            "M280 P0 S0 ; Pen down",
            "G1 X10.000 Y0.000 F1200 ;",
            "M280 P0 S90 ; Pen up",
        ]
    );
}

#[test]
fn test_json_patch_ignores_unknown_keys() {
    let mut generator = GcodeGenerator::new();
    let patch = ConfigPatch::from_json(&serde_json::json!({
        "penUp": "M05",
        "colour": "red",
        "feedRate": 2500
    }))
    .unwrap();
    generator.update_configuration(&patch).unwrap();
    generator.record(Segment::new(0.0, 0.0, 0.0, 5.0));
    generator.rebuild();
    let text = generator.program_text();

    assert!(text.contains("G1 X0.000 Y0.000 F2500 ;"));
    assert!(text.contains("M05 ; Pen up"));
}

#[test]
fn test_commented_pen_commands_read_back() {
    let config = Config {
        pen_up: "M280 P0 S90 ; servo".to_string(),
        pen_down: "M280 P0 S0 ; servo".to_string(),
        ..Config::default()
    };
    let mut generator = GcodeGenerator::with_config(config.clone()).unwrap();
    generator.record(Segment::new(0.0, 0.0, 10.0, 0.0));
    generator.rebuild();

    let lines = ProgramParser::new(&config.pen_up, &config.pen_down)
        .parse_program(&generator.program_text())
        .unwrap();
    let summary = ProgramSummary::from_lines(&lines);
    assert_eq!(summary.pen_down_count, 1);
    assert_eq!(summary.pen_up_count, 1);
    assert!((summary.draw_distance - 10.0).abs() < 1e-9);
    assert!(summary.drawn_bounds.is_some());
}
