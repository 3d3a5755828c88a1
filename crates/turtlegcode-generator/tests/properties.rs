use proptest::prelude::*;
use turtlegcode_generator::{Config, GcodeGenerator, Segment};
use turtlegcode_parser::{ProgramCommand, ProgramParser, ProgramSummary};

// Whole-unit coordinates keep every distinct point at least one scaled unit
// apart, so travel decisions never depend on the 0.01 tolerance.
fn segment() -> impl Strategy<Value = Segment> {
    (-100i32..=100, -100i32..=100, -100i32..=100, -100i32..=100).prop_map(|(x1, y1, x2, y2)| {
        Segment::new(x1 as f64, y1 as f64, x2 as f64, y2 as f64)
    })
}

fn history() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(segment(), 1..40)
}

fn compile(segments: &[Segment], scale_percent: f64) -> String {
    let config = Config {
        scale_percent,
        ..Config::default()
    };
    let mut generator = GcodeGenerator::with_config(config).unwrap();
    generator.record_all(segments.iter().copied());
    generator.rebuild().text()
}

fn parse(text: &str) -> Vec<ProgramCommand> {
    ProgramParser::new("M5", "M3")
        .parse_program(text)
        .unwrap()
        .into_iter()
        .map(|line| line.command)
        .collect()
}

proptest! {
    #[test]
    fn drawn_area_is_grounded_at_zero(segments in history(), scale in 10u32..=400) {
        let commands = parse(&compile(&segments, scale as f64));
        let summary = ProgramSummary::from_commands(&commands);
        let bounds = summary.drawn_bounds.unwrap();
        prop_assert!(bounds.min_x.abs() < 1e-6);
        prop_assert!(bounds.min_y.abs() < 1e-6);

        for (x, y) in commands.iter().filter_map(|c| c.target()) {
            prop_assert!(x > -1e-6 && y > -1e-6);
        }
    }

    #[test]
    fn doubling_scale_doubles_coordinates(segments in history(), scale in 10u32..=200) {
        let single = parse(&compile(&segments, scale as f64));
        let double = parse(&compile(&segments, 2.0 * scale as f64));
        prop_assert_eq!(single.len(), double.len());

        for (a, b) in single.iter().zip(&double) {
            prop_assert_eq!(a.is_motion(), b.is_motion());
            if let (Some((ax, ay)), Some((bx, by))) = (a.target(), b.target()) {
                prop_assert!((2.0 * ax - bx).abs() < 2e-3);
                prop_assert!((2.0 * ay - by).abs() < 2e-3);
            }
        }
    }

    #[test]
    fn pen_toggles_alternate(segments in history()) {
        let commands = parse(&compile(&segments, 100.0));
        let toggles: Vec<_> = commands.iter().filter(|c| c.is_pen_toggle()).collect();
        for pair in toggles.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }

        let summary = ProgramSummary::from_commands(&commands);
        prop_assert!(!summary.has_redundant_pen_toggles());
        prop_assert!(summary.ends_pen_up);
        prop_assert_eq!(summary.pen_down_count, summary.pen_up_count);
    }

    #[test]
    fn rebuild_is_deterministic(segments in history(), scale in 1u32..=500) {
        let mut generator = GcodeGenerator::with_config(Config {
            scale_percent: scale as f64,
            ..Config::default()
        }).unwrap();
        generator.record_all(segments);
        let first = generator.rebuild().text();
        let second = generator.rebuild().text();
        prop_assert_eq!(first, second);
    }
}
