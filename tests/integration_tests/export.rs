use pathsmith::{Coordinates, ExportSettings, Path, Point};

fn export(input: &str, settings: &ExportSettings) -> String {
    Path::parse(input).unwrap().export(settings).unwrap()
}

fn with_coordinates(coordinates: Coordinates) -> ExportSettings {
    ExportSettings {
        coordinates,
        ..Default::default()
    }
}

fn compressed(coordinates: Coordinates) -> ExportSettings {
    ExportSettings {
        coordinates,
        compress: true,
        ..Default::default()
    }
}

#[test]
fn test_export_basic() {
    assert_eq!(export("m 5,6", &ExportSettings::default()), "m 5,6");
    assert_eq!(
        export("m 5,6 l10,12", &with_coordinates(Coordinates::Absolute)),
        "M 5,6 L 15,18"
    );
    assert_eq!(
        export("m 5,6 h6 z", &with_coordinates(Coordinates::Absolute)),
        "M 5,6 H 11 Z"
    );
    assert_eq!(export("", &ExportSettings::default()), "");
}

#[test]
fn test_export_combine_lines() {
    assert_eq!(
        export(
            "m 5,6 l10,12 l10,12 z",
            &with_coordinates(Coordinates::Relative)
        ),
        "m 5,6 l 20,24 z"
    );
    assert_eq!(
        export(
            "m 5,6 L10,12 l10,12 z",
            &with_coordinates(Coordinates::Absolute)
        ),
        "M 5,6 L 20,24 Z"
    );
    // three collinear segments collapse to a single horizontal
    assert_eq!(
        export("M 0,0 h 1 h 2 h 3", &with_coordinates(Coordinates::Relative)),
        "m 0,0 h 6"
    );
    // a reversal is not a continuation
    assert_eq!(
        export("M 0,0 h 5 h -2", &ExportSettings::default()),
        "M 0,0 h 5 h -2"
    );
}

#[test]
fn test_export_no_combine() {
    let settings = ExportSettings {
        combine: false,
        ..Default::default()
    };
    assert_eq!(
        export("m 5,6 l10,12 l10,12 m 1,1 m 1,1", &settings),
        "m 5,6 l 10,12 l 10,12 m 1,1 m 1,1"
    );
}

#[test]
fn test_export_combine_moves() {
    assert_eq!(
        export("m 1,1 m 2,2 l 1,0", &ExportSettings::default()),
        "m 3,3 h 1"
    );
    assert_eq!(
        export("M 1,1 m 2,2 M 4,4 L 5,6", &ExportSettings::default()),
        "M 4,4 L 5,6"
    );
}

#[test]
fn test_export_zero_length_line() {
    assert_eq!(export("M 1,1 L 1,1 Z", &ExportSettings::default()), "M 1,1 Z");
    assert_eq!(
        export("M 1,1 l 0,0 l 2,3", &ExportSettings::default()),
        "M 1,1 l 2,3"
    );
}

#[test]
fn test_export_auto() {
    assert_eq!(
        export("M -500,-600 L7,8 l10,12 z", &compressed(Coordinates::Auto)),
        "M-500-600L7,8 17,20Z"
    );
    assert_eq!(
        export("M 100,100 L 101,102 L 300,300", &with_coordinates(Coordinates::Auto)),
        "M 100,100 l 1,2 L 300,300"
    );
}

#[test]
fn test_export_compress() {
    assert_eq!(
        export(
            "M 10,10 L 20,10 L 20,20 L 10.5,20.5",
            &compressed(Coordinates::Relative)
        ),
        "m10,10h10v10l-9.5.5"
    );
    assert_eq!(
        export("M 0,0 L 1,2 L 3,3 L 4,5", &compressed(Coordinates::Absolute)),
        "M0,0L1,2 3,3 4,5"
    );
    assert_eq!(
        export("M 0,0 L 1,2 L -3,-3", &compressed(Coordinates::Absolute)),
        "M0,0L1,2-3-3"
    );
    assert_eq!(
        export("M 0.5,0.25 L -0.5,0.75", &compressed(Coordinates::Absolute)),
        "M.5.25L-.5.75"
    );
}

#[test]
fn test_export_compress_no_repeat_move() {
    let settings = ExportSettings {
        compress: true,
        combine: false,
        ..Default::default()
    };
    assert_eq!(export("M1,1 M2,2 Z Z", &settings), "M1,1M2,2ZZ");
}

#[test]
fn test_export_shorthand_curves() {
    let settings = ExportSettings::default();
    assert_eq!(
        export("M 0,0 C 0,1 1,1 1,0 C 1,-1 2,-1 2,0", &settings),
        "M 0,0 C 0,1 1,1 1,0 S 2,-1 2,0"
    );
    assert_eq!(
        export("M 0,0 C 0,0 1,1 2,0", &settings),
        "M 0,0 S 1,1 2,0"
    );
    assert_eq!(
        export("M 0,0 Q 1,1 2,0 Q 3,-1 4,0", &settings),
        "M 0,0 Q 1,1 2,0 T 4,0"
    );
    assert_eq!(
        export("M 0,0 q 1,1 2,0 t 2,0", &with_coordinates(Coordinates::Absolute)),
        "M 0,0 Q 1,1 2,0 T 4,0"
    );
    // a quadratic is not reflected by a following cubic
    assert_eq!(
        export("M 0,0 Q 1,1 2,0 C 3,-1 4,1 5,0", &settings),
        "M 0,0 Q 1,1 2,0 C 3,-1 4,1 5,0"
    );
}

#[test]
fn test_export_arc() {
    assert_eq!(
        export("M 0,0 A 10,10 0 0 0 5,6", &ExportSettings::default()),
        "M 0,0 A 10,10 0 0 0 5,6"
    );
    assert_eq!(
        export("M 0,0 A 10,10 0 0 0 5,6", &compressed(Coordinates::Initial)),
        "M0,0A10,10 0,005,6"
    );
    assert_eq!(
        export("M 1,1 a 10,10 30 1,1 -5,6", &with_coordinates(Coordinates::Absolute)),
        "M 1,1 A 10,10 30 1 1 -4,7"
    );
}

#[test]
fn test_export_polygon() {
    assert_eq!(
        export("50,50 100,100 200,150", &ExportSettings::default()),
        "M 50,50 L 100,100 L 200,150 Z"
    );
    let settings = ExportSettings {
        to_polygon: true,
        ..Default::default()
    };
    assert_eq!(
        export("50,50 100,100 200,150", &settings),
        "50,50 100,100 200,150"
    );
    assert_eq!(
        export("M 2,2 C 3,3 4,3 4,2 Q 5,1 6,2 A 1 1 0 0 1 8,8", &settings),
        "2,2 4,2 6,2 8,8"
    );
    // always absolute
    assert_eq!(export("m 1,1 l 1,1 l 1,-1", &settings), "1,1 2,2 3,1");
}

#[test]
fn test_export_commands_on_new_lines() {
    let settings = ExportSettings {
        combine: false,
        commands_on_new_lines: true,
        ..Default::default()
    };
    assert_eq!(
        export(
            "m 5,6 L10,12 l10,12 z M -500,-600 L7,8 l10,12 z",
            &settings
        ),
        "m 5,6\nL 10,12\nl 10,12\nz\nM -500,-600\nL 7,8\nl 10,12\nz"
    );
}

#[test]
fn test_export_max_chars_per_line() {
    let settings = ExportSettings {
        max_chars_per_line: Some(12),
        ..Default::default()
    };
    let output = export("M 1,1 L 2,3 L 4,9 L 8,1 L 9,9", &settings);
    assert_eq!(output, "M 1,1 L 2,3\nL 4,9 L 8,1\nL 9,9");
    assert!(output.lines().all(|line| line.len() <= 12));
}

#[test]
fn test_export_fraction_digits() {
    let settings = ExportSettings {
        fraction_digits: 1,
        ..Default::default()
    };
    assert_eq!(
        export("M 1.26,2.04 L 3.333,4.449", &settings),
        "M 1.3,2 L 3.3,4.4"
    );
    let settings = ExportSettings {
        fraction_digits: 0,
        coordinates: Coordinates::Relative,
        ..Default::default()
    };
    // relative output tracks the rounded absolute positions
    assert_eq!(
        export("M 0.4,0 L 0.8,1 L 1.2,0", &settings),
        "m 0,0 l 1,1 v -1"
    );
}

#[test]
fn test_export_scale_translate() {
    let settings = ExportSettings {
        scale: Some(Point::new(2., 2.)),
        fraction_digits: 2,
        ..Default::default()
    };
    assert_eq!(
        export("M 1.23456,2 L 3,4", &settings),
        "M 2.47,4 L 6,8"
    );

    let settings = ExportSettings {
        translate: Some(Point::new(10., 10.)),
        ..Default::default()
    };
    assert_eq!(export("m 1,1 l 2,0", &settings), "m 11,11 h 2");
    assert_eq!(export("M 1,1 L 3,1", &settings), "M 11,11 H 13");

    let settings = ExportSettings {
        scale: Some(Point::new(-1., 1.)),
        ..Default::default()
    };
    assert_eq!(
        export("M 0,0 A 5,5 30 0 1 10,0", &settings),
        "M 0,0 A 5,5 -30 0 0 -10,0"
    );
}
