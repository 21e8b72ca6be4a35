use pathsmith::{Coordinates, ExportSettings, Path, Point};

const SAMPLES: &[&str] = &[
    "m 5,6 l10,12 l10,12 z",
    "M -500,-600 L7,8 l10,12 z M 3,3 h 4 v -2",
    "M 0,0 C 0,1 1,1 1,0 S 2,-1 2,0 c 1,1 2,1 3,0",
    "M 2,2 Q 3,0 4,2 t 2,0 T 8,2 q 1,1 2,0",
    "M 10,10 A 5,5 30 1 0 20,20 a 3,4 0 0 1 -6,0 Z l 1,1",
    "50,50 100,100 200,150",
];

fn points(path: &Path) -> Vec<(Point, bool)> {
    let mut seen = Vec::new();
    path.each_point(|point, is_control, _| seen.push((point, is_control)));
    seen
}

#[test]
fn test_geometry_preserved() {
    for coordinates in [
        Coordinates::Initial,
        Coordinates::Absolute,
        Coordinates::Relative,
        Coordinates::Auto,
    ] {
        for compress in [false, true] {
            let settings = ExportSettings {
                coordinates,
                compress,
                combine: false,
                ..Default::default()
            };
            for sample in SAMPLES {
                let path = Path::parse(sample).unwrap();
                let exported = path.export(&settings).unwrap();
                let reparsed = Path::parse(&exported).unwrap();
                assert_eq!(
                    points(&path),
                    points(&reparsed),
                    "{sample} -> {exported} ({coordinates}, compress: {compress})"
                );
            }
        }
    }
}

#[test]
fn test_export_idempotent() {
    for coordinates in [
        Coordinates::Initial,
        Coordinates::Absolute,
        Coordinates::Relative,
        Coordinates::Auto,
    ] {
        for (compress, combine) in [(false, true), (true, true), (false, false), (true, false)] {
            let settings = ExportSettings {
                coordinates,
                compress,
                combine,
                ..Default::default()
            };
            for sample in SAMPLES {
                let once = Path::parse(sample).unwrap().export(&settings).unwrap();
                let twice = Path::parse(&once).unwrap().export(&settings).unwrap();
                assert_eq!(
                    once, twice,
                    "{sample} ({coordinates}, compress: {compress}, combine: {combine})"
                );
            }
        }
    }
}

#[test]
fn test_auto_never_longer() {
    let with = |coordinates| ExportSettings {
        coordinates,
        ..Default::default()
    };
    for sample in SAMPLES {
        let path = Path::parse(sample).unwrap();
        let auto = path.export(&with(Coordinates::Auto)).unwrap();
        let absolute = path.export(&with(Coordinates::Absolute)).unwrap();
        let relative = path.export(&with(Coordinates::Relative)).unwrap();
        assert!(
            auto.len() <= absolute.len().min(relative.len()),
            "{sample}: {auto}"
        );
    }
}

#[test]
fn test_display_parse() {
    let path: Path = "M 1,2 l 3,4 c 1,1 2,2 3,0 z".parse().unwrap();
    let shown = path.to_string();
    assert_eq!(shown, "M 1,2 l 3,4 c 1,1 2,2 3,0 z");
    assert_eq!(shown.parse::<Path>().unwrap().to_string(), shown);
}
