use pathsmith::{optimize_str, Error, ExportSettings, Path, Point};

#[test]
fn test_error_missing_values() {
    assert!(matches!(Path::parse("M 1,2 L 3"), Err(Error::Parse(_))));
    assert!(Path::parse("M 1,2 C 1,2 3,4").is_err());
    assert!(Path::parse("M").is_err());
}

#[test]
fn test_error_bad_number() {
    assert!(Path::parse("M 1,x").is_err());
    assert!(Path::parse("M 1e,2").is_err());
}

#[test]
fn test_error_bad_arc_flag() {
    assert!(Path::parse("M 0,0 A 5,5 0 2 0 1,1").is_err());
}

#[test]
fn test_no_error_lenient() {
    // odd trailing value in a point list is dropped
    assert_eq!(Path::parse("1,1 2,2 3").unwrap().len(), 3);
    assert!(Path::parse("   ").unwrap().is_empty());
}

#[test]
fn test_error_settings() {
    let path = Path::parse("M 1,1").unwrap();
    let settings = ExportSettings {
        max_chars_per_line: Some(0),
        ..Default::default()
    };
    assert!(matches!(path.export(&settings), Err(Error::Validation(_))));
    let settings = ExportSettings {
        translate: Some(Point::new(f64::INFINITY, 0.)),
        ..Default::default()
    };
    assert!(path.export(&settings).is_err());
}

#[test]
fn test_error_bad_document() {
    let input = r##"<svg>
    <path d="M 1,1"/>
    </g>"##;
    let err = optimize_str(input, &ExportSettings::default()).unwrap_err();
    assert!(matches!(err, Error::Document(_)));
    assert!(err.to_string().contains("position"));
}

#[test]
fn test_error_display() {
    let err = Path::parse("M 1,2 L 3").unwrap_err();
    assert!(err.to_string().starts_with("Parse error"));
}
