use assert_cmd::{crate_name, Command};
use std::fs;
use std::io::Write;
use pathsmith::cli::Config;
use tempfile::NamedTempFile;

#[test]
fn test_cmdline_help() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    let output = String::from_utf8(cmd.arg("-h").assert().success().get_output().stdout.clone())
        .expect("non-UTF8");
    assert!(output.contains("Usage"));
    assert!(output.contains("--coordinates"));
}

#[test]
fn test_cmdline_bad_args() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.args(["--coordinates", "sideways"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_cmdline_stdin() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.args(["--coordinates", "auto", "--compress"])
        .write_stdin("M -500,-600 L7,8 l10,12 z\n")
        .assert()
        .success()
        .stdout("M-500-600L7,8 17,20Z\n");
}

#[test]
fn test_cmdline_unparsable() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.write_stdin("M 1,2 L 3").assert().failure();
}

#[test]
fn test_cmdline_config() {
    let config = Config::from_cmdline(&format!("{} --help", crate_name!()));
    assert!(config.is_err());

    let mut infile = NamedTempFile::new().expect("could not create tmpfile");
    write!(infile, "m 5,6 l10,12 l10,12 z").expect("tmpfile write failed");
    let outfile = NamedTempFile::new().expect("could not create outfile");
    let config = Config::from_cmdline(&format!(
        "{} {} -o {} --coordinates absolute",
        crate_name!(),
        infile.path().to_str().unwrap(),
        outfile.path().to_str().unwrap()
    ))
    .expect("cmdline should be valid");
    pathsmith::cli::run(config).expect("run failed");
    assert_eq!(
        fs::read_to_string(outfile.path()).unwrap(),
        "M 5,6 L 25,30 Z"
    );
}

#[test]
fn test_cmdline_document() {
    let mut infile = NamedTempFile::new().expect("could not create tmpfile");
    writeln!(
        infile,
        r#"<svg><polygon points="0,0 10,0 10,10"/><path d="M 0,0 L 5,5 L 10,10"/></svg>"#
    )
    .expect("tmpfile write failed");
    let outfile = NamedTempFile::new().expect("could not create outfile");
    let config = Config::from_cmdline(&format!(
        "{} {} -o {} --scale 2",
        crate_name!(),
        infile.path().to_str().unwrap(),
        outfile.path().to_str().unwrap()
    ))
    .expect("cmdline should be valid");
    pathsmith::cli::run(config).expect("run failed");
    assert_eq!(
        fs::read_to_string(outfile.path()).unwrap(),
        "<svg><polygon points=\"0,0 20,0 20,20\"/><path d=\"M 0,0 L 20,20\"/></svg>\n"
    );
}

#[test]
fn test_cmdline_same_file() {
    let infile = NamedTempFile::new().expect("could not create tmpfile");
    let path = infile.path().to_str().unwrap();
    let config = Config::from_cmdline(&format!("{} {path} -o {path}", crate_name!()));
    assert!(config.is_err());
}
