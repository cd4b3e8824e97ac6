use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonry-cli"))
}

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    cli().arg("--help").assert().success().stdout(predicate::str::contains("--variant"));
    Ok(())
}

#[test]
fn compact_output_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = "{\n  \"a\": 1,\n  \"b\": [true, \"x\"]\n}\n";
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{}", input)?;

    let output = cli().arg(tmp.path()).output()?;
    assert!(output.status.success());
    let out = String::from_utf8(output.stdout)?;
    assert_eq!(out, "{\"a\":1,\"b\":[true,\"x\"]}\n");
    Ok(())
}

#[test]
fn pretty_output_parses_back() -> Result<(), Box<dyn std::error::Error>> {
    let input = r#"{"a":{"b":[1,2]},"c":[]}"#;
    let output = cli()
        .args(["--variant", "pretty", "--indent", "4"])
        .write_stdin(input)
        .output()?;
    assert!(output.status.success());
    let out = String::from_utf8(output.stdout)?;
    assert!(out.contains("\n    \"a\":{"));
    let reparsed: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(reparsed, serde_json::from_str::<serde_json::Value>(input)?);
    Ok(())
}

#[test]
fn fast_variant_and_bare_names() -> Result<(), Box<dyn std::error::Error>> {
    cli()
        .args(["--variant", "fast", "--bare-names"])
        .write_stdin(r#"{"plain":1,"two words":2}"#)
        .assert()
        .success()
        .stdout("{plain:1,\"two words\":2}\n");
    Ok(())
}

#[test]
fn invalid_json_fails() -> Result<(), Box<dyn std::error::Error>> {
    cli()
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
    Ok(())
}
