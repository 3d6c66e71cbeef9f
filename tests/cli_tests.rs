use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn script(contents: &str) -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("script.bt");
    fs::write(&path, contents)?;
    Ok((dir, path))
}

#[test]
fn accepts_consistent_script() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = script("kprobe:sys_read { @reads[pid] = count(); }")?;

    Command::cargo_bin("tracec")?
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn dumps_maps() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = script("kprobe:f { @reads[pid] = count(); @start = nsecs; }")?;

    Command::cargo_bin("tracec")?
        .arg("--dump-maps")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("@reads[integer] -> count"))
        .stdout(predicate::str::contains("@start -> integer"));

    Ok(())
}

#[test]
fn reports_first_pass_failure() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = script("kprobe:f { @x = count(); @x = 5; }")?;

    Command::cargo_bin("tracec")?
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Type mismatch for @x: trying to assign variable of type 'integer'",
        ));

    Ok(())
}

#[test]
fn reports_second_pass_failure() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = script("kprobe:f { @x[1] = count(); @x[2] = count(); @x[1] + @y; }")?;

    Command::cargo_bin("tracec")?
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Type mismatch for '+': comparing 'count' with 'none'",
        ));

    Ok(())
}

#[test]
fn reports_syntax_error() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = script("kprobe:f { pid = 1; }")?;

    Command::cargo_bin("tracec")?
        .arg(&path)
        .assert()
        .code(65)
        .stderr(predicate::str::contains("UnexpectedTokenDetailed"))
        .stderr(predicate::str::contains("only maps can be assigned to"));

    Ok(())
}

#[test]
fn fails_on_missing_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    Command::cargo_bin("tracec")?
        .arg(dir.path().join("missing.bt"))
        .assert()
        .code(66)
        .stderr(predicate::str::contains("failed to read script"));

    Ok(())
}

#[test]
fn exit_codes_tell_failures_apart() -> Result<(), Box<dyn Error>> {
    let (_syntax_dir, syntax) = script("kprobe:f { /* never closed")?;
    let (_maps_dir, maps) = script("kprobe:f { @x = count(); @x = 5; }")?;
    let (_operands_dir, operands) = script("kprobe:f { @x = count(); @x + 1; }")?;
    let missing_dir = tempdir()?;

    let mut codes = vec![];
    for path in [syntax, maps, operands, missing_dir.path().join("missing.bt")] {
        let output = Command::cargo_bin("tracec")?.arg(&path).output()?;
        codes.push(output.status.code());
    }

    assert_eq!(codes, vec![Some(65), Some(1), Some(2), Some(66)]);

    Ok(())
}
