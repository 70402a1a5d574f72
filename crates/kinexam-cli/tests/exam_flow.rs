//! End-to-end exam flow through the real binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use kinexam_core::record::verify_blob;

#[allow(deprecated)]
fn kinexam() -> Command {
    Command::cargo_bin("kinexam").unwrap()
}

#[test]
fn full_exam_writes_verifiable_grade_file() {
    let dir = TempDir::new().unwrap();
    let input = "Jane Doe\n20\n2.02\n19.80\n2.04\n4.08\n20\n48.58\n2.92\n1960\n1.43\n0.59\n";

    kinexam()
        .arg("start")
        .arg("--output")
        .arg(dir.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 10 of 10"))
        .stdout(predicate::str::contains("grade_Jane_Doe_20.dat"));

    let path = dir.path().join("grade_Jane_Doe_20.dat");
    let blob = std::fs::read_to_string(&path).unwrap();
    let verification = verify_blob(&blob).unwrap();
    assert!(verification.is_intact());
    assert_eq!(verification.record.student, "Jane Doe");
    assert_eq!(verification.record.score, 10);

    kinexam()
        .arg("verify")
        .arg("--record")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Integrity check PASSED"));
}

#[test]
fn validation_errors_reprompt_without_losing_the_exam() {
    let dir = TempDir::new().unwrap();
    // Empty name, then a non-integer seed, then a non-positive seed,
    // then a valid start followed by a full exam.
    let input = "\n20\nJane Doe\nabc\nJane Doe\n0\nJane Doe\n20\n\
                 1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n";

    kinexam()
        .arg("start")
        .arg("--output")
        .arg(dir.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("please enter your name"))
        .stdout(predicate::str::contains("invalid seed number"))
        .stdout(predicate::str::contains("POSITIVE"));

    assert!(dir.path().join("grade_Jane_Doe_20.dat").exists());
}

#[test]
fn interrupted_exam_grades_what_it_collected() {
    let dir = TempDir::new().unwrap();
    // Seven answers, then EOF.
    let input = "Jane Doe\n20\n2.02\n19.80\n2.04\n4.08\n20\n48.58\n2.92\n";

    kinexam()
        .arg("start")
        .arg("--output")
        .arg(dir.path())
        .write_stdin(input)
        .assert()
        .success();

    let blob = std::fs::read_to_string(dir.path().join("grade_Jane_Doe_20.dat")).unwrap();
    let verification = verify_blob(&blob).unwrap();
    assert!(verification.is_intact());
    assert_eq!(verification.record.answers.len(), 7);
    assert_eq!(verification.record.questions_gradable, 7);
    assert_eq!(verification.record.questions_presented, 10);
    assert_eq!(verification.record.score, 7);
}

#[test]
fn eof_before_start_is_an_error() {
    kinexam()
        .arg("start")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));
}
