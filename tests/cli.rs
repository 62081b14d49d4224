//! CLI integration tests
//!
//! Exit codes, renderers and stream separation of the sqllint binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID: &str = "SELECT 1;\n";
const BROKEN: &str = "SELECT a\nFROM t\nWHERE (b = 1;\n";

fn sqllint() -> Command {
    Command::cargo_bin("sqllint").unwrap()
}

fn write_sql(dir: &TempDir, name: &str, sql: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, sql).unwrap();
    path
}

mod check {
    use super::*;

    #[test]
    fn valid_file_passes() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "ok.sql", VALID);

        sqllint()
            .arg(&file)
            .assert()
            .code(0)
            .stdout(format!("Checking SQL syntax of {}\n OK\n", file.display()));
    }

    #[test]
    fn broken_file_fails_with_positions() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "bad.sql", BROKEN);

        sqllint()
            .arg(&file)
            .assert()
            .code(10)
            .stdout(predicate::str::starts_with(format!(
                "Checking SQL syntax of {}\n Line ",
                file.display()
            )))
            .stdout(predicate::str::contains(" OK").not())
            .stdout(predicate::str::contains(" Line 3, col 6 at \"(\": "));
    }

    #[test]
    fn missing_select_targets_fail_on_line_one() {
        sqllint()
            .arg("-")
            .write_stdin("SELECT FROM;")
            .assert()
            .code(10)
            .stdout(predicate::str::starts_with("Checking SQL syntax of -\n Line 1, col "));
    }

    #[test]
    fn existing_file_with_brackets_is_checked() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "q[1].sql", VALID);

        sqllint()
            .arg(&file)
            .assert()
            .code(0)
            .stdout(format!("Checking SQL syntax of {}\n OK\n", file.display()));
    }

    #[test]
    fn empty_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "empty.sql", "  \n\t\n");

        sqllint()
            .arg(&file)
            .assert()
            .code(10)
            .stdout(predicate::str::ends_with(
                " Line 0, col 0 at \"\": SQL file empty\n",
            ));
    }

    #[test]
    fn one_failure_fails_the_run_in_any_order() {
        let temp = TempDir::new().unwrap();
        let good = write_sql(&temp, "good.sql", VALID);
        let bad = write_sql(&temp, "bad.sql", BROKEN);

        sqllint().arg(&good).arg(&bad).assert().code(10);
        sqllint().arg(&bad).arg(&good).assert().code(10);
        sqllint().arg(&good).arg(&good).assert().code(0);
    }

    #[test]
    fn every_file_is_processed_after_a_failure() {
        let temp = TempDir::new().unwrap();
        let bad = write_sql(&temp, "bad.sql", BROKEN);
        let good = write_sql(&temp, "good.sql", VALID);

        sqllint()
            .arg(&bad)
            .arg(&good)
            .assert()
            .code(10)
            .stdout(predicate::str::contains(format!(
                "Checking SQL syntax of {}\n OK\n",
                good.display()
            )));
    }

    #[test]
    fn reads_stdin() {
        sqllint()
            .arg("-")
            .write_stdin(VALID)
            .assert()
            .code(0)
            .stdout("Checking SQL syntax of -\n OK\n");
    }

    #[test]
    fn empty_stdin_fails() {
        sqllint()
            .arg("-")
            .write_stdin("")
            .assert()
            .code(10)
            .stdout(predicate::str::contains("SQL file empty"));
    }

    #[test]
    fn glob_patterns_expand() {
        let temp = TempDir::new().unwrap();
        write_sql(&temp, "a.sql", VALID);
        write_sql(&temp, "b.sql", VALID);

        sqllint()
            .arg(temp.path().join("*.sql"))
            .assert()
            .code(0)
            .stdout(predicate::str::contains("a.sql\n OK\n"))
            .stdout(predicate::str::contains("b.sql\n OK\n"));
    }
}

mod emacs {
    use super::*;

    #[test]
    fn errors_use_compile_format() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "bad.sql", BROKEN);

        sqllint()
            .args(["-r", "emacs"])
            .arg(&file)
            .assert()
            .code(10)
            .stdout(predicate::str::starts_with(format!("{}:3:7: error: ", file.display())))
            .stdout(predicate::str::contains(": error: "))
            .stdout(predicate::str::contains("Checking").not());
    }

    #[test]
    fn valid_file_is_silent() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "ok.sql", VALID);

        sqllint()
            .args(["--renderer", "emacs"])
            .arg(&file)
            .assert()
            .code(0)
            .stdout("");
    }
}

mod format {
    use super::*;

    #[test]
    fn formatted_sql_goes_to_stdout_only() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "q.sql", "select a from t\n");

        let assert = sqllint()
            .args(["--format", "--nocolor"])
            .arg(&file)
            .assert()
            .code(0)
            .stderr(predicate::str::contains("Checking SQL syntax of"));

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        assert!(stdout.to_lowercase().contains("from t"));
        assert!(stdout.ends_with('\n') && !stdout.ends_with("\n\n"));
        assert!(!stdout.contains("Checking SQL syntax"));
        assert!(!stdout.contains(" OK"));
        assert!(!stdout.contains('\u{1b}'));
    }

    #[test]
    fn color_decorates_output() {
        let sql = "select a from t\n";

        sqllint()
            .args(["-f", "--color", "-"])
            .write_stdin(sql)
            .assert()
            .code(0)
            .stdout(predicate::str::contains("\u{1b}["));
    }

    #[test]
    fn syntax_errors_abort_formatting() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "bad.sql", BROKEN);

        sqllint()
            .args(["-f", "--nocolor"])
            .arg(&file)
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains("Error: Cannot format"));
    }

    #[test]
    fn empty_input_fails() {
        sqllint()
            .args(["-f", "-"])
            .write_stdin("\n")
            .assert()
            .code(10)
            .stdout("")
            .stderr(predicate::str::contains("SQL file empty"));
    }
}

mod usage {
    use super::*;

    #[test]
    fn missing_file_aborts_before_processing() {
        let temp = TempDir::new().unwrap();
        let good = write_sql(&temp, "good.sql", VALID);

        sqllint()
            .arg(&good)
            .arg(temp.path().join("missing.sql"))
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::starts_with("Error: File does not exist: "));
    }

    #[test]
    fn directory_is_not_a_file() {
        let temp = TempDir::new().unwrap();

        sqllint()
            .arg(temp.path())
            .assert()
            .code(1)
            .stderr(predicate::str::starts_with("Error: Not a file: "));
    }

    #[test]
    fn unknown_renderer_is_rejected() {
        sqllint()
            .args(["-r", "html", "-"])
            .assert()
            .code(1)
            .stderr(predicate::str::starts_with("Error: "));
    }

    #[test]
    fn no_files_is_an_error() {
        sqllint().assert().code(1).stderr(predicate::str::starts_with("Error: "));
    }

    #[test]
    fn unmatched_pattern_is_an_error() {
        let temp = TempDir::new().unwrap();

        sqllint()
            .arg(temp.path().join("*.sql"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("No files match pattern"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = write_sql(&temp, "ok.sql", VALID);

        sqllint()
            .arg("--config")
            .arg(temp.path().join("nope.cfg"))
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to read config"));
    }

    #[test]
    fn lists_renderers() {
        sqllint()
            .arg("--list-renderers")
            .assert()
            .code(0)
            .stdout("text\nemacs\n");

        sqllint()
            .arg("--list-renderer")
            .assert()
            .code(0)
            .stdout("text\nemacs\n");
    }
}
