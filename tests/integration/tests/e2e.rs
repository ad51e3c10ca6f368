//! End-to-end tests for the md2pw binary
//!
//! Converts the sample document through every input and output path and
//! checks the PukiWiki markup that comes out.

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;

fn sample_md() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.md")
}

fn md2pw_cmd() -> Command {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let target_dir = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace_root.join("target"));
    let mut cmd = Command::new(target_dir.join("debug/md2pw"));
    // Keep config discovery away from the repository root.
    cmd.current_dir(std::env::temp_dir());
    cmd
}

fn assert_converted(output: &str) {
    for expected in [
        "* H1",
        "** H2",
        "*** H3",
        "#### H4",
        "''Bold text''",
        "*italic text*",
        "-list1",
        "--list.a",
        "--list.b",
        "-list2",
        "+ordered1",
        "++second",
        "+ordered2",
        "  package main",
        "  fmt.Println(\"Hello\")",
        "[[this is link>https://example.com]]",
        "|~ Column1 |~ Column2 |~ Column3 |~ Column4 |",
        "| Item1.1 | Item2.1 | Item3.1 | Item4.1 |",
        "| Item1.2 | Item2.2 | Item3.2 | Item4.2 |",
    ] {
        assert!(
            output.contains(expected),
            "missing {:?} in output:\n{}",
            expected,
            output
        );
    }

    assert!(!output.contains("```"), "fence left in output:\n{}", output);
    assert!(!output.contains("|---"), "separator left in output:\n{}", output);
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run md2pw");
    assert!(output.status.success(), "md2pw failed: {:?}", output);
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

mod file_input {
    use super::*;

    #[test]
    fn converts_file_to_pukiwiki() {
        let output = stdout_of(md2pw_cmd().arg(sample_md()));
        assert_converted(&output);
    }

    #[test]
    fn code_block_keeps_relative_indentation() {
        let output = stdout_of(md2pw_cmd().arg(sample_md()));
        // Blank lines inside the block are content too.
        let expected = "  package main\n\
                        \x20\x20\n\
                        \x20\x20import \"fmt\"\n\
                        \x20\x20\n\
                        \x20\x20func main() {\n\
                        \x20\x20    fmt.Println(\"Hello\")\n\
                        \x20\x20}\n";
        assert!(output.contains(expected), "code block mismatch:\n{}", output);
    }
}

mod pipe_input {
    use super::*;

    #[test]
    fn converts_stdin_to_pukiwiki() {
        let source = fs::read_to_string(sample_md()).unwrap();
        let output = stdout_of(md2pw_cmd().write_stdin(source));
        assert_converted(&output);
    }

    #[test]
    fn file_and_stdin_agree() {
        let source = fs::read_to_string(sample_md()).unwrap();
        let from_stdin = stdout_of(md2pw_cmd().arg("-").write_stdin(source));
        let from_file = stdout_of(md2pw_cmd().arg(sample_md()));
        pretty_assertions::assert_eq!(from_stdin, from_file);
    }
}

mod file_output {
    use super::*;

    #[test]
    fn writes_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("output.txt");

        md2pw_cmd()
            .arg("-o")
            .arg(&output_file)
            .arg(sample_md())
            .assert()
            .success()
            .stdout(predicates::str::is_empty());

        let output = fs::read_to_string(&output_file).unwrap();
        assert_converted(&output);
    }
}
