//! Tests for the result-stream reader.

use super::*;

#[test]
fn test_last_block_wins() {
    let output = "\
x = 1;
z = 9;
----------
x = 2;
y = array1d(1..3, [0, 1, 2]);
----------
==========
";
    let solution = read_solutions(output).unwrap();
    assert_eq!(solution.len(), 2);
    assert_eq!(solution.value("x"), Some("2"));
    assert_eq!(solution.get("y").unwrap(), ["0", "1", "2"]);
    assert_eq!(solution.int_at("y", 2), Some(2));
    assert!(solution.get("z").is_none());
}

#[test]
fn test_completion_without_solutions_is_empty() {
    let output = "% comment\n\n==========\n";
    let solution = read_solutions(output).unwrap();
    assert!(solution.is_empty());
}

#[test]
fn test_status_lines_are_errors() {
    let err = read_solutions("=====UNSATISFIABLE=====\n").unwrap_err();
    assert!(err.is_unsatisfiable());
    assert!(err.to_string().contains("=====UNSATISFIABLE====="));

    let err = read_solutions("x = 1;\n----------\n=====UNKNOWN=====\n").unwrap_err();
    assert!(matches!(err, FznError::NoSolution { .. }));
    assert!(!err.is_unsatisfiable());

    let err = read_solutions("====\n").unwrap_err();
    assert!(matches!(err, FznError::NoSolution { .. }));
}

#[test]
fn test_statistics_and_whitespace_are_ignored() {
    let output = "%%%mzn-stat: nodes=12\r\n  flag =\ttrue ;\r\n----------\r\n%%%mzn-stat-end\r\n==========\r\n";
    let solution = read_solutions(output).unwrap();
    assert_eq!(solution.bool_at("flag", 0), Some(true));
    assert_eq!(solution.len(), 1);
}

#[test]
fn test_malformed_line_reports_line_number() {
    let err = read_solutions("x = 1;\nnot an assignment\n----------\n").unwrap_err();
    match err {
        FznError::Parse { line, content } => {
            assert_eq!(line, 2);
            assert_eq!(content, "notanassignment");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = read_solutions("a = b = c;\n").unwrap_err();
    assert!(matches!(err, FznError::Parse { line: 1, .. }));

    let err = read_solutions("y = array1d(1..2, 0, 1);\n").unwrap_err();
    assert!(matches!(err, FznError::Parse { .. }));
}

#[test]
fn test_eof_returns_last_completed_block() {
    let output = "x = 1;\n----------\nx = 2;\n";
    let solution = read_solutions(output).unwrap();
    assert_eq!(solution.value("x"), Some("1"));

    let err = read_solutions("x = 1;\n").unwrap_err();
    assert!(matches!(err, FznError::MissingStatus));
    assert!(matches!(read_solutions("").unwrap_err(), FznError::MissingStatus));
}

#[test]
fn test_empty_array() {
    let solution = read_solutions("a = array1d(1..0, []);\n----------\n").unwrap();
    assert_eq!(solution.get("a").unwrap().len(), 0);
}

#[test]
fn test_read_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "x = 7;\n----------\n==========\n").unwrap();
    assert_eq!(read_solutions_from_file(&path).unwrap().int_at("x", 0), Some(7));
    assert!(matches!(
        read_solutions_from_file(dir.path().join("missing.txt")).unwrap_err(),
        FznError::Io(_)
    ));
}
