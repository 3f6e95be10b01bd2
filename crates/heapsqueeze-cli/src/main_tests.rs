use super::*;

fn run(args: &[&str]) -> (u8, String) {
    let matches = build_cli().try_get_matches_from(args).unwrap();
    let mut stderr = Vec::new();
    let code = execute(&matches, &mut stderr);
    (code, String::from_utf8(stderr).unwrap())
}

#[test]
fn missing_heapdump_prints_usage() {
    let (code, stderr) = run(&["heapsqueeze"]);
    assert_eq!(code, 1);
    assert_eq!(stderr, format!("{USAGE}\n"));
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn unreadable_heapdump_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.hprof");
    let (code, stderr) = run(&["heapsqueeze", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error: "), "{stderr}");
    assert_eq!(stderr.lines().count(), 1);
}
