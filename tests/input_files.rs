use dnscheck::{expand, Input, InputType};
use std::fs;

#[test]
fn glob_patterns_expand_to_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a.example\n").unwrap();
    fs::write(dir.path().join("b.txt"), "b.example\n").unwrap();
    fs::write(dir.path().join("c.csv"), "Domain\nc.example\n").unwrap();

    let pattern = dir.path().join("*.txt");
    let paths = expand(&[pattern.to_str().unwrap()]).unwrap();
    assert_eq!(paths.len(), 2);

    let hosts = Input::read(&paths, InputType::Txt, None).unwrap().hosts();
    assert_eq!(hosts, ["a.example", "b.example"]);
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");

    let err = expand(&[missing.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("does not exist"));

    let nothing_matches = dir.path().join("*.csv");
    assert!(expand(&[nothing_matches.to_str().unwrap()]).is_err());
}

#[test]
fn csv_with_bom_and_custom_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.csv");
    fs::write(&path, "\u{feff}Domain,IP\nexample.com,8.8.8.8\nexample.org,1.1.1.1\n").unwrap();
    let paths = expand(&[path.to_str().unwrap()]).unwrap();

    let domains = Input::read(&paths, InputType::Csv, None).unwrap().hosts();
    assert_eq!(domains, ["example.com", "example.org"]);

    let ips = Input::read(&paths, InputType::Csv, Some("IP")).unwrap().hosts();
    assert_eq!(ips, ["8.8.8.8", "1.1.1.1"]);

    assert!(Input::read(&paths, InputType::Csv, Some("Host")).is_err());
}

#[test]
fn hosts_from_several_files_keep_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    fs::write(&first, "Domain\none.example\ntwo.example\n").unwrap();
    fs::write(&second, "Domain\nthree.example\n").unwrap();

    let paths = expand(&[first.to_str().unwrap(), second.to_str().unwrap()]).unwrap();
    let hosts = Input::read(&paths, InputType::Csv, None).unwrap().hosts();
    assert_eq!(hosts, ["one.example", "two.example", "three.example"]);
}

#[test]
fn existing_file_with_glob_characters_is_taken_literally() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts[1.csv");
    fs::write(&path, "Domain\nexample.com\n").unwrap();

    let paths = expand(&[path.to_str().unwrap()]).unwrap();
    assert_eq!(paths, [path.clone()]);

    let hosts = Input::read(&paths, InputType::Csv, None).unwrap().hosts();
    assert_eq!(hosts, ["example.com"]);
}
