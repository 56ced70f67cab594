use crate::error::CheckError;
use crate::Result;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// CSV column holding the host when none is given.
pub const DEFAULT_HOST_FIELD: &str = "Domain";

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Csv,
    Txt,
}

impl FromStr for InputType {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(InputType::Csv),
            "txt" => Ok(InputType::Txt),
            other => Err(CheckError::Input(format!(
                "unknown input type '{}', expected csv or txt",
                other
            ))),
        }
    }
}

/// The hosts to check, in the order they appear across the input files.
#[derive(Debug)]
pub struct Input {
    hosts: Vec<String>,
}

impl Input {
    /// Reads every file in `paths`. For csv input the host is taken from `host_field`, or the
    /// `Domain` column when it is `None`; text input uses the first word of each line.
    pub fn read(paths: &[PathBuf], input_type: InputType, host_field: Option<&str>) -> Result<Self> {
        if input_type == InputType::Txt && host_field.is_some() {
            return Err(CheckError::Input(
                "--host-ip can not be used with type 'txt'".to_string(),
            ));
        }
        let field = host_field.unwrap_or(DEFAULT_HOST_FIELD);

        let mut hosts = Vec::new();
        for path in paths {
            let contents = fs::read_to_string(path)
                .map_err(|e| format!("tried to read file {} got {}", path.display(), e))?;
            let contents = contents.trim_start_matches(BOM);
            let found = match input_type {
                InputType::Csv => Self::parse_csv(contents, field)
                    .map_err(|e| format!("{}: {}", path.display(), e))?,
                InputType::Txt => Self::parse_txt(contents),
            };
            debug!("read {} hosts from {}", found.len(), path.display());
            hosts.extend(found);
        }

        Ok(Self { hosts })
    }

    fn parse_csv(contents: &str, field: &str) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(contents.as_bytes());

        if !reader.headers()?.iter().any(|h| h == field) {
            return Err(CheckError::Input(format!("no '{}' column in csv header", field)));
        }

        let mut hosts = Vec::new();
        for row in reader.deserialize::<HashMap<String, String>>() {
            let row = row?;
            match row.get(field).map(|h| h.trim()) {
                Some(host) if !host.is_empty() => hosts.push(host.to_string()),
                _ => continue,
            }
        }
        Ok(hosts)
    }

    fn parse_txt(contents: &str) -> Vec<String> {
        contents
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    pub fn hosts(self) -> Vec<String> {
        self.hosts
    }
}

/// Turns the input arguments into file paths. An existing file is taken literally, even when its
/// name contains glob characters; anything else is expanded as a glob pattern. An argument that
/// names no existing file is an error.
pub fn expand<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if Path::new(pattern).is_file() {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let mut matched = Vec::new();
        for entry in glob::glob(pattern)? {
            let path = entry.map_err(io::Error::from)?;
            if path.is_file() {
                matched.push(path);
            }
        }

        if matched.is_empty() {
            return Err(CheckError::Input(format!(
                "File '{}' does not exist.",
                pattern
            )));
        }
        paths.extend(matched);
    }
    Ok(paths)
}
