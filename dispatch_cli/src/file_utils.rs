use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

pub fn read_folder(folder_path: &PathBuf) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.insert(0, path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

/// The input file itself, or every file below it when it is a folder.
pub fn input_files(input: &PathBuf) -> Result<Vec<PathBuf>, anyhow::Error> {
    if input.is_file() {
        return Ok(vec![input.clone()]);
    }

    read_folder(input).with_context(|| format!("reading folder {}", input.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Where the result of `input` goes: `output` itself for a single input,
/// `<output>/<stem>.<suffix>.json` when several inputs are processed.
pub fn output_path(output: &Path, input: &Path, several: bool, suffix: &str) -> PathBuf {
    if !several {
        return output.to_path_buf();
    }

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "result".to_owned());

    output.join(format!("{stem}.{suffix}.json"))
}
