//! File-level conversion: single command files and whole directories

use crate::core::config::ConvertOptions;
use crate::core::error::{IguanaError, Result};
use crate::movelist::convert;
use crate::patch::patch_definition_file;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What to do with each converted file
#[derive(Debug, Clone)]
pub struct OutputSettings {
    /// File name written next to each command file
    pub file_name: String,
    /// Print the movelist instead of writing it
    pub dry_run: bool,
    /// Register the movelist in the character's `.def`
    pub patch_definition: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_name: "movelist.dat".to_string(),
            dry_run: false,
            patch_definition: false,
        }
    }
}

pub fn is_command_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cmd"))
}

/// Every `.cmd` file under `dir`, recursively, in walk order
///
/// Entries are visited by file name within each directory. Directory symlinks
/// are not followed and unreadable entries are skipped.
pub fn collect_command_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IguanaError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        )));
    }

    let files = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir() && is_command_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    Ok(files)
}

/// Group command files by the directory their movelist is written to,
/// keeping walk order inside each group
fn group_by_directory(files: Vec<PathBuf>) -> Vec<Vec<PathBuf>> {
    let mut groups: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let parent = file.parent().map(Path::to_path_buf).unwrap_or_default();
        groups.entry(parent).or_default().push(file);
    }
    groups.into_values().collect()
}

/// Read a command file, tolerating non-UTF-8 bytes
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Convert one command file and write the movelist beside it
///
/// Returns the movelist text.
pub fn convert_file(
    path: &Path,
    options: &ConvertOptions,
    output: &OutputSettings,
) -> Result<String> {
    tracing::info!("Converting file: {}", path.display());
    let movelist = convert(&read_source(path)?, options);

    if output.dry_run {
        println!("Dump of movelist:\n{}", movelist);
        return Ok(movelist);
    }

    let target = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&output.file_name);
    tracing::info!("Saving to path: {}", target.display());
    fs::write(&target, &movelist)?;

    if output.patch_definition {
        match patch_definition_file(path, &output.file_name) {
            Ok(_) => {}
            Err(IguanaError::NoDefinitionFile(cmd)) => {
                tracing::warn!("No definition file references {}", cmd.display());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(movelist)
}

/// Convert a single file, checking its extension first
pub fn convert_single(
    path: &Path,
    options: &ConvertOptions,
    output: &OutputSettings,
) -> Result<String> {
    if !is_command_file(path) {
        return Err(IguanaError::NotACommandFile(path.to_path_buf()));
    }
    convert_file(path, options, output)
}

/// Convert every command file under `dir`
///
/// Directories are converted in parallel; files sharing a directory run one
/// after another in walk order, so the last one writes the movelist. A
/// failing file is logged and does not stop the others. Returns how many
/// files converted successfully.
pub fn convert_directory(
    dir: &Path,
    options: &ConvertOptions,
    output: &OutputSettings,
) -> Result<usize> {
    let files = collect_command_files(dir)?;
    tracing::info!("Found {} command files in {}", files.len(), dir.display());

    let converted: usize = group_by_directory(files)
        .par_iter()
        .map(|group| {
            group
                .iter()
                .filter(|path| match convert_file(path, options, output) {
                    Ok(_) => true,
                    Err(e) => {
                        tracing::error!("Failed to convert {}: {}", path.display(), e);
                        false
                    }
                })
                .count()
        })
        .sum();

    Ok(converted)
}
