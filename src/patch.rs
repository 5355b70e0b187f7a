//! Register a generated movelist in the character's definition file
//!
//! Ikemen reads the movelist from `movelist = <file>` in the `[Files]`
//! section of the character's `.def`. The definition to patch is the one in
//! the command file's directory whose `cmd` entry names that command file.

use crate::core::error::{IguanaError, Result};
use crate::ini::{header_name, is_entry, parse_document};
use std::fs;
use std::path::{Path, PathBuf};

const FILES_SECTION: &str = "Files";
const MOVELIST_KEY: &str = "movelist";

fn file_name_matches(reference: &str, file_name: &str) -> bool {
    Path::new(reference.trim())
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
}

/// True if the definition's `[Files] cmd` names `cmd_file_name`
pub fn references_command(def_text: &str, cmd_file_name: &str) -> bool {
    parse_document(def_text)
        .sections_named(FILES_SECTION)
        .filter_map(|files| files.get("cmd"))
        .any(|cmd| file_name_matches(cmd, cmd_file_name))
}

/// Add `movelist = <name>` as the last entry of `[Files]`
///
/// Returns `None` when there is no `[Files]` section or it already has a
/// movelist entry. Line endings of the original text are kept.
pub fn patch_definition(def_text: &str, movelist_name: &str) -> Option<String> {
    let doc = parse_document(def_text);
    let mut files = doc.sections_named(FILES_SECTION);
    let section = files.next()?;
    if section.get(MOVELIST_KEY).is_some() {
        tracing::debug!("Definition already has a movelist entry");
        return None;
    }

    let newline = if def_text.contains("\r\n") { "\r\n" } else { "\n" };
    let lines: Vec<&str> = def_text.lines().collect();

    let mut insert_at = None;
    let mut in_files = false;
    for (i, raw) in lines.iter().enumerate() {
        if let Some(name) = header_name(raw) {
            if in_files {
                break;
            }
            in_files = name.eq_ignore_ascii_case(FILES_SECTION);
            if in_files {
                insert_at = Some(i + 1);
            }
        } else if in_files && is_entry(raw) {
            insert_at = Some(i + 1);
        }
    }

    let insert_at = insert_at?;
    let entry = format!("{} = {}", MOVELIST_KEY, movelist_name);

    let mut patched: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    patched.extend_from_slice(&lines[..insert_at]);
    patched.push(&entry);
    patched.extend_from_slice(&lines[insert_at..]);

    let mut out = patched.join(newline);
    if def_text.ends_with('\n') {
        out.push_str(newline);
    }
    Some(out)
}

/// Find the `.def` next to `cmd_path` that references it
pub fn find_definition_file(cmd_path: &Path) -> Result<Option<PathBuf>> {
    let Some(cmd_name) = cmd_path.file_name().and_then(|n| n.to_str()) else {
        return Ok(None);
    };
    let dir = match cmd_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("def"))
        })
        .collect();
    candidates.sort();

    for path in candidates {
        let text = fs::read_to_string(&path)?;
        if references_command(&text, cmd_name) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

/// Patch the definition that references `cmd_path`; returns whether it changed
pub fn patch_definition_file(cmd_path: &Path, movelist_name: &str) -> Result<bool> {
    let def_path = find_definition_file(cmd_path)?
        .ok_or_else(|| IguanaError::NoDefinitionFile(cmd_path.to_path_buf()))?;

    let text = fs::read_to_string(&def_path)?;
    match patch_definition(&text, movelist_name) {
        Some(patched) => {
            fs::write(&def_path, patched)?;
            tracing::info!("Added movelist entry to {}", def_path.display());
            Ok(true)
        }
        None => {
            tracing::info!("{} left unchanged", def_path.display());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEF: &str = "[Info]\nname = \"Kung Fu Man\"\n\n[Files]\ncmd = kfm.cmd\ncns = kfm.cns\n\n[Arcade]\nintro.storyboard =\n";

    #[test]
    fn test_references_command() {
        assert!(references_command(DEF, "kfm.cmd"));
        assert!(references_command(DEF, "KFM.CMD"));
        assert!(!references_command(DEF, "other.cmd"));
        assert!(references_command("[Files]\ncmd = chars/kfm/kfm.cmd\n", "kfm.cmd"));
    }

    #[test]
    fn test_patch_inserts_after_last_entry() {
        let patched = patch_definition(DEF, "movelist.dat").unwrap();
        assert_eq!(
            patched,
            "[Info]\nname = \"Kung Fu Man\"\n\n[Files]\ncmd = kfm.cmd\ncns = kfm.cns\nmovelist = movelist.dat\n\n[Arcade]\nintro.storyboard =\n"
        );
    }

    #[test]
    fn test_patch_keeps_existing_entry() {
        let def = "[Files]\ncmd = kfm.cmd\nmovelist = custom.dat\n";
        assert_eq!(patch_definition(def, "movelist.dat"), None);
    }

    #[test]
    fn test_patch_without_files_section() {
        assert_eq!(patch_definition("[Info]\nname = x\n", "movelist.dat"), None);
    }

    #[test]
    fn test_patch_keeps_crlf() {
        let def = "[Files]\r\ncmd = kfm.cmd\r\n";
        assert_eq!(
            patch_definition(def, "movelist.dat").unwrap(),
            "[Files]\r\ncmd = kfm.cmd\r\nmovelist = movelist.dat\r\n"
        );
    }

    #[test]
    fn test_patch_empty_files_section() {
        let def = "[Files]\n[Arcade]\n";
        assert_eq!(
            patch_definition(def, "movelist.dat").unwrap(),
            "[Files]\nmovelist = movelist.dat\n[Arcade]\n"
        );
    }
}
