// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

/// Answers every prompt with a fixed reply and counts the calls.
struct ScriptedPrompt {
    reply: PromptReply,
    calls: usize,
    labels: Vec<String>,
}

impl ScriptedPrompt {
    fn new(reply: PromptReply) -> Self {
        Self {
            reply,
            calls: 0,
            labels: Vec::new(),
        }
    }
}

impl PathPrompt for ScriptedPrompt {
    fn prompt_for_path(&mut self, pattern: &Regex, _default: &Path, label: &str) -> PromptReply {
        assert_eq!(pattern.as_str(), PATH_PATTERN);
        self.calls += 1;
        self.labels.push(label.to_string());
        self.reply.clone()
    }
}

fn missing_default(dir: &TempDir) -> PathBuf {
    dir.path().join("not-installed").join("bash.exe")
}

#[parameterized(
    wsl = { r"<wsl> C:\Windows\System32\bash.exe", "wsl", r"C:\Windows\System32\bash.exe" },
    spaces_in_path = { r"<blueCFD> C:\Program Files\blueCFD\setvars.bat  ", "blueCFD", r"C:\Program Files\blueCFD\setvars.bat" },
)]
fn entry_lines_parse(line: &str, tag: &str, path: &str) {
    assert_eq!(EnvironmentEntry::parse(line), Some(EnvironmentEntry::new(tag, path)));
}

#[parameterized(
    comment = { "# foamrig environment paths" },
    blank = { "   " },
    no_path = { "<wsl>" },
    no_brackets = { "wsl /usr/bin/bash" },
    empty_tag = { "<> /usr/bin/bash" },
)]
fn non_entry_lines_are_skipped(line: &str) {
    assert_eq!(EnvironmentEntry::parse(line), None);
}

#[test]
fn stored_entry_resolves_without_prompting() {
    let dir = TempDir::new().unwrap();
    let store = EnvPathStore::in_dir(dir.path());
    std::fs::write(
        store.path(),
        "# foamrig environment paths\n<wsl> C:\\Windows\\System32\\bash.exe\n",
    )
    .unwrap();

    let mut prompt = ScriptedPrompt::new(PromptReply::cancelled());
    let resolution = store
        .resolve("wsl", &missing_default(&dir), &mut prompt)
        .unwrap();
    assert_eq!(resolution.status, PathStatus::Success);
    assert_eq!(resolution.path, Some(PathBuf::from(r"C:\Windows\System32\bash.exe")));
    assert_eq!(prompt.calls, 0);
}

#[test]
fn missing_tag_and_missing_default_prompts_once() {
    let dir = TempDir::new().unwrap();
    let store = EnvPathStore::in_dir(dir.path());
    std::fs::write(store.path(), "<ssh> /usr/bin/ssh\n").unwrap();

    let mut prompt = ScriptedPrompt::new(PromptReply::entered("/opt/wsl/bash"));
    let resolution = store
        .resolve("wsl", &missing_default(&dir), &mut prompt)
        .unwrap();
    assert_eq!(prompt.calls, 1);
    assert_eq!(prompt.labels, vec!["Path for the wsl environment"]);
    assert_eq!(resolution.path, Some(PathBuf::from("/opt/wsl/bash")));

    // The answer is stored next to the existing entry.
    let entries = store.entries().unwrap();
    assert_eq!(
        entries,
        vec![
            EnvironmentEntry::new("ssh", "/usr/bin/ssh"),
            EnvironmentEntry::new("wsl", "/opt/wsl/bash"),
        ]
    );
}

#[test]
fn existing_default_is_stored_without_prompting() {
    let dir = TempDir::new().unwrap();
    let default = dir.path().join("setvars.bat");
    std::fs::write(&default, "").unwrap();
    let store = EnvPathStore::in_dir(&dir.path().join("config"));

    let mut prompt = ScriptedPrompt::new(PromptReply::cancelled());
    let resolution = store.resolve("blueCFD", &default, &mut prompt).unwrap();
    assert_eq!(resolution.status, PathStatus::Success);
    assert_eq!(resolution.path.as_deref(), Some(default.as_path()));
    assert_eq!(prompt.calls, 0);
    assert_eq!(store.lookup("blueCFD").unwrap(), Some(default));
}

#[test]
fn cancelled_prompt_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let store = EnvPathStore::in_dir(dir.path());
    let mut prompt = ScriptedPrompt::new(PromptReply::cancelled());

    let resolution = store
        .resolve("wsl", &missing_default(&dir), &mut prompt)
        .unwrap();
    assert_eq!(resolution, PathResolution::without_path(PathStatus::Cancelled));
    assert!(!store.path().exists());
}

#[parameterized(
    inner_space = { "C:/Program Files/bash.exe" },
    empty = { "" },
    only_spaces = { "   " },
)]
fn invalid_entry_is_a_failure(text: &str) {
    let dir = TempDir::new().unwrap();
    let store = EnvPathStore::in_dir(dir.path());
    let mut prompt = ScriptedPrompt::new(PromptReply::entered(text));

    let resolution = store
        .resolve("wsl", &missing_default(&dir), &mut prompt)
        .unwrap();
    assert_eq!(resolution.status, PathStatus::Failure);
    assert_eq!(resolution.path, None);
    assert!(store.entries().unwrap().is_empty());
}

#[test]
fn persist_replaces_existing_entry() {
    let dir = TempDir::new().unwrap();
    let store = EnvPathStore::in_dir(dir.path());
    store.persist("wsl", Path::new("/old/bash")).unwrap();
    store.persist("ssh", Path::new("/usr/bin/ssh")).unwrap();
    store.persist("wsl", Path::new("/new/bash")).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let mut lines = content.lines();
    assert!(lines
        .next()
        .unwrap()
        .starts_with("# foamrig environment paths (updated "));
    assert_eq!(lines.collect::<Vec<_>>(), vec!["<wsl> /new/bash", "<ssh> /usr/bin/ssh"]);
}

#[test]
fn missing_store_has_no_entries() {
    let dir = TempDir::new().unwrap();
    let store = EnvPathStore::in_dir(&dir.path().join("absent"));
    assert!(store.entries().unwrap().is_empty());
    assert_eq!(store.lookup("wsl").unwrap(), None);
}
