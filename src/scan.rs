use crate::cli::CommonArgs;
use crate::error::{GitcalError, Result};
use crate::store::RepoStore;
use anyhow::Context;
use console::style;
use ignore::{DirEntry, WalkBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};

const SKIPPED_DIRS: [&str; 2] = ["vendor", "node_modules"];

pub fn exec(common: CommonArgs, folder: PathBuf) -> anyhow::Result<()> {
    let store = RepoStore::open(common.store.as_ref()).context("Failed to locate repository list")?;

    println!("Scanning {} for git repositories...\n", folder.display());
    let found = find_repositories_with_progress(&folder, true)
        .with_context(|| format!("Failed to scan {}", folder.display()))?;
    for repo in &found {
        println!("{}", repo.display());
    }

    let added = store
        .add(&found)
        .with_context(|| format!("Failed to update {}", store.path().display()))?;

    println!(
        "\n{} {} new of {} found, list saved to {}",
        style("Added").green().bold(),
        style(added.len()).cyan(),
        style(found.len()).cyan(),
        style(store.path().display()).dim()
    );
    Ok(())
}

pub fn find_repositories(root: &Path) -> Result<Vec<PathBuf>> {
    find_repositories_with_progress(root, false)
}

/// Repository roots below `root` (inclusive), in file-name order.
///
/// `vendor` and `node_modules` directories are not entered, and neither is
/// anything inside a repository that was already found.
pub fn find_repositories_with_progress(root: &Path, show_progress: bool) -> Result<Vec<PathBuf>> {
    let root = root
        .canonicalize()
        .map_err(|e| GitcalError::at_path(root, e))?;

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let walker = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(keep_entry)
        .build();

    let mut repos = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }
        pb.set_message(entry.path().display().to_string());
        if is_repository_root(entry.path()) {
            info!("found repository {}", entry.path().display());
            repos.push(entry.path().to_path_buf());
        }
        pb.tick();
    }

    pb.finish_and_clear();
    debug!("{} repositories under {}", repos.len(), root.display());
    Ok(repos)
}

fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
    if is_dir && SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip) {
        return false;
    }
    // Nothing inside a repository is scanned, its .git included.
    !entry.path().parent().is_some_and(is_repository_root)
}

pub fn is_repository_root(dir: &Path) -> bool {
    dir.join(".git").symlink_metadata().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_repo(path: &Path) {
        fs::create_dir_all(path.join(".git")).unwrap();
    }

    #[test]
    fn finds_nested_repositories_in_name_order() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        make_repo(&root.join("b/project"));
        make_repo(&root.join("a"));
        fs::create_dir_all(root.join("c/empty")).unwrap();

        let found = find_repositories(&root).unwrap();
        assert_eq!(found, vec![root.join("a"), root.join("b/project")]);
    }

    #[test]
    fn skips_vendor_and_node_modules() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        make_repo(&root.join("vendor/dep"));
        make_repo(&root.join("web/node_modules/pkg"));
        make_repo(&root.join("web/app"));

        let found = find_repositories(&root).unwrap();
        assert_eq!(found, vec![root.join("web/app")]);
    }

    #[test]
    fn does_not_descend_into_a_repository() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        make_repo(&root.join("outer"));
        make_repo(&root.join("outer/inner"));

        let found = find_repositories(&root).unwrap();
        assert_eq!(found, vec![root.join("outer")]);
    }

    #[test]
    fn root_itself_can_be_a_repository() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        make_repo(&root);

        assert_eq!(find_repositories(&root).unwrap(), vec![root.clone()]);
    }

    #[test]
    fn gitfile_marks_a_worktree_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("wt")).unwrap();
        fs::write(root.join("wt/.git"), "gitdir: /elsewhere\n").unwrap();

        assert_eq!(find_repositories(&root).unwrap(), vec![root.join("wt")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(find_repositories(&dir.path().join("nope")).is_err());
    }
}
