use super::{build_grid, count_commit, output_json, render};
use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::CommitCounts;
use crate::store::RepoStore;
use anyhow::Context;
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub fn exec(common: CommonArgs, email: String, json: bool, strict: bool) -> anyhow::Result<()> {
    let now = Local::now();
    let store = RepoStore::open(common.store.as_ref()).context("Failed to locate repository list")?;
    let repos = store
        .load()
        .with_context(|| format!("Failed to read repository list {}", store.path().display()))?;

    // Keep stdout clean for JSON consumers.
    let pb = if json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    };

    let mut counts = CommitCounts::new();
    let mut scanned: Vec<PathBuf> = Vec::with_capacity(repos.len());

    for path in &repos {
        pb.set_message(format!("Reading {}", path.display()));
        match collect_repo(path, &email, &now) {
            Ok(repo_counts) => {
                counts.merge(&repo_counts);
                scanned.push(path.clone());
            }
            Err(e) if !strict => {
                pb.suspend(|| warn!("skipping {}: {e:#}", path.display()));
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
        pb.tick();
    }
    pb.finish_and_clear();

    let grid = build_grid(&counts, &now);
    if json {
        output_json(&grid, &email, &scanned)?;
    } else {
        render(&grid, now.date_naive()).context("Failed to write heatmap")?;
    }

    Ok(())
}

/// Counts for one repository, kept separate until merged by the caller.
fn collect_repo(path: &Path, email: &str, now: &DateTime<Local>) -> anyhow::Result<CommitCounts> {
    let repo = GitRepo::open(path)
        .with_context(|| format!("Failed to open repository {}", path.display()))?;
    let commits = repo
        .commits()
        .with_context(|| format!("Failed to resolve HEAD of {}", repo.path().display()))?;

    let mut counts = CommitCounts::new();
    let mut walked = 0usize;
    let mut counted = 0usize;
    for commit in commits {
        let commit =
            commit.with_context(|| format!("Failed to walk history of {}", repo.path().display()))?;
        walked += 1;
        if count_commit(&mut counts, email, &commit, now) {
            counted += 1;
        }
    }

    debug!(
        "{}: {counted} of {walked} commits counted",
        repo.path().display()
    );
    Ok(counts)
}
