use crate::error::{GitcalError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, FixedOffset};
use gix::{ObjectId, Repository};
use log::debug;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let repo = gix::open(&path)?;
        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits reachable from HEAD, newest first by committer time.
    pub fn commits(&self) -> Result<CommitWalk<'_>> {
        let mut head = self.repo.head()?;
        let head_id = head.peel_to_commit_in_place()?.id;

        let mut walk = CommitWalk {
            repo: &self.repo,
            shallow: self.repo.is_shallow(),
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            deferred: None,
            failed: false,
        };
        walk.seen.insert(head_id);
        walk.queue.push(load(&self.repo, head_id)?);
        Ok(walk)
    }
}

/// A decoded commit waiting in the walk queue.
struct Pending {
    committed: i64,
    id: ObjectId,
    record: CommitRecord,
    parents: Vec<ObjectId>,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.committed, self.id).cmp(&(other.committed, other.id))
    }
}

fn load(repo: &Repository, id: ObjectId) -> Result<Pending> {
    let commit = repo.find_commit(id)?;
    let committed = commit.time()?.seconds;
    let author = commit.author()?;
    let time = author
        .time()
        .map_err(|e| GitcalError::InvalidTimestamp(format!("author time of {id}: {e}")))?;

    Ok(Pending {
        committed,
        id,
        record: CommitRecord {
            author_email: author.email.to_string(),
            authored_at: to_datetime(time.seconds, time.offset)?,
        },
        parents: commit.parent_ids().map(|p| p.detach()).collect(),
    })
}

/// Lazy ancestry walk. Each commit is read once; a commit is yielded before
/// its parents are read, and the walk stops after the first error it yields.
pub struct CommitWalk<'repo> {
    repo: &'repo Repository,
    shallow: bool,
    queue: BinaryHeap<Pending>,
    seen: HashSet<ObjectId>,
    deferred: Option<GitcalError>,
    failed: bool,
}

impl CommitWalk<'_> {
    fn enqueue_parents(&mut self, parents: &[ObjectId]) -> Result<()> {
        for &parent_id in parents {
            if !self.seen.insert(parent_id) {
                continue;
            }
            match load(self.repo, parent_id) {
                Ok(pending) => self.queue.push(pending),
                // Parents past the boundary of a shallow clone are absent.
                Err(GitcalError::ObjectFindConv(_)) if self.shallow => {
                    debug!("history ends at shallow boundary before {parent_id}");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(err) = self.deferred.take() {
            self.failed = true;
            return Some(Err(err));
        }
        let pending = self.queue.pop()?;
        if let Err(e) = self.enqueue_parents(&pending.parents) {
            self.deferred = Some(e);
        }
        Some(Ok(pending.record))
    }
}

/// Author time with the author's own UTC offset.
pub fn to_datetime(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let zone = FixedOffset::east_opt(offset)
        .ok_or_else(|| GitcalError::InvalidTimestamp(format!("UTC offset out of range: {offset}")))?;
    let utc = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| GitcalError::InvalidTimestamp(format!("{seconds}")))?;
    Ok(utc.with_timezone(&zone))
}
