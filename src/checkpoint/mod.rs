/*!
Checkpoints of the pool, so a long search may be resumed.

# Layout

Checkpoints of a formula are kept in a directory named by the [hash](crate::structures::formula::Formula::hash_string) of the formula, within some root directory:

```none
<root>/<formula-hash>/
  <stream-id>.cnf   the assignment of each stream, as unit clauses
  solution.cnf      the global assignment, as unit clauses
  activeids.txt     the ids of the streams of the checkpoint, one to a line
```

The manifest `activeids.txt` is authoritative.
On load, only streams listed in the manifest are read.
On save, the manifest is written last, by a rename, and any stream file for an id absent from the manifest is stale and removed.

Each `.cnf` file is a DIMACS formula of unit clauses, and may be read by any tool which reads DIMACS.

# Example

```rust
# use stream_sat::checkpoint::CheckpointStore;
# use stream_sat::structures::assignment::Assignment;
let root = std::env::temp_dir().join(format!("stream_sat_doc_{}", std::process::id()));
let store = CheckpointStore::new(&root, "0123456789abcdef");

let streams = vec![
    (3, Assignment::from_literals([1, 2])),
    (7, Assignment::from_literals([1, -3])),
];
let solution = Assignment::from_literals([1]);
store.save(&streams, &solution).expect("saved");

let loaded = store.load().expect("readable").expect("a checkpoint");
assert_eq!(loaded.streams, streams);
assert_eq!(loaded.solution, Some(solution));

let _ = std::fs::remove_dir_all(root);
```
*/

use std::{
    collections::BTreeSet,
    fs,
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    builder::dimacs::parse_dimacs,
    misc::log::targets::{self},
    pool::StreamId,
    structures::{assignment::Assignment, literal::Literal},
    types::err::CheckpointError,
};

/// The name of the manifest of a checkpoint.
pub const MANIFEST: &str = "activeids.txt";

/// The name of the file of the global assignment of a checkpoint.
pub const SOLUTION: &str = "solution.cnf";

/// A checkpoint, as read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedCheckpoint {
    /// Each stream listed in the manifest, in the order listed.
    pub streams: Vec<(StreamId, Assignment)>,

    /// The global assignment at the time of the checkpoint, if readable.
    pub solution: Option<Assignment>,
}

/// The checkpoints of a formula.
#[derive(Clone, Debug)]
pub struct CheckpointStore {
    directory: PathBuf,
}

impl CheckpointStore {
    /// The store for the formula with hash `hash`, within `root`.
    ///
    /// Nothing is created until a checkpoint is saved.
    pub fn new(root: &Path, hash: &str) -> Self {
        CheckpointStore {
            directory: root.join(hash),
        }
    }

    /// The directory of the store.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn stream_path(&self, id: StreamId) -> PathBuf {
        self.directory.join(format!("{id}.cnf"))
    }

    /// Saves a checkpoint of `streams`, together with the global assignment `solution`.
    pub fn save(&self, streams: &[(StreamId, Assignment)], solution: &Assignment) -> Result<(), CheckpointError> {
        fs::create_dir_all(&self.directory).map_err(|e| CheckpointError::io(&self.directory, &e))?;

        for (id, assignment) in streams {
            write_file(&self.stream_path(*id), &units_file(assignment))?;
        }
        write_file(&self.directory.join(SOLUTION), &units_file(solution))?;

        let mut manifest = String::new();
        for (id, _) in streams {
            manifest.push_str(&format!("{id}\n"));
        }
        let manifest_path = self.directory.join(MANIFEST);
        let staging_path = self.directory.join(format!("{MANIFEST}.tmp"));
        write_file(&staging_path, &manifest)?;
        fs::rename(&staging_path, &manifest_path).map_err(|e| CheckpointError::io(&manifest_path, &e))?;

        let active = streams.iter().map(|(id, _)| *id).collect::<BTreeSet<_>>();
        self.remove_stale(&active)?;

        log::debug!(target: targets::CHECKPOINT, "Checkpoint of {} streams saved to {:?}", streams.len(), self.directory);
        Ok(())
    }

    /// Removes the file of each stream absent from `active`.
    fn remove_stale(&self, active: &BTreeSet<StreamId>) -> Result<(), CheckpointError> {
        let entries = fs::read_dir(&self.directory).map_err(|e| CheckpointError::io(&self.directory, &e))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|extension| extension.to_str()) != Some("cnf") {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<StreamId>().ok())
            else {
                continue;
            };

            if !active.contains(&id) {
                log::trace!(target: targets::CHECKPOINT, "Removing stale stream file {path:?}");
                fs::remove_file(&path).map_err(|e| CheckpointError::io(&path, &e))?;
            }
        }

        Ok(())
    }

    /// Loads the checkpoint of the store, if a manifest exists.
    pub fn load(&self) -> Result<Option<LoadedCheckpoint>, CheckpointError> {
        let manifest_path = self.directory.join(MANIFEST);
        let manifest = match fs::read_to_string(&manifest_path) {
            Ok(manifest) => manifest,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CheckpointError::io(&manifest_path, &e)),
        };

        let mut streams = Vec::default();
        for (index, line) in manifest.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let id = line
                .parse::<StreamId>()
                .map_err(|_| CheckpointError::Manifest(index + 1))?;

            let path = self.stream_path(id);
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) if e.kind() == IoErrorKind::NotFound => {
                    return Err(CheckpointError::MissingStream(id))
                }
                Err(e) => return Err(CheckpointError::io(&path, &e)),
            };
            let assignment = read_units(&contents).ok_or(CheckpointError::MalformedStream(id))?;
            streams.push((id, assignment));
        }

        let solution = fs::read_to_string(self.directory.join(SOLUTION))
            .ok()
            .and_then(|contents| read_units(&contents));

        log::debug!(target: targets::CHECKPOINT, "Checkpoint of {} streams loaded from {:?}", streams.len(), self.directory);
        Ok(Some(LoadedCheckpoint { streams, solution }))
    }
}

/// `assignment` as a DIMACS formula of unit clauses.
fn units_file(assignment: &Assignment) -> String {
    let max_atom = assignment.literals().map(|literal| literal.atom()).max().unwrap_or(0);
    format!("p cnf {max_atom} {}\n{}", assignment.len(), assignment.as_dimacs_units())
}

/// The assignment of a DIMACS formula of unit clauses, or None if some clause is not a unit.
fn read_units(contents: &str) -> Option<Assignment> {
    let parsed = parse_dimacs(contents.as_bytes()).ok()?;
    let mut assignment = Assignment::with_capacity(parsed.clauses.len());
    for clause in parsed.clauses {
        match clause.as_slice() {
            [literal] => {
                assignment.insert(*literal);
            }
            _ => return None,
        }
    }
    Some(assignment)
}

fn write_file(path: &Path, contents: &str) -> Result<(), CheckpointError> {
    fs::write(path, contents).map_err(|e| CheckpointError::io(path, &e))
}
