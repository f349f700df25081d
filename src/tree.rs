//! Depth-limited directory listing in the style of `tree`.
//!
//! Hidden directories never appear. Hidden files only appear directly under
//! the root. Directories sort before files, then names case-insensitively.

use std::{
    fs,
    io::{self, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

pub const MAX_DEPTH: usize = 3;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Visible entries of `dir`, sorted. `None` when listing is not permitted.
fn list_entries(dir: &Path, depth: usize) -> io::Result<Option<Vec<Entry>>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return Ok(None),
        Err(err) => return Err(err),
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), %err, "skipping unreadable entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        // Follows symlinks, so a link to a directory counts as one.
        let is_dir = path.is_dir();

        if is_hidden(&name) && (is_dir || depth > 0) {
            continue;
        }

        entries.push(Entry { name, path, is_dir });
    }

    entries.sort_by_cached_key(|e| (!e.is_dir, e.name.to_lowercase()));
    Ok(Some(entries))
}

/// Lists one directory for the walk; `Ok(None)` renders the sentinel.
type Lister<'a> = dyn FnMut(&Path, usize) -> io::Result<Option<Vec<Entry>>> + 'a;

fn walk<W: Write>(
    out: &mut W,
    dir: &Path,
    depth: usize,
    max_depth: usize,
    prefix: &str,
    list: &mut Lister<'_>,
) -> io::Result<()> {
    let Some(entries) = list(dir, depth)? else {
        tracing::debug!(dir = %dir.display(), "permission denied");
        writeln!(out, "{prefix}{LAST_BRANCH}[permission denied]")?;
        return Ok(());
    };

    let count = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { LAST_BRANCH } else { BRANCH };
        writeln!(out, "{prefix}{branch}{}", entry.name)?;

        if entry.is_dir && depth + 1 < max_depth {
            let indent = if last { SPACE } else { PIPE };
            let prefix = format!("{prefix}{indent}");
            walk(out, &entry.path, depth + 1, max_depth, &prefix, list)?;
        }
    }

    Ok(())
}

/// Write the tree under `root` to `out`, starting with a line for `root` itself.
///
/// Depth 0 is the root's direct children. A directory at depth `d` is expanded
/// only while `d < max_depth - 1`.
pub fn write_tree<W: Write>(out: &mut W, root: &Path, max_depth: usize) -> io::Result<()> {
    writeln!(out, "{}", root.display())?;
    walk(out, root, 0, max_depth, "", &mut list_entries)
}

pub fn print_tree(root: &Path, max_depth: usize) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_tree(&mut out, root, max_depth)?;
    out.flush()
}
