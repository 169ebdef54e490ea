//! Recursive source-tree traversal.

use std::path::Path;

use glint_pool::Job;

/// Collect one [`Job`] per `.java` file under `input_root`, mirroring the
/// directory structure below `output_root` with the extension mapped to
/// `.html`.
///
/// Unreadable directories are reported and skipped; hidden entries are
/// ignored.
pub fn collect_jobs(input_root: &Path, output_root: &Path) -> Vec<Job> {
    let mut jobs = Vec::new();
    visit(input_root, input_root, output_root, &mut jobs);
    jobs
}

fn visit(dir: &Path, root: &Path, output_root: &Path, jobs: &mut Vec<Job>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("Error reading directory '{}': {err}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                continue;
            }
        }

        if path.is_dir() {
            visit(&path, root, output_root, jobs);
        } else if path.extension().is_some_and(|ext| ext == "java") {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let output = output_root.join(relative).with_extension("html");
            jobs.push(Job::new(path, output));
        }
    }
}
