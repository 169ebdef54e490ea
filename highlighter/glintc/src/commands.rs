//! Subcommand implementations.
//!
//! Each command returns the process exit code; `main` only parses arguments
//! and dispatches. Per-file failures never abort the remaining files -- the
//! exit code reports whether anything failed at the end.

use std::num::NonZeroUsize;
use std::path::Path;

use glint_match::Backend;
use glint_pool::DispatchPool;
use glint_scan::grammar::java_rules;
use glint_scan::Tokenizer;

use crate::render::RenderWorker;
use crate::walk;

/// Options for the `dir` command.
pub struct DirOptions {
    /// Worker threads; `0` means one per available core.
    pub jobs: usize,
    pub backend: Backend,
    pub css_link: Option<String>,
}

impl Default for DirOptions {
    fn default() -> Self {
        Self {
            jobs: 0,
            backend: Backend::default(),
            css_link: None,
        }
    }
}

/// Parse a `--backend=` value.
pub fn parse_backend(arg: &str) -> Option<Backend> {
    match arg {
        "trie" => Some(Backend::Trie),
        "naive" => Some(Backend::Naive),
        _ => None,
    }
}

fn check_css(css_link: Option<&str>) -> bool {
    match css_link {
        Some(css) if !css.ends_with(".css") => {
            eprintln!("error: '{css}' must be a .css file");
            false
        }
        _ => true,
    }
}

/// Render one file. Returns the process exit code.
pub fn file_command(input: &str, output: &str, css_link: Option<&str>, backend: Backend) -> i32 {
    if !input.ends_with(".java") {
        eprintln!("error: source must be a .java file");
        return 1;
    }
    if !output.ends_with(".html") {
        eprintln!("error: output file must be an .html file");
        return 1;
    }
    if !check_css(css_link) {
        return 1;
    }
    if !Path::new(input).exists() {
        eprintln!("error: source file '{input}' does not exist");
        return 1;
    }

    let matcher = java_rules().build(backend);
    let mut worker = RenderWorker::new(&matcher, css_link);
    match worker.render_file(Path::new(input), Path::new(output)) {
        Ok(()) => {
            println!("'{output}' written successfully");
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

/// Highlight a whole source tree in parallel. Returns the process exit code.
pub fn dir_command(input: &str, output: &str, options: &DirOptions) -> i32 {
    if !check_css(options.css_link.as_deref()) {
        return 1;
    }
    let input_root = Path::new(input);
    if !input_root.is_dir() {
        eprintln!("error: '{input}' is not a directory");
        return 1;
    }

    let jobs = walk::collect_jobs(input_root, Path::new(output));
    if jobs.is_empty() {
        println!("no .java files under '{input}'");
        return 0;
    }
    let total = jobs.len();

    let threads = if options.jobs == 0 {
        std::thread::available_parallelism().map_or(4, NonZeroUsize::get)
    } else {
        options.jobs
    };

    // One immutable index, shared by every worker's tokenizer clone.
    let matcher = java_rules().build(options.backend);
    let css = options.css_link.as_deref();
    let mut pool = DispatchPool::spawn(threads, |_| RenderWorker::new(&matcher, css));
    for job in jobs {
        pool.submit(job);
    }

    // Enqueuing is done; dequeue and execute jobs here as well instead of
    // idling until the pool drains.
    let mut helper = RenderWorker::new(&matcher, css);
    pool.run_until_idle(&mut helper);
    pool.shutdown();

    let failures = pool.failures();
    if failures == 0 {
        println!("processed {total} files from '{input}'");
        0
    } else {
        eprintln!("{failures} of {total} files failed");
        1
    }
}

/// Tokenize one file and print the token list (debug aid).
pub fn tokens_command(input: &str, backend: Backend) -> i32 {
    let source = match std::fs::read_to_string(input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: failed to read '{input}': {err}");
            return 1;
        }
    };
    let mut tokenizer = Tokenizer::new(java_rules().build(backend));
    for token in tokenizer.tokenize(&source) {
        println!(
            "{:>5}..{:<5} {:<8} {:?}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind),
            token.text(&source),
        );
    }
    0
}
