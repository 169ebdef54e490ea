//! glint -- a parallel source-code syntax highlighter.

use glint_match::Backend;
use glintc::commands::{dir_command, file_command, parse_backend, tokens_command, DirOptions};

fn main() {
    glintc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let code = match command.as_str() {
        "file" => {
            if args.len() < 4 {
                eprintln!("Usage: glint file <input.java> <output.html> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --css <file.css>      Link a stylesheet instead of embedding one");
                eprintln!("  --backend=<name>      Matcher backend: trie (default), naive");
                std::process::exit(1);
            }

            let mut css: Option<String> = None;
            let mut backend = Backend::default();
            let mut positional: Vec<&str> = Vec::new();

            // Parse options, handling --css specially (needs lookahead).
            let mut i = 2;
            while i < args.len() {
                if args[i] == "--css" && i + 1 < args.len() {
                    css = Some(args[i + 1].clone());
                    i += 2;
                } else if let Some(name) = args[i].strip_prefix("--backend=") {
                    let Some(parsed) = parse_backend(name) else {
                        eprintln!("error: unknown backend '{name}'");
                        eprintln!("Valid backends: trie, naive");
                        std::process::exit(1);
                    };
                    backend = parsed;
                    i += 1;
                } else if args[i].starts_with('-') {
                    eprintln!("Unknown option: {}", args[i]);
                    std::process::exit(1);
                } else {
                    positional.push(&args[i]);
                    i += 1;
                }
            }

            let &[input, output] = positional.as_slice() else {
                eprintln!("error: expected exactly one input and one output path");
                std::process::exit(1);
            };
            file_command(input, output, css.as_deref(), backend)
        }
        "dir" => {
            if args.len() < 4 {
                eprintln!("Usage: glint dir <input-dir> <output-dir> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --css <file.css>      Link a stylesheet instead of embedding one");
                eprintln!("  --jobs=<n>            Worker threads (default: one per core)");
                eprintln!("  --backend=<name>      Matcher backend: trie (default), naive");
                std::process::exit(1);
            }

            let mut options = DirOptions::default();
            let mut positional: Vec<&str> = Vec::new();

            let mut i = 2;
            while i < args.len() {
                if args[i] == "--css" && i + 1 < args.len() {
                    options.css_link = Some(args[i + 1].clone());
                    i += 2;
                } else if let Some(n) = args[i].strip_prefix("--jobs=") {
                    let Ok(jobs) = n.parse::<usize>() else {
                        eprintln!("error: invalid job count '{n}'");
                        std::process::exit(1);
                    };
                    options.jobs = jobs;
                    i += 1;
                } else if let Some(name) = args[i].strip_prefix("--backend=") {
                    let Some(parsed) = parse_backend(name) else {
                        eprintln!("error: unknown backend '{name}'");
                        eprintln!("Valid backends: trie, naive");
                        std::process::exit(1);
                    };
                    options.backend = parsed;
                    i += 1;
                } else if args[i].starts_with('-') {
                    eprintln!("Unknown option: {}", args[i]);
                    std::process::exit(1);
                } else {
                    positional.push(&args[i]);
                    i += 1;
                }
            }

            let &[input, output] = positional.as_slice() else {
                eprintln!("error: expected exactly one input and one output directory");
                std::process::exit(1);
            };
            dir_command(input, output, &options)
        }
        "tokens" => {
            if args.len() < 3 {
                eprintln!("Usage: glint tokens <input.java>");
                std::process::exit(1);
            }
            let backend = args
                .get(3)
                .and_then(|a| a.strip_prefix("--backend="))
                .and_then(parse_backend)
                .unwrap_or_default();
            tokens_command(&args[2], backend)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-v" => {
            println!("glint {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            1
        }
    };

    std::process::exit(code);
}

fn print_usage() {
    println!("glint -- parallel source-code syntax highlighter");
    println!();
    println!("Usage: glint <command> [options]");
    println!();
    println!("Commands:");
    println!("  file <in.java> <out.html>   Highlight a single file");
    println!("  dir <in-dir> <out-dir>      Highlight a source tree in parallel");
    println!("  tokens <in.java>            Tokenize and display tokens");
    println!("  help                        Show this help message");
    println!("  version                     Show version information");
    println!();
    println!("Options:");
    println!("  --css <file.css>            Link a stylesheet instead of embedding one");
    println!("  --jobs=<n>                  Worker threads for dir mode (default: cores)");
    println!("  --backend=<name>            Matcher backend: trie (default), naive");
    println!();
    println!("Examples:");
    println!("  glint file Main.java Main.html");
    println!("  glint dir src/ docs/html/ --jobs=8");
    println!("  glint dir src/ docs/html/ --css prettify.css");
    println!("  glint tokens Main.java --backend=naive");
}
