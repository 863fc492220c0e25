//! Petal CLI
//!
//! Renders template documents against a JSON model.

use std::path::PathBuf;

use petalc::commands::{check_file, render_file, RenderOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let exit_code = match args[1].as_str() {
        "render" => {
            if args.len() < 3 {
                eprintln!("Usage: petal render <template> [--model <file.json>] [--output <file>]");
                std::process::exit(1);
            }
            let mut options = RenderOptions::default();
            let mut template = None;
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--model" | "-m" if i + 1 < args.len() => {
                        options.model = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    }
                    "--output" | "-o" if i + 1 < args.len() => {
                        options.output = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    }
                    arg if !arg.starts_with('-') && template.is_none() => {
                        template = Some(arg.to_string());
                        i += 1;
                    }
                    arg => {
                        eprintln!("error: unexpected argument '{arg}'");
                        std::process::exit(1);
                    }
                }
            }
            let Some(template) = template else {
                eprintln!("error: missing template path");
                std::process::exit(1);
            };
            render_file(&template, &options)
        }
        "check" => {
            if args.len() != 3 {
                eprintln!("Usage: petal check <template>");
                std::process::exit(1);
            }
            check_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: petal <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <template> [--model <file.json>] [--output <file>]");
    eprintln!("      Interpret the template's directives and print the result.");
    eprintln!("  check <template>");
    eprintln!("      Validate directive grammar without rendering.");
    eprintln!();
    eprintln!("Set RUST_LOG to enable tracing output.");
}
