//! iconscript CLI — compile icon scripts into SVG files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use iconscript_core::{evaluate, parse, Evaluation, Severity};
use iconscript_svg::render_to_string;

#[derive(Parser)]
#[command(version, about = "iconscript \u{2014} tiny icon language to SVG compiler")]
struct Cli {
    /// Input script files (default: all *.iconscript in the current directory)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Vec<PathBuf>,

    /// Evaluate a script given on the command line instead of reading files
    #[arg(short = 'e', long = "eval", value_name = "SCRIPT")]
    eval: Option<String>,

    /// Output directory for SVG files
    #[arg(short, long, default_value = "icons")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let mut failed = false;

    if let Some(ref source) = cli.eval {
        failed = !run_script("<eval>", source, &cli.output);
    } else {
        let inputs = if cli.input.is_empty() {
            match discover_scripts() {
                Ok(found) => found,
                Err(e) => {
                    eprintln!("Error: cannot list current directory: {e}");
                    process::exit(1);
                }
            }
        } else {
            cli.input.clone()
        };

        if inputs.is_empty() {
            eprintln!("No input files or script specified");
            process::exit(1);
        }

        // Each file is independent: a failing script is reported and
        // skipped, the rest still run.
        for file in &inputs {
            let label = file.display().to_string();
            match fs::read_to_string(file) {
                Ok(source) => {
                    if !run_script(&label, &source, &cli.output) {
                        failed = true;
                    }
                }
                Err(e) => {
                    eprintln!("Error reading {label}: {e}");
                    failed = true;
                }
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

/// All `*.iconscript` files in the current directory, sorted by name.
fn discover_scripts() -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(".")? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("iconscript") {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Parse, evaluate, and emit one script. Returns `false` on failure.
fn run_script(label: &str, source: &str, output_dir: &Path) -> bool {
    let evaluation = match parse(source).and_then(|script| evaluate(&script)) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            eprintln!("Error in {label}: {e}");
            return false;
        }
    };

    print_diagnostics(label, &evaluation);
    write_output(&evaluation, output_dir)
}

fn print_diagnostics(label: &str, evaluation: &Evaluation) {
    for err in &evaluation.diagnostics {
        match err.severity {
            Severity::Warning => eprintln!("Warning in {label}: {err}"),
            _ => eprintln!("Error in {label}: {err}"),
        }
    }
}

/// Write one `<name>.svg` per icon. Returns `false` on the first I/O
/// failure.
fn write_output(evaluation: &Evaluation, output_dir: &Path) -> bool {
    if let Err(e) = fs::create_dir_all(output_dir) {
        eprintln!("Error creating {}: {e}", output_dir.display());
        return false;
    }

    for (name, path_data) in &evaluation.paths {
        let svg_str = render_to_string(path_data);
        let path = output_dir.join(format!("{name}.svg"));
        match fs::write(&path, svg_str) {
            Ok(()) => eprintln!("Wrote {}", path.display()),
            Err(e) => {
                eprintln!("Error writing {}: {e}", path.display());
                return false;
            }
        }
    }
    true
}
