//! Interactive CSV picker used when an axis command is run without `-f`.
//!
//! Lists the `*.csv` files below the working directory, each with its header
//! row as a column preview, and reads a choice from stdin.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

const SEARCH_DEPTH: usize = 4;
const SKIPPED_DIRS: &[&str] = &[".git", "target", "node_modules"];

/// Prompt on stdin/stdout for an axis CSV.
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let files = find_csv_files(Path::new("."), SEARCH_DEPTH);
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Provide an axis file with `-f <file.csv>`.",
        ));
    }
    let stdin = io::stdin();
    pick(&files, &mut stdin.lock(), &mut io::stdout())
}

/// Check that `path` is an existing `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(2, format!("CSV file not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !is_csv(path) {
        return Err(AppError::new(
            2,
            format!("Expected a .csv file (got: {}). Use -f to pass a CSV path.", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

#[derive(Debug, PartialEq)]
enum Choice {
    Listed(usize),
    Path(PathBuf),
    OutOfRange(usize),
    Quit,
}

fn parse_choice(input: &str, listed: usize) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=listed).contains(&n) => Choice::Listed(n - 1),
        Ok(n) => Choice::OutOfRange(n),
        Err(_) => Choice::Path(PathBuf::from(input)),
    }
}

fn pick(files: &[PathBuf], input: &mut impl BufRead, out: &mut impl Write) -> Result<PathBuf, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Terminal I/O failed: {e}"));

    writeln!(out, "Found {} CSV file(s):", files.len()).map_err(io_err)?;
    for (i, path) in files.iter().enumerate() {
        let preview = peek_columns(path).map(|c| format!("  [{c}]")).unwrap_or_default();
        writeln!(out, "{:>3}) {}{preview}", i + 1, display_path(path)).map_err(io_err)?;
    }

    loop {
        write!(out, "Select a file by number (1-{}) or type a path (q to quit): ", files.len())
            .map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide an axis file with `-f <file.csv>`.",
            ));
        }

        match parse_choice(&line, files.len()) {
            Choice::Quit => return Err(AppError::new(2, "Canceled.")),
            Choice::Listed(i) => return validate_csv_path(&files[i]),
            Choice::OutOfRange(n) => {
                writeln!(out, "Invalid choice: {n}. Enter a number between 1 and {}.", files.len())
                    .map_err(io_err)?;
            }
            Choice::Path(path) => match validate_csv_path(&path) {
                Ok(path) => return Ok(path),
                Err(err) => writeln!(out, "{err}").map_err(io_err)?,
            },
        }
    }
}

/// Breadth-first search for CSV files, sorted by displayed path.
fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut queue = VecDeque::from([(root.to_path_buf(), 0usize)]);
    while let Some((dir, depth)) = queue.pop_front() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => {
                    let skipped = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| SKIPPED_DIRS.contains(&n));
                    if depth < max_depth && !skipped {
                        queue.push_back((path, depth + 1));
                    }
                }
                Ok(ft) if ft.is_file() && is_csv(&path) => found.push(path),
                _ => {}
            }
        }
    }
    found.sort_by_key(|p| display_path(p));
    found
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Header row of a CSV file, BOM stripped.
fn peek_columns(path: &Path) -> Option<String> {
    let mut line = String::new();
    io::BufReader::new(fs::File::open(path).ok()?)
        .read_line(&mut line)
        .ok()?;
    let line = line.trim().trim_start_matches('\u{feff}');
    (!line.is_empty()).then(|| line.to_string())
}

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}
