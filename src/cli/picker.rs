//! Interactive choices made when `-f` or `-c` is missing.
//!
//! Both prompts share one numbered-menu loop: an answer is either a list
//! number or free text (a path, a column name), `q` cancels and end of input
//! is an error telling the user which flag to pass instead. The loop reads
//! from any `BufRead` so it runs against in-memory input in tests.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::ingest::Table;

/// How deep below the working directory CSV discovery descends.
const CSV_SEARCH_DEPTH: usize = 4;

/// One reply to a numbered menu.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    /// Zero-based position in the listed items.
    Item(usize),
    Text(String),
}

/// List `labels`, then ask until `pick` accepts an answer.
///
/// Out-of-range numbers are refused here; `pick` returns `Err(message)` to
/// print the message and ask again.
fn menu<R, W, T>(
    input: &mut R,
    out: &mut W,
    title: &str,
    labels: &[String],
    noun: &str,
    no_input_hint: &str,
    mut pick: impl FnMut(Answer) -> Result<T, String>,
) -> Result<T, AppError>
where
    R: BufRead,
    W: Write,
{
    let io_err = |e: io::Error| AppError::new(2, format!("Terminal I/O failed: {e}"));

    writeln!(out, "{title}").map_err(io_err)?;
    for (idx, label) in labels.iter().enumerate() {
        writeln!(out, "{:>3}) {label}", idx + 1).map_err(io_err)?;
    }

    loop {
        write!(out, "Select a {noun} by number (1-{}) (q to quit): ", labels.len()).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, format!("No input received. {no_input_hint}")));
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        let answer = match line.parse::<usize>() {
            Ok(n) if (1..=labels.len()).contains(&n) => Answer::Item(n - 1),
            Ok(n) => {
                writeln!(out, "Invalid choice: {n}. Enter a number between 1 and {}.", labels.len())
                    .map_err(io_err)?;
                continue;
            }
            Err(_) => Answer::Text(line.to_string()),
        };
        match pick(answer) {
            Ok(value) => return Ok(value),
            Err(message) => writeln!(out, "{message}").map_err(io_err)?,
        }
    }
}

/// Ask for an input CSV among the files found under the working directory.
/// A typed path is accepted too.
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let files = discover_csv_files();
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Provide one with `distfit fit -f <file.csv>`.",
        ));
    }
    let labels: Vec<String> = files.iter().map(|p| pretty_path(p)).collect();

    menu(
        &mut io::stdin().lock(),
        &mut io::stdout(),
        &format!("Found {} CSV file(s):", files.len()),
        &labels,
        "file (or type a path)",
        "Provide a CSV path with `distfit fit -f <file.csv>`.",
        |answer| {
            let path = match answer {
                Answer::Item(i) => files[i].clone(),
                Answer::Text(text) => PathBuf::from(text),
            };
            validate_csv_path(&path).map_err(|e| e.to_string())
        },
    )
}

/// Ask which numeric column of `table` to use.
///
/// A single numeric column is chosen without asking.
pub fn prompt_for_column(table: &Table) -> Result<String, AppError> {
    choose_column(table, &mut io::stdin().lock(), &mut io::stdout())
}

fn choose_column<R: BufRead, W: Write>(table: &Table, input: &mut R, out: &mut W) -> Result<String, AppError> {
    let columns: Vec<String> = table.numeric_columns().map(|c| c.name.clone()).collect();
    match columns.as_slice() {
        [] => return Err(AppError::new(3, "The table has no numeric columns to fit.")),
        [only] => return Ok(only.clone()),
        _ => {}
    }

    menu(
        input,
        out,
        "Numeric columns:",
        &columns,
        "column (or type its name)",
        "Provide a column with `-c <name>`.",
        |answer| match answer {
            Answer::Item(i) => Ok(columns[i].clone()),
            Answer::Text(text) => columns
                .iter()
                .find(|name| name.eq_ignore_ascii_case(&text))
                .cloned()
                .ok_or_else(|| format!("Unknown numeric column: {text}")),
        },
    )
}

/// An existing regular file with a `.csv` extension (any case).
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            2,
            format!("CSV file not found: {}", path.display()),
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        != Some(true)
    {
        return Err(AppError::new(
            2,
            format!(
                "Expected a .csv file (got: {}). Use -f to pass a CSV path.",
                path.display()
            ),
        ));
    }

    Ok(path.to_path_buf())
}

/// `*.csv` files below the working directory, sorted by display path.
pub fn discover_csv_files() -> Vec<PathBuf> {
    find_csv_files(Path::new("."), CSV_SEARCH_DEPTH)
}

fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_csv_files_inner(root, 0, max_depth, &mut out);
    out.sort_by(|a, b| pretty_path(a).cmp(&pretty_path(b)));
    out
}

fn find_csv_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        if file_type.is_dir() {
            if should_skip_dir(&path) {
                continue;
            }
            find_csv_files_inner(&path, depth + 1, max_depth, out);
            continue;
        }

        if file_type.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                == Some(true)
        {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_table;

    #[test]
    fn rejects_missing_and_non_csv_paths() {
        let missing = validate_csv_path(Path::new("definitely/not/here.csv")).unwrap_err();
        assert_eq!(missing.exit_code(), 2);

        let path = std::env::temp_dir().join(format!("distfit-{}-data.txt", std::process::id()));
        fs::write(&path, "x\n1\n").unwrap();
        let err = validate_csv_path(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.to_string().contains("Expected a .csv file"));
    }

    #[test]
    fn single_numeric_column_is_chosen_without_prompt() {
        let table = read_table("name,x\na,1\nb,2\n".as_bytes()).unwrap();
        assert_eq!(prompt_for_column(&table).unwrap(), "x");
    }

    #[test]
    fn table_without_numeric_columns_is_a_data_error() {
        let table = read_table("name\na\nb\n".as_bytes()).unwrap();
        assert_eq!(prompt_for_column(&table).unwrap_err().exit_code(), 3);
    }

    fn two_columns() -> Table {
        read_table("a,b,label\n1,2,x\n3,4,y\n".as_bytes()).unwrap()
    }

    #[test]
    fn column_chosen_by_number_or_name() {
        let table = two_columns();
        let mut out = Vec::new();
        let by_number = choose_column(&table, &mut "2\n".as_bytes(), &mut out).unwrap();
        assert_eq!(by_number, "b");

        let mut out = Vec::new();
        let by_name = choose_column(&table, &mut "9\nzzz\nA\n".as_bytes(), &mut out).unwrap();
        assert_eq!(by_name, "a");
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Invalid choice: 9"));
        assert!(shown.contains("Unknown numeric column: zzz"));
        assert!(!shown.contains("label"));
    }

    #[test]
    fn quit_and_end_of_input_are_usage_errors() {
        let table = two_columns();
        let canceled = choose_column(&table, &mut "q\n".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_eq!(canceled.exit_code(), 2);
        assert_eq!(canceled.to_string(), "Canceled.");

        let eof = choose_column(&table, &mut "".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_eq!(eof.exit_code(), 2);
        assert!(eof.to_string().contains("-c <name>"));
    }

    #[test]
    fn discovery_finds_nested_csv_and_skips_build_dirs() {
        let root = std::env::temp_dir().join(format!("distfit-{}-discover", std::process::id()));
        fs::create_dir_all(root.join("data/nested")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join("data/nested/b.CSV"), "x\n1\n").unwrap();
        fs::write(root.join("a.csv"), "x\n1\n").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join("target/skip.csv"), "x\n1\n").unwrap();

        let found = find_csv_files(&root, CSV_SEARCH_DEPTH);
        fs::remove_dir_all(&root).ok();

        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.CSV"]);
    }
}
