//! The generation driver.
//!
//! Compiles every scanner and parser specification, then emits the cross
//! product backends x scanners x parsers, refusing to clobber existing
//! files unless forced.

use std::fs;
use std::path::Path;
use std::time::Instant;

use sprig::codegen::{self, CodegenOptions, Job};
use sprig::spec::{ParserSpec, ScannerSpec};
use sprig::{ParseTable, ScannerDfa};

use crate::cli::Cli;
use crate::config::Settings;

/// Documented exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    InvalidArgs = 1,
    InvalidScanner = 2,
    InvalidParser = 3,
    FailGenerate = 4,
}

/// Fold explicitly given command-line flags over `settings`.
pub fn merge_cli(settings: &mut Settings, cli: &Cli) {
    if let Some(encoding) = cli.encoding {
        settings.encoding = encoding.into();
    }
    if let Some(policy) = cli.match_policy {
        settings.match_policy = policy.into();
    }
    if cli.force {
        settings.force = true;
    }
    if !cli.generate.is_empty() {
        settings.generate = cli.generate.clone();
    }
    if let Some(output) = &cli.output {
        settings.output = output.clone();
    }
    if !cli.parsers.is_empty() {
        settings.parsers = cli.parsers.clone();
    }
    if !cli.scanners.is_empty() {
        settings.scanners = cli.scanners.clone();
    }
    if cli.time {
        settings.time = true;
    }
    if cli.verbose {
        settings.verbose = true;
    }
}

/// Run the whole load/compile/emit flow.
pub fn run(settings: &Settings) -> Exit {
    let mut scanners: Vec<ScannerDfa> = Vec::new();
    for path in &settings.scanners {
        match compile_scanner(path, settings) {
            Ok(scanner) => scanners.push(scanner),
            Err(message) => {
                eprintln!("failed to create scanner:\n{message}");
                return Exit::InvalidScanner;
            }
        }
    }

    let mut parsers: Vec<ParseTable> = Vec::new();
    for path in &settings.parsers {
        match compile_parser(path, settings) {
            Ok(parser) => parsers.push(parser),
            Err(message) => {
                eprintln!("failed to create parser:\n{message}");
                return Exit::InvalidParser;
            }
        }
    }

    let mut backends = Vec::new();
    for language in &settings.generate {
        match codegen::backend(language) {
            Ok(backend) => backends.push(backend),
            Err(err) => {
                eprintln!("{err}");
                return Exit::InvalidArgs;
            }
        }
    }

    let scanner_jobs: Vec<Option<&ScannerDfa>> = if scanners.is_empty() {
        vec![None]
    } else {
        scanners.iter().map(Some).collect()
    };
    let parser_jobs: Vec<Option<&ParseTable>> = if parsers.is_empty() {
        vec![None]
    } else {
        parsers.iter().map(Some).collect()
    };

    for backend in &backends {
        for &scanner in &scanner_jobs {
            for &parser in &parser_jobs {
                let mut target = backend.language().to_owned();
                let mut base = settings.output.clone();
                if let Some(scanner) = scanner {
                    target.push_str(&format!("_{}", scanner.name()));
                    base.push_str(&format!("_{}", scanner.name()));
                }
                if let Some(parser) = parser {
                    target.push_str(&format!("_{}", parser.name()));
                    base.push_str(&format!("_{}", parser.name()));
                }

                if settings.verbose {
                    println!("Generating {target} code...");
                }
                let started = Instant::now();
                let options = CodegenOptions {
                    base,
                    encoding: settings.encoding,
                    match_policy: settings.match_policy,
                };
                let job = Job {
                    scanner,
                    parser,
                    options: &options,
                };
                let files = match codegen::generate(backend.as_ref(), &job) {
                    Ok(files) => files,
                    Err(err) => {
                        eprintln!("failed to generate program:\n{err}");
                        return Exit::FailGenerate;
                    }
                };
                if settings.time {
                    println!("Elapsed time ({target} generator): {:?}", started.elapsed());
                }

                if let Err(message) = write_files(&files, settings) {
                    eprintln!("{message}");
                    return Exit::FailGenerate;
                }
            }
        }
    }

    Exit::Success
}

fn compile_scanner(path: &Path, settings: &Settings) -> Result<ScannerDfa, String> {
    let text = fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let spec =
        ScannerSpec::from_json(&text).map_err(|err| format!("{}: {err}", path.display()))?;

    if settings.verbose {
        println!("Compiling {} scanner specification...", spec.name);
    }
    let started = Instant::now();
    let scanner = spec.compile().map_err(|err| err.to_string())?;
    if settings.time {
        println!(
            "Elapsed time ({} scanner): {:?}",
            scanner.name(),
            started.elapsed()
        );
    }
    Ok(scanner)
}

fn compile_parser(path: &Path, settings: &Settings) -> Result<ParseTable, String> {
    let text = fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let spec = ParserSpec::from_json(&text).map_err(|err| format!("{}: {err}", path.display()))?;

    if settings.verbose {
        println!("Compiling {} parser specification...", spec.name);
    }
    let started = Instant::now();
    let parser = spec.compile().map_err(|err| err.to_string())?;
    if settings.time {
        println!(
            "Elapsed time ({} parser): {:?}",
            parser.name(),
            started.elapsed()
        );
    }
    Ok(parser)
}

fn write_files(
    files: &indexmap::IndexMap<String, String>,
    settings: &Settings,
) -> Result<(), String> {
    for (name, content) in files {
        let path = Path::new(name);
        if path.exists() && !settings.force {
            if settings.verbose {
                println!("{name} already exists; not overwriting.");
            }
            continue;
        }
        if settings.verbose {
            println!("Outputting {name} to disk...");
        }
        fs::write(path, content).map_err(|err| format!("{name}: {err}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn temp_settings(dir: &Path) -> Settings {
        Settings {
            output: dir.join("out").to_string_lossy().into_owned(),
            ..Settings::default()
        }
    }

    fn write_scanner_spec(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("scanner.json");
        let text = indoc! {r#"
            {
                "name": "words",
                "expressions": {
                    "word": ["\\[", "a", "\\-", "z", "\\]", "\\+"]
                }
            }
        "#};
        fs::write(&path, text).unwrap();
        path
    }

    fn write_parser_spec(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("parser.json");
        let text = indoc! {r#"
            {
                "name": "list",
                "expressions": {
                    "<list>": [["word", "<list>"], []]
                },
                "start": "<list>"
            }
        "#};
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn generates_the_cross_product() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = temp_settings(dir.path());
        settings.scanners = vec![write_scanner_spec(dir.path())];
        settings.parsers = vec![write_parser_spec(dir.path())];
        settings.generate = vec!["c".to_owned(), "python".to_owned()];

        assert_eq!(run(&settings), Exit::Success);

        let c_out = dir.path().join("out_words_list.c");
        let py_out = dir.path().join("out_words_list.py");
        assert!(c_out.exists());
        assert!(py_out.exists());
        let content = fs::read_to_string(c_out).unwrap();
        assert!(content.contains("words_next_token"));
        assert!(content.contains("list_parse"));
    }

    #[test]
    fn scanner_only_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = temp_settings(dir.path());
        settings.scanners = vec![write_scanner_spec(dir.path())];
        settings.generate = vec!["python".to_owned()];

        assert_eq!(run(&settings), Exit::Success);
        assert!(dir.path().join("out_words.py").exists());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = temp_settings(dir.path());
        settings.scanners = vec![write_scanner_spec(dir.path())];
        settings.generate = vec!["python".to_owned()];

        let out = dir.path().join("out_words.py");
        fs::write(&out, "sentinel").unwrap();

        assert_eq!(run(&settings), Exit::Success);
        assert_eq!(fs::read_to_string(&out).unwrap(), "sentinel");

        settings.force = true;
        assert_eq!(run(&settings), Exit::Success);
        assert_ne!(fs::read_to_string(&out).unwrap(), "sentinel");
    }

    #[test]
    fn invalid_scanner_specification_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        // `\\(` is the grouping operator, left unbalanced here
        fs::write(
            &path,
            r#"{"name": "bad", "expressions": {"tok": ["\\(", "a"]}}"#,
        )
        .unwrap();

        let mut settings = temp_settings(dir.path());
        settings.scanners = vec![path];
        assert_eq!(run(&settings), Exit::InvalidScanner);
    }

    #[test]
    fn invalid_parser_specification_exits_three() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"name": "bad", "expressions": {"<a>": [["x"]]}, "start": "<b>"}"#,
        )
        .unwrap();

        let mut settings = temp_settings(dir.path());
        settings.parsers = vec![path];
        assert_eq!(run(&settings), Exit::InvalidParser);
    }

    #[test]
    fn unknown_backend_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = temp_settings(dir.path());
        settings.scanners = vec![write_scanner_spec(dir.path())];
        settings.generate = vec!["fortran".to_owned()];
        assert_eq!(run(&settings), Exit::InvalidArgs);
    }

    #[test]
    fn generation_without_inputs_exits_four() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = temp_settings(dir.path());
        settings.generate = vec!["c".to_owned()];
        assert_eq!(run(&settings), Exit::FailGenerate);
    }

    #[test]
    fn no_backends_is_a_quiet_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = temp_settings(dir.path());
        settings.scanners = vec![write_scanner_spec(dir.path())];
        assert_eq!(run(&settings), Exit::Success);
    }
}
