use std::{fs, path::PathBuf};

use tempfile::tempdir;

use quire::{Format, tag::Tag};
use quire_cli::{Args, run};

/// Collects all .quire files from a directory
fn collect_quire_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("quire")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// The demos directory at the workspace root
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &std::path::Path, output: &std::path::Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        tags: Vec::new(),
        format: None,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_quire_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        for format in [Format::Notation, Format::Text] {
            let output_filename = format!(
                "{}.{format}",
                demo_path.file_stem().unwrap().to_string_lossy()
            );
            let output_path = temp_dir.path().join(output_filename);

            let args = Args {
                format: Some(format),
                ..args(demo_path, &output_path)
            };

            match run(&args) {
                Ok(()) => assert!(output_path.exists(), "{} not written", output_path.display()),
                Err(e) => failed_demos.push((demo_path.clone(), e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_quire_files(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.quire",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists(), "failed run must not write output");
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_tag_filter_and_text_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("book.txt");

    let args = Args {
        tags: vec![Tag::new("ops").expect("valid tag")],
        format: Some(Format::Text),
        ..args(&demos_path().join("book.quire"), &output_path)
    };
    run(&args).expect("book demo should compile");

    let text = fs::read_to_string(&output_path).expect("output written");
    assert_eq!(text, "== The Book\n\n=== Usage\n\nRun `make``install`\n");
}

#[test]
fn e2e_config_file_selects_format() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[filter]\ntags = [\"draft\"]\n\n[output]\nformat = \"text\"\n",
    )
    .expect("config written");
    let output_path = temp_dir.path().join("book.txt");

    let args = Args {
        config: Some(config_path.to_string_lossy().to_string()),
        ..args(&demos_path().join("book.quire"), &output_path)
    };
    run(&args).expect("book demo should compile");

    let text = fs::read_to_string(&output_path).expect("output written");
    assert_eq!(text, "== The Book\n\nOpening words\n");
}
