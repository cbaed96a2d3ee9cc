use std::{fs, path::PathBuf};

use tempfile::tempdir;

use modeltraits_cli::{Args, run};

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo documents live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &PathBuf, output: Option<PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.map(|path| path.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_toml_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!("{}.txt", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        if let Err(e) = run(&args_for(demo_path, Some(output_path.clone()))) {
            failed_demos.push((demo_path.clone(), e));
            continue;
        }

        let summary = fs::read_to_string(&output_path).expect("Failed to read summary");
        assert!(
            summary.starts_with("model traits (image class"),
            "Unexpected summary for {}: {summary}",
            demo_path.display()
        );
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

    let error_demos = collect_toml_files(demos_path().join("errors"));
    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpected_successes = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join("out.txt");

        if run(&args_for(demo_path, Some(output_path.clone()))).is_ok() {
            unexpected_successes.push(demo_path.clone());
        }
        assert!(
            !output_path.exists(),
            "No summary may be written for {}",
            demo_path.display()
        );
    }

    if !unexpected_successes.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpected_successes {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpected_successes.len()
        );
    }
}

#[test]
fn e2e_inlet_velocity_summary() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("inlet.txt");

    run(&args_for(
        &demos_path().join("inlet_velocity.toml"),
        Some(output_path.clone()),
    ))
    .expect("Failed to run");

    let summary = fs::read_to_string(&output_path).expect("Failed to read summary");
    assert_eq!(
        summary,
        concat!(
            "model traits (image class \"fluids\")\n",
            "case \"case1\"\n",
            "  category \"Inlet\"\n",
            "    bc \"velocity\" on {(2, 7)} = function<scalar, rank 0, space-time>(\"$x + $t\")\n",
        )
    );
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[values]\nliteral_matrix_with_function = false\n")
        .expect("Failed to write config");
    let output_path = temp_dir.path().join("heat.txt");

    let mut args = args_for(
        &demos_path().join("heat_transfer.toml"),
        Some(output_path.clone()),
    );
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Failed to run");

    let summary = fs::read_to_string(&output_path).expect("Failed to read summary");
    assert!(summary.contains("bc \"conductivity\""));
    assert!(!summary.contains("matrix ["));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(&temp_dir.path().join("absent.toml"), None);

    assert!(run(&args).is_err());
}
