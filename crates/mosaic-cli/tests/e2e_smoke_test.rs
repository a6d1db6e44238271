use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use mosaic_cli::{Args, run};

/// Collects all .toml scenes from a directory
fn collect_scene_files(dir: PathBuf) -> Vec<PathBuf> {
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

    files.sort();
    files
}

/// Demo scenes live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        selected: Vec::new(),
        hovered: None,
        counts: Vec::new(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_scene_files(demos_path());
    assert!(!demos.is_empty(), "No demo scenes found in demos/");

    let mut failed = Vec::new();

    for demo_path in &demos {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if let Err(e) = run(&args_for(demo_path, &output_path)) {
            failed.push((demo_path.clone(), e));
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo scenes that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo scene(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_scene_files(demos_path().join("errors"));
    assert!(!demos.is_empty(), "No error scenes found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError scenes that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error scene(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_interaction_state_reaches_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("quadrants.toml");
    let output = temp_dir.path().join("quadrants.svg");

    let args = Args {
        selected: vec!["north_west".to_string()],
        hovered: Some("south_east".to_string()),
        ..args_for(&input, &output)
    };
    run(&args).expect("Failed to render quadrants");

    let svg = fs::read_to_string(&output).unwrap();
    assert_eq!(svg.matches(r#"data-region="north_west""#).count(), 2);
    assert_eq!(svg.matches(r#"data-region="south_east""#).count(), 2);
    assert!(svg.contains(r#"data-layer="hover""#));
}

#[test]
fn e2e_counts_drive_indexed_fill() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("choropleth.toml");
    let output = temp_dir.path().join("choropleth.svg");

    let args = Args {
        counts: vec![("a".to_string(), 3)],
        ..args_for(&input, &output)
    };
    run(&args).expect("Failed to render choropleth");

    let svg = fs::read_to_string(&output).unwrap();
    // The hidden legend is never painted.
    assert!(!svg.contains(r#"data-region="legend""#));
    assert!(!svg.contains("clicks"));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(
        &temp_dir.path().join("missing.toml"),
        &temp_dir.path().join("out.svg"),
    );
    assert!(run(&args).is_err());
}
