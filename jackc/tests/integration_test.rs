use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the project root directory
fn get_project_root() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    PathBuf::from(manifest_dir)
}

/// Find all .jack files in the test_data directory recursively
fn find_jack_files() -> Vec<PathBuf> {
    let mut jack_files = Vec::new();
    let project_root = get_project_root();
    let test_dir = project_root.join("test_data");

    if !test_dir.exists() {
        return jack_files;
    }

    visit_dirs(&test_dir, &mut jack_files).ok();
    jack_files.sort();
    jack_files
}

fn visit_dirs(dir: &Path, jack_files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                visit_dirs(&path, jack_files)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("jack") {
                jack_files.push(path);
            }
        }
    }
    Ok(())
}

/// Test every `.jack` file under `test_data/` by comparing compiled VM output
/// against a sibling `.expected.vm` file, the same way the sibling crates'
/// integration tests compare against their own `test_data/` fixtures.
#[test]
fn test_all_jack_files() {
    let jack_files = find_jack_files();
    if jack_files.is_empty() {
        // No fixtures committed (Nand2Tetris course test classes aren't
        // redistributable); this harness runs against a local test_data/
        // checkout when present.
        return;
    }

    let project_root = get_project_root();
    let mut failures = Vec::new();

    for jack_file in &jack_files {
        let expected_file = jack_file.with_extension("expected.vm");
        if !expected_file.exists() {
            continue;
        }

        let output = Command::new("cargo")
            .arg("run")
            .arg("--release")
            .arg("--quiet")
            .arg("--")
            .arg(jack_file)
            .current_dir(&project_root)
            .output()
            .expect("failed to run jackc");

        if !output.status.success() {
            failures.push(format!(
                "{}: {}",
                jack_file.display(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let generated = jack_file.with_extension("vm");
        let actual = fs::read_to_string(&generated).unwrap_or_default();
        let expected = fs::read_to_string(&expected_file).unwrap();
        if actual != expected {
            failures.push(format!("{}: output mismatch", jack_file.display()));
        }
        fs::remove_file(&generated).ok();
    }

    assert!(failures.is_empty(), "failures: {failures:#?}");
}

/// Drives the built binary end-to-end against a small two-class program
/// written to a temp directory, without depending on any external fixtures.
#[test]
fn compiles_a_directory_of_classes_via_the_binary() {
    let dir = tempfile::tempdir().unwrap();

    fs::write(
        dir.path().join("Main.jack"),
        "class Main {\n  function void main() {\n    var Point p;\n    let p = Point.new(3, 4);\n    do Output.printInt(p.getX());\n    return;\n  }\n}\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("Point.jack"),
        "class Point {\n  field int x, y;\n  constructor Point new(int ax, int ay) {\n    let x = ax;\n    let y = ay;\n    return this;\n  }\n  method int getX() {\n    return x;\n  }\n}\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_jackc"))
        .arg(dir.path())
        .output()
        .expect("failed to run jackc binary");

    assert!(
        output.status.success(),
        "jackc failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let main_vm = fs::read_to_string(dir.path().join("Main.vm")).unwrap();
    assert!(main_vm.contains("call Point.new 2"));
    assert!(main_vm.contains("call Point.getX 1"));
    assert!(main_vm.contains("call Output.printInt 1"));

    let point_vm = fs::read_to_string(dir.path().join("Point.vm")).unwrap();
    assert!(point_vm.contains("function Point.new 0"));
    assert!(point_vm.contains("function Point.getX 0"));
}
