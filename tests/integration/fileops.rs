//! Tree operations on real temp directories, with the exclusion-symmetry
//! property at the center: a path kept out of a backup must survive pruning,
//! and a path captured into a backup must be prunable.

use appup_cli::config::UpdaterConfig;
use appup_cli::fsops::{ExclusionSet, FileService};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, relative).unwrap();
}

/// Path shapes that exercise every matching rule: builtins, configured
/// entries, near-miss prefixes, dotfiles, and nesting.
const SAMPLE_PATHS: &[&str] = &[
    "app/Main.php",
    "app/Http/Kernel.php",
    ".env",
    ".env.example",
    ".git/HEAD",
    "vendor/autoload.php",
    "vendor-tools/helper.php",
    "storage/logs/app.log",
    "storage-old/kept.txt",
    "database/database.sqlite",
    "database/migrations/0001_init.php",
    "node_modules/left-pad/index.js",
    "public/.htaccess",
    "public/index.php",
    "resources/views/app.blade.php",
];

const EXCLUSION_CONFIGS: &[&[&str]] = &[
    &[],
    &["node_modules"],
    &["public/.htaccess", "resources"],
    &["node_modules", "app/Http", ".env.example"],
];

#[test]
fn backup_set_and_prune_survivors_partition_every_tree() {
    for configured in EXCLUSION_CONFIGS {
        let configured: Vec<String> = configured.iter().map(ToString::to_string).collect();
        let config = UpdaterConfig {
            exclude_items: configured.clone(),
            ..Default::default()
        };
        let service = FileService::new(&config);

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("dest");
        let source = temp.path().join("source");
        fs::create_dir_all(&source).unwrap();
        for path in SAMPLE_PATHS {
            write(&dest, path);
        }

        let backed_up: BTreeSet<String> = service
            .files_to_backup(&dest)
            .unwrap()
            .into_iter()
            .map(|(_, rel)| rel.to_string_lossy().replace('\\', "/"))
            .collect();

        // Prune against an empty source: every unprotected file goes
        service.prune_removed(&source, &dest).unwrap();

        let survivors: BTreeSet<String> = walkdir::WalkDir::new(&dest)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(&dest)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();

        for path in SAMPLE_PATHS {
            let captured = backed_up.contains(*path);
            let survived = survivors.contains(*path);
            assert_ne!(
                captured, survived,
                "exclusions {configured:?}: {path} must be either captured or protected, \
                 got captured={captured} survived={survived}"
            );
        }
    }
}

#[test]
fn replace_honors_the_same_exclusions_as_backup() {
    let config = UpdaterConfig {
        exclude_items: vec!["node_modules".to_string()],
        ..Default::default()
    };
    let service = FileService::new(&config);

    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    let dest = temp.path().join("dest");

    // The release archive tries to ship over protected paths
    write(&source, ".env");
    write(&source, "node_modules/left-pad/index.js");
    write(&source, "app/Main.php");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join(".env"), "SECRET=1").unwrap();

    service.replace_tree(&source, &dest).unwrap();

    assert_eq!(fs::read_to_string(dest.join(".env")).unwrap(), "SECRET=1");
    assert!(!dest.join("node_modules").exists());
    assert!(dest.join("app/Main.php").exists());
}

#[test]
fn full_replace_then_prune_mirrors_the_source_tree() {
    let service = FileService::with_exclusions(ExclusionSet::default());

    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    let dest = temp.path().join("dest");
    write(&source, "app/Main.php");
    write(&source, "app/NewFile.php");
    write(&source, "public/index.php");
    write(&dest, "app/Main.php");
    write(&dest, "app/Legacy.php");
    write(&dest, "old-module/handler.php");
    write(&dest, "public/index.php");

    service.replace_tree(&source, &dest).unwrap();
    service.prune_removed(&source, &dest).unwrap();

    assert!(dest.join("app/NewFile.php").exists());
    assert!(!dest.join("app/Legacy.php").exists());
    assert!(!dest.join("old-module").exists(), "emptied directory must be swept");
    assert!(dest.join("public/index.php").exists());
}

#[test]
fn critical_directories_survive_the_empty_directory_sweep() {
    let service = FileService::with_exclusions(ExclusionSet::new(&["keepme".to_string()]));

    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    let dest = temp.path().join("dest");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(dest.join("bootstrap/cache")).unwrap();
    fs::create_dir_all(dest.join("emptied/now")).unwrap();

    service.prune_removed(&source, &dest).unwrap();

    assert!(dest.join("bootstrap/cache").exists(), "critical dir must survive while empty");
    assert!(!dest.join("emptied").exists());
}
