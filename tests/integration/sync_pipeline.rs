//! End-to-end runs of the sync service over real files.

use super::test_utils::{backups_in, read, Fixture};
use prefsync::baseline::FileBaselineSource;
use prefsync::directive::ParseOptions;
use prefsync::error::SyncError;
use prefsync::profile::{BackupStamp, FsPreferenceStorage};
use prefsync::select::PresetSelector;
use prefsync::sync::{SyncReport, SyncRequest, SyncService};

const STAMP: BackupStamp = BackupStamp(1_700_000_000);

fn request(fixture: &Fixture, dry_run: bool, backup: bool) -> SyncRequest {
    SyncRequest {
        profiles_root: fixture.root(),
        preference_file: "user.js".to_string(),
        parse_options: ParseOptions::default(),
        dry_run,
        backup,
        stamp: STAMP,
    }
}

fn all_yes() -> PresetSelector {
    PresetSelector {
        all: true,
        assume_yes: true,
        ..Default::default()
    }
}

fn run(
    fixture: &Fixture,
    selector: &PresetSelector,
    request: &SyncRequest,
) -> Result<SyncReport, SyncError> {
    let source = FileBaselineSource::new(fixture.baseline());
    let storage = FsPreferenceStorage::new();
    SyncService::new(&source, &storage, selector).run(request)
}

#[test]
fn test_sync_all_profiles_overrides_and_appends() {
    let fixture = Fixture::new();
    let work = fixture.add_profile(
        "a1b2.work",
        Some("// my settings\nuser_pref(\"browser.startup.page\", 3);\nuser_pref(\"mine\", 1);\n"),
    );
    let empty = fixture.add_profile("z9y8.empty", Some(""));

    let report = run(&fixture, &all_yes(), &request(&fixture, false, true)).unwrap();

    assert_eq!(report.directive_count, 3);
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].profile.name, "a1b2.work");
    assert_eq!(report.outcomes[0].overridden_count, 1);
    assert_eq!(report.outcomes[0].inserted_count, 2);
    assert_eq!(report.outcomes[1].overridden_count, 0);
    assert_eq!(report.outcomes[1].inserted_count, 3);
    assert!(report.outcomes.iter().all(|o| o.written));

    assert_eq!(
        read(&work.join("user.js")),
        "// my settings\n\
         pref(\"browser.startup.page\", 0);\n\
         user_pref(\"mine\", 1);\n\
         pref(\"privacy.resistFingerprinting\", true); // 4501\n\
         pref(\"network.prefetch-next\", false);\n"
    );
    assert_eq!(
        read(&empty.join("user.js")),
        "pref(\"browser.startup.page\", 0);\n\
         pref(\"privacy.resistFingerprinting\", true); // 4501\n\
         pref(\"network.prefetch-next\", false);\n"
    );
    assert!(!read(&empty.join("user.js")).contains("_prefsync.marker"));
}

#[test]
fn test_backups_share_one_stamp() {
    let fixture = Fixture::new();
    let a = fixture.add_profile("a", Some("user_pref(\"x\", 1);\n"));
    let b = fixture.add_profile("b", Some("# b\n"));

    let report = run(&fixture, &all_yes(), &request(&fixture, false, true)).unwrap();

    assert_eq!(backups_in(&a), vec![a.join("user.js.1700000000.bak")]);
    assert_eq!(backups_in(&b), vec![b.join("user.js.1700000000.bak")]);
    assert_eq!(read(&a.join("user.js.1700000000.bak")), "user_pref(\"x\", 1);\n");
    assert_eq!(
        report.outcomes[1].backup.as_deref(),
        Some(b.join("user.js.1700000000.bak").as_path())
    );
}

#[test]
fn test_no_backup_when_disabled() {
    let fixture = Fixture::new();
    let a = fixture.add_profile("a", Some(""));
    run(&fixture, &all_yes(), &request(&fixture, false, false)).unwrap();
    assert!(backups_in(&a).is_empty());
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let fixture = Fixture::new();
    let original = "user_pref(\"browser.startup.page\", 3);\n";
    let a = fixture.add_profile("a", Some(original));

    // Dry runs never ask for confirmation, so a selector that would decline is fine
    let selector = PresetSelector {
        all: true,
        ..Default::default()
    };
    let report = run(&fixture, &selector, &request(&fixture, true, true)).unwrap();

    assert!(report.dry_run);
    let outcome = &report.outcomes[0];
    assert!(!outcome.written);
    assert!(outcome.changed);
    assert_eq!(outcome.overridden_count, 1);
    assert_eq!(outcome.inserted_count, 2);
    let diff = outcome.diff.as_deref().unwrap();
    assert!(diff.contains("-user_pref(\"browser.startup.page\", 3);"));
    assert!(diff.contains("+pref(\"network.prefetch-next\", false);"));

    assert_eq!(read(&a.join("user.js")), original);
    assert!(backups_in(&a).is_empty());
}

#[test]
fn test_missing_preference_file_aborts_whole_run() {
    let fixture = Fixture::new();
    let present = fixture.add_profile("a", Some("# untouched\n"));
    fixture.add_profile("b", None);

    let err = run(&fixture, &all_yes(), &request(&fixture, false, true)).unwrap_err();

    match err {
        SyncError::MissingFile(path) => assert!(path.ends_with("b/user.js")),
        other => panic!("expected MissingFile, got {:?}", other),
    }
    assert_eq!(read(&present.join("user.js")), "# untouched\n");
    assert!(backups_in(&present).is_empty());
}

#[test]
fn test_declined_confirmation_writes_nothing() {
    let fixture = Fixture::new();
    let a = fixture.add_profile("a", Some("# keep\n"));
    let selector = PresetSelector {
        all: true,
        ..Default::default()
    };

    let report = run(&fixture, &selector, &request(&fixture, false, true)).unwrap();

    assert!(report.cancelled);
    assert!(report.outcomes.is_empty());
    assert_eq!(read(&a.join("user.js")), "# keep\n");
}

#[test]
fn test_single_profile_by_name() {
    let fixture = Fixture::new();
    let a = fixture.add_profile("a", Some("# a\n"));
    let b = fixture.add_profile("b", Some("# b\n"));
    let selector = PresetSelector {
        profile: Some("b".to_string()),
        assume_yes: true,
        ..Default::default()
    };

    let report = run(&fixture, &selector, &request(&fixture, false, false)).unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(read(&a.join("user.js")), "# a\n");
    assert!(read(&b.join("user.js")).starts_with("# b\npref("));
}

#[test]
fn test_second_run_is_idempotent() {
    let fixture = Fixture::new();
    let a = fixture.add_profile("a", Some("# top\nuser_pref(\"browser.startup.page\", 3);\n"));

    let first = run(&fixture, &all_yes(), &request(&fixture, false, false)).unwrap();
    assert!(first.outcomes[0].changed);
    let after_first = read(&a.join("user.js"));
    let report = run(&fixture, &all_yes(), &request(&fixture, false, false)).unwrap();

    assert_eq!(report.outcomes[0].overridden_count, 3);
    assert_eq!(report.outcomes[0].inserted_count, 0);
    assert!(!report.outcomes[0].changed);
    assert_eq!(read(&a.join("user.js")), after_first);
}

#[test]
fn test_empty_baseline_is_not_an_error() {
    let fixture = Fixture::new();
    std::fs::write(fixture.baseline(), "// nothing to see\n").unwrap();
    let a = fixture.add_profile("a", Some("user_pref(\"x\", 1);\n"));

    let report = run(&fixture, &all_yes(), &request(&fixture, false, false)).unwrap();

    assert_eq!(report.directive_count, 0);
    assert_eq!(report.total_overridden(), 0);
    assert_eq!(report.total_inserted(), 0);
    assert_eq!(read(&a.join("user.js")), "user_pref(\"x\", 1);\n");
}

#[test]
fn test_missing_baseline_fails_before_selection() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.baseline()).unwrap();
    // No profiles exist either; the baseline error must win
    let err = run(&fixture, &all_yes(), &request(&fixture, false, false)).unwrap_err();
    assert!(matches!(err, SyncError::MissingFile(p) if p.ends_with("baseline.js")));
}

#[test]
fn test_no_profiles_is_selection_error() {
    let fixture = Fixture::new();
    let err = run(&fixture, &all_yes(), &request(&fixture, false, false)).unwrap_err();
    assert!(matches!(err, SyncError::Selection(_)));
}
