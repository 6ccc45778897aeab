//! Unit tests for the sharing engine.

use crate::clipboard::memory::MemoryClipboard;
use crate::markers::{MarkerRecord, RegionId, Rgba, WorldPoint};
use crate::store::memory::MemoryMarkerStore;

use super::*;

#[derive(Default)]
struct RecordingNotifier {
    messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Answers every prompt the same way and remembers what it was asked.
struct ScriptedPrompt {
    answer: bool,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    fn yes() -> Self {
        Self {
            answer: true,
            asked: Vec::new(),
        }
    }

    fn no() -> Self {
        Self {
            answer: false,
            asked: Vec::new(),
        }
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answer
    }
}

type TestEngine = SharingEngine<MemoryMarkerStore, MemoryClipboard, RecordingNotifier>;

fn engine(store: MemoryMarkerStore, clipboard: MemoryClipboard) -> TestEngine {
    SharingEngine::new(store, clipboard, RecordingNotifier::default())
}

fn tile(region: RegionId, x: i32, y: i32) -> MarkerRecord {
    MarkerRecord::new(region, x, y, 0)
}

fn last_message(engine: &TestEngine) -> &str {
    engine
        .notifier()
        .messages
        .last()
        .map(String::as_str)
        .unwrap_or_default()
}

fn clipboard_with(records: &[MarkerRecord]) -> MemoryClipboard {
    MemoryClipboard::holding(&serialize_records(records).unwrap())
}

// Export tests
#[test]
fn test_export_concatenates_regions_in_given_order() {
    let store = MemoryMarkerStore::default()
        .with_region(1, vec![tile(1, 0, 0), tile(1, 1, 1)])
        .with_region(2, vec![tile(2, 5, 5)]);
    let mut engine = engine(store, MemoryClipboard::default());

    let outcome = engine.export(&[2, 1]);

    assert_eq!(outcome, Outcome::Exported { count: 3 });
    let exported = parse_records(engine.clipboard().contents.as_deref().unwrap()).unwrap();
    assert_eq!(exported, vec![tile(2, 5, 5), tile(1, 0, 0), tile(1, 1, 1)]);
    assert_eq!(last_message(&engine), "3 BA Tiles were copied to your clipboard.");
}

#[test]
fn test_export_ignores_regions_outside_active_set() {
    let store = MemoryMarkerStore::default()
        .with_region(1, vec![tile(1, 0, 0)])
        .with_region(9, vec![tile(9, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());

    assert_eq!(engine.export(&[1]), Outcome::Exported { count: 1 });
}

#[test]
fn test_export_reads_repeated_region_once() {
    let store = MemoryMarkerStore::default().with_region(7, vec![tile(7, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());

    assert_eq!(engine.export(&[7, 7]), Outcome::Exported { count: 1 });
    let exported = parse_records(engine.clipboard().contents.as_deref().unwrap()).unwrap();
    assert_eq!(exported, vec![tile(7, 0, 0)]);
}

#[test]
fn test_export_with_no_records_leaves_clipboard_alone() {
    let store = MemoryMarkerStore::default().with_region(3, vec![tile(3, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::holding("previous"));

    let outcome = engine.export(&[1, 2]);

    assert_eq!(outcome, Outcome::NothingToExport);
    assert_eq!(engine.clipboard().contents.as_deref(), Some("previous"));
    assert!(engine.store().writes.is_empty());
    assert_eq!(last_message(&engine), "You have no BA Tiles to export.");
}

#[test]
fn test_export_with_no_regions_is_nothing_to_export() {
    let mut engine = engine(MemoryMarkerStore::default(), MemoryClipboard::default());
    assert_eq!(engine.export(&[]), Outcome::NothingToExport);
    assert!(engine.clipboard().contents.is_none());
}

#[test]
fn test_export_reports_unwritable_clipboard() {
    let store = MemoryMarkerStore::default().with_region(1, vec![tile(1, 0, 0)]);
    let clipboard = MemoryClipboard {
        unwritable: true,
        ..Default::default()
    };
    let mut engine = engine(store, clipboard);

    assert_eq!(engine.export(&[1]), Outcome::ClipboardUnwritable);
    assert_eq!(last_message(&engine), "Unable to write to system clipboard.");
}

#[test]
fn test_export_reports_store_failure() {
    let mut store = MemoryMarkerStore::default().with_region(1, vec![tile(1, 0, 0)]);
    store.fail_reads_for = Some(1);
    let mut engine = engine(store, MemoryClipboard::default());

    assert_eq!(engine.export(&[1]), Outcome::StoreUnavailable);
    assert!(engine.clipboard().contents.is_none());
}

// Import parse tests
#[test]
fn test_import_empty_clipboard_is_nothing_to_import_without_prompt() {
    let mut engine = engine(MemoryMarkerStore::default(), MemoryClipboard::holding(""));
    let mut prompt = ScriptedPrompt::yes();

    let outcome = engine.import(&mut prompt);

    assert_eq!(outcome, Outcome::NothingToImport);
    assert!(prompt.asked.is_empty());
    assert_eq!(
        last_message(&engine),
        "You do not have any BA Tiles copied in your clipboard."
    );
}

#[test]
fn test_import_missing_clipboard_is_nothing_to_import() {
    let mut engine = engine(MemoryMarkerStore::default(), MemoryClipboard::default());
    assert!(matches!(
        engine.prepare_import(),
        Step::Done(Outcome::NothingToImport)
    ));
}

#[test]
fn test_import_whitespace_clipboard_is_nothing_to_import() {
    let mut engine = engine(MemoryMarkerStore::default(), MemoryClipboard::holding(" \n\t"));
    assert!(matches!(
        engine.prepare_import(),
        Step::Done(Outcome::NothingToImport)
    ));
}

#[test]
fn test_import_empty_list_is_nothing_to_import() {
    let mut engine = engine(MemoryMarkerStore::default(), MemoryClipboard::holding("[]"));
    assert!(matches!(
        engine.prepare_import(),
        Step::Done(Outcome::NothingToImport)
    ));
}

// Malformed text gets the same outcome and message as an empty clipboard.
#[test]
fn test_import_malformed_text_reads_as_nothing_to_import() {
    let mut engine = engine(
        MemoryMarkerStore::default(),
        MemoryClipboard::holding("[{\"regionId\": 1,"),
    );
    let mut prompt = ScriptedPrompt::yes();

    assert_eq!(engine.import(&mut prompt), Outcome::NothingToImport);
    assert!(prompt.asked.is_empty());
    assert_eq!(
        last_message(&engine),
        "You do not have any BA Tiles copied in your clipboard."
    );
}

#[test]
fn test_import_unreadable_clipboard() {
    let clipboard = MemoryClipboard {
        unreadable: true,
        ..Default::default()
    };
    let mut engine = engine(MemoryMarkerStore::default(), clipboard);

    assert_eq!(engine.import(&mut ScriptedPrompt::yes()), Outcome::ClipboardUnreadable);
    assert_eq!(last_message(&engine), "Unable to read system clipboard.");
}

#[test]
fn test_prepare_import_asks_with_candidate_count() {
    let clipboard = clipboard_with(&[tile(1, 0, 0), tile(2, 0, 0)]);
    let mut engine = engine(MemoryMarkerStore::default(), clipboard);

    let Step::Confirm(pending) = engine.prepare_import() else {
        panic!("expected a pending import");
    };
    assert_eq!(pending.candidates().len(), 2);
    assert_eq!(
        pending.prompt_message(),
        "Are you sure you want to import 2 BA Tiles?"
    );
    assert!(engine.notifier().messages.is_empty());
}

#[test]
fn test_declined_import_changes_nothing() {
    let store = MemoryMarkerStore::default().with_region(1, vec![tile(1, 0, 0)]);
    let mut engine = engine(store, clipboard_with(&[tile(1, 9, 9)]));
    let mut prompt = ScriptedPrompt::no();

    let outcome = engine.import(&mut prompt);

    assert_eq!(outcome, Outcome::Declined);
    assert_eq!(prompt.asked.len(), 1);
    assert!(engine.store().writes.is_empty());
    assert_eq!(engine.store().reloads, 0);
    assert!(engine.notifier().messages.is_empty());
}

// Import merge tests
#[test]
fn test_import_merges_new_record_after_existing_duplicate() {
    let existing = tile(100, 5, 5);
    let labelled = MarkerRecord::new(100, 7, 7, 0).with_label("X");
    let store = MemoryMarkerStore::default().with_region(100, vec![existing.clone()]);
    let mut engine = engine(store, clipboard_with(&[existing.clone(), labelled.clone()]));

    let outcome = engine.import(&mut ScriptedPrompt::yes());

    assert_eq!(outcome, Outcome::Imported { count: 2 });
    assert_eq!(engine.store().get(100), &[existing, labelled]);
    assert_eq!(
        last_message(&engine),
        "2 BA Tiles were imported from the clipboard."
    );
}

#[test]
fn test_import_reports_submitted_count_not_added_count() {
    let duplicate = tile(1, 1, 1);
    let store = MemoryMarkerStore::default().with_region(1, vec![duplicate.clone()]);
    let mut engine = engine(store, clipboard_with(&[duplicate.clone(), duplicate]));

    assert_eq!(
        engine.import(&mut ScriptedPrompt::yes()),
        Outcome::Imported { count: 2 }
    );
    assert_eq!(engine.store().get(1).len(), 1);
}

#[test]
fn test_import_partitions_by_region() {
    let candidates = vec![tile(2, 0, 0), tile(1, 0, 0), tile(2, 1, 1), tile(3, 4, 4)];
    let mut engine = engine(MemoryMarkerStore::default(), clipboard_with(&candidates));

    engine.import(&mut ScriptedPrompt::yes());

    for region in [1, 2, 3] {
        let stored = engine.store().get(region);
        assert!(!stored.is_empty());
        assert!(stored.iter().all(|r| r.region_id == region));
    }
    assert_eq!(engine.store().get(2), &[tile(2, 0, 0), tile(2, 1, 1)]);
}

#[test]
fn test_import_only_writes_regions_with_candidates() {
    let store = MemoryMarkerStore::default()
        .with_region(1, vec![tile(1, 0, 0)])
        .with_region(5, vec![tile(5, 0, 0)]);
    let mut engine = engine(store, clipboard_with(&[tile(5, 3, 3), tile(7, 0, 0)]));

    engine.import(&mut ScriptedPrompt::yes());

    assert_eq!(engine.store().writes, vec![5, 7]);
    assert_eq!(engine.store().get(1), &[tile(1, 0, 0)]);
    assert_eq!(engine.store().reloads, 1);
}

#[test]
fn test_import_keeps_existing_records_unchanged() {
    let existing = vec![
        tile(1, 9, 9).with_color(Rgba::opaque(1, 2, 3)),
        tile(1, 0, 0),
        tile(1, 0, 0),
    ];
    let store = MemoryMarkerStore::default().with_region(1, existing.clone());
    let mut engine = engine(store, clipboard_with(&[tile(1, 4, 4), tile(1, 0, 0)]));

    engine.import(&mut ScriptedPrompt::yes());

    let stored = engine.store().get(1);
    assert_eq!(&stored[..existing.len()], existing.as_slice());
    assert_eq!(stored.len(), existing.len() + 1);
}

#[test]
fn test_import_twice_matches_importing_once() {
    let candidates = vec![
        tile(1, 0, 0),
        tile(1, 2, 2).with_waves(vec![1, 2]),
        tile(2, 3, 3).with_roles(vec!["Collector".to_string()]),
    ];
    let store = MemoryMarkerStore::default().with_region(1, vec![tile(1, 0, 0)]);
    let mut engine = engine(store, clipboard_with(&candidates));

    engine.import(&mut ScriptedPrompt::yes());
    let once: Vec<Vec<MarkerRecord>> = [1, 2].map(|r| engine.store().get(r).to_vec()).to_vec();
    engine.import(&mut ScriptedPrompt::yes());
    let twice: Vec<Vec<MarkerRecord>> = [1, 2].map(|r| engine.store().get(r).to_vec()).to_vec();

    assert_eq!(once, twice);
}

#[test]
fn test_import_store_failure_writes_nothing() {
    let mut store = MemoryMarkerStore::default();
    store.fail_reads_for = Some(2);
    let mut engine = engine(store, clipboard_with(&[tile(1, 0, 0), tile(2, 0, 0)]));

    let outcome = engine.import(&mut ScriptedPrompt::yes());

    assert_eq!(outcome, Outcome::StoreUnavailable);
    assert!(engine.store().writes.is_empty());
    assert_eq!(engine.store().reloads, 0);
}

#[test]
fn test_confirm_import_from_prepared_step() {
    let mut engine = engine(MemoryMarkerStore::default(), clipboard_with(&[tile(4, 1, 1)]));
    let Step::Confirm(pending) = engine.prepare_import() else {
        panic!("expected a pending import");
    };

    assert_eq!(engine.confirm_import(pending), Outcome::Imported { count: 1 });
    assert_eq!(engine.store().get(4), &[tile(4, 1, 1)]);
}

// Clear tests
#[test]
fn test_clear_counts_and_empties_every_active_region() {
    let store = MemoryMarkerStore::default()
        .with_region(1, vec![tile(1, 0, 0), tile(1, 1, 1), tile(1, 2, 2)]);
    let mut engine = engine(store, MemoryClipboard::default());
    let mut prompt = ScriptedPrompt::yes();

    let outcome = engine.clear(&[1, 2], &mut prompt);

    assert_eq!(outcome, Outcome::Cleared { count: 3 });
    assert_eq!(
        prompt.asked,
        vec!["Are you sure you want to clear the 3 currently loaded BA Tiles?"]
    );
    assert!(engine.store().get(1).is_empty());
    assert!(engine.store().get(2).is_empty());
    assert_eq!(engine.store().writes, vec![1, 2]);
    assert_eq!(engine.store().reloads, 1);
    assert_eq!(last_message(&engine), "3 BA Tiles were cleared.");
}

#[test]
fn test_clear_single_record_uses_singular() {
    let store = MemoryMarkerStore::default().with_region(1, vec![tile(1, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());

    assert_eq!(
        engine.clear(&[1], &mut ScriptedPrompt::yes()),
        Outcome::Cleared { count: 1 }
    );
    assert_eq!(last_message(&engine), "1 BA Tile was cleared.");
}

#[test]
fn test_clear_leaves_other_regions() {
    let store = MemoryMarkerStore::default()
        .with_region(1, vec![tile(1, 0, 0)])
        .with_region(2, vec![tile(2, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());

    engine.clear(&[1], &mut ScriptedPrompt::yes());

    assert!(engine.store().get(1).is_empty());
    assert_eq!(engine.store().get(2), &[tile(2, 0, 0)]);
}

#[test]
fn test_clear_with_nothing_stored_does_not_prompt_or_write() {
    let store = MemoryMarkerStore::default().with_region(9, vec![tile(9, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());
    let mut prompt = ScriptedPrompt::yes();

    assert_eq!(engine.clear(&[1, 2], &mut prompt), Outcome::NothingToClear);
    assert!(prompt.asked.is_empty());
    assert!(engine.store().writes.is_empty());
    assert_eq!(last_message(&engine), "You have no BA Tiles to clear.");
}

#[test]
fn test_declined_clear_changes_nothing() {
    let store = MemoryMarkerStore::default().with_region(1, vec![tile(1, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());

    assert_eq!(engine.clear(&[1], &mut ScriptedPrompt::no()), Outcome::Declined);
    assert_eq!(engine.store().get(1).len(), 1);
    assert!(engine.store().writes.is_empty());
}

#[test]
fn test_prepare_clear_then_decline() {
    let store = MemoryMarkerStore::default().with_region(1, vec![tile(1, 0, 0), tile(1, 1, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());

    let Step::Confirm(pending) = engine.prepare_clear(&[1]) else {
        panic!("expected a pending clear");
    };
    assert_eq!(pending.count(), 2);
    assert_eq!(engine.decline(pending), Outcome::Declined);
    assert_eq!(engine.store().get(1).len(), 2);
}

#[test]
fn test_clear_counts_repeated_region_once() {
    let store = MemoryMarkerStore::default().with_region(7, vec![tile(7, 0, 0)]);
    let mut engine = engine(store, MemoryClipboard::default());
    let mut prompt = ScriptedPrompt::yes();

    assert_eq!(engine.clear(&[7, 7], &mut prompt), Outcome::Cleared { count: 1 });
    assert_eq!(
        prompt.asked,
        vec!["Are you sure you want to clear the 1 currently loaded BA Tiles?"]
    );
    assert_eq!(engine.store().writes, vec![7]);
    assert_eq!(last_message(&engine), "1 BA Tile was cleared.");
}

#[test]
fn test_clear_empties_region_with_unreadable_entry() {
    let mut store = MemoryMarkerStore::default()
        .with_region(7, vec![tile(7, 0, 0)])
        .with_region(8, vec![tile(8, 0, 0), tile(8, 1, 1)]);
    store.fail_reads_for = Some(7);
    let mut engine = engine(store, MemoryClipboard::default());
    let mut prompt = ScriptedPrompt::yes();

    let outcome = engine.clear(&[7, 8], &mut prompt);

    assert_eq!(outcome, Outcome::Cleared { count: 2 });
    assert_eq!(
        prompt.asked,
        vec![
            "Are you sure you want to clear the 2 currently loaded BA Tiles and the unreadable markers in regions [7]?"
        ]
    );
    assert_eq!(engine.store().writes, vec![7, 8]);
    assert!(engine.store().get(7).is_empty());
    assert!(engine.store().get(8).is_empty());
}

#[test]
fn test_prepare_clear_with_only_unreadable_entry_still_confirms() {
    let mut store = MemoryMarkerStore::default().with_region(7, vec![tile(7, 0, 0)]);
    store.fail_reads_for = Some(7);
    let mut engine = engine(store, MemoryClipboard::default());

    let Step::Confirm(pending) = engine.prepare_clear(&[7]) else {
        panic!("expected a pending clear");
    };
    assert_eq!(pending.count(), 0);
    assert_eq!(pending.unreadable(), &[7]);
    assert_eq!(engine.confirm_clear(pending), Outcome::Cleared { count: 0 });
    assert!(engine.store().get(7).is_empty());
}

// Mark tests
#[test]
fn test_mark_adds_record_to_its_region() {
    let point = WorldPoint::new(1890, 5474, 0);
    let record = MarkerRecord::from_world_point(point).with_label("cannon");
    let mut engine = engine(MemoryMarkerStore::default(), MemoryClipboard::default());

    assert_eq!(engine.mark(record.clone()), Outcome::Marked { point });
    assert_eq!(engine.store().get(point.region_id()), &[record]);
    assert_eq!(last_message(&engine), "Marked BA Tile at (1890, 5474, 0).");
}

#[test]
fn test_mark_existing_record_is_not_duplicated() {
    let record = tile(7509, 2, 2);
    let store = MemoryMarkerStore::default().with_region(7509, vec![record.clone()]);
    let mut engine = engine(store, MemoryClipboard::default());

    let outcome = engine.mark(record.clone());

    assert!(matches!(outcome, Outcome::AlreadyMarked { .. }));
    assert!(engine.store().writes.is_empty());
    assert_eq!(engine.store().get(7509), &[record]);
}

// Full cycle
#[test]
fn test_export_then_import_into_empty_store_restores_markers() {
    let records = vec![
        tile(1, 0, 0).with_color(Rgba::new(1, 2, 3, 4)).with_label(""),
        tile(2, 5, 5).with_waves(vec![10]).with_roles(Vec::new()),
    ];
    let store = MemoryMarkerStore::default()
        .with_region(1, vec![records[0].clone()])
        .with_region(2, vec![records[1].clone()]);
    let mut source = engine(store, MemoryClipboard::default());
    source.export(&[1, 2]);
    let text = source.clipboard().contents.clone().unwrap();

    let mut target = engine(MemoryMarkerStore::default(), MemoryClipboard::holding(&text));
    target.import(&mut AlwaysConfirm);

    assert_eq!(target.collect_records(&[1, 2]).unwrap(), records);
}
