//! Round-trip law for the persistence codec: `load(save(s))` reproduces
//! `s` for every field, including non-empty deduplicating sets, for
//! arbitrary append sequences.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use mindwell_core::store::{
    ActivityRecord, ActivityStore, JournalEntry, MeditationSession, MoodEntry, PersistenceCodec,
    SleepLog, SleepQuality,
};

#[derive(Debug, Clone)]
enum AppendOp {
    ScaleMood { value: u8, factors: Vec<String> },
    WheelMood { emotion: String, intensity: u8 },
    Journal { title: Option<String>, content: String },
    Sleep { quality: Option<SleepQuality> },
    Meditation { minutes: u32 },
    Puzzle,
}

fn append_op() -> impl Strategy<Value = AppendOp> {
    prop_oneof![
        (1u8..=5, prop::collection::vec("[a-z]{1,8}", 0..3))
            .prop_map(|(value, factors)| AppendOp::ScaleMood { value, factors }),
        ("[A-Z][a-z]{2,8}", 1u8..=10)
            .prop_map(|(emotion, intensity)| AppendOp::WheelMood { emotion, intensity }),
        (prop::option::of("[A-Za-z ]{1,20}"), "[a-z ]{1,60}")
            .prop_map(|(title, content)| AppendOp::Journal { title, content }),
        prop::option::of(prop_oneof![
            Just(SleepQuality::Excellent),
            Just(SleepQuality::Good),
            Just(SleepQuality::Fair),
            Just(SleepQuality::Poor),
        ])
        .prop_map(|quality| AppendOp::Sleep { quality }),
        (1u32..=60).prop_map(|minutes| AppendOp::Meditation { minutes }),
        Just(AppendOp::Puzzle),
    ]
}

fn build_store(ops: &[AppendOp]) -> ActivityStore {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let mut store = ActivityStore::new(today);
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

    for op in ops {
        match op {
            AppendOp::ScaleMood { value, factors } => {
                store.append(ActivityRecord::Mood(
                    MoodEntry::scale(at, *value, factors.clone(), None).unwrap(),
                ));
            }
            AppendOp::WheelMood { emotion, intensity } => {
                store.append(ActivityRecord::Mood(
                    MoodEntry::wheel(at, emotion.clone(), "#FFD93D", *intensity, vec![], None)
                        .unwrap(),
                ));
            }
            AppendOp::Journal { title, content } => {
                if let Ok(entry) = JournalEntry::new(at, title.clone(), content.clone(), vec![]) {
                    store.append(ActivityRecord::Journal(entry));
                }
            }
            AppendOp::Sleep { quality } => {
                store.append(ActivityRecord::Sleep(
                    SleepLog::new(at, "23:15", "06:45", *quality, None).unwrap(),
                ));
            }
            AppendOp::Meditation { minutes } => {
                store.append(ActivityRecord::Meditation(MeditationSession {
                    date: at,
                    name: "Body Scan".into(),
                    category: "relaxation".into(),
                    duration: *minutes,
                }));
            }
            AppendOp::Puzzle => store.record_puzzle_completion(),
        }
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn load_save_round_trips(ops in prop::collection::vec(append_op(), 0..40)) {
        let dir = tempfile::tempdir().unwrap();
        let codec = PersistenceCodec::with_dir(dir.path());
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut store = build_store(&ops);
        codec.save_store(&mut store).unwrap();
        let loaded = codec.load_store(today);

        prop_assert_eq!(&loaded, &store);
        // Log lengths equal the number of appends to each log.
        let scale_moods = ops.iter().filter(|op| matches!(op, AppendOp::ScaleMood { .. })).count();
        let wheel_moods = ops.iter().filter(|op| matches!(op, AppendOp::WheelMood { .. })).count();
        prop_assert_eq!(loaded.moods.len(), scale_moods + wheel_moods);
    }
}
