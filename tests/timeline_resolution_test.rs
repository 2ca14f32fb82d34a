use mp4timeline::container::EditEntry;
use mp4timeline::{resolve_timeline, MemoryContainer, MemoryTrack, SampleCursor};

/// A movie with a trimmed, gap-prefixed video track and a plain audio track.
fn build_container() -> MemoryContainer {
    let mut container = MemoryContainer::new(600);

    container.insert_track(
        1,
        MemoryTrack {
            media_type: "vide".to_string(),
            timescale: 600,
            sample_durations: vec![100; 5],
            rendering_offsets: vec![100, 300, 0, 100, 0],
            edits: vec![
                // Version 0 empty-edit sentinel: a 60 tick gap before playback
                EditEntry {
                    media_start: u64::from(u32::MAX),
                    duration: 60,
                    dwell: false,
                },
                // Trimmed playback: media 50..350
                EditEntry {
                    media_start: 50,
                    duration: 300,
                    dwell: false,
                },
            ],
            edit_list_version: 0,
            ..Default::default()
        },
    );

    container.insert_track(
        2,
        MemoryTrack {
            media_type: "soun".to_string(),
            timescale: 48000,
            sample_durations: vec![1024; 3],
            ..Default::default()
        },
    );

    container
}

#[test]
fn test_resolve_trimmed_video_track() {
    let container = build_container();

    let timeline = resolve_timeline(&container, 1).expect("video timeline");

    let ids: Vec<u32> = timeline.iter().map(|s| s.sample_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    // The leading gap pushes every decode timestamp by 60 ticks; the trim
    // shortens the first sample and the edit end clamps the last one.
    let dts: Vec<u64> = timeline.iter().map(|s| s.decode_time_stamp).collect();
    assert_eq!(dts, vec![60, 110, 210, 310]);

    let durations: Vec<u64> = timeline.iter().map(|s| s.duration).collect();
    assert_eq!(durations, vec![50, 100, 100, 50]);
    assert_eq!(durations.iter().sum::<u64>(), 300);

    // Rendering offsets skew presentation timestamps only
    let pts: Vec<u64> = timeline.iter().map(|s| s.presentation_time_stamp).collect();
    assert_eq!(pts, vec![160, 410, 210, 410]);
}

#[test]
fn test_resolve_audio_track_without_edit_list() {
    let container = build_container();

    let timeline = resolve_timeline(&container, 2).expect("audio timeline");

    assert_eq!(timeline.len(), 3);
    let dts: Vec<u64> = timeline.iter().map(|s| s.decode_time_stamp).collect();
    assert_eq!(dts, vec![0, 1024, 2048]);
    assert!(timeline.iter().all(|s| s.duration == 1024));
    assert!(timeline
        .iter()
        .all(|s| s.presentation_time_stamp == s.decode_time_stamp));
}

#[test]
fn test_cursor_advances_in_batches() {
    let container = build_container();

    let mut cursor = SampleCursor::new(&container, 1).expect("cursor");

    // One sample is primed at construction, three remain
    assert_eq!(cursor.advance(2), 2);
    assert_eq!(cursor.current_sample_id(), 3);
    assert_eq!(cursor.advance(5), 1);
    assert!(cursor.is_exhausted());
    assert_eq!(cursor.advance(1), 0);
}

#[test]
fn test_missing_track_yields_no_cursor() {
    let container = build_container();

    assert!(SampleCursor::new(&container, 42).is_none());
    assert!(resolve_timeline(&container, 42).is_none());
}

#[test]
fn test_cursors_for_different_tracks_run_concurrently() {
    let container = build_container();

    std::thread::scope(|scope| {
        let video = scope.spawn(|| resolve_timeline(&container, 1).unwrap());
        let audio = scope.spawn(|| resolve_timeline(&container, 2).unwrap());

        assert_eq!(video.join().unwrap().len(), 4);
        assert_eq!(audio.join().unwrap().len(), 3);
    });
}
