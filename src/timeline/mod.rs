pub mod cursor;
pub use cursor::SampleCursor;
pub mod edit;
pub use edit::{read_edits, Edit, EditKind};

use serde::Serialize;

use crate::container::{ContainerAccessor, TrackId};

/// One resolved timeline step, in decode order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineSample {
    pub sample_id: u32,
    pub decode_time_stamp: u64,
    pub presentation_time_stamp: u64,
    pub duration: u64,
}

/// Resolve a track's full timeline by driving a cursor to exhaustion.
///
/// Returns `None` for tracks with no samples, and an empty list for an edit
/// list made only of empty segments.
pub fn resolve_timeline<C: ContainerAccessor + ?Sized>(
    container: &C,
    track_id: TrackId,
) -> Option<Vec<TimelineSample>> {
    let mut cursor = SampleCursor::new(container, track_id)?;
    if cursor.current_sample_id() == 0 {
        return Some(Vec::new());
    }

    let mut samples = vec![record(&cursor)];
    while cursor.advance(1) == 1 {
        samples.push(record(&cursor));
    }

    Some(samples)
}

fn record<C: ContainerAccessor + ?Sized>(cursor: &SampleCursor<'_, C>) -> TimelineSample {
    TimelineSample {
        sample_id: cursor.current_sample_id(),
        decode_time_stamp: cursor.decode_time_stamp(),
        presentation_time_stamp: cursor.presentation_time_stamp(),
        duration: cursor.current_sample_duration(),
    }
}
