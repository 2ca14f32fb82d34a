use log::warn;

use super::edit::{read_edits, Edit, EditKind};
use crate::container::{ContainerAccessor, TrackId};

/// Stateful walk over one track's edit list and sample table, producing
/// decode and presentation timestamps sample by sample, in decode order.
///
/// Construction primes the first sample, so the accessors are valid as soon
/// as `new` returns. A cursor owns no container resources and is a private,
/// sequential iterator: run one cursor per track, never share one across
/// threads. Cursors for different tracks may run concurrently against the
/// same accessor.
pub struct SampleCursor<'a, C: ContainerAccessor + ?Sized> {
    container: &'a C,
    track_id: TrackId,

    edits: Vec<Edit>,
    number_of_samples: u32,

    /// Accumulated playback time, in track timescale ticks, at the start of
    /// the current step
    current_time: u64,
    current_edit: usize,
    /// Ticks already consumed within the current edit
    current_edit_duration: u64,
    /// Ticks to trim from the first sample of an edit whose media start is
    /// not on a sample boundary
    current_trim_start: u64,

    current_sample_id: u32,
    current_sample_duration: u64,

    presentation_time_stamp: u64,
    decode_time_stamp: u64,
}

impl<'a, C: ContainerAccessor + ?Sized> SampleCursor<'a, C> {
    /// Build a cursor over `track_id` and prime the first sample.
    /// Returns `None` for tracks with no samples.
    pub fn new(container: &'a C, track_id: TrackId) -> Option<Self> {
        let number_of_samples = container.sample_count(track_id);
        if number_of_samples == 0 {
            warn!("track {track_id}: no samples, skipping");
            return None;
        }

        let edits = read_edits(container, track_id);

        let mut cursor = Self {
            container,
            track_id,
            edits,
            number_of_samples,
            current_time: 0,
            current_edit: 0,
            current_edit_duration: 0,
            current_trim_start: 0,
            current_sample_id: 0,
            current_sample_duration: 0,
            presentation_time_stamp: 0,
            decode_time_stamp: 0,
        };

        cursor.seek_playable_edit();
        cursor.advance(1);

        Some(cursor)
    }

    /// 1-based id of the most recently emitted sample; 0 if the edit list
    /// emitted nothing
    pub fn current_sample_id(&self) -> u32 {
        self.current_sample_id
    }

    /// Presentation duration of the most recently emitted sample, in track
    /// timescale ticks
    pub fn current_sample_duration(&self) -> u64 {
        self.current_sample_duration
    }

    pub fn decode_time_stamp(&self) -> u64 {
        self.decode_time_stamp
    }

    pub fn presentation_time_stamp(&self) -> u64 {
        self.presentation_time_stamp
    }

    /// Whether every edit segment has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.current_edit >= self.edits.len()
    }

    /// Step forward in decode order, at most `count` samples. Returns the
    /// number of steps actually performed; 0 once the cursor is exhausted,
    /// in which case no state is mutated.
    pub fn advance(&mut self, count: u64) -> u64 {
        let mut stepped = 0;

        for _ in 0..count {
            let Some(edit) = self.edits.get(self.current_edit).copied() else {
                break;
            };

            self.current_sample_id += 1;

            let duration = self
                .container
                .sample_duration(self.track_id, self.current_sample_id);
            let offset = self
                .container
                .sample_rendering_offset(self.track_id, self.current_sample_id);

            self.decode_time_stamp = self.current_time;
            self.presentation_time_stamp = self.current_time.saturating_add_signed(offset);

            let edit_finished = match edit.kind {
                EditKind::Dwell { .. } => {
                    // The whole dwell collapses into this one step.
                    self.current_sample_duration = edit.duration;
                    true
                }
                _ if self.current_sample_id >= self.number_of_samples
                    || self.current_edit_duration.saturating_add(duration) >= edit.duration =>
                {
                    // Last step of the edit: clamp to the remaining span.
                    let mut clamped = edit.duration.saturating_sub(self.current_edit_duration);
                    if clamped > self.current_trim_start {
                        clamped -= self.current_trim_start;
                    }
                    self.current_sample_duration = clamped;
                    true
                }
                _ => {
                    self.current_sample_duration = duration.saturating_sub(self.current_trim_start);
                    // The trim only ever applies to the first sample of an edit.
                    self.current_trim_start = 0;
                    false
                }
            };

            self.current_edit_duration += self.current_sample_duration;
            self.current_time += self.current_sample_duration;
            stepped += 1;

            if edit_finished {
                self.current_edit += 1;
                self.seek_playable_edit();
            }
        }

        stepped
    }

    /// Skip empty edits (their duration goes straight into the accumulated
    /// time, no sample emitted) and realign the sample position and trim to
    /// the next playable edit, if one remains.
    fn seek_playable_edit(&mut self) {
        while let Some(edit) = self.edits.get(self.current_edit) {
            if !edit.is_empty() {
                break;
            }
            self.current_time += edit.duration;
            self.current_edit += 1;
        }

        let Some(edit) = self.edits.get(self.current_edit) else {
            return;
        };

        if let Some(media_start) = edit.media_start() {
            let sample_id = self
                .container
                .sample_id_for_time(self.track_id, media_start);
            let sample_time = self.container.sample_time(self.track_id, sample_id);
            // Park one sample before the one containing the media start, so
            // the next step lands on it.
            self.current_sample_id = sample_id.saturating_sub(1);
            self.current_trim_start = media_start.saturating_sub(sample_time);
        }
        self.current_edit_duration = 0;
    }
}
