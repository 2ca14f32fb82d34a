use std::collections::BTreeMap;

use super::{ContainerAccessor, TrackId};
use crate::description::types::{
    AudioEmbeddedExtension, CleanAperture, ColorInfo, ContentLightMetadata, DolbyVisionPayload,
    MasteringDisplayPayload, PixelAspectRatio, Size,
};

/// One stored edit list entry, prior to any timescale conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditEntry {
    /// Media start in track timescale ticks. An empty edit carries the
    /// all-ones sentinel matching the track's edit list version.
    pub media_start: u64,
    /// Duration in movie timescale ticks
    pub duration: u64,
    /// Pause on a single sample for the whole segment
    pub dwell: bool,
}

/// Per-entry sample description metadata of a [`MemoryTrack`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionEntry {
    pub media_data_name: String,
    pub pixel_aspect_ratio: Option<PixelAspectRatio>,
    pub color: Option<ColorInfo>,
    pub content_light: Option<ContentLightMetadata>,
    pub mastering_display: Option<MasteringDisplayPayload>,
    pub dolby_vision: Option<DolbyVisionPayload>,
    pub clean_aperture: Option<CleanAperture>,
}

/// One track of a [`MemoryContainer`].
///
/// `sample_durations` defines the sample table; `rendering_offsets` may be
/// shorter (missing entries read as 0, the common no-reordering case).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTrack {
    /// Handler type tag, e.g. "vide", "soun", "subp", "text"
    pub media_type: String,
    /// Track timescale in ticks per second
    pub timescale: u32,
    /// Native duration of each sample, in track timescale ticks
    pub sample_durations: Vec<u64>,
    /// Signed presentation/decode skew per sample, in track timescale ticks
    pub rendering_offsets: Vec<i64>,
    /// Stored edit list, in order; empty when the track has no edit list
    pub edits: Vec<EditEntry>,
    /// Edit list version: 0 for 32-bit fields, 1 for 64-bit
    pub edit_list_version: u8,
    /// Elementary stream descriptor object type id, for "mp4a" entries
    pub object_type_id: u8,
    /// Coded video dimensions; zero for non-video tracks
    pub video_size: Size,
    /// Profile and level from the avcC configuration, for H.264 tracks
    pub h264_profile_level: Option<(u8, u8)>,
    pub audio_channel_count: u32,
    pub audio_channel_layout_tag: u32,
    pub audio_embedded_extension: AudioEmbeddedExtension,
    /// Sample description entries, 0-indexed
    pub descriptions: Vec<DescriptionEntry>,
}

impl MemoryTrack {
    fn media_duration(&self) -> u64 {
        self.sample_durations.iter().sum()
    }

    /// Start time of a 1-indexed sample (sum of the durations before it)
    fn sample_start_time(&self, sample_id: u32) -> u64 {
        let end = (sample_id.saturating_sub(1) as usize).min(self.sample_durations.len());
        self.sample_durations[..end].iter().sum()
    }
}

/// In-memory [`ContainerAccessor`] over plain per-track tables.
///
/// Backs every test in this crate and doubles as a way to author synthetic
/// timelines without a parsed file behind them. Sample start times and
/// time-to-id lookups are answered from prefix sums over the duration table.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    movie_timescale: u32,
    tracks: BTreeMap<TrackId, MemoryTrack>,
}

impl MemoryContainer {
    pub fn new(movie_timescale: u32) -> Self {
        Self {
            movie_timescale,
            tracks: BTreeMap::new(),
        }
    }

    pub fn insert_track(&mut self, track_id: TrackId, track: MemoryTrack) {
        self.tracks.insert(track_id, track);
    }

    pub fn track_ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.keys().copied()
    }

    fn track(&self, track_id: TrackId) -> Option<&MemoryTrack> {
        self.tracks.get(&track_id)
    }

    fn description(&self, track_id: TrackId, index: u32) -> Option<&DescriptionEntry> {
        self.track(track_id)?.descriptions.get(index as usize)
    }

    fn edit(&self, track_id: TrackId, edit_id: u32) -> Option<&EditEntry> {
        if edit_id == 0 {
            return None;
        }
        self.track(track_id)?.edits.get(edit_id as usize - 1)
    }
}

impl ContainerAccessor for MemoryContainer {
    fn movie_timescale(&self) -> u32 {
        self.movie_timescale
    }

    fn track_timescale(&self, track_id: TrackId) -> u32 {
        self.track(track_id).map_or(0, |t| t.timescale)
    }

    fn track_duration(&self, track_id: TrackId) -> u64 {
        self.track(track_id).map_or(0, MemoryTrack::media_duration)
    }

    fn sample_count(&self, track_id: TrackId) -> u32 {
        self.track(track_id)
            .map_or(0, |t| t.sample_durations.len() as u32)
    }

    fn edit_count(&self, track_id: TrackId) -> u32 {
        self.track(track_id).map_or(0, |t| t.edits.len() as u32)
    }

    fn edit_list_version(&self, track_id: TrackId) -> u8 {
        self.track(track_id).map_or(0, |t| t.edit_list_version)
    }

    fn edit_media_start(&self, track_id: TrackId, edit_id: u32) -> u64 {
        self.edit(track_id, edit_id).map_or(0, |e| e.media_start)
    }

    fn edit_duration(&self, track_id: TrackId, edit_id: u32) -> u64 {
        self.edit(track_id, edit_id).map_or(0, |e| e.duration)
    }

    fn edit_dwell(&self, track_id: TrackId, edit_id: u32) -> bool {
        self.edit(track_id, edit_id).is_some_and(|e| e.dwell)
    }

    fn sample_duration(&self, track_id: TrackId, sample_id: u32) -> u64 {
        if sample_id == 0 {
            return 0;
        }
        self.track(track_id)
            .and_then(|t| t.sample_durations.get(sample_id as usize - 1))
            .copied()
            .unwrap_or(0)
    }

    fn sample_rendering_offset(&self, track_id: TrackId, sample_id: u32) -> i64 {
        if sample_id == 0 {
            return 0;
        }
        self.track(track_id)
            .and_then(|t| t.rendering_offsets.get(sample_id as usize - 1))
            .copied()
            .unwrap_or(0)
    }

    fn sample_time(&self, track_id: TrackId, sample_id: u32) -> u64 {
        self.track(track_id)
            .map_or(0, |t| t.sample_start_time(sample_id))
    }

    fn sample_id_for_time(&self, track_id: TrackId, time: u64) -> u32 {
        let Some(track) = self.track(track_id) else {
            return 0;
        };

        let mut start = 0u64;
        for (index, duration) in track.sample_durations.iter().enumerate() {
            if start + duration > time {
                return index as u32 + 1;
            }
            start += duration;
        }
        // Past the end of the media: the last sample still covers it.
        track.sample_durations.len() as u32
    }

    fn track_media_type(&self, track_id: TrackId) -> String {
        self.track(track_id)
            .map_or_else(String::new, |t| t.media_type.clone())
    }

    fn media_data_name(&self, track_id: TrackId, index: u32) -> String {
        self.description(track_id, index)
            .map_or_else(String::new, |d| d.media_data_name.clone())
    }

    fn esds_object_type_id(&self, track_id: TrackId) -> u8 {
        self.track(track_id).map_or(0, |t| t.object_type_id)
    }

    fn video_size(&self, track_id: TrackId) -> Size {
        self.track(track_id).map_or_else(Size::default, |t| t.video_size)
    }

    fn pixel_aspect_ratio(&self, track_id: TrackId, index: u32) -> Option<PixelAspectRatio> {
        self.description(track_id, index)?.pixel_aspect_ratio
    }

    fn color_info(&self, track_id: TrackId, index: u32) -> Option<ColorInfo> {
        self.description(track_id, index)?.color
    }

    fn content_light(&self, track_id: TrackId, index: u32) -> Option<ContentLightMetadata> {
        self.description(track_id, index)?.content_light
    }

    fn mastering_display(&self, track_id: TrackId, index: u32) -> Option<MasteringDisplayPayload> {
        self.description(track_id, index)?.mastering_display
    }

    fn dolby_vision(&self, track_id: TrackId, index: u32) -> Option<DolbyVisionPayload> {
        self.description(track_id, index)?.dolby_vision
    }

    fn clean_aperture(&self, track_id: TrackId, index: u32) -> Option<CleanAperture> {
        self.description(track_id, index)?.clean_aperture
    }

    fn h264_profile_level(&self, track_id: TrackId) -> Option<(u8, u8)> {
        self.track(track_id)?.h264_profile_level
    }

    fn audio_channel_count(&self, track_id: TrackId) -> u32 {
        self.track(track_id).map_or(0, |t| t.audio_channel_count)
    }

    fn audio_channel_layout_tag(&self, track_id: TrackId) -> u32 {
        self.track(track_id)
            .map_or(0, |t| t.audio_channel_layout_tag)
    }

    fn audio_embedded_extension(&self, track_id: TrackId) -> AudioEmbeddedExtension {
        self.track(track_id)
            .map_or(AudioEmbeddedExtension::None, |t| t.audio_embedded_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with_durations(durations: Vec<u64>) -> MemoryContainer {
        let mut container = MemoryContainer::new(600);
        container.insert_track(
            1,
            MemoryTrack {
                media_type: "vide".to_string(),
                timescale: 600,
                sample_durations: durations,
                ..Default::default()
            },
        );
        container
    }

    #[test]
    fn test_sample_time_is_a_prefix_sum() {
        let container = track_with_durations(vec![100, 200, 300]);

        assert_eq!(container.sample_time(1, 1), 0);
        assert_eq!(container.sample_time(1, 2), 100);
        assert_eq!(container.sample_time(1, 3), 300);
        assert_eq!(container.track_duration(1), 600);
    }

    #[test]
    fn test_sample_id_for_time_picks_the_containing_sample() {
        let container = track_with_durations(vec![100, 200, 300]);

        assert_eq!(container.sample_id_for_time(1, 0), 1);
        assert_eq!(container.sample_id_for_time(1, 99), 1);
        assert_eq!(container.sample_id_for_time(1, 100), 2);
        assert_eq!(container.sample_id_for_time(1, 299), 2);
        assert_eq!(container.sample_id_for_time(1, 300), 3);
        // Past the end of the media the last sample still answers
        assert_eq!(container.sample_id_for_time(1, 10_000), 3);
    }

    #[test]
    fn test_out_of_range_queries_answer_zero_values() {
        let container = track_with_durations(vec![100]);

        assert_eq!(container.sample_duration(1, 0), 0);
        assert_eq!(container.sample_duration(1, 2), 0);
        assert_eq!(container.sample_rendering_offset(1, 2), 0);
        assert_eq!(container.sample_count(99), 0);
        assert_eq!(container.edit_duration(1, 1), 0);
        assert_eq!(container.track_media_type(99), "");
    }

    #[test]
    fn test_missing_rendering_offsets_read_as_zero() {
        let mut container = MemoryContainer::new(600);
        container.insert_track(
            1,
            MemoryTrack {
                media_type: "vide".to_string(),
                timescale: 600,
                sample_durations: vec![100, 100, 100],
                rendering_offsets: vec![25],
                ..Default::default()
            },
        );

        assert_eq!(container.sample_rendering_offset(1, 1), 25);
        assert_eq!(container.sample_rendering_offset(1, 2), 0);
        assert_eq!(container.sample_rendering_offset(1, 3), 0);
    }
}
