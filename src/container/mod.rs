pub mod memory;
pub use memory::{DescriptionEntry, EditEntry, MemoryContainer, MemoryTrack};

use crate::description::types::{
    AudioEmbeddedExtension, CleanAperture, ColorInfo, ContentLightMetadata, DolbyVisionPayload,
    MasteringDisplayPayload, PixelAspectRatio, Size,
};

/// Numeric id of a track inside an opened container
pub type TrackId = u32;

/// Read-only query surface over one opened, indexed container.
///
/// Timeline resolution and sample description decoding borrow an accessor for
/// the duration of a call and own no container resources themselves. All
/// queries are in-memory property reads; sample ids and edit ids are
/// 1-indexed, sample description entries are 0-indexed. Out-of-range sample
/// ids answer zero values.
#[cfg_attr(test, mockall::automock)]
pub trait ContainerAccessor {
    /// Movie timescale in ticks per second
    fn movie_timescale(&self) -> u32;

    /// Track timescale in ticks per second
    fn track_timescale(&self, track_id: TrackId) -> u32;

    /// Track media duration in track timescale ticks
    fn track_duration(&self, track_id: TrackId) -> u64;

    /// Number of samples in the track's sample table
    fn sample_count(&self, track_id: TrackId) -> u32;

    /// Number of edit segments; 0 when the track has no edit list or the
    /// list is malformed
    fn edit_count(&self, track_id: TrackId) -> u32;

    /// Edit list version, one per list: 0 for 32-bit fields, 1 for 64-bit
    fn edit_list_version(&self, track_id: TrackId) -> u8;

    /// Media start of an edit segment, in track timescale ticks. Empty
    /// edits carry the all-ones sentinel of the list version.
    fn edit_media_start(&self, track_id: TrackId, edit_id: u32) -> u64;

    /// Duration of an edit segment, in movie timescale ticks
    fn edit_duration(&self, track_id: TrackId, edit_id: u32) -> u64;

    /// Whether the edit segment pauses on a single sample
    fn edit_dwell(&self, track_id: TrackId, edit_id: u32) -> bool;

    /// Native duration of a sample, in track timescale ticks
    fn sample_duration(&self, track_id: TrackId, sample_id: u32) -> u64;

    /// Signed presentation/decode skew of a sample, in track timescale ticks
    fn sample_rendering_offset(&self, track_id: TrackId, sample_id: u32) -> i64;

    /// Start time of a sample, in track timescale ticks
    fn sample_time(&self, track_id: TrackId, sample_id: u32) -> u64;

    /// Id of the sample whose start time is <= `time` (track timescale)
    fn sample_id_for_time(&self, track_id: TrackId, time: u64) -> u32;

    /// Handler type tag of the track, e.g. "vide", "soun", "subp", "text"
    fn track_media_type(&self, track_id: TrackId) -> String;

    /// Four-character media data box name of a sample description entry,
    /// e.g. "avc1", "mp4a"
    fn media_data_name(&self, track_id: TrackId, index: u32) -> String;

    /// Object type id from the elementary stream descriptor; only
    /// meaningful for "mp4a" entries
    fn esds_object_type_id(&self, track_id: TrackId) -> u8;

    /// Coded width and height of a video track; zero when absent
    fn video_size(&self, track_id: TrackId) -> Size;

    /// Pixel aspect ratio from the pasp box, if present
    fn pixel_aspect_ratio(&self, track_id: TrackId, index: u32) -> Option<PixelAspectRatio>;

    /// Color parameters from the colr box, if present
    fn color_info(&self, track_id: TrackId, index: u32) -> Option<ColorInfo>;

    /// Content light level from the clli box, if present
    fn content_light(&self, track_id: TrackId, index: u32) -> Option<ContentLightMetadata>;

    /// Raw mastering display fields from the mdcv box, if present
    fn mastering_display(&self, track_id: TrackId, index: u32) -> Option<MasteringDisplayPayload>;

    /// Raw Dolby Vision configuration from the dvcC/dvvC box, if present
    fn dolby_vision(&self, track_id: TrackId, index: u32) -> Option<DolbyVisionPayload>;

    /// Clean aperture from the clap box, if present
    fn clean_aperture(&self, track_id: TrackId, index: u32) -> Option<CleanAperture>;

    /// Profile and level indications from the avcC configuration, if present
    fn h264_profile_level(&self, track_id: TrackId) -> Option<(u8, u8)>;

    /// Channel count of an audio track
    fn audio_channel_count(&self, track_id: TrackId) -> u32;

    /// Channel layout tag of an audio track
    fn audio_channel_layout_tag(&self, track_id: TrackId) -> u32;

    /// Extension stream embedded in an audio track's samples
    fn audio_embedded_extension(&self, track_id: TrackId) -> AudioEmbeddedExtension;
}
