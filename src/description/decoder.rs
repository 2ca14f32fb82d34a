use log::{debug, warn};

use super::types::{
    AudioDescription, Codec, DolbyVisionMetadata, DolbyVisionPayload, H264Profile,
    MasteringDisplayMetadata, MasteringDisplayPayload, MediaDescription, Rational,
    SampleDescription, VideoDescription,
};
use crate::container::{ContainerAccessor, TrackId};

// Elementary stream descriptor object type ids, MPEG-4 systems
const OBJECT_TYPE_MPEG4_AUDIO: u8 = 0x40;
const OBJECT_TYPE_MPEG2_AUDIO: u8 = 0x69;
const OBJECT_TYPE_MPEG1_AUDIO: u8 = 0x6B;
const OBJECT_TYPE_DTS: u8 = 0xA9;

// mdcv stores chromaticity and luminance as fixed-denominator rationals
const CHROMATICITY_DEN: i32 = 50000;
const LUMINANCE_DEN: i32 = 10000;

/// Decode the sample description entry at `index` (0-based) of a track into
/// an immutable description record.
///
/// Every optional metadata box is probed before reading; an absent box
/// leaves its field unset. Unrecognized codecs resolve to an explicit
/// unknown identity, never an error.
pub fn decode_sample_description<C: ContainerAccessor + ?Sized>(
    container: &C,
    track_id: TrackId,
    index: u32,
) -> SampleDescription {
    let media_type = container.track_media_type(track_id);
    let format = resolve_codec(container, track_id, index, &media_type);

    debug!(
        "track {track_id} entry {index}: {} ({media_type})",
        format.name()
    );

    let media = match media_type.as_str() {
        "vide" => MediaDescription::Video(decode_video(container, track_id, index, &format)),
        "soun" => MediaDescription::Audio(decode_audio(container, track_id)),
        _ => MediaDescription::None,
    };

    SampleDescription { format, media }
}

/// Resolve the codec identity from the track type tag and the entry's media
/// data box name, inspecting the elementary stream descriptor for "mp4a".
fn resolve_codec<C: ContainerAccessor + ?Sized>(
    container: &C,
    track_id: TrackId,
    index: u32,
    media_type: &str,
) -> Codec {
    let media_data_name = container.media_data_name(track_id, index);

    match (media_type, media_data_name.as_str()) {
        (_, "twos") => Codec::LinearPcm,
        (_, "mp4a") => {
            let object_type_id = container.esds_object_type_id(track_id);
            match object_type_id {
                OBJECT_TYPE_MPEG4_AUDIO => Codec::Mpeg4Aac,
                OBJECT_TYPE_MPEG2_AUDIO | OBJECT_TYPE_MPEG1_AUDIO => Codec::MpegLayer3,
                OBJECT_TYPE_DTS => Codec::Dts,
                _ => {
                    warn!(
                        "track {track_id}: unrecognized mp4a object type id {object_type_id:#04x}"
                    );
                    Codec::Unknown
                }
            }
        }
        ("subp", "mp4s") => Codec::VobSub,
        (_, _) => Codec::FourCc(media_data_name),
    }
}

fn decode_video<C: ContainerAccessor + ?Sized>(
    container: &C,
    track_id: TrackId,
    index: u32,
    format: &Codec,
) -> VideoDescription {
    let h264_profile = if matches!(format, Codec::FourCc(name) if name == "avc1") {
        container
            .h264_profile_level(track_id)
            .map(|(profile, level)| H264Profile::new(profile, level))
    } else {
        None
    };

    VideoDescription {
        size: container.video_size(track_id),
        pixel_aspect_ratio: container
            .pixel_aspect_ratio(track_id, index)
            .unwrap_or_default(),
        color: container.color_info(track_id, index),
        content_light: container.content_light(track_id, index),
        mastering: container
            .mastering_display(track_id, index)
            .map(decode_mastering_display),
        dolby_vision: container
            .dolby_vision(track_id, index)
            .map(decode_dolby_vision),
        clean_aperture: container.clean_aperture(track_id, index),
        h264_profile,
    }
}

fn decode_audio<C: ContainerAccessor + ?Sized>(
    container: &C,
    track_id: TrackId,
) -> AudioDescription {
    AudioDescription {
        channels: container.audio_channel_count(track_id),
        channel_layout_tag: container.audio_channel_layout_tag(track_id),
        extension: container.audio_embedded_extension(track_id),
    }
}

fn decode_mastering_display(payload: MasteringDisplayPayload) -> MasteringDisplayMetadata {
    let chroma = |value: u16| Rational::new(i32::from(value), CHROMATICITY_DEN);
    let luma = |value: u32| Rational::new(value as i32, LUMINANCE_DEN);

    MasteringDisplayMetadata {
        display_primaries: [
            [
                chroma(payload.display_primaries_rx),
                chroma(payload.display_primaries_ry),
            ],
            [
                chroma(payload.display_primaries_gx),
                chroma(payload.display_primaries_gy),
            ],
            [
                chroma(payload.display_primaries_bx),
                chroma(payload.display_primaries_by),
            ],
        ],
        white_point: [chroma(payload.white_point_x), chroma(payload.white_point_y)],
        min_luminance: luma(payload.min_display_mastering_luminance),
        max_luminance: luma(payload.max_display_mastering_luminance),
    }
}

fn decode_dolby_vision(payload: DolbyVisionPayload) -> DolbyVisionMetadata {
    DolbyVisionMetadata {
        version_major: payload.dv_version_major,
        version_minor: payload.dv_version_minor,
        profile: payload.dv_profile,
        level: payload.dv_level,
        rpu_present: payload.rpu_present_flag != 0,
        el_present: payload.el_present_flag != 0,
        bl_present: payload.bl_present_flag != 0,
        bl_signal_compatibility_id: payload.dv_bl_signal_compatibility_id,
    }
}
