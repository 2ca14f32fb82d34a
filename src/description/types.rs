use serde::Serialize;

/// Codec identity resolved from a sample description entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Codec {
    LinearPcm,
    Mpeg4Aac,
    MpegLayer3,
    Dts,
    VobSub,
    Unknown,
    FourCc(String),
}

impl Codec {
    pub fn name(&self) -> &str {
        match self {
            Codec::LinearPcm => "Linear PCM",
            Codec::Mpeg4Aac => "MPEG-4 AAC",
            Codec::MpegLayer3 => "MP3",
            Codec::Dts => "DTS",
            Codec::VobSub => "VobSub",
            Codec::Unknown => "unknown",
            Codec::FourCc(s) => s,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Codec::Unknown)
    }
}

/// Exact rational value. HDR metadata fields are stored with fixed
/// denominators, so no floating point conversion happens on the read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    pub fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Coded frame dimensions from the sample description entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Pixel aspect ratio from the pasp box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelAspectRatio {
    pub h_spacing: u64,
    pub v_spacing: u64,
}

impl Default for PixelAspectRatio {
    /// Square pixels, used when the entry carries no pasp box.
    fn default() -> Self {
        Self {
            h_spacing: 1,
            v_spacing: 1,
        }
    }
}

/// Color parameters from the colr box (nclc/nclx)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorInfo {
    pub color_primaries: u16,
    pub transfer_characteristics: u16,
    pub matrix_coefficients: u16,
    pub color_range: u16,
}

/// Content light level from the clli box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentLightMetadata {
    pub max_cll: u32,
    pub max_fall: u32,
}

/// Raw integer fields of the mdcv box, as stored in the container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MasteringDisplayPayload {
    pub display_primaries_gx: u16,
    pub display_primaries_gy: u16,
    pub display_primaries_bx: u16,
    pub display_primaries_by: u16,
    pub display_primaries_rx: u16,
    pub display_primaries_ry: u16,
    pub white_point_x: u16,
    pub white_point_y: u16,
    pub max_display_mastering_luminance: u32,
    pub min_display_mastering_luminance: u32,
}

/// HDR10 static mastering display metadata, decoded to exact rationals.
/// Primaries are ordered R, G, B as (x, y) chromaticity coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MasteringDisplayMetadata {
    pub display_primaries: [[Rational; 2]; 3],
    pub white_point: [Rational; 2],
    pub min_luminance: Rational,
    pub max_luminance: Rational,
}

/// Raw integer fields of the dvcC/dvvC box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DolbyVisionPayload {
    pub dv_version_major: u8,
    pub dv_version_minor: u8,
    pub dv_profile: u8,
    pub dv_level: u8,
    pub rpu_present_flag: u8,
    pub el_present_flag: u8,
    pub bl_present_flag: u8,
    pub dv_bl_signal_compatibility_id: u8,
}

/// Dolby Vision configuration decoded from dvcC/dvvC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DolbyVisionMetadata {
    pub version_major: u8,
    pub version_minor: u8,
    pub profile: u8,
    pub level: u8,
    pub rpu_present: bool,
    pub el_present: bool,
    pub bl_present: bool,
    pub bl_signal_compatibility_id: u8,
}

/// Clean aperture from the clap box: the visible cropped region relative to
/// the coded frame, as numerator/denominator pairs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanAperture {
    pub width_n: u64,
    pub width_d: u64,
    pub height_n: u64,
    pub height_d: u64,
    pub horiz_off_n: u64,
    pub horiz_off_d: u64,
    pub vert_off_n: u64,
    pub vert_off_d: u64,
}

/// H.264 profile and level indications. The new pair starts equal to the
/// original one; a remuxing layer may lower it to request a container-level
/// profile/level downgrade without re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct H264Profile {
    pub orig_profile: u8,
    pub orig_level: u8,
    pub new_profile: u8,
    pub new_level: u8,
}

impl H264Profile {
    pub fn new(profile: u8, level: u8) -> Self {
        Self {
            orig_profile: profile,
            orig_level: level,
            new_profile: profile,
            new_level: level,
        }
    }
}

/// Extension stream embedded in an audio track's samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AudioEmbeddedExtension {
    #[default]
    None,
    Ac3,
    Ec3,
}

/// One decoded sample description entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleDescription {
    pub format: Codec,
    pub media: MediaDescription,
}

/// Media-kind specific fields of a sample description entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MediaDescription {
    Video(VideoDescription),
    Audio(AudioDescription),
    None,
}

impl SampleDescription {
    pub fn video(&self) -> Option<&VideoDescription> {
        match &self.media {
            MediaDescription::Video(v) => Some(v),
            _ => None,
        }
    }

    pub fn audio(&self) -> Option<&AudioDescription> {
        match &self.media {
            MediaDescription::Audio(a) => Some(a),
            _ => None,
        }
    }
}

/// Geometry, color and HDR metadata of a video sample description entry.
/// Every optional box resolves to an unset field when absent, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDescription {
    pub size: Size,
    pub pixel_aspect_ratio: PixelAspectRatio,
    pub color: Option<ColorInfo>,
    pub content_light: Option<ContentLightMetadata>,
    pub mastering: Option<MasteringDisplayMetadata>,
    pub dolby_vision: Option<DolbyVisionMetadata>,
    pub clean_aperture: Option<CleanAperture>,
    pub h264_profile: Option<H264Profile>,
}

/// Channel layout of an audio sample description entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioDescription {
    pub channels: u32,
    pub channel_layout_tag: u32,
    pub extension: AudioEmbeddedExtension,
}
