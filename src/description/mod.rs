pub mod decoder;
pub use decoder::decode_sample_description;
pub mod types;
pub use types::{
    AudioDescription, AudioEmbeddedExtension, CleanAperture, Codec, ColorInfo,
    ContentLightMetadata, DolbyVisionMetadata, DolbyVisionPayload, H264Profile,
    MasteringDisplayMetadata, MasteringDisplayPayload, MediaDescription, PixelAspectRatio,
    Rational, SampleDescription, Size, VideoDescription,
};
