pub mod container;
pub use container::{ContainerAccessor, MemoryContainer, MemoryTrack, TrackId};

pub mod timeline;
pub use timeline::{resolve_timeline, Edit, EditKind, SampleCursor, TimelineSample};

pub mod description;
pub use description::{
    decode_sample_description, Codec, MediaDescription, SampleDescription,
};
