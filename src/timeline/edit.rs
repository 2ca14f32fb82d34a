use log::debug;

use crate::container::{ContainerAccessor, TrackId};

/// One edit list segment, duration in the track's timescale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub duration: u64,
    pub kind: EditKind,
}

/// The three behaviors an edit segment can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// A gap with no underlying media: contributes its duration to the
    /// timeline without emitting any sample
    Empty,
    /// Pauses on the sample at `media_start` for the whole segment
    Dwell { media_start: u64 },
    /// Plays samples forward from `media_start`
    Play { media_start: u64 },
}

impl Edit {
    pub fn play(media_start: u64, duration: u64) -> Self {
        Self {
            duration,
            kind: EditKind::Play { media_start },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, EditKind::Empty)
    }

    /// Media start of the segment; `None` for empty edits
    pub fn media_start(&self) -> Option<u64> {
        match self.kind {
            EditKind::Empty => None,
            EditKind::Dwell { media_start } | EditKind::Play { media_start } => Some(media_start),
        }
    }
}

/// Load a track's edit segments in stored order, durations converted to the
/// track's timescale.
///
/// A track without an edit list (or with a malformed one, which surfaces as
/// zero entries) resolves to a single segment playing the full media
/// duration.
pub fn read_edits<C: ContainerAccessor + ?Sized>(container: &C, track_id: TrackId) -> Vec<Edit> {
    let edit_count = container.edit_count(track_id);

    if edit_count == 0 {
        debug!("track {track_id}: no edit list, playing the full media duration");
        return vec![Edit::play(0, container.track_duration(track_id))];
    }

    let version = container.edit_list_version(track_id);
    let movie_timescale = container.movie_timescale();
    let track_timescale = container.track_timescale(track_id);

    debug!("track {track_id}: {edit_count} edit segments, list version {version}");

    (1..=edit_count)
        .map(|edit_id| {
            let media_start = container.edit_media_start(track_id, edit_id);
            let duration = to_track_duration(
                container.edit_duration(track_id, edit_id),
                movie_timescale,
                track_timescale,
            );

            let kind = if is_empty_media_start(version, media_start) {
                EditKind::Empty
            } else if container.edit_dwell(track_id, edit_id) {
                EditKind::Dwell { media_start }
            } else {
                EditKind::Play { media_start }
            };

            Edit { duration, kind }
        })
        .collect()
}

/// An empty edit is marked by an all-ones media start; the sentinel width
/// follows the edit list version.
fn is_empty_media_start(version: u8, media_start: u64) -> bool {
    match version {
        0 => media_start == u64::from(u32::MAX),
        1 => media_start == u64::MAX,
        _ => false,
    }
}

fn to_track_duration(duration: u64, movie_timescale: u32, track_timescale: u32) -> u64 {
    if movie_timescale == 0 {
        return 0;
    }
    (u128::from(duration) * u128::from(track_timescale) / u128::from(movie_timescale)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{EditEntry, MemoryContainer, MemoryTrack};

    fn container_with_edits(
        edits: Vec<EditEntry>,
        edit_list_version: u8,
        timescale: u32,
    ) -> MemoryContainer {
        let mut container = MemoryContainer::new(600);
        container.insert_track(
            1,
            MemoryTrack {
                media_type: "vide".to_string(),
                timescale,
                sample_durations: vec![250, 250],
                edits,
                edit_list_version,
                ..Default::default()
            },
        );
        container
    }

    #[test]
    fn test_missing_edit_list_plays_the_full_track() {
        let container = container_with_edits(Vec::new(), 0, 600);

        let edits = read_edits(&container, 1);

        assert_eq!(edits, vec![Edit::play(0, 500)]);
    }

    #[test]
    fn test_durations_convert_from_movie_to_track_timescale() {
        // Movie timescale 600, track timescale 48000: 300 movie ticks are
        // half a second, 24000 track ticks.
        let container = container_with_edits(
            vec![EditEntry {
                media_start: 0,
                duration: 300,
                dwell: false,
            }],
            0,
            48000,
        );

        let edits = read_edits(&container, 1);

        assert_eq!(edits, vec![Edit::play(0, 24000)]);
    }

    #[test]
    fn test_version_0_sentinel_marks_an_empty_edit() {
        let container = container_with_edits(
            vec![
                EditEntry {
                    media_start: u64::from(u32::MAX),
                    duration: 100,
                    dwell: false,
                },
                EditEntry {
                    media_start: 0,
                    duration: 400,
                    dwell: false,
                },
            ],
            0,
            600,
        );

        let edits = read_edits(&container, 1);

        assert_eq!(edits[0].kind, EditKind::Empty);
        assert_eq!(edits[0].duration, 100);
        assert_eq!(edits[1].kind, EditKind::Play { media_start: 0 });
    }

    #[test]
    fn test_version_1_sentinel_is_64_bit() {
        let container = container_with_edits(
            vec![
                EditEntry {
                    media_start: u64::from(u32::MAX),
                    duration: 100,
                    dwell: false,
                },
                EditEntry {
                    media_start: u64::MAX,
                    duration: 100,
                    dwell: false,
                },
            ],
            1,
            600,
        );

        let edits = read_edits(&container, 1);

        // Under version 1 only the 64-bit all-ones value is a gap; the
        // 32-bit one is a regular media position.
        assert_eq!(
            edits[0].kind,
            EditKind::Play {
                media_start: u64::from(u32::MAX)
            }
        );
        assert_eq!(edits[1].kind, EditKind::Empty);
    }

    #[test]
    fn test_dwell_flag_maps_to_a_dwell_segment() {
        let container = container_with_edits(
            vec![EditEntry {
                media_start: 120,
                duration: 200,
                dwell: true,
            }],
            0,
            600,
        );

        let edits = read_edits(&container, 1);

        assert_eq!(edits[0].kind, EditKind::Dwell { media_start: 120 });
        assert_eq!(edits[0].media_start(), Some(120));
    }

    #[test]
    fn test_empty_sentinel_wins_over_the_dwell_flag() {
        let container = container_with_edits(
            vec![EditEntry {
                media_start: u64::from(u32::MAX),
                duration: 200,
                dwell: true,
            }],
            0,
            600,
        );

        let edits = read_edits(&container, 1);

        assert!(edits[0].is_empty());
        assert_eq!(edits[0].media_start(), None);
    }
}
