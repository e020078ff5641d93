// MP3 embedding through the ID3 backend seam

use std::cell::RefCell;
use std::io::Cursor;

use id3::TagLike;
use tagsplice::id3::{Id3Op, COVER_FRONT_TYPE};
use tagsplice::{
    AlbumArt, AudioFormat, EmbedError, Embedder, Id3Backend, Id3Plan, Outcome, TrackMetadata,
};

const FRAMES: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x0F, 0xF0, 0x00, 0x00, 0x69];

#[derive(Default)]
struct RecordingBackend {
    calls: RefCell<Vec<Vec<&'static str>>>,
}

impl Id3Backend for RecordingBackend {
    fn apply(&self, audio: &[u8], plan: &Id3Plan<'_>) -> Result<Vec<u8>, EmbedError> {
        assert!(matches!(plan.ops().first(), Some(Id3Op::Clear)));
        self.calls.borrow_mut().push(plan.frame_ids());
        let mut out = b"TAG!".to_vec();
        out.extend_from_slice(audio);
        Ok(out)
    }
}

fn metadata() -> TrackMetadata {
    TrackMetadata {
        music_name: Some("Song".into()),
        artists: Some(vec![("A".into(), 1), ("B".into(), 2)]),
        album: Some("Record".into()),
        ..Default::default()
    }
}

fn jpeg() -> AlbumArt {
    AlbumArt::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0xFF, 0xD9], "image/jpeg")
}

#[test]
fn non_flac_goes_to_backend_once() {
    let backend = RecordingBackend::default();
    let embedder = Embedder::with_backend(&backend);
    let art = jpeg();

    let outcome = embedder
        .try_embed(FRAMES, None, Some(&metadata()), Some(&art))
        .unwrap();
    match outcome {
        Outcome::Tagged { format, buffer } => {
            assert_eq!(format, AudioFormat::Mp3);
            assert!(buffer.ends_with(FRAMES));
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let calls = backend.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], vec!["TIT2", "TPE1", "TALB", "APIC"]);
}

#[test]
fn plan_without_metadata_is_just_the_cover() {
    let art = jpeg();
    let plan = Id3Plan::for_track(None, &art);
    assert_eq!(plan.frame_ids(), vec!["APIC"]);
    match plan.ops().last() {
        Some(Id3Op::Picture(picture)) => {
            assert_eq!(picture.picture_type, COVER_FRONT_TYPE);
            assert_eq!(picture.description, "Cover");
            assert_eq!(picture.mime_type, "image/jpeg");
            assert!(picture.unicode);
        }
        other => panic!("unexpected op {:?}", other),
    }
}

#[test]
fn mp3_hint_skips_flac_rewriter() {
    let backend = RecordingBackend::default();
    let mut buffer = b"fLaC".to_vec();
    buffer.extend_from_slice(FRAMES);

    let out = Embedder::with_backend(&backend).embed(
        &buffer,
        Some(AudioFormat::Mp3),
        None,
        Some(&jpeg()),
    );
    assert!(out.starts_with(b"TAG!"));
    assert_eq!(backend.calls.borrow().len(), 1);
}

#[test]
fn default_backend_writes_readable_tag() {
    let art = jpeg();
    let out = tagsplice::embed_album_art(FRAMES, None, Some(&metadata()), Some(&art));
    assert!(out.starts_with(b"ID3"));
    assert!(out.ends_with(FRAMES));

    let tag = id3::Tag::read_from2(Cursor::new(out.as_slice())).unwrap();
    assert_eq!(tag.title(), Some("Song"));
    assert_eq!(tag.album(), Some("Record"));

    let pictures: Vec<_> = tag.pictures().collect();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].picture_type, id3::frame::PictureType::CoverFront);
    assert_eq!(pictures[0].mime_type, "image/jpeg");
    assert_eq!(pictures[0].data, art.bytes);
}

#[test]
fn retagging_replaces_the_old_tag() {
    let art = jpeg();
    let once = tagsplice::embed_album_art(FRAMES, None, Some(&metadata()), Some(&art));

    let renamed = TrackMetadata {
        music_name: Some("Other".into()),
        ..metadata()
    };
    let twice = tagsplice::embed_album_art(&once, None, Some(&renamed), Some(&art));

    assert!(twice.ends_with(FRAMES));
    assert_eq!(twice.windows(3).filter(|w| *w == b"ID3").count(), 1);

    let tag = id3::Tag::read_from2(Cursor::new(twice.as_slice())).unwrap();
    assert_eq!(tag.title(), Some("Other"));
    assert_eq!(tag.pictures().count(), 1);
}
