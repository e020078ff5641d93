// FLAC embedding, end to end through the public API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tagsplice::art::{self, placeholder};
use tagsplice::flac::{self, FlacMetadataBlockType, FLAC_SIGNATURE};
use tagsplice::{
    embed_album_art, AlbumArt, ArtCache, ArtError, AudioFormat, Embedder, ExtractedTrack, Outcome,
    TrackMetadata,
};

const AUDIO: &[u8] = &[0xFF, 0xF8, 0x69, 0x18, 0x00, 0x00, 0xBF, 0x03, 0x58, 0xFD, 0x03, 0x12];

fn block(block_type: u8, is_last: bool, body: &[u8]) -> Vec<u8> {
    let len = body.len() as u32;
    let mut out = vec![
        block_type | if is_last { 0x80 } else { 0 },
        (len >> 16) as u8,
        (len >> 8) as u8,
        len as u8,
    ];
    out.extend_from_slice(body);
    out
}

/// STREAMINFO, SEEKTABLE, stale comment, stale picture, PADDING, audio
fn sample_flac() -> Vec<u8> {
    let mut stale_comment = Vec::new();
    stale_comment.extend_from_slice(&3u32.to_le_bytes());
    stale_comment.extend_from_slice(b"old");
    stale_comment.extend_from_slice(&1u32.to_le_bytes());
    stale_comment.extend_from_slice(&9u32.to_le_bytes());
    stale_comment.extend_from_slice(b"TITLE=Old");

    let stale_picture = flac::build_picture_block(&AlbumArt::new(vec![9; 16], "image/gif"), None);

    let mut out = FLAC_SIGNATURE.to_vec();
    out.extend(block(0, false, &[0x11; 34]));
    out.extend(block(3, false, &[0x22; 18]));
    out.extend(block(4, false, &stale_comment));
    out.extend(block(6, false, &stale_picture));
    out.extend(block(1, true, &[0; 64]));
    out.extend_from_slice(AUDIO);
    out
}

fn png_10x10() -> Vec<u8> {
    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&10u32.to_be_bytes());
    png.extend_from_slice(&10u32.to_be_bytes());
    png.extend_from_slice(&[8, 6, 0, 0, 0]);
    png.extend_from_slice(&[0; 4]);
    png
}

fn metadata() -> TrackMetadata {
    TrackMetadata {
        music_name: Some("Song".into()),
        artists: Some(vec![("A".into(), 1), ("B".into(), 2)]),
        album: Some("Record".into()),
        ..Default::default()
    }
}

#[test]
fn replaces_stale_tags_and_keeps_everything_else() {
    let source = sample_flac();
    let art = art::from_bytes(png_10x10(), None);
    let out = embed_album_art(&source, None, Some(&metadata()), Some(&art));

    let before = flac::inspect(&source).unwrap();
    let after = flac::inspect(&out).unwrap();

    let types: Vec<u8> = after.blocks.iter().map(|b| b.block_type).collect();
    assert_eq!(types, vec![0, 3, 1, 4, 6]);

    // Exactly one last flag, on the picture block
    assert_eq!(after.last_flags(), 1);
    let last = after.blocks.last().unwrap();
    assert!(last.is_last);
    assert_eq!(last.block_type, FlacMetadataBlockType::Picture.to_byte());

    assert_eq!(after.audio_length, before.audio_length);
    assert_eq!(&out[after.audio_offset..], AUDIO);
}

#[test]
fn comment_fields_in_order() {
    let art = AlbumArt::new(vec![1, 2, 3], "image/jpeg");
    let out = embed_album_art(&sample_flac(), None, Some(&metadata()), Some(&art));
    let report = flac::inspect(&out).unwrap();

    let keys: Vec<&str> = report.comments.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["TITLE", "ARTIST", "ALBUM"]);
    assert_eq!(report.comment("title"), Some("Song"));
    assert_eq!(report.comment("ARTIST"), Some("A / B"));
    assert_eq!(report.comment("ALBUM"), Some("Record"));
    assert_eq!(report.vendor.as_deref(), Some("tagsplice"));

    assert_eq!(report.pictures.len(), 1);
    assert_eq!(report.pictures[0].description, "Record");
    assert_eq!(report.pictures[0].picture_type, "Cover (front)");
}

#[test]
fn png_without_metadata() {
    let art = art::from_bytes(png_10x10(), None);
    assert_eq!(art.mime_type, "image/png");

    let out = embed_album_art(&sample_flac(), None, None, Some(&art));
    let report = flac::inspect(&out).unwrap();

    assert!(report.blocks.iter().all(|b| b.block_type != 4));
    assert!(report.comments.is_empty());
    let picture = &report.pictures[0];
    assert_eq!((picture.width, picture.height), (10, 10));
    assert_eq!(picture.depth, 24);
    assert_eq!(picture.mime_type, "image/png");
    assert_eq!(picture.data, png_10x10());
}

#[test]
fn re_embedding_is_stable() {
    let art = AlbumArt::new(vec![7; 40], "image/jpeg");
    let meta = metadata();
    let once = embed_album_art(&sample_flac(), None, Some(&meta), Some(&art));
    let twice = embed_album_art(&once, None, Some(&meta), Some(&art));

    assert_eq!(once, twice);

    let report = flac::inspect(&twice).unwrap();
    assert_eq!(report.pictures.len(), 1);
    assert_eq!(&twice[report.audio_offset..], AUDIO);
}

#[test]
fn minimal_stream_without_audio() {
    let mut source = FLAC_SIGNATURE.to_vec();
    source.extend(block(0, true, &[0x11; 34]));

    let art = AlbumArt::new(vec![1], "image/png");
    let out = embed_album_art(&source, Some(AudioFormat::Flac), None, Some(&art));
    let report = flac::inspect(&out).unwrap();

    assert_eq!(report.blocks.len(), 2);
    assert!(!report.blocks[0].is_last);
    assert!(report.blocks[1].is_last);
    assert_eq!(report.audio_length, 0);
}

#[test]
fn overrun_returns_original() {
    let mut source = FLAC_SIGNATURE.to_vec();
    // Claims 0x10 bytes but only 4 follow
    source.extend_from_slice(&[0x80, 0x00, 0x00, 0x10, 1, 2, 3, 4]);

    let art = AlbumArt::new(vec![1], "image/png");
    assert_eq!(embed_album_art(&source, None, None, Some(&art)), source);
    assert!(Embedder::new()
        .try_embed(&source, None, None, Some(&art))
        .is_err());
}

#[test]
fn missing_art_leaves_buffer_alone() {
    let source = sample_flac();
    assert_eq!(
        Embedder::new()
            .try_embed(&source, None, Some(&metadata()), None)
            .unwrap(),
        Outcome::NoArt
    );
    assert_eq!(embed_album_art(&source, None, Some(&metadata()), None), source);
}

#[test]
fn embed_track_fetches_art_once() {
    let fetches = AtomicUsize::new(0);
    let png = png_10x10();
    let source = |url: &str| -> Result<AlbumArt, ArtError> {
        fetches.fetch_add(1, Ordering::SeqCst);
        assert_eq!(url, "https://img.example/cover.png");
        Ok(art::from_bytes(png.clone(), None))
    };

    let track = ExtractedTrack {
        buffer: sample_flac(),
        format: None,
        metadata: Some(TrackMetadata {
            album_pic: Some("https://img.example/cover.png".into()),
            ..metadata()
        }),
    };

    let cache = ArtCache::new();
    let embedder = Embedder::new();
    let first = embedder.embed_track(&track, &cache, &source);
    let second = embedder.embed_track(&track, &cache, &source);

    assert_eq!(first, second);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);

    let report = flac::inspect(&first).unwrap();
    assert_eq!(report.pictures[0].width, 10);
}

#[test]
fn embed_track_falls_back_to_placeholder() {
    let failing = |_: &str| -> Result<AlbumArt, ArtError> { Err(ArtError::Empty("gone".into())) };

    let track = ExtractedTrack {
        buffer: sample_flac(),
        format: Some(AudioFormat::Flac),
        metadata: Some(TrackMetadata {
            album_pic: Some("https://img.example/missing.jpg".into()),
            ..Default::default()
        }),
    };

    let cache = ArtCache::new();
    let out = Embedder::new().embed_track(&track, &cache, &failing);
    let report = flac::inspect(&out).unwrap();

    let expected: Arc<AlbumArt> = Arc::new(placeholder());
    assert_eq!(report.pictures[0].mime_type, expected.mime_type);
    assert_eq!(report.pictures[0].data, expected.bytes);
    assert_eq!(report.pictures[0].width, 200);
}
