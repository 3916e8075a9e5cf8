/// Integration tests for library scanner
///
/// Tests build real folder trees in temporary directories
use std::fs;
use std::path::Path;
use tempo_core::TrackId;
use tempo_library::{
    ArtworkConfig, ArtworkResolver, LibraryError, LibraryScanner, ScanConfig, UNKNOWN_ALBUM,
    UNKNOWN_ARTIST,
};

/// Write a short untagged mono 16-bit PCM WAV file
fn write_wav(path: &Path) {
    let sample_rate: u32 = 8000;
    let samples: u32 = 800;
    let data_len = samples * 2;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

#[test]
fn scan_nonexistent_directory_returns_error() {
    let mut scanner = LibraryScanner::new();
    let result = scanner.scan(Path::new("/nonexistent/music/folder"));

    assert!(matches!(result, Err(LibraryError::DirectoryNotFound(_))));
}

#[test]
fn scan_directory_without_audio_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "not music").unwrap();
    fs::write(dir.path().join("cover.jpg"), [0xff, 0xd8]).unwrap();

    let mut scanner = LibraryScanner::new();
    let (catalog, stats) = scanner.scan(dir.path()).unwrap();

    assert!(catalog.is_empty());
    assert_eq!(stats.files_discovered, 0);
    assert!(stats.errors.is_empty());
}

#[test]
fn scan_untagged_files_uses_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(&dir.path().join("Artist").join("Album").join("01 Intro.wav"));

    let mut scanner = LibraryScanner::new();
    let (catalog, stats) = scanner.scan(dir.path()).unwrap();

    assert_eq!(stats.tracks_added, 1);
    let track = catalog.get(&TrackId::from(0)).unwrap();
    assert_eq!(track.title, "01 Intro.wav");
    assert_eq!(track.artist, UNKNOWN_ARTIST);
    assert_eq!(track.album, UNKNOWN_ALBUM);
    assert_eq!(track.file, "Artist/Album/01 Intro.wav");
    assert!(track.artwork.is_none());
}

#[test]
fn scan_assigns_ids_in_file_name_order() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(&dir.path().join("b.wav"));
    write_wav(&dir.path().join("a.wav"));
    write_wav(&dir.path().join("c").join("z.wav"));

    let mut scanner = LibraryScanner::new();
    let (catalog, _) = scanner.scan(dir.path()).unwrap();

    let files: Vec<_> = catalog.tracks().iter().map(|t| t.file.as_str()).collect();
    assert_eq!(files, vec!["a.wav", "b.wav", "c/z.wav"]);
    assert_eq!(catalog.tracks()[2].id, TrackId::from(2));
}

#[test]
fn scan_picks_up_folder_art() {
    let dir = tempfile::tempdir().unwrap();
    let album = dir.path().join("Album");
    write_wav(&album.join("01.wav"));
    write_wav(&album.join("02.wav"));
    fs::write(album.join("cover.jpg"), [0xff, 0xd8, 0xff, 0xe0]).unwrap();

    let mut scanner = LibraryScanner::new();
    let (catalog, stats) = scanner.scan(dir.path()).unwrap();

    assert_eq!(stats.tracks_with_artwork, 2);
    let artwork = catalog.tracks()[0].artwork.as_ref().unwrap();
    assert_eq!(artwork.mime, "image/jpeg");
    assert_eq!(artwork.data, vec![0xff, 0xd8, 0xff, 0xe0]);
    // Both tracks share one directory lookup
    assert_eq!(scanner.artwork().cached_directories(), 1);
}

#[test]
fn scan_records_unreadable_files_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.mp3"), b"definitely not audio").unwrap();
    write_wav(&dir.path().join("good.wav"));

    let mut scanner = LibraryScanner::new();
    let (catalog, stats) = scanner.scan(dir.path()).unwrap();

    assert_eq!(stats.files_discovered, 2);
    assert_eq!(catalog.len() + stats.errors.len(), 2);
    assert!(catalog.tracks().iter().any(|t| t.file == "good.wav"));
}

#[test]
fn scan_respects_configured_extensions() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(&dir.path().join("keep.wav"));
    fs::write(dir.path().join("skip.mp3"), b"ignored").unwrap();

    let mut scanner = LibraryScanner::with_config(ScanConfig {
        extensions: vec!["wav".to_string()],
        ..ScanConfig::default()
    });
    let (catalog, stats) = scanner.scan(dir.path()).unwrap();

    assert_eq!(stats.files_discovered, 1);
    assert_eq!(catalog.len(), 1);
}

#[test]
fn folder_art_follows_name_priority() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("front.jpg"), [3]).unwrap();
    fs::write(dir.path().join("folder.jpg"), [1]).unwrap();

    let mut resolver = ArtworkResolver::default();
    let artwork = resolver.folder_art(dir.path()).unwrap().unwrap();

    assert_eq!(artwork.data, vec![1]);
}

#[test]
fn folder_art_misses_are_cached() {
    let dir = tempfile::tempdir().unwrap();
    let mut resolver = ArtworkResolver::new(ArtworkConfig::default());

    assert!(resolver.find_folder_art(dir.path()).is_none());

    // Added after the first lookup, so the cached miss still applies
    fs::write(dir.path().join("cover.jpg"), [0xff]).unwrap();
    assert!(resolver.find_folder_art(dir.path()).is_none());

    resolver.clear_cache();
    assert_eq!(
        resolver.find_folder_art(dir.path()),
        Some(dir.path().join("cover.jpg"))
    );
}
