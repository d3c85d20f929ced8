//! Test helpers for writing request, place and state files.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use wherehere_core::test_support::{gangnam_places, gangnam_station};
use wherehere_core::{Mood, RecommendationRequest, Role};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Temporary directory addressed with UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write a tired healer request at Gangnam Station and return its path.
    pub(super) fn write_request(&self) -> Utf8PathBuf {
        let mut request = RecommendationRequest::new(Role::Healer, gangnam_station());
        request.mood = Some(Mood::new("지침", 0.8));
        let path = self.path("request.json");
        let payload = serde_json::to_vec_pretty(&request).expect("serialise request");
        write_utf8(&path, &payload);
        path
    }

    /// Write the Gangnam fixture places and return the file path.
    pub(super) fn write_places(&self) -> Utf8PathBuf {
        let path = self.path("places.json");
        let payload = serde_json::to_vec_pretty(&gangnam_places()).expect("serialise places");
        write_utf8(&path, &payload);
        path
    }

    /// Persist the Gangnam fixture places into a SQLite database.
    #[cfg(feature = "store-sqlite")]
    pub(super) fn write_database(&self) -> Utf8PathBuf {
        let path = self.path("places.db");
        wherehere_core::SqliteCandidateSource::persist(path.as_std_path(), &gangnam_places())
            .expect("persist places");
        path
    }
}
