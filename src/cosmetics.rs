//! Custom images for the four sprites, chosen from the image library or
//! the camera and remembered per color slot.

use crate::utils::persistence::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Store key holding the color → image path map.
pub const SELECTED_IMAGES_KEY: &str = "selectedImages";

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "heic"];

/// A sprite that can be re-skinned, keyed by its default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CosmeticSlot {
    Red,
    Pink,
    Yellow,
    Black,
}

impl CosmeticSlot {
    pub const ALL: [CosmeticSlot; 4] = [
        CosmeticSlot::Red,
        CosmeticSlot::Pink,
        CosmeticSlot::Yellow,
        CosmeticSlot::Black,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(CosmeticSlot::Red)
    }

    /// Key used in the stored map.
    pub fn key(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Pink => "pink",
            Self::Yellow => "yellow",
            Self::Black => "black",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Red => "The Rainbow Fish. The hero and the most beautiful and wise fish in the ocean.",
            Self::Pink => "The collider, the bad character.",
            Self::Yellow => "The Jelly Gem. A jellyfish that collects treasures and helps the player.",
            Self::Black => "The Dark Shark. The villain who steals the Magic Pearls and guards them with traps.",
        }
    }
}

/// Chosen images, keyed by slot color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CosmeticSelections {
    images: BTreeMap<String, String>,
}

impl CosmeticSelections {
    /// Stored selections, empty if absent or unreadable.
    pub fn load(store: &KeyValueStore) -> Self {
        Self {
            images: store.load_or_default(SELECTED_IMAGES_KEY),
        }
    }

    pub fn save(&self, store: &KeyValueStore) -> Result<(), StoreError> {
        store.set_json(SELECTED_IMAGES_KEY, &self.images)
    }

    pub fn get(&self, slot: CosmeticSlot) -> Option<&str> {
        self.images.get(slot.key()).map(String::as_str)
    }

    pub fn set(&mut self, slot: CosmeticSlot, image: &Path) {
        self.images
            .insert(slot.key().to_string(), image.to_string_lossy().into_owned());
    }

    /// Glyph drawn for a slot: first letter of the image's file name, or
    /// `fallback` when no image is chosen.
    pub fn glyph(&self, slot: CosmeticSlot, fallback: char) -> char {
        self.get(slot)
            .and_then(|path| Path::new(path).file_stem()?.to_str()?.chars().next())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(fallback)
    }
}

/// Where a picked image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    Library,
    Camera,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Selected(PathBuf),
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Denied and the platform will not ask again.
    Blocked,
}

/// Camera access for the "Take Photo" option.
pub trait CameraAccess {
    fn check(&mut self) -> PermissionStatus;
    fn request(&mut self) -> PermissionStatus;
    fn capture(&mut self) -> PickOutcome;
}

/// Terminals have no camera: permission is always denied.
#[derive(Debug, Default)]
pub struct NoCamera;

impl CameraAccess for NoCamera {
    fn check(&mut self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    fn request(&mut self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    fn capture(&mut self) -> PickOutcome {
        PickOutcome::Failed("no camera available".to_string())
    }
}

/// Check camera permission, asking again once if it was denied.
pub fn ensure_camera_permission(camera: &mut dyn CameraAccess) -> bool {
    let status = match camera.check() {
        PermissionStatus::Denied => camera.request(),
        other => other,
    };
    if status != PermissionStatus::Granted {
        log::info!("camera permission not granted ({:?})", status);
    }
    status == PermissionStatus::Granted
}

/// Take a photo if permission allows it.
pub fn capture_photo(camera: &mut dyn CameraAccess) -> PickOutcome {
    if !ensure_camera_permission(camera) {
        return PickOutcome::Failed("camera permission denied".to_string());
    }
    camera.capture()
}

/// Image files directly inside `dir`, sorted by path. Unreadable
/// directories yield an empty list.
pub fn list_library_images(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot list image library {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_image(path))
        .collect();
    images.sort();
    images
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Record a pick result. Only a selection changes state; it is persisted
/// immediately. Returns true if the selection changed.
pub fn apply_pick(
    selections: &mut CosmeticSelections,
    store: &KeyValueStore,
    slot: CosmeticSlot,
    outcome: PickOutcome,
) -> bool {
    match outcome {
        PickOutcome::Selected(path) => {
            selections.set(slot, &path);
            if let Err(e) = selections.save(store) {
                log::warn!("failed to store image selection: {}", e);
            }
            true
        }
        PickOutcome::Cancelled => {
            log::info!("image picker cancelled for {}", slot.key());
            false
        }
        PickOutcome::Failed(reason) => {
            log::warn!("image picker failed for {}: {}", slot.key(), reason);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::{scratch_path, STORE_FILE};

    struct ScriptedCamera {
        first: PermissionStatus,
        second: PermissionStatus,
        requests: u32,
    }

    impl CameraAccess for ScriptedCamera {
        fn check(&mut self) -> PermissionStatus {
            self.first
        }

        fn request(&mut self) -> PermissionStatus {
            self.requests += 1;
            self.second
        }

        fn capture(&mut self) -> PickOutcome {
            PickOutcome::Selected(PathBuf::from("/tmp/photo.jpg"))
        }
    }

    #[test]
    fn test_slot_keys() {
        let keys: Vec<_> = CosmeticSlot::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, ["red", "pink", "yellow", "black"]);
        assert_eq!(CosmeticSlot::from_index(9), CosmeticSlot::Red);
    }

    #[test]
    fn test_pick_persists_selection() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        let mut selections = CosmeticSelections::load(&store);

        let changed = apply_pick(
            &mut selections,
            &store,
            CosmeticSlot::Yellow,
            PickOutcome::Selected(PathBuf::from("/pics/jelly.png")),
        );
        assert!(changed);

        let reloaded = CosmeticSelections::load(&store);
        assert_eq!(reloaded.get(CosmeticSlot::Yellow), Some("/pics/jelly.png"));
        assert_eq!(reloaded.get(CosmeticSlot::Red), None);
        assert_eq!(reloaded.glyph(CosmeticSlot::Yellow, '@'), 'J');
        assert_eq!(reloaded.glyph(CosmeticSlot::Red, '@'), '@');
    }

    #[test]
    fn test_cancel_and_failure_change_nothing() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        let mut selections = CosmeticSelections::default();

        assert!(!apply_pick(
            &mut selections,
            &store,
            CosmeticSlot::Red,
            PickOutcome::Cancelled
        ));
        assert!(!apply_pick(
            &mut selections,
            &store,
            CosmeticSlot::Red,
            PickOutcome::Failed("boom".to_string())
        ));
        assert_eq!(selections, CosmeticSelections::default());
        assert_eq!(store.get(SELECTED_IMAGES_KEY).unwrap(), None);
    }

    #[test]
    fn test_denied_permission_is_requested_once() {
        let mut camera = ScriptedCamera {
            first: PermissionStatus::Denied,
            second: PermissionStatus::Granted,
            requests: 0,
        };
        assert!(ensure_camera_permission(&mut camera));
        assert_eq!(camera.requests, 1);

        let mut camera = ScriptedCamera {
            first: PermissionStatus::Denied,
            second: PermissionStatus::Denied,
            requests: 0,
        };
        assert!(matches!(capture_photo(&mut camera), PickOutcome::Failed(_)));
        assert_eq!(camera.requests, 1);
    }

    #[test]
    fn test_blocked_permission_is_not_requested() {
        let mut camera = ScriptedCamera {
            first: PermissionStatus::Blocked,
            second: PermissionStatus::Granted,
            requests: 0,
        };
        assert!(!ensure_camera_permission(&mut camera));
        assert_eq!(camera.requests, 0);
    }

    #[test]
    fn test_terminal_has_no_camera() {
        assert!(matches!(
            capture_photo(&mut NoCamera),
            PickOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_list_library_images_filters_and_sorts() {
        let dir = scratch_path("library");
        fs::create_dir_all(&dir).unwrap();
        for name in ["b.PNG", "a.jpg", "notes.txt", "c.webp"] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        fs::create_dir_all(dir.join("sub.png")).unwrap();

        let names: Vec<String> = list_library_images(&dir)
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.jpg", "b.PNG", "c.webp"]);
    }

    #[test]
    fn test_missing_library_is_empty() {
        assert!(list_library_images(&scratch_path("nowhere")).is_empty());
    }
}
