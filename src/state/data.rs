/// Shared data structures for the application state
///
/// These structs represent the album record as the gallery server sends it,
/// and the nested records the form edits.

use serde::{Deserialize, Deserializer, Serialize};

/// A gallery album as loaded from the server
///
/// Missing or `null` fields fall back to the form defaults, so a sparse
/// record still opens in the editor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Album {
    /// Server-assigned ID (read-only here)
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Server-generated slug (read-only here)
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_image_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_sub_albums: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i32,
    #[serde(default = "default_active", deserialize_with = "null_as_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_albums: Vec<SubAlbum>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageRef>,
}

/// A group of images inside an album
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubAlbum {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_image_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageRef>,
}

/// One image slot: a display ("virtual") ID and the backing ("real") ID
///
/// Both are free text and may be blank.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub virtual_image_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub real_image_id: String,
}

/// Which identifier of an [`ImageRef`] an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageField {
    VirtualImageId,
    RealImageId,
}

impl ImageField {
    /// Wire name, also used in error paths
    pub fn key(self) -> &'static str {
        match self {
            ImageField::VirtualImageId => "virtual_image_id",
            ImageField::RealImageId => "real_image_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImageField::VirtualImageId => "Virtual Image ID",
            ImageField::RealImageId => "Real Image ID",
        }
    }
}

impl ImageRef {
    pub fn get(&self, field: ImageField) -> &str {
        match field {
            ImageField::VirtualImageId => &self.virtual_image_id,
            ImageField::RealImageId => &self.real_image_id,
        }
    }

    /// Copy of this image with one identifier replaced
    pub fn with(&self, field: ImageField, value: String) -> Self {
        let mut image = self.clone();
        match field {
            ImageField::VirtualImageId => image.virtual_image_id = value,
            ImageField::RealImageId => image.real_image_id = value,
        }
        image
    }
}

/// A whole-field replacement on a [`SubAlbum`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubAlbumUpdate {
    Title(String),
    CoverImageId(String),
    /// Replaces the entire nested image sequence
    Images(Vec<ImageRef>),
}

impl SubAlbum {
    /// Copy of this sub-album with one field replaced
    pub fn with(&self, update: SubAlbumUpdate) -> Self {
        let mut sub_album = self.clone();
        match update {
            SubAlbumUpdate::Title(title) => sub_album.title = title,
            SubAlbumUpdate::CoverImageId(id) => sub_album.cover_image_id = id,
            SubAlbumUpdate::Images(images) => sub_album.images = images,
        }
        sub_album
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_active))
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_album_uses_defaults() {
        let album: Album = serde_json::from_str(r#"{"id": 7}"#).unwrap();

        assert_eq!(album.id, 7);
        assert_eq!(album.title, "");
        assert_eq!(album.slug, "");
        assert_eq!(album.cover_image_id, "");
        assert!(!album.has_sub_albums);
        assert_eq!(album.order, 0);
        assert!(album.is_active);
        assert!(album.sub_albums.is_empty());
        assert!(album.images.is_empty());
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let json = r#"{
            "id": 3,
            "title": null,
            "is_active": null,
            "order": null,
            "sub_albums": [{"title": "Day 1", "cover_image_id": null, "images": null}],
            "images": [{"virtual_image_id": null, "real_image_id": "R1"}]
        }"#;
        let album: Album = serde_json::from_str(json).unwrap();

        assert_eq!(album.title, "");
        assert!(album.is_active);
        assert_eq!(album.order, 0);
        assert_eq!(album.sub_albums[0].title, "Day 1");
        assert_eq!(album.sub_albums[0].cover_image_id, "");
        assert!(album.sub_albums[0].images.is_empty());
        assert_eq!(album.images[0].virtual_image_id, "");
        assert_eq!(album.images[0].real_image_id, "R1");
    }

    #[test]
    fn test_inactive_album_is_kept() {
        let album: Album = serde_json::from_str(r#"{"id": 1, "is_active": false}"#).unwrap();
        assert!(!album.is_active);
    }

    #[test]
    fn test_image_with_replaces_one_field() {
        let image = ImageRef {
            virtual_image_id: "V".into(),
            real_image_id: "R".into(),
        };

        let updated = image.with(ImageField::RealImageId, "R2".into());

        assert_eq!(updated.virtual_image_id, "V");
        assert_eq!(updated.get(ImageField::RealImageId), "R2");
        // The original is untouched
        assert_eq!(image.real_image_id, "R");
    }
}
