/// Working copy of an album while it is being edited
///
/// `FormState` is created once from the loaded [`Album`], mutated in place
/// by the UI, and turned into an [`AlbumPayload`] on submit. Collections use
/// index identity: removing an entry shifts every later index down by one.

use serde::Serialize;

use super::data::{Album, ImageField, ImageRef, SubAlbum, SubAlbumUpdate};
use super::errors::FieldErrors;

/// Error paths for the two collections as a whole
pub const SUB_ALBUMS_PATH: &str = "sub_albums";
pub const IMAGES_PATH: &str = "images";

/// Which collection the album currently edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// `images` is editable, `sub_albums` is empty
    Flat,
    /// `sub_albums` is editable, `images` is empty
    Grouped,
}

/// Address of a single text field in the form
///
/// Typed input and picker results both go through [`FormState::apply`]
/// with one of these, so the two paths cannot diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTarget {
    Title,
    CoverImageId,
    Order,
    SubAlbumTitle(usize),
    SubAlbumCover(usize),
    /// Top-level image at `index`
    Image(usize, ImageField),
    /// Image `index` of sub-album `sub`
    SubAlbumImage(usize, usize, ImageField),
}

impl FieldTarget {
    /// Key the server uses for this field in validation errors
    pub fn path(&self) -> String {
        match self {
            FieldTarget::Title => "title".to_string(),
            FieldTarget::CoverImageId => "cover_image_id".to_string(),
            FieldTarget::Order => "order".to_string(),
            FieldTarget::SubAlbumTitle(sub) => format!("sub_albums.{sub}.title"),
            FieldTarget::SubAlbumCover(sub) => format!("sub_albums.{sub}.cover_image_id"),
            FieldTarget::Image(index, field) => format!("images.{index}.{}", field.key()),
            FieldTarget::SubAlbumImage(sub, index, field) => {
                format!("sub_albums.{sub}.images.{index}.{}", field.key())
            }
        }
    }

    /// Whether the field holds an external file ID (and gets a picker)
    pub fn is_identifier(&self) -> bool {
        !matches!(
            self,
            FieldTarget::Title | FieldTarget::Order | FieldTarget::SubAlbumTitle(_)
        )
    }
}

/// Body sent to the server on submit
///
/// Field names match the update endpoint exactly.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AlbumPayload {
    pub title: String,
    pub cover_image_id: String,
    pub has_sub_albums: bool,
    pub order: i32,
    pub is_active: bool,
    pub sub_albums: Vec<SubAlbum>,
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub title: String,
    pub cover_image_id: String,
    pub has_sub_albums: bool,
    pub order: i32,
    pub is_active: bool,
    pub sub_albums: Vec<SubAlbum>,
    pub images: Vec<ImageRef>,
    /// Errors from the last completed submit
    pub errors: FieldErrors,
    /// True while a submit request is in flight
    pub submitting: bool,
    /// Bumped whenever rows are added, removed or the mode flips
    revision: u64,
}

impl FormState {
    /// Start an editing session from the server's record
    pub fn from_album(album: &Album) -> Self {
        Self {
            title: album.title.clone(),
            cover_image_id: album.cover_image_id.clone(),
            has_sub_albums: album.has_sub_albums,
            order: album.order,
            is_active: album.is_active,
            sub_albums: album.sub_albums.clone(),
            images: album.images.clone(),
            errors: FieldErrors::new(),
            submitting: false,
            revision: 0,
        }
    }

    /// Layout revision; a [`FieldTarget`] taken at one revision may point
    /// at a different row in any other
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> ContentMode {
        if self.has_sub_albums {
            ContentMode::Grouped
        } else {
            ContentMode::Flat
        }
    }

    /// Flip between flat images and sub-albums
    ///
    /// Entering one mode discards the other mode's collection. There is no
    /// undo. Setting the current value again changes nothing.
    pub fn set_has_sub_albums(&mut self, enabled: bool) {
        if self.has_sub_albums == enabled {
            return;
        }

        self.has_sub_albums = enabled;
        self.revision += 1;
        if enabled {
            if !self.images.is_empty() {
                tracing::debug!(dropped = self.images.len(), "clearing flat images");
            }
            self.images = Vec::new();
        } else {
            if !self.sub_albums.is_empty() {
                tracing::debug!(dropped = self.sub_albums.len(), "clearing sub-albums");
            }
            self.sub_albums = Vec::new();
        }
    }

    pub fn set_is_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Store raw text from the order input as an integer
    pub fn set_order_input(&mut self, input: &str) {
        self.order = coerce_order(input);
    }

    /// Write a text value into the addressed field
    pub fn apply(&mut self, target: FieldTarget, value: String) {
        match target {
            FieldTarget::Title => self.title = value,
            FieldTarget::CoverImageId => self.cover_image_id = value,
            FieldTarget::Order => self.set_order_input(&value),
            FieldTarget::SubAlbumTitle(sub) => {
                self.update_sub_album(sub, SubAlbumUpdate::Title(value))
            }
            FieldTarget::SubAlbumCover(sub) => {
                self.update_sub_album(sub, SubAlbumUpdate::CoverImageId(value))
            }
            FieldTarget::Image(index, field) => self.update_image(index, field, value),
            FieldTarget::SubAlbumImage(sub, index, field) => {
                self.update_sub_album_image(sub, index, field, value)
            }
        }
    }

    /// Current text of the addressed field, as the input shows it
    pub fn value(&self, target: FieldTarget) -> String {
        match target {
            FieldTarget::Title => self.title.clone(),
            FieldTarget::CoverImageId => self.cover_image_id.clone(),
            FieldTarget::Order => self.order.to_string(),
            FieldTarget::SubAlbumTitle(sub) => self
                .sub_albums
                .get(sub)
                .map(|s| s.title.clone())
                .unwrap_or_default(),
            FieldTarget::SubAlbumCover(sub) => self
                .sub_albums
                .get(sub)
                .map(|s| s.cover_image_id.clone())
                .unwrap_or_default(),
            FieldTarget::Image(index, field) => self
                .images
                .get(index)
                .map(|i| i.get(field).to_string())
                .unwrap_or_default(),
            FieldTarget::SubAlbumImage(sub, index, field) => self
                .sub_albums
                .get(sub)
                .and_then(|s| s.images.get(index))
                .map(|i| i.get(field).to_string())
                .unwrap_or_default(),
        }
    }

    /// Error message to show under the addressed field
    pub fn error_for(&self, target: FieldTarget) -> Option<&str> {
        self.errors.get(&target.path())
    }

    /// Error message for a path that has no text input, e.g. `is_active`
    pub fn error_at(&self, path: &str) -> Option<&str> {
        self.errors.get(path)
    }

    /// Error for the collection currently being edited as a whole
    ///
    /// `sub_albums` in grouped mode, `images` in flat mode.
    pub fn collection_error(&self) -> Option<&str> {
        match self.mode() {
            ContentMode::Grouped => self.error_at(SUB_ALBUMS_PATH),
            ContentMode::Flat => self.error_at(IMAGES_PATH),
        }
    }

    // ========== Flat images ==========

    pub fn add_image(&mut self) {
        append_image(&mut self.images);
        self.revision += 1;
    }

    pub fn update_image(&mut self, index: usize, field: ImageField, value: String) {
        update_image_in(&mut self.images, index, field, value);
    }

    pub fn remove_image(&mut self, index: usize) {
        if remove_at(&mut self.images, index) {
            self.revision += 1;
        }
    }

    // ========== Sub-albums ==========

    pub fn add_sub_album(&mut self) {
        self.sub_albums.push(SubAlbum::default());
        self.revision += 1;
    }

    /// Replace one whole field of a sub-album
    pub fn update_sub_album(&mut self, index: usize, update: SubAlbumUpdate) {
        let replaces_rows = matches!(update, SubAlbumUpdate::Images(_));
        match self.sub_albums.get_mut(index) {
            Some(slot) => *slot = slot.with(update),
            None => {
                tracing::debug!(index, "sub-album update out of range");
                return;
            }
        }
        if replaces_rows {
            self.revision += 1;
        }
    }

    pub fn remove_sub_album(&mut self, index: usize) {
        if remove_at(&mut self.sub_albums, index) {
            self.revision += 1;
        }
    }

    pub fn add_sub_album_image(&mut self, sub: usize) {
        if self.edit_sub_album_images(sub, append_image) {
            self.revision += 1;
        }
    }

    pub fn update_sub_album_image(
        &mut self,
        sub: usize,
        index: usize,
        field: ImageField,
        value: String,
    ) {
        self.edit_sub_album_images(sub, |images| {
            update_image_in(images, index, field, value)
        });
    }

    pub fn remove_sub_album_image(&mut self, sub: usize, index: usize) {
        let mut removed = false;
        self.edit_sub_album_images(sub, |images| removed = remove_at(images, index));
        if removed {
            self.revision += 1;
        }
    }

    /// Edit a copy of one sub-album's images and write it back whole
    ///
    /// Returns false when the sub-album does not exist.
    fn edit_sub_album_images(
        &mut self,
        sub: usize,
        edit: impl FnOnce(&mut Vec<ImageRef>),
    ) -> bool {
        let Some(current) = self.sub_albums.get(sub) else {
            tracing::debug!(sub, "sub-album index out of range");
            return false;
        };
        let mut images = current.images.clone();
        edit(&mut images);
        self.sub_albums[sub].images = images;
        true
    }

    // ========== Submission ==========

    /// Everything the server needs, without the transient fields
    pub fn payload(&self) -> AlbumPayload {
        AlbumPayload {
            title: self.title.clone(),
            cover_image_id: self.cover_image_id.clone(),
            has_sub_albums: self.has_sub_albums,
            order: self.order,
            is_active: self.is_active,
            sub_albums: self.sub_albums.clone(),
            images: self.images.clone(),
        }
    }

    /// Mark a submit as started and return its payload
    ///
    /// Returns `None` while another submit is still in flight.
    pub fn begin_submit(&mut self) -> Option<AlbumPayload> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.payload())
    }

    /// The server accepted the update
    pub fn submit_succeeded(&mut self) {
        self.submitting = false;
        self.errors = FieldErrors::new();
    }

    /// The server rejected the update; its errors replace the previous set
    pub fn submit_rejected(&mut self, errors: FieldErrors) {
        self.submitting = false;
        self.errors = errors;
    }

    /// The request never produced a validation answer
    ///
    /// The form becomes editable again and keeps its last known errors.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }
}

/// Integer value of an order input
///
/// Reads an optional sign and the leading digits, ignoring anything after
/// them ("12px" is 12). Input without leading digits is 0. Values outside
/// the `i32` range saturate.
pub fn coerce_order(input: &str) -> i32 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return 0;
    }

    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn append_image(images: &mut Vec<ImageRef>) {
    images.push(ImageRef::default());
}

fn update_image_in(images: &mut [ImageRef], index: usize, field: ImageField, value: String) {
    match images.get_mut(index) {
        Some(slot) => *slot = slot.with(field, value),
        None => tracing::debug!(index, "image update out of range"),
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        tracing::debug!(index, len = items.len(), "remove out of range");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_album() -> Album {
        serde_json::from_str(r#"{"id": 1, "title": "Summer", "slug": "summer"}"#).unwrap()
    }

    fn image(virtual_id: &str, real_id: &str) -> ImageRef {
        ImageRef {
            virtual_image_id: virtual_id.into(),
            real_image_id: real_id.into(),
        }
    }

    fn grouped_form() -> FormState {
        let mut form = FormState::from_album(&blank_album());
        form.set_has_sub_albums(true);
        for n in 0..2 {
            form.add_sub_album();
            form.apply(FieldTarget::SubAlbumTitle(n), format!("Day {}", n + 1));
            form.add_sub_album_image(n);
            form.apply(
                FieldTarget::SubAlbumImage(n, 0, ImageField::RealImageId),
                format!("R{n}"),
            );
        }
        form
    }

    #[test]
    fn test_initial_state_from_album() {
        let form = FormState::from_album(&blank_album());

        assert_eq!(form.title, "Summer");
        assert_eq!(form.mode(), ContentMode::Flat);
        assert!(form.is_active);
        assert!(form.errors.is_empty());
        assert!(!form.submitting);
    }

    #[test]
    fn test_toggle_to_grouped_clears_images() {
        let mut form = FormState::from_album(&blank_album());
        form.add_image();
        form.add_image();
        form.add_image();
        let sub_albums_before = form.sub_albums.clone();

        form.set_has_sub_albums(true);

        assert_eq!(form.mode(), ContentMode::Grouped);
        assert!(form.images.is_empty());
        assert_eq!(form.sub_albums, sub_albums_before);
    }

    #[test]
    fn test_toggle_to_flat_clears_sub_albums_without_carrying_images() {
        let mut form = grouped_form();
        assert_eq!(form.sub_albums.len(), 2);

        form.set_has_sub_albums(false);

        assert_eq!(form.mode(), ContentMode::Flat);
        assert!(form.sub_albums.is_empty());
        assert!(form.images.is_empty());
    }

    #[test]
    fn test_toggle_to_same_value_keeps_data() {
        let mut form = grouped_form();
        form.set_has_sub_albums(true);
        assert_eq!(form.sub_albums.len(), 2);
    }

    #[test]
    fn test_append_adds_blank_image() {
        let mut form = FormState::from_album(&blank_album());
        form.add_image();
        form.apply(FieldTarget::Image(0, ImageField::VirtualImageId), "V".into());

        form.add_image();

        assert_eq!(form.images.len(), 2);
        assert_eq!(form.images[1], image("", ""));
    }

    #[test]
    fn test_append_then_update_scenario() {
        let mut form = FormState::from_album(&blank_album());

        form.add_image();
        form.add_image();
        form.update_image(0, ImageField::RealImageId, "ABC".into());

        assert_eq!(form.images, vec![image("", "ABC"), image("", "")]);
    }

    #[test]
    fn test_remove_shifts_later_images() {
        let mut form = FormState::from_album(&blank_album());
        form.images = vec![image("a", "1"), image("b", "2"), image("c", "3")];

        form.remove_image(1);

        assert_eq!(form.images, vec![image("a", "1"), image("c", "3")]);
    }

    #[test]
    fn test_remove_only_image_leaves_empty_list() {
        let mut form = FormState::from_album(&blank_album());
        form.add_image();
        form.remove_image(0);
        assert!(form.images.is_empty());
    }

    #[test]
    fn test_update_touches_one_field_only() {
        let mut form = FormState::from_album(&blank_album());
        form.images = vec![image("a", "1"), image("b", "2")];
        let before = form.clone();

        form.update_image(1, ImageField::VirtualImageId, "z".into());

        assert_eq!(form.images[0], before.images[0]);
        assert_eq!(form.images[1], image("z", "2"));
        assert_eq!(form.title, before.title);
        assert_eq!(form.sub_albums, before.sub_albums);
    }

    #[test]
    fn test_out_of_range_edits_are_ignored() {
        let mut form = FormState::from_album(&blank_album());
        form.add_image();
        let before = form.clone();

        form.update_image(5, ImageField::RealImageId, "x".into());
        form.remove_image(5);
        form.update_sub_album(0, SubAlbumUpdate::Title("x".into()));
        form.add_sub_album_image(3);

        assert_eq!(form, before);
    }

    #[test]
    fn test_sub_album_image_operations() {
        let mut form = grouped_form();

        form.add_sub_album_image(1);
        form.update_sub_album_image(1, 1, ImageField::VirtualImageId, "V".into());
        assert_eq!(form.sub_albums[1].images, vec![image("", "R1"), image("V", "")]);

        form.remove_sub_album_image(1, 0);
        assert_eq!(form.sub_albums[1].images, vec![image("V", "")]);
        // The other sub-album is untouched
        assert_eq!(form.sub_albums[0].images, vec![image("", "R0")]);
    }

    #[test]
    fn test_update_sub_album_replaces_whole_image_list() {
        let mut form = grouped_form();
        let replacement = vec![image("x", "y"), image("", "z")];

        form.update_sub_album(0, SubAlbumUpdate::Images(replacement.clone()));

        assert_eq!(form.sub_albums[0].images, replacement);
        assert_eq!(form.sub_albums[0].title, "Day 1");
    }

    #[test]
    fn test_remove_sub_album_shifts() {
        let mut form = grouped_form();
        form.add_sub_album();
        form.apply(FieldTarget::SubAlbumTitle(2), "Day 3".into());

        form.remove_sub_album(0);

        assert_eq!(form.sub_albums.len(), 2);
        assert_eq!(form.sub_albums[0].title, "Day 2");
        assert_eq!(form.sub_albums[1].title, "Day 3");
    }

    #[test]
    fn test_coerce_order() {
        assert_eq!(coerce_order("12"), 12);
        assert_eq!(coerce_order("  -4"), -4);
        assert_eq!(coerce_order("+8"), 8);
        assert_eq!(coerce_order("12px"), 12);
        assert_eq!(coerce_order("3.9"), 3);
        assert_eq!(coerce_order(""), 0);
        assert_eq!(coerce_order("abc"), 0);
        assert_eq!(coerce_order("-"), 0);
        assert_eq!(coerce_order("99999999999"), i32::MAX);
        assert_eq!(coerce_order("-99999999999"), i32::MIN);
    }

    #[test]
    fn test_order_input_through_apply() {
        let mut form = FormState::from_album(&blank_album());
        form.apply(FieldTarget::Order, "7".into());
        assert_eq!(form.order, 7);
        assert_eq!(form.value(FieldTarget::Order), "7");

        form.apply(FieldTarget::Order, "seven".into());
        assert_eq!(form.order, 0);
    }

    #[test]
    fn test_field_paths() {
        assert_eq!(FieldTarget::Title.path(), "title");
        assert_eq!(FieldTarget::SubAlbumCover(2).path(), "sub_albums.2.cover_image_id");
        assert_eq!(
            FieldTarget::Image(0, ImageField::VirtualImageId).path(),
            "images.0.virtual_image_id"
        );
        assert_eq!(
            FieldTarget::SubAlbumImage(1, 3, ImageField::RealImageId).path(),
            "sub_albums.1.images.3.real_image_id"
        );
        assert!(FieldTarget::CoverImageId.is_identifier());
        assert!(!FieldTarget::SubAlbumTitle(0).is_identifier());
    }

    #[test]
    fn test_begin_submit_blocks_second_request() {
        let mut form = FormState::from_album(&blank_album());

        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.title, "Summer");
        assert!(form.submitting);

        assert!(form.begin_submit().is_none());

        form.submit_failed();
        assert!(!form.submitting);
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_rejected_submit_replaces_errors() {
        let mut form = FormState::from_album(&blank_album());
        form.begin_submit();
        form.submit_rejected(
            [("title", "required"), ("cover_image_id", "required")]
                .into_iter()
                .collect(),
        );
        assert_eq!(form.error_for(FieldTarget::CoverImageId), Some("required"));

        // Typing does not clear errors
        form.apply(FieldTarget::CoverImageId, "abc".into());
        assert_eq!(form.error_for(FieldTarget::CoverImageId), Some("required"));

        form.begin_submit();
        form.submit_rejected([("title", "too long")].into_iter().collect());

        assert_eq!(form.error_for(FieldTarget::Title), Some("too long"));
        assert_eq!(form.error_for(FieldTarget::CoverImageId), None);
    }

    #[test]
    fn test_payload_serializes_wire_names() {
        let mut form = FormState::from_album(&blank_album());
        form.add_image();
        form.submitting = true;

        let json = serde_json::to_value(form.payload()).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "cover_image_id",
                "has_sub_albums",
                "images",
                "is_active",
                "order",
                "sub_albums",
                "title"
            ]
        );
        assert_eq!(
            json["images"][0],
            serde_json::json!({"virtual_image_id": "", "real_image_id": ""})
        );
    }

    #[test]
    fn test_collection_error_follows_mode() {
        let mut form = grouped_form();
        let errors = FieldErrors::from_validation_body(
            r#"{"errors": {"sub_albums": ["Add at least one sub-album."], "is_active": ["Bad"]}}"#,
        );

        form.submit_rejected(errors);

        assert_eq!(form.collection_error(), Some("Add at least one sub-album."));
        assert_eq!(form.error_at("is_active"), Some("Bad"));
        assert_eq!(form.error_at("has_sub_albums"), None);

        form.set_has_sub_albums(false);
        assert_eq!(form.collection_error(), None);
    }

    #[test]
    fn test_revision_tracks_row_changes_only() {
        let mut form = FormState::from_album(&blank_album());
        let start = form.revision();

        form.add_image();
        let after_add = form.revision();
        assert!(after_add > start);

        form.apply(FieldTarget::Image(0, ImageField::RealImageId), "R".into());
        form.apply(FieldTarget::Title, "T".into());
        form.remove_image(9);
        assert_eq!(form.revision(), after_add);

        form.remove_image(0);
        assert!(form.revision() > after_add);

        let before_toggle = form.revision();
        form.set_has_sub_albums(true);
        assert!(form.revision() > before_toggle);
    }

    #[test]
    fn test_nested_text_edit_keeps_revision() {
        let mut form = grouped_form();
        let revision = form.revision();

        form.update_sub_album_image(0, 0, ImageField::VirtualImageId, "V".into());
        assert_eq!(form.revision(), revision);

        form.remove_sub_album_image(0, 0);
        assert!(form.revision() > revision);
    }
}
