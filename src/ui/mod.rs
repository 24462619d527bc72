/// Album form UI
///
/// `FormMessage` covers every in-place edit of the form. Picker requests
/// and submits go through the top-level `Message` because they start
/// background tasks.

pub mod fields;
pub mod sections;

use crate::state::form::{FieldTarget, FormState};

#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    /// Text typed into (or picked for) one field
    Edit(FieldTarget, String),
    SetActive(bool),
    SetHasSubAlbums(bool),
    AddImage,
    RemoveImage(usize),
    AddSubAlbum,
    RemoveSubAlbum(usize),
    AddSubAlbumImage(usize),
    RemoveSubAlbumImage(usize, usize),
}

/// Apply one edit to the form
pub fn update(form: &mut FormState, message: FormMessage) {
    match message {
        FormMessage::Edit(target, value) => form.apply(target, value),
        FormMessage::SetActive(active) => form.set_is_active(active),
        FormMessage::SetHasSubAlbums(enabled) => form.set_has_sub_albums(enabled),
        FormMessage::AddImage => form.add_image(),
        FormMessage::RemoveImage(index) => form.remove_image(index),
        FormMessage::AddSubAlbum => form.add_sub_album(),
        FormMessage::RemoveSubAlbum(index) => form.remove_sub_album(index),
        FormMessage::AddSubAlbumImage(sub) => form.add_sub_album_image(sub),
        FormMessage::RemoveSubAlbumImage(sub, index) => form.remove_sub_album_image(sub, index),
    }
}
