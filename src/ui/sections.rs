/// Layout of the album form
///
/// Basic information is always shown. Below it either the sub-album editor
/// or the flat image editor appears, depending on `has_sub_albums`.
use iced::widget::{
    button, column, container, horizontal_space, row, scrollable, text, toggler, Column,
};
use iced::{Alignment, Element, Length};

use super::fields::{empty_state, error_text, field, MUTED};
use super::FormMessage;
use crate::state::data::{Album, ImageField};
use crate::state::form::{ContentMode, FieldTarget, FormState};
use crate::Message;

/// The whole editing screen
pub fn view<'a>(
    album: &'a Album,
    form: &'a FormState,
    status: Option<&'a str>,
) -> Element<'a, Message> {
    let content = match form.mode() {
        ContentMode::Grouped => sub_albums(form),
        ContentMode::Flat => images(form),
    };

    let page = column![
        text("Edit Gallery Album").size(28),
        basic_information(album, form),
        content,
    ]
    .push_maybe(status.map(|s| text(s).size(14).style(text::danger)))
    .push(actions(form))
    .spacing(20)
    .padding(24)
    .max_width(900.0);

    scrollable(container(page).center_x(Length::Fill)).into()
}

fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

/// Card header: title on the left, optional action on the right
fn header<'a>(
    title: String,
    size: u16,
    action: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    row![text(title).size(size), horizontal_space()]
        .push_maybe(action)
        .align_y(Alignment::Center)
        .into()
}

fn basic_information<'a>(album: &'a Album, form: &'a FormState) -> Element<'a, Message> {
    let title = field(form, FieldTarget::Title, "Title *", "Enter album title").push(
        text(format!("Current slug: {}", album.slug))
            .size(12)
            .color(MUTED),
    );

    let cover = field(
        form,
        FieldTarget::CoverImageId,
        "Cover Image ID (Google Drive) *",
        "Enter Google Drive file ID",
    );

    let order = field(form, FieldTarget::Order, "Order", "0").width(Length::FillPortion(1));

    let active = container(
        column![toggler(form.is_active)
            .label("Active")
            .on_toggle(|active| Message::Form(FormMessage::SetActive(active)))]
        .push_maybe(error_text(form.error_at("is_active")))
        .spacing(6),
    )
    .width(Length::FillPortion(1))
    .center_y(Length::Shrink);

    let has_sub_albums = column![toggler(form.has_sub_albums)
        .label("Has Sub-Albums")
        .on_toggle(|enabled| Message::Form(FormMessage::SetHasSubAlbums(enabled)))]
    .push_maybe(error_text(form.error_at("has_sub_albums")))
    .spacing(6);

    card(
        column![
            header("Basic Information".to_string(), 20, None),
            title,
            cover,
            row![order, active].spacing(16).align_y(Alignment::End),
            has_sub_albums,
        ]
        .spacing(16),
    )
}

fn sub_albums(form: &FormState) -> Element<'_, Message> {
    let add = button(text("+ Add Sub-Album").size(14))
        .on_press(Message::Form(FormMessage::AddSubAlbum))
        .padding([6, 12]);

    let body: Element<'_, Message> = if form.sub_albums.is_empty() {
        empty_state("No sub-albums added yet. Click \"Add Sub-Album\" to get started.")
    } else {
        Column::with_children(
            (0..form.sub_albums.len()).map(|sub| sub_album(form, sub)),
        )
        .spacing(16)
        .into()
    };

    card(
        column![header("Sub-Albums".to_string(), 20, Some(add.into()))]
            .push_maybe(error_text(form.collection_error()))
            .push(body)
            .spacing(16),
    )
}

fn sub_album(form: &FormState, sub: usize) -> Element<'_, Message> {
    let remove = button(text("Delete").size(13))
        .on_press(Message::Form(FormMessage::RemoveSubAlbum(sub)))
        .style(button::danger)
        .padding([4, 10]);

    let add_image = button(text("+ Add Image").size(13))
        .on_press(Message::Form(FormMessage::AddSubAlbumImage(sub)))
        .style(button::secondary)
        .padding([4, 10]);

    let images = &form.sub_albums[sub].images;
    let image_list: Element<'_, Message> = if images.is_empty() {
        empty_state("No images added")
    } else {
        Column::with_children((0..images.len()).map(|index| {
            image_card(
                form,
                index,
                |field| FieldTarget::SubAlbumImage(sub, index, field),
                FormMessage::RemoveSubAlbumImage(sub, index),
            )
        }))
        .spacing(12)
        .into()
    };

    card(
        column![
            header(format!("Sub-Album {}", sub + 1), 16, Some(remove.into())),
            field(form, FieldTarget::SubAlbumTitle(sub), "Title *", "Enter sub-album title"),
            field(
                form,
                FieldTarget::SubAlbumCover(sub),
                "Cover Image ID *",
                "Google Drive file ID",
            ),
            header("Images".to_string(), 14, Some(add_image.into())),
            image_list,
        ]
        .spacing(12),
    )
}

fn images(form: &FormState) -> Element<'_, Message> {
    let add = button(text("+ Add Image").size(14))
        .on_press(Message::Form(FormMessage::AddImage))
        .padding([6, 12]);

    let body: Element<'_, Message> = if form.images.is_empty() {
        empty_state("No images added yet. Click \"Add Image\" to get started.")
    } else {
        Column::with_children((0..form.images.len()).map(|index| {
            image_card(
                form,
                index,
                |field| FieldTarget::Image(index, field),
                FormMessage::RemoveImage(index),
            )
        }))
        .spacing(16)
        .into()
    };

    card(
        column![header("Images".to_string(), 20, Some(add.into()))]
            .push_maybe(error_text(form.collection_error()))
            .push(body)
            .spacing(16),
    )
}

/// One image slot with both identifier inputs
fn image_card<'a>(
    form: &FormState,
    index: usize,
    target: impl Fn(ImageField) -> FieldTarget,
    remove: FormMessage,
) -> Element<'a, Message> {
    let remove = button(text("Remove").size(12))
        .on_press(Message::Form(remove))
        .style(button::text)
        .padding([2, 8]);

    card(
        column![
            header(format!("Image {}", index + 1), 13, Some(remove.into())),
            field(
                form,
                target(ImageField::VirtualImageId),
                ImageField::VirtualImageId.label(),
                "Optional",
            ),
            field(
                form,
                target(ImageField::RealImageId),
                ImageField::RealImageId.label(),
                "Optional",
            ),
        ]
        .spacing(8),
    )
}

/// Cancel and submit buttons
fn actions(form: &FormState) -> Element<'_, Message> {
    let cancel = button(text("Cancel"))
        .on_press(Message::Cancel)
        .style(button::secondary)
        .padding([8, 16]);

    let label = if form.submitting { "Updating..." } else { "Update Album" };
    let submit = button(text(label))
        .on_press_maybe((!form.submitting).then_some(Message::Submit))
        .padding([8, 16]);

    row![horizontal_space(), cancel, submit].spacing(8).into()
}
