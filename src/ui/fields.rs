/// Reusable labelled inputs
///
/// Every input writes through `FormMessage::Edit` with its [`FieldTarget`],
/// and shows the server's error for that target underneath.
use iced::alignment::Horizontal;
use iced::widget::{button, column, row, text, text_input, Column};
use iced::{Color, Element, Length};

use super::FormMessage;
use crate::state::form::{FieldTarget, FormState};
use crate::Message;

pub const MUTED: Color = Color::from_rgb(0.55, 0.55, 0.6);

/// Red message under a field, if the last submit flagged it
pub fn field_error<'a>(form: &FormState, target: FieldTarget) -> Option<Element<'a, Message>> {
    error_text(form.error_for(target))
}

/// Red message for a server error that has no text input of its own
pub fn error_text<'a>(message: Option<&str>) -> Option<Element<'a, Message>> {
    message.map(|message| text(message.to_string()).size(13).style(text::danger).into())
}

/// Labelled input for any form field
///
/// Identifier fields get a picker button, everything else a plain input.
pub fn field<'a>(
    form: &FormState,
    target: FieldTarget,
    label: &'a str,
    placeholder: &str,
) -> Column<'a, Message> {
    if target.is_identifier() {
        id_field(form, target, label, placeholder)
    } else {
        text_field(form, target, label, placeholder)
    }
}

/// Plain text input with a label
fn text_field<'a>(
    form: &FormState,
    target: FieldTarget,
    label: &'a str,
    placeholder: &str,
) -> Column<'a, Message> {
    let input = text_input(placeholder, &form.value(target))
        .on_input(move |value| Message::Form(FormMessage::Edit(target, value)))
        .padding(8);

    column![text(label).size(14), input]
        .push_maybe(field_error(form, target))
        .spacing(6)
}

/// Identifier input with a picker button next to it
///
/// The picker result lands in the same target as typed text.
fn id_field<'a>(
    form: &FormState,
    target: FieldTarget,
    label: &'a str,
    placeholder: &str,
) -> Column<'a, Message> {
    let input = text_input(placeholder, &form.value(target))
        .on_input(move |value| Message::Form(FormMessage::Edit(target, value)))
        .padding(8)
        .width(Length::Fill);

    let pick = button(text("Pick").size(14))
        .on_press(Message::PickFor(target))
        .style(button::secondary)
        .padding([8, 12]);

    column![text(label).size(14), row![input, pick].spacing(8)]
        .push_maybe(field_error(form, target))
        .spacing(6)
}

/// Muted text shown where a list has no entries
pub fn empty_state<'a>(message: &'a str) -> Element<'a, Message> {
    text(message)
        .size(14)
        .color(MUTED)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .into()
}
