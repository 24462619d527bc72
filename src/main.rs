use clap::Parser;
use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;

mod api;
mod config;
mod error;
mod logging;
mod picker;
mod state;
mod ui;

use api::{FormSubmitter, GalleryClient, SubmitOutcome};
use config::Config;
use error::AppError;
use picker::{FileDialogPicker, IdPicker};
use state::data::Album;
use state::form::{FieldTarget, FormState};
use ui::FormMessage;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about = "Edit a gallery album")]
struct Cli {
    /// ID of the album to edit
    album_id: u64,
    /// Extra config file, merged over the default locations
    #[arg(long)]
    config: Option<PathBuf>,
}

/// What the window is currently showing
#[derive(Debug)]
enum Screen {
    Loading,
    LoadFailed(String),
    Editing {
        /// Album as loaded; `id` and `slug` are read from here
        album: Album,
        form: FormState,
        /// Last submit failure that was not a validation error
        status: Option<String>,
    },
    /// The server accepted the update; the session is over
    Saved,
}

/// Main application state
struct AlbumEditor {
    album_id: u64,
    client: GalleryClient,
    submitter: Arc<dyn FormSubmitter>,
    picker: Arc<dyn IdPicker>,
    screen: Screen,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Initial album fetch finished
    AlbumLoaded(Result<Album, String>),
    RetryLoad,
    /// In-place edit of the form
    Form(FormMessage),
    /// User asked the picker to fill a field
    PickFor(FieldTarget),
    /// Picker finished for a target taken at a form revision;
    /// `None` means it was cancelled
    Picked(FieldTarget, u64, Option<String>),
    Submit,
    Submitted(SubmitOutcome),
    /// Leave without saving
    Cancel,
    Close,
}

impl AlbumEditor {
    /// Create the editor and start loading the album
    fn new(
        album_id: u64,
        client: GalleryClient,
        submitter: Arc<dyn FormSubmitter>,
        picker: Arc<dyn IdPicker>,
    ) -> (Self, Task<Message>) {
        let editor = AlbumEditor {
            album_id,
            client,
            submitter,
            picker,
            screen: Screen::Loading,
        };
        let task = editor.load_album();
        (editor, task)
    }

    fn load_album(&self) -> Task<Message> {
        let client = self.client.clone();
        let album_id = self.album_id;
        Task::perform(
            async move { client.fetch_album(album_id).await.map_err(|e| e.to_string()) },
            Message::AlbumLoaded,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AlbumLoaded(Ok(album)) => {
                tracing::info!(
                    album_id = album.id,
                    sub_albums = album.sub_albums.len(),
                    images = album.images.len(),
                    "album loaded"
                );
                self.screen = Screen::Editing {
                    form: FormState::from_album(&album),
                    album,
                    status: None,
                };
                Task::none()
            }
            Message::AlbumLoaded(Err(reason)) => {
                tracing::error!(album_id = self.album_id, %reason, "failed to load album");
                self.screen = Screen::LoadFailed(reason);
                Task::none()
            }
            Message::RetryLoad => {
                self.screen = Screen::Loading;
                self.load_album()
            }
            Message::Form(message) => {
                if let Screen::Editing { form, .. } = &mut self.screen {
                    ui::update(form, message);
                }
                Task::none()
            }
            Message::PickFor(target) => {
                let Screen::Editing { form, .. } = &self.screen else {
                    return Task::none();
                };
                let revision = form.revision();
                let picker = self.picker.clone();
                Task::perform(async move { picker.pick().await }, move |id| {
                    Message::Picked(target, revision, id)
                })
            }
            Message::Picked(target, revision, Some(id)) => {
                let Screen::Editing { form, .. } = &self.screen else {
                    return Task::none();
                };
                // Rows moved while the dialog was open; the index may now
                // name a different row
                if form.revision() != revision {
                    tracing::debug!(?target, "dropping pick for a stale row");
                    return Task::none();
                }
                // Same path as typing into the field
                self.update(Message::Form(FormMessage::Edit(target, id)))
            }
            Message::Picked(_, _, None) => Task::none(),
            Message::Submit => {
                let Screen::Editing { form, status, .. } = &mut self.screen else {
                    return Task::none();
                };
                let Some(payload) = form.begin_submit() else {
                    tracing::debug!("submit already in flight");
                    return Task::none();
                };
                *status = None;

                Task::perform(
                    api::submit_album(self.submitter.clone(), self.album_id, payload),
                    Message::Submitted,
                )
            }
            Message::Submitted(outcome) => {
                let Screen::Editing { form, status, .. } = &mut self.screen else {
                    return Task::none();
                };
                match outcome {
                    SubmitOutcome::Saved => {
                        form.submit_succeeded();
                        self.screen = Screen::Saved;
                    }
                    SubmitOutcome::Rejected(errors) if errors.is_empty() => {
                        form.submit_failed();
                        *status = Some("Update failed: the server rejected the update".into());
                    }
                    SubmitOutcome::Rejected(errors) => form.submit_rejected(errors),
                    SubmitOutcome::Failed(reason) => {
                        form.submit_failed();
                        *status = Some(format!("Update failed: {reason}"));
                    }
                }
                Task::none()
            }
            Message::Cancel | Message::Close => iced::exit(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Editing {
                album,
                form,
                status,
            } => ui::sections::view(album, form, status.as_deref()),
            Screen::Loading => centered(column![text("Loading album...").size(20)]),
            Screen::LoadFailed(reason) => centered(column![
                text("Could not load the album").size(24),
                text(reason.as_str()).size(14).style(text::danger),
                row![
                    button("Retry").on_press(Message::RetryLoad).padding(10),
                    button("Cancel")
                        .on_press(Message::Cancel)
                        .style(button::secondary)
                        .padding(10),
                ]
                .spacing(10),
            ]),
            Screen::Saved => centered(column![
                text("Album updated.").size(24),
                button("Close").on_press(Message::Close).padding(10),
            ]),
        }
    }

    fn title(&self) -> String {
        match &self.screen {
            Screen::Editing { album, .. } => format!("Edit Album - {}", album.title),
            _ => "Edit Album".to_string(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn centered(content: Column<'_, Message>) -> Element<'_, Message> {
    container(content.spacing(20).padding(40).align_x(Alignment::Center))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&Config::default().log_filter);
            tracing::error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };
    logging::init(&config.log_filter);

    let client = GalleryClient::new(&config)?;
    let submitter: Arc<dyn FormSubmitter> = Arc::new(client.clone());
    let picker: Arc<dyn IdPicker> = Arc::new(FileDialogPicker::new(config.picker_dir.clone()));
    let album_id = cli.album_id;

    tracing::info!(album_id, base_url = %config.base_url, "starting album editor");

    iced::application(AlbumEditor::title, AlbumEditor::update, AlbumEditor::view)
        .theme(AlbumEditor::theme)
        .centered()
        .run_with(move || AlbumEditor::new(album_id, client, submitter, picker))?;

    Ok(())
}
