//! tuCaEditor: AI-assisted photo editor
//!
//! iced application driving the edit session state machine. At most one
//! asynchronous operation (upload decode, AI edit, export bake) is in
//! flight at a time: `update` rejects new operations while the busy overlay
//! is up, so a half-finished edit can never interleave with another one.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, stack, text};
use iced::{Alignment, Color, Element, Length, Task, Theme};
use rfd::FileDialog;

mod ai;
mod error;
mod export;
mod imaging;
mod state;
mod ui;

use ai::{AiConfig, GeminiClient};
use error::EditError;
use imaging::{render, Snapshot};
use state::{Adjustments, EditSession};

/// Main application state
struct TucaEditor {
    /// AI client; None when no API key is configured
    client: Option<GeminiClient>,
    /// Current edit session; None until an image is uploaded
    session: Option<EditSession>,
    /// Loading message while the single in-flight async operation runs
    busy: Option<String>,
    /// User-visible error banner, overwritten by each new failure
    error: Option<String>,
    /// Free-text edit prompt
    prompt: String,
    /// Whether the fine adjustments panel is open
    show_adjustments: bool,
    /// Displayed preview: the current snapshot, with pending adjustments
    /// applied once a slider is released
    preview: Option<Handle>,
    /// A preview render is running
    preview_busy: bool,
    /// Sliders moved while a preview render was running; render again once
    /// the running one lands (latest values win)
    preview_stale: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the upload button
    OpenImage,
    /// Upload decode finished
    ImageLoaded(Result<Snapshot, String>),
    PromptChanged(String),
    /// Free-text prompt submitted
    SubmitPrompt,
    /// Canned quick action clicked (index into QUICK_ACTIONS)
    QuickEdit(usize),
    /// AI edit finished
    EditComplete(Result<Snapshot, String>),
    BrightnessChanged(u16),
    ContrastChanged(u16),
    SaturationChanged(u16),
    ResetAdjustments,
    /// Slider released: refresh the adjusted preview
    RefreshPreview,
    PreviewReady(Result<Vec<u8>, String>),
    ToggleAdjustments,
    Undo,
    ResetToOriginal,
    /// User clicked download
    Export,
    /// Export bake finished; pick a destination and write
    ExportReady(Result<Snapshot, String>),
    DismissError,
}

impl TucaEditor {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let client = match GeminiClient::new(AiConfig::default()) {
            Ok(client) => Some(client),
            Err(e) => {
                eprintln!("⚠️  AI editing disabled: {}", e);
                None
            }
        };

        println!(
            "🎨 tuCaEditor initialized (AI editing {})",
            if client.is_some() { "enabled" } else { "disabled" }
        );

        (
            TucaEditor {
                client,
                session: None,
                busy: None,
                error: None,
                prompt: String::new(),
                show_adjustments: false,
                preview: None,
                preview_busy: false,
                preview_stale: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        // Single-slot in-flight guard: while busy, only completion events pass
        if self.busy.is_some() && !is_completion(&message) {
            return Task::none();
        }

        match message {
            Message::OpenImage => {
                let file = FileDialog::new()
                    .set_title("Escolha uma imagem")
                    .add_filter("Imagens", &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tiff"])
                    .pick_file();

                if let Some(path) = file {
                    self.busy = Some("Carregando imagem...".to_string());
                    self.error = None;
                    return Task::perform(Snapshot::load_from_file(path), |result| {
                        Message::ImageLoaded(result.map_err(|e| e.to_string()))
                    });
                }
                Task::none()
            }
            Message::ImageLoaded(Ok(snapshot)) => {
                // A new upload replaces the whole session
                self.preview = snapshot_handle(&snapshot);
                self.session = Some(EditSession::new(snapshot));
                self.busy = None;
                self.error = None;
                self.prompt.clear();
                self.show_adjustments = false;
                Task::none()
            }
            Message::ImageLoaded(Err(e)) => {
                eprintln!("⚠️  Upload failed: {}", e);
                self.busy = None;
                self.error =
                    Some("Falha ao carregar a imagem. Por favor, tente outro arquivo.".to_string());
                Task::none()
            }
            Message::PromptChanged(prompt) => {
                self.prompt = prompt;
                Task::none()
            }
            Message::SubmitPrompt => {
                let prompt = self.prompt.trim().to_string();
                if prompt.is_empty() {
                    return Task::none();
                }
                self.begin_edit(prompt, "Aplicando sua edição...".to_string())
            }
            Message::QuickEdit(index) => match ui::editor::QUICK_ACTIONS.get(index) {
                Some(action) => {
                    self.begin_edit(action.prompt.to_string(), action.loading.to_string())
                }
                None => Task::none(),
            },
            Message::EditComplete(Ok(snapshot)) => {
                if let Some(session) = &mut self.session {
                    session.commit(snapshot);
                    self.preview = snapshot_handle(session.current());
                }
                self.busy = None;
                self.prompt.clear();
                Task::none()
            }
            Message::EditComplete(Err(e)) => {
                // History is untouched: the failed result was never committed
                eprintln!("⚠️  AI edit failed: {}", e);
                self.busy = None;
                self.error = Some(
                    "Ocorreu um erro ao editar a imagem. Por favor, tente novamente.".to_string(),
                );
                Task::none()
            }
            Message::BrightnessChanged(value) => self.adjust(|a| a.brightness = value),
            Message::ContrastChanged(value) => self.adjust(|a| a.contrast = value),
            Message::SaturationChanged(value) => self.adjust(|a| a.saturation = value),
            Message::ResetAdjustments => {
                if let Some(session) = &mut self.session {
                    session.set_adjustments(Adjustments::default());
                    self.preview = snapshot_handle(session.current());
                }
                Task::none()
            }
            Message::RefreshPreview => self.refresh_preview(),
            Message::PreviewReady(Ok(bytes)) => {
                self.preview_busy = false;
                self.preview = Some(Handle::from_bytes(bytes));
                if self.preview_stale {
                    self.preview_stale = false;
                    return self.refresh_preview();
                }
                Task::none()
            }
            Message::PreviewReady(Err(e)) => {
                // Preview refresh is cosmetic: log and keep the last good frame
                eprintln!("⚠️  Preview render failed: {}", e);
                self.preview_busy = false;
                self.preview_stale = false;
                Task::none()
            }
            Message::ToggleAdjustments => {
                self.show_adjustments = !self.show_adjustments;
                Task::none()
            }
            Message::Undo => {
                if let Some(session) = &mut self.session {
                    session.undo();
                    self.preview = snapshot_handle(session.current());
                }
                Task::none()
            }
            Message::ResetToOriginal => {
                if let Some(session) = &mut self.session {
                    session.reset_to_original();
                    self.preview = snapshot_handle(session.current());
                }
                Task::none()
            }
            Message::Export => {
                let Some(session) = &self.session else {
                    return Task::none();
                };
                self.busy = Some("Preparando download...".to_string());
                self.error = None;

                let current = session.current().clone();
                let pending = session.adjustments();
                Task::perform(
                    async move { export::prepare_for_export(&current, pending).await },
                    |result| Message::ExportReady(result.map_err(|e| e.to_string())),
                )
            }
            Message::ExportReady(Ok(snapshot)) => {
                self.busy = None;

                let file = FileDialog::new()
                    .set_title("Salvar imagem")
                    .set_file_name(export::export_filename(&snapshot))
                    .save_file();

                if let Some(path) = file {
                    if let Err(e) = export::write_to(&snapshot, &path) {
                        eprintln!("⚠️  Export failed: {}", e);
                        self.error = Some(
                            "Não foi possível preparar a imagem para download.".to_string(),
                        );
                    }
                }
                Task::none()
            }
            Message::ExportReady(Err(e)) => {
                eprintln!("⚠️  Export bake failed: {}", e);
                self.busy = None;
                self.error =
                    Some("Não foi possível preparar a imagem para download.".to_string());
                Task::none()
            }
            Message::DismissError => {
                self.error = None;
                Task::none()
            }
        }
    }

    /// Start the AI edit pipeline for a prompt, if a session and client exist
    fn begin_edit(&mut self, prompt: String, loading: String) -> Task<Message> {
        let Some(session) = &self.session else {
            return Task::none();
        };
        let Some(client) = self.client.clone() else {
            self.error = Some("Chave de API do Gemini não configurada.".to_string());
            return Task::none();
        };

        self.busy = Some(loading);
        self.error = None;

        let current = session.current().clone();
        let pending = session.adjustments();

        Task::perform(run_edit(client, current, pending, prompt), |result| {
            Message::EditComplete(result.map_err(|e| e.to_string()))
        })
    }

    /// Preview-only change to the pending adjustment values
    fn adjust(&mut self, change: impl FnOnce(&mut Adjustments)) -> Task<Message> {
        if let Some(session) = &mut self.session {
            let mut adjustments = session.adjustments();
            change(&mut adjustments);
            session.set_adjustments(adjustments);
        }
        Task::none()
    }

    /// Re-render the displayed preview with the pending adjustments applied
    fn refresh_preview(&mut self) -> Task<Message> {
        let Some(session) = &self.session else {
            return Task::none();
        };

        if session.adjustments().is_neutral() {
            self.preview = snapshot_handle(session.current());
            self.preview_stale = false;
            return Task::none();
        }
        if self.preview_busy {
            self.preview_stale = true;
            return Task::none();
        }

        self.preview_busy = true;
        let current = session.current().clone();
        let pending = session.adjustments();
        Task::perform(
            async move { render::render_preview(&current, pending).await },
            |result| Message::PreviewReady(result.map_err(|e| e.to_string())),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let screen: Element<Message> = match &self.session {
            None => ui::upload::view(),
            Some(session) => ui::editor::view(
                session,
                self.preview.as_ref(),
                &self.prompt,
                self.show_adjustments,
            ),
        };

        let mut layers = vec![screen];
        if let Some(message) = &self.error {
            layers.push(error_banner(message));
        }
        if let Some(message) = &self.busy {
            layers.push(loading_overlay(message));
        }

        stack(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("tuCaEditor", TucaEditor::update, TucaEditor::view)
        .theme(TucaEditor::theme)
        .centered()
        .run_with(TucaEditor::new)
}

/// Full AI edit pipeline: bake pending adjustments when non-neutral, submit
/// to the AI service, re-wrap the response with the submitted MIME type
async fn run_edit(
    client: GeminiClient,
    current: Snapshot,
    pending: Adjustments,
    prompt: String,
) -> Result<Snapshot, EditError> {
    let baked = render::apply_adjustments(&current, pending).await?;
    let mime_type = baked.mime_type().to_string();
    let payload = client.edit_image(baked.payload(), &mime_type, &prompt).await?;
    Ok(Snapshot::from_payload(payload, &mime_type))
}

/// Completion events are the only messages allowed through while busy
fn is_completion(message: &Message) -> bool {
    matches!(
        message,
        Message::ImageLoaded(_)
            | Message::EditComplete(_)
            | Message::ExportReady(_)
            | Message::PreviewReady(_)
    )
}

/// Encoded snapshot bytes as an iced image handle
fn snapshot_handle(snapshot: &Snapshot) -> Option<Handle> {
    match snapshot.decode() {
        Ok(bytes) => Some(Handle::from_bytes(bytes)),
        Err(e) => {
            eprintln!("⚠️  Failed to decode snapshot for display: {}", e);
            None
        }
    }
}

/// Dismissable error banner pinned to the top of the window
fn error_banner(message: &str) -> Element<'_, Message> {
    container(
        button(text(message).size(14))
            .style(button::danger)
            .padding(12)
            .on_press(Message::DismissError),
    )
    .width(Length::Fill)
    .center_x(Length::Fill)
    .padding(16)
    .into()
}

/// Modal overlay shown while the single in-flight operation runs
fn loading_overlay(message: &str) -> Element<'_, Message> {
    container(
        column![text("⏳").size(40), text(message).size(18)]
            .spacing(12)
            .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Color { a: 0.85, ..Color::BLACK }.into()),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    })
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with_session() -> TucaEditor {
        let (mut editor, _) = TucaEditor::new();
        let snapshot = Snapshot::from_bytes(b"img", "image/png");
        let _ = editor.update(Message::ImageLoaded(Ok(snapshot)));
        editor
    }

    #[test]
    fn test_upload_seeds_session() {
        let editor = editor_with_session();
        let session = editor.session.as_ref().unwrap();

        assert_eq!(session.history_len(), 1);
        assert!(session.adjustments().is_neutral());
        assert!(editor.busy.is_none());
        assert!(editor.error.is_none());
    }

    #[test]
    fn test_failed_edit_leaves_history_and_clears_busy() {
        let mut editor = editor_with_session();
        editor.busy = Some("Aplicando sua edição...".to_string());

        let _ = editor.update(Message::EditComplete(Err("connection refused".to_string())));

        assert!(editor.busy.is_none());
        assert!(editor.error.is_some());
        assert_eq!(editor.session.as_ref().unwrap().history_len(), 1);
    }

    #[test]
    fn test_successful_edit_commits_and_resets_pending() {
        let mut editor = editor_with_session();
        let _ = editor.update(Message::BrightnessChanged(150));
        assert_eq!(
            editor.session.as_ref().unwrap().adjustments().brightness,
            150
        );
        editor.busy = Some("Aplicando sua edição...".to_string());

        let edited = Snapshot::from_bytes(b"edited", "image/png");
        let _ = editor.update(Message::EditComplete(Ok(edited.clone())));

        let session = editor.session.as_ref().unwrap();
        assert!(editor.busy.is_none());
        assert_eq!(session.history_len(), 2);
        assert_eq!(session.current(), &edited);
        assert!(session.adjustments().is_neutral());
    }

    #[test]
    fn test_busy_guard_blocks_new_operations() {
        let mut editor = editor_with_session();
        editor.busy = Some("Carregando imagem...".to_string());

        let _ = editor.update(Message::Undo);
        let _ = editor.update(Message::BrightnessChanged(150));

        // Neither operation went through while busy
        assert!(editor.session.as_ref().unwrap().adjustments().is_neutral());
        assert!(editor.busy.is_some());
    }

    #[test]
    fn test_upload_failure_keeps_prior_session() {
        let mut editor = editor_with_session();
        editor.busy = Some("Carregando imagem...".to_string());

        let _ = editor.update(Message::ImageLoaded(Err("bad file".to_string())));

        assert!(editor.busy.is_none());
        assert!(editor.error.is_some());
        assert!(editor.session.is_some());
    }
}
