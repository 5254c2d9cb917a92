//! Editor screen: preview, quick actions, prompt input and toolbar

use iced::widget::image as image_widget;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::EditSession;
use crate::ui::adjustments;
use crate::Message;

/// A canned one-click edit offered next to the free-text prompt
pub struct QuickAction {
    pub label: &'static str,
    pub prompt: &'static str,
    pub loading: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Melhorar",
        prompt: "Melhore a qualidade geral desta foto: nitidez, iluminação e cores, \
                 mantendo o conteúdo original.",
        loading: "Melhorando a imagem...",
    },
    QuickAction {
        label: "Remover fundo",
        prompt: "Remova o fundo desta imagem e deixe-o branco liso, mantendo o assunto \
                 principal intacto.",
        loading: "Removendo o fundo...",
    },
    QuickAction {
        label: "Preto e branco",
        prompt: "Converta esta foto para um preto e branco dramático com bom contraste.",
        loading: "Convertendo para preto e branco...",
    },
];

pub fn view<'a>(
    session: &'a EditSession,
    preview: Option<&'a image_widget::Handle>,
    prompt: &'a str,
    show_adjustments: bool,
) -> Element<'a, Message> {
    let preview_area: Element<'a, Message> = match preview {
        Some(handle) => image_widget(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text("Sem visualização"))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let mut quick_row = row![].spacing(8);
    for (index, action) in QUICK_ACTIONS.iter().enumerate() {
        quick_row = quick_row.push(
            button(text(action.label).size(14))
                .padding(8)
                .on_press(Message::QuickEdit(index)),
        );
    }

    let prompt_row = row![
        text_input("Descreva a edição desejada...", prompt)
            .on_input(Message::PromptChanged)
            .on_submit(Message::SubmitPrompt)
            .padding(10),
        button("Editar").on_press(Message::SubmitPrompt).padding(10),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    // Undo and reset stay visible but inert while only the original remains
    let mut undo_button = button("Desfazer").padding(8);
    let mut reset_button = button("Restaurar original").padding(8);
    if session.can_undo() {
        undo_button = undo_button.on_press(Message::Undo);
        reset_button = reset_button.on_press(Message::ResetToOriginal);
    }

    let toolbar = row![
        undo_button,
        reset_button,
        button("Ajustes").padding(8).on_press(Message::ToggleAdjustments),
        button("Baixar").padding(8).on_press(Message::Export),
    ]
    .spacing(8);

    let mut content = column![preview_area, quick_row, prompt_row, toolbar]
        .spacing(12)
        .padding(16);

    if show_adjustments {
        content = content.push(adjustments::view(session.adjustments()));
    }

    content.into()
}
