//! Upload screen shown before any image is loaded

use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

use crate::Message;

pub fn view() -> Element<'static, Message> {
    let content = column![
        text("tuCaEditor").size(48),
        text("Edite suas fotos com inteligência artificial").size(18),
        button("Escolher imagem").on_press(Message::OpenImage).padding(12),
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
