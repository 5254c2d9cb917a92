//! Fine adjustments panel
//!
//! Three percentage sliders (0–200, 100 = neutral). Dragging only mutates
//! the pending values; releasing a slider asks for a preview refresh.

use iced::widget::{button, column, container, horizontal_space, row, slider, text};
use iced::{Element, Length};

use crate::state::adjust::{self, Adjustments};
use crate::Message;

pub fn view(adjustments: Adjustments) -> Element<'static, Message> {
    let content = column![
        text("Ajustes Finos").size(18),
        slider_row("Brilho", adjustments.brightness, Message::BrightnessChanged),
        slider_row("Contraste", adjustments.contrast, Message::ContrastChanged),
        slider_row("Saturação", adjustments.saturation, Message::SaturationChanged),
        button("Redefinir Ajustes")
            .on_press(Message::ResetAdjustments)
            .width(Length::Fill),
    ]
    .spacing(12);

    container(content)
        .padding(16)
        .style(container::rounded_box)
        .into()
}

fn slider_row(
    label: &'static str,
    value: u16,
    on_change: fn(u16) -> Message,
) -> Element<'static, Message> {
    column![
        row![
            text(label).size(14),
            horizontal_space(),
            text(format!("{value}%")).size(12),
        ],
        slider(adjust::MIN..=adjust::MAX, value, on_change)
            .on_release(Message::RefreshPreview),
    ]
    .spacing(4)
    .into()
}
