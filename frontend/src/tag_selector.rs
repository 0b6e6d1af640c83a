use shared::{TagSelection, TagSummary};
use zoon::*;

use crate::dataflow::Relay;
use crate::theme::*;

pub fn tag_selector(
    tags: &TagSummary,
    selected: &TagSelection,
    tag_clicked_relay: &Relay<TagSelection>,
) -> impl Element {
    Row::new()
        .multiline()
        .s(Gap::both(SPACING_4))
        .items(tags.entries().into_iter().map(|entry| {
            let label = tag_label(&entry, tags.count(&entry));
            let is_selected = &entry == selected;
            tag_button(entry, label, is_selected, tag_clicked_relay.clone())
        }))
}

fn tag_button(
    entry: TagSelection,
    label: String,
    is_selected: bool,
    tag_clicked_relay: Relay<TagSelection>,
) -> impl Element {
    Button::new()
        .s(Padding::new().x(SPACING_8).y(SPACING_4))
        .s(RoundedCorners::all(4))
        .s(Background::new().color(if is_selected { ACCENT } else { SURFACE }))
        .s(Font::new().size(12).color(TEXT))
        .label(label)
        .on_press(move || tag_clicked_relay.send(entry.clone()))
}

fn tag_label(entry: &TagSelection, count: usize) -> String {
    match entry {
        TagSelection::All => format!("All {}", count),
        TagSelection::Tag(tag) => format!("{} {}", tag, count),
    }
}
