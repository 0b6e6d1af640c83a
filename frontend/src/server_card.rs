use shared::ServerRecord;
use zoon::*;

use crate::theme::*;
use crate::utils::format_bytes;

/// One server in the list. Rendered from an owned record so the card does not
/// depend on the snapshot it came from.
pub fn server_card(server: ServerRecord) -> impl Element {
    let status_color = if server.online_status { ONLINE } else { OFFLINE };

    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_4))
        .s(Padding::new().x(SPACING_12).y(SPACING_8))
        .s(RoundedCorners::all(6))
        .s(Background::new().color(SURFACE))
        .s(Borders::all(Border::new().width(1).color(BORDER)))
        .update_raw_el({
            let title = format!("#{} {}", server.id, server.online_label());
            move |raw_el| raw_el.attr("title", &title)
        })
        .item(
            Row::new()
                .s(Gap::new().x(SPACING_8))
                .s(Align::new().center_y())
                .item(
                    El::new()
                        .s(Width::exact(8))
                        .s(Height::exact(8))
                        .s(RoundedCorners::all_max())
                        .s(Background::new().color(status_color)),
                )
                .item(
                    El::new()
                        .s(Font::new().size(14).weight(FontWeight::SemiBold).color(TEXT))
                        .child(Text::new(&server.name)),
                )
                .item(server.tag().map(|tag| {
                    El::new()
                        .s(Padding::new().x(SPACING_4))
                        .s(RoundedCorners::all(4))
                        .s(Background::new().color(SURFACE_HOVER))
                        .s(Font::new().size(11).color(TEXT_MUTED))
                        .child(Text::new(tag))
                })),
        )
        .item(
            El::new()
                .s(Font::new().size(12).color(TEXT_MUTED))
                .child(Text::new(traffic_line(&server))),
        )
}

fn traffic_line(server: &ServerRecord) -> String {
    format!(
        "↓ {} ({}/s)  ↑ {} ({}/s)",
        format_bytes(server.status.net_in_transfer),
        format_bytes(server.status.net_in_speed),
        format_bytes(server.status.net_out_transfer),
        format_bytes(server.status.net_out_speed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ServerStatus;

    #[test]
    fn traffic_line_shows_totals_and_speeds() {
        let server = ServerRecord {
            id: 1,
            status: ServerStatus {
                net_in_transfer: 2048,
                net_out_transfer: 10,
                net_in_speed: 512,
                net_out_speed: 0,
            },
            ..ServerRecord::default()
        };

        assert_eq!(traffic_line(&server), "↓ 2.00 KiB (512 B/s)  ↑ 10 B (0 B/s)");
    }
}
