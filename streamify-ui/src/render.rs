//! HTML rendering of the player page
//!
//! The page is `ui/player.html` with `{{NAME}}` placeholders filled in a
//! single pass, so text coming from the catalog is never re-expanded.

use std::collections::HashMap;
use std::fmt::Write as _;
use streamify_common::song_info::{ListingRow, SongDisplayInfo};
use streamify_common::PlayerView;

const PLAYER_HTML: &str = include_str!("../ui/player.html");

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every `{{NAME}}` with its value; unknown names are left as is
fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn playlist_options(view: &PlayerView) -> String {
    let mut html = String::new();
    for name in &view.playlist_names {
        let selected = if *name == view.active_playlist { " selected" } else { "" };
        let _ = writeln!(
            html,
            "                    <option value=\"{0}\"{1}>{0}</option>",
            escape_html(name),
            selected
        );
    }
    html
}

fn artwork(song: &SongDisplayInfo) -> String {
    match (&song.id, song.has_artwork) {
        (Some(id), true) => format!(
            "                    <img src=\"/artwork/{}\" alt=\"Album art\">",
            urlencoding::encode(id)
        ),
        _ => "                    <div class=\"artwork-placeholder\">🎵</div>".to_string(),
    }
}

fn audio(song: &SongDisplayInfo, autoplay: bool) -> String {
    let Some(payload) = &song.audio else {
        let detail = song
            .warning
            .as_ref()
            .map(|w| format!("<br><small>{}</small>", escape_html(&w.to_string())))
            .unwrap_or_default();
        return format!(
            "                    <div class=\"warning\">Audio not available.{}</div>",
            detail
        );
    };

    let autoplay_attr = if autoplay { " autoplay" } else { "" };
    format!(
        r#"                    <audio id="audio_player" src="{}" controls{}>
                        Your browser does not support the audio element.
                    </audio>
                    <script>
                        document.getElementById('audio_player').onended = function () {{
                            document.getElementById('track-end').submit();
                        }};
                    </script>"#,
        escape_html(&payload.data_uri()),
        autoplay_attr
    )
}

fn download(song: &SongDisplayInfo) -> String {
    if song.audio.is_some() {
        "                        <a href=\"/download\" title=\"Download song\" download>📥</a>"
            .to_string()
    } else {
        String::new()
    }
}

fn listing(rows: &[ListingRow]) -> String {
    let mut html = String::new();
    for row in rows {
        let (class, marker) = if row.is_current {
            (" class=\"current\"", " 🎵")
        } else {
            ("", "")
        };
        let _ = writeln!(
            html,
            r#"                <li{class}>
                    <div><strong class="song-name">{title}</strong><br><em>{artist}</em>{marker}</div>
                    <form method="post" action="/play/{index}"><button type="submit">Play</button></form>
                </li>"#,
            class = class,
            title = escape_html(&row.title),
            artist = escape_html(&row.artist),
            marker = marker,
            index = row.index,
        );
    }
    html
}

/// Render the full player page
pub fn render_page(view: &PlayerView) -> String {
    let song = &view.song;
    let values: HashMap<&str, String> = HashMap::from([
        ("PLAYLIST_OPTIONS", playlist_options(view)),
        ("ARTWORK", artwork(song)),
        ("TITLE", escape_html(&song.title)),
        ("ARTIST", escape_html(&song.artist)),
        ("ALBUM", escape_html(&song.album)),
        ("AUDIO", audio(song, view.autoplay)),
        ("DOWNLOAD", download(song)),
        ("PLAYLIST_NAME", escape_html(&view.active_playlist)),
        ("LISTING", listing(&view.listing)),
    ]);
    fill_template(PLAYER_HTML, &values)
}
