use axum::extract::State;
use axum::response::Html;
use chrono::Datelike;

use winter_core::canvas::{BUFFER_HEIGHT, BUFFER_WIDTH};
use winter_core::game_registry::GameEntry;

use crate::config::SiteConfig;
use crate::state::AppState;

const STYLESHEET: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    background-color: #2d5016;
    font-family: system-ui, -apple-system, sans-serif;
    height: 100vh;
    display: flex;
    flex-direction: column;
}

.button-bar {
    display: flex;
    gap: 10px;
    justify-content: center;
    padding: 15px;
    background-color: #1a3009;
    box-shadow: 0 2px 4px rgba(0,0,0,0.3);
}

.game-button {
    background-color: #d4af37;
    color: #1a3009;
    border: none;
    padding: 12px 24px;
    font-size: 16px;
    font-weight: 600;
    cursor: pointer;
    border-radius: 6px;
    transition: all 0.2s;
}

.game-button:hover {
    background-color: #f0c959;
    transform: translateY(-2px);
}

.game-button.active {
    background-color: #d4af37;
    outline: 2px solid #f0c959;
    outline-offset: 2px;
}

.footer {
    background-color: #1a3009;
    color: white;
    text-align: center;
    padding: 15px;
    font-size: 14px;
}

.canvas-container {
    flex: 1;
    display: flex;
    justify-content: center;
    align-items: center;
    padding: 20px;
    min-height: 400px;
}

#game-canvas {
    background-color: #1a3009;
    border: 3px solid #d4af37;
    border-radius: 4px;
    max-width: 100%;
    max-height: 100%;
}

.fatal-error {
    color: #f0c959;
    text-align: center;
    padding: 15px;
}

@media (max-width: 768px) {
    .button-bar {
        flex-wrap: wrap;
    }

    .game-button {
        padding: 10px 20px;
        font-size: 14px;
    }
}
"#;

/// Year shown in the footer, taken from the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// `GET /`: the arcade page.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(
        &state.config.site,
        state.registry.entries(),
        current_year(),
    ))
}

/// Render the full HTML document. The first game's button starts active.
pub fn render_page(site: &SiteConfig, games: &[GameEntry], year: i32) -> String {
    let mut buttons = String::new();
    for (index, game) in games.iter().enumerate() {
        let class = if index == 0 {
            "game-button active"
        } else {
            "game-button"
        };
        buttons.push_str(&format!(
            "<button class=\"{class}\" data-game=\"{}\" title=\"{}\">{}</button>",
            game.id,
            escape_html(&game.description),
            escape_html(&game.label),
        ));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{STYLESHEET}</style>
</head>
<body>
<div class="button-bar">{buttons}</div>
<div class="canvas-container"><canvas id="game-canvas" width="{BUFFER_WIDTH}" height="{BUFFER_HEIGHT}"></canvas></div>
<div class="footer"><p>{author}</p><p>Copyright (c) {year}</p></div>
<script type="module">
import init from {script};
init();
</script>
</body>
</html>
"#,
        title = escape_html(&site.title),
        author = escape_html(&site.author),
        script = js_string(&site.client_script),
    )
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Quote text as a JS string literal that is safe inside a `<script>` element.
fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '<' => out.push_str("\\u003c"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
