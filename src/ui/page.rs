//! Server-side rendering of the translator page.

use std::fmt::Write;

pub const TITLE: &str = "Traducteur Anglais-Français";
pub const EMPTY_INPUT_WARNING: &str = "Veuillez entrer du texte.";
pub const SUCCESS_MESSAGE: &str = "Traduction réussie !";
pub const CONNECTION_ERROR: &str = "Impossible de se connecter à l'API.";
pub const CONNECTION_HINT: &str = "Assurez-vous que le service de traduction est démarré.";
pub const TIMEOUT_ERROR: &str = "L'API n'a pas répondu à temps.";
pub const PENDING_MESSAGE: &str = "Interrogation de l'API en cours...";

/// What to show under the form after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success { translation: String, engine: String },
    Warning(String),
    Error { message: String, hint: Option<String> },
}

pub fn render(text: &str, notice: Option<&Notice>) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(HEAD);

    let _ = write!(
        html,
        r#"<main>
<h1>🌍 {title}</h1>
<p>Cette interface est connectée à une <strong>API de traduction</strong> qui héberge le modèle de Deep Learning.</p>
<form method="post" action="/" onsubmit="var b=document.getElementById('submit');b.disabled=true;b.textContent=b.dataset.pending;">
<label for="text">Entrez le texte en anglais :</label>
<textarea id="text" name="text" rows="6" placeholder="The AI is transforming the world...">{text}</textarea>
<button id="submit" type="submit" data-pending="{pending}">Traduire</button>
</form>
"#,
        title = TITLE,
        pending = escape_html(PENDING_MESSAGE),
        text = escape_html(text),
    );

    if let Some(notice) = notice {
        render_notice(&mut html, notice);
    }

    html.push_str(FOOT);
    html
}

fn render_notice(html: &mut String, notice: &Notice) {
    match notice {
        Notice::Success {
            translation,
            engine,
        } => {
            let _ = write!(
                html,
                r#"<div class="notice success">{}</div>
<div class="notice info">🇫🇷 <strong>Français :</strong> <span id="translation">{}</span></div>
<p class="engine">Moteur : {}</p>
"#,
                SUCCESS_MESSAGE,
                escape_html(translation),
                escape_html(engine),
            );
        }
        Notice::Warning(message) => {
            let _ = writeln!(
                html,
                r#"<div class="notice warning">{}</div>"#,
                escape_html(message)
            );
        }
        Notice::Error { message, hint } => {
            let _ = writeln!(
                html,
                r#"<div class="notice error">{}</div>"#,
                escape_html(message)
            );
            if let Some(hint) = hint {
                let _ = writeln!(
                    html,
                    r#"<div class="notice warning">{}</div>"#,
                    escape_html(hint)
                );
            }
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Traducteur Pro</title>
<style>
body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; box-sizing: border-box; font-size: 1rem; }
button { margin-top: .5rem; padding: .5rem 1.5rem; }
.notice { margin-top: 1rem; padding: .75rem; border-radius: .25rem; }
.success { background: #e6f4ea; }
.info { background: #e8f0fe; }
.warning { background: #fef7e0; }
.error { background: #fce8e6; }
.engine, footer { color: #666; font-size: .85rem; }
</style>
</head>
<body>
"#;

const FOOT: &str = r#"</main>
<hr>
<footer>Projet réalisé avec axum (backend) et une interface web légère (frontend).</footer>
</body>
</html>
"#;
