use crate::{
    AlertPayload, DEFAULT_DISPLAY_DURATION_MS, EventAction, ImageAlert, Position, SoundAlert,
    TextAlert, VideoAlert,
};

use std::collections::HashMap;

/// Build the alert payload for one event occurrence.
///
/// Never fails: a block that is enabled but has no template or file path is
/// left out of the payload.
pub fn compose(action: &EventAction, context: &HashMap<String, String>) -> AlertPayload {
    let text = (action.text.enabled && !action.text.template.trim().is_empty()).then(|| {
        TextAlert {
            content: render_template(&action.text.template, context),
            duration: u64::from(action.text.duration_ms),
            position: action.text.position,
            style: action.text.style.clone(),
        }
    });

    let image = action
        .image
        .enabled
        .then(|| non_blank(&action.image.file_path))
        .flatten()
        .map(|file_path| ImageAlert {
            file_path,
            duration: u64::from(action.image.duration_ms),
            position: action.image.position,
            width: action.image.width,
            height: action.image.height,
        });

    let video = action
        .video
        .enabled
        .then(|| non_blank(&action.video.file_path))
        .flatten()
        .map(|file_path| VideoAlert {
            file_path,
            position: action.video.position,
            width: action.video.width,
            height: action.video.height,
            volume: action.video.volume,
        });

    let sound = action
        .sound
        .enabled
        .then(|| non_blank(&action.sound.file_path))
        .flatten()
        .map(|file_path| SoundAlert {
            file_path,
            volume: action.sound.volume,
        });

    AlertPayload {
        text,
        image,
        video,
        sound,
    }
}

/// Synthetic alert sent when a browser source asks to verify its setup
pub fn compose_test_alert(channel_name: &str) -> AlertPayload {
    AlertPayload {
        text: Some(TextAlert {
            content: format!("Test alert on channel '{channel_name}'"),
            duration: DEFAULT_DISPLAY_DURATION_MS,
            position: Position::default(),
            style: None,
        }),
        ..Default::default()
    }
}

/// Replace `{key}` placeholders with values from `context`.
///
/// Unknown keys stay in the output verbatim, braces included. Substituted
/// values are not scanned again.
pub fn render_template(template: &str, context: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) if is_placeholder_key(&after[..close]) => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_placeholder_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn non_blank(path: &Option<String>) -> Option<String> {
    path.as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}
