//! Plain-text rendering of the current screen, used by the terminal host.

use crate::engine::{PresentationEngine, RenderedFeature};

const STRUCTURED: char = '●';
const CUSTOM: char = '◇';
const UNAVAILABLE: char = '✗';

/// Shown in place of a feature with no content.
pub const UNAVAILABLE_NOTICE: &str =
    "Error, there was no onboarding view. Contact the developer if this error persists";

/// Render the engine's current screen.
///
/// Example output:
/// ```text
/// What's New
/// ├── ● Widgets: On your home screen [star]
/// ├── ◇ <promo-card> styled accentColor/white
/// └── ✗ Error, there was no onboarding view. ...
/// [ Continue ]  Skip
/// (1/2)
/// ```
pub fn render_screen(engine: &PresentationEngine) -> String {
    let mut output = String::new();
    output.push_str(engine.title().as_str());
    output.push('\n');

    let Some(group) = engine.current_group() else {
        return output;
    };

    let features = engine.rendered_features();
    for (i, feature) in features.iter().enumerate() {
        let is_last = i == features.len() - 1;
        output.push_str(if is_last { "└── " } else { "├── " });
        render_feature(&mut output, feature);
        output.push('\n');
    }

    output.push_str("[ ");
    output.push_str(group.primary_action.title.as_str());
    output.push_str(" ]");
    if let Some(secondary) = &group.secondary_action {
        output.push_str("  ");
        output.push_str(secondary.title.as_str());
    }
    output.push('\n');

    if let Some(index) = engine.group_index() {
        output.push_str(&format!("({}/{})\n", index + 1, engine.whats_new().group_count()));
    }

    output
}

fn render_feature(output: &mut String, feature: &RenderedFeature<'_>) {
    match feature {
        RenderedFeature::Structured {
            image,
            title,
            subtitle,
        } => {
            output.push(STRUCTURED);
            output.push(' ');
            output.push_str(title.as_str());
            output.push_str(": ");
            output.push_str(subtitle.as_str());
            if !image.as_str().is_empty() {
                output.push_str(&format!(" [{}]", image));
            }
        }
        RenderedFeature::Custom { content, style } => {
            output.push(CUSTOM);
            output.push_str(&format!(" <{}>", content));
            if let Some(style) = style {
                output.push_str(&format!(" styled {}/{}", style.background, style.foreground));
            }
        }
        RenderedFeature::Unavailable => {
            output.push(UNAVAILABLE);
            output.push(' ');
            output.push_str(UNAVAILABLE_NOTICE);
        }
    }
}
