use super::PresentationEngine;
use crate::models::{ActionStyle, ContentRef, Feature, ImageRef, Text};

/// A feature of the current group, resolved for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderedFeature<'a> {
    Structured {
        image: &'a ImageRef,
        title: &'a Text,
        subtitle: &'a Text,
    },
    Custom {
        content: &'a ContentRef,
        /// The current group's primary action style, present only when the
        /// feature opted into default styling.
        style: Option<&'a ActionStyle>,
    },
    /// Nothing to render; the host shows a fallback notice.
    Unavailable,
}

impl PresentationEngine {
    /// The features of the current group, ready to render.
    ///
    /// Empty before the engine starts.
    pub fn rendered_features(&self) -> Vec<RenderedFeature<'_>> {
        let Some(group) = self.current_group() else {
            return Vec::new();
        };
        let style = &group.primary_action.style;

        group
            .features
            .iter()
            .enumerate()
            .map(|(position, feature)| match feature {
                Feature::Structured {
                    image,
                    title,
                    subtitle,
                } => RenderedFeature::Structured {
                    image,
                    title,
                    subtitle,
                },
                Feature::Custom {
                    content,
                    use_default_styling,
                } => RenderedFeature::Custom {
                    content,
                    style: use_default_styling.then_some(style),
                },
                Feature::Missing => {
                    tracing::warn!(
                        "Presentation {}: feature {} of group {:?} in release {} has no content",
                        self.id,
                        position,
                        self.group_index,
                        self.whats_new.version
                    );
                    RenderedFeature::Unavailable
                }
            })
            .collect()
    }
}
