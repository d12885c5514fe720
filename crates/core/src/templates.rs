//! Static registry of prompt templates.
//!
//! The registry is fixed at compile time. Lookups never fail: an unknown id
//! resolves to the first entry ([`DEFAULT_TEMPLATE_ID`]).

use serde::Serialize;

/// Id of the template used when the client does not pick one.
pub const DEFAULT_TEMPLATE_ID: &str = "default";

/// A named prompt-wrapping strategy selected by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    /// Instruction placed in front of the user's text when prompting a model.
    pub prompt_wrapper: &'static str,
    pub description: &'static str,
}

/// All templates, in display order. The first entry is the fallback.
pub const TEMPLATES: &[Template] = &[
    Template {
        id: DEFAULT_TEMPLATE_ID,
        name: "Concise summary",
        prompt_wrapper:
            "Summarize the following text in a concise paragraph while keeping key facts intact:",
        description: "Short, factual summary with trimmed length.",
    },
    Template {
        id: "playful",
        name: "Playful remix",
        prompt_wrapper:
            "Rewrite the text with a playful tone, emoji as spice, and keep the core idea intact:",
        description: "Casual and fun rewrite that still communicates the message.",
    },
    Template {
        id: "technical",
        name: "Technical brief",
        prompt_wrapper:
            "Reframe the content for a technical audience, focusing on specifications and constraints:",
        description: "Engineering-friendly rewrite that emphasises mechanics.",
    },
    Template {
        id: "prompt-generator",
        name: "Image prompt generator",
        prompt_wrapper: "Turn this text into a descriptive image prompt for a diffusion model. \
             Mention medium, lighting, and composition:",
        description: "Transforms copy into a descriptive prompt for image models.",
    },
];

/// Look up a template by id, falling back to the default template.
pub fn find_template(id: &str) -> &'static Template {
    TEMPLATES
        .iter()
        .find(|tpl| tpl.id == id)
        .unwrap_or(&TEMPLATES[0])
}
