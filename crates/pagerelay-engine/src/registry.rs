//! Engine registry: the static table of supported AI chat front-ends.
//!
//! One entry per target origin. A page whose origin has no entry is simply
//! not automated - lookup misses are an expected outcome, not an error.

/// Post-submit behavior, dispatched per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSubmit {
    /// Wait for the result panel, then focus, scroll into view, and click it.
    Default,
    /// `Default`, then dismiss the engine's settings overlay if it is open.
    ClosesOverlayPanel {
        dismiss_locator: &'static str,
    },
}

/// Build-time configuration for one supported engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Short name used by the CLI (`--engine qwen`).
    pub name: &'static str,
    /// Page origin (host) the automation binds to.
    pub origin: &'static str,
    /// URL opened to start a fresh conversation.
    pub open_url: &'static str,
    /// Locator of the prompt input element.
    pub input_locator: &'static str,
    /// Locator of the submit control.
    pub submit_locator: &'static str,
    /// Locator of the engine's deep-thinking toggle, when it has one.
    pub secondary_action_locator: Option<&'static str>,
    /// Locator of the rendered result panel.
    pub result_panel_locator: &'static str,
    /// Post-submit behavior variant.
    pub post_submit: PostSubmit,
}

const RESULT_PANEL: &str = ".markdown-main-panel";

const ENGINES: &[EngineConfig] = &[
    EngineConfig {
        name: "gemini",
        origin: "gemini.google.com",
        open_url: "https://gemini.google.com/app",
        input_locator: "div.ql-editor.textarea, rich-textarea .ql-editor",
        submit_locator: "button.send-button, div.send-button-container button",
        secondary_action_locator: None,
        result_panel_locator: RESULT_PANEL,
        post_submit: PostSubmit::Default,
    },
    EngineConfig {
        name: "qwen",
        origin: "chat.qwen.ai",
        open_url: "https://chat.qwen.ai/",
        input_locator: "#chat-input",
        submit_locator: "#send-message-button",
        secondary_action_locator: Some("button.ThinkingButton,button.chat-input-feature-btn"),
        result_panel_locator: RESULT_PANEL,
        post_submit: PostSubmit::Default,
    },
    EngineConfig {
        name: "deepseek",
        origin: "chat.deepseek.com",
        open_url: "https://chat.deepseek.com/",
        input_locator: "textarea#chat-input",
        submit_locator: "button#send-message-button",
        secondary_action_locator: None,
        result_panel_locator: RESULT_PANEL,
        post_submit: PostSubmit::Default,
    },
    EngineConfig {
        name: "aistudio",
        origin: "aistudio.google.com",
        open_url: "https://aistudio.google.com/app/prompts/new_chat",
        input_locator: "textarea.textarea, textarea[aria-label*=\"Type something\"]",
        submit_locator: "button[aria-label=\"Run\"], button.run-button",
        secondary_action_locator: None,
        result_panel_locator: RESULT_PANEL,
        post_submit: PostSubmit::ClosesOverlayPanel {
            dismiss_locator: "button[aria-label=\"Close run settings panel\"]",
        },
    },
];

/// Look up the engine bound to a page origin.
pub fn lookup(origin: &str) -> Option<&'static EngineConfig> {
    ENGINES.iter().find(|e| e.origin == origin)
}

/// Look up an engine by its CLI name.
pub fn by_name(name: &str) -> Option<&'static EngineConfig> {
    ENGINES.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// All supported engines.
pub fn all() -> &'static [EngineConfig] {
    ENGINES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_origin() {
        let engine = lookup("chat.qwen.ai").unwrap();
        assert_eq!(engine.name, "qwen");
        assert_eq!(engine.input_locator, "#chat-input");
        assert!(engine.secondary_action_locator.is_some());
    }

    #[test]
    fn test_lookup_unknown_origin() {
        assert!(lookup("example.com").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert_eq!(by_name("Gemini").unwrap().origin, "gemini.google.com");
        assert!(by_name("copilot").is_none());
    }

    #[test]
    fn test_overlay_variant_only_on_aistudio() {
        for engine in all() {
            match engine.post_submit {
                PostSubmit::ClosesOverlayPanel { dismiss_locator } => {
                    assert_eq!(engine.name, "aistudio");
                    assert!(dismiss_locator.contains("Close run settings panel"));
                }
                PostSubmit::Default => assert_ne!(engine.name, "aistudio"),
            }
        }
    }

    #[test]
    fn test_names_and_origins_unique() {
        for (i, a) in all().iter().enumerate() {
            for b in &all()[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.origin, b.origin);
            }
        }
    }
}
