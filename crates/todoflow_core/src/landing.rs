//! Marketing page shown to signed-out users. Every theme carries the same
//! copy; only the palette changes.

use crate::config::{LandingTheme, Palette};
use crate::model::Priority;

pub const BRAND: &str = "TodoFlow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub blurb: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoItem {
    pub title: &'static str,
    pub priority: Priority,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    pub theme: LandingTheme,
    pub headline: &'static str,
    pub highlight: &'static str,
    pub tagline: &'static str,
    pub call_to_action: &'static str,
    pub features: [Feature; 3],
    pub demo_heading: &'static str,
    pub demo: [DemoItem; 3],
}

impl LandingPage {
    pub fn new(theme: LandingTheme) -> Self {
        Self {
            theme,
            headline: "Organize Your Life",
            highlight: "Beautifully",
            tagline: "A modern, intuitive todo app that helps you stay focused and productive. \
                      Prioritize tasks, set deadlines, and achieve your goals with ease.",
            call_to_action: "Get Started Free",
            features: [
                Feature {
                    title: "Lightning Fast",
                    blurb: "Add, edit, and organize your todos instantly with our responsive interface.",
                },
                Feature {
                    title: "Priority System",
                    blurb: "Set priorities and focus on what matters most with our intuitive system.",
                },
                Feature {
                    title: "Due Dates",
                    blurb: "Never miss a deadline with our smart date tracking and reminders.",
                },
            ],
            demo_heading: "Simple. Clean. Effective.",
            demo: [
                DemoItem {
                    title: "Review quarterly goals",
                    priority: Priority::High,
                    completed: true,
                },
                DemoItem {
                    title: "Prepare presentation slides",
                    priority: Priority::Medium,
                    completed: false,
                },
                DemoItem {
                    title: "Call dentist for appointment",
                    priority: Priority::Low,
                    completed: false,
                },
            ],
        }
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Plain-text rendering with the theme's terminal colors.
    pub fn render(&self) -> String {
        let palette = self.palette();
        let mut lines = vec![
            palette.accentize(BRAND),
            String::new(),
            format!("{} {}", self.headline, palette.accentize(self.highlight)),
            palette.mutedize(self.tagline),
            String::new(),
        ];

        for feature in &self.features {
            lines.push(format!("* {}", palette.accentize(feature.title)));
            lines.push(format!("  {}", palette.mutedize(feature.blurb)));
        }

        lines.push(String::new());
        lines.push(self.demo_heading.to_string());
        for item in &self.demo {
            let mark = if item.completed { "[x]" } else { "[ ]" };
            lines.push(format!("{mark} {} ({})", item.title, item.priority));
        }

        lines.push(String::new());
        lines.push(palette.accentize(self.call_to_action));
        lines.join("\n")
    }
}
