use serde::Serialize;

/// Which listing the showcase is currently displaying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ShowcaseView {
    #[default]
    Featured,
    Category { name: String },
    Recommendations { query: String },
}

impl ShowcaseView {
    pub fn title(&self) -> String {
        match self {
            ShowcaseView::Featured => "Featured Products".to_string(),
            ShowcaseView::Category { name } => format!("{} Products", name),
            ShowcaseView::Recommendations { .. } => "AI Recommendations".to_string(),
        }
    }
}
