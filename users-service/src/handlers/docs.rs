//! Interactive documentation page

use axum::{extract::State, response::Html};

use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

/// Render the page with links pointing at the configured base path
pub fn render_index(base_path: &str) -> String {
    INDEX_TEMPLATE.replace("{{base_path}}", base_path)
}

/// Serve the documentation page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config().api.normalized_base_path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_lists_endpoints() {
        let page = render_index("/api");
        assert!(page.contains("/api/users"));
        assert!(page.contains("/api/users/{id}"));
        assert!(page.contains("/api/health"));
        assert!(!page.contains("{{base_path}}"));
    }

    #[test]
    fn test_render_index_at_root() {
        let page = render_index("");
        assert!(page.contains("'/users'"));
        assert!(page.contains("'/health'"));
    }
}
