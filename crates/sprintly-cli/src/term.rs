//! Terminal capability probing.

use console::Term;
use sprintly_core::Renderer;

/// Column budget when the terminal cannot be probed.
const DEFAULT_COLUMNS: usize = 80;

/// Build a renderer matched to stdout's capabilities.
///
/// Falls back to 80 columns and no color when stdout is not a terminal or
/// probing fails.
#[must_use]
pub fn stdout_renderer() -> Renderer {
    let term = Term::stdout();
    if term.is_term() {
        let columns = term
            .size_checked()
            .map_or(DEFAULT_COLUMNS, |(_, cols)| usize::from(cols));
        Renderer::new(console::colors_enabled(), columns)
    } else {
        Renderer::new(false, DEFAULT_COLUMNS)
    }
}
