// Rendering pipeline: load state → composed document → HTML.
// Formatters and presence gates are pure; only `page` touches templates.

pub mod compose;
pub mod format;
pub mod page;
pub mod presence;
pub mod theme;

pub use compose::compose;
pub use page::PageRenderer;
pub use theme::{Theme, ThemeContext};
