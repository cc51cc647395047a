//! HTML output for a composed document.

use minijinja::{context, Environment};

use crate::render::compose::Document;

const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");
const STYLES: &str = include_str!("../../templates/styles.css");

/// Compiled page templates. Built once at startup and shared.
///
/// `.html` templates are auto-escaped, so profile text can never inject markup.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("page.html", PAGE_TEMPLATE)?;
        env.add_template("styles.css", STYLES)?;
        Ok(Self { env })
    }

    pub fn render(&self, doc: &Document) -> Result<String, minijinja::Error> {
        self.env.get_template("page.html")?.render(context! { doc => doc })
    }
}
