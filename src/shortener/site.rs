//! Rendering of the static Pages site from the link index.
//!
//! Every publish writes the same four files: an empty `.nojekyll` so Pages
//! serves the tree verbatim, the `index.html` listing, the `index.json`
//! document, and the redirect page for the link being added.

use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;
use thiserror::Error;

use super::index::{INDEX_DOCUMENT_PATH, LinkIndex};
use super::request::ShortLinkRequest;
use crate::publish::Artifact;

const LISTING_TEMPLATE: &str = concat!(
    "<!DOCTYPE html><h1>Short!</h1><ul>",
    "{% for link in links %}",
    "<li><a href=\"{{ link.to }}\">{{ link.from }}</a></li>",
    "{% endfor %}",
    "</ul>",
);

const REDIRECT_TEMPLATE: &str =
    "<!DOCTYPE html><meta http-equiv=\"refresh\" content=\"0;url={{ to }}\">";

/// The site could not be rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A page template failed to compile or render.
    #[error("failed to render {page}: {message}")]
    Template {
        /// Template name.
        page: String,
        /// Engine message.
        message: String,
    },
    /// The index could not be encoded.
    #[error("failed to encode link index: {message}")]
    Document {
        /// Encoder message.
        message: String,
    },
}

#[derive(Serialize)]
struct ListedLink<'a> {
    from: &'a str,
    to: &'a str,
}

/// Renders site artifacts.
pub struct SiteRenderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for SiteRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteRenderer").finish_non_exhaustive()
    }
}

impl SiteRenderer {
    /// Compiles the page templates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when a built-in template does not
    /// compile.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        for (name, source) in [
            ("listing.html", LISTING_TEMPLATE),
            ("redirect.html", REDIRECT_TEMPLATE),
        ] {
            env.add_template(name, source)
                .map_err(|e| RenderError::Template {
                    page: name.to_owned(),
                    message: e.to_string(),
                })?;
        }
        Ok(Self { env })
    }

    fn render_page<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, RenderError> {
        let template_error = |e: minijinja::Error| RenderError::Template {
            page: name.to_owned(),
            message: e.to_string(),
        };
        self.env
            .get_template(name)
            .map_err(template_error)?
            .render(ctx)
            .map_err(template_error)
    }

    /// Listing page with one item per link, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when rendering fails.
    pub fn listing(&self, index: &LinkIndex) -> Result<String, RenderError> {
        let links: Vec<ListedLink<'_>> = index
            .iter()
            .map(|(from, to)| ListedLink { from, to })
            .collect();
        self.render_page("listing.html", context! { links => links })
    }

    /// Redirect page sending visitors on to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when rendering fails.
    pub fn redirect(&self, to: &str) -> Result<String, RenderError> {
        self.render_page("redirect.html", context! { to => to })
    }

    /// Renders the full artifact set for `index` after adding `request`.
    ///
    /// `index` must already contain the request's entry.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when a page or the index document cannot be
    /// produced.
    pub fn render(
        &self,
        index: &LinkIndex,
        request: &ShortLinkRequest,
    ) -> Result<Vec<Artifact>, RenderError> {
        let document = index.to_document().map_err(|e| RenderError::Document {
            message: e.to_string(),
        })?;
        Ok(vec![
            Artifact::new(".nojekyll", Vec::new()),
            Artifact::new("index.html", self.listing(index)?),
            Artifact::new(INDEX_DOCUMENT_PATH, document),
            Artifact::new(
                format!("{}/index.html", request.short_path),
                self.redirect(request.entry.to.as_str())?,
            ),
        ])
    }
}
