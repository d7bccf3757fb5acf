//! Turning labelled issues into redirect pages on the Pages branch.
//!
//! The flow for one event is: [`RequestParser`] extracts the link from the
//! issue, [`IndexStore`] loads the published index, [`LinkIndex::merge`]
//! adds the link, [`SiteRenderer`] produces the site files, the
//! [`Publisher`](crate::publish::Publisher) commits them, and
//! [`IssueNotifier`] reports back on the issue.

mod entry;
mod error;
mod index;
mod notify;
mod request;
mod site;
mod slug;
mod workflow;

pub use entry::{ShortLinkEntry, SiteBase};
pub use error::ShortenError;
pub use index::{INDEX_DOCUMENT_PATH, IndexStore, LinkIndex};
pub use notify::{IssueNotifier, confirmation_message, rejection_message};
pub use request::{RequestParseError, RequestParser, ShortLinkRequest};
pub use site::{RenderError, SiteRenderer};
pub use slug::{SlugCodec, SlugSaltError};
pub use workflow::{ShortenOutcome, ShortenSettings, ShortenWorkflow};
