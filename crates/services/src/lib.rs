//! # services
//!
//! The orchestration layer of Agora: the discussion page controller (view
//! state plus re-fetch-after-write coordination), the forum and product
//! services behind it, and the session binding that turns the actor-aware
//! forum service into the identity-bound gateway the controller consumes.

pub mod discussion_page;
pub mod forum;
pub mod notify;
pub mod product;
pub mod session;

pub use discussion_page::{
    DiscussionForm, DiscussionPage, PageMode, PageState, PageTarget, Redirect, StateChange,
};
pub use forum::ForumService;
pub use notify::TracingNotifier;
pub use product::ProductService;
pub use session::Session;
