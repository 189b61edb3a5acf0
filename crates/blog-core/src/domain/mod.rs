//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{AuthoredComment, Comment, CommentDetail};
pub use post::{Post, PostDetail};
pub use user::{NewUser, User, UserSummary};
