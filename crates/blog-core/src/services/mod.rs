//! Entity services - validation, ownership rules and composition of
//! repository calls. Each service receives its dependencies at construction.

mod comments;
pub mod input;
mod posts;
mod users;

pub use comments::CommentService;
pub use input::{Credentials, NewComment, NewPost, PostChanges, RegisterUser};
pub use posts::PostService;
pub use users::{Session, UserService};
