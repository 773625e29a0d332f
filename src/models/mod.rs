pub mod element;
pub mod note;
pub mod plot_point;
pub mod story;
pub mod user;

pub use element::{ElementKind, StoryElement, StoryElementCreate};
pub use note::{Note, NoteCreate};
pub use plot_point::PlotPointDetail;
pub use story::{Story, StoryCreate};
pub use user::{ChatUser, ChatUserCreate};
