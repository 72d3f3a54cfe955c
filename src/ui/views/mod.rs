mod detail;
mod list;
mod rows;

pub use detail::DetailView;
pub use list::ListView;
