mod category_bar;
mod command_input;
mod input;
mod key_result;
mod search_input;

pub use category_bar::CategoryBar;
pub use command_input::CommandInput;
pub use key_result::KeyResult;
pub use search_input::{SearchEvent, SearchInput};
