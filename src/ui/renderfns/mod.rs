pub mod footer;
pub mod header;
pub mod overlay;
pub mod utils;

pub use footer::draw_footer;
pub use header::draw_header;
pub use overlay::draw_prompt_overlay;
pub use utils::{stock_color, truncate};
