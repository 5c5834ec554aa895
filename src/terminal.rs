mod bullet_points;
mod prompt;
mod spinner;
mod table;

pub use bullet_points::{BulletPointPrinter, LineWriter, StdoutLineWriter};
pub use prompt::{
    prompt, prompt_optional, prompt_parsed, prompt_password, prompt_select, prompt_yes_no,
};
pub use spinner::with_spinner;
pub use table::Table;
