mod board;
mod color;
mod direction;
mod figure;
mod game;
mod r#move;
mod outcome;
mod position;
mod promotion;
mod role;
mod rule;

pub use board::*;
pub use color::*;
pub use direction::*;
pub use figure::*;
pub use game::*;
pub use outcome::*;
pub use position::*;
pub use promotion::*;
pub use r#move::*;
pub use role::*;
pub use rule::*;
