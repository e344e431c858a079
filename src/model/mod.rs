mod evaluate;
mod player;
mod props;

pub use evaluate::*;
pub use player::*;
pub use props::*;
