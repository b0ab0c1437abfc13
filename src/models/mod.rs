pub mod cart;
pub mod menu;
pub mod money;
pub mod notification;
pub mod reservation;

pub use cart::*;
pub use menu::*;
pub use money::*;
pub use notification::*;
pub use reservation::*;
