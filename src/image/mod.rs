pub mod frame;
pub mod io;
pub mod plane;

pub use self::frame::{ChannelOrder, ColorFrame, OwnedFrame};
pub use self::plane::{GrayU8, ImageF32, Plane};
