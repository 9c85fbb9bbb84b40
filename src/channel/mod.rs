pub mod guarded;
pub mod traits;

pub use guarded::GuardedChannel;
pub use traits::{ByteChannel, ChannelFull, Pushed};
