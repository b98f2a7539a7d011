pub mod codec;
pub mod frame_rate;
pub mod timecode;
