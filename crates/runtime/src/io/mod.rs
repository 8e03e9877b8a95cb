mod memory;
mod stream;

pub use self::{
    memory::{MemorySource, MemoryStream},
    stream::{Capability, StreamBacking, StreamRead, StreamWrite},
};
