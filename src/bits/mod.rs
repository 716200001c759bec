pub mod reader;
pub mod stream;
pub mod writer;

pub use reader::BitReader;
pub use stream::BitStream;
pub use writer::BitWriter;
