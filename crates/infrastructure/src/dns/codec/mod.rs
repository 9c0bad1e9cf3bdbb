//! DNS wire codec built on `hickory-proto`, plus the 2-byte length framing
//! used by DNS over TCP/TLS.

mod hickory_codec;
mod rdata_map;
mod record_type_map;
pub mod stream;

pub use hickory_codec::HickoryCodec;
pub use hickory_codec::DNS_HEADER_LEN;
pub use record_type_map::{ClassMapper, RcodeMapper, RecordTypeMapper};
pub use stream::{read_frame, stream_decode, stream_encode, write_frame, MAX_FRAME_SIZE};
