//! Output side of the packed bitstream.
pub(crate) mod bit_writer;
