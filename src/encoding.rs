use bincode::Options;

use crate::DbResult;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

pub(crate) fn encode<S: ?Sized + serde::Serialize>(item: &S) -> DbResult<Vec<u8>> {
    Ok(options().serialize(item)?)
}

/// Decode a value from the front of `bytes`. Anything after it is ignored, so
/// a fixed-size header can be read on its own.
pub(crate) fn decode<'a, T: serde::Deserialize<'a>>(bytes: &'a [u8]) -> DbResult<T> {
    Ok(options().deserialize(bytes)?)
}
