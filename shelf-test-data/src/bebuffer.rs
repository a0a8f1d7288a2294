//! small utilities for writing big-endian test data

use shelf_types::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer(Vec<u8>);

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.0.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.0.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Append raw bytes, unchanged.
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<BeBuffer> for Vec<u8> {
    fn from(src: BeBuffer) -> Vec<u8> {
        src.0
    }
}

/// Build a [`BeBuffer`] from a comma separated list of scalars.
///
/// Bracketed lists are appended as raw bytes; anything else must be a
/// [`Scalar`]. Wrap expressions containing commas or casts in parentheses.
///
/// ```
/// # use shelf_test_data::be_buffer;
/// let buf = be_buffer! { 1u16, (0x4F54u16 as i16), [0xff, 0] };
/// assert_eq!(&*buf, &[0, 1, 0x4F, 0x54, 0xff, 0]);
/// ```
#[macro_export]
macro_rules! be_buffer {
    ($($tt:tt)*) => {
        $crate::be_buffer_add!($crate::bebuffer::BeBuffer::new(), $($tt)*)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! be_buffer_add {
    ($buf:expr $(,)?) => {
        $buf
    };
    ($buf:expr, [$($byte:expr),* $(,)?] $(, $($rest:tt)*)?) => {
        $crate::be_buffer_add!($buf.extend_bytes(&[$($byte),*]) $(, $($rest)*)?)
    };
    ($buf:expr, $item:expr $(, $($rest:tt)*)?) => {
        $crate::be_buffer_add!($buf.push($item) $(, $($rest)*)?)
    };
}
