use core::fmt;
use core::marker::PhantomData;

use crate::{Error, Result};

/// Host memory backing one operand of a call.
///
/// A blob is only a pointer and a length. It does not borrow, so the caller
/// must keep the memory alive until the event returned for the call completes.
/// Running a routine on blobs is therefore `unsafe`, see
/// [`crate::Implementation::execute`].
///
/// Blobs made from shared references are read only and are refused as
/// output or in-out operands.
pub struct Blob<T> {
    ptr: *mut T,
    len: usize,
    writable: bool,
    _marker: PhantomData<T>,
}

impl<T> Clone for Blob<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Blob<T> {}

impl<T> fmt::Debug for Blob<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("writable", &self.writable)
            .finish()
    }
}

impl<T> Blob<T> {
    pub fn null() -> Self {
        Blob { ptr: core::ptr::null_mut(), len: 0, writable: false, _marker: PhantomData }
    }

    /// Read-only operand, only ever bound for input.
    pub fn from_slice(s: &[T]) -> Self {
        Blob { ptr: s.as_ptr() as *mut T, len: s.len(), writable: false, _marker: PhantomData }
    }

    pub fn from_mut_slice(s: &mut [T]) -> Self {
        Blob { ptr: s.as_mut_ptr(), len: s.len(), writable: true, _marker: PhantomData }
    }

    pub fn from_ref(v: &T) -> Self {
        Blob::from_slice(core::slice::from_ref(v))
    }

    pub fn from_mut(v: &mut T) -> Self {
        Blob::from_mut_slice(core::slice::from_mut(v))
    }

    /// Writable blob over raw memory.
    ///
    /// # Safety
    /// `ptr` must be valid for reads and writes of `len` elements for as long
    /// as the blob is in use.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Blob { ptr, len, writable: true, _marker: PhantomData }
    }

    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn is_aligned(&self, align: usize) -> bool {
        (self.ptr as usize) % align == 0
    }

    /// Blob starting `count` elements further, the length shrinks accordingly.
    pub fn offset(&self, count: usize) -> Self {
        if self.ptr.is_null() {
            return *self;
        }
        let count = count.min(self.len);
        Blob { ptr: self.ptr.wrapping_add(count), len: self.len - count, ..*self }
    }

    /// Same memory seen as raw bytes.
    pub fn as_bytes(&self) -> Blob<u8> {
        Blob {
            ptr: self.ptr as *mut u8,
            len: self.len * core::mem::size_of::<T>(),
            writable: self.writable,
            _marker: PhantomData,
        }
    }

    pub(crate) fn region(&self, count: usize) -> Result<HostRegion> {
        if self.ptr.is_null() {
            return Err(Error::InvalidValue("operand"));
        }
        if count > self.len {
            return Err(Error::BufferTooSmall { needed: count, len: self.len });
        }
        Ok(HostRegion { ptr: self.ptr as *mut u8, bytes: count * core::mem::size_of::<T>() })
    }

    /// [`Blob::region`] for operands the kernel writes.
    pub(crate) fn writable_region(&self, count: usize) -> Result<HostRegion> {
        let region = self.region(count)?;
        if !self.writable {
            return Err(Error::InvalidValue("read-only operand"));
        }
        Ok(region)
    }
}

/// Raw byte view of host memory handed to [`crate::Engine::bind_host`].
#[derive(Clone, Copy, Debug)]
pub struct HostRegion {
    ptr: *mut u8,
    bytes: usize,
}

impl HostRegion {
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }
}
