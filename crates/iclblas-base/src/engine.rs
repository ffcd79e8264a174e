//! Contract with the compute engine.
//!
//! The engine resolves kernels by name, maps host memory into buffers and runs
//! submitted kernels asynchronously. Everything here is consumed by candidate
//! implementations, nothing in this crate implements it.

use core::fmt;
use core::mem::size_of;
use std::sync::Arc;
use std::time::Duration;

use num_complex::Complex32;

use crate::blob::{Blob, HostRegion};
use crate::{Diag, EngineError, Error, FillMode, Operation, Result, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    Input,
    Output,
    InOut,
    Temp,
}

/// Device side allocation handed out by an engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buffer {
    id: u64,
    access: Access,
    bytes: usize,
}

impl Buffer {
    pub fn new(id: u64, access: Access, bytes: usize) -> Self {
        Buffer { id, access, bytes }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

/// Something that completes, implemented by engines.
pub trait Completion: fmt::Debug + Send + Sync {
    fn id(&self) -> u64;
    /// Blocks until the work behind this completion is done.
    fn wait(&self) -> std::result::Result<Duration, EngineError>;
}

/// Shared completion handle, submissions take these as dependencies.
#[derive(Clone, Debug)]
pub struct Event(Arc<dyn Completion>);

impl Event {
    pub fn new<C: Completion + 'static>(completion: C) -> Self {
        Event(Arc::new(completion))
    }

    pub fn id(&self) -> u64 {
        self.0.id()
    }

    pub fn wait(&self) -> Result<Duration> {
        Ok(self.0.wait()?)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Event {}

/// Launch size, one to three dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NdRange {
    dims: [usize; 3],
    rank: u8,
}

impl NdRange {
    pub fn d1(x: usize) -> Self {
        NdRange { dims: [x, 1, 1], rank: 1 }
    }

    pub fn d2(x: usize, y: usize) -> Self {
        NdRange { dims: [x, y, 1], rank: 2 }
    }

    pub fn d3(x: usize, y: usize, z: usize) -> Self {
        NdRange { dims: [x, y, z], rank: 3 }
    }

    pub fn rank(&self) -> usize {
        self.rank as usize
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims[..self.rank as usize]
    }

    pub fn size(&self) -> usize {
        self.dims().iter().product()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelOptions {
    pub global: NdRange,
    pub local: Option<NdRange>,
}

/// Positional kernel argument.
#[derive(Clone, Debug, PartialEq)]
pub enum KernelArg {
    Int(i32),
    Float(f32),
    Complex(Complex32),
    Buffer(Buffer),
}

impl From<i32> for KernelArg {
    fn from(v: i32) -> Self {
        KernelArg::Int(v)
    }
}

impl From<f32> for KernelArg {
    fn from(v: f32) -> Self {
        KernelArg::Float(v)
    }
}

impl From<Complex32> for KernelArg {
    fn from(v: Complex32) -> Self {
        KernelArg::Complex(v)
    }
}

impl From<Buffer> for KernelArg {
    fn from(v: Buffer) -> Self {
        KernelArg::Buffer(v)
    }
}

impl From<&Buffer> for KernelArg {
    fn from(v: &Buffer) -> Self {
        KernelArg::Buffer(v.clone())
    }
}

macro_rules! flag_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for KernelArg {
                fn from(v: $ty) -> Self {
                    KernelArg::Int(v as i32)
                }
            }
        )*
    };
}

flag_arg!(Operation, FillMode, Diag, Side);

pub trait Kernel: Send {
    fn set_arg(&mut self, index: u32, arg: KernelArg) -> std::result::Result<(), EngineError>;
    fn set_options(&mut self, options: KernelOptions) -> std::result::Result<(), EngineError>;
    /// Queues the kernel once `deps` complete, returns without blocking.
    fn submit(&mut self, deps: &[Event]) -> std::result::Result<Event, EngineError>;
}

pub trait Engine: Send + Sync {
    fn get_kernel(&self, kernel: &str, module: &str) -> std::result::Result<Box<dyn Kernel>, EngineError>;
    fn bind_host(&self, region: HostRegion, access: Access) -> std::result::Result<Buffer, EngineError>;
    fn create_temp(&self, bytes: usize) -> std::result::Result<Buffer, EngineError>;
    /// Event that completes once all of `deps` have, no work attached.
    fn raise_event(&self, deps: &[Event]) -> std::result::Result<Event, EngineError>;
    /// Blocks until everything submitted so far has completed or failed.
    fn finish(&self) -> std::result::Result<(), EngineError>;
}

/// Typed buffer acquisition on top of [`Engine`].
pub trait EngineExt: Engine {
    fn get_input_buffer<T>(&self, blob: Blob<T>, count: usize) -> Result<Buffer> {
        Ok(self.bind_host(blob.region(count)?, Access::Input)?)
    }

    fn get_output_buffer<T>(&self, blob: Blob<T>, count: usize) -> Result<Buffer> {
        Ok(self.bind_host(blob.writable_region(count)?, Access::Output)?)
    }

    fn get_inout_buffer<T>(&self, blob: Blob<T>, count: usize) -> Result<Buffer> {
        Ok(self.bind_host(blob.writable_region(count)?, Access::InOut)?)
    }

    fn get_temp_buffer<T>(&self, count: usize) -> Result<Buffer> {
        if count == 0 {
            return Err(Error::ZeroSizedBuffer);
        }
        Ok(self.create_temp(count * size_of::<T>())?)
    }
}

impl<E: Engine + ?Sized> EngineExt for E {}
