use crate::engine::{Engine, Event, Kernel, KernelArg, KernelOptions, NdRange};
use crate::Result;

/// One resolved kernel with its arguments and geometry, ready to submit.
///
/// Can be submitted several times, each submission uses whatever arguments
/// are bound at that moment.
pub struct Launch {
    kernel: Box<dyn Kernel>,
    name: &'static str,
}

impl Launch {
    pub fn new(engine: &dyn Engine, kernel: &'static str, module: &'static str) -> Result<Self> {
        let k = engine.get_kernel(kernel, module)?;
        Ok(Launch { kernel: k, name: kernel })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Binds `args` to positions `0..`.
    pub fn bind<I>(&mut self, args: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = KernelArg>,
    {
        for (i, arg) in args.into_iter().enumerate() {
            self.kernel.set_arg(i as u32, arg)?;
        }
        Ok(self)
    }

    pub fn set_arg(&mut self, index: u32, arg: impl Into<KernelArg>) -> Result<&mut Self> {
        self.kernel.set_arg(index, arg.into())?;
        Ok(self)
    }

    pub fn geometry(&mut self, global: NdRange, local: Option<NdRange>) -> Result<&mut Self> {
        self.kernel.set_options(KernelOptions { global, local })?;
        Ok(self)
    }

    pub fn submit(&mut self, deps: &[Event]) -> Result<Event> {
        let ev = self.kernel.submit(deps)?;
        log::trace!("submitted {} as event {} after {} deps", self.name, ev.id(), deps.len());
        Ok(ev)
    }
}

/// Builds a positional argument array, each item goes through `KernelArg::from`.
#[macro_export]
macro_rules! kernel_args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::KernelArg::from($arg)),*]
    };
}
