use core::fmt;

use num_complex::Complex32;

use crate::blob::Blob;
use crate::dispatch::Dispatcher;
use crate::engine::Event;
use crate::{Diag, Error, FillMode, Operation, Result, Side};

/// Per-parameter suitability multipliers of one candidate.
///
/// Every field starts at `1.0`, the total is the product of all fields.
pub trait ScoreRecord: Copy + Default + fmt::Debug + Send + Sync + 'static {
    fn fields(&self) -> Vec<(&'static str, f32)>;

    fn total(&self) -> f32 {
        self.fields().iter().map(|(_, v)| *v).product()
    }
}

/// A BLAS routine: its name plus the parameter and score records shared by
/// all of its candidates.
pub trait Routine: 'static {
    const NAME: &'static str;
    type Params: Copy + fmt::Debug;
    type Score: ScoreRecord;

    /// True when a leading dimension is zero and nothing has to run.
    fn is_empty(params: &Self::Params) -> bool;

    /// Caller-facing argument checks, dimension and stride rules by field name.
    fn validate(params: &Self::Params) -> Result<()>;
}

/// One way of running routine `R`.
///
/// Implementations are stateless and shared between threads.
pub trait Implementation<R: Routine>: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` when these parameters can not be handled, otherwise the
    /// candidate's score starting from the default record.
    fn accept(&self, params: &R::Params) -> Option<R::Score>;

    /// Submits the work for `params` after `deps`.
    ///
    /// # Safety
    ///
    /// Every non-null blob in `params` must point to memory that stays
    /// valid until the returned event completes. Blobs the routine
    /// writes must not be read or written by anything else in that time.
    unsafe fn execute(&self, dispatcher: &Dispatcher, params: &R::Params, deps: &[Event]) -> Result<Event>;
}

/// Null check for operand fields, everything but blobs passes.
pub trait Operand {
    fn check(&self, field: &'static str) -> Result<()>;
}

impl<T> Operand for Blob<T> {
    fn check(&self, field: &'static str) -> Result<()> {
        if self.is_null() {
            return Err(Error::InvalidValue(field));
        }
        Ok(())
    }
}

macro_rules! plain_operand {
    ($($ty:ty),*) => {
        $(
            impl Operand for $ty {
                #[inline]
                fn check(&self, _field: &'static str) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

plain_operand!(i32, f32, Complex32, Operation, FillMode, Diag, Side);

/// Declares a routine marker type together with its `Params` and `Score` records.
///
/// ```ignore
/// def_routine! {
///     Sasum { n: i32, x: Blob<f32>, incx: i32, result: Blob<f32> }
/// }
/// ```
/// expands to `Sasum`, `SasumParams` and `SasumScore`, one score field per parameter.
#[macro_export]
macro_rules! def_routine {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $crate::paste::paste! {
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            #[derive(Clone, Copy, Debug)]
            pub struct [<$name Params>] {
                $(pub $field: $ty,)*
            }

            #[derive(Clone, Copy, Debug, PartialEq)]
            pub struct [<$name Score>] {
                $(pub $field: f32,)*
            }

            impl Default for [<$name Score>] {
                fn default() -> Self {
                    [<$name Score>] { $($field: 1.0,)* }
                }
            }

            impl $crate::ScoreRecord for [<$name Score>] {
                fn fields(&self) -> Vec<(&'static str, f32)> {
                    vec![$((stringify!($field), self.$field),)*]
                }

                fn total(&self) -> f32 {
                    1.0 $(* self.$field)*
                }
            }

            impl $crate::Routine for $name {
                const NAME: &'static str = stringify!($name);
                type Params = [<$name Params>];
                type Score = [<$name Score>];

                #[allow(unused_variables)]
                fn is_empty(params: &Self::Params) -> bool {
                    false $(|| $crate::__empty_dim!($field, params.$field))*
                }

                #[allow(unused_variables)]
                fn validate(params: &Self::Params) -> $crate::Result<()> {
                    $($crate::__check_field!($field, params.$field);)*
                    Ok(())
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __empty_dim {
    (n, $v:expr) => {
        $v == 0
    };
    (m, $v:expr) => {
        $v == 0
    };
    (num, $v:expr) => {
        $v == 0
    };
    ($f:ident, $v:expr) => {
        false
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_field {
    (@dim $f:ident, $v:expr) => {
        if $v < 0 {
            return Err($crate::Error::InvalidValue(stringify!($f)));
        }
    };
    (@inc $f:ident, $v:expr) => {
        if $v == 0 {
            return Err($crate::Error::InvalidValue(stringify!($f)));
        }
        if $v < 0 {
            return Err($crate::Error::NotSupported(stringify!($f)));
        }
    };
    (@ld $f:ident, $v:expr) => {
        if $v <= 0 {
            return Err($crate::Error::InvalidValue(stringify!($f)));
        }
    };
    (n, $v:expr) => { $crate::__check_field!(@dim n, $v) };
    (m, $v:expr) => { $crate::__check_field!(@dim m, $v) };
    (k, $v:expr) => { $crate::__check_field!(@dim k, $v) };
    (kl, $v:expr) => { $crate::__check_field!(@dim kl, $v) };
    (ku, $v:expr) => { $crate::__check_field!(@dim ku, $v) };
    (num, $v:expr) => { $crate::__check_field!(@dim num, $v) };
    (incx, $v:expr) => { $crate::__check_field!(@inc incx, $v) };
    (incy, $v:expr) => { $crate::__check_field!(@inc incy, $v) };
    (lda, $v:expr) => { $crate::__check_field!(@ld lda, $v) };
    (ldb, $v:expr) => { $crate::__check_field!(@ld ldb, $v) };
    (ldc, $v:expr) => { $crate::__check_field!(@ld ldc, $v) };
    ($f:ident, $v:expr) => {
        $crate::Operand::check(&$v, stringify!($f))?
    };
}
