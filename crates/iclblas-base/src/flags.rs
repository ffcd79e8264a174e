// Values are part of the kernel ABI, kernels receive them as plain ints.

#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    N = 0,
    T = 1,
    C = 2,
}

#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillMode {
    Upper = 0,
    Lower = 1,
}

#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Diag {
    NonUnit = 0,
    Unit = 1,
}

#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Operation {
    pub fn is_trans(self) -> bool {
        self != Operation::N
    }
}

macro_rules! flag_from_str {
    ($ty:ident, $($s:literal => $v:ident),+ $(,)?) => {
        impl std::str::FromStr for $ty {
            type Err = crate::Error;
            fn from_str(s: &str) -> crate::Result<Self> {
                match s {
                    $($s => Ok($ty::$v),)+
                    _ => Err(crate::Error::InvalidValue(stringify!($ty))),
                }
            }
        }
    };
}

flag_from_str!(Operation, "n" => N, "N" => N, "t" => T, "T" => T, "c" => C, "C" => C);
flag_from_str!(FillMode, "u" => Upper, "upper" => Upper, "l" => Lower, "lower" => Lower);
flag_from_str!(Diag, "n" => NonUnit, "non-unit" => NonUnit, "u" => Unit, "unit" => Unit);
flag_from_str!(Side, "l" => Left, "left" => Left, "r" => Right, "right" => Right);
