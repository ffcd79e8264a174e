pub mod sgbmv;
pub mod sgemv;
pub mod sger;
pub mod sspmv;
pub mod sspr;
pub mod ssymv;
pub mod ssyr;
pub mod ssyr2;
pub mod stpmv;
pub mod strsv;

pub use sgbmv::{Sgbmv, SgbmvParams, SgbmvScore};
pub use sgemv::{Sgemv, SgemvParams, SgemvScore};
pub use sger::{Sger, SgerParams, SgerScore};
pub use sspmv::{Sspmv, SspmvParams, SspmvScore};
pub use sspr::{Sspr, SsprParams, SsprScore};
pub use ssymv::{Ssymv, SsymvParams, SsymvScore};
pub use ssyr::{Ssyr, SsyrParams, SsyrScore};
pub use ssyr2::{Ssyr2, Ssyr2Params, Ssyr2Score};
pub use stpmv::{Stpmv, StpmvParams, StpmvScore};
pub use strsv::{Strsv, StrsvParams, StrsvScore};

use iclblas_base::Registry;

pub fn register(registry: &mut Registry) {
    sgemv::register(registry);
    sgbmv::register(registry);
    sger::register(registry);
    ssyr::register(registry);
    ssyr2::register(registry);
    ssymv::register(registry);
    sspmv::register(registry);
    sspr::register(registry);
    stpmv::register(registry);
    strsv::register(registry);
}
