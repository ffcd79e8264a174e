pub mod sgemm;
pub mod ssymm;

pub use sgemm::{Sgemm, SgemmParams, SgemmScore};
pub use ssymm::{Ssymm, SsymmParams, SsymmScore};

use iclblas_base::Registry;

pub fn register(registry: &mut Registry) {
    sgemm::register(registry);
    ssymm::register(registry);
}
