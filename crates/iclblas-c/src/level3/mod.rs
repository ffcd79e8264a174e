pub mod cgemm;
pub mod cherk;
pub mod ctrmm;

pub use cgemm::{Cgemm, CgemmParams, CgemmScore, Csymm, CsymmParams, CsymmScore};
pub use cherk::{Cher2k, Cher2kParams, Cher2kScore, Cherk, CherkParams, CherkScore, Csyrk, CsyrkParams, CsyrkScore};
pub use ctrmm::{Ctrmm, CtrmmParams, CtrmmScore, Ctrsm, CtrsmParams, CtrsmScore};

use iclblas_base::Registry;

pub fn register(registry: &mut Registry) {
    cgemm::register(registry);
    cherk::register(registry);
    ctrmm::register(registry);
}
