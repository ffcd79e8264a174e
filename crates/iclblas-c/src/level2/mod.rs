pub mod cgemv;
pub mod chemv;
pub mod cher;
pub mod chpr;
pub mod ctpmv;

pub use cgemv::{Cgbmv, CgbmvParams, CgbmvScore, Cgemv, CgemvParams, CgemvScore};
pub use chemv::{Chbmv, ChbmvParams, ChbmvScore, Chemv, ChemvParams, ChemvScore};
pub use cher::{Cher, Cher2, Cher2Params, Cher2Score, CherParams, CherScore};
pub use chpr::{Chpr, Chpr2, Chpr2Params, Chpr2Score, ChprParams, ChprScore};
pub use ctpmv::{Ctbsv, CtbsvParams, CtbsvScore, Ctpmv, CtpmvParams, CtpmvScore, Ctpsv, CtpsvParams, CtpsvScore};

use iclblas_base::Registry;

pub fn register(registry: &mut Registry) {
    cgemv::register(registry);
    chemv::register(registry);
    cher::register(registry);
    chpr::register(registry);
    ctpmv::register(registry);
}
