pub mod caxpy;
pub mod cdot;
pub mod crot;
pub mod icamax;
pub mod scnrm2;

pub use caxpy::{Caxpy, CaxpyParams, CaxpyScore, Cscal, CscalParams, CscalScore};
pub use cdot::{Cdotc, CdotcParams, CdotcScore, Cdotu, CdotuParams, CdotuScore};
pub use crot::{Crotg, CrotgParams, CrotgScore, Csrot, CsrotParams, CsrotScore};
pub use icamax::{Icamax, IcamaxParams, IcamaxScore, Icamin, IcaminParams, IcaminScore};
pub use scnrm2::{Scasum, ScasumParams, ScasumScore, Scnrm2, Scnrm2Params, Scnrm2Score};

use iclblas_base::Registry;

pub fn register(registry: &mut Registry) {
    cdot::register(registry);
    caxpy::register(registry);
    scnrm2::register(registry);
    icamax::register(registry);
    crot::register(registry);
}
