pub mod isamax;
pub mod isamin;
pub mod sasum;
pub mod saxpy;
pub mod sdot;
pub mod snrm2;
pub mod srot;
pub mod srotg;
pub mod srotm;
pub mod srotmg;
pub mod sscal;

pub use isamax::{Isamax, IsamaxParams, IsamaxScore};
pub use isamin::{Isamin, IsaminParams, IsaminScore};
pub use sasum::{Sasum, SasumParams, SasumScore};
pub use saxpy::{Saxpy, SaxpyParams, SaxpyScore};
pub use sdot::{Sdot, SdotParams, SdotScore};
pub use snrm2::{Snrm2, Snrm2Params, Snrm2Score};
pub use srot::{Srot, SrotParams, SrotScore};
pub use srotg::{Srotg, SrotgParams, SrotgScore};
pub use srotm::{Srotm, SrotmParams, SrotmScore};
pub use srotmg::{Srotmg, SrotmgParams, SrotmgScore};
pub use sscal::{Sscal, SscalParams, SscalScore};

use iclblas_base::Registry;

pub fn register(registry: &mut Registry) {
    sasum::register(registry);
    sdot::register(registry);
    saxpy::register(registry);
    sscal::register(registry);
    snrm2::register(registry);
    isamax::register(registry);
    isamin::register(registry);
    srot::register(registry);
    srotm::register(registry);
    srotmg::register(registry);
    srotg::register(registry);
}
