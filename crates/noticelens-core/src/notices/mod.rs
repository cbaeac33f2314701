//! Every notice type this build can identify.

pub mod cp23;
pub mod cp503c;

use crate::notice::NoticeTemplate;

/// All notice templates in match order. Each returns a boxed template.
pub fn all_notices() -> Vec<Box<dyn NoticeTemplate>> {
    vec![Box::new(cp23::Cp23Notice), Box::new(cp503c::Cp503cNotice)]
}
