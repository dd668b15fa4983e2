//! Branch-naming bump rules and the dispatcher that selects among them.
//!
//! | Rule                | Priority | Branches            |
//! |---------------------|----------|---------------------|
//! | `MainMajorBumpRule` | 10       | `main` + `isMajor`  |
//! | `MainMinorBumpRule` | 15       | `main`              |
//! | `QaBumpRule`        | 20       | `qa*`               |
//! | `FeatureBumpRule`   | 30       | `feature/*`         |
//! | `FixBumpRule`       | 40       | `fix/*`             |

mod bumper;
mod main_bump;
mod qa_bump;
mod rule;
mod topic_bump;

pub use bumper::VersionBumper;
pub use main_bump::{MainMajorBumpRule, MainMinorBumpRule};
pub use qa_bump::QaBumpRule;
pub use rule::VersionRule;
pub use topic_bump::{FeatureBumpRule, FixBumpRule};
