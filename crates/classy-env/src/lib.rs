//! The `classy` typing environment (spec §4.2) and well-formedness checks
//! (spec §4.7).

pub mod environment;
pub mod info;
pub mod wf;

pub use environment::Environment;
pub use info::{ClassInfo, InstanceInfo, LabelInfo, TypeInfo};
pub use wf::{check_correct_context, check_equal_types, check_equivalent_kind, check_type_constructor_application, check_wf_type};
