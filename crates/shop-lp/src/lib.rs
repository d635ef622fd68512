//! Read-only views over the LP model the SHOP engine builds for a run,
//! plus adding variables back through the engine's `add_var_*` attributes.
//!
//! [`LpModel`] owns the validated arrays; [`Var`], [`VarType`] and
//! [`IndexType`] borrow it and hold only an id.

pub mod index_type;
pub mod model;
pub mod var;
pub mod var_type;

pub use index_type::{IndexType, IndexTypeBuilder};
pub use model::{LpArrays, LpModel, LP_OBJECT_NAME, LP_OBJECT_TYPE};
pub use var::{Var, VarBuilder, VarInfo, VarParameters, DEFAULT_LB, DEFAULT_UB};
pub use var_type::{VarType, VarTypeBuilder};
