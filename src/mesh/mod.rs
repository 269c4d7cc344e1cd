pub mod boundary;
pub mod data;
pub mod grid;
pub mod stencil;

pub use boundary::BcPolicy;
pub use data::{CellCenteredData, FieldId};
pub use grid::Grid2d;
pub use stencil::{StencilView, StencilViewMut};
