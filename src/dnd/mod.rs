mod grid;
mod session;

pub(crate) use grid::{GridBind, GridRegistrar};
pub(crate) use session::{DragSession, SortList};
