//! Local persistence for the display name.
//!
//! One key-value slot, stored as a small JSON file. All components reach
//! the saved name only through [`NameStore`], never by touching the file
//! directly.

mod name;

pub use name::NameStore;
