pub mod assets;
pub mod dialog;
pub mod dropdown;
pub mod layout;
pub mod panels;
pub mod scheduler;
