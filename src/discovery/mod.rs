mod files;
mod roots;

pub use files::{collect_files, FileFilter};
pub use roots::{find_config_root, find_upwards, ProjectRoot};
