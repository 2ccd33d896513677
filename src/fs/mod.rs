//! Filesystem side of the explorer: directory snapshots, notes, clipboard,
//! bulk operations, content sniffing and change watching.

pub mod clipboard;
pub mod content;
pub mod directory;
pub mod notes;
pub mod operations;
pub mod watcher;
